//! Domain primitives, ports and the graph resolution core.
//!
//! Public surface:
//! - entities and identifiers: [`User`], [`Profile`], [`Post`],
//!   [`MemberType`], [`Subscription`];
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures;
//! - [`ports`]: storage and driving ports;
//! - [`loader`]: the per-request batch coalescer;
//! - [`graph`]: binding and execution of GraphQL operations.

pub mod context;
pub mod error;
pub mod graph;
mod ids;
pub mod loader;
pub mod member_type;
pub mod mutations;
pub mod ports;
pub mod post;
pub mod profile;
pub mod providers;
pub mod subscription;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::ids::IdParseError;
pub use self::member_type::{MemberType, MemberTypeId, UnknownMemberType};
pub use self::post::{NewPost, Post, PostId, PostPatch};
pub use self::profile::{NewProfile, Profile, ProfileId, ProfilePatch};
pub use self::subscription::{LinkedUser, Subscription};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserId, UserPatch};
