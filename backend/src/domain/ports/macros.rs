//! Helper macro generating storage port error enums.
//!
//! Every variant carries a `message` and names the [`ErrorCode`] it maps to,
//! so the generated type converts into the domain [`Error`] without a
//! hand-written match.
//!
//! [`ErrorCode`]: crate::domain::ErrorCode
//! [`Error`]: crate::domain::Error

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $code:ident, $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a `", stringify!($variant), "` error.")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )*

            /// Detail text without the variant prefix.
            #[must_use]
            pub fn message(&self) -> &str {
                match self {
                    $( Self::$variant { message } => message.as_str(), )*
                }
            }

            /// Domain error category for this failure.
            #[must_use]
            pub const fn code(&self) -> $crate::domain::ErrorCode {
                match self {
                    $( Self::$variant { .. } => $crate::domain::ErrorCode::$code, )*
                }
            }
        }

        impl From<$name> for $crate::domain::Error {
            fn from(err: $name) -> Self {
                Self::new(err.code(), err.to_string())
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use crate::domain::{Error, ErrorCode};

    define_port_error! {
        pub enum ExamplePortError {
            Unreachable => ServiceUnavailable, "backend unreachable: {message}",
            Missing => NotFound, "{message}",
        }
    }

    #[test]
    fn constructors_are_snake_case() {
        let err = ExamplePortError::unreachable("socket closed");
        assert_eq!(err.to_string(), "backend unreachable: socket closed");
        assert_eq!(err.message(), "socket closed");
    }

    #[test]
    fn converts_into_domain_error_with_mapped_code() {
        let err: Error = ExamplePortError::missing("user 7 does not exist").into();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "user 7 does not exist");
    }
}
