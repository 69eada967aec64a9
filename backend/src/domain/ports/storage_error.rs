//! Error shared by every storage port.

use super::define_port_error;

define_port_error! {
    /// Failures raised by storage adapters.
    pub enum StorageError {
        /// The backing store could not be reached.
        Connection => ServiceUnavailable, "storage connection failed: {message}",
        /// A read or write failed while executing.
        Query => InternalError, "storage query failed: {message}",
        /// The addressed row does not exist.
        NotFound => NotFound, "{message}",
        /// A uniqueness or referential constraint rejected the write.
        Constraint => Conflict, "constraint violated: {message}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Error, ErrorCode};
    use rstest::rstest;

    #[rstest]
    #[case(StorageError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(StorageError::query("syntax"), ErrorCode::InternalError)]
    #[case(StorageError::not_found("post 1 does not exist"), ErrorCode::NotFound)]
    #[case(StorageError::constraint("duplicate edge"), ErrorCode::Conflict)]
    fn maps_to_domain_codes(#[case] err: StorageError, #[case] expected: ErrorCode) {
        let message = err.to_string();
        let domain: Error = err.into();
        assert_eq!(domain.code(), expected);
        assert_eq!(domain.message(), message);
    }
}
