use std::fmt::Display;

use tonic::{Code, Status};

use crate::laptop::StoreError;

/// Maps domain errors to gRPC status codes.
///
/// This is the only place store failures are translated for clients.
pub trait ToStatus: Display {
    fn status_code(&self) -> Code;

    /// Short machine-readable code used in logs.
    fn error_code(&self) -> &'static str;

    fn to_status(&self, context: &str) -> Status {
        Status::new(self.status_code(), format!("{context}: {self}"))
    }
}

impl ToStatus for StoreError {
    fn status_code(&self) -> Code {
        match self {
            StoreError::AlreadyExists(_) => Code::AlreadyExists,
            StoreError::EmptyId | StoreError::LockPoisoned(_) | StoreError::Cancelled(_) => {
                Code::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StoreError::AlreadyExists(_) => "ALREADY_EXISTS",
            StoreError::EmptyId => "EMPTY_ID",
            StoreError::LockPoisoned(_) => "LOCK_POISONED",
            StoreError::Cancelled(_) => "SEARCH_CANCELLED",
        }
    }
}
