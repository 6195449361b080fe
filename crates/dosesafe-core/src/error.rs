use dosesafe_store::StoreError;

use crate::ValidationError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not signed in. Run `dosesafe login` first.")]
    NotAuthenticated,

    #[error("User with this email already exists")]
    UserAlreadyExists(String),

    #[error("No scan with id `{0}` in history")]
    ScanNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
