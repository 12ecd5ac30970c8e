use thiserror::Error;

use crate::model::DirectoryError;
use crate::model::ParseDateError;
use crate::model::ParseMemberIdError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    ParseDate(#[from] ParseDateError),
    #[error(transparent)]
    ParseMemberId(#[from] ParseMemberIdError),
}
