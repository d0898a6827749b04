use thiserror::Error;
use ulc::CompileError;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("File {0} does not exist")]
    InputFileDoesNotExist(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl DriverError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Compile(err) => err.error_code(),
            Self::InputFileDoesNotExist(_) | Self::Io(_) => 1,
        }
    }
}
