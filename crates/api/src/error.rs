#[derive(Debug, thiserror::Error)]
pub enum CompilerError {
    #[error("Compiler not configured: {0}")]
    NotConfigured(String),
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
    #[error("Compiler failed: {0}")]
    Failed(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CompilerResult<T> = std::result::Result<T, CompilerError>;
