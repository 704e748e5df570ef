use crate::ir::Location;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompilerError {
    /// The producer broke a contract of the backend interface.
    #[error("Invalid IR: {0}")]
    InvalidIr(String, Option<Location>),

    /// A type/operator combination GLSL has no spelling for.
    #[error("Unsupported in GLSL: {0}")]
    Unsupported(String, Option<Location>),

    #[error("Reflection serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompilerError {
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::InvalidIr(_, loc) => loc.as_ref(),
            Self::Unsupported(_, loc) => loc.as_ref(),
            Self::Json(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompilerError>;

// Bail macros without location

#[macro_export]
macro_rules! bail_ir {
    ($($arg:tt)*) => {
        return Err($crate::error::CompilerError::InvalidIr(format!($($arg)*), None))
    };
}

#[macro_export]
macro_rules! bail_unsupported {
    ($($arg:tt)*) => {
        return Err($crate::error::CompilerError::Unsupported(format!($($arg)*), None))
    };
}

// Bail macros with location

#[macro_export]
macro_rules! bail_ir_at {
    ($loc:expr, $($arg:tt)*) => {
        return Err($crate::error::CompilerError::InvalidIr(format!($($arg)*), Some($loc.clone())))
    };
}

#[macro_export]
macro_rules! bail_unsupported_at {
    ($loc:expr, $($arg:tt)*) => {
        return Err($crate::error::CompilerError::Unsupported(format!($($arg)*), Some($loc.clone())))
    };
}

#[macro_export]
macro_rules! err_ir {
    ($($arg:tt)*) => {
        $crate::error::CompilerError::InvalidIr(format!($($arg)*), None)
    };
}
