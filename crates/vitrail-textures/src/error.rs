use std::{error::Error, fmt};

/// Why a texture load failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The loader looked at the input and refused it.
    Rejected { reason: String },
    /// The slot was disposed before (or instead of) resolving.
    Disposed,
    /// The input promised pixel data and delivered none.
    MissingPixels,
}

impl LoadError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { reason } => write!(f, "texture load rejected: {reason}"),
            Self::Disposed => write!(f, "texture slot already disposed"),
            Self::MissingPixels => write!(f, "input carries no pixel data"),
        }
    }
}

impl Error for LoadError {}
