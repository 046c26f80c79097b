use std::path::PathBuf;

use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Typed failures that callers need to tell apart from plain I/O noise.
#[derive(Debug, Error)]
pub enum TermsyncError {
    /// A declaration, registry or translation file could not be read or parsed.
    #[error("failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// The operator declined to overwrite an up-to-date translation file.
    #[error("update cancelled for language '{language}'")]
    Cancelled { language: String },

    #[error("{0}")]
    Invalid(String),
}

impl TermsyncError {
    pub fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        TermsyncError::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// True when `err` carries a [`TermsyncError::Cancelled`] anywhere in its chain.
pub fn is_cancelled(err: &color_eyre::eyre::Report) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<TermsyncError>(),
            Some(TermsyncError::Cancelled { .. })
        )
    })
}
