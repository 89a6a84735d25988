//! Settings loading errors.
//!
//! A present-but-malformed settings file is the only failure this crate
//! raises. An absent file is not an error (the loader falls back to
//! defaults), and setters never reject input (out-of-range values are
//! clamped). The message is composed once at construction so callers can
//! log it as-is; the underlying failure stays attached for diagnostics.

use thiserror::Error;

/// Fixed first line of every malformed-settings message.
const MESSAGE_PREFIX: &str = "The settings file is incorrect:";

/// Error raised when the settings file exists but cannot be opened,
/// parsed, or bound to the schema.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct SettingsError {
    message: String,

    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SettingsError {
    /// Wrap an open/parse/bind failure.
    ///
    /// The composed message is the fixed prefix, the failure's own
    /// description, and the description of the failure's source if it has
    /// one, each on its own line, trimmed of surrounding whitespace.
    pub(crate) fn malformed<E>(cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let mut message = format!("{MESSAGE_PREFIX}\n{cause}");
        if let Some(inner) = cause.source() {
            message.push('\n');
            message.push_str(&inner.to_string());
        }

        Self {
            message: message.trim().to_string(),
            cause: Some(Box::new(cause)),
        }
    }

    /// The composed human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying failure, if one was attached.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}
