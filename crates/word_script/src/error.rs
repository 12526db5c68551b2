use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`crate::ScriptRuntime`].
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("script engine error: {0}")]
    Engine(#[from] rquickjs::Error),

    /// A script threw; `message` is the rendered exception.
    #[error("uncaught exception: {message}")]
    Exception { message: String },

    #[error("failed to read script '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
