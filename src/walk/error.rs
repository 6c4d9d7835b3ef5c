//! Unreadable directories and the handler that receives them

use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type a handler may return to abort the current step.
pub type HandlerError = Box<dyn Error + Send + Sync + 'static>;

/// A directory that could not be listed.
///
/// The walk skips the path and carries on with its siblings; this value is
/// what the configured [`ErrorHandler`] gets to see.
#[derive(Debug, Error)]
#[error("cannot read '{}': {reason}", .path.display())]
pub struct Unreadable {
    pub path: PathBuf,
    #[source]
    pub reason: io::Error,
}

impl Unreadable {
    pub fn new(path: impl Into<PathBuf>, reason: io::Error) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reason(&self) -> &io::Error {
        &self.reason
    }
}

/// Errors that end a step abnormally.
///
/// Filesystem failures never show up here. The only way a step fails is a
/// handler refusing an [`Unreadable`] directory.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("error handler failed for '{}': {source}", .path.display())]
    Handler {
        path: PathBuf,
        #[source]
        source: HandlerError,
    },
}

impl WalkError {
    /// The directory whose failure triggered this error.
    pub fn path(&self) -> &Path {
        match self {
            WalkError::Handler { path, .. } => path,
        }
    }
}

type HandlerFn = dyn FnMut(&Unreadable) -> Result<(), HandlerError> + Send;

/// Callback invoked once per unreadable directory.
///
/// There is a single calling shape: the handler receives the whole
/// [`Unreadable`] value. The constructors adapt the other common styles.
pub struct ErrorHandler(Box<HandlerFn>);

impl ErrorHandler {
    /// Handler taking the failure as one value. Returning `Err` aborts the
    /// step that hit the failure.
    pub fn new<H>(handler: H) -> Self
    where
        H: FnMut(&Unreadable) -> Result<(), HandlerError> + Send + 'static,
    {
        Self(Box::new(handler))
    }

    /// Handler taking path and reason as separate arguments.
    pub fn from_parts<H>(mut handler: H) -> Self
    where
        H: FnMut(&Path, &io::Error) -> Result<(), HandlerError> + Send + 'static,
    {
        Self::new(move |failure: &Unreadable| handler(&failure.path, &failure.reason))
    }

    /// Handler that only observes failures and can never abort the walk.
    pub fn inspect<H>(mut handler: H) -> Self
    where
        H: FnMut(&Unreadable) + Send + 'static,
    {
        Self::new(move |failure: &Unreadable| {
            handler(failure);
            Ok(())
        })
    }

    /// Handler that drops every failure. Same as configuring none.
    pub fn ignore() -> Self {
        Self::inspect(|_| {})
    }

    /// Hand one failure to the wrapped callback.
    pub fn dispatch(&mut self, failure: &Unreadable) -> Result<(), HandlerError> {
        (self.0)(failure)
    }
}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorHandler(..)")
    }
}

/// Route a failure to the configured handler, if there is one.
pub(crate) fn dispatch(
    handler: Option<&mut ErrorHandler>,
    failure: Unreadable,
) -> Result<(), WalkError> {
    let Some(handler) = handler else {
        return Ok(());
    };
    handler
        .dispatch(&failure)
        .map_err(|source| WalkError::Handler {
            path: failure.path,
            source,
        })
}
