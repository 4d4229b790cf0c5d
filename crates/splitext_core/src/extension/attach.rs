//! Split application attach step.

use crate::extension::application::{HookError, HostContext, SplitApplication};
use crate::logging::panic_payload_summary;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Cause of a failed attach hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachFailure {
    /// The hook returned an error.
    Rejected(HookError),
    /// The hook panicked; carries a sanitized payload summary.
    Panicked(String),
}

impl Display for AttachFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "attach hook failed: {err}"),
            Self::Panicked(message) => write!(f, "attach hook panicked: {message}"),
        }
    }
}

impl Error for AttachFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Panicked(_) => None,
        }
    }
}

/// Failure to bind a split application to the host context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachError {
    type_name: String,
    cause: AttachFailure,
}

impl AttachError {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn cause(&self) -> &AttachFailure {
        &self.cause
    }
}

impl Display for AttachError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to attach application `{}`: {}",
            self.type_name, self.cause
        )
    }
}

impl Error for AttachError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

/// Invokes the attach hook of `app` with `context`.
///
/// `None` is a no-op. Callers must attach before using the application and
/// must not attach the same instance from two threads at once.
pub fn attach_application(
    app: Option<&mut (dyn SplitApplication + 'static)>,
    context: &HostContext,
) -> Result<(), AttachError> {
    let Some(app) = app else {
        return Ok(());
    };

    let type_name = app.type_name().to_string();
    let outcome = catch_unwind(AssertUnwindSafe(|| app.attach_host(context)));
    let cause = match outcome {
        Ok(Ok(())) => {
            info!(
                "event=split_app_attach module=extension status=ok type={} host={}",
                type_name,
                context.label()
            );
            return Ok(());
        }
        Ok(Err(err)) => AttachFailure::Rejected(err),
        Err(payload) => AttachFailure::Panicked(panic_payload_summary(&*payload)),
    };

    error!(
        "event=split_app_attach module=extension status=error type={} host={}",
        type_name,
        context.label()
    );
    Err(AttachError { type_name, cause })
}
