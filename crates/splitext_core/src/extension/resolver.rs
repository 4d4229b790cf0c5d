//! Split application resolution.
//!
//! # Responsibility
//! - Look up the bootstrap application type a split declares.
//! - Instantiate it through the type loader, fresh on every call.
//!
//! # Invariants
//! - A split without a declared type name, or with an empty one, resolves to `None`.
//! - Any other name is passed to the loader as-is; whitespace is not stripped.
//! - Every loader failure surfaces as one `ResolutionError` carrying the cause.
//! - Nothing is cached; the provider is asked on every call.

use crate::extension::application::SplitApplication;
use crate::extension::loader::{LoadError, TypeLoader};
use crate::extension::provider::SplitComponentInfoProvider;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ResolutionResult<T> = Result<T, ResolutionError>;

/// Failure to create a split's bootstrap application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionError {
    split_name: String,
    type_name: String,
    cause: LoadError,
}

impl ResolutionError {
    pub fn new(
        split_name: impl Into<String>,
        type_name: impl Into<String>,
        cause: LoadError,
    ) -> Self {
        Self {
            split_name: split_name.into(),
            type_name: type_name.into(),
            cause,
        }
    }

    pub fn split_name(&self) -> &str {
        &self.split_name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn cause(&self) -> &LoadError {
        &self.cause
    }
}

impl Display for ResolutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to create application `{}` for split `{}`: {}",
            self.type_name, self.split_name, self.cause
        )
    }
}

impl Error for ResolutionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

/// Creates the bootstrap application declared by `split_name`.
///
/// Returns `Ok(None)` when the split declares no application type.
pub fn resolve_application(
    provider: &dyn SplitComponentInfoProvider,
    loader: &dyn TypeLoader,
    split_name: &str,
) -> ResolutionResult<Option<Box<dyn SplitApplication>>> {
    let type_name = match provider.split_application_name(split_name) {
        Some(value) if !value.is_empty() => value,
        _ => {
            info!(
                "event=split_app_create module=extension status=skipped split={} reason=no_application",
                split_name
            );
            return Ok(None);
        }
    };

    match loader.instantiate(&type_name) {
        Ok(app) => {
            info!(
                "event=split_app_create module=extension status=ok split={} type={}",
                split_name, type_name
            );
            Ok(Some(app))
        }
        Err(cause) => {
            error!(
                "event=split_app_create module=extension status=error split={} type={} code={}",
                split_name,
                type_name,
                cause.code()
            );
            Err(ResolutionError::new(split_name, type_name, cause))
        }
    }
}
