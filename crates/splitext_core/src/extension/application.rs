//! Split application contract and host context handle.
//!
//! # Responsibility
//! - Define the bootstrap object every split may declare.
//! - Carry the host context into the attach hook unchanged.
//!
//! # Invariants
//! - `attach_host` is required; a bootstrap object without it does not compile.
//! - `HostContext` is opaque to this crate and never inspected by it.

use std::any::Any;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Opaque host-process handle passed into [`SplitApplication::attach_host`].
///
/// Cloning shares the same underlying value.
#[derive(Clone)]
pub struct HostContext {
    label: String,
    inner: Arc<dyn Any + Send + Sync>,
}

impl HostContext {
    /// Wraps one host value under a diagnostic label.
    pub fn new<T: Any + Send + Sync>(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            inner: Arc::new(value),
        }
    }

    /// Context without a payload; useful for hosts that only need identity.
    pub fn empty(label: impl Into<String>) -> Self {
        Self::new(label, ())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Borrows the payload when it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Returns true when both handles point at the same host value.
    pub fn same_host(&self, other: &HostContext) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Debug for HostContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Failure reported by a split application's own lifecycle hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for HookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for HookError {}

/// Runtime entry point object declared by one split.
///
/// Instances are produced by a [`crate::TypeLoader`] and owned by the caller.
/// Callers must run the attach step before treating the object as live.
pub trait SplitApplication: Send {
    /// Stable type name this instance was created from.
    fn type_name(&self) -> &str;

    /// Binds this instance to the host process context.
    ///
    /// May be called more than once; each call re-binds.
    fn attach_host(&mut self, context: &HostContext) -> Result<(), HookError>;

    /// Invoked after the host finished creating its own application.
    fn on_create(&mut self) {}
}

impl Debug for dyn SplitApplication + '_ {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitApplication")
            .field("type_name", &self.type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{HookError, HostContext};

    #[test]
    fn downcasts_payload_of_matching_type_only() {
        let context = HostContext::new("host", 42_u32);
        assert_eq!(context.downcast_ref::<u32>(), Some(&42));
        assert!(context.downcast_ref::<String>().is_none());
        assert_eq!(context.label(), "host");
    }

    #[test]
    fn clones_share_the_same_host() {
        let context = HostContext::empty("host");
        let clone = context.clone();
        assert!(context.same_host(&clone));
        assert!(!context.same_host(&HostContext::empty("host")));
    }

    #[test]
    fn hook_error_displays_message() {
        let err = HookError::new("base context already set");
        assert_eq!(err.to_string(), "base context already set");
    }
}
