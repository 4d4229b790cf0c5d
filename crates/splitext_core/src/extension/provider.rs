//! Split component metadata provider contract.

use std::collections::BTreeMap;

/// Source of truth for per-split metadata.
///
/// Every method may return `None` when nothing is declared. Implementations
/// must not block indefinitely.
pub trait SplitComponentInfoProvider: Send + Sync {
    /// Bootstrap application type name declared by `split_name`.
    fn split_application_name(&self, split_name: &str) -> Option<String>;
    fn split_activities(&self) -> Option<Vec<String>>;
    fn split_services(&self) -> Option<Vec<String>>;
    fn split_receivers(&self) -> Option<Vec<String>>;
}

/// In-memory provider with fixed declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticComponentInfo {
    applications: BTreeMap<String, String>,
    activities: Option<Vec<String>>,
    services: Option<Vec<String>>,
    receivers: Option<Vec<String>>,
}

impl StaticComponentInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_application(
        mut self,
        split_name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        self.applications.insert(split_name.into(), type_name.into());
        self
    }

    pub fn with_activities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activities = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_services<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_receivers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.receivers = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Split names that declare an application type, sorted.
    pub fn split_names(&self) -> Vec<String> {
        self.applications.keys().cloned().collect()
    }
}

impl SplitComponentInfoProvider for StaticComponentInfo {
    fn split_application_name(&self, split_name: &str) -> Option<String> {
        self.applications.get(split_name).cloned()
    }

    fn split_activities(&self) -> Option<Vec<String>> {
        self.activities.clone()
    }

    fn split_services(&self) -> Option<Vec<String>> {
        self.services.clone()
    }

    fn split_receivers(&self) -> Option<Vec<String>> {
        self.receivers.clone()
    }
}
