//! Split extension core: on-demand split application activation and
//! component ownership queries for dynamically delivered feature modules.

pub mod extension;
pub mod logging;

pub use extension::application::{HookError, HostContext, SplitApplication};
pub use extension::attach::{attach_application, AttachError, AttachFailure};
pub use extension::loader::{
    is_valid_type_name, ApplicationFactory, FactoryTypeLoader, LoadError, LoadResult, TypeLoader,
    TypeRegistryError,
};
pub use extension::manager::{ActivationError, ManagerOptions, SplitExtensionManager};
pub use extension::manifest::{
    ManifestError, ManifestValidationError, SplitDeclaration, SplitManifest,
};
pub use extension::membership::{
    CacheState, ComponentKind, ComponentKindError, MembershipClassifier,
};
pub use extension::provider::{SplitComponentInfoProvider, StaticComponentInfo};
pub use extension::resolver::{resolve_application, ResolutionError, ResolutionResult};
pub use logging::{default_log_level, init_logging, logging_status};

/// Minimal health-check API for host integration checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
