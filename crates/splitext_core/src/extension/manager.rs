//! Split extension façade.
//!
//! # Responsibility
//! - Compose resolution and attach into split activation entry points.
//! - Answer component ownership queries through one memoized classifier.
//!
//! # Invariants
//! - The manager keeps no reference to applications it creates.
//! - Activation and membership flows are independent of each other.
//!
//! # See also
//! - `extension::resolver`, `extension::attach`, `extension::membership`

use crate::extension::application::{HostContext, SplitApplication};
use crate::extension::attach::{attach_application, AttachError};
use crate::extension::loader::TypeLoader;
use crate::extension::membership::{CacheState, ComponentKind, MembershipClassifier};
use crate::extension::provider::SplitComponentInfoProvider;
use crate::extension::resolver::{resolve_application, ResolutionError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Construction options for [`SplitExtensionManager`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManagerOptions {
    /// Populate all membership caches during construction.
    pub preload_membership: bool,
}

/// Failure of the combined create-then-attach path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationError {
    Resolution(ResolutionError),
    Attach(AttachError),
}

impl Display for ActivationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolution(err) => write!(f, "{err}"),
            Self::Attach(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ActivationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Resolution(err) => Some(err),
            Self::Attach(err) => Some(err),
        }
    }
}

impl From<ResolutionError> for ActivationError {
    fn from(value: ResolutionError) -> Self {
        Self::Resolution(value)
    }
}

impl From<AttachError> for ActivationError {
    fn from(value: AttachError) -> Self {
        Self::Attach(value)
    }
}

/// Split application and component-ownership registry for one host process.
pub struct SplitExtensionManager {
    context: HostContext,
    provider: Arc<dyn SplitComponentInfoProvider>,
    loader: Arc<dyn TypeLoader>,
    membership: MembershipClassifier,
}

impl SplitExtensionManager {
    pub fn new(
        context: HostContext,
        provider: Arc<dyn SplitComponentInfoProvider>,
        loader: Arc<dyn TypeLoader>,
    ) -> Self {
        Self::with_options(context, provider, loader, ManagerOptions::default())
    }

    pub fn with_options(
        context: HostContext,
        provider: Arc<dyn SplitComponentInfoProvider>,
        loader: Arc<dyn TypeLoader>,
        options: ManagerOptions,
    ) -> Self {
        let manager = Self {
            context,
            provider,
            loader,
            membership: MembershipClassifier::new(),
        };
        if options.preload_membership {
            manager.preload_membership();
        }
        info!(
            "event=split_manager_init module=extension status=ok host={} preload={}",
            manager.context.label(),
            options.preload_membership
        );
        manager
    }

    pub fn context(&self) -> &HostContext {
        &self.context
    }

    /// Creates a fresh bootstrap application for `split_name`.
    ///
    /// Returns `Ok(None)` when the split declares none. The result is not
    /// attached; pass it to [`Self::activate_application`] before use.
    pub fn create_application(
        &self,
        split_name: &str,
    ) -> Result<Option<Box<dyn SplitApplication>>, ResolutionError> {
        resolve_application(self.provider.as_ref(), self.loader.as_ref(), split_name)
    }

    /// Attaches `app` to this manager's host context. `None` is a no-op.
    pub fn activate_application(
        &self,
        app: Option<&mut (dyn SplitApplication + 'static)>,
    ) -> Result<(), AttachError> {
        attach_application(app, &self.context)
    }

    /// Creates and attaches the application for `split_name` in one step.
    pub fn create_and_activate(
        &self,
        split_name: &str,
    ) -> Result<Option<Box<dyn SplitApplication>>, ActivationError> {
        let mut app = self.create_application(split_name)?;
        self.activate_application(app.as_deref_mut())?;
        Ok(app)
    }

    /// Runs `on_create` for each activated application, in order.
    pub fn dispatch_on_create(&self, apps: &mut [Box<dyn SplitApplication>]) {
        for app in apps.iter_mut() {
            app.on_create();
            info!(
                "event=split_app_on_create module=extension status=ok type={}",
                app.type_name()
            );
        }
    }

    pub fn is_activity_member(&self, name: &str) -> bool {
        self.membership
            .is_activity_member(self.provider.as_ref(), name)
    }

    pub fn is_service_member(&self, name: &str) -> bool {
        self.membership
            .is_service_member(self.provider.as_ref(), name)
    }

    pub fn is_receiver_member(&self, name: &str) -> bool {
        self.membership
            .is_receiver_member(self.provider.as_ref(), name)
    }

    pub fn is_member(&self, kind: ComponentKind, name: &str) -> bool {
        self.membership.is_member(self.provider.as_ref(), kind, name)
    }

    /// Fetches every unfetched membership set now.
    pub fn preload_membership(&self) {
        self.membership.preload(self.provider.as_ref());
    }

    pub fn membership_state(&self, kind: ComponentKind) -> CacheState {
        self.membership.state(kind)
    }
}
