//! Name-keyed instantiation of split application types.
//!
//! # Responsibility
//! - Resolve a type name to a registered factory and build a fresh instance.
//! - Report every lookup/construction failure as one of three `LoadError` causes.
//!
//! # Invariants
//! - Registered type names are unique and well-formed.
//! - Every successful `instantiate` call returns a newly constructed instance.
//! - Factory panics never cross `instantiate`.

use crate::extension::application::SplitApplication;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

static TYPE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:(?:\.|::)[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("valid type name regex")
});

/// Returns true when `value` is a dotted or `::`-separated identifier path.
pub fn is_valid_type_name(value: &str) -> bool {
    TYPE_NAME_RE.is_match(value)
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Zero-argument constructor for one split application type.
pub type ApplicationFactory =
    Arc<dyn Fn() -> LoadResult<Box<dyn SplitApplication>> + Send + Sync>;

/// Cause of a failed type lookup or instantiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    TypeNotFound(String),
    NotInstantiable { type_name: String, reason: String },
    AccessDenied(String),
}

impl LoadError {
    pub fn not_instantiable(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotInstantiable {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TypeNotFound(_) => "type_not_found",
            Self::NotInstantiable { .. } => "not_instantiable",
            Self::AccessDenied(_) => "access_denied",
        }
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeNotFound(value) => write!(f, "type not found: {value}"),
            Self::NotInstantiable { type_name, reason } => {
                write!(f, "type `{type_name}` cannot be instantiated: {reason}")
            }
            Self::AccessDenied(value) => write!(f, "access to type denied: {value}"),
        }
    }
}

impl Error for LoadError {}

/// Dynamic type-loading capability consumed by the resolver.
pub trait TypeLoader: Send + Sync {
    /// Builds a fresh instance of `type_name`.
    fn instantiate(&self, type_name: &str) -> LoadResult<Box<dyn SplitApplication>>;
}

/// Registration errors for [`FactoryTypeLoader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRegistryError {
    InvalidTypeName(String),
    DuplicateTypeName(String),
}

impl Display for TypeRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTypeName(value) => write!(f, "type name is invalid: {value}"),
            Self::DuplicateTypeName(value) => write!(f, "type name already registered: {value}"),
        }
    }
}

impl Error for TypeRegistryError {}

#[derive(Clone)]
enum TypeEntry {
    Public(ApplicationFactory),
    Restricted,
}

/// Type loader backed by an in-process factory map.
#[derive(Default, Clone)]
pub struct FactoryTypeLoader {
    entries: BTreeMap<String, TypeEntry>,
}

impl FactoryTypeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one factory under `type_name`.
    pub fn register<F>(&mut self, type_name: &str, factory: F) -> Result<(), TypeRegistryError>
    where
        F: Fn() -> LoadResult<Box<dyn SplitApplication>> + Send + Sync + 'static,
    {
        self.insert(type_name, TypeEntry::Public(Arc::new(factory)))
    }

    /// Registers a factory for a type that always constructs successfully.
    pub fn register_default<A, F>(
        &mut self,
        type_name: &str,
        constructor: F,
    ) -> Result<(), TypeRegistryError>
    where
        A: SplitApplication + 'static,
        F: Fn() -> A + Send + Sync + 'static,
    {
        self.register(type_name, move || {
            Ok(Box::new(constructor()) as Box<dyn SplitApplication>)
        })
    }

    /// Declares a known type that callers are not allowed to construct.
    pub fn register_restricted(&mut self, type_name: &str) -> Result<(), TypeRegistryError> {
        self.insert(type_name, TypeEntry::Restricted)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// Returns sorted registered type names.
    pub fn type_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn insert(&mut self, type_name: &str, entry: TypeEntry) -> Result<(), TypeRegistryError> {
        let normalized = type_name.trim();
        if !is_valid_type_name(normalized) {
            return Err(TypeRegistryError::InvalidTypeName(type_name.to_string()));
        }
        if self.entries.contains_key(normalized) {
            return Err(TypeRegistryError::DuplicateTypeName(normalized.to_string()));
        }
        self.entries.insert(normalized.to_string(), entry);
        Ok(())
    }
}

impl TypeLoader for FactoryTypeLoader {
    fn instantiate(&self, type_name: &str) -> LoadResult<Box<dyn SplitApplication>> {
        let factory = match self.entries.get(type_name) {
            Some(TypeEntry::Public(factory)) => factory,
            Some(TypeEntry::Restricted) => {
                return Err(LoadError::AccessDenied(type_name.to_string()))
            }
            None => return Err(LoadError::TypeNotFound(type_name.to_string())),
        };

        match catch_unwind(AssertUnwindSafe(|| factory())) {
            Ok(result) => result,
            Err(_) => Err(LoadError::not_instantiable(
                type_name,
                "constructor panicked",
            )),
        }
    }
}
