//! Split manifest declaration, validation and loading.
//!
//! # Responsibility
//! - Describe split application types and component ownership as JSON.
//! - Validate declarations before they reach a provider.
//!
//! # Invariants
//! - Split names are non-blank and unique.
//! - Non-blank application and component names are well-formed type names.
//! - A component name appears at most once per kind.
//! - An omitted component list stays absent; it is not an empty list.

use crate::extension::loader::is_valid_type_name;
use crate::extension::membership::ComponentKind;
use crate::extension::provider::StaticComponentInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// One split declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDeclaration {
    /// Stable split name, e.g. `feature_camera`.
    pub name: String,
    /// Bootstrap application type name; blank or omitted means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
}

/// Declarative split manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitManifest {
    #[serde(default)]
    pub splits: Vec<SplitDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receivers: Option<Vec<String>>,
}

impl SplitManifest {
    /// Parses and validates a manifest from JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, ManifestError> {
        let manifest: SplitManifest = serde_json::from_str(raw)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reads, parses and validates a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Serializes this manifest as pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Declared component list for one kind.
    pub fn components(&self, kind: ComponentKind) -> Option<&[String]> {
        match kind {
            ComponentKind::Activity => self.activities.as_deref(),
            ComponentKind::Service => self.services.as_deref(),
            ComponentKind::Receiver => self.receivers.as_deref(),
        }
    }

    /// Validates declaration-level manifest invariants.
    pub fn validate(&self) -> Result<(), ManifestValidationError> {
        let mut split_names = BTreeSet::<&str>::new();
        for split in &self.splits {
            let name = split.name.trim();
            if name.is_empty() {
                return Err(ManifestValidationError::EmptySplitName);
            }
            if !split_names.insert(name) {
                return Err(ManifestValidationError::DuplicateSplitName(
                    name.to_string(),
                ));
            }
            if let Some(application) = split.application.as_deref() {
                let application = application.trim();
                if !application.is_empty() && !is_valid_type_name(application) {
                    return Err(ManifestValidationError::InvalidApplicationType {
                        split: name.to_string(),
                        value: application.to_string(),
                    });
                }
            }
        }

        for kind in ComponentKind::ALL {
            let Some(names) = self.components(kind) else {
                continue;
            };
            let mut dedup = BTreeSet::<&str>::new();
            for name in names {
                if !is_valid_type_name(name) {
                    return Err(ManifestValidationError::InvalidComponentName {
                        kind,
                        value: name.clone(),
                    });
                }
                if !dedup.insert(name.as_str()) {
                    return Err(ManifestValidationError::DuplicateComponent {
                        kind,
                        value: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Builds an in-memory provider from this manifest.
    pub fn to_component_info(&self) -> StaticComponentInfo {
        let mut info = StaticComponentInfo::new();
        for split in &self.splits {
            if let Some(application) = split.application.as_deref() {
                info = info.with_application(split.name.trim(), application.trim());
            }
        }
        if let Some(names) = &self.activities {
            info = info.with_activities(names.iter().cloned());
        }
        if let Some(names) = &self.services {
            info = info.with_services(names.iter().cloned());
        }
        if let Some(names) = &self.receivers {
            info = info.with_receivers(names.iter().cloned());
        }
        info
    }
}

/// Manifest validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestValidationError {
    EmptySplitName,
    DuplicateSplitName(String),
    InvalidApplicationType { split: String, value: String },
    InvalidComponentName { kind: ComponentKind, value: String },
    DuplicateComponent { kind: ComponentKind, value: String },
}

impl Display for ManifestValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySplitName => write!(f, "split name must not be empty"),
            Self::DuplicateSplitName(value) => write!(f, "split name is duplicated: {value}"),
            Self::InvalidApplicationType { split, value } => {
                write!(f, "split `{split}` declares invalid application type: {value}")
            }
            Self::InvalidComponentName { kind, value } => {
                write!(f, "{kind} component name is invalid: {value}")
            }
            Self::DuplicateComponent { kind, value } => {
                write!(f, "{kind} component is duplicated: {value}")
            }
        }
    }
}

impl Error for ManifestValidationError {}

/// Manifest loading errors.
#[derive(Debug)]
pub enum ManifestError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(ManifestValidationError),
}

impl Display for ManifestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read split manifest: {err}"),
            Self::Parse(err) => write!(f, "failed to parse split manifest: {err}"),
            Self::Invalid(err) => write!(f, "invalid split manifest: {err}"),
        }
    }
}

impl Error for ManifestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ManifestError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<ManifestValidationError> for ManifestError {
    fn from(value: ManifestValidationError) -> Self {
        Self::Invalid(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ManifestError, ManifestValidationError, SplitDeclaration, SplitManifest};
    use crate::extension::membership::ComponentKind;
    use crate::extension::provider::SplitComponentInfoProvider;

    fn valid_manifest() -> SplitManifest {
        SplitManifest {
            splits: vec![
                SplitDeclaration {
                    name: "feature_camera".to_string(),
                    application: Some("com.example.camera.CameraApp".to_string()),
                },
                SplitDeclaration {
                    name: "feature_plain".to_string(),
                    application: None,
                },
            ],
            activities: Some(vec!["com.example.camera.CaptureActivity".to_string()]),
            services: Some(vec![]),
            receivers: None,
        }
    }

    #[test]
    fn validates_baseline_manifest() {
        assert!(valid_manifest().validate().is_ok());
    }

    #[test]
    fn rejects_blank_and_duplicate_split_names() {
        let mut manifest = valid_manifest();
        manifest.splits[1].name = "  ".to_string();
        assert_eq!(
            manifest.validate().unwrap_err(),
            ManifestValidationError::EmptySplitName
        );

        let mut manifest = valid_manifest();
        manifest.splits[1].name = "feature_camera".to_string();
        assert_eq!(
            manifest.validate().unwrap_err(),
            ManifestValidationError::DuplicateSplitName("feature_camera".to_string())
        );
    }

    #[test]
    fn rejects_malformed_application_type() {
        let mut manifest = valid_manifest();
        manifest.splits[0].application = Some("com.example..App".to_string());
        assert!(matches!(
            manifest.validate().unwrap_err(),
            ManifestValidationError::InvalidApplicationType { .. }
        ));
    }

    #[test]
    fn blank_application_type_is_accepted() {
        let mut manifest = valid_manifest();
        manifest.splits[0].application = Some(String::new());
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_component_within_kind() {
        let mut manifest = valid_manifest();
        manifest.services = Some(vec![
            "com.example.SyncService".to_string(),
            "com.example.SyncService".to_string(),
        ]);
        assert_eq!(
            manifest.validate().unwrap_err(),
            ManifestValidationError::DuplicateComponent {
                kind: ComponentKind::Service,
                value: "com.example.SyncService".to_string(),
            }
        );
    }

    #[test]
    fn parses_json_and_keeps_omitted_lists_absent() {
        let manifest = SplitManifest::from_json_str(
            r#"{
                "splits": [{ "name": "feature", "application": "com.example.FeatureApp" }],
                "activities": ["com.example.A", "com.example.B"]
            }"#,
        )
        .expect("manifest should parse");

        let info = manifest.to_component_info();
        assert_eq!(
            info.split_application_name("feature").as_deref(),
            Some("com.example.FeatureApp")
        );
        assert_eq!(info.split_activities().map(|names| names.len()), Some(2));
        assert!(info.split_services().is_none());
        assert!(info.split_receivers().is_none());
    }

    #[test]
    fn reports_parse_and_validation_failures_separately() {
        let parse = SplitManifest::from_json_str("{ not json").unwrap_err();
        assert!(matches!(parse, ManifestError::Parse(_)));

        let invalid =
            SplitManifest::from_json_str(r#"{ "splits": [{ "name": "" }] }"#).unwrap_err();
        assert!(matches!(
            invalid,
            ManifestError::Invalid(ManifestValidationError::EmptySplitName)
        ));
    }

    #[test]
    fn serializes_without_absent_lists() {
        let json = valid_manifest()
            .to_json_string()
            .expect("manifest should serialize");
        assert!(json.contains("\"activities\""));
        assert!(!json.contains("\"receivers\""));
        let reparsed = SplitManifest::from_json_str(&json).expect("reparse");
        assert_eq!(reparsed, valid_manifest());
    }
}
