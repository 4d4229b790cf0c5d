use splitext_core::{
    ComponentKind, FactoryTypeLoader, HookError, HostContext, ManifestError, SplitApplication,
    SplitComponentInfoProvider, SplitExtensionManager, SplitManifest,
};
use std::io::Write;
use std::sync::Arc;

const MANIFEST_JSON: &str = r#"{
    "splits": [
        { "name": "feature_camera", "application": "com.example.camera.CameraApp" },
        { "name": "feature_docs" }
    ],
    "activities": ["com.example.camera.CaptureActivity", "com.example.docs.ViewerActivity"],
    "services": ["com.example.camera.UploadService"]
}"#;

struct CameraApp;

impl SplitApplication for CameraApp {
    fn type_name(&self) -> &str {
        "com.example.camera.CameraApp"
    }

    fn attach_host(&mut self, context: &HostContext) -> Result<(), HookError> {
        if context.label() != "launcher" {
            return Err(HookError::new("camera only runs inside the launcher host"));
        }
        Ok(())
    }
}

fn write_manifest(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp manifest");
    file.write_all(contents.as_bytes()).expect("write manifest");
    file.flush().expect("flush manifest");
    file
}

#[test]
fn loads_manifest_file_into_provider() {
    let file = write_manifest(MANIFEST_JSON);
    let manifest = SplitManifest::from_path(file.path()).expect("manifest should load");
    let info = manifest.to_component_info();

    assert_eq!(info.split_names(), vec!["feature_camera"]);
    assert_eq!(
        info.split_application_name("feature_camera").as_deref(),
        Some("com.example.camera.CameraApp")
    );
    assert!(info.split_application_name("feature_docs").is_none());
    assert_eq!(
        manifest.components(ComponentKind::Activity).map(<[String]>::len),
        Some(2)
    );
    assert!(info.split_receivers().is_none());
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = SplitManifest::from_path(dir.path().join("absent.json"))
        .expect_err("missing manifest must fail");
    assert!(matches!(err, ManifestError::Io(_)));
}

#[test]
fn invalid_component_name_is_rejected_on_load() {
    let file = write_manifest(r#"{ "receivers": ["com.example.Boot Receiver"] }"#);
    let err = SplitManifest::from_path(file.path()).expect_err("invalid name must fail");
    assert!(matches!(err, ManifestError::Invalid(_)));
    assert!(err.to_string().contains("receiver component name is invalid"));
}

#[test]
fn manifest_drives_manager_end_to_end() {
    let manifest = SplitManifest::from_json_str(MANIFEST_JSON).expect("manifest should parse");
    let mut loader = FactoryTypeLoader::new();
    loader
        .register_default("com.example.camera.CameraApp", || CameraApp)
        .expect("camera registration");

    let manager = SplitExtensionManager::new(
        HostContext::empty("launcher"),
        Arc::new(manifest.to_component_info()),
        Arc::new(loader),
    );

    let app = manager
        .create_and_activate("feature_camera")
        .expect("camera activates")
        .expect("camera declares an application");
    assert_eq!(app.type_name(), "com.example.camera.CameraApp");
    assert!(manager
        .create_and_activate("feature_docs")
        .expect("docs has no application")
        .is_none());

    assert!(manager.is_activity_member("com.example.docs.ViewerActivity"));
    assert!(manager.is_service_member("com.example.camera.UploadService"));
    assert!(!manager.is_service_member("com.example.docs.ViewerActivity"));
    assert!(!manager.is_receiver_member("com.example.camera.UploadService"));
}
