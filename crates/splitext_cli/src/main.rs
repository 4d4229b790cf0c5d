//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `splitext_core` linkage with deterministic output.
//! - Optionally answer one membership query against a split manifest:
//!   `splitext_cli <manifest.json> <activity|service|receiver> <component>`.
//! - Write rolling logs when `SPLITEXT_LOG_DIR` names an absolute directory;
//!   without it the CLI runs with logging disabled.

use splitext_core::{
    ComponentKind, FactoryTypeLoader, HostContext, SplitExtensionManager, SplitManifest,
};
use std::process::ExitCode;
use std::sync::Arc;

const LOG_DIR_ENV: &str = "SPLITEXT_LOG_DIR";

fn main() -> ExitCode {
    println!("splitext_core ping={}", splitext_core::ping());
    println!("splitext_core version={}", splitext_core::core_version());

    let log_dir = std::env::var(LOG_DIR_ENV).ok();
    match init_cli_logging(log_dir.as_deref()) {
        Ok(enabled) => println!("logging={enabled}"),
        Err(message) => {
            eprintln!("error: {LOG_DIR_ENV}: {message}");
            return ExitCode::FAILURE;
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => ExitCode::SUCCESS,
        [manifest_path, kind, component] => match query(manifest_path, kind, component) {
            Ok(is_member) => {
                println!("member={is_member}");
                ExitCode::SUCCESS
            }
            Err(message) => {
                eprintln!("error: {message}");
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("usage: splitext_cli [<manifest.json> <activity|service|receiver> <component>]");
            ExitCode::from(2)
        }
    }
}

/// Starts core logging when a directory is configured.
///
/// Returns whether logging is active. A blank value counts as unset.
fn init_cli_logging(log_dir: Option<&str>) -> Result<bool, String> {
    match log_dir.map(str::trim) {
        Some(dir) if !dir.is_empty() => {
            splitext_core::init_logging(splitext_core::default_log_level(), dir)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn query(manifest_path: &str, kind: &str, component: &str) -> Result<bool, String> {
    let kind = ComponentKind::parse(kind).map_err(|err| err.to_string())?;
    let manifest = SplitManifest::from_path(manifest_path).map_err(|err| err.to_string())?;
    println!("splits={}", manifest.splits.len());

    let manager = SplitExtensionManager::new(
        HostContext::empty("splitext_cli"),
        Arc::new(manifest.to_component_info()),
        Arc::new(FactoryTypeLoader::new()),
    );
    Ok(manager.is_member(kind, component))
}
