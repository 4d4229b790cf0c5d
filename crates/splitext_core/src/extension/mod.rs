//! Split extension core.
//!
//! Creates and attaches the bootstrap application of a split that was not
//! present at process start, and answers which activities, services and
//! receivers a split owns. Downloading, installing and code loading of splits
//! are owned by the host; this module only consumes them through
//! `SplitComponentInfoProvider` and `TypeLoader`.

pub mod application;
pub mod attach;
pub mod loader;
pub mod manager;
pub mod manifest;
pub mod membership;
pub mod provider;
pub mod resolver;
