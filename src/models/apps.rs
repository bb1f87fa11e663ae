//! Installed / foreground application info returned by the `apps`
//! capability (`listApps`, `foregroundApp`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledAppInfo {
    /// Bundle identifier (iOS) or package name (Android).
    pub bundle_id: String,
    pub name: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForegroundAppInfo {
    pub bundle_id: String,
    pub name: Option<String>,
    pub pid: Option<u32>,
}
