// Gitness API request and response types.
// Defines structs for (de)serializing pull request and registry payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pull request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PullReqState {
    #[default]
    Open,
    Merged,
    Closed,
    #[serde(other)]
    Unknown,
}

impl PullReqState {
    pub fn label(&self) -> &'static str {
        match self {
            PullReqState::Open => "open",
            PullReqState::Merged => "merged",
            PullReqState::Closed => "closed",
            PullReqState::Unknown => "unknown",
        }
    }
}

/// Principal that authored a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub uid: String,
    #[serde(default)]
    pub display_name: String,
}

/// Pull request as returned by the pullreq endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub state: PullReqState,
    #[serde(default)]
    pub source_branch: String,
    #[serde(default)]
    pub target_branch: String,
    /// Creation time in unix milliseconds.
    #[serde(default)]
    pub created: i64,
    /// Last edit time in unix milliseconds.
    #[serde(default)]
    pub edited: i64,
    pub author: Option<Principal>,
}

impl PullRequest {
    /// Last edit time, if the server sent a valid timestamp.
    pub fn edited_at(&self) -> Option<DateTime<Utc>> {
        if self.edited <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.edited)
    }
}

/// Body of the pull request PATCH call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePullReqRequest {
    pub title: String,
    pub description: String,
}

/// Artifact registry package type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageType {
    Docker,
    Helm,
    Maven,
    Npm,
    Generic,
    Python,
    Nuget,
    #[serde(other)]
    Unknown,
}

impl PackageType {
    pub fn label(&self) -> &'static str {
        match self {
            PackageType::Docker => "Docker",
            PackageType::Helm => "Helm",
            PackageType::Maven => "Maven",
            PackageType::Npm => "npm",
            PackageType::Generic => "Generic",
            PackageType::Python => "Python",
            PackageType::Nuget => "NuGet",
            PackageType::Unknown => "Unknown",
        }
    }
}

/// Registry configuration kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfigType {
    Virtual,
    Upstream,
    #[serde(other)]
    Unknown,
}

impl ConfigType {
    pub fn label(&self) -> &'static str {
        match self {
            ConfigType::Virtual => "Virtual",
            ConfigType::Upstream => "Upstream",
            ConfigType::Unknown => "Unknown",
        }
    }
}

/// Registry configuration block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(rename = "type")]
    pub config_type: ConfigType,
}

/// Artifact registry shown on the repository details page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registry {
    pub identifier: String,
    pub package_type: PackageType,
    pub config: RegistryConfig,
    pub description: Option<String>,
    pub url: Option<String>,
}

/// `{ "data": ... }` envelope used by the registry API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// JSON error body returned by the server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}
