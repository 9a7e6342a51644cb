//! Attachment object-store configuration.

use serde::{Deserialize, Serialize};

/// Object-store provider settings for attachment payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Provider type: `"local"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Root directory for the local provider.
    #[serde(default = "default_local_root")]
    pub local_root: String,
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_local_root() -> String {
    "data/attachments".to_string()
}
