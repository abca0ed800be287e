use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A single surveillance observation as reported by the generator.
/// Events are immutable once created; the session log only ever appends,
/// and undo restores a whole snapshot rather than editing entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraEvent {
    pub camera: String,
    /// Display string straight from the generator, e.g. "23:17:04".
    /// Opaque: never parsed or compared as a time.
    pub timestamp: String,
    pub message: String,
    pub priority: Priority,
    #[serde(default)]
    pub personnel: Vec<String>,
    #[serde(default)]
    pub anomalies: Vec<String>,
    #[serde(rename = "imageId", default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<u32>,
}

impl CameraEvent {
    pub fn mentions(&self, name: &str) -> bool {
        self.personnel.iter().any(|tagged| tagged == name)
    }
}
