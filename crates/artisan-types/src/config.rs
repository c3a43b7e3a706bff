//! Global configuration types for Prompt Artisan.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls
//! workspace debounce timings and the AI assist model.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.artisan/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub assist: AssistConfig,
}

/// Workspace engine timings and channel sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Quiescence before an auto-save fires.
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,

    /// Quiescence before a ghost suggestion is fetched.
    #[serde(default = "default_ghost_delay_ms")]
    pub ghost_delay_ms: u64,

    /// Capacity of the workspace event broadcast channel.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_autosave_delay_ms() -> u64 {
    2000
}

fn default_ghost_delay_ms() -> u64 {
    1500
}

fn default_event_capacity() -> usize {
    64
}

impl WorkspaceConfig {
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn ghost_delay(&self) -> Duration {
        Duration::from_millis(self.ghost_delay_ms)
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            autosave_delay_ms: default_autosave_delay_ms(),
            ghost_delay_ms: default_ghost_delay_ms(),
            event_capacity: default_event_capacity(),
        }
    }
}

/// Model settings for the AI assist gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}
