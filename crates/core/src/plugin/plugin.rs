//! Core plugin trait and types

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Core trait that all plugins must implement
pub trait Plugin: Send + Sync {
    /// Get plugin information and metadata
    fn info(&self) -> PluginInfo;

    /// Build the plugin (subscribe listeners, create schedulers, etc.)
    ///
    /// Called once the plugin is loaded, with access to the host's event
    /// bus, world and timer facility.
    fn build(&self, app: &mut super::App) -> Result<()>;

    /// Called when the plugin is loaded
    ///
    /// This is called after the plugin is registered but before it's built.
    /// Use this for initialization that doesn't require the app context,
    /// such as reading configuration files.
    fn on_load(&self) -> Result<()> {
        Ok(())
    }

    /// Called when the plugin is enabled
    fn on_enable(&self) -> Result<()> {
        Ok(())
    }

    /// Called when the plugin is disabled
    fn on_disable(&self) -> Result<()> {
        Ok(())
    }

    /// Called when the server is shutting down
    fn on_shutdown(&self) -> Result<()> {
        Ok(())
    }

    /// Validate plugin configuration (optional)
    fn validate_config(&self, _config: &serde_json::Value) -> Result<()> {
        Ok(())
    }

    /// Apply plugin configuration (optional)
    ///
    /// Only called with configuration that passed `validate_config`.
    fn apply_config(&self, _config: &serde_json::Value) -> Result<()> {
        Ok(())
    }
}

/// Plugin information and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Plugin name (must be unique)
    pub name: String,
    /// Plugin version
    pub version: semver::Version,
    /// Plugin description
    pub description: String,
    /// Plugin author(s)
    pub author: String,
}

impl PluginInfo {
    /// Create new plugin info
    pub fn new(name: impl Into<String>, version: semver::Version) -> Self {
        Self {
            name: name.into(),
            version,
            description: String::new(),
            author: String::new(),
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }
}

/// Plugin state in the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluginState {
    /// Plugin is not loaded
    Unloaded,
    /// Plugin is loaded but not enabled
    Loaded,
    /// Plugin is enabled and active
    Enabled,
    /// Plugin is disabled
    Disabled,
    /// Plugin failed to load or run
    Failed,
}

impl PluginState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Any state except unloaded
    pub fn is_loaded(self) -> bool {
        !matches!(self, Self::Unloaded)
    }

    pub fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }

    /// States reachable from this one. `Failed` is terminal.
    pub fn valid_transitions(self) -> &'static [PluginState] {
        match self {
            Self::Unloaded => &[Self::Loaded, Self::Failed],
            Self::Loaded | Self::Disabled => &[Self::Enabled, Self::Failed],
            Self::Enabled => &[Self::Disabled, Self::Failed],
            Self::Failed => &[],
        }
    }

    pub fn can_transition_to(self, target: PluginState) -> bool {
        self.valid_transitions().contains(&target)
    }
}

impl std::fmt::Display for PluginState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unloaded => write!(f, "Unloaded"),
            Self::Loaded => write!(f, "Loaded"),
            Self::Enabled => write!(f, "Enabled"),
            Self::Disabled => write!(f, "Disabled"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}
