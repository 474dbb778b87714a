//! Per-plugin state machine driven by [`App`]

use super::{App, Plugin, PluginInfo, PluginState};
use anyhow::{Context, Result};

/// A registered plugin together with its lifecycle state
pub struct PluginHandle {
    pub info: PluginInfo,
    state: PluginState,
    plugin: Box<dyn Plugin>,
}

impl PluginHandle {
    pub fn new(plugin: Box<dyn Plugin>) -> Self {
        Self {
            info: plugin.info(),
            state: PluginState::Unloaded,
            plugin,
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn state(&self) -> PluginState {
        self.state
    }

    pub fn load(&mut self) -> Result<()> {
        self.expect_one_of(&[PluginState::Unloaded], "load")?;
        let result = self.plugin.on_load();
        self.settle(result, PluginState::Loaded, "load")
    }

    /// Build the plugin against the app, then enable it
    pub fn enable(&mut self, app: &mut App) -> Result<()> {
        self.expect_one_of(&[PluginState::Loaded, PluginState::Disabled], "enable")?;
        let result = self.plugin.build(app).and_then(|()| self.plugin.on_enable());
        self.settle(result, PluginState::Enabled, "enable")
    }

    pub fn disable(&mut self) -> Result<()> {
        self.expect_one_of(&[PluginState::Enabled], "disable")?;
        let result = self.plugin.on_disable();
        self.settle(result, PluginState::Disabled, "disable")
    }

    /// Run the shutdown hook; the state is left as is
    pub fn shutdown(&mut self) -> Result<()> {
        self.plugin
            .on_shutdown()
            .with_context(|| format!("Plugin '{}' shutdown failed", self.info.name))
    }

    /// Validate and apply a new plugin configuration
    pub fn set_config(&mut self, config: serde_json::Value) -> Result<()> {
        self.plugin.validate_config(&config)?;
        self.plugin.apply_config(&config)
    }

    fn expect_one_of(&self, allowed: &[PluginState], action: &str) -> Result<()> {
        if allowed.contains(&self.state) {
            return Ok(());
        }
        Err(anyhow::anyhow!(
            "Cannot {} plugin '{}' while it is {}",
            action,
            self.info.name,
            self.state
        ))
    }

    /// Move to `target` when the hook succeeded, to `Failed` otherwise
    fn settle(&mut self, result: Result<()>, target: PluginState, action: &str) -> Result<()> {
        let next = if result.is_ok() { target } else { PluginState::Failed };
        debug_assert!(self.state.can_transition_to(next));
        tracing::debug!("Plugin {} state: {} -> {}", self.info.name, self.state, next);
        self.state = next;

        match result {
            Ok(()) => {
                tracing::info!("{} plugin: {} v{}", target, self.info.name, self.info.version);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Plugin {} failed to {}: {}", self.info.name, action, e);
                Err(e.context(format!("Failed to {} plugin '{}'", action, self.info.name)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TickScheduler;
    use level::{MemoryWorld, WorldId};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Toggle {
        fail_enable: AtomicBool,
    }

    impl Plugin for Arc<Toggle> {
        fn info(&self) -> PluginInfo {
            PluginInfo::new("toggle", semver::Version::new(0, 1, 0))
        }

        fn build(&self, _app: &mut App) -> Result<()> {
            Ok(())
        }

        fn on_enable(&self) -> Result<()> {
            if self.fail_enable.load(Ordering::SeqCst) {
                return Err(anyhow::anyhow!("refused"));
            }
            Ok(())
        }
    }

    fn app() -> App {
        let world = Arc::new(MemoryWorld::new(WorldId::from_u128(2)));
        App::new(world, Arc::new(TickScheduler::new()))
    }

    #[test]
    fn test_enable_disable_cycle() {
        let mut app = app();
        let mut handle = PluginHandle::new(Box::new(Arc::new(Toggle::default())));
        assert_eq!(handle.state(), PluginState::Unloaded);

        assert!(handle.enable(&mut app).is_err());
        assert_eq!(handle.state(), PluginState::Unloaded);

        handle.load().unwrap();
        handle.enable(&mut app).unwrap();
        handle.disable().unwrap();
        handle.enable(&mut app).unwrap();
        assert_eq!(handle.state(), PluginState::Enabled);

        assert!(handle.load().is_err());
        assert_eq!(handle.name(), "toggle");
    }

    #[test]
    fn test_failed_hook_marks_failed() {
        let mut app = app();
        let toggle = Arc::new(Toggle::default());
        toggle.fail_enable.store(true, Ordering::SeqCst);
        let mut handle = PluginHandle::new(Box::new(toggle));

        handle.load().unwrap();
        let err = handle.enable(&mut app).unwrap_err();
        assert!(err.to_string().contains("toggle"));
        assert_eq!(handle.state(), PluginState::Failed);
        assert!(handle.disable().is_err());
    }
}
