//! Application that wires plugins to the host world, events and timers

use super::{Plugin, PluginHandle, PluginState};
use crate::event::{Event, EventBus};
use crate::timer::TimerFacility;
use anyhow::Result;
use level::World;
use std::collections::HashMap;
use std::sync::Arc;

/// Application hosting plugins.
///
/// The App is the central coordinator for the plugin system. It owns the
/// event bus that host events are dispatched through and hands plugins the
/// world and timer facility they operate on.
pub struct App {
    events: EventBus,
    world: Arc<dyn World>,
    timers: Arc<dyn TimerFacility>,
    /// Plugin handles indexed by name
    plugins: HashMap<String, PluginHandle>,
    /// Order in which plugins were added
    load_order: Vec<String>,
}

impl App {
    pub fn new(world: Arc<dyn World>, timers: Arc<dyn TimerFacility>) -> Self {
        Self {
            events: EventBus::new(),
            world,
            timers,
            plugins: HashMap::new(),
            load_order: Vec::new(),
        }
    }

    /// Add a plugin to the application
    ///
    /// The plugin is loaded, built and enabled immediately.
    pub fn add_plugin<P: Plugin + 'static>(&mut self, plugin: P) -> Result<&mut Self> {
        let info = plugin.info();
        let name = info.name.clone();

        if self.plugins.contains_key(&name) {
            return Err(anyhow::anyhow!("Plugin '{}' already loaded", name));
        }

        let mut handle = PluginHandle::new(Box::new(plugin));
        handle.load()?;
        handle.enable(self)?;

        self.plugins.insert(name.clone(), handle);
        self.load_order.push(name.clone());

        tracing::info!("Added plugin: {} v{}", name, info.version);
        Ok(self)
    }

    /// Host world shared with plugins
    pub fn world(&self) -> Arc<dyn World> {
        Arc::clone(&self.world)
    }

    /// Timer facility shared with plugins
    pub fn timers(&self) -> Arc<dyn TimerFacility> {
        Arc::clone(&self.timers)
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Deliver a host event to every subscribed handler
    pub fn dispatch<T: Event>(&self, event: &mut T) {
        self.events.dispatch(event);
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    pub fn plugin_state(&self, name: &str) -> Option<PluginState> {
        self.plugins.get(name).map(PluginHandle::state)
    }

    /// Validate and apply new configuration for a plugin
    pub fn configure_plugin(&mut self, name: &str, config: serde_json::Value) -> Result<()> {
        let plugin = self
            .plugins
            .get_mut(name)
            .ok_or_else(|| anyhow::anyhow!("Plugin '{}' not found", name))?;
        plugin.set_config(config)
    }

    /// Disable a plugin by name
    pub fn disable_plugin(&mut self, name: &str) -> Result<()> {
        let plugin = self
            .plugins
            .get_mut(name)
            .ok_or_else(|| anyhow::anyhow!("Plugin '{}' not found", name))?;
        plugin.disable()
    }

    /// Disable and shut down every plugin in reverse load order
    pub fn shutdown(&mut self) -> Result<()> {
        for name in self.load_order.iter().rev() {
            let Some(plugin) = self.plugins.get_mut(name) else {
                continue;
            };

            if plugin.state() == PluginState::Enabled {
                if let Err(e) = plugin.disable() {
                    tracing::error!("Failed to disable plugin {}: {}", name, e);
                }
            }
            if let Err(e) = plugin.shutdown() {
                tracing::error!("Failed to shutdown plugin {}: {}", name, e);
            }
        }

        tracing::info!("Shut down {} plugin(s)", self.load_order.len());
        Ok(())
    }
}
