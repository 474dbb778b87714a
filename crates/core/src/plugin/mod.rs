//! Plugin system
//!
//! Plugins are registered with an [`App`], which loads, builds and enables
//! them and later disables and shuts them down in reverse order.

pub mod app;
pub mod lifecycle;
pub mod plugin;

pub use app::App;
pub use lifecycle::PluginHandle;
pub use plugin::{Plugin, PluginInfo, PluginState};
