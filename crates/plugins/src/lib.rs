//! Mango Plugins
//!
//! Gameplay plugins built on the mango host surface. The mango plugin adds
//! a food item, a plantable seed and trees that grow from it over time.

pub mod mango;

// Re-export core plugin types for convenience
pub use mango_core::plugin::{App, Plugin, PluginInfo, PluginState};

pub use mango::MangoPlugin;
