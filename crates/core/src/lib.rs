//! Host surface that gameplay plugins are written against.
//!
//! The host server owns the world, players and the game loop. This crate
//! defines how plugins see them: the plugin lifecycle and [`App`], typed
//! host events, repeating timers, configuration files and logging setup.

pub mod config;
pub mod event;
pub mod logging;
pub mod player;
pub mod plugin;
pub mod timer;

pub use config::{ConfigError, ConfigFile, ConfigFormat};
pub use event::{Cancellable, Event, EventBus, EventPriority};
pub use player::{MemoryPlayer, Player};
pub use plugin::{App, Plugin, PluginInfo, PluginState};
pub use timer::{TickScheduler, TimerCallback, TimerFacility, TimerHandle, TokioTimers};

pub use level;
