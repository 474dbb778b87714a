//! Mango plugin
//!
//! Adds the mango fruit and its seed. Eating a mango restores hunger and may
//! drop a seed, seeds planted on soil grow into mango trees over time, and
//! breaking leaves may drop a mango.

pub mod config;
pub mod growth;
pub mod items;
pub mod listener;
pub mod rng;
pub mod scheduler;
pub mod tree;

pub use config::{MangoConfig, MechanicsConfig, SharedConfig};
pub use growth::{
    AbortReason, GrowthProcess, GrowthSettings, GrowthState, ProcessId, TickOutcome, MAX_STAGES,
};
pub use items::MangoItems;
pub use listener::MangoListener;
pub use rng::{RngSource, ScriptedRng};
pub use scheduler::{GrowthError, GrowthScheduler};

use anyhow::Result;
use mango_core::config::ConfigFile;
use mango_core::event::Event;
use mango_core::plugin::{App, Plugin, PluginInfo};
use parking_lot::RwLock;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const PLUGIN_NAME: &str = "mango";

struct Inner {
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    config: SharedConfig,
    enabled: AtomicBool,
    listener: RwLock<Option<Arc<MangoListener>>>,
}

/// The mango plugin.
///
/// Cloning yields another handle to the same plugin, so a caller can keep
/// one after handing the plugin to [`App::add_plugin`].
#[derive(Clone)]
pub struct MangoPlugin {
    inner: Arc<Inner>,
}

impl MangoPlugin {
    /// Plugin using the default configuration
    pub fn new() -> Self {
        Self::build_with(None, None)
    }

    /// Plugin reading its configuration from `path` on load, writing the
    /// defaults there first if the file does not exist
    pub fn with_config_file(path: impl Into<PathBuf>) -> Self {
        Self::build_with(Some(path.into()), None)
    }

    /// Use seeded generators for drops and tree shapes
    pub fn with_seed(self, seed: u64) -> Self {
        Self::build_with(self.inner.config_path.clone(), Some(seed))
    }

    fn build_with(config_path: Option<PathBuf>, seed: Option<u64>) -> Self {
        Self {
            inner: Arc::new(Inner {
                config_path,
                seed,
                config: SharedConfig::default(),
                enabled: AtomicBool::new(false),
                listener: RwLock::new(None),
            }),
        }
    }

    pub fn config(&self) -> MangoConfig {
        self.inner.config.snapshot()
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::Acquire)
    }

    /// Growth scheduler, available once the plugin is built
    pub fn scheduler(&self) -> Option<Arc<GrowthScheduler>> {
        self.listener().map(|listener| Arc::clone(listener.scheduler()))
    }

    pub fn items(&self) -> MangoItems {
        match self.listener() {
            Some(listener) => listener.items(),
            None => MangoItems::new(&self.config().items),
        }
    }

    fn listener(&self) -> Option<Arc<MangoListener>> {
        self.inner.listener.read().clone()
    }

    fn rngs(&self) -> (Box<dyn RngSource>, Box<dyn RngSource>) {
        match self.inner.seed {
            Some(seed) => (
                Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
                Box::new(rand::rngs::StdRng::seed_from_u64(seed.wrapping_add(1))),
            ),
            None => (Box::new(fastrand::Rng::new()), Box::new(fastrand::Rng::new())),
        }
    }

    /// Route events of type `T` to `handler` while the plugin is enabled
    fn subscribe<T: Event>(
        &self,
        app: &mut App,
        listener: &Arc<MangoListener>,
        handler: fn(&MangoListener, &mut T),
    ) {
        let plugin = self.clone();
        let listener = Arc::clone(listener);
        app.events_mut().subscribe(move |event: &mut T| {
            if plugin.is_enabled() {
                handler(&listener, event);
            }
        });
    }

    fn cancel_growth(&self) -> usize {
        self.scheduler()
            .map(|scheduler| scheduler.cancel_all())
            .unwrap_or(0)
    }
}

impl Default for MangoPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for MangoPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo::new(PLUGIN_NAME, semver::Version::new(1, 0, 0))
            .with_description("Mango fruit, seeds and growing mango trees")
            .with_author("Plasma Services")
    }

    fn build(&self, app: &mut App) -> Result<()> {
        let (growth_rng, drop_rng) = self.rngs();
        let scheduler = GrowthScheduler::new(app.world(), app.timers(), growth_rng);
        let listener = Arc::new(MangoListener::new(
            app.world(),
            scheduler,
            self.inner.config.clone(),
            drop_rng,
        ));

        self.subscribe(app, &listener, MangoListener::on_consume);
        self.subscribe(app, &listener, MangoListener::on_interact);
        self.subscribe(app, &listener, MangoListener::on_block_break);

        *self.inner.listener.write() = Some(listener);
        tracing::info!("Mango plugin initialized");
        Ok(())
    }

    fn on_load(&self) -> Result<()> {
        if let Some(path) = &self.inner.config_path {
            let config = MangoConfig::load_or_create(path)?;
            tracing::info!(
                "Loaded mango config from {} (growth time {} min)",
                path.display(),
                config.mechanics.growth_time
            );
            self.inner.config.replace(config);
        }
        Ok(())
    }

    fn on_enable(&self) -> Result<()> {
        self.inner.enabled.store(true, Ordering::Release);
        Ok(())
    }

    fn on_disable(&self) -> Result<()> {
        self.inner.enabled.store(false, Ordering::Release);
        let cancelled = self.cancel_growth();
        tracing::info!("Mango plugin disabled, {} tree(s) stopped growing", cancelled);
        Ok(())
    }

    fn on_shutdown(&self) -> Result<()> {
        self.cancel_growth();
        Ok(())
    }

    fn validate_config(&self, config: &serde_json::Value) -> Result<()> {
        let config: MangoConfig = serde_json::from_value(config.clone())?;
        config.validate()?;
        Ok(())
    }

    fn apply_config(&self, config: &serde_json::Value) -> Result<()> {
        let config: MangoConfig = serde_json::from_value(config.clone())?;
        if let Some(listener) = self.listener() {
            listener.reload(&config);
        }
        self.inner.config.replace(config);
        tracing::info!("Mango configuration reloaded");
        Ok(())
    }
}
