//! Plugin loader.
//!
//! Maps logical library names to loaded plugins. A name is looked up first
//! in the table of statically linked modules registered with
//! [`ModuleLoader::register_static`]; otherwise the native library
//! `<library_dir>/<DLL_PREFIX><name><DLL_SUFFIX>` (`./libName.so` on Linux)
//! is mapped.
//!
//! # Lifecycle
//!
//! - `load`: `init` is called exactly once; a `false` return fails the load
//!   and the library is released unrecorded.
//! - `unload`: `shutdown` is called exactly once, then the library is
//!   released.
//! - Drop: every still-loaded library is unloaded, most recent first, so each
//!   successful `init` is balanced by exactly one `shutdown`.
//!
//! One loader serves a whole run. Nested interpreters borrow it through
//! `SharedData`, so they see exactly the libraries loaded so far.

mod dynamic;
mod plugin;

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::{RuntimeError, RuntimeResult};
pub use dynamic::{INIT_SYMBOL, INVOKE_SYMBOL, PROVIDES_SYMBOL, SHUTDOWN_SYMBOL};
use dynamic::DynamicPlugin;
pub use plugin::{Plugin, PluginFactory};

/// Loader configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory native libraries are resolved against.
    pub library_dir: PathBuf,
    /// Whether names without a static registration may be mapped from disk.
    pub dynamic: bool,
}

impl LoaderConfig {
    /// Environment variable overriding the default library directory.
    pub const LIB_DIR_ENV: &'static str = "XS_LIB_DIR";

    /// Default configuration with `XS_LIB_DIR` applied when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(Self::LIB_DIR_ENV) {
            config.library_dir = PathBuf::from(dir);
        }
        config
    }

    #[must_use]
    pub fn library_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.library_dir = dir.into();
        self
    }

    /// Only statically linked modules may be loaded.
    #[must_use]
    pub fn static_only(mut self) -> Self {
        self.dynamic = false;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            library_dir: PathBuf::from("."),
            dynamic: true,
        }
    }
}

struct LoadedModule {
    plugin: Arc<dyn Plugin>,
    /// Load sequence number; orders bare-name lookup and teardown.
    seq: u64,
}

pub struct ModuleLoader {
    config: LoaderConfig,
    statics: FxHashMap<String, PluginFactory>,
    loaded: FxHashMap<String, LoadedModule>,
    next_seq: u64,
}

impl ModuleLoader {
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        ModuleLoader {
            config,
            statics: FxHashMap::default(),
            loaded: FxHashMap::default(),
            next_seq: 0,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Register a statically linked module under `name`.
    ///
    /// `factory` runs on every load, so a reload starts from fresh state.
    /// Registering does not load; scripts still `Include` the name.
    pub fn register_static<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Arc<dyn Plugin> + 'static,
    {
        self.statics.insert(name.into(), Box::new(factory));
    }

    /// Path the native library for `name` is mapped from.
    pub fn library_path(&self, name: &str) -> PathBuf {
        library_path(&self.config.library_dir, name)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load(&mut self, name: &str) -> RuntimeResult {
        if self.loaded.contains_key(name) {
            return Err(RuntimeError::AlreadyLoaded {
                name: name.to_string(),
            });
        }

        let plugin = self.instantiate(name)?;
        if !plugin.init() {
            return Err(RuntimeError::InitFailed {
                name: name.to_string(),
            });
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.loaded
            .insert(name.to_string(), LoadedModule { plugin, seq });
        tracing::debug!("module loaded");
        Ok(())
    }

    fn instantiate(&self, name: &str) -> RuntimeResult<Arc<dyn Plugin>> {
        if let Some(factory) = self.statics.get(name) {
            return Ok(factory());
        }
        if !self.config.dynamic {
            return Err(RuntimeError::PluginLoad {
                name: name.to_string(),
                reason: "no statically linked module by that name and dynamic loading is disabled"
                    .to_string(),
            });
        }
        let path = self.library_path(name);
        tracing::debug!(path = %path.display(), "mapping native library");
        Ok(Arc::new(DynamicPlugin::open(name, &path)?))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn unload(&mut self, name: &str) -> RuntimeResult {
        let Some(module) = self.loaded.remove(name) else {
            return Err(RuntimeError::NotLoaded {
                name: name.to_string(),
            });
        };
        if !module.plugin.shutdown() {
            tracing::warn!(module = name, "plugin reported a failed shutdown");
        }
        tracing::debug!("module unloaded");
        Ok(())
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    /// Loaded library names, in load order.
    pub fn loaded(&self) -> Vec<&str> {
        let mut names: Vec<(&str, u64)> = self
            .loaded
            .iter()
            .map(|(name, module)| (name.as_str(), module.seq))
            .collect();
        names.sort_by_key(|&(_, seq)| seq);
        names.into_iter().map(|(name, _)| name).collect()
    }

    /// The plugin loaded as `library`, for a call to `entry`.
    pub fn plugin(&self, library: &str, entry: &str) -> RuntimeResult<Arc<dyn Plugin>> {
        self.loaded
            .get(library)
            .map(|module| Arc::clone(&module.plugin))
            .ok_or_else(|| RuntimeError::UnknownEntry {
                library: library.to_string(),
                entry: entry.to_string(),
            })
    }

    /// Library handling an undotted call `name`.
    ///
    /// A library named `name` wins; otherwise the earliest-loaded plugin
    /// that [`provides`](Plugin::provides) it.
    pub fn resolve_bare(&self, name: &str) -> RuntimeResult<Arc<dyn Plugin>> {
        if let Some(module) = self.loaded.get(name) {
            return Ok(Arc::clone(&module.plugin));
        }
        self.loaded
            .values()
            .filter(|module| module.plugin.provides(name))
            .min_by_key(|module| module.seq)
            .map(|module| Arc::clone(&module.plugin))
            .ok_or_else(|| RuntimeError::UnknownEntry {
                library: name.to_string(),
                entry: name.to_string(),
            })
    }
}

impl Default for ModuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ModuleLoader {
    fn drop(&mut self) {
        let names: Vec<String> = self
            .loaded()
            .into_iter()
            .rev()
            .map(str::to_string)
            .collect();
        for name in names {
            if let Err(err) = self.unload(&name) {
                tracing::warn!("teardown of module {name} failed: {err}");
            }
        }
    }
}

fn library_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{DLL_PREFIX}{name}{DLL_SUFFIX}"))
}
