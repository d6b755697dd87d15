//! Native plugin libraries.
//!
//! A library exports the symbols generated by [`export_plugin!`]; the
//! loader copies the function pointers out and keeps the `Library` alive
//! inside the plugin so the code stays mapped until the last `Arc` drops.
//!
//! [`export_plugin!`]: crate::export_plugin

#![allow(unsafe_code, reason = "mapping native libraries and calling their exports")]

use std::path::Path;

use libloading::Library;

use super::plugin::Plugin;
use crate::errors::{RuntimeError, RuntimeResult};
use crate::shared::SharedData;
use crate::value_stack::Stack;

pub const INIT_SYMBOL: &[u8] = b"xs_plugin_init";
pub const SHUTDOWN_SYMBOL: &[u8] = b"xs_plugin_shutdown";
pub const INVOKE_SYMBOL: &[u8] = b"xs_plugin_invoke";
pub const PROVIDES_SYMBOL: &[u8] = b"xs_plugin_provides";

type InitFn = fn() -> bool;
type ShutdownFn = fn() -> bool;
type InvokeFn = fn(&str, &mut Stack, &mut SharedData<'_>) -> RuntimeResult;
type ProvidesFn = fn(&str) -> bool;

pub(crate) struct DynamicPlugin {
    init: InitFn,
    shutdown: ShutdownFn,
    invoke: InvokeFn,
    provides: Option<ProvidesFn>,
    // Keeps the pointers above valid.
    _library: Library,
}

impl DynamicPlugin {
    /// Map `path` and look up the plugin ABI.
    ///
    /// Any failure carries the dynamic linker's diagnostic.
    pub(crate) fn open(name: &str, path: &Path) -> RuntimeResult<Self> {
        let load_error = |err: libloading::Error| RuntimeError::PluginLoad {
            name: name.to_string(),
            reason: err.to_string(),
        };

        // SAFETY: mapping runs the library's initializers. Plugins are
        // trusted native code by contract.
        let library = unsafe { Library::new(path) }.map_err(load_error)?;

        // SAFETY: the symbol types match the signatures generated by
        // `export_plugin!`, which plugins must be built with.
        let (init, shutdown, invoke, provides) = unsafe {
            (
                *library.get::<InitFn>(INIT_SYMBOL).map_err(load_error)?,
                *library.get::<ShutdownFn>(SHUTDOWN_SYMBOL).map_err(load_error)?,
                *library.get::<InvokeFn>(INVOKE_SYMBOL).map_err(load_error)?,
                library.get::<ProvidesFn>(PROVIDES_SYMBOL).ok().map(|f| *f),
            )
        };

        Ok(DynamicPlugin {
            init,
            shutdown,
            invoke,
            provides,
            _library: library,
        })
    }
}

impl Plugin for DynamicPlugin {
    fn init(&self) -> bool {
        (self.init)()
    }

    fn shutdown(&self) -> bool {
        (self.shutdown)()
    }

    fn invoke(&self, entry: &str, stack: &mut Stack, data: &mut SharedData<'_>) -> RuntimeResult {
        (self.invoke)(entry, stack, data)
    }

    fn provides(&self, entry: &str) -> bool {
        self.provides.is_some_and(|provides| provides(entry))
    }
}
