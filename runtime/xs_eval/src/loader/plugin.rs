//! The plugin contract.

use std::sync::Arc;

use crate::errors::RuntimeResult;
use crate::shared::SharedData;
use crate::value_stack::Stack;

/// An extension adding named operations to the runtime.
///
/// The loader calls [`init`](Plugin::init) exactly once after the plugin is
/// mapped and [`shutdown`](Plugin::shutdown) exactly once before it is
/// released. Every dispatched call goes through [`invoke`](Plugin::invoke).
///
/// Plugins are shared as `Arc<dyn Plugin>` and may be re-entered: `Repeat`
/// running a subroutine that calls back into the same plugin invokes it
/// again while the outer call is still active. State therefore needs
/// interior mutability.
pub trait Plugin {
    /// One-time setup. Returning `false` fails the load.
    fn init(&self) -> bool {
        true
    }

    /// One-time teardown. Returning `false` is logged; the unload proceeds.
    fn shutdown(&self) -> bool {
        true
    }

    /// Run the operation named `entry`.
    ///
    /// Unknown entries are the plugin's responsibility; the conventional
    /// answer is [`unknown_operation`](crate::errors::unknown_operation),
    /// returned before touching the stack.
    fn invoke(&self, entry: &str, stack: &mut Stack, data: &mut SharedData<'_>) -> RuntimeResult;

    /// Whether `entry` is implemented. Consulted only for undotted calls
    /// that name no loaded library.
    fn provides(&self, entry: &str) -> bool {
        let _ = entry;
        false
    }
}

/// Creates a fresh plugin instance for each load of a statically linked
/// module.
pub type PluginFactory = Box<dyn Fn() -> Arc<dyn Plugin>>;

/// Export a plugin type through the native library ABI.
///
/// Generates the `xs_plugin_init`, `xs_plugin_shutdown`,
/// `xs_plugin_invoke` and `xs_plugin_provides` symbols the loader looks up
/// when mapping `lib<Name>.so`. The plugin is constructed on first use and
/// lives as long as the library stays mapped.
///
/// ```text
/// xs_eval::export_plugin!(CorePlugin, CorePlugin);
/// ```
///
/// The library must be built by the same compiler as the host: the symbols
/// use the Rust ABI.
#[macro_export]
macro_rules! export_plugin {
    ($plugin:ty, $constructor:expr) => {
        fn __xs_exported_plugin() -> &'static $plugin {
            static PLUGIN: ::std::sync::OnceLock<$plugin> = ::std::sync::OnceLock::new();
            PLUGIN.get_or_init(|| $constructor)
        }

        #[allow(unsafe_code, reason = "exported plugin ABI symbol")]
        #[no_mangle]
        pub fn xs_plugin_init() -> bool {
            $crate::Plugin::init(__xs_exported_plugin())
        }

        #[allow(unsafe_code, reason = "exported plugin ABI symbol")]
        #[no_mangle]
        pub fn xs_plugin_shutdown() -> bool {
            $crate::Plugin::shutdown(__xs_exported_plugin())
        }

        #[allow(unsafe_code, reason = "exported plugin ABI symbol")]
        #[no_mangle]
        pub fn xs_plugin_invoke(
            entry: &str,
            stack: &mut $crate::Stack,
            data: &mut $crate::SharedData<'_>,
        ) -> $crate::RuntimeResult {
            $crate::Plugin::invoke(__xs_exported_plugin(), entry, stack, data)
        }

        #[allow(unsafe_code, reason = "exported plugin ABI symbol")]
        #[no_mangle]
        pub fn xs_plugin_provides(entry: &str) -> bool {
            $crate::Plugin::provides(__xs_exported_plugin(), entry)
        }
    };
}
