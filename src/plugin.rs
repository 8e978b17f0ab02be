//! Process-wide plugin registration.
//!
//! Everything else in this crate is immutable; the plugin registry is the exception. It holds the
//! set of plugins already installed in this process so that installing the same plugin again is a
//! no-op. A plugin is identified by its concrete type together with its address, which is why
//! [`use_plugin`] takes a `'static` reference. Zero-sized plugins of different types may share an
//! address, and are still told apart by type.

use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

/// An extension installed once per process.
pub trait Plugin: Any + Sync {
    /// Called the first time this plugin is passed to [`use_plugin`].
    ///
    /// No handle is passed in: the crate's surface is its free functions and the inherent methods
    /// of its types, so a plugin reaches it through ordinary paths and keeps its own state.
    fn install(&self);
}

type PluginId = (TypeId, usize);

fn registry() -> &'static Mutex<HashSet<PluginId>> {
    static REGISTRY: OnceLock<Mutex<HashSet<PluginId>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashSet::new()))
}

fn identity(plugin: &'static dyn Plugin) -> PluginId {
    let type_id = <dyn Plugin as Any>::type_id(plugin);
    (type_id, plugin as *const dyn Plugin as *const () as usize)
}

/// Install `plugin` unless it has been installed before.
///
/// Returns `true` when `plugin.install()` ran during this call.
pub fn use_plugin(plugin: &'static dyn Plugin) -> bool {
    let first = registry()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .insert(identity(plugin));
    if first {
        plugin.install();
    }
    first
}

/// `true` once `plugin` has been installed.
pub fn is_plugin_registered(plugin: &'static dyn Plugin) -> bool {
    registry()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .contains(&identity(plugin))
}
