use std::sync::{Arc, Mutex};

use anyhow::Result;
use promptkit::{AbbrevStore, Complete, History, KeyBindings};
use tracing::{debug, info};

use crate::core::settings::{
    to_bool_string, to_color_depth, to_completion_mode, to_completions_display_value,
    COLOR_DEPTH_ENV,
};
use crate::core::shell::{PromptSettings, PromptShell};
use crate::core::vars::{iter_specs, VarSpec};
use crate::spi::config::PromptFileConfig;
use crate::spi::free_cwd::FreeCwdHook;

/// Aliases the shell implementation is registered under.
pub const SHELL_ALIASES: [&str; 3] = ["ptk", "prompt-kit", "prompt_kit"];

/// Shared handle to the abbreviation store: published into the host's
/// execution namespace so user configuration can add and remove
/// triggers while the shell runs. Registrations are serialized by the
/// mutex; the engine itself never mutates the store.
pub type SharedAbbrevs = Arc<Mutex<AbbrevStore>>;

/// Entry in the host's shell-selection mechanism.
#[derive(Debug, Clone)]
pub struct ShellDefinition {
    pub aliases: Vec<String>,
    pub description: String,
}

/// Published once, after the line-editing surface finishes
/// initializing, carrying the collaborators consumers may want.
#[derive(Clone)]
pub struct ShellReady {
    pub history: Arc<Mutex<History>>,
    pub bindings: Arc<KeyBindings>,
    pub completer: Arc<dyn Complete + Send + Sync>,
}

/// Lifecycle events this plugin emits; subscription lives in the host.
#[derive(Clone)]
pub enum PromptEvent {
    ShellReady(ShellReady),
}

/// The capability surface the host injects at load time: exactly the
/// registration operations this plugin needs, nothing else.
pub trait PromptHost {
    /// Add a shell implementation to the selection mechanism.
    fn register_shell(&mut self, definition: ShellDefinition);

    /// Remove a shell implementation by alias. Returns `false` when
    /// the alias was not registered (which is fine: unload treats a
    /// missing alias as a no-op).
    fn unregister_shell(&mut self, alias: &str) -> bool;

    /// Declare a configuration variable in the environment registry.
    fn register_var(&mut self, spec: VarSpec);

    fn env_get(&self, key: &str) -> Option<String>;
    fn env_set(&mut self, key: &str, value: String);
    fn env_remove(&mut self, key: &str);

    /// Expose the abbreviation store in the execution namespace.
    fn publish_abbrevs(&mut self, store: SharedAbbrevs);

    /// Deliver a lifecycle event to subscribers.
    fn emit(&mut self, event: PromptEvent);
}

/// What `start` hands back; `stop` consumes it.
pub struct PluginHandle {
    pub shell: PromptShell,
    pub abbrevs: SharedAbbrevs,
    pub free_cwd: Option<FreeCwdHook>,
    aliases: Vec<String>,
}

impl PluginHandle {
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

fn env_bool(host: &dyn PromptHost, key: &str, default: bool) -> bool {
    host.env_get(key)
        .map_or(default, |v| to_bool_string(&v) == "true")
}

fn env_normalized(
    host: &dyn PromptHost,
    key: &str,
    normalize: fn(&str) -> String,
    default: &str,
) -> String {
    host.env_get(key)
        .map_or_else(|| default.to_string(), |v| normalize(&v))
}

/// Read the settings snapshot the shell surface is built from.
fn snapshot_settings(host: &dyn PromptHost, file: &PromptFileConfig) -> PromptSettings {
    let toggles = &file.prompt;
    PromptSettings {
        auto_suggest: toggles
            .auto_suggest
            .unwrap_or_else(|| env_bool(host, "AUTO_SUGGEST", true)),
        mouse_support: toggles
            .mouse_support
            .unwrap_or_else(|| env_bool(host, "MOUSE_SUPPORT", false)),
        vi_mode: toggles
            .vi_mode
            .unwrap_or_else(|| env_bool(host, "VI_MODE", false)),
        autopair: env_bool(host, "OXSH_AUTOPAIR", false),
        copy_on_delete: env_bool(host, "OXSH_COPY_ON_DELETE", false),
        ctrl_bksp_deletion: env_bool(host, "OXSH_CTRL_BKSP_DELETION", false),
        whole_word_shortcuts: env_bool(host, "OXSH_WHOLE_WORD_SHORTCUTS", false),
        free_cwd: env_bool(host, "OXSH_FREE_CWD", false),
        completions_display: env_normalized(
            host,
            "COMPLETIONS_DISPLAY",
            to_completions_display_value,
            "multi",
        ),
        completion_mode: env_normalized(host, "COMPLETION_MODE", to_completion_mode, "default"),
        color_depth: env_normalized(host, "OXSH_COLOR_DEPTH", to_color_depth, ""),
    }
}

/// Plugin load: register the shell definition and every configuration
/// variable, publish the abbreviation store, bring up the editing
/// surface, and emit the ready event.
pub fn start(host: &mut dyn PromptHost) -> Result<PluginHandle> {
    let file = PromptFileConfig::load()?;
    start_with_config(host, &file)
}

/// Same as [`start`] but with the config file contents supplied by the
/// caller (tests, embedded hosts).
pub fn start_with_config(host: &mut dyn PromptHost, file: &PromptFileConfig) -> Result<PluginHandle> {
    let aliases: Vec<String> = SHELL_ALIASES.iter().map(ToString::to_string).collect();
    host.register_shell(ShellDefinition {
        aliases: aliases.clone(),
        description: "prompt-kit line editor".to_string(),
    });

    for spec in iter_specs() {
        host.register_var(spec);
    }

    let mut store = AbbrevStore::new();
    file.register_abbrevs(&mut store);
    let abbrevs: SharedAbbrevs = Arc::new(Mutex::new(store));
    host.publish_abbrevs(Arc::clone(&abbrevs));

    let settings = snapshot_settings(host, file);
    // Keep the mirrored env entry in step with the normalized depth;
    // invalid or unset input must not leave a stale value behind.
    if settings.color_depth.is_empty() {
        host.env_remove(COLOR_DEPTH_ENV);
    } else {
        host.env_set(COLOR_DEPTH_ENV, settings.color_depth.clone());
    }
    let free_cwd = if settings.free_cwd {
        FreeCwdHook::install()
    } else {
        None
    };

    let shell = PromptShell::new(Arc::clone(&abbrevs), settings);
    shell.announce_ready(host);

    info!(aliases = ?SHELL_ALIASES, "prompt front-end loaded");
    Ok(PluginHandle {
        shell,
        abbrevs,
        free_cwd,
        aliases,
    })
}

/// Plugin unload: remove the shell definition by alias lookup.
/// Aliases someone already removed are skipped quietly.
pub fn stop(host: &mut dyn PromptHost, handle: PluginHandle) {
    for alias in handle.aliases() {
        if !host.unregister_shell(alias) {
            debug!(%alias, "shell alias already removed");
        }
    }
    info!("prompt front-end unloaded");
}
