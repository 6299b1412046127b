use std::collections::HashMap;
use std::sync::PoisonError;

use crossterm::event::KeyCode;
use oxsh_prompt::{
    start_with_config, stop, EditBuffer, Expansion, KeyCombo, PluginHandle, PromptEvent,
    PromptFileConfig, PromptHost, SharedAbbrevs, ShellDefinition, VarSpec, SHELL_ALIASES,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// In-memory stand-in for the interpreter's registration surfaces.
#[derive(Default)]
struct MemoryHost {
    shells: Vec<ShellDefinition>,
    vars: HashMap<&'static str, VarSpec>,
    env: HashMap<String, String>,
    abbrevs: Option<SharedAbbrevs>,
    events: Vec<PromptEvent>,
}

impl MemoryHost {
    fn with_env(pairs: &[(&str, &str)]) -> Self {
        let mut host = Self::default();
        for (k, v) in pairs {
            host.env.insert((*k).to_string(), (*v).to_string());
        }
        host
    }

    fn ready_events(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, PromptEvent::ShellReady(_)))
            .count()
    }
}

impl PromptHost for MemoryHost {
    fn register_shell(&mut self, definition: ShellDefinition) {
        self.shells.push(definition);
    }

    fn unregister_shell(&mut self, alias: &str) -> bool {
        let before = self.shells.len();
        self.shells
            .retain(|def| !def.aliases.iter().any(|a| a == alias));
        self.shells.len() != before
    }

    fn register_var(&mut self, spec: VarSpec) {
        self.vars.insert(spec.key, spec);
    }

    fn env_get(&self, key: &str) -> Option<String> {
        self.env.get(key).cloned()
    }

    fn env_set(&mut self, key: &str, value: String) {
        self.env.insert(key.to_string(), value);
    }

    fn env_remove(&mut self, key: &str) {
        self.env.remove(key);
    }

    fn publish_abbrevs(&mut self, store: SharedAbbrevs) {
        self.abbrevs = Some(store);
    }

    fn emit(&mut self, event: PromptEvent) {
        self.events.push(event);
    }
}

fn load(host: &mut MemoryHost) -> PluginHandle {
    start_with_config(host, &PromptFileConfig::default()).expect("plugin start")
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_start_registers_three_aliases() {
    let mut host = MemoryHost::default();
    let _handle = load(&mut host);

    assert_eq!(host.shells.len(), 1);
    assert_eq!(host.shells[0].aliases, SHELL_ALIASES);
    assert_eq!(SHELL_ALIASES.len(), 3);
}

#[test]
fn test_start_registers_configuration_vars() {
    let mut host = MemoryHost::default();
    let _handle = load(&mut host);

    for key in [
        "AUTO_SUGGEST",
        "MOUSE_SUPPORT",
        "VI_MODE",
        "OXSH_WHOLE_WORD_SHORTCUTS",
        "COMPLETIONS_DISPLAY",
        "COMPLETION_MODE",
        "OXSH_COLOR_DEPTH",
        "ENABLE_ASYNC_PROMPT",
    ] {
        assert!(host.vars.contains_key(key), "missing var {key}");
    }

    // The hooks registered into the registry really normalize.
    let mode = &host.vars["COMPLETION_MODE"];
    assert_eq!((mode.normalize)("MEnu_complete"), "menu-complete");
    assert_eq!((mode.normalize)("bogus"), "default");
    assert!((mode.validate)("menu-complete"));
    let display = &host.vars["COMPLETIONS_DISPLAY"];
    assert_eq!((display.normalize)("TRUE"), "multi");
    assert_eq!((display.normalize)("1"), "multi");
}

#[test]
fn test_color_depth_is_normalized_and_mirrored() {
    let mut host = MemoryHost::with_env(&[("OXSH_COLOR_DEPTH", "truecolor")]);
    let handle = load(&mut host);
    assert_eq!(handle.shell.settings().color_depth, "TRUE_COLOR");
    assert_eq!(host.env_get("OXSH_COLOR_DEPTH").as_deref(), Some("TRUE_COLOR"));
}

#[test]
fn test_invalid_color_depth_clears_the_mirror() {
    let mut host = MemoryHost::with_env(&[("OXSH_COLOR_DEPTH", "bogus")]);
    let handle = load(&mut host);
    assert_eq!(handle.shell.settings().color_depth, "");
    assert_eq!(host.env_get("OXSH_COLOR_DEPTH"), None);
}

#[test]
fn test_shell_ready_emitted_once() {
    let mut host = MemoryHost::default();
    let _handle = load(&mut host);
    assert_eq!(host.ready_events(), 1);
}

#[test]
fn test_stop_removes_aliases() {
    let mut host = MemoryHost::default();
    let handle = load(&mut host);
    stop(&mut host, handle);
    assert!(host.shells.is_empty());
}

#[test]
fn test_stop_tolerates_missing_alias() {
    let mut host = MemoryHost::default();
    let handle = load(&mut host);
    // Someone removed the definition behind our back.
    assert!(host.unregister_shell("ptk"));
    stop(&mut host, handle);
    assert!(host.shells.is_empty());
    assert!(!host.unregister_shell("ptk"));
}

// ---------------------------------------------------------------------------
// Abbreviations through the published store
// ---------------------------------------------------------------------------

#[test]
fn test_published_store_feeds_the_shell() {
    let mut host = MemoryHost::default();
    let mut handle = load(&mut host);

    let published = host.abbrevs.clone().expect("store published");
    published
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .register("gst", Expansion::literal("git status"));

    for c in "gst".chars() {
        handle.shell.insert_char(c).expect("insert");
    }
    handle.shell.insert_char(' ').expect("insert");
    assert_eq!(handle.shell.buffer().text(), "git status ");
}

#[test]
fn test_config_file_abbrevs_are_registered() {
    let mut host = MemoryHost::default();
    let file: PromptFileConfig = toml::from_str(
        r#"
[abbrevs]
pt = "poe<edit>try"
"#,
    )
    .expect("parse test config");
    let mut handle = start_with_config(&mut host, &file).expect("plugin start");

    handle.shell.buffer_mut().insert_text("pt");
    assert!(handle.shell.expand_now().expect("expand"));
    assert_eq!(handle.shell.buffer().text(), "poetry");
    assert_eq!(handle.shell.buffer().cursor(), 3);
}

// ---------------------------------------------------------------------------
// Key bindings and history through the ready event
// ---------------------------------------------------------------------------

#[test]
fn test_whole_word_toggle_binds_ctrl_delete() {
    let mut host = MemoryHost::with_env(&[("OXSH_WHOLE_WORD_SHORTCUTS", "true")]);
    let _handle = load(&mut host);

    let Some(PromptEvent::ShellReady(ready)) = host.events.first() else {
        panic!("shell ready event missing");
    };
    assert!(!ready
        .bindings
        .bindings_for(&KeyCombo::ctrl(KeyCode::Delete))
        .is_empty());
}

#[test]
fn test_bindings_absent_without_toggle() {
    let mut host = MemoryHost::default();
    let handle = load(&mut host);
    assert!(handle
        .shell
        .bindings()
        .bindings_for(&KeyCombo::ctrl(KeyCode::Delete))
        .is_empty());
}

#[test]
fn test_history_append_classification() {
    let mut host = MemoryHost::default();
    let mut handle = load(&mut host);

    for line in ["", "# a comment", "print('yes')"] {
        handle.shell.buffer_mut().insert_text(line);
        handle.shell.accept_line().expect("accept");
    }

    let Some(PromptEvent::ShellReady(ready)) = host.events.first() else {
        panic!("shell ready event missing");
    };
    let history = ready.history.lock().unwrap_or_else(PoisonError::into_inner);
    assert_eq!(history.commands(), ["print('yes')"]);
}

#[test]
fn test_ready_completer_sees_published_triggers() {
    let mut host = MemoryHost::default();
    let _handle = load(&mut host);

    host.abbrevs
        .clone()
        .expect("store published")
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .register("dk", Expansion::literal("docker"));

    let Some(PromptEvent::ShellReady(ready)) = host.events.first() else {
        panic!("shell ready event missing");
    };
    let completions = ready.completer.complete("d", 1);
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].text, "dk");
}
