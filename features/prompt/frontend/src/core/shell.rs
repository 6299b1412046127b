use std::sync::{Arc, Mutex, PoisonError};

use crossterm::event::KeyCode;
use promptkit::{
    AbbrevEngine, Complete, Completion, EditBuffer, ExpansionError, History, KeyBindings, KeyCombo,
    LineBuffer,
};
use tracing::debug;

use crate::spi::host::{PromptEvent, PromptHost, SharedAbbrevs, ShellReady};

/// Lines starting with this (after stripping) never reach history.
pub const COMMENT_MARKER: &str = "#";

/// Session history capacity; persistence is the host's job.
const HISTORY_CAPACITY: usize = 1000;

/// Snapshot of the environment variables the shell surface cares
/// about, taken once at construction. Runtime changes flow through
/// the host registry, not through this struct.
#[derive(Debug, Clone, Default)]
pub struct PromptSettings {
    pub auto_suggest: bool,
    pub mouse_support: bool,
    pub vi_mode: bool,
    pub autopair: bool,
    pub copy_on_delete: bool,
    pub ctrl_bksp_deletion: bool,
    pub whole_word_shortcuts: bool,
    pub free_cwd: bool,
    pub completions_display: String,
    pub completion_mode: String,
    pub color_depth: String,
}

/// Decide whether a submitted line belongs in history: anything except
/// blank lines and pure comments.
pub fn should_append_history(line: &str) -> bool {
    let stripped = line.trim();
    !stripped.is_empty() && !stripped.starts_with(COMMENT_MARKER)
}

/// Completes abbreviation triggers for the word under the cursor.
pub struct TriggerCompleter {
    abbrevs: SharedAbbrevs,
}

impl TriggerCompleter {
    pub fn new(abbrevs: SharedAbbrevs) -> Self {
        Self { abbrevs }
    }
}

impl Complete for TriggerCompleter {
    fn complete(&self, line: &str, pos: usize) -> Vec<Completion> {
        let chars: Vec<char> = line.chars().collect();
        let pos = pos.min(chars.len());
        let word_start = chars[..pos]
            .iter()
            .rposition(|c| c.is_whitespace())
            .map_or(0, |i| i + 1);
        let prefix: String = chars[word_start..pos].iter().collect();
        if prefix.is_empty() {
            return Vec::new();
        }

        let store = self.abbrevs.lock().unwrap_or_else(PoisonError::into_inner);
        let mut matches: Vec<&str> = store
            .triggers()
            .filter(|t| t.starts_with(&prefix))
            .collect();
        matches.sort_unstable();
        matches.into_iter().map(Completion::new).collect()
    }
}

/// The line-editing surface the host drives: owns the buffer, expands
/// abbreviations at boundary keystrokes, classifies history appends,
/// and exposes the key-binding table built from the settings.
pub struct PromptShell {
    buffer: LineBuffer,
    abbrevs: SharedAbbrevs,
    bindings: Arc<KeyBindings>,
    history: Arc<Mutex<History>>,
    completer: Arc<dyn Complete + Send + Sync>,
    settings: PromptSettings,
}

impl PromptShell {
    pub fn new(abbrevs: SharedAbbrevs, settings: PromptSettings) -> Self {
        let bindings = Arc::new(build_bindings(&settings));
        let completer = Arc::new(TriggerCompleter::new(abbrevs.clone()));
        Self {
            buffer: LineBuffer::new(),
            abbrevs,
            bindings,
            history: Arc::new(Mutex::new(History::new(HISTORY_CAPACITY))),
            completer,
            settings,
        }
    }

    /// Publish the one lifecycle event: the editing surface is up and
    /// its collaborators are reachable.
    pub fn announce_ready(&self, host: &mut dyn PromptHost) {
        debug!("prompt surface initialized");
        host.emit(PromptEvent::ShellReady(ShellReady {
            history: Arc::clone(&self.history),
            bindings: Arc::clone(&self.bindings),
            completer: Arc::clone(&self.completer),
        }));
    }

    /// Type one character. Whitespace is a boundary: the trigger
    /// ending at the cursor is expanded before the character goes in.
    pub fn insert_char(&mut self, c: char) -> Result<(), ExpansionError> {
        if c.is_whitespace() {
            self.expand_now()?;
        }
        self.buffer.insert_text(&c.to_string());
        Ok(())
    }

    /// Run abbreviation expansion at the current cursor position.
    pub fn expand_now(&mut self) -> Result<bool, ExpansionError> {
        let store = self.abbrevs.lock().unwrap_or_else(PoisonError::into_inner);
        AbbrevEngine::new(&store).attempt_expand(&mut self.buffer)
    }

    /// Submit the current line: final expansion, then take the text
    /// and append it to history unless it is blank or a comment.
    pub fn accept_line(&mut self) -> Result<String, ExpansionError> {
        self.expand_now()?;
        let line = self.buffer.take_text();
        if should_append_history(&line) {
            self.history
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .add(line.clone());
        }
        Ok(line)
    }

    /// Completions for the word under the cursor.
    pub fn complete_current(&self) -> Vec<Completion> {
        self.completer
            .complete(self.buffer.text(), self.buffer.cursor())
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut LineBuffer {
        &mut self.buffer
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn history(&self) -> Arc<Mutex<History>> {
        Arc::clone(&self.history)
    }

    pub fn settings(&self) -> &PromptSettings {
        &self.settings
    }
}

/// Build the key-binding table from the settings snapshot.
fn build_bindings(settings: &PromptSettings) -> KeyBindings {
    let mut bindings = KeyBindings::new();
    if settings.whole_word_shortcuts {
        bindings.add(KeyCombo::ctrl(KeyCode::Left), "backward-word");
        bindings.add(KeyCombo::ctrl(KeyCode::Right), "forward-word");
        bindings.add(KeyCombo::ctrl(KeyCode::Delete), "kill-word");
        bindings.add(KeyCombo::ctrl(KeyCode::Backspace), "backward-kill-word");
    } else if settings.ctrl_bksp_deletion {
        bindings.add(KeyCombo::ctrl(KeyCode::Backspace), "backward-kill-word");
    }
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptkit::{AbbrevStore, Expansion};

    fn shared_store() -> SharedAbbrevs {
        let mut store = AbbrevStore::new();
        store.register("gst", Expansion::literal("git status"));
        store.register("kill", Expansion::literal("kill <edit> -9"));
        Arc::new(Mutex::new(store))
    }

    fn shell(settings: PromptSettings) -> PromptShell {
        PromptShell::new(shared_store(), settings)
    }

    #[test]
    fn test_should_append_history() {
        assert!(!should_append_history(""));
        assert!(!should_append_history("   "));
        assert!(!should_append_history("# a comment"));
        assert!(!should_append_history("   # indented comment"));
        assert!(should_append_history("print('yes')"));
    }

    #[test]
    fn test_space_expands_trigger() {
        let mut sh = shell(PromptSettings::default());
        for c in "gst".chars() {
            sh.insert_char(c).expect("insert");
        }
        sh.insert_char(' ').expect("insert");
        assert_eq!(sh.buffer().text(), "git status ");
    }

    #[test]
    fn test_accept_line_expands_and_appends() {
        let mut sh = shell(PromptSettings::default());
        sh.buffer_mut().insert_text("gst");
        let line = sh.accept_line().expect("accept");
        assert_eq!(line, "git status");
        let history = sh.history();
        let history = history.lock().expect("history lock");
        assert_eq!(history.commands(), ["git status"]);
    }

    #[test]
    fn test_accept_line_skips_comments_and_blanks() {
        let mut sh = shell(PromptSettings::default());
        sh.buffer_mut().insert_text("# a comment");
        assert_eq!(sh.accept_line().expect("accept"), "# a comment");
        assert_eq!(sh.accept_line().expect("accept"), "");
        let history = sh.history();
        assert!(history.lock().expect("history lock").is_empty());
    }

    #[test]
    fn test_edit_marker_cursor_via_shell() {
        let mut sh = shell(PromptSettings::default());
        sh.buffer_mut().insert_text("kill");
        assert!(sh.expand_now().expect("expand"));
        assert_eq!(sh.buffer().text(), "kill  -9");
        assert_eq!(sh.buffer().cursor(), 5);
    }

    #[test]
    fn test_whole_word_shortcut_bindings() {
        let sh = shell(PromptSettings {
            whole_word_shortcuts: true,
            ..PromptSettings::default()
        });
        assert!(!sh
            .bindings()
            .bindings_for(&KeyCombo::ctrl(KeyCode::Delete))
            .is_empty());
    }

    #[test]
    fn test_no_bindings_without_toggles() {
        let sh = shell(PromptSettings::default());
        assert!(sh.bindings().is_empty());
    }

    #[test]
    fn test_ctrl_bksp_toggle_alone() {
        let sh = shell(PromptSettings {
            ctrl_bksp_deletion: true,
            ..PromptSettings::default()
        });
        assert_eq!(
            sh.bindings().bindings_for(&KeyCombo::ctrl(KeyCode::Backspace)),
            ["backward-kill-word"]
        );
        assert!(sh
            .bindings()
            .bindings_for(&KeyCombo::ctrl(KeyCode::Delete))
            .is_empty());
    }

    #[test]
    fn test_trigger_completion() {
        let sh = shell(PromptSettings::default());
        let completions = sh.completer.complete("sudo g", 6);
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].text, "gst");
        assert!(sh.completer.complete("sudo ", 5).is_empty());
    }
}
