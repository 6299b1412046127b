use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

/// A key plus its modifiers, the unit the binding table is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }
}

/// Table of key combination → named editor actions. The host queries
/// it to decide what a keystroke does; this crate only stores the
/// mapping, it does not dispatch.
#[derive(Debug, Default)]
pub struct KeyBindings {
    map: HashMap<KeyCombo, Vec<String>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `action` to `combo`. A combo can carry several actions;
    /// they are kept in registration order.
    pub fn add(&mut self, combo: KeyCombo, action: impl Into<String>) {
        self.map.entry(combo).or_default().push(action.into());
    }

    /// Actions bound to `combo`, empty when unbound.
    pub fn bindings_for(&self, combo: &KeyCombo) -> &[String] {
        self.map.get(combo).map_or(&[], Vec::as_slice)
    }

    /// Total number of bound actions across all combos.
    pub fn len(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_query() {
        let mut kb = KeyBindings::new();
        kb.add(KeyCombo::ctrl(KeyCode::Delete), "delete-word");
        let found = kb.bindings_for(&KeyCombo::ctrl(KeyCode::Delete));
        assert_eq!(found, ["delete-word"]);
    }

    #[test]
    fn test_unbound_combo_is_empty() {
        let kb = KeyBindings::new();
        assert!(kb.bindings_for(&KeyCombo::plain(KeyCode::Tab)).is_empty());
        assert!(kb.is_empty());
    }

    #[test]
    fn test_multiple_actions_keep_order() {
        let mut kb = KeyBindings::new();
        kb.add(KeyCombo::ctrl(KeyCode::Backspace), "delete-word");
        kb.add(KeyCombo::ctrl(KeyCode::Backspace), "copy-deleted");
        assert_eq!(
            kb.bindings_for(&KeyCombo::ctrl(KeyCode::Backspace)),
            ["delete-word", "copy-deleted"]
        );
        assert_eq!(kb.len(), 2);
    }

    #[test]
    fn test_modifiers_distinguish_combos() {
        let mut kb = KeyBindings::new();
        kb.add(KeyCombo::ctrl(KeyCode::Left), "word-left");
        assert!(kb.bindings_for(&KeyCombo::plain(KeyCode::Left)).is_empty());
    }
}
