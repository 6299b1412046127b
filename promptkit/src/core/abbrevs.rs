use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::core::buffer::EditBuffer;

/// Marker inside an expansion naming where the cursor lands afterward.
pub const EDIT_MARKER: &str = "<edit>";

/// Callback form of an expansion: receives the buffer and the matched
/// trigger text, returns the replacement. Returning the trigger
/// unchanged is the conventional "leave the text alone" signal.
pub type ExpandFn = Box<dyn Fn(&dyn EditBuffer, &str) -> anyhow::Result<String> + Send>;

/// What a trigger expands to.
pub enum Expansion {
    /// Fixed replacement text, may contain [`EDIT_MARKER`].
    Literal(String),
    /// Computed replacement; its output is treated exactly like a
    /// literal, so callbacks can also place the cursor with the marker.
    Computed(ExpandFn),
}

impl Expansion {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&dyn EditBuffer, &str) -> anyhow::Result<String> + Send + 'static,
    {
        Self::Computed(Box::new(f))
    }
}

impl fmt::Debug for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Computed(_) => f.debug_tuple("Computed").field(&"<fn>").finish(),
        }
    }
}

/// Failure while resolving an expansion. The buffer is untouched
/// whenever this is returned.
#[derive(Debug, Error)]
pub enum ExpansionError {
    #[error("abbreviation callback for {trigger:?} failed")]
    Callback {
        trigger: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Trigger → expansion mapping. Pure data: mutated only through
/// [`register`](Self::register) / [`unregister`](Self::unregister),
/// never by the engine. Keys are case-sensitive and may contain
/// internal whitespace ("docker ps") for multi-word triggers.
#[derive(Debug, Default)]
pub struct AbbrevStore {
    map: HashMap<String, Expansion>,
}

impl AbbrevStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a trigger. Last write wins.
    pub fn register(&mut self, trigger: impl Into<String>, expansion: Expansion) {
        self.map.insert(trigger.into(), expansion);
    }

    /// Remove a trigger. Missing triggers are a no-op; returns whether
    /// anything was removed.
    pub fn unregister(&mut self, trigger: &str) -> bool {
        self.map.remove(trigger).is_some()
    }

    pub fn get(&self, trigger: &str) -> Option<&Expansion> {
        self.map.get(trigger)
    }

    pub fn contains(&self, trigger: &str) -> bool {
        self.map.contains_key(trigger)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Registered triggers, in no particular order.
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

/// Expands abbreviations in a live buffer against an injected store.
///
/// Matching rules, in order:
/// 1. the maximal run of non-whitespace characters ending at the
///    cursor (the candidate word) is looked up verbatim;
/// 2. failing that, word-boundary-aligned suffixes of the pre-cursor
///    text are tried from longest to shortest, so a compound trigger
///    like "docker ps" only matches when that exact key exists.
///
/// A match is exact string equality with a key, so two distinct keys
/// can never claim the same span; longest-match-wins is the only
/// tie-break and it is deterministic.
pub struct AbbrevEngine<'a> {
    store: &'a AbbrevStore,
}

impl<'a> AbbrevEngine<'a> {
    pub fn new(store: &'a AbbrevStore) -> Self {
        Self { store }
    }

    /// Try to expand the trigger ending at the cursor.
    ///
    /// Returns `Ok(true)` when a trigger matched and the replacement
    /// was written (even when the replacement text equals the trigger:
    /// there is no built-in cancellation signal, callers that care
    /// compare the text before and after). Returns `Ok(false)` and
    /// leaves the buffer untouched when nothing matched. A failing
    /// computed expansion propagates as [`ExpansionError`] with the
    /// buffer untouched.
    pub fn attempt_expand(&self, buffer: &mut dyn EditBuffer) -> Result<bool, ExpansionError> {
        let chars: Vec<char> = buffer.text().chars().collect();
        let cursor = buffer.cursor().min(chars.len());

        let Some((span_start, trigger)) = self.find_match(&chars, cursor) else {
            return Ok(false);
        };

        let resolved = match self.store.get(&trigger) {
            Some(Expansion::Literal(text)) => text.clone(),
            Some(Expansion::Computed(f)) => {
                f(&*buffer, &trigger).map_err(|source| ExpansionError::Callback {
                    trigger: trigger.clone(),
                    source,
                })?
            }
            None => return Ok(false),
        };

        let (expansion_text, cursor_offset) = split_edit_marker(&resolved);
        buffer.replace_range(span_start, cursor, &expansion_text);
        buffer.set_cursor(span_start + cursor_offset);
        Ok(true)
    }

    /// Locate the matched trigger: (span start in chars, matched key).
    fn find_match(&self, chars: &[char], cursor: usize) -> Option<(usize, String)> {
        let pre = &chars[..cursor];

        // Candidate word: maximal trailing run of non-whitespace.
        let word_start = pre
            .iter()
            .rposition(|c| c.is_whitespace())
            .map_or(0, |i| i + 1);
        if word_start == cursor {
            return None;
        }

        let candidate: String = pre[word_start..].iter().collect();
        if self.store.contains(&candidate) {
            return Some((word_start, candidate));
        }

        // Multi-word triggers: word-aligned suffixes of the whole
        // pre-cursor text, longest first.
        for start in word_starts(pre) {
            if start >= word_start {
                break;
            }
            let suffix: String = pre[start..].iter().collect();
            if self.store.contains(&suffix) {
                return Some((start, suffix));
            }
        }

        None
    }
}

/// Character offsets where a word begins (non-whitespace preceded by
/// whitespace or the start of text), in left-to-right order.
fn word_starts(chars: &[char]) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut prev_ws = true;
    for (i, c) in chars.iter().enumerate() {
        if !c.is_whitespace() && prev_ws {
            starts.push(i);
        }
        prev_ws = c.is_whitespace();
    }
    starts
}

/// Remove the first [`EDIT_MARKER`] and report (text, cursor offset in
/// characters). Without a marker the cursor offset is the text length.
fn split_edit_marker(resolved: &str) -> (String, usize) {
    match resolved.find(EDIT_MARKER) {
        Some(byte_idx) => {
            let offset = resolved[..byte_idx].chars().count();
            let text = resolved.replacen(EDIT_MARKER, "", 1);
            (text, offset)
        }
        None => (resolved.to_string(), resolved.chars().count()),
    }
}
