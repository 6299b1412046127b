/// L2 API: Public types and traits for the promptkit crate.
///
/// Re-exports the main user-facing types from the core layer.
pub use crate::core::abbrevs::{
    AbbrevEngine, AbbrevStore, ExpandFn, Expansion, ExpansionError, EDIT_MARKER,
};
pub use crate::core::ansi::{tokenize_ansi, StyledToken};
pub use crate::core::bindings::{KeyBindings, KeyCombo};
pub use crate::core::buffer::{EditBuffer, LineBuffer};
pub use crate::core::completer::{common_prefix, Complete, Completion, NoComplete};
pub use crate::core::history::History;
