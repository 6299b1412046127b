/// L3 Core: promptkit implementation modules.
pub mod abbrevs;
pub mod ansi;
pub mod bindings;
pub mod buffer;
pub mod completer;
pub mod history;
