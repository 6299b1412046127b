/// L3 Core: prompt front-end implementation modules.
pub mod settings;
pub mod shell;
pub mod vars;
