#![forbid(unsafe_code)]

/// oxsh-prompt: prompt-kit shell front-end plugin for oxsh.
///
/// # Architecture (SEA Pattern)
///
/// - `api/` — public types re-exported at crate root
/// - `core/` — implementations (settings, vars, shell adapter)
/// - `spi/` — host integration (lifecycle, config file, free-cwd hook)
pub mod api;
pub mod core;
pub mod spi;

// Re-export the API surface at crate root for convenience.
pub use api::*;
