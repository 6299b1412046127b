#![forbid(unsafe_code)]

/// promptkit: Shared line-buffer, abbreviation, and prompt-token library.
///
/// # Architecture (SEA Pattern)
///
/// - `api/` — public types re-exported at crate root
/// - `core/` — implementations (buffer, abbrevs, ansi, bindings, history, completer)
/// - `spi/` — external provider integration (empty for now)
pub mod api;
pub mod core;
pub mod spi;

// Re-export the API surface at crate root for convenience.
pub use api::*;
