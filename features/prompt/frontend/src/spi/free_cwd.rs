use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Windows keeps an open handle on the process working directory,
/// which blocks other programs from deleting or renaming it. When
/// `OXSH_FREE_CWD` is set the host wraps prompt display in
/// [`release`](FreeCwdHook::release) / [`restore`](FreeCwdHook::restore)
/// so the handle points somewhere harmless while the prompt is shown.
#[derive(Debug)]
pub struct FreeCwdHook {
    parked: PathBuf,
}

impl FreeCwdHook {
    /// Install the hook. On non-Windows platforms the directory handle
    /// is not held, so there is nothing to install and this returns
    /// `None`.
    pub fn install() -> Option<Self> {
        if cfg!(windows) {
            let parked = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
            Some(Self { parked })
        } else {
            debug!("free-cwd hook only applies on Windows; not installed");
            None
        }
    }

    /// Move the process working directory to the parking location,
    /// returning the directory to restore afterward.
    pub fn release(&self) -> Result<PathBuf> {
        let previous = std::env::current_dir().context("reading current directory")?;
        std::env::set_current_dir(&self.parked)
            .with_context(|| format!("parking cwd at {}", self.parked.display()))?;
        Ok(previous)
    }

    /// Return to the directory saved by [`release`](Self::release).
    /// The directory may have vanished in the meantime; that is the
    /// whole point of the hook, so the caller decides what to do then.
    pub fn restore(&self, previous: &Path) -> Result<()> {
        std::env::set_current_dir(previous)
            .with_context(|| format!("restoring cwd to {}", previous.display()))
    }
}
