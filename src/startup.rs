// Startup registration.
// Drops a platform startup entry pointing at the current executable so the
// watcher comes back after login. Existing entries are left untouched.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const ENTRY_NAME: &str = "wishwatch";

/// Register the running executable to launch at login. Idempotent.
pub fn register() -> Result<()> {
    let Some(target) = startup_file() else {
        tracing::debug!("no startup location on this platform, skipping registration");
        return Ok(());
    };

    let exe = env::current_exe()?;
    if write_entry(&target, &exe)? {
        tracing::info!(path = %target.display(), "registered startup entry");
    } else {
        tracing::debug!(path = %target.display(), "startup entry already present");
    }
    Ok(())
}

/// Write the entry at `target` unless one already exists. Returns whether a
/// new entry was written.
fn write_entry(target: &Path, exe: &Path) -> Result<bool> {
    if target.exists() {
        return Ok(false);
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, entry_contents(exe))?;
    Ok(true)
}

#[cfg(target_os = "windows")]
fn startup_file() -> Option<PathBuf> {
    let appdata = env::var_os("APPDATA")?;
    Some(
        PathBuf::from(appdata)
            .join("Microsoft")
            .join("Windows")
            .join("Start Menu")
            .join("Programs")
            .join("Startup")
            .join(format!("{ENTRY_NAME}.bat")),
    )
}

#[cfg(target_os = "windows")]
fn entry_contents(exe: &Path) -> String {
    format!("start \"\" \"{}\"\r\n", exe.display())
}

#[cfg(not(target_os = "windows"))]
fn startup_file() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| {
        dirs.config_dir()
            .join("autostart")
            .join(format!("{ENTRY_NAME}.desktop"))
    })
}

#[cfg(not(target_os = "windows"))]
fn entry_contents(exe: &Path) -> String {
    format!(
        "[Desktop Entry]\nType=Application\nName={ENTRY_NAME}\nExec={}\n",
        exe.display()
    )
}
