// Render pipeline: LaTeX source → PDF via the external compiler.
// Each request compiles in its own spool subdirectory; the janitor sweep
// below reaps directories leaked by a crash mid-render.

pub mod handlers;
pub mod pipeline;

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{info, warn};

use crate::render::pipeline::WORKDIR_PREFIX;

/// Spawns the background sweep that removes stale render directories.
///
/// Normal renders never leave any: the per-render guard cleans up on every
/// exit path. This covers hard crashes between acquire and release.
pub fn spawn_stale_sweep(spool_dir: PathBuf, every: Duration, max_age: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match sweep_stale_workdirs(&spool_dir, max_age) {
                Ok(0) => {}
                Ok(n) => info!("Janitor removed {n} stale render dir(s)"),
                Err(e) => warn!("Janitor sweep of {} failed: {e}", spool_dir.display()),
            }
        }
    });
}

/// Removes `vitae-render-*` directories older than `max_age` from the spool
/// dir. Returns how many were removed.
fn sweep_stale_workdirs(spool_dir: &Path, max_age: Duration) -> std::io::Result<usize> {
    let mut removed = 0;

    for entry in std::fs::read_dir(spool_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = match name.to_str() {
            Some(name) => name,
            None => continue,
        };
        if !name.starts_with(WORKDIR_PREFIX) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(_) => continue,
        };
        if !metadata.is_dir() {
            continue;
        }

        let age = metadata
            .modified()
            .ok()
            .and_then(|m| SystemTime::now().duration_since(m).ok());
        let stale = matches!(age, Some(age) if age >= max_age);
        if !stale {
            continue;
        }

        match std::fs::remove_dir_all(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => warn!(
                "Failed to remove stale render dir {}: {e}",
                entry.path().display()
            ),
        }
    }

    Ok(removed)
}
