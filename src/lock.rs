//! Single-run lock file in the vault root

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

use crate::consts::LOCK_FILE_NAME;
use crate::error::{AppError, StoreError};

/// A lock older than this is left over from a crashed run
const STALE_AFTER: Duration = Duration::from_secs(10 * 60);

/// Held for the duration of a run; the file is removed on drop.
#[derive(Debug)]
pub(crate) struct RunLock {
    path: PathBuf,
}

impl RunLock {
    pub(crate) fn acquire(dir: &Path) -> Result<Self, AppError> {
        let path = dir.join(LOCK_FILE_NAME);
        match try_create(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !is_stale(&path) {
                    return Err(AppError::RunInProgress { path });
                }
                warn!("replacing stale lock {}", path.display());
                let _ = fs::remove_file(&path);
                try_create(&path).map_err(|e| lock_error(&path, e))?;
            }
            Err(e) => return Err(lock_error(&path, e)),
        }
        debug!("acquired {}", path.display());
        Ok(Self { path })
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("failed to remove {}: {e}", self.path.display());
        }
    }
}

fn try_create(path: &Path) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    writeln!(file, "{}", std::process::id())
}

fn is_stale(path: &Path) -> bool {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .is_some_and(|age| age > STALE_AFTER)
}

fn lock_error(path: &Path, source: std::io::Error) -> AppError {
    AppError::Store(StoreError::Io {
        path: path.display().to_string(),
        source,
    })
}
