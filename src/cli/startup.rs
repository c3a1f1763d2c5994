//! Run startup: lock first, then logging.

use crate::error::Result;
use crate::fs::{ensure_dir, HomePaths, RunLock};
use crate::output::{init_logging, log_run_timestamp, print_warning};

/// Take the run lock and set up logging.
///
/// Returns `None` when another run holds the lock. Nothing under `paths`
/// is written in that case, not even the logs, since they belong to the
/// run holding the lock.
pub fn begin_run(paths: &HomePaths, debug: bool) -> Result<Option<RunLock>> {
    ensure_dir(&paths.home)?;

    let Some(lock) = RunLock::acquire(&paths.lock)? else {
        print_warning(&format!(
            "Lock file {} exists, another run is in progress. Exiting.",
            paths.lock.display()
        ));
        return Ok(None);
    };

    init_logging(paths, debug)?;
    log_run_timestamp(&paths.timestamp_log)?;

    Ok(Some(lock))
}
