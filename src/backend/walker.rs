//! Depth-first cache invalidation walk.
//!
//! Each directory is refreshed by listing it with the server's cache
//! bypassed. Children are discovered from that same listing, so a walk costs
//! exactly one request per directory. Requests are issued one at a time.
//!
//! Only the starting directory's result is returned. A failing
//! subdirectory is reported to the user and its subtree is skipped, but its
//! siblings are still walked and the overall result is unaffected.

use crate::api::client::ApiClient;
use crate::api::types::ObjEntry;
use crate::error::RefreshError;
use crate::host::{Notifier, Severity};
use crate::path::child_path;

use super::RefreshOutcome;

/// Trait abstracting the refreshing directory listing for testability.
///
/// In production, `ApiClient` implements this via POST /api/fs/list.
#[allow(async_fn_in_trait)]
pub trait DirectoryLister {
    /// List `path` with the server cache bypassed.
    async fn refresh_list(&self, path: &str) -> Result<Vec<ObjEntry>, RefreshError>;
}

impl DirectoryLister for ApiClient {
    async fn refresh_list(&self, path: &str) -> Result<Vec<ObjEntry>, RefreshError> {
        crate::api::fs::refresh_list(self, path).await
    }
}

/// Counters for one walk, logged when it finishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkStats {
    pub refreshed: usize,
    pub failed: usize,
}

/// `true` for the server root, which is never refreshed.
pub fn is_root(path: &str) -> bool {
    path.is_empty() || path == "/"
}

/// Refresh `root` and, if `recursive`, every directory below it.
///
/// The server root is skipped without any request and reported as
/// `Skipped`. Errors are returned only for `root` itself.
pub async fn walk<L: DirectoryLister>(
    lister: &L,
    notifier: &dyn Notifier,
    root: &str,
    recursive: bool,
) -> Result<RefreshOutcome, RefreshError> {
    if is_root(root) {
        log::info!("Skipping refresh of server root");
        notifier.notify("Refresh", "Skipping root directory", Severity::Info);
        return Ok(RefreshOutcome::Skipped);
    }

    log::info!("Refreshing path: {} (recursive: {})", root, recursive);
    let entries = lister.refresh_list(root).await?;
    let mut stats = WalkStats {
        refreshed: 1,
        failed: 0,
    };

    if recursive {
        // Pushed in reverse so siblings pop in listing order (pre-order DFS).
        let mut pending: Vec<String> = subdirectories(root, &entries).rev().collect();

        while let Some(path) = pending.pop() {
            log::info!("Refreshing path: {} (recursive: true)", path);
            match lister.refresh_list(&path).await {
                Ok(entries) => {
                    stats.refreshed += 1;
                    pending.extend(subdirectories(&path, &entries).rev());
                }
                Err(e) => {
                    stats.failed += 1;
                    log::error!("Refresh of {} failed ({}): {}", path, e.kind(), e);
                    notifier.notify(
                        "Refresh failed",
                        &format!("{}: {}", path, e),
                        Severity::Error,
                    );
                }
            }
        }
    }

    log::info!(
        "Refresh of {} finished: {} directories refreshed, {} failed",
        root,
        stats.refreshed,
        stats.failed
    );
    Ok(RefreshOutcome::Succeeded)
}

/// Child directory paths of `parent`, in listing order.
fn subdirectories<'a>(
    parent: &'a str,
    entries: &'a [ObjEntry],
) -> impl DoubleEndedIterator<Item = String> + 'a {
    entries
        .iter()
        .filter(|entry| entry.is_dir && !entry.name.is_empty())
        .map(move |entry| child_path(parent, &entry.name))
}
