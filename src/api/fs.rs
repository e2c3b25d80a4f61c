//! Directory listing with server-side cache refresh.

use std::time::Duration;

use super::client::ApiClient;
use super::types::{ApiResponse, ListData, ListRequest, ObjEntry};
use crate::error::RefreshError;

const LIST_PATH: &str = "/api/fs/list";

const LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// List `path` with `refresh: true`, forcing the server to rebuild its cache.
///
/// Returns every entry of the directory. An accepted request without a
/// listing (`data` or `content` null) yields an empty list.
pub async fn refresh_list(client: &ApiClient, path: &str) -> Result<Vec<ObjEntry>, RefreshError> {
    let request = ListRequest::refresh_all(path);

    let resp = client
        .authenticated_post(LIST_PATH, &request, LIST_TIMEOUT)
        .await?;
    let status = resp.status();
    let body = resp.text().await?;

    let list_resp: ApiResponse<ListData> = serde_json::from_str(&body).map_err(|e| {
        log::error!("Unparseable listing response for {} (HTTP {}): {}", path, status, e);
        RefreshError::Refresh(format!("Malformed listing response (HTTP {})", status))
    })?;

    if !list_resp.is_ok() {
        return Err(RefreshError::Refresh(list_resp.message_or("Failed")));
    }

    let total = list_resp.data.as_ref().map_or(0, |data| data.total);
    let entries = list_resp
        .data
        .and_then(|data| data.content)
        .unwrap_or_default();
    log::debug!("Listed {} ({} of {} entries)", path, entries.len(), total);
    Ok(entries)
}
