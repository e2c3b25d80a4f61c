//! Mapping of browser-visible WebDAV paths to server-native paths.
//!
//! The media center shows the remote under a mount segment (the server's
//! WebDAV prefix, usually `dav`), e.g. `/dav/Movies/2024`. The server's own
//! API addresses the same folder as `/Movies/2024`.

/// Percent-decode a URL component, replacing invalid UTF-8 lossily.
pub fn percent_decode(raw: &str) -> String {
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Translate a browser path into the server's native path.
///
/// Drops the leading mount segment and percent-decodes the remainder. A path
/// with no segments, or only the mount segment, maps to `/`. Not idempotent:
/// apply once.
pub fn to_native_path(browser_path: &str) -> String {
    let trimmed = browser_path.trim_matches('/');
    let mut segments = trimmed.split('/');

    let native = match segments.next() {
        Some(first) if !first.is_empty() => {
            let rest: Vec<&str> = segments.collect();
            format!("/{}", rest.join("/"))
        }
        _ => "/".to_string(),
    };

    percent_decode(&native)
}

/// Join a directory name onto a native path, with a trailing slash.
pub fn child_path(parent: &str, name: &str) -> String {
    let mut path = String::with_capacity(parent.len() + name.len() + 2);
    path.push_str(parent);
    if !path.ends_with('/') {
        path.push('/');
    }
    path.push_str(name);
    if !path.ends_with('/') {
        path.push('/');
    }
    path
}
