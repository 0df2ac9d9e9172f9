//! Small helpers shared by the HTTP client.

/// Maximum number of characters of a response body written to the log.
const LOG_BODY_LIMIT: usize = 256;

/// Truncate a response body for logging.
///
/// Catalog responses can be large and RFQ payloads may contain pricing terms,
/// so bodies are cut at [`LOG_BODY_LIMIT`] characters with a length marker.
pub fn truncate_for_log(s: &str) -> String {
    match s.char_indices().nth(LOG_BODY_LIMIT) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}... [truncated, total {} bytes]", &s[..cut], s.len()),
    }
}

/// Join an API base URL and a path without doubling or dropping the `/`.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        assert_eq!(truncate_for_log("{\"total\":0}"), "{\"total\":0}");
    }

    #[test]
    fn long_body_truncated_on_char_boundary() {
        let s = "é".repeat(LOG_BODY_LIMIT + 10);
        let out = truncate_for_log(&s);
        assert!(out.starts_with(&"é".repeat(LOG_BODY_LIMIT)));
        assert!(out.ends_with(&format!("total {} bytes]", s.len())));
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("https://x/api/", "/rfq"), "https://x/api/rfq");
        assert_eq!(join_url("https://x/api", "rfq/7"), "https://x/api/rfq/7");
    }
}
