/// Get the current time as an RFC 3339 string (UTC).
///
/// Timestamps are stored and compared as strings; one call per snapshot
/// gives every record in that snapshot the same value.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
