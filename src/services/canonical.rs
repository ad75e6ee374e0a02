const RAW_HOST: &str = "https://raw.githubusercontent.com/";
const WEB_HOST: &str = "https://github.com/";

/// Turns an aux-list entry into a fetchable descriptor location.
///
/// `owner/repo/path/to/OWNERS` (the shape `find-files` prints) becomes a raw
/// URL on the default branch, and `github.com/<o>/<r>/blob/<ref>/<path>` pages
/// become their raw form. Other URLs and local paths pass through.
pub fn descriptor_url(entry: &str) -> String {
    let s = entry.trim();
    if let Some(rest) = s.strip_prefix(WEB_HOST) {
        let parts: Vec<&str> = rest.splitn(5, '/').collect();
        if parts.len() == 5 && (parts[2] == "blob" || parts[2] == "raw") {
            return format!(
                "{}{}/{}/{}/{}",
                RAW_HOST,
                parts[0],
                parts[1].trim_end_matches(".git"),
                parts[3],
                parts[4]
            );
        }
        return s.to_string();
    }
    if s.contains("://") || s.starts_with('.') || s.starts_with('/') {
        return s.to_string();
    }
    let parts: Vec<&str> = s.splitn(3, '/').collect();
    if parts.len() == 3 && parts.iter().all(|p| !p.is_empty()) {
        return format!("{}{}/{}/HEAD/{}", RAW_HOST, parts[0], parts[1], parts[2]);
    }
    s.to_string()
}

/// Stable identity of an OWNERS location, used to match report rows
/// against candidate descriptors.
pub fn canonical_owners_url(raw: &str) -> String {
    let s = descriptor_url(raw);

    if let Some(rest) = s.strip_prefix(RAW_HOST) {
        let parts: Vec<&str> = rest.splitn(3, '/').collect();
        if parts.len() == 3 {
            return format!(
                "{}{}/{}/{}",
                RAW_HOST,
                parts[0].to_ascii_lowercase(),
                parts[1].to_ascii_lowercase(),
                parts[2].trim_end_matches('/')
            );
        }
    }

    s.trim_end_matches('/').to_string()
}
