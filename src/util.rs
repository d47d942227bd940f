const GITHUB_PREFIX: &str = "https://github.com/";

/// `https://github.com/owner/repo/...` becomes `owner/repo`; other
/// identifiers are returned unchanged.
pub fn repo_display_name(repo: &str) -> String {
    match repo.strip_prefix(GITHUB_PREFIX) {
        Some(rest) => {
            let mut parts = rest.split('/');
            let owner = parts.next().unwrap_or("");
            let name = parts.next().unwrap_or("");
            format!("{owner}/{name}")
        }
        None => repo.to_string(),
    }
}

pub fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let cut: String = value.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
