//! Target domain and brand handling.

use url::Url;

use crate::error::ReportError;

/// Reduces user input to a bare lowercase host.
///
/// Accepts `example.com`, `https://www.example.com/path` and similar.
/// A leading `www.` is dropped.
pub fn normalize_domain(input: &str) -> Result<String, ReportError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ReportError::FatalConfiguration("empty target domain".to_string()));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| ReportError::FatalConfiguration(format!("invalid target {trimmed}: {e}")))?;
    let host = url
        .host_str()
        .filter(|h| h.contains('.'))
        .ok_or_else(|| ReportError::FatalConfiguration(format!("invalid target {trimmed}")))?;

    let host = host.to_ascii_lowercase();
    Ok(host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
}

/// Brand name implied by a domain: its first host label.
///
/// `shop.nike.com` gives `shop`, `nike.com` gives `nike`.
pub fn derive_brand(domain: &str) -> String {
    let host = normalize_domain(domain).unwrap_or_else(|_| domain.trim().to_ascii_lowercase());
    host.split('.').next().unwrap_or_default().to_string()
}
