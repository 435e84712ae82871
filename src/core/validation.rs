use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::{Host, Url};

/// Hint surfaced next to the input when the local guard rejects a URL
pub const URL_HINT: &str = "Please enter a valid website URL, e.g. https://example.com";

/// `scheme://host.tld[/path][?query][#fragment]` with a letters/digits/hyphen/dot
/// host and a TLD of two or more letters.
static CLIENT_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}([/?#]\S*)?$")
        .expect("client URL pattern is valid")
});

/// Minimal syntactic guard applied by the client before any request is issued
///
/// Leading and trailing whitespace is ignored.
#[inline]
pub fn is_plausible_url(input: &str) -> bool {
    CLIENT_URL_PATTERN.is_match(input.trim())
}

/// Reasons the server rejects a website URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlRejection {
    #[error("website_url is required")]
    Missing,

    #[error("website_url is empty")]
    Blank,

    #[error("website_url is not a valid absolute URL: {0}")]
    Malformed(String),

    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("website_url has no usable host")]
    MissingHost,
}

/// Authoritative server-side URL check
///
/// Accepts absolute `http`/`https` URLs whose host is a dotted domain name,
/// an IP address or `localhost`. The input is trimmed first.
pub fn validate_website_url(raw: Option<&str>) -> Result<Url, UrlRejection> {
    let raw = raw.ok_or(UrlRejection::Missing)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlRejection::Blank);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlRejection::Malformed(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlRejection::UnsupportedScheme(other.to_string())),
    }

    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.');
            let dotted = domain
                .split('.')
                .filter(|label| !label.is_empty())
                .count()
                >= 2;
            if !dotted && !domain.eq_ignore_ascii_case("localhost") {
                return Err(UrlRejection::MissingHost);
            }
        }
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {}
        None => return Err(UrlRejection::MissingHost),
    }

    Ok(url)
}
