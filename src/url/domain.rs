use std::net::IpAddr;
use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use contact_crawler::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://sub.example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("sub.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Reduces a URL's host to the registrable site domain
///
/// `www.example.com` and `blog.example.com` both become `example.com`.
/// Suffixes come from the public suffix list, private sections included,
/// so `alice.github.io` stays whole. IP addresses, single-label hosts and
/// bare suffixes are returned as-is.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use contact_crawler::url::site_domain;
///
/// let url = Url::parse("https://news.sina.com.cn/a.html").unwrap();
/// assert_eq!(site_domain(&url), Some("sina.com.cn".to_string()));
/// ```
pub fn site_domain(url: &Url) -> Option<String> {
    let host = extract_domain(url)?;
    let host = host.trim_end_matches('.');

    let bare = host.trim_start_matches('[').trim_end_matches(']');
    if bare.parse::<IpAddr>().is_ok() {
        return Some(host.to_string());
    }

    let registrable = psl::domain_str(host).unwrap_or(host);
    Some(registrable.to_string())
}

/// Returns the origin (`scheme://host[:port]`) of a URL
///
/// Default ports are omitted. Returns None for opaque origins such as
/// `data:` URLs.
pub fn origin(url: &Url) -> Option<String> {
    let origin = url.origin();
    if origin.is_tuple() {
        Some(origin.ascii_serialization())
    } else {
        None
    }
}

/// Returns the `host[:port]` key used for per-host politeness
pub fn host_key(url: &Url) -> Option<String> {
    let host = extract_domain(url)?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}
