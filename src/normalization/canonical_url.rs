use url::Url;

/// Canonical form of a demo URL, used as the dedup key for imports and lookups.
///
/// Rebuilds the URL as `scheme://host[:port]/path`, dropping credentials,
/// query string and fragment, trims trailing slashes from non-root paths and
/// lower-cases the result. Text that is not an absolute URL with a host comes
/// back trimmed and lower-cased. Applying it twice gives the same output.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    let parsed = match Url::parse(trimmed) {
        Ok(u) => u,
        Err(_) => return trimmed.to_lowercase(),
    };
    let Some(host) = parsed.host_str() else {
        return trimmed.to_lowercase();
    };

    let path = match parsed.path().trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    let canonical = match parsed.port() {
        Some(port) => format!("{}://{}:{}{}", parsed.scheme(), host, port, path),
        None => format!("{}://{}{}", parsed.scheme(), host, path),
    };
    canonical.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_query_fragment_and_case() {
        assert_eq!(
            normalize_url("https://Example.com/Page/?utm_source=x"),
            "https://example.com/page"
        );
        assert_eq!(
            normalize_url("HTTPS://EXAMPLE.com/Shop#pricing"),
            "https://example.com/shop"
        );
    }

    #[test]
    fn query_variants_collapse() {
        assert_eq!(
            normalize_url("https://demo.test/page?a=1"),
            normalize_url("https://demo.test/page?b=2")
        );
    }

    #[test]
    fn root_path_and_ports() {
        assert_eq!(normalize_url("https://example.com"), "https://example.com/");
        assert_eq!(normalize_url("https://example.com//"), "https://example.com/");
        assert_eq!(
            normalize_url("http://localhost:8080/Demo/"),
            "http://localhost:8080/demo"
        );
        // default port is elided by the parser
        assert_eq!(
            normalize_url("https://example.com:443/a"),
            "https://example.com/a"
        );
    }

    #[test]
    fn drops_credentials() {
        assert_eq!(
            normalize_url("https://user:pw@example.com/x"),
            "https://example.com/x"
        );
    }

    #[test]
    fn unparsable_falls_back_to_lowercase() {
        assert_eq!(normalize_url("Example.com/Page"), "example.com/page");
        assert_eq!(normalize_url("  Not A Url "), "not a url");
        assert_eq!(normalize_url("mailto:Sales@Example.com"), "mailto:sales@example.com");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "https://Example.com/Page/?utm_source=x",
            "http://a.b.c:9000/x/y/z///",
            "https://example.com",
            "https://example.com/%C3%A9t%C3%A9/",
            "https://example.com/a b/",
            "https://[::1]:3000/Admin",
            "https://bücher.example/Katalog",
            "ftp://files.example.com/pub/",
            "Example.com/Page",
            "",
        ];
        for u in samples {
            let once = normalize_url(u);
            assert_eq!(normalize_url(&once), once, "{u}");
        }
    }
}
