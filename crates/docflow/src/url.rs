use url::Url;

/// Resolve `reference` against `base`, passing it through unchanged when
/// either side refuses to parse. An empty reference stays empty.
pub(crate) fn resolve(base: &str, reference: &str) -> String {
    if reference.is_empty() {
        return String::new();
    }
    let Ok(base) = Url::parse(base) else {
        return reference.to_string();
    };
    base.join(reference)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| reference.to_string())
}

#[cfg(test)]
mod tests {
    use super::resolve;

    #[test]
    fn joins_relative_references() {
        assert_eq!(resolve("https://x/y/", "z"), "https://x/y/z");
        assert_eq!(resolve("https://x/y/", "/z"), "https://x/z");
        assert_eq!(resolve("https://x/y/page.html", "z"), "https://x/y/z");
    }

    #[test]
    fn absolute_references_win_over_the_base() {
        assert_eq!(resolve("https://x/", "https://other/p"), "https://other/p");
    }

    #[test]
    fn unparseable_base_passes_the_reference_through() {
        assert_eq!(resolve("not a url", "/z"), "/z");
        assert_eq!(resolve("", "pic.png"), "pic.png");
    }

    #[test]
    fn empty_reference_stays_empty() {
        assert_eq!(resolve("https://x/", ""), "");
    }
}
