/// Extract the element id from a same-page fragment href.
///
/// Returns `Some` only for hrefs that start with "#" and carry an id after
/// it. A bare "#" or any other href yields `None`, leaving the click to the
/// browser's default handling.
pub fn fragment_id(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() { None } else { Some(id) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_href_yields_id() {
        assert_eq!(fragment_id("#about"), Some("about"));
        assert_eq!(fragment_id("#section-2"), Some("section-2"));
    }

    #[test]
    fn bare_hash_is_ignored() {
        assert_eq!(fragment_id("#"), None);
    }

    #[test]
    fn non_fragment_hrefs_are_ignored() {
        assert_eq!(fragment_id(""), None);
        assert_eq!(fragment_id("/about"), None);
        assert_eq!(fragment_id("https://example.com/#about"), None);
    }
}
