//! CSRF token lookup from page metadata.

use std::sync::OnceLock;

use regex::Regex;

/// Header the backend reads the token from
pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";

const META_NAME: &str = "csrf-token";

fn meta_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<meta\b[^>]*>").expect("valid meta regex"))
}

fn attribute() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\b(name|content)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid attribute regex")
    })
}

/// Content of `<meta name="csrf-token" content="...">`, in any attribute order
pub fn csrf_token_from_meta(html: &str) -> Option<String> {
    for tag in meta_tag().find_iter(html) {
        let mut name = None;
        let mut content = None;

        for caps in attribute().captures_iter(tag.as_str()) {
            let value = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str());
            match caps[1].to_ascii_lowercase().as_str() {
                "name" => name = value,
                "content" => content = value,
                _ => {}
            }
        }

        if name == Some(META_NAME) {
            return content.map(str::to_string);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_found() {
        let html = r#"<html><head>
            <meta charset="utf-8">
            <meta name="csrf-token" content="abc123">
        </head></html>"#;

        assert_eq!(csrf_token_from_meta(html), Some("abc123".to_string()));
    }

    #[test]
    fn test_attribute_order_and_quotes() {
        let html = "<META content='tok' NAME='csrf-token' />";
        assert_eq!(csrf_token_from_meta(html), Some("tok".to_string()));
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(csrf_token_from_meta(r#"<meta name="viewport" content="x">"#), None);
        assert_eq!(csrf_token_from_meta(""), None);
    }
}
