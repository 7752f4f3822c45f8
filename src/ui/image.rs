//! Image fallback

/// Shown wherever an image URL is missing or fails to load
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/50";

/// `url` when it is non-blank, otherwise `placeholder`
pub fn image_or_placeholder<'a>(url: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match url.map(str::trim) {
        Some(u) if !u.is_empty() => u,
        _ => placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback() {
        assert_eq!(image_or_placeholder(None, PLACEHOLDER_IMAGE), PLACEHOLDER_IMAGE);
        assert_eq!(image_or_placeholder(Some("  "), PLACEHOLDER_IMAGE), PLACEHOLDER_IMAGE);
        assert_eq!(
            image_or_placeholder(Some("https://x/y.png"), PLACEHOLDER_IMAGE),
            "https://x/y.png"
        );
    }
}
