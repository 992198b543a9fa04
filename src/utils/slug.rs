/// 由名称生成 URL 安全的 slug："Mark Six" -> "mark-six"
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true; // 去掉开头的连字符

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// slug 仅允许小写字母、数字与连字符，且不能为空
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Mark Six"), "mark-six");
        assert_eq!(slugify("Lucky  Numbers!"), "lucky-numbers");
        assert_eq!(slugify("  Golden Balls  "), "golden-balls");
        assert_eq!(slugify("Dragon Draw 2025"), "dragon-draw-2025");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("mark-six"));
        assert!(is_valid_slug("draw2025"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Mark-Six"));
        assert!(!is_valid_slug("mark six"));
        assert!(!is_valid_slug("-mark-six"));
        assert!(!is_valid_slug("mark-six-"));
    }
}
