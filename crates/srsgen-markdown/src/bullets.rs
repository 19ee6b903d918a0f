// src/bullets.rs

//! Bullet and list-item extraction.

/// Text of every line starting with `-`, with the dash markers removed.
pub fn extract_bullets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with('-'))
        .map(|line| line.trim_start_matches(['-', ' ']).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Items of `- ` list lines. Unlike [`extract_bullets`], `-->`-style lines are
/// not items.
pub fn list_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix("- "))
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// First line with non-whitespace content, trimmed.
pub fn first_non_empty_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bullets() {
        let text = "Intro\n- Must run offline\n  -- Nested dash\n-\n* star item\n";
        assert_eq!(extract_bullets(text), vec!["Must run offline", "Nested dash"]);
    }

    #[test]
    fn test_list_items() {
        let text = "- Refund: if late then refund\n-->arrow\n  - Fee = base * 2\n";
        assert_eq!(list_items(text), vec!["Refund: if late then refund", "Fee = base * 2"]);
    }

    #[test]
    fn test_first_non_empty_line() {
        assert_eq!(first_non_empty_line("\n   \n  Students lose notes.  \nmore"), "Students lose notes.");
        assert_eq!(first_non_empty_line(""), "");
    }
}
