/// Truncate to `max` characters, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }

    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }

    if max <= 3 {
        return s.chars().take(max).collect();
    }

    let truncated: String = s.chars().take(max - 3).collect();
    format!("{}...", truncated)
}

/// Collapse whitespace runs so multi-line server text fits on one status line.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("♥♥♥♥♥", 4), "♥...");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn single_line_collapses_whitespace() {
        assert_eq!(single_line("Internal\n  Server\tError "), "Internal Server Error");
    }
}
