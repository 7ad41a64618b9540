//! Small helpers for writing PHP source text.

/// Quote `value` as a single-quoted PHP string literal.
///
/// Inside single quotes PHP only interprets `\\` and `\'`, so those are the
/// only characters escaped.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// `<?php` opening tag followed by a blank line
pub fn open_tag() -> &'static str {
    "<?php\n\n"
}

/// Comment line marking a script as written by this tool
pub const GENERATED_MARKER: &str = "// Generated by dbgen";

/// Whether `content` carries [`GENERATED_MARKER`] in its header.
pub fn is_generated(content: &str) -> bool {
    content
        .lines()
        .take(4)
        .any(|line| line.trim() == GENERATED_MARKER)
}

/// `use` statements, one per line, followed by a blank line
pub fn use_block(imports: &[&str]) -> String {
    let mut out = String::new();
    for import in imports {
        out.push_str(&format!("use {};\n", import));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal_plain() {
        assert_eq!(string_literal("users"), "'users'");
        assert_eq!(string_literal(""), "''");
    }

    #[test]
    fn test_string_literal_escapes_quotes_and_backslashes() {
        assert_eq!(string_literal("O'Brien"), r"'O\'Brien'");
        assert_eq!(string_literal(r"C:\temp"), r"'C:\\temp'");
        assert_eq!(string_literal(r#"say "hi""#), r#"'say "hi"'"#);
    }

    #[test]
    fn test_string_literal_keeps_newlines_and_unicode() {
        assert_eq!(string_literal("a\nb"), "'a\nb'");
        assert_eq!(string_literal("héllo"), "'héllo'");
    }

    #[test]
    fn test_generated_marker_is_found_in_header_only() {
        assert!(is_generated("<?php\n\n// Generated by dbgen\n\nuse X;\n"));
        assert!(!is_generated("<?php\n\nuse X;\n"));
        assert!(!is_generated("<?php\n\nuse A;\nuse B;\nuse C;\n// Generated by dbgen\n"));
    }

    #[test]
    fn test_use_block() {
        assert_eq!(
            use_block(&["Illuminate\\Database\\Seeder"]),
            "use Illuminate\\Database\\Seeder;\n\n"
        );
    }
}
