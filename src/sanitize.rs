// src/sanitize.rs
// =============================================================================
// Turns page titles and image names into safe filesystem names.
//
// Two rules share one implementation:
// - File names (images) keep ASCII letters, digits, '_', '.' and '-'
// - Titles (directories and the .html file) keep the same set minus '.'
//
// Every other character becomes a single '_'. Because the output only
// contains allowed characters, running either function twice gives the
// same result as running it once.
// =============================================================================

// Sanitizes an image basename
//
// Example:
//   "Dog (1).jpg" -> "Dog__1_.jpg"
pub fn sanitize_file_name(name: &str) -> String {
    replace_disallowed(name, &['_', '.', '-'])
}

// Sanitizes a page title for use as a directory and file stem
//
// Example:
//   "C/C++" -> "C_C__"
pub fn sanitize_title(title: &str) -> String {
    replace_disallowed(title, &['_', '-'])
}

fn replace_disallowed(input: &str, extra: &[char]) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || extra.contains(&c) {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_allowed(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    }

    #[test]
    fn test_title_with_slashes_and_symbols() {
        assert_eq!(sanitize_title("C/C++"), "C_C__");
        assert_eq!(sanitize_title("Dog"), "Dog");
        assert_eq!(sanitize_title("New York City"), "New_York_City");
    }

    #[test]
    fn test_title_replaces_dots() {
        assert_eq!(sanitize_title("Node.js"), "Node_js");
    }

    #[test]
    fn test_file_name_keeps_dots_and_dashes() {
        assert_eq!(sanitize_file_name("Golden-Retriever.jpg"), "Golden-Retriever.jpg");
        assert_eq!(sanitize_file_name("Dog (1).jpg"), "Dog__1_.jpg");
        assert_eq!(sanitize_file_name("Dog%27s.png"), "Dog_27s.png");
    }

    #[test]
    fn test_non_ascii_becomes_single_underscore() {
        assert_eq!(sanitize_title("Zürich"), "Z_rich");
        assert_eq!(sanitize_file_name("日本.svg"), "__.svg");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            "C/C++",
            "Dog (1).jpg",
            "Zürich: a city?",
            "  spaces  ",
            "",
            "already_clean-name.png",
            "%E2%80%93 dash",
        ];

        for input in inputs {
            let title = sanitize_title(input);
            assert_eq!(sanitize_title(&title), title);
            assert!(only_allowed(&title), "unexpected char in {:?}", title);

            let file = sanitize_file_name(input);
            assert_eq!(sanitize_file_name(&file), file);
            assert!(only_allowed(&file), "unexpected char in {:?}", file);
        }
    }
}
