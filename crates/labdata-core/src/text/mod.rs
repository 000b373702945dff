//! Text processing: LaTeX conversion and author-name handling

pub mod author_names;
pub mod latex;

pub use author_names::{format_authors_string, parse_author_list};
pub use latex::{latex_to_markdown, latex_to_text, replace_latex_accents, strip_braces};

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;

    for c in s.trim().chars() {
        if c.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    result
}
