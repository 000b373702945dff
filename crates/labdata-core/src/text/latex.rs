//! LaTeX to Unicode, Markdown and plain-text conversion
//!
//! Accent commands become precomposed Unicode characters; formatting
//! commands become Markdown (or are unwrapped for plain text). Inline math
//! spans are shielded from every rewrite in Markdown mode.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Accent command, base, composed character.
///
/// Symbolic commands (`\'`, `\"`, ...) attach directly to their base;
/// alphabetic ones (`\c`, `\v`, ...) need a space or braces.
const ACCENT_TABLE: &[(&str, &str, &str)] = &[
    // Acute
    ("'", "a", "á"), ("'", "A", "Á"),
    ("'", "e", "é"), ("'", "E", "É"),
    ("'", "i", "í"), ("'", "I", "Í"),
    ("'", "o", "ó"), ("'", "O", "Ó"),
    ("'", "u", "ú"), ("'", "U", "Ú"),
    ("'", "y", "ý"), ("'", "Y", "Ý"),
    ("'", "c", "ć"), ("'", "C", "Ć"),
    ("'", "n", "ń"), ("'", "N", "Ń"),
    ("'", "s", "ś"), ("'", "S", "Ś"),
    ("'", "z", "ź"), ("'", "Z", "Ź"),
    ("'", "\\i", "í"),
    // Grave
    ("`", "a", "à"), ("`", "A", "À"),
    ("`", "e", "è"), ("`", "E", "È"),
    ("`", "i", "ì"), ("`", "I", "Ì"),
    ("`", "o", "ò"), ("`", "O", "Ò"),
    ("`", "u", "ù"), ("`", "U", "Ù"),
    ("`", "\\i", "ì"),
    // Umlaut
    ("\"", "a", "ä"), ("\"", "A", "Ä"),
    ("\"", "e", "ë"), ("\"", "E", "Ë"),
    ("\"", "i", "ï"), ("\"", "I", "Ï"),
    ("\"", "o", "ö"), ("\"", "O", "Ö"),
    ("\"", "u", "ü"), ("\"", "U", "Ü"),
    ("\"", "y", "ÿ"), ("\"", "Y", "Ÿ"),
    ("\"", "\\i", "ï"),
    // Circumflex
    ("^", "a", "â"), ("^", "A", "Â"),
    ("^", "e", "ê"), ("^", "E", "Ê"),
    ("^", "i", "î"), ("^", "I", "Î"),
    ("^", "o", "ô"), ("^", "O", "Ô"),
    ("^", "u", "û"), ("^", "U", "Û"),
    ("^", "\\i", "î"),
    // Tilde
    ("~", "a", "ã"), ("~", "A", "Ã"),
    ("~", "n", "ñ"), ("~", "N", "Ñ"),
    ("~", "o", "õ"), ("~", "O", "Õ"),
    // Macron
    ("=", "a", "ā"), ("=", "A", "Ā"),
    ("=", "e", "ē"), ("=", "E", "Ē"),
    ("=", "i", "ī"), ("=", "I", "Ī"),
    ("=", "o", "ō"), ("=", "O", "Ō"),
    ("=", "u", "ū"), ("=", "U", "Ū"),
    // Dot above
    (".", "z", "ż"), (".", "Z", "Ż"),
    (".", "c", "ċ"), (".", "C", "Ċ"),
    (".", "e", "ė"), (".", "E", "Ė"),
    (".", "I", "İ"),
    // Cedilla
    ("c", "c", "ç"), ("c", "C", "Ç"),
    ("c", "s", "ş"), ("c", "S", "Ş"),
    // Caron
    ("v", "c", "č"), ("v", "C", "Č"),
    ("v", "s", "š"), ("v", "S", "Š"),
    ("v", "z", "ž"), ("v", "Z", "Ž"),
    ("v", "r", "ř"), ("v", "R", "Ř"),
    ("v", "n", "ň"), ("v", "N", "Ň"),
    ("v", "e", "ě"), ("v", "E", "Ě"),
    ("v", "d", "ď"), ("v", "D", "Ď"),
    ("v", "t", "ť"), ("v", "T", "Ť"),
    // Ring
    ("r", "a", "å"), ("r", "A", "Å"),
    ("r", "u", "ů"), ("r", "U", "Ů"),
    // Hungarian umlaut
    ("H", "o", "ő"), ("H", "O", "Ő"),
    ("H", "u", "ű"), ("H", "U", "Ű"),
    // Breve
    ("u", "a", "ă"), ("u", "A", "Ă"),
    ("u", "g", "ğ"), ("u", "G", "Ğ"),
    // Ogonek
    ("k", "a", "ą"), ("k", "A", "Ą"),
    ("k", "e", "ę"), ("k", "E", "Ę"),
];

/// Standalone letter commands: stroke, ligatures, ring-a and dotless i.
/// Longer names come first so the alternation prefers them.
const SYMBOL_TABLE: &[(&str, &str)] = &[
    ("ss", "ß"),
    ("ae", "æ"), ("AE", "Æ"),
    ("oe", "œ"), ("OE", "Œ"),
    ("aa", "å"), ("AA", "Å"),
    ("l", "ł"), ("L", "Ł"),
    ("o", "ø"), ("O", "Ø"),
    ("i", "ı"),
];

/// Surface forms of one accent entry, e.g. `\'e`, `\'{e}`, `{\'e}`, `{\'{e}}`
pub(crate) fn accent_forms(command: &str, base: &str) -> Vec<String> {
    let alphabetic = command.chars().all(|c| c.is_ascii_alphabetic());
    let bare = if alphabetic {
        format!("\\{command} {base}")
    } else {
        format!("\\{command}{base}")
    };
    let char_braced = format!("\\{command}{{{base}}}");
    vec![
        format!("{{{char_braced}}}"),
        format!("{{{bare}}}"),
        char_braced,
        bare,
    ]
}

lazy_static! {
    /// Every accent surface form, longest first
    static ref ACCENT_PATTERNS: Vec<(String, &'static str)> = {
        let mut patterns: Vec<(String, &'static str)> = ACCENT_TABLE
            .iter()
            .flat_map(|(command, base, unicode)| {
                accent_forms(command, base)
                    .into_iter()
                    .map(move |form| (form, *unicode))
            })
            .collect();
        patterns.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        patterns
    };

    static ref BRACED_SYMBOL_RE: Regex = Regex::new(&format!(
        r"\{{\\({})\}}",
        symbol_alternation()
    ))
    .unwrap();
    static ref BARE_SYMBOL_RE: Regex = Regex::new(&format!(
        r"\\({})(?:\{{\}}|\b)",
        symbol_alternation()
    ))
    .unwrap();

    static ref MATH_RE: Regex = Regex::new(r"\$(.*?)\$").unwrap();
    static ref MATH_PLACEHOLDER_RE: Regex = Regex::new("\u{E000}(\\d+)\u{E000}").unwrap();

    static ref TEXTBF_RE: Regex = Regex::new(r"\\textbf\{(.*?)\}").unwrap();
    static ref ORPHAN_TEXTBF_RE: Regex = Regex::new(r"\\textbf\s*").unwrap();
    static ref EMPH_RE: Regex = Regex::new(r"\\emph\{(.*?)\}").unwrap();
    static ref TEXTIT_RE: Regex = Regex::new(r"\\textit\{(.*?)\}").unwrap();
    static ref HREF_TEXT_RE: Regex = Regex::new(r"\\href\{(.*?)\}\{(.*?)\}").unwrap();
    static ref HREF_RE: Regex = Regex::new(r"\\href\{(.*?)\}").unwrap();
    static ref SUPERSCRIPT_RE: Regex = Regex::new(r"\^\{(.*?)\}").unwrap();
    static ref SUBSCRIPT_RE: Regex = Regex::new(r"_\{(.*?)\}").unwrap();
}

fn symbol_alternation() -> String {
    SYMBOL_TABLE
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join("|")
}

fn symbol_for(name: &str) -> &'static str {
    SYMBOL_TABLE
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, unicode)| *unicode)
        .unwrap_or_default()
}

/// Replace LaTeX accent commands with Unicode characters.
///
/// Handles bare (`\'e`), char-braced (`\'{e}`) and whole-braced (`{\'e}`)
/// forms. Text without LaTeX passes through unchanged.
pub fn replace_latex_accents(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }

    let mut result = text.to_string();
    for (pattern, unicode) in ACCENT_PATTERNS.iter() {
        if result.contains(pattern.as_str()) {
            result = result.replace(pattern.as_str(), unicode);
        }
    }

    let result = BRACED_SYMBOL_RE.replace_all(&result, |caps: &Captures| symbol_for(&caps[1]));
    BARE_SYMBOL_RE
        .replace_all(&result, |caps: &Captures| symbol_for(&caps[1]))
        .into_owned()
}

/// Convert LaTeX markup to Markdown
///
/// Math spans are set aside before any rewrite and restored verbatim last.
pub fn latex_to_markdown(text: &str) -> String {
    let mut math_blocks: Vec<String> = Vec::new();
    let protected = MATH_RE.replace_all(text, |caps: &Captures| {
        math_blocks.push(caps[1].to_string());
        format!("\u{E000}{}\u{E000}", math_blocks.len() - 1)
    });

    let text = replace_latex_accents(&protected);

    let text = TEXTBF_RE.replace_all(&text, "**${1}**");
    let text = ORPHAN_TEXTBF_RE.replace_all(&text, "");
    let text = EMPH_RE.replace_all(&text, "*${1}*");
    let text = TEXTIT_RE.replace_all(&text, "*${1}*");
    let text = HREF_TEXT_RE.replace_all(&text, "[${2}](${1})");
    let text = HREF_RE.replace_all(&text, "[${1}](${1})");

    let text = SUPERSCRIPT_RE.replace_all(&text, "<sup>${1}</sup>");
    let text = SUBSCRIPT_RE.replace_all(&text, "<sub>${1}</sub>");

    let text = strip_braces(&text);

    MATH_PLACEHOLDER_RE
        .replace_all(&text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| math_blocks.get(i))
                .map(|block| format!("${block}$"))
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Convert LaTeX to plain text, keeping the content of formatting commands
pub fn latex_to_text(text: &str) -> String {
    let text = replace_latex_accents(text);

    let text = TEXTBF_RE.replace_all(&text, "${1}");
    let text = ORPHAN_TEXTBF_RE.replace_all(&text, "");
    let text = EMPH_RE.replace_all(&text, "${1}");
    let text = TEXTIT_RE.replace_all(&text, "${1}");
    let text = HREF_TEXT_RE.replace_all(&text, "${2}");
    let text = HREF_RE.replace_all(&text, "${1}");
    let text = SUPERSCRIPT_RE.replace_all(&text, "${1}");
    let text = SUBSCRIPT_RE.replace_all(&text, "${1}");

    strip_braces(&text)
}

/// Remove every literal `{` and `}`
pub fn strip_braces(text: &str) -> String {
    text.chars().filter(|c| *c != '{' && *c != '}').collect()
}
