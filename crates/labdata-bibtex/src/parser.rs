//! BibTeX parser implementation using nom
//!
//! Handles:
//! - @string definitions (month abbreviations are predefined)
//! - @preamble declarations
//! - @comment sections and `%` line comments
//! - Entries delimited by braces or parentheses
//! - Braced, quoted, numeric and macro field values
//! - String concatenation with #
//! - Nested braces in field values
//!
//! Malformed entries are recorded as [`SyntaxError`]s and parsing resumes at
//! the next `@`. [`parse_strict`] turns the first recorded error into a hard
//! failure.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::map,
    IResult,
};
use std::collections::HashMap;

use super::entry::{BibEntry, EntryType};

/// Months predefined by every BibTeX style
const MONTH_MACROS: [(&str, &str); 12] = [
    ("jan", "January"),
    ("feb", "February"),
    ("mar", "March"),
    ("apr", "April"),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "August"),
    ("sep", "September"),
    ("oct", "October"),
    ("nov", "November"),
    ("dec", "December"),
];

/// A recoverable syntax problem found while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: u32,
    pub message: String,
}

/// Result of parsing a BibTeX document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bibliography {
    pub entries: Vec<BibEntry>,
    pub preambles: Vec<String>,
    /// User-defined @string macros, keyed lowercase
    pub strings: HashMap<String, String>,
    pub errors: Vec<SyntaxError>,
}

/// Error returned by [`parse_strict`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Syntax { line: u32, message: String },
}

/// Parse a BibTeX document, collecting syntax errors instead of failing
pub fn parse(input: &str) -> Bibliography {
    let mut result = Bibliography::default();
    let mut macros: HashMap<String, String> = MONTH_MACROS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let mut remaining = input;

    while !remaining.is_empty() {
        remaining = skip_whitespace_and_comments(remaining);
        if remaining.is_empty() {
            break;
        }

        if !remaining.starts_with('@') {
            // Free text between entries is an implicit comment
            match remaining.find('@') {
                Some(pos) => {
                    remaining = &remaining[pos..];
                    continue;
                }
                None => break,
            }
        }

        let line = line_of(input, remaining);
        match parse_at_entry(remaining, &macros) {
            Ok((rest, at_entry)) => {
                match at_entry {
                    AtEntry::Entry(mut entry) => {
                        entry.line = line;
                        result.entries.push(entry);
                    }
                    AtEntry::String(key, value) => {
                        let key = key.to_lowercase();
                        macros.insert(key.clone(), value.clone());
                        result.strings.insert(key, value);
                    }
                    AtEntry::Preamble(text) => result.preambles.push(text),
                    AtEntry::Comment => {}
                }
                remaining = rest;
            }
            Err(_) => {
                result.errors.push(SyntaxError {
                    line,
                    message: format!("failed to parse entry `{}`", entry_head(remaining)),
                });
                // Resume at the next @ or stop
                match remaining[1..].find('@') {
                    Some(pos) => remaining = &remaining[pos + 1..],
                    None => break,
                }
            }
        }
    }

    result
}

/// Parse a BibTeX document, failing on the first syntax error
pub fn parse_strict(input: &str) -> Result<Bibliography, ParseError> {
    let mut result = parse(input);
    if result.errors.is_empty() {
        Ok(result)
    } else {
        let first = result.errors.remove(0);
        Err(ParseError::Syntax {
            line: first.line,
            message: first.message,
        })
    }
}

enum AtEntry {
    Entry(BibEntry),
    String(String, String),
    Preamble(String),
    Comment,
}

/// 1-based line number of `rest` inside `input`
fn line_of(input: &str, rest: &str) -> u32 {
    let offset = input.len() - rest.len();
    input[..offset].matches('\n').count() as u32 + 1
}

/// First line of an entry, truncated, for error messages
fn entry_head(input: &str) -> String {
    let line = input.lines().next().unwrap_or_default().trim();
    line.chars().take(60).collect()
}

fn skip_whitespace_and_comments(input: &str) -> &str {
    let mut rest = input;
    loop {
        rest = rest.trim_start();
        if rest.starts_with('%') {
            rest = match rest.find('\n') {
                Some(pos) => &rest[pos + 1..],
                None => "",
            };
        } else {
            return rest;
        }
    }
}

fn parse_at_entry<'a>(
    input: &'a str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, AtEntry> {
    let (rest, _) = char('@')(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, entry_type) = take_while1(|c: char| c.is_ascii_alphanumeric())(rest)?;

    match entry_type.to_lowercase().as_str() {
        "string" => {
            let (rest, (key, value)) = parse_string_definition(rest, macros)?;
            Ok((rest, AtEntry::String(key, value)))
        }
        "preamble" => {
            let (rest, text) = parse_preamble(rest, macros)?;
            Ok((rest, AtEntry::Preamble(text)))
        }
        "comment" => {
            let (rest, _) = parse_comment_body(rest)?;
            Ok((rest, AtEntry::Comment))
        }
        _ => {
            let (rest, entry) = parse_entry_body(rest, entry_type, macros)?;
            Ok((rest, AtEntry::Entry(entry)))
        }
    }
}

/// Opening delimiter of an @-block, returning the matching closer
fn open_delimiter(input: &str) -> IResult<&str, char> {
    let (rest, _) = multispace0(input)?;
    let (rest, open) = alt((char('{'), char('(')))(rest)?;
    Ok((rest, if open == '{' { '}' } else { ')' }))
}

fn parse_string_definition<'a>(
    input: &'a str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, (String, String)> {
    let (rest, close) = open_delimiter(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, key) = take_while1(is_identifier_char)(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, value) = parse_field_value(rest, macros)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char(close)(rest)?;

    Ok((rest, (key.to_string(), value)))
}

fn parse_preamble<'a>(
    input: &'a str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, String> {
    let (rest, close) = open_delimiter(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, value) = parse_field_value(rest, macros)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char(close)(rest)?;

    Ok((rest, value))
}

/// Skip a @comment body: a braced group, or the rest of the line
fn parse_comment_body(input: &str) -> IResult<&str, ()> {
    let (rest, _) = multispace0(input)?;
    if rest.starts_with('{') {
        let (rest, _) = parse_braced_content(rest)?;
        Ok((rest, ()))
    } else {
        let pos = rest.find('\n').unwrap_or(rest.len());
        Ok((&rest[pos..], ()))
    }
}

fn parse_entry_body<'a>(
    input: &'a str,
    entry_type: &str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, BibEntry> {
    let (rest, close) = open_delimiter(input)?;
    let (rest, _) = multispace0(rest)?;

    let (rest, cite_key) = take_while1(is_cite_key_char)(rest)?;
    let (rest, _) = multispace0(rest)?;

    // An entry with no fields may close right after the key
    let (rest, fields) = match rest.strip_prefix(',') {
        Some(after_comma) => parse_fields(after_comma, close, macros)?,
        None => (rest, Vec::new()),
    };

    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char(close)(rest)?;

    let mut entry = BibEntry::new(cite_key, EntryType::parse(entry_type));
    for (key, value) in fields {
        entry.add_field(key, value);
    }

    Ok((rest, entry))
}

fn parse_fields<'a>(
    input: &'a str,
    close: char,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, Vec<(String, String)>> {
    let mut fields = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;
        if rest.starts_with(close) {
            return Ok((rest, fields));
        }

        let (rest, field) = parse_single_field(rest, macros)?;
        fields.push(field);

        let (rest, _) = multispace0(rest)?;
        remaining = rest.strip_prefix(',').unwrap_or(rest);
        if remaining.len() == rest.len() && !remaining.starts_with(close) {
            // Neither a separator nor the end of the entry
            return Err(nom::Err::Error(nom::error::Error::new(
                remaining,
                nom::error::ErrorKind::Char,
            )));
        }
    }
}

fn parse_single_field<'a>(
    input: &'a str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, (String, String)> {
    let (rest, _) = multispace0(input)?;
    let (rest, key) = take_while1(is_identifier_char)(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, value) = parse_field_value(rest, macros)?;

    Ok((rest, (key.to_string(), value)))
}

/// Parse a field value (braced, quoted, number, or macro reference),
/// following `#` concatenations
fn parse_field_value<'a>(
    input: &'a str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, String> {
    let mut result = String::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;

        let (rest, part) = alt((
            parse_braced_value,
            parse_quoted_value,
            map(take_while1(|c: char| c.is_ascii_digit()), |s: &str| {
                s.to_string()
            }),
            map(take_while1(is_identifier_char), |s: &str| {
                macros
                    .get(&s.to_lowercase())
                    .cloned()
                    .unwrap_or_else(|| s.to_string())
            }),
        ))(rest)?;

        result.push_str(&part);

        let (rest, _) = multispace0(rest)?;
        match rest.strip_prefix('#') {
            Some(stripped) => remaining = stripped,
            None => return Ok((rest, result)),
        }
    }
}

/// Parse a braced value, dropping the outer braces
fn parse_braced_value(input: &str) -> IResult<&str, String> {
    let (rest, content) = parse_braced_content(input)?;
    let inner = &content[1..content.len() - 1];
    Ok((rest, inner.to_string()))
}

/// Parse braced content including nested braces
fn parse_braced_content(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('{') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    }

    let mut depth = 0usize;
    let mut pos = 0;
    let bytes = input.as_bytes();

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[pos + 1..], &input[..pos + 1]));
                }
            }
            _ => {}
        }
        pos += 1;
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

/// Parse a quoted value "content"; quotes inside braces do not terminate it
fn parse_quoted_value(input: &str) -> IResult<&str, String> {
    if !input.starts_with('"') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    }

    let mut brace_depth = 0usize;
    let mut escaped = false;

    for (pos, c) in input.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => brace_depth += 1,
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '"' if brace_depth == 0 => {
                return Ok((&input[pos + 1..], input[1..pos].to_string()));
            }
            _ => {}
        }
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == ':' || c == '.'
}

fn is_cite_key_char(c: char) -> bool {
    c.is_alphanumeric() || "_-:./+".contains(c)
}
