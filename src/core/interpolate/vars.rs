// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `${NAME}` substitution.
//!
//! ```text
//! "hello ${NAME}"  + {NAME: world}  --> Ok("hello world")
//! "hello ${NOPE}"  + {}             --> Err(["NOPE"])
//! "cost $5"                          --> Ok("cost $5")      ($ without {)
//! "${not-a-name}"                    --> Ok("${not-a-name}") (not a placeholder)
//! ```

/// Rendering that stands for "no value" and is never accepted as a result.
const NO_VALUE: &str = "<no value>";

/// Returns true if `name` can appear inside a `${...}` placeholder.
fn is_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Splits `input` into literal text and placeholder names.
fn scan(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = &after[..end];
        if is_name(name) {
            if start > 0 {
                tokens.push(Token::Text(&rest[..start]));
            }
            tokens.push(Token::Name(name));
            rest = &after[end + 1..];
        } else {
            tokens.push(Token::Text(&rest[..start + 2]));
            rest = after;
        }
    }

    if !rest.is_empty() {
        tokens.push(Token::Text(rest));
    }
    tokens
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Name(&'a str),
}

/// Names referenced by `${NAME}` placeholders in `input`, in order.
pub(super) fn placeholders(input: &str) -> Vec<&str> {
    scan(input)
        .into_iter()
        .filter_map(|token| match token {
            Token::Name(name) => Some(name),
            Token::Text(_) => None,
        })
        .collect()
}

/// Replaces every `${NAME}` in `input` with `lookup(NAME)`.
///
/// # Errors
///
/// Returns the names `lookup` could not resolve. An empty rendering of a
/// non-empty input, or a rendering equal to `<no value>`, is reported the
/// same way with no names.
pub fn interpolate_vars<F>(input: &str, mut lookup: F) -> Result<String, Vec<String>>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut missing = Vec::new();

    for token in scan(input) {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Name(name) => match lookup(name) {
                Some(value) => out.push_str(&value),
                None => missing.push(name.to_string()),
            },
        }
    }

    if !missing.is_empty() || (out.is_empty() && !input.is_empty()) || out == NO_VALUE {
        return Err(missing);
    }
    Ok(out)
}

/// Like [`interpolate_vars`], returning `input` unchanged on any miss.
pub fn interpolate_vars_lenient<F>(input: &str, lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    interpolate_vars(input, lookup).unwrap_or_else(|_| input.to_string())
}
