//! Minimal C/C++ tokenizer
//!
//! Produces just enough structure to find launch configurations, split
//! their arguments and pick identifiers out of macro bodies. Whitespace and
//! comments are skipped; every token keeps its span in the input.

use hipify_api::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Number,
    /// String literal, including any encoding prefix and raw strings
    Str,
    Char,
    Punct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }

    pub fn is_punct(&self, source: &str, punct: &str) -> bool {
        self.kind == TokenKind::Punct && self.text(source) == punct
    }
}

const PUNCT3: [&str; 6] = ["<<<", ">>>", "<<=", ">>=", "...", "->*"];
const PUNCT2: [&str; 20] = [
    "::", "->", "++", "--", "<<", ">>", "<=", ">=", "==", "!=", "&&", "||", "+=", "-=", "*=",
    "/=", "%=", "&=", "|=", "^=",
];

/// Tokenize the whole input
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_range(source, Span::new(0, source.len()))
}

/// Tokenize `range` of the input; spans stay absolute
pub fn tokenize_range(source: &str, range: Span) -> Vec<Token> {
    let bytes = source.as_bytes();
    let end = range.end.min(bytes.len());
    let mut tokens = Vec::new();
    let mut i = range.start;

    while i < end {
        let c = bytes[i];

        if c.is_ascii_whitespace() || (c == b'\\' && matches!(bytes.get(i + 1), Some(b'\n' | b'\r'))) {
            i += 1;
            continue;
        }

        if c == b'/' && bytes.get(i + 1) == Some(&b'/') {
            while i < end && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }

        if c == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i += 2;
            while i < end && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                i += 1;
            }
            i = (i + 2).min(end);
            continue;
        }

        let start = i;
        let kind = if c == b'"' {
            i = skip_quoted(bytes, i, end, b'"');
            TokenKind::Str
        } else if c == b'\'' {
            i = skip_quoted(bytes, i, end, b'\'');
            TokenKind::Char
        } else if is_ident_start(c) {
            while i < end && is_ident_continue(bytes[i]) {
                i += 1;
            }
            // Encoding prefixes and raw strings: L"..", u8"..", R"(..)"
            let word = &source[start..i];
            match bytes.get(i) {
                Some(b'"') if is_raw_prefix(word) => {
                    i = skip_raw_string(source, i, end);
                    TokenKind::Str
                }
                Some(b'"') if is_encoding_prefix(word) => {
                    i = skip_quoted(bytes, i, end, b'"');
                    TokenKind::Str
                }
                Some(b'\'') if is_encoding_prefix(word) => {
                    i = skip_quoted(bytes, i, end, b'\'');
                    TokenKind::Char
                }
                _ => TokenKind::Identifier,
            }
        } else if c.is_ascii_digit() || (c == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)) {
            i += 1;
            while i < end {
                let b = bytes[i];
                if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b'\'' {
                    i += 1;
                } else if (b == b'+' || b == b'-') && matches!(bytes[i - 1], b'e' | b'E' | b'p' | b'P') {
                    i += 1;
                } else {
                    break;
                }
            }
            TokenKind::Number
        } else {
            let rest = &source[i..end];
            let len = PUNCT3
                .iter()
                .chain(PUNCT2.iter())
                .find(|p| rest.starts_with(**p))
                .map(|p| p.len())
                .unwrap_or_else(|| rest.chars().next().map_or(1, char::len_utf8));
            i += len;
            TokenKind::Punct
        };

        tokens.push(Token {
            kind,
            span: Span::new(start, i.min(end)),
        });
    }

    tokens
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c >= 0x80
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c >= 0x80
}

fn is_encoding_prefix(word: &str) -> bool {
    matches!(word, "L" | "u" | "U" | "u8")
}

fn is_raw_prefix(word: &str) -> bool {
    matches!(word, "R" | "LR" | "uR" | "UR" | "u8R")
}

/// Index just past a quoted literal starting at `i`; stops at an unescaped newline
fn skip_quoted(bytes: &[u8], mut i: usize, end: usize, quote: u8) -> usize {
    i += 1;
    while i < end {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    end
}

/// Index just past `"delim( ... )delim"` starting at the opening quote `i`
fn skip_raw_string(source: &str, i: usize, end: usize) -> usize {
    let body = &source[i + 1..end];
    let Some(open) = body.find('(') else {
        return end;
    };
    let closing = format!("){}\"", &body[..open]);
    match body[open..].find(&closing) {
        Some(at) => i + 1 + open + at + closing.len(),
        None => end,
    }
}

/// Index of the token closing the bracket opened at `open`
pub fn matching_close(source: &str, tokens: &[Token], open: usize) -> Option<usize> {
    let (left, right) = match tokens.get(open)?.text(source) {
        "(" => ("(", ")"),
        "[" => ("[", "]"),
        "{" => ("{", "}"),
        _ => return None,
    };
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        if token.is_punct(source, left) {
            depth += 1;
        } else if token.is_punct(source, right) {
            depth -= 1;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}
