//! CUDA syntax neutralization
//!
//! tree-sitter-cpp knows nothing about execution-space qualifiers or the
//! `<<<...>>>` launch configuration. Both are overwritten with spaces before
//! parsing, and recorded here so the visitor can put them back into the
//! picture. Lengths and newlines are preserved, so every byte offset in the
//! parsed text is also an offset into the original source.

use crate::lexer::{matching_close, Token, TokenKind};
use hipify_api::{Captured, Span};

/// CUDA declaration qualifiers removed before parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Global,
    Device,
    Host,
    Shared,
    Constant,
    Managed,
    ForceInline,
    NoInline,
    Restrict,
    LaunchBounds,
}

impl Qualifier {
    fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "__global__" => Qualifier::Global,
            "__device__" => Qualifier::Device,
            "__host__" => Qualifier::Host,
            "__shared__" => Qualifier::Shared,
            "__constant__" => Qualifier::Constant,
            "__managed__" => Qualifier::Managed,
            "__forceinline__" => Qualifier::ForceInline,
            "__noinline__" => Qualifier::NoInline,
            "__restrict__" => Qualifier::Restrict,
            "__launch_bounds__" => Qualifier::LaunchBounds,
            _ => return None,
        })
    }
}

/// A blanked qualifier and where it was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifierSite {
    pub kind: Qualifier,
    pub span: Span,
}

/// A blanked `<<<...>>>` and its comma separated arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// From the first `<` of `<<<` to the last `>` of `>>>`
    pub span: Span,
    pub args: Vec<Captured>,
}

/// Parser-ready text and what was taken out of it
#[derive(Debug, Clone)]
pub struct NeutralizedSource {
    pub code: String,
    /// Ordered by position
    pub qualifiers: Vec<QualifierSite>,
    /// Ordered by position
    pub launches: Vec<LaunchConfig>,
}

impl NeutralizedSource {
    /// Qualifiers written in `range`
    pub fn qualifiers_in(&self, range: Span) -> impl Iterator<Item = Qualifier> + '_ {
        self.qualifiers
            .iter()
            .filter(move |q| q.span.start >= range.start && q.span.end <= range.end)
            .map(|q| q.kind)
    }

    /// Launch configuration lying within `range`
    pub fn launch_in(&self, range: Span) -> Option<&LaunchConfig> {
        self.launches
            .iter()
            .find(|l| l.span.start >= range.start && l.span.end <= range.end)
    }
}

/// Blank CUDA-only syntax out of `source`
pub fn neutralize(source: &str, tokens: &[Token]) -> NeutralizedSource {
    let mut code = source.to_string();
    let mut qualifiers = Vec::new();
    let mut launches = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];

        if token.kind == TokenKind::Identifier {
            if let Some(kind) = Qualifier::from_keyword(token.text(source)) {
                let mut span = token.span;
                // __launch_bounds__(max_threads, min_blocks)
                if kind == Qualifier::LaunchBounds
                    && tokens.get(i + 1).is_some_and(|t| t.is_punct(source, "("))
                {
                    if let Some(close) = matching_close(source, tokens, i + 1) {
                        span = Span::new(token.span.start, tokens[close].span.end);
                        i = close;
                    }
                }
                blank(&mut code, span);
                qualifiers.push(QualifierSite { kind, span });
            }
        } else if token.is_punct(source, "<<<") {
            if let Some((close, launch)) = launch_config(source, tokens, i) {
                blank(&mut code, launch.span);
                launches.push(launch);
                i = close;
            }
        }

        i += 1;
    }

    NeutralizedSource {
        code,
        qualifiers,
        launches,
    }
}

/// Parse the launch configuration opened at `tokens[open]`
fn launch_config(source: &str, tokens: &[Token], open: usize) -> Option<(usize, LaunchConfig)> {
    let mut depth = 0usize;
    let mut args = Vec::new();
    let mut arg_start: Option<Span> = None;
    let mut arg_end = 0;

    for (idx, token) in tokens.iter().enumerate().skip(open + 1) {
        let text = token.text(source);
        if token.kind == TokenKind::Punct {
            match text {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => {
                    if depth == 0 {
                        return None;
                    }
                    depth -= 1;
                }
                ";" => return None,
                ">>>" if depth == 0 => {
                    if let Some(first) = arg_start {
                        args.push(capture(source, first.start, arg_end));
                    }
                    let span = Span::new(tokens[open].span.start, token.span.end);
                    return Some((idx, LaunchConfig { span, args }));
                }
                "," if depth == 0 => {
                    if let Some(first) = arg_start.take() {
                        args.push(capture(source, first.start, arg_end));
                    }
                    continue;
                }
                _ => {}
            }
        }
        if arg_start.is_none() {
            arg_start = Some(token.span);
        }
        arg_end = token.span.end;
    }

    None
}

fn capture(source: &str, start: usize, end: usize) -> Captured {
    Captured::new(Span::new(start, end), &source[start..end])
}

/// Overwrite `span` with spaces, keeping line breaks and byte length
fn blank(code: &mut String, span: Span) {
    let replacement: String = code[span.start..span.end]
        .chars()
        .map(|c| match c {
            '\n' | '\r' => c.to_string(),
            _ => " ".repeat(c.len_utf8()),
        })
        .collect();
    code.replace_range(span.start..span.end, &replacement);
}
