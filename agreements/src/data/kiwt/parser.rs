//! Filter expression parsing
//!
//! Parses a serialized filter expression into an alternating sequence of
//! items and boolean operators. Parenthesized groups become nested sequences.

use super::error::KiwtError;
use super::types::{BoolOp, Comparator, KiwtNode, KiwtTerm};

/// Maximum size of a filter expression in bytes (64KB)
const MAX_EXPRESSION_LENGTH: usize = 64 * 1024;

/// Maximum group nesting depth
const MAX_GROUP_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Open,
    Close,
    Op(BoolOp),
    Term(String),
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    position: usize,
}

impl Token {
    fn text(&self) -> String {
        match &self.kind {
            TokenKind::Open => "(".to_string(),
            TokenKind::Close => ")".to_string(),
            TokenKind::Op(op) => op.as_str().to_string(),
            TokenKind::Term(raw) => raw.clone(),
        }
    }
}

/// Parse a filter expression
///
/// Returns the top-level sequence: items at even positions, operators at odd
/// positions. Whitespace around tokens is insignificant.
pub fn parse(expr: &str) -> Result<Vec<KiwtNode>, KiwtError> {
    if expr.len() > MAX_EXPRESSION_LENGTH {
        return Err(KiwtError::TooLong {
            len: expr.len(),
            max: MAX_EXPRESSION_LENGTH,
        });
    }
    if expr.trim().is_empty() {
        return Err(KiwtError::Empty);
    }

    let tokens = tokenize(expr)?;
    tracing::trace!(tokens = tokens.len(), "Tokenized filter expression");

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: expr.len(),
    };
    parser.sequence(None, 0)
}

fn tokenize(input: &str) -> Result<Vec<Token>, KiwtError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let kind = match bytes[i] {
            b if b.is_ascii_whitespace() => {
                i += 1;
                continue;
            }
            b'(' => TokenKind::Open,
            b')' => TokenKind::Close,
            b'&' if bytes.get(i + 1) == Some(&b'&') => TokenKind::Op(BoolOp::And),
            b'|' if bytes.get(i + 1) == Some(&b'|') => TokenKind::Op(BoolOp::Or),
            _ => {
                let end = scan_term(input, i)?;
                tokens.push(Token {
                    kind: TokenKind::Term(input[i..end].trim_end().to_string()),
                    position: i,
                });
                i = end;
                continue;
            }
        };

        let width = match kind {
            TokenKind::Op(_) => 2,
            _ => 1,
        };
        tokens.push(Token { kind, position: i });
        i += width;
    }

    Ok(tokens)
}

/// Find the end of a term starting at `start`
///
/// A term runs until a parenthesis or boolean operator outside quotes.
fn scan_term(input: &str, start: usize) -> Result<usize, KiwtError> {
    let bytes = input.as_bytes();
    let mut i = start;
    let mut quote_start: Option<usize> = None;

    while i < bytes.len() {
        let b = bytes[i];
        if quote_start.is_some() {
            match b {
                b'\\' => i = (i + 2).min(bytes.len()),
                b'"' => {
                    quote_start = None;
                    i += 1;
                }
                _ => i += 1,
            }
            continue;
        }

        match b {
            b'"' => {
                quote_start = Some(i);
                i += 1;
            }
            b'(' | b')' => break,
            b'&' if bytes.get(i + 1) == Some(&b'&') => break,
            b'|' if bytes.get(i + 1) == Some(&b'|') => break,
            _ => i += 1,
        }
    }

    match quote_start {
        Some(position) => Err(KiwtError::UnterminatedQuote { position }),
        None => Ok(i),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    end: usize,
}

impl Parser<'_> {
    /// Parse `item (op item)*`, closing on `)` when inside a group
    fn sequence(&mut self, open: Option<usize>, depth: usize) -> Result<Vec<KiwtNode>, KiwtError> {
        if depth > MAX_GROUP_DEPTH {
            return Err(KiwtError::TooDeep {
                max: MAX_GROUP_DEPTH,
            });
        }

        let mut nodes = Vec::new();
        loop {
            nodes.push(self.item(depth)?);

            let Some(token) = self.tokens.get(self.pos) else {
                return match open {
                    Some(position) => Err(KiwtError::UnclosedGroup { position }),
                    None => Ok(nodes),
                };
            };

            match token.kind {
                TokenKind::Op(op) => {
                    self.pos += 1;
                    nodes.push(KiwtNode::Operator(op));
                }
                TokenKind::Close if open.is_some() => {
                    self.pos += 1;
                    return Ok(nodes);
                }
                _ => {
                    return Err(KiwtError::UnexpectedToken {
                        token: token.text(),
                        position: token.position,
                    });
                }
            }
        }
    }

    fn item(&mut self, depth: usize) -> Result<KiwtNode, KiwtError> {
        let Some(token) = self.tokens.get(self.pos) else {
            return Err(KiwtError::ExpectedItem { position: self.end });
        };
        self.pos += 1;

        match &token.kind {
            TokenKind::Open => Ok(KiwtNode::Group(
                self.sequence(Some(token.position), depth + 1)?,
            )),
            TokenKind::Term(raw) => Ok(KiwtNode::Term(parse_term(raw, token.position)?)),
            TokenKind::Close | TokenKind::Op(_) => Err(KiwtError::UnexpectedToken {
                token: token.text(),
                position: token.position,
            }),
        }
    }
}

/// Parse a single `path comparator [value]` term
fn parse_term(raw: &str, position: usize) -> Result<KiwtTerm, KiwtError> {
    if let Some((path, keyword)) = raw.rsplit_once(char::is_whitespace)
        && let Some(comparator) = Comparator::from_unary(keyword)
    {
        let path = path.trim();
        if path.is_empty() {
            return Err(KiwtError::MissingPath {
                term: raw.to_string(),
                position,
            });
        }
        return Ok(KiwtTerm::unary(path, comparator));
    }

    let Some((at, comparator)) = find_binary_comparator(raw) else {
        return Err(KiwtError::MissingComparator {
            term: raw.to_string(),
            position,
        });
    };

    let path = raw[..at].trim();
    if path.is_empty() {
        return Err(KiwtError::MissingPath {
            term: raw.to_string(),
            position,
        });
    }

    let value = unquote(raw[at + comparator.as_str().len()..].trim());
    Ok(KiwtTerm::binary(path, comparator, value))
}

/// Locate the first binary comparator in a term
fn find_binary_comparator(raw: &str) -> Option<(usize, Comparator)> {
    raw.char_indices().find_map(|(at, _)| {
        let rest = &raw[at..];
        Comparator::BINARY
            .into_iter()
            .find(|c| rest.starts_with(c.as_str()))
            .map(|c| (at, c))
    })
}

/// Strip surrounding quotes and resolve `\"` / `\\` escapes
fn unquote(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    else {
        return value.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
