//! Gitignore pattern parsing
//!
//! Parses one pattern line into a small AST:
//! - `!` prefix negates the rule
//! - a trailing `/` restricts the rule to directories
//! - a pattern without an inner `/` matches at any depth
//! - `**`, `*`, `?` and `[...]` wildcards
//!
//! The AST is rendered once into an anchored regex by [`Pattern::to_regex`].

use crate::core::model::DumpError;

/// One element inside a path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(char),
    /// `*`: any run of characters other than '/'
    AnyRun,
    /// `?`: exactly one character other than '/'
    AnyChar,
    Class(CharClass),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    pub negated: bool,
    pub items: Vec<ClassItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassItem {
    Char(char),
    Range(char, char),
}

/// One '/'-separated piece of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Glob(Vec<Token>),
    /// `**`: any number of whole segments
    DoubleStar,
}

/// A parsed pattern line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub source: String,
    pub negated: bool,
    pub dir_only: bool,
    pub segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern line.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Self>, DumpError> {
        let trimmed = strip_trailing_spaces(line);
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let (negated, body) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let dir_only = body.ends_with('/');
        let body = body.trim_end_matches('/');

        let (anchored, body) = match body.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (body.contains('/'), body),
        };

        if body.is_empty() {
            return Err(DumpError::invalid_pattern(line, "pattern matches nothing"));
        }

        let mut segments = Vec::new();
        if !anchored {
            segments.push(Segment::DoubleStar);
        }

        for raw in body.split('/').filter(|s| !s.is_empty()) {
            let segment = if raw == "**" {
                Segment::DoubleStar
            } else {
                Segment::Glob(tokenize(raw, line)?)
            };

            // `**/**` is the same as `**`
            if segment == Segment::DoubleStar && segments.last() == Some(&Segment::DoubleStar) {
                continue;
            }
            segments.push(segment);
        }

        Ok(Some(Self {
            source: line.to_string(),
            negated,
            dir_only,
            segments,
        }))
    }

    /// Render the segments as an anchored, dot-all regex over a '/'-separated path
    pub fn to_regex(&self) -> String {
        let last = self.segments.len().saturating_sub(1);
        // `.` must also cross newlines, which are legal in file names
        let mut out = String::from("(?s)^");
        let mut need_slash = false;

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::DoubleStar if self.segments.len() == 1 => out.push_str(".+"),
                Segment::DoubleStar if i == 0 => {
                    out.push_str("(?:.+/)?");
                    need_slash = false;
                }
                Segment::DoubleStar if i == last => out.push_str("/.+"),
                Segment::DoubleStar => {
                    out.push_str("(?:/.+)?");
                    need_slash = true;
                }
                Segment::Glob(tokens) => {
                    if need_slash {
                        out.push('/');
                    }
                    out.push_str(&render_glob(tokens));
                    need_slash = true;
                }
            }
        }

        out.push('$');
        out
    }
}

/// Drop trailing spaces unless escaped with a backslash
fn strip_trailing_spaces(line: &str) -> &str {
    let mut end = line.len();
    while line[..end].ends_with(' ') && !line[..end - 1].ends_with('\\') {
        end -= 1;
    }
    &line[..end]
}

fn tokenize(segment: &str, source: &str) -> Result<Vec<Token>, DumpError> {
    let mut tokens = Vec::new();
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => tokens.push(Token::Literal(escaped)),
                None => return Err(DumpError::invalid_pattern(source, "dangling escape")),
            },
            '*' => {
                if tokens.last() != Some(&Token::AnyRun) {
                    tokens.push(Token::AnyRun);
                }
            }
            '?' => tokens.push(Token::AnyChar),
            '[' => tokens.push(Token::Class(parse_class(&mut chars, source)?)),
            other => tokens.push(Token::Literal(other)),
        }
    }

    Ok(tokens)
}

fn parse_class<I>(chars: &mut std::iter::Peekable<I>, source: &str) -> Result<CharClass, DumpError>
where
    I: Iterator<Item = char>,
{
    let unterminated = || DumpError::invalid_pattern(source, "unterminated character class");

    let negated = matches!(chars.peek(), Some('!') | Some('^'));
    if negated {
        chars.next();
    }

    let mut items = Vec::new();
    let mut first = true;

    loop {
        let c = chars.next().ok_or_else(unterminated)?;
        let c = match c {
            ']' if !first => break,
            '\\' => chars.next().ok_or_else(unterminated)?,
            other => other,
        };
        first = false;

        if chars.peek() == Some(&'-') {
            chars.next();
            match chars.peek() {
                // `[a-]`: the dash is literal
                Some(']') | None => {
                    items.push(ClassItem::Char(c));
                    items.push(ClassItem::Char('-'));
                }
                Some(_) => {
                    let end = match chars.next().ok_or_else(unterminated)? {
                        '\\' => chars.next().ok_or_else(unterminated)?,
                        other => other,
                    };
                    if end < c {
                        return Err(DumpError::invalid_pattern(
                            source,
                            format!("invalid range {}-{}", c, end),
                        ));
                    }
                    items.push(ClassItem::Range(c, end));
                }
            }
        } else {
            items.push(ClassItem::Char(c));
        }
    }

    Ok(CharClass { negated, items })
}

fn render_glob(tokens: &[Token]) -> String {
    // A lone `*` segment must consume a whole, non-empty segment
    if tokens == [Token::AnyRun] {
        return "[^/]+".to_string();
    }

    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Literal(c) => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            Token::AnyRun => out.push_str("[^/]*"),
            Token::AnyChar => out.push_str("[^/]"),
            Token::Class(class) => out.push_str(&render_class(class)),
        }
    }
    out
}

fn render_class(class: &CharClass) -> String {
    let mut items = String::new();
    for item in &class.items {
        match *item {
            ClassItem::Char(c) => push_class_char(&mut items, c),
            ClassItem::Range(a, b) => {
                push_class_char(&mut items, a);
                items.push('-');
                push_class_char(&mut items, b);
            }
        }
    }

    // Classes never match the separator
    if class.negated {
        format!("[^/{}]", items)
    } else {
        format!("[{}&&[^/]]", items)
    }
}

fn push_class_char(out: &mut String, c: char) {
    if matches!(c, '\\' | '[' | ']' | '^' | '-' | '&' | '~') {
        out.push('\\');
    }
    out.push(c);
}
