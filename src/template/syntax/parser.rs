//! Two-stage template parser.
//!
//! The source is first scanned into a flat list of segments: literal text
//! and `{{...}}` tags, each tag annotated with its line and column. The
//! flat list is then structured into a [`Node`] tree by matching section
//! open and close tags recursively.
use super::node::{Node, Target};

use std::iter::Peekable;
use thiserror::Error;

/// Parse failure, positioned at the offending tag.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} (line {line}, column {column})")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    fn new(message: impl ToString, line: usize, column: usize) -> Self {
        Self {
            message: message.to_string(),
            line,
            column,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Tag(Tag),
}

#[derive(Debug, Clone, PartialEq)]
struct Tag {
    kind: TagKind,
    line: usize,
    column: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum TagKind {
    Variable { target: Target, escape: bool },
    SectionOpen(String),
    InvertedOpen(String),
    SectionClose(String),
    Partial(String),
    Comment,
}

/// Parse template source into a node tree.
pub fn parse(source: &str) -> Result<Vec<Node>, SyntaxError> {
    let segments = scan(source)?;
    let mut iter = segments.into_iter().peekable();
    let nodes = structure(&mut iter, None)?;

    Ok(nodes)
}

/// Scan the source into text and tag segments.
fn scan(source: &str) -> Result<Vec<Segment>, SyntaxError> {
    let chars = source.chars().collect::<Vec<_>>();
    let mut segments = vec![];
    let mut text = String::new();

    let mut i = 0;
    let mut line = 1;
    let mut column = 1;

    while i < chars.len() {
        if chars[i] == '{' && chars.get(i + 1) == Some(&'{') {
            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }

            let tag_line = line;
            let tag_column = column;

            let triple = chars.get(i + 2) == Some(&'{');
            let open_len = if triple { 3 } else { 2 };
            let close: &[char] = if triple { &['}', '}', '}'] } else { &['}', '}'] };

            i += open_len;
            column += open_len;

            let mut content = String::new();
            loop {
                if chars[i..].starts_with(close) {
                    i += close.len();
                    column += close.len();
                    break;
                }

                match chars.get(i) {
                    Some(&c) => {
                        content.push(c);
                        if c == '\n' {
                            line += 1;
                            column = 1;
                        } else {
                            column += 1;
                        }
                        i += 1;
                    }

                    None => {
                        return Err(SyntaxError::new("unclosed tag", tag_line, tag_column));
                    }
                }
            }

            let kind = tag_kind(&content, triple, tag_line, tag_column)?;
            segments.push(Segment::Tag(Tag {
                kind,
                line: tag_line,
                column: tag_column,
            }));
        } else {
            let c = chars[i];
            text.push(c);
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
            i += 1;
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }

    Ok(segments)
}

/// Classify tag content by its leading sigil.
fn tag_kind(content: &str, triple: bool, line: usize, column: usize) -> Result<TagKind, SyntaxError> {
    let content = content.trim();

    let (sigil, rest) = match content.chars().next() {
        Some(sigil @ ('#' | '^' | '/' | '>' | '!' | '&')) => (Some(sigil), content[1..].trim()),
        Some(_) => (None, content),
        None => return Err(SyntaxError::new("empty tag", line, column)),
    };

    if sigil != Some('!') && rest.is_empty() {
        return Err(SyntaxError::new("tag names nothing", line, column));
    }

    Ok(match sigil {
        Some('#') => TagKind::SectionOpen(rest.to_string()),
        Some('^') => TagKind::InvertedOpen(rest.to_string()),
        Some('/') => TagKind::SectionClose(rest.to_string()),
        Some('>') => TagKind::Partial(rest.to_string()),
        Some('!') => TagKind::Comment,
        Some('&') => TagKind::Variable {
            target: target(rest, line, column)?,
            escape: false,
        },
        _ => TagKind::Variable {
            target: target(rest, line, column)?,
            escape: !triple,
        },
    })
}

/// Parse a variable tag body: a dotted path, or `helper(path)`.
fn target(content: &str, line: usize, column: usize) -> Result<Target, SyntaxError> {
    if let Some(open) = content.find('(') {
        let helper = content[..open].trim();
        let rest = &content[open + 1..];

        let arg = match rest.strip_suffix(')') {
            Some(arg) => arg.trim(),
            None => {
                return Err(SyntaxError::new(
                    "helper call is missing a closing parenthesis",
                    line,
                    column,
                ))
            }
        };

        if helper.is_empty() || arg.is_empty() {
            return Err(SyntaxError::new("malformed helper call", line, column));
        }

        Ok(Target::Call {
            helper: helper.to_string(),
            arg: arg.to_string(),
        })
    } else {
        Ok(Target::Path(content.to_string()))
    }
}

/// Build the node tree, recursing for each section open tag. `open` is the
/// section tag we are currently inside of, if any.
fn structure(
    iter: &mut Peekable<std::vec::IntoIter<Segment>>,
    open: Option<&Tag>,
) -> Result<Vec<Node>, SyntaxError> {
    let mut nodes = vec![];

    while let Some(segment) = iter.next() {
        match segment {
            Segment::Text(text) => nodes.push(Node::Text(text)),

            Segment::Tag(tag) => match tag.kind {
                TagKind::Variable { ref target, escape } => nodes.push(Node::Variable {
                    target: target.clone(),
                    escape,
                }),

                TagKind::Partial(ref name) => nodes.push(Node::Partial(name.clone())),

                TagKind::Comment => nodes.push(Node::Comment),

                TagKind::SectionOpen(ref name) => {
                    let name = name.clone();
                    let children = structure(iter, Some(&tag))?;
                    nodes.push(Node::Section {
                        name,
                        nodes: children,
                    });
                }

                TagKind::InvertedOpen(ref name) => {
                    let name = name.clone();
                    let children = structure(iter, Some(&tag))?;
                    nodes.push(Node::Inverted {
                        name,
                        nodes: children,
                    });
                }

                TagKind::SectionClose(ref name) => match open.map(|tag| &tag.kind) {
                    Some(TagKind::SectionOpen(open_name))
                    | Some(TagKind::InvertedOpen(open_name)) => {
                        if open_name == name {
                            return Ok(nodes);
                        }

                        return Err(SyntaxError::new(
                            format!(
                                "closing tag \"{}\" does not match open section \"{}\"",
                                name, open_name
                            ),
                            tag.line,
                            tag.column,
                        ));
                    }

                    _ => {
                        return Err(SyntaxError::new(
                            format!("closing tag \"{}\" has no matching open section", name),
                            tag.line,
                            tag.column,
                        ));
                    }
                },
            },
        }
    }

    if let Some(tag) = open {
        let name = match &tag.kind {
            TagKind::SectionOpen(name) | TagKind::InvertedOpen(name) => name.as_str(),
            _ => "",
        };

        return Err(SyntaxError::new(
            format!("section \"{}\" is never closed", name),
            tag.line,
            tag.column,
        ));
    }

    Ok(nodes)
}
