//! Parser for the subset of CSS selectors a `target` attribute needs.
//!
//! Supported: type selectors, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`,
//! descendant and `>` child combinators, and `,` groups. Backslash escapes
//! work inside identifiers, so `[flow\:target]` names a namespaced attribute.

use super::DomError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorList {
    pub groups: Vec<Vec<SelectorPart>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
}

/// One compound step plus the combinator linking it to the step before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub combinator: Combinator,
    pub step: Compound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttrCondition {
    pub name: String,
    pub value: Option<String>,
}

pub(crate) fn parse(selector: &str) -> Result<SelectorList, DomError> {
    let unsupported = || DomError::UnsupportedSelector(selector.to_string());
    let chars: Vec<char> = selector.chars().collect();
    let mut cursor = Cursor { chars: &chars, pos: 0 };

    let mut groups = Vec::new();
    loop {
        groups.push(parse_group(&mut cursor).ok_or_else(unsupported)?);
        cursor.skip_ws();
        match cursor.peek() {
            None => break,
            Some(',') => cursor.pos += 1,
            Some(_) => return Err(unsupported()),
        }
    }

    Ok(SelectorList { groups })
}

struct Cursor<'a> {
    chars: &'a [char],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn ident(&mut self) -> Option<String> {
        let mut out = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\\' {
                self.pos += 1;
                out.push(self.bump()?);
            } else if ch.is_alphanumeric() || ch == '-' || ch == '_' {
                out.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }
        (!out.is_empty()).then_some(out)
    }
}

fn parse_group(cursor: &mut Cursor<'_>) -> Option<Vec<SelectorPart>> {
    let mut parts = Vec::new();
    cursor.skip_ws();
    let mut combinator = Combinator::Descendant;

    loop {
        let step = parse_compound(cursor)?;
        parts.push(SelectorPart { combinator, step });

        let had_ws = cursor.skip_ws();
        match cursor.peek() {
            None | Some(',') => return Some(parts),
            Some('>') => {
                cursor.pos += 1;
                cursor.skip_ws();
                combinator = Combinator::Child;
            }
            Some(_) if had_ws => combinator = Combinator::Descendant,
            Some(_) => return None,
        }
    }
}

fn parse_compound(cursor: &mut Cursor<'_>) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut any = false;

    if cursor.peek() == Some('*') {
        cursor.pos += 1;
        any = true;
    } else if let Some(tag) = cursor.ident() {
        compound.tag = Some(tag.to_ascii_lowercase());
        any = true;
    }

    loop {
        match cursor.peek() {
            Some('#') => {
                cursor.pos += 1;
                compound.id = Some(cursor.ident()?);
            }
            Some('.') => {
                cursor.pos += 1;
                compound.classes.push(cursor.ident()?);
            }
            Some('[') => {
                cursor.pos += 1;
                compound.attrs.push(parse_attr_condition(cursor)?);
            }
            _ => break,
        }
        any = true;
    }

    any.then_some(compound)
}

fn parse_attr_condition(cursor: &mut Cursor<'_>) -> Option<AttrCondition> {
    cursor.skip_ws();
    let name = cursor.ident()?.to_ascii_lowercase();
    cursor.skip_ws();

    let value = match cursor.bump()? {
        ']' => return Some(AttrCondition { name, value: None }),
        '=' => {
            cursor.skip_ws();
            match cursor.peek()? {
                quote @ ('"' | '\'') => {
                    cursor.pos += 1;
                    let mut out = String::new();
                    loop {
                        match cursor.bump()? {
                            ch if ch == quote => break,
                            '\\' => out.push(cursor.bump()?),
                            ch => out.push(ch),
                        }
                    }
                    out
                }
                _ => cursor.ident()?,
            }
        }
        _ => return None,
    };

    cursor.skip_ws();
    (cursor.bump()? == ']').then_some(AttrCondition {
        name,
        value: Some(value),
    })
}
