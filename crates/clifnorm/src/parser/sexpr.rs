//! S-expression reader for CLIF text

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{char, multispace1, not_line_ending},
    combinator::{map, value},
    multi::many0,
    sequence::{delimited, pair, terminated, tuple},
    IResult,
};

/// One node of the S-expression tree.
///
/// Positions are stored as the length of the input remaining at the node's
/// start and end, so they can be turned into offsets of the full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SExpr {
    Symbol { name: String, rest: usize },
    Quoted { text: String, rest: usize },
    List { items: Vec<SExpr>, start_rest: usize, end_rest: usize },
}

impl SExpr {
    /// Remaining input length at the node's start
    pub fn rest(&self) -> usize {
        match self {
            SExpr::Symbol { rest, .. } | SExpr::Quoted { rest, .. } => *rest,
            SExpr::List { start_rest, .. } => *start_rest,
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            SExpr::Symbol { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Text of a symbol or quoted string
    pub fn text(&self) -> Option<&str> {
        match self {
            SExpr::Symbol { name, .. } => Some(name),
            SExpr::Quoted { text, .. } => Some(text),
            SExpr::List { .. } => None,
        }
    }

    /// Source slice of this node within `input`
    pub fn source<'a>(&self, input: &'a str) -> &'a str {
        let start = input.len() - self.rest();
        let end = match self {
            SExpr::List { end_rest, .. } => input.len() - end_rest,
            SExpr::Symbol { name, .. } => start + name.len(),
            SExpr::Quoted { .. } => start,
        };
        input.get(start..end).unwrap_or("")
    }
}

/// Skip whitespace, `//` line comments and `/* */` block comments
pub fn skip(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), pair(tag("//"), not_line_ending)),
            value((), tuple((tag("/*"), take_until("*/"), tag("*/")))),
        ))),
    )(input)
}

fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')' && c != '\'' && c != '"'
}

fn symbol(input: &str) -> IResult<&str, SExpr> {
    let rest = input.len();
    map(take_while1(is_symbol_char), move |name: &str| SExpr::Symbol {
        name: name.to_string(),
        rest,
    })(input)
}

/// Quoted string with backslash escapes, delimited by `'` or `"`
fn quoted(input: &str) -> IResult<&str, SExpr> {
    let rest = input.len();
    let mut chars = input.char_indices();
    let delimiter = match chars.next() {
        Some((_, c)) if c == '\'' || c == '"' => c,
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Char,
            )))
        }
    };

    let mut text = String::new();
    let mut escaped = false;
    for (i, c) in chars {
        if escaped {
            text.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == delimiter {
            let end = i + c.len_utf8();
            return Ok((&input[end..], SExpr::Quoted { text, rest }));
        } else {
            text.push(c);
        }
    }

    // Unterminated string
    Err(nom::Err::Failure(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

fn list(input: &str) -> IResult<&str, SExpr> {
    let start_rest = input.len();
    let (input, items) = delimited(
        char('('),
        many0(delimited(skip, expr, skip)),
        tuple((skip, char(')'))),
    )(input)?;
    Ok((
        input,
        SExpr::List {
            items,
            start_rest,
            end_rest: input.len(),
        },
    ))
}

/// Parse one S-expression
pub fn expr(input: &str) -> IResult<&str, SExpr> {
    alt((list, quoted, symbol))(input)
}

/// Parse a sequence of top-level S-expressions
pub fn document(input: &str) -> IResult<&str, Vec<SExpr>> {
    let (input, _) = skip(input)?;
    many0(terminated(expr, skip))(input)
}
