//! Descriptor tokenization.
//!
//! This module turns a raw type descriptor string such as
//! `array<int, App\Entity\User>` or `DateTime<'Y-m-d', 'UTC'>` into a
//! recursive token tree: a [`TypeToken`] holding a name and an ordered
//! list of [`TokenParam`]s.  The tree is purely structural — it carries
//! no guarantees about arity or meaning; those are applied by the
//! resolver on top of this shape.
//!
//! # Grammar
//!
//! ```text
//! descriptor := type EOF
//! type       := name ( '<' param ( ',' param )* '>' )?
//! param      := type | string | list | ε
//! string     := '…' | "…"
//! list       := '[' ( string ( ',' string )* )? ']'
//! ```
//!
//! Names may be namespace-qualified with backslashes (`Doctrine\Common\
//! Collections\ArrayCollection`); a leading `\` is accepted and stripped.
//! Whitespace is permitted around names, commas, and brackets.  An empty
//! param slot (`DateTime<,'UTC'>`) is valid and yields
//! [`TokenParam::Empty`].

use std::fmt;

use crate::error::ParseError;

/// One node of the token tree: a type name plus its ordered parameters.
///
/// `params` is empty when the descriptor carried no `<…>` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeToken {
    pub name: String,
    pub params: Vec<TokenParam>,
}

/// A single parameter inside a `<…>` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenParam {
    /// A nested type, e.g. the `int` in `array<int>`.
    Type(TypeToken),
    /// A quoted string literal, e.g. the `'Y-m-d'` in `DateTime<'Y-m-d'>`.
    Literal(String),
    /// A bracketed list of string literals, e.g. `['Y-m-d', 'Y/m/d']`.
    List(Vec<String>),
    /// An omitted slot, e.g. the first param of `DateTime<, 'UTC'>`.
    Empty,
}

impl fmt::Display for TypeToken {
    /// Renders the token back to descriptor syntax, used for diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.params.is_empty() {
            write!(f, "<")?;
            for (i, param) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{param}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl fmt::Display for TokenParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenParam::Type(token) => write!(f, "{token}"),
            TokenParam::Literal(text) => write!(f, "'{text}'"),
            TokenParam::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{item}'")?;
                }
                write!(f, "]")
            }
            TokenParam::Empty => Ok(()),
        }
    }
}

/// Parse a non-empty descriptor string into a token tree.
///
/// Fails with [`ParseError`] on malformed syntax: empty name, unbalanced
/// brackets, unterminated string literal, or trailing garbage.
pub fn parse_descriptor(input: &str) -> Result<TypeToken, ParseError> {
    let mut parser = Parser { src: input, pos: 0 };
    parser.skip_ws();
    let token = parser.parse_type()?;
    parser.skip_ws();
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("unexpected trailing `{c}`")));
    }
    Ok(token)
}

/// Whether `c` may start a type name.
fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Whether `c` may continue a type name.  Backslash allows
/// namespace-qualified class names.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\\'
}

struct Parser<'a> {
    src: &'a str,
    /// Byte offset of the next unconsumed character.
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `expected` if it is next; returns whether it was consumed.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.pos, message)
    }

    fn parse_type(&mut self) -> Result<TypeToken, ParseError> {
        let name = self.parse_name()?;
        let mut params = Vec::new();
        self.skip_ws();
        if self.eat('<') {
            loop {
                params.push(self.parse_param()?);
                self.skip_ws();
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return match self.peek() {
                    Some(c) => Err(self.error(format!("expected `,` or `>`, found `{c}`"))),
                    None => Err(self.error("unbalanced `<`")),
                };
            }
        }
        Ok(TypeToken { name, params })
    }

    fn parse_name(&mut self) -> Result<String, ParseError> {
        self.skip_ws();
        // Fully-qualified prefix: `\Foo\Bar` and `Foo\Bar` name the same type.
        self.eat('\\');
        let start = self.pos;
        if !matches!(self.peek(), Some(c) if is_name_start(c)) {
            return Err(self.error("expected a type name"));
        }
        while matches!(self.peek(), Some(c) if is_name_char(c)) {
            self.bump();
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn parse_param(&mut self) -> Result<TokenParam, ParseError> {
        self.skip_ws();
        match self.peek() {
            Some('\'') | Some('"') => Ok(TokenParam::Literal(self.parse_string()?)),
            Some('[') => Ok(TokenParam::List(self.parse_list()?)),
            // Empty slot: leave the delimiter for the caller.
            Some(',') | Some('>') => Ok(TokenParam::Empty),
            Some('\\') => Ok(TokenParam::Type(self.parse_type()?)),
            Some(c) if is_name_start(c) => Ok(TokenParam::Type(self.parse_type()?)),
            Some(c) => Err(self.error(format!("unexpected `{c}` in parameter list"))),
            None => Err(self.error("unbalanced `<`")),
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let open_pos = self.pos;
        let quote = self.bump().ok_or_else(|| self.error("expected a string literal"))?;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let text = self.src[start..self.pos].to_string();
                self.bump();
                return Ok(text);
            }
            self.bump();
        }
        Err(ParseError::new(open_pos, "unterminated string literal"))
    }

    fn parse_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.bump(); // consume `[`
        let mut items = Vec::new();
        self.skip_ws();
        if self.eat(']') {
            return Ok(items);
        }
        loop {
            self.skip_ws();
            if !matches!(self.peek(), Some('\'') | Some('"')) {
                return Err(self.error("expected a string literal in list"));
            }
            items.push(self.parse_string()?);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            if self.eat(']') {
                return Ok(items);
            }
            return match self.peek() {
                Some(c) => Err(self.error(format!("expected `,` or `]`, found `{c}`"))),
                None => Err(self.error("unbalanced `[`")),
            };
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn name(n: &str) -> TypeToken {
        TypeToken {
            name: n.to_string(),
            params: Vec::new(),
        }
    }

    #[test]
    fn test_bare_name() {
        assert_eq!(parse_descriptor("int").unwrap(), name("int"));
        assert_eq!(parse_descriptor("  Foo  ").unwrap(), name("Foo"));
    }

    #[test]
    fn test_qualified_name_strips_leading_backslash() {
        assert_eq!(
            parse_descriptor("\\App\\Entity\\User").unwrap(),
            name("App\\Entity\\User")
        );
        assert_eq!(
            parse_descriptor("App\\Entity\\User").unwrap(),
            name("App\\Entity\\User")
        );
    }

    #[test]
    fn test_single_type_param() {
        assert_eq!(
            parse_descriptor("array<string>").unwrap(),
            TypeToken {
                name: "array".to_string(),
                params: vec![TokenParam::Type(name("string"))],
            }
        );
    }

    #[test]
    fn test_two_type_params_with_whitespace() {
        assert_eq!(
            parse_descriptor("array< int , Foo >").unwrap(),
            TypeToken {
                name: "array".to_string(),
                params: vec![
                    TokenParam::Type(name("int")),
                    TokenParam::Type(name("Foo")),
                ],
            }
        );
    }

    #[test]
    fn test_nested_type_param() {
        assert_eq!(
            parse_descriptor("array<int, array<string>>").unwrap(),
            TypeToken {
                name: "array".to_string(),
                params: vec![
                    TokenParam::Type(name("int")),
                    TokenParam::Type(TypeToken {
                        name: "array".to_string(),
                        params: vec![TokenParam::Type(name("string"))],
                    }),
                ],
            }
        );
    }

    #[test]
    fn test_string_literal_params() {
        assert_eq!(
            parse_descriptor("DateTime<'Y-m-d', \"UTC\">").unwrap(),
            TypeToken {
                name: "DateTime".to_string(),
                params: vec![
                    TokenParam::Literal("Y-m-d".to_string()),
                    TokenParam::Literal("UTC".to_string()),
                ],
            }
        );
    }

    #[test]
    fn test_empty_string_literal() {
        assert_eq!(
            parse_descriptor("DateTime<''>").unwrap().params,
            vec![TokenParam::Literal(String::new())]
        );
    }

    #[test]
    fn test_empty_param_slot() {
        assert_eq!(
            parse_descriptor("DateTime<, 'UTC'>").unwrap().params,
            vec![
                TokenParam::Empty,
                TokenParam::Literal("UTC".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_param() {
        assert_eq!(
            parse_descriptor("DateTime<'Y-m-d', 'UTC', ['Y-m-d', 'Y/m/d']>")
                .unwrap()
                .params[2],
            TokenParam::List(vec!["Y-m-d".to_string(), "Y/m/d".to_string()])
        );
    }

    #[test]
    fn test_empty_list_param() {
        assert_eq!(
            parse_descriptor("DateTime<'', '', []>").unwrap().params[2],
            TokenParam::List(Vec::new())
        );
    }

    #[test]
    fn test_error_empty_input() {
        assert!(parse_descriptor("").is_err());
        assert!(parse_descriptor("   ").is_err());
    }

    #[test]
    fn test_error_unbalanced_brackets() {
        assert!(parse_descriptor("array<int").is_err());
        assert!(parse_descriptor("array<int,").is_err());
        assert!(parse_descriptor("array int>").is_err());
    }

    #[test]
    fn test_error_unterminated_string() {
        let err = parse_descriptor("DateTime<'Y-m-d>").unwrap_err();
        assert!(
            err.to_string().contains("unterminated"),
            "Should report unterminated literal. Got: {err}"
        );
    }

    #[test]
    fn test_error_trailing_garbage() {
        assert!(parse_descriptor("array<int> extra").is_err());
        assert!(parse_descriptor("int>").is_err());
    }

    #[test]
    fn test_display_round_trips_syntax() {
        let token = parse_descriptor("array<int, App\\User>").unwrap();
        assert_eq!(token.to_string(), "array<int, App\\User>");

        let token = parse_descriptor("DateTime<'Y-m-d', , ['a', 'b']>").unwrap();
        assert_eq!(token.to_string(), "DateTime<'Y-m-d', , ['a', 'b']>");
    }
}
