//! ApiDef text-format parser.
//!
//! Documentation overrides are written in protobuf text format, one or more
//! `op { ... }` blocks per file:
//!
//! ```text
//! op {
//!   graph_op_name: "Add"
//!   in_arg { name: "x" description: "First operand." }
//!   summary: "Returns x + y element-wise."
//!   description: <<END
//! Supports broadcasting.
//! END
//! }
//! ```
//!
//! The parser understands quoted strings (with C-style and octal escapes,
//! adjacent literals are concatenated), `<<TAG` heredocs, nested messages,
//! `[a, b]` lists and `#` comments. Fields that carry no documentation
//! (`endpoint`, `visibility`, `arg_order`, ...) are parsed and dropped.

use crate::api_def::{ApiDef, ArgDoc, AttrDoc};
use crate::error::ParseError;

/// Parses every `op` block in an ApiDef text document.
///
/// # Arguments
/// * `text` - Text-format document
///
/// # Returns
/// The documentation entries in document order.
///
/// # Errors
/// Returns `ParseError` if the text is malformed or an `op` block lacks a
/// `graph_op_name`.
pub fn parse_api_defs(text: &str) -> Result<Vec<ApiDef>, ParseError> {
    let mut parser = Parser::new(text)?;
    let fields = parser.parse_fields(false)?;

    fields
        .into_iter()
        .filter(|f| f.name == "op")
        .filter_map(|f| match f.value {
            Value::Message(body) => Some(api_def_from_fields(body, f.line)),
            Value::Scalar(_) => None,
        })
        .collect()
}

/// A parsed `name: value` or `name { ... }` entry.
#[derive(Debug, Clone)]
struct Field {
    name: String,
    value: Value,
    line: usize,
}

#[derive(Debug, Clone)]
enum Value {
    Scalar(String),
    Message(Vec<Field>),
}

impl Field {
    fn scalar(&self) -> Option<&str> {
        match &self.value {
            Value::Scalar(s) => Some(s),
            Value::Message(_) => None,
        }
    }
}

fn api_def_from_fields(fields: Vec<Field>, line: usize) -> Result<ApiDef, ParseError> {
    let mut api = ApiDef::default();
    let mut has_name = false;

    for field in fields {
        match (field.name.as_str(), field.value) {
            ("graph_op_name", Value::Scalar(s)) => {
                api.graph_op_name = s;
                has_name = true;
            }
            ("summary", Value::Scalar(s)) => api.summary = s,
            ("description", Value::Scalar(s)) => api.description = s,
            ("in_arg", Value::Message(body)) => {
                let (name, description) = name_and_description(&body);
                api.in_arg.push(ArgDoc { name, description });
            }
            ("out_arg", Value::Message(body)) => {
                let (name, description) = name_and_description(&body);
                api.out_arg.push(ArgDoc { name, description });
            }
            ("attr", Value::Message(body)) => {
                let (name, description) = name_and_description(&body);
                api.attr.push(AttrDoc { name, description });
            }
            _ => {}
        }
    }

    if !has_name {
        return Err(ParseError::MissingOpName { line });
    }

    Ok(api)
}

fn name_and_description(fields: &[Field]) -> (String, String) {
    let get = |key: &str| {
        fields
            .iter()
            .filter(|f| f.name == key)
            .find_map(Field::scalar)
            .unwrap_or_default()
            .to_string()
    };
    (get("name"), get("description"))
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Colon,
    Comma,
    Semicolon,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::Ident(s) => format!("identifier '{s}'"),
            Self::Str(_) => "string".to_string(),
            Self::Colon => "':'".to_string(),
            Self::Comma => "','".to_string(),
            Self::Semicolon => "';'".to_string(),
            Self::LBrace => "'{'".to_string(),
            Self::RBrace => "'}'".to_string(),
            Self::LBracket => "'['".to_string(),
            Self::RBracket => "']'".to_string(),
            Self::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    line: usize,
    column: usize,
}

/// Character-level tokenizer tracking line and column.
struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.text[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn tokenize(mut self) -> Result<Vec<Spanned>, ParseError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia();
            let (line, column) = (self.line, self.column);
            let Some(c) = self.peek() else {
                tokens.push(Spanned {
                    token: Token::Eof,
                    line,
                    column,
                });
                break;
            };

            let token = match c {
                ':' | ',' | ';' | '{' | '}' | '[' | ']' => {
                    self.bump();
                    match c {
                        ':' => Token::Colon,
                        ',' => Token::Comma,
                        ';' => Token::Semicolon,
                        '{' => Token::LBrace,
                        '}' => Token::RBrace,
                        '[' => Token::LBracket,
                        _ => Token::RBracket,
                    }
                }
                '"' | '\'' => Token::Str(self.read_string(c)?),
                '<' if self.peek_second() == Some('<') => Token::Str(self.read_heredoc()?),
                c if is_ident_char(c) => Token::Ident(self.read_ident()),
                other => {
                    return Err(ParseError::unexpected(
                        line,
                        column,
                        format!("character '{other}'"),
                        "a field, value or delimiter",
                    ));
                }
            };

            tokens.push(Spanned {
                token,
                line,
                column,
            });
        }

        Ok(tokens)
    }

    fn read_ident(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        self.text[start..self.pos].to_string()
    }

    fn read_string(&mut self, quote: char) -> Result<String, ParseError> {
        let start_line = self.line;
        self.bump();
        let mut bytes = Vec::new();

        loop {
            let c = self.bump().ok_or(ParseError::Unterminated {
                line: start_line,
                kind: "string",
            })?;
            match c {
                '\n' => {
                    return Err(ParseError::Unterminated {
                        line: start_line,
                        kind: "string",
                    });
                }
                '\\' => self.read_escape(&mut bytes)?,
                c if c == quote => break,
                c => {
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            }
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_escape(&mut self, bytes: &mut Vec<u8>) -> Result<(), ParseError> {
        let line = self.line;
        let c = self.bump().ok_or(ParseError::Unterminated {
            line,
            kind: "string",
        })?;

        let byte = match c {
            'n' => b'\n',
            't' => b'\t',
            'r' => b'\r',
            'a' => 0x07,
            'b' => 0x08,
            'f' => 0x0c,
            'v' => 0x0b,
            '\\' => b'\\',
            '\'' => b'\'',
            '"' => b'"',
            '?' => b'?',
            '0'..='7' => {
                let mut value = c.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                u8::try_from(value).map_err(|_| ParseError::InvalidEscape {
                    line,
                    sequence: format!("{value:o}"),
                })?
            }
            'x' => {
                let mut digits = String::new();
                while digits.len() < 2 {
                    match self.peek() {
                        Some(d) if d.is_ascii_hexdigit() => {
                            digits.push(d);
                            self.bump();
                        }
                        _ => break,
                    }
                }
                u8::from_str_radix(&digits, 16).map_err(|_| ParseError::InvalidEscape {
                    line,
                    sequence: format!("x{digits}"),
                })?
            }
            other => {
                return Err(ParseError::InvalidEscape {
                    line,
                    sequence: other.to_string(),
                });
            }
        };

        bytes.push(byte);
        Ok(())
    }

    /// Reads `<<TAG` followed by lines up to a line consisting of `TAG`.
    fn read_heredoc(&mut self) -> Result<String, ParseError> {
        let start_line = self.line;
        self.bump();
        self.bump();

        let tag = self.read_ident();
        if tag.is_empty() {
            return Err(ParseError::unexpected(
                self.line,
                self.column,
                "missing heredoc tag",
                "an identifier after '<<'",
            ));
        }

        // Rest of the opening line is ignored.
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }

        let mut lines = Vec::new();
        loop {
            if self.peek().is_none() {
                return Err(ParseError::Unterminated {
                    line: start_line,
                    kind: "heredoc",
                });
            }

            let start = self.pos;
            while self.peek().is_some_and(|c| c != '\n') {
                self.bump();
            }
            let line = &self.text[start..self.pos];
            self.bump();

            if line.trim() == tag {
                break;
            }
            lines.push(line.trim_end_matches('\r'));
        }

        Ok(lines.join("\n"))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '+')
}

/// Recursive-descent parser over the token stream.
struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn new(text: &str) -> Result<Self, ParseError> {
        Ok(Self {
            tokens: Lexer::new(text).tokenize()?,
            pos: 0,
        })
    }

    fn peek(&self) -> &Spanned {
        // The token stream always ends with Eof and `next` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn next(&mut self) -> Spanned {
        let tok = self.peek().clone();
        if tok.token != Token::Eof {
            self.pos += 1;
        }
        tok
    }

    fn error(&self, expected: &str) -> ParseError {
        let tok = self.peek();
        ParseError::unexpected(tok.line, tok.column, tok.token.describe(), expected)
    }

    /// Parses fields until `}` (nested) or end of input (top level).
    fn parse_fields(&mut self, nested: bool) -> Result<Vec<Field>, ParseError> {
        let mut fields = Vec::new();

        loop {
            let tok = self.peek().clone();
            match tok.token {
                Token::Eof if !nested => break,
                Token::RBrace if nested => break,
                Token::Comma | Token::Semicolon => {
                    self.next();
                }
                Token::Ident(name) => {
                    self.next();
                    self.parse_field_value(&name, tok.line, &mut fields)?;
                }
                _ if nested => return Err(self.error("a field name or '}'")),
                _ => return Err(self.error("a field name")),
            }
        }

        Ok(fields)
    }

    fn parse_field_value(
        &mut self,
        name: &str,
        line: usize,
        fields: &mut Vec<Field>,
    ) -> Result<(), ParseError> {
        let has_colon = self.peek().token == Token::Colon;
        if has_colon {
            self.next();
        }

        match self.peek().token {
            Token::LBrace => {
                self.next();
                let body = self.parse_fields(true)?;
                self.next();
                fields.push(Field {
                    name: name.to_string(),
                    value: Value::Message(body),
                    line,
                });
            }
            Token::LBracket if has_colon => {
                self.next();
                loop {
                    match self.peek().token {
                        Token::RBracket => {
                            self.next();
                            break;
                        }
                        Token::Comma => {
                            self.next();
                        }
                        _ => {
                            let value = self.parse_scalar()?;
                            fields.push(Field {
                                name: name.to_string(),
                                value: Value::Scalar(value),
                                line,
                            });
                        }
                    }
                }
            }
            _ if has_colon => {
                let value = self.parse_scalar()?;
                fields.push(Field {
                    name: name.to_string(),
                    value: Value::Scalar(value),
                    line,
                });
            }
            _ => return Err(self.error("':' or '{'")),
        }

        Ok(())
    }

    /// Parses an identifier, number, or one or more adjacent strings.
    fn parse_scalar(&mut self) -> Result<String, ParseError> {
        match self.peek().token.clone() {
            Token::Ident(s) => {
                self.next();
                Ok(s)
            }
            Token::Str(first) => {
                self.next();
                let mut value = first;
                while let Token::Str(more) = &self.peek().token {
                    value.push_str(more);
                    self.next();
                }
                Ok(value)
            }
            _ => Err(self.error("a value")),
        }
    }
}
