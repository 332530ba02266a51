use serde::Serialize;
use std::fmt;

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Token {
    kind: Kind,
    lexeme: String,
    literal: Option<Literal>,
    line: usize,
    column: usize,
    length: usize,
}

impl Token {
    pub fn new(
        kind: Kind,
        lexeme: String,
        literal: Option<Literal>,
        line: usize,
        column: usize,
    ) -> Self {
        let length = lexeme.chars().count();
        Self {
            kind,
            lexeme,
            literal,
            line,
            column,
            length,
        }
    }

    pub fn eof(line: usize, column: usize) -> Self {
        Self::new(Kind::Eof, String::new(), None, line, column)
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn literal(&self) -> Option<&Literal> {
        self.literal.as_ref()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.kind, self.lexeme, literal),
            None => write!(f, "{} {} null", self.kind, self.lexeme),
        }
    }
}

/// Decoded value carried by `String` and `Number` tokens.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Number(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::String(value) => f.write_str(value),
            // Debug keeps the fractional part, so 123 renders as 123.0
            Literal::Number(value) => write!(f, "{:?}", value),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    // Single-character tokens
    LeftParen,   // (
    RightParen,  // )
    LeftBrace,   // {
    RightBrace,  // }
    Comma,       // ,
    Dot,         // .
    Minus,       // -
    Plus,        // +
    Semicolon,   // ;
    Slash,       // /
    Star,        // *

    // One or two character tokens
    Bang,         // !
    BangEqual,    // !=
    Equal,        // =
    EqualEqual,   // ==
    Greater,      // >
    GreaterEqual, // >=
    Less,         // <
    LessEqual,    // <=

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof, // End of input marker
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::LeftParen => "LEFT_PAREN",
            Kind::RightParen => "RIGHT_PAREN",
            Kind::LeftBrace => "LEFT_BRACE",
            Kind::RightBrace => "RIGHT_BRACE",
            Kind::Comma => "COMMA",
            Kind::Dot => "DOT",
            Kind::Minus => "MINUS",
            Kind::Plus => "PLUS",
            Kind::Semicolon => "SEMICOLON",
            Kind::Slash => "SLASH",
            Kind::Star => "STAR",
            Kind::Bang => "BANG",
            Kind::BangEqual => "BANG_EQUAL",
            Kind::Equal => "EQUAL",
            Kind::EqualEqual => "EQUAL_EQUAL",
            Kind::Greater => "GREATER",
            Kind::GreaterEqual => "GREATER_EQUAL",
            Kind::Less => "LESS",
            Kind::LessEqual => "LESS_EQUAL",
            Kind::Identifier => "IDENTIFIER",
            Kind::String => "STRING",
            Kind::Number => "NUMBER",
            Kind::And => "AND",
            Kind::Class => "CLASS",
            Kind::Else => "ELSE",
            Kind::False => "FALSE",
            Kind::Fun => "FUN",
            Kind::For => "FOR",
            Kind::If => "IF",
            Kind::Nil => "NIL",
            Kind::Or => "OR",
            Kind::Print => "PRINT",
            Kind::Return => "RETURN",
            Kind::Super => "SUPER",
            Kind::This => "THIS",
            Kind::True => "TRUE",
            Kind::Var => "VAR",
            Kind::While => "WHILE",
            Kind::Eof => "EOF",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
