use crate::diagnostics::{Diagnostic, Reporter};
use crate::error::LexingError;
use crate::token::{Kind, Literal, Token};
use tracing::{debug, trace};

/// Scans `source` to completion. Problems go to `reporter`; the returned
/// sequence always ends with a single `Eof` token.
pub fn scan(source: &str, reporter: &mut dyn Reporter) -> Vec<Token> {
    Lexer::new(source).tokenize(reporter)
}

pub struct Lexer {
    chars: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    column: usize,
    start_line: usize,
    start_column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
        }
    }

    fn is_eof(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn at(&self) -> char {
        self.chars.get(self.current).copied().unwrap_or('\0')
    }

    fn at_next(&self) -> char {
        self.chars.get(self.current + 1).copied().unwrap_or('\0')
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    /// Consumes the next char only if it is `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.is_eof() || self.at() != expected {
            return false;
        }
        self.advance();
        true
    }

    fn lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn push_token(&mut self, kind: Kind, literal: Option<Literal>) {
        let token = Token::new(kind, self.lexeme(), literal, self.start_line, self.start_column);
        trace!(target: "lox::lexer", %token, line = token.line(), column = token.column());
        self.tokens.push(token);
    }

    fn error(&self, line: usize, column: usize, error: LexingError, reporter: &mut dyn Reporter) {
        debug!(target: "lox::lexer", line, column, %error, "lexing error");
        reporter.report(Diagnostic::new(line, column, error));
    }

    pub fn tokenize(mut self, reporter: &mut dyn Reporter) -> Vec<Token> {
        while !self.is_eof() {
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.column;
            self.scan_token(reporter);
        }

        self.tokens.push(Token::eof(self.line, self.column));
        debug!(target: "lox::lexer", tokens = self.tokens.len(), lines = self.line, "scan finished");
        self.tokens
    }

    fn scan_token(&mut self, reporter: &mut dyn Reporter) {
        let ch = self.advance();

        match ch {
            '(' => self.push_token(Kind::LeftParen, None),
            ')' => self.push_token(Kind::RightParen, None),
            '{' => self.push_token(Kind::LeftBrace, None),
            '}' => self.push_token(Kind::RightBrace, None),
            ',' => self.push_token(Kind::Comma, None),
            '.' => self.push_token(Kind::Dot, None),
            '-' => self.push_token(Kind::Minus, None),
            '+' => self.push_token(Kind::Plus, None),
            ';' => self.push_token(Kind::Semicolon, None),
            '*' => self.push_token(Kind::Star, None),
            '!' => {
                let kind = if self.eat('=') { Kind::BangEqual } else { Kind::Bang };
                self.push_token(kind, None);
            }
            '=' => {
                let kind = if self.eat('=') { Kind::EqualEqual } else { Kind::Equal };
                self.push_token(kind, None);
            }
            '<' => {
                let kind = if self.eat('=') { Kind::LessEqual } else { Kind::Less };
                self.push_token(kind, None);
            }
            '>' => {
                let kind = if self.eat('=') { Kind::GreaterEqual } else { Kind::Greater };
                self.push_token(kind, None);
            }
            '/' => {
                if self.eat('/') {
                    // Single-line comment, the newline is left for the main loop
                    while !self.is_eof() && self.at() != '\n' {
                        self.advance();
                    }
                } else {
                    self.push_token(Kind::Slash, None);
                }
            }
            ' ' | '\r' | '\t' | '\n' => {}
            '"' => self.string(reporter),
            c if c.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.identifier(),
            c => {
                let (line, column) = (self.start_line, self.start_column);
                self.error(line, column, LexingError::UnexpectedCharacter(c), reporter);
            }
        }
    }

    fn string(&mut self, reporter: &mut dyn Reporter) {
        while !self.is_eof() && self.at() != '"' {
            self.advance();
        }

        if self.is_eof() {
            let (line, column) = (self.line, self.column);
            self.error(line, column, LexingError::UnterminatedString, reporter);
            return;
        }

        self.advance(); // closing quote

        let value: String = self.chars[self.start + 1..self.current - 1].iter().collect();
        self.push_token(Kind::String, Some(Literal::String(value)));
    }

    fn number(&mut self) {
        while self.at().is_ascii_digit() {
            self.advance();
        }

        if self.at() == '.' && self.at_next().is_ascii_digit() {
            self.advance();
            while self.at().is_ascii_digit() {
                self.advance();
            }
        }

        // Only ASCII digits with at most one inner dot reach here, which f64 always accepts.
        match self.lexeme().parse::<f64>() {
            Ok(value) => self.push_token(Kind::Number, Some(Literal::Number(value))),
            Err(err) => debug!(target: "lox::lexer", %err, "number literal rejected"),
        }
    }

    fn identifier(&mut self) {
        while is_alpha_numeric(self.at()) {
            self.advance();
        }

        let kind = keyword(&self.lexeme()).unwrap_or(Kind::Identifier);
        self.push_token(kind, None);
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alpha_numeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

/// Reserved words. Matching is exact and case sensitive.
pub fn keyword(ident: &str) -> Option<Kind> {
    match ident {
        "and" => Some(Kind::And),
        "class" => Some(Kind::Class),
        "else" => Some(Kind::Else),
        "false" => Some(Kind::False),
        "for" => Some(Kind::For),
        "fun" => Some(Kind::Fun),
        "if" => Some(Kind::If),
        "nil" => Some(Kind::Nil),
        "or" => Some(Kind::Or),
        "print" => Some(Kind::Print),
        "return" => Some(Kind::Return),
        "super" => Some(Kind::Super),
        "this" => Some(Kind::This),
        "true" => Some(Kind::True),
        "var" => Some(Kind::Var),
        "while" => Some(Kind::While),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;

    fn lex(source: &str) -> (Vec<Token>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan(source, &mut diagnostics);
        (tokens, diagnostics)
    }

    fn kinds(tokens: &[Token]) -> Vec<Kind> {
        tokens.iter().map(Token::kind).collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        let (tokens, diagnostics) = lex("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), Kind::Eof);
        assert_eq!(tokens[0].lexeme(), "");
        assert_eq!(tokens[0].line(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn always_ends_with_one_eof() {
        for source in ["", "(", "\"open", "@@@", "// only a comment", "1.", "a\n\n", "!=="] {
            let (tokens, _) = lex(source);
            let last = tokens.last().unwrap();
            assert_eq!(last.kind(), Kind::Eof, "source {:?}", source);
            assert_eq!(last.lexeme(), "");
            assert_eq!(tokens.iter().filter(|t| t.kind() == Kind::Eof).count(), 1);
        }
    }

    #[test]
    fn single_character_tokens() {
        let (tokens, _) = lex("(){},.-+;*/");
        assert_eq!(
            kinds(&tokens),
            vec![
                Kind::LeftParen,
                Kind::RightParen,
                Kind::LeftBrace,
                Kind::RightBrace,
                Kind::Comma,
                Kind::Dot,
                Kind::Minus,
                Kind::Plus,
                Kind::Semicolon,
                Kind::Star,
                Kind::Slash,
                Kind::Eof,
            ]
        );
    }

    #[test]
    fn two_character_operators_munch() {
        let (tokens, _) = lex("!= == <= >=");
        assert_eq!(
            kinds(&tokens),
            vec![Kind::BangEqual, Kind::EqualEqual, Kind::LessEqual, Kind::GreaterEqual, Kind::Eof]
        );
        assert_eq!(tokens[0].lexeme(), "!=");
        assert_eq!(tokens[0].length(), 2);

        let (tokens, _) = lex("! = < >");
        assert_eq!(
            kinds(&tokens),
            vec![Kind::Bang, Kind::Equal, Kind::Less, Kind::Greater, Kind::Eof]
        );

        // Lookahead is exactly one character.
        let (tokens, _) = lex("===");
        assert_eq!(kinds(&tokens), vec![Kind::EqualEqual, Kind::Equal, Kind::Eof]);
    }

    #[test]
    fn comments_produce_no_tokens() {
        let (tokens, diagnostics) = lex("// comment\n123");
        assert_eq!(kinds(&tokens), vec![Kind::Number, Kind::Eof]);
        assert_eq!(tokens[0].literal(), Some(&Literal::Number(123.0)));
        assert_eq!(tokens[0].line(), 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn comment_does_not_swallow_next_line() {
        let (tokens, diagnostics) = lex("// one\n(");
        assert_eq!(kinds(&tokens), vec![Kind::LeftParen, Kind::Eof]);
        assert!(diagnostics.is_empty());

        let (tokens, _) = lex("1 / 2");
        assert_eq!(kinds(&tokens), vec![Kind::Number, Kind::Slash, Kind::Number, Kind::Eof]);
    }

    #[test]
    fn multi_line_string() {
        let (tokens, diagnostics) = lex("\"ab\ncd\" x");
        assert!(diagnostics.is_empty());
        assert_eq!(kinds(&tokens), vec![Kind::String, Kind::Identifier, Kind::Eof]);
        assert_eq!(tokens[0].literal(), Some(&Literal::String("ab\ncd".to_string())));
        assert_eq!(tokens[0].lexeme(), "\"ab\ncd\"");
        assert_eq!(tokens[0].line(), 1);
        assert_eq!(tokens[1].line(), 2);
        assert_eq!(tokens[2].line(), 2);
    }

    #[test]
    fn string_without_escapes() {
        let (tokens, _) = lex(r#""a\n""#);
        assert_eq!(tokens[0].literal(), Some(&Literal::String("a\\n".to_string())));
    }

    #[test]
    fn numbers() {
        let (tokens, _) = lex("3.14");
        assert_eq!(kinds(&tokens), vec![Kind::Number, Kind::Eof]);
        assert_eq!(tokens[0].literal(), Some(&Literal::Number("3.14".parse().unwrap())));

        let (tokens, _) = lex("3.");
        assert_eq!(kinds(&tokens), vec![Kind::Number, Kind::Dot, Kind::Eof]);
        assert_eq!(tokens[0].lexeme(), "3");
        assert_eq!(tokens[0].literal(), Some(&Literal::Number(3.0)));

        let (tokens, _) = lex(".5");
        assert_eq!(kinds(&tokens), vec![Kind::Dot, Kind::Number, Kind::Eof]);

        let (tokens, _) = lex("1.2.3");
        assert_eq!(kinds(&tokens), vec![Kind::Number, Kind::Dot, Kind::Number, Kind::Eof]);
        assert_eq!(tokens[0].lexeme(), "1.2");
    }

    #[test]
    fn keywords_need_whole_match() {
        let (tokens, _) = lex("class");
        assert_eq!(kinds(&tokens), vec![Kind::Class, Kind::Eof]);

        let (tokens, _) = lex("classic");
        assert_eq!(kinds(&tokens), vec![Kind::Identifier, Kind::Eof]);
        assert_eq!(tokens[0].lexeme(), "classic");

        let (tokens, _) = lex("Class _while var1");
        assert_eq!(
            kinds(&tokens),
            vec![Kind::Identifier, Kind::Identifier, Kind::Identifier, Kind::Eof]
        );
    }

    #[test]
    fn keyword_table_has_all_reserved_words() {
        let words = [
            "and", "class", "else", "false", "for", "fun", "if", "nil", "or", "print", "return",
            "super", "this", "true", "var", "while",
        ];
        for word in words {
            assert!(keyword(word).is_some(), "{} should be reserved", word);
        }
        assert_eq!(keyword("whil"), None);
        assert_eq!(keyword("AND"), None);
    }

    #[test]
    fn unterminated_string_reports_once() {
        let (tokens, diagnostics) = lex("\"unterminated");
        assert_eq!(kinds(&tokens), vec![Kind::Eof]);
        assert_eq!(diagnostics.len(), 1);
        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.error, LexingError::UnterminatedString);
        assert_eq!(diagnostic.line, 1);
    }

    #[test]
    fn unterminated_string_reports_line_at_end() {
        let (_, diagnostics) = lex("\"a\nb\nc");
        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!((diagnostic.line, diagnostic.column), (3, 2));
    }

    #[test]
    fn unexpected_character_is_skipped() {
        let (tokens, diagnostics) = lex("@123");
        assert_eq!(kinds(&tokens), vec![Kind::Number, Kind::Eof]);
        assert_eq!(tokens[0].literal(), Some(&Literal::Number(123.0)));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().unwrap().error,
            LexingError::UnexpectedCharacter('@')
        );
    }

    #[test]
    fn every_bad_character_is_reported() {
        let (tokens, diagnostics) = lex("a # b $\nc");
        assert_eq!(
            kinds(&tokens),
            vec![Kind::Identifier, Kind::Identifier, Kind::Identifier, Kind::Eof]
        );
        let positions: Vec<(usize, usize)> = diagnostics.iter().map(|d| (d.line, d.column)).collect();
        assert_eq!(positions, vec![(1, 3), (1, 7)]);
    }

    #[test]
    fn non_ascii_letters_are_not_identifiers() {
        let (tokens, diagnostics) = lex("é");
        assert_eq!(kinds(&tokens), vec![Kind::Eof]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn tabs_and_carriage_returns_are_whitespace() {
        let (tokens, diagnostics) = lex("a\t\r\nb");
        assert!(diagnostics.is_empty());
        assert_eq!(kinds(&tokens), vec![Kind::Identifier, Kind::Identifier, Kind::Eof]);
        assert_eq!((tokens[1].line(), tokens[1].column()), (2, 1));
    }

    #[test]
    fn tracks_lines_and_columns() {
        let (tokens, _) = lex("var x = 1;\n  print x;");
        let positions: Vec<(usize, usize)> = tokens.iter().map(|t| (t.line(), t.column())).collect();
        assert_eq!(
            positions,
            vec![(1, 1), (1, 5), (1, 7), (1, 9), (1, 10), (2, 3), (2, 9), (2, 10), (2, 11)]
        );
    }

    #[test]
    fn tokens_are_in_source_order() {
        let (tokens, _) = lex("fun add(a, b) {\n  return a + b;\n}\n");
        for pair in tokens.windows(2) {
            let before = (pair[0].line(), pair[0].column());
            let after = (pair[1].line(), pair[1].column());
            assert!(before < after, "{:?} then {:?}", pair[0], pair[1]);
        }
        assert_eq!(tokens.last().unwrap().line(), 4);
    }
}
