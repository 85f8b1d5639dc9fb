use crate::error::LexError;
use crate::token::{Token, TokenKind};

use super::keywords;

/// Scans `source` into a token stream terminated by `Eof`.
///
/// Scanning does not stop at the first lexical error: an unterminated
/// string or an unrecognized character is collected into `errors` and
/// scanning resumes at the next character, so a single pass can report every
/// lexical problem in the source at once.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Vec<LexError>> {
    let mut scanner = Scanner::new(source);
    scanner.scan();

    if scanner.errors.is_empty() {
        Ok(scanner.tokens)
    } else {
        Err(scanner.errors)
    }
}

struct Scanner {
    chars: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn scan(&mut self) {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::new(TokenKind::Eof, "", self.line));
        log::debug!("lexer produced {} tokens", self.tokens.len());
    }

    fn scan_token(&mut self) {
        let c = self.advance();

        match c {
            '(' => self.add(TokenKind::LeftParen),
            ')' => self.add(TokenKind::RightParen),
            '{' => self.add(TokenKind::LeftBrace),
            '}' => self.add(TokenKind::RightBrace),
            '[' => self.add(TokenKind::LeftBracket),
            ']' => self.add(TokenKind::RightBracket),
            ',' => self.add(TokenKind::Comma),
            '.' => self.add(TokenKind::Dot),
            '-' => self.add(TokenKind::Minus),
            '+' => self.add(TokenKind::Plus),
            ';' => self.add(TokenKind::Semicolon),
            '*' => self.add(TokenKind::Star),
            ':' => self.add(TokenKind::Colon),
            '?' => self.add(TokenKind::Question),

            '!' => {
                let kind = if self.matches('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                };
                self.add(kind);
            }
            '=' => {
                let kind = if self.matches('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.add(kind);
            }
            '<' => {
                let kind = if self.matches('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.add(kind);
            }
            '>' => {
                let kind = if self.matches('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.add(kind);
            }

            '/' => {
                if self.matches('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add(TokenKind::Slash);
                }
            }

            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            other => {
                self.errors
                    .push(LexError::new(format!("Unexpected character '{}'.", other), self.line));
            }
        }
    }

    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.errors
                .push(LexError::new("Unterminated string.", self.line));
            return;
        }

        // closing quote
        self.advance();

        let lexeme: String = self.chars[self.start..self.current].iter().collect();
        self.tokens.push(Token::new(TokenKind::String, lexeme, self.line));
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        self.add(TokenKind::Number);
    }

    fn identifier(&mut self) {
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let lexeme: String = self.chars[self.start..self.current].iter().collect();
        let kind = keywords::lookup(&lexeme).unwrap_or(TokenKind::Identifier);
        self.tokens.push(Token::new(kind, lexeme, self.line));
    }

    fn add(&mut self, kind: TokenKind) {
        let lexeme: String = self.chars[self.start..self.current].iter().collect();
        self.tokens.push(Token::new(kind, lexeme, self.line));
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn peek(&self) -> char {
        *self.chars.get(self.current).unwrap_or(&'\0')
    }

    fn peek_next(&self) -> char {
        *self.chars.get(self.current + 1).unwrap_or(&'\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_a_print_statement() {
        let tokens = tokenize("print 1 + 2;").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Print,
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tracks_line_numbers_across_newlines() {
        let tokens = tokenize("var a = 1;\nvar b = 2;").unwrap();
        let b_token = tokens.iter().find(|t| t.lexeme == "b").unwrap();
        assert_eq!(b_token.line, 2);
    }

    #[test]
    fn reports_unterminated_string() {
        let err = tokenize("\"abc").unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err[0].message.contains("Unterminated"));
    }

    #[test]
    fn keywords_are_not_identifiers() {
        let tokens = tokenize("while break continue").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::While, TokenKind::Break, TokenKind::Continue, TokenKind::Eof]
        );
    }
}
