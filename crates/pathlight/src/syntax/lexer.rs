//! Tokenizer for the supported JavaScript subset

use crate::frontend::{ParseError, SourceLocation};

use super::ast::{Position, Span};

/// Kinds of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier or keyword
    Word(String),
    /// Numeric literal with its parsed value
    Number(f64),
    /// String literal with escapes resolved
    Str(String),
    /// Operator or punctuation
    Punct(&'static str),
    /// End of input
    Eof,
}

/// A token with its raw text and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was read
    pub kind: TokenKind,
    /// Exactly as written
    pub raw: String,
    /// Where it was read
    pub span: Span,
}

impl Token {
    /// Whether this is the given punctuation.
    pub fn is_punct(&self, p: &str) -> bool {
        matches!(&self.kind, TokenKind::Punct(q) if *q == p)
    }

    /// Whether this is the given identifier or keyword.
    pub fn is_word(&self, w: &str) -> bool {
        matches!(&self.kind, TokenKind::Word(name) if name == w)
    }
}

// Longest first so that `===` wins over `==` and `=`.
const PUNCTUATION: &[&str] = &[
    "===", "!==", "**=", "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=", "*=", "/=",
    "%=", "**", "(", ")", "{", "}", "[", "]", ";", ",", ".", "?", ":", "=", "<", ">", "+", "-",
    "*", "/", "%", "!",
];

/// Converts source text into tokens.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    /// Create a lexer over the given source.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 0,
        }
    }

    /// Read the whole input. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            let start = self.position();
            let Some(c) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    raw: String::new(),
                    span: Span::new(start, start),
                });
                return Ok(tokens);
            };

            let leading_dot = c == '.' && self.peek_at(1).is_some_and(|d| d.is_ascii_digit());
            let kind = if c.is_ascii_digit() || leading_dot {
                self.number(start)?
            } else if c == '\'' || c == '"' {
                self.string(c, start)?
            } else if is_ident_start(c) {
                self.word()
            } else {
                self.punct(start)?
            };

            let raw: String = self.chars[self.offset_of(start)..self.pos].iter().collect();
            tokens.push(Token {
                kind,
                raw,
                span: Span::new(start, self.position()),
            });
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Cursor
    // ═══════════════════════════════════════════════════════════════════

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    // Tokens never span lines, so the offset is recoverable from the column.
    fn offset_of(&self, start: Position) -> usize {
        self.pos - (self.column - start.column) as usize
    }

    fn error(&self, message: impl Into<String>, at: Position) -> ParseError {
        ParseError::new(message).with_location(SourceLocation::from(at))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Token classes
    // ═══════════════════════════════════════════════════════════════════

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else if c == '/' && self.peek_at(1) == Some('/') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
            } else if c == '/' && self.peek_at(1) == Some('*') {
                let start = self.position();
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => return Err(self.error("unterminated comment", start)),
                    }
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn number(&mut self, start: Position) -> Result<TokenKind, ParseError> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            let exponent_sign = (c == '+' || c == '-') && text.ends_with(|e: char| e == 'e' || e == 'E');
            if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || exponent_sign {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        text.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| self.error(format!("malformed number `{}`", text), start))
    }

    fn string(&mut self, quote: char, start: Position) -> Result<TokenKind, ParseError> {
        self.advance();
        let mut value = String::new();
        loop {
            match self.advance() {
                Some(c) if c == quote => return Ok(TokenKind::Str(value)),
                Some('\\') => {
                    let escaped = match self.advance() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('0') => '\0',
                        Some(other) => other,
                        None => break,
                    };
                    value.push(escaped);
                }
                Some('\n') | None => break,
                Some(c) => value.push(c),
            }
        }
        Err(self.error("unterminated string", start))
    }

    fn word(&mut self) -> TokenKind {
        let mut name = String::new();
        while let Some(c) = self.peek().filter(|&c| is_ident_continue(c)) {
            name.push(c);
            self.advance();
        }
        TokenKind::Word(name)
    }

    fn punct(&mut self, start: Position) -> Result<TokenKind, ParseError> {
        for p in PUNCTUATION {
            let matches = p
                .chars()
                .enumerate()
                .all(|(i, pc)| self.peek_at(i) == Some(pc));
            if matches {
                for _ in 0..p.chars().count() {
                    self.advance();
                }
                return Ok(TokenKind::Punct(p));
            }
        }
        let c = self.peek().unwrap_or('?');
        Err(self.error(format!("unexpected character `{}`", c), start))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(
            kinds("a === b"),
            vec![
                TokenKind::Word("a".into()),
                TokenKind::Punct("==="),
                TokenKind::Word("b".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_positions_are_zero_based_columns() {
        let tokens = Lexer::new("let x;\n  if").tokenize().unwrap();
        assert_eq!(tokens[1].span.start, Position::new(1, 4));
        assert_eq!(tokens[3].span.start, Position::new(2, 2));
        assert_eq!(tokens[3].span.end, Position::new(2, 4));
    }

    #[test]
    fn test_string_raw_keeps_quotes() {
        let tokens = Lexer::new("'a\\'b'").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Str("a'b".into()));
        assert_eq!(tokens[0].raw, "'a\\'b'");
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("1 // one\n/* two */ 2"),
            vec![TokenKind::Number(1.0), TokenKind::Number(2.0), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string_reports_location() {
        let err = Lexer::new("\n  'abc").tokenize().unwrap_err();
        assert_eq!(err.location, Some(SourceLocation::new(2, 3)));
    }
}
