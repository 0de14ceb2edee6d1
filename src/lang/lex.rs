use super::{token::*, Error};
use crate::error;

/// Tokenize an entire source text.
///
/// Returns the full token sequence, terminated by exactly one `Eof`, along
/// with any lexical diagnostics. Unclassifiable input becomes an `Unknown`
/// token and lexing continues, so a single bad character does not hide the
/// rest of the diagnostics.
pub fn lex(s: &str) -> (Vec<Token>, Vec<Error>) {
    AlphaLexer::lex(s)
}

fn is_alpha_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_alpha_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_alpha_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_alpha_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct AlphaLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    errors: Vec<Error>,
}

impl<'a> Iterator for AlphaLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pk = *self.chars.peek()?;
            if pk == '\n' {
                self.chars.next();
                self.line += 1;
                return Some(Token::Newline);
            }
            if is_alpha_whitespace(pk) {
                self.chars.next();
                continue;
            }
            if is_alpha_alphabetic(pk) {
                return Some(self.alphabetic());
            }
            if is_alpha_digit(pk) {
                return Some(self.number());
            }
            return Some(match pk {
                '"' => self.string(),
                '{' => self.comment(),
                _ => self.minutia(pk),
            });
        }
    }
}

impl<'a> AlphaLexer<'a> {
    fn lex(s: &str) -> (Vec<Token>, Vec<Error>) {
        let mut lexer = AlphaLexer {
            chars: s.chars().peekable(),
            line: 1,
            errors: vec![],
        };
        let mut tokens: Vec<Token> = lexer.by_ref().collect();
        tokens.push(Token::Eof);
        (tokens, lexer.errors)
    }

    /// A maximal run of letters, digits and underscores. Keywords match
    /// case-insensitively; anything else is an identifier with its original
    /// case preserved.
    fn alphabetic(&mut self) -> Token {
        let mut s = String::new();
        while let Some(pk) = self.chars.peek() {
            if !is_alpha_word(*pk) {
                break;
            }
            s.push(*pk);
            self.chars.next();
        }
        match Word::from_string(&s) {
            Some(word) => Token::Word(word),
            None => Token::Ident(s),
        }
    }

    /// A maximal run of digits, accumulated `value*10+digit`. Overflow is
    /// unspecified; wrapping keeps it from faulting.
    fn number(&mut self) -> Token {
        let mut value: i64 = 0;
        while let Some(pk) = self.chars.peek() {
            match pk.to_digit(10) {
                Some(d) => {
                    value = value.wrapping_mul(10).wrapping_add(d as i64);
                    self.chars.next();
                }
                None => break,
            }
        }
        Token::Literal(Literal::Integer(value.to_string()))
    }

    fn string(&mut self) -> Token {
        let mut s = String::new();
        self.chars.next();
        loop {
            match self.chars.next() {
                Some('"') => return Token::Literal(Literal::String(s)),
                Some(ch) => {
                    if ch == '\n' {
                        self.line += 1;
                    }
                    s.push(ch);
                }
                None => {
                    self.errors
                        .push(error!(UnterminatedString, Some(self.line); "MISSING CLOSING \""));
                    return Token::Unknown(s);
                }
            }
        }
    }

    /// `{ ... }`, may span multiple lines. The text is discarded; only the
    /// newlines matter, for the line count.
    fn comment(&mut self) -> Token {
        self.chars.next();
        loop {
            match self.chars.next() {
                Some('}') => return Token::Comment,
                Some('\n') => self.line += 1,
                Some(_) => {}
                None => {
                    self.errors
                        .push(error!(UnterminatedComment, Some(self.line); "MISSING CLOSING }"));
                    return Token::Unknown("{".to_string());
                }
            }
        }
    }

    fn minutia(&mut self, pk: char) -> Token {
        use Operator::*;
        self.chars.next();
        let op = match pk {
            '=' => Equal,
            '>' => match self.chars.peek() {
                Some('=') => {
                    self.chars.next();
                    GreaterEqual
                }
                _ => Greater,
            },
            '<' => match self.chars.peek() {
                Some('=') => {
                    self.chars.next();
                    LessEqual
                }
                Some('>') => {
                    self.chars.next();
                    NotEqual
                }
                _ => Less,
            },
            ':' => match self.chars.peek() {
                Some('=') => {
                    self.chars.next();
                    Assign
                }
                _ => return Token::Colon,
            },
            '+' => Plus,
            '-' => Minus,
            '*' => Multiply,
            '/' => Divide,
            '%' => Modulus,
            '(' => return Token::LParen,
            ')' => return Token::RParen,
            ',' => return Token::Comma,
            _ => {
                self.errors
                    .push(error!(IllegalCharacter, Some(self.line); pk.to_string()));
                return Token::Unknown(pk.to_string());
            }
        };
        Token::Operator(op)
    }
}
