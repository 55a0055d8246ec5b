//! Tokenizer for the constrained SQL dialect.
//!
//! The surface language is tiny: keywords, identifiers, `$n` placeholders,
//! a handful of punctuation marks, and the occasional number or quoted
//! string. Tokenizing never fails — anything the lexer does not recognize
//! becomes a [`Token::Symbol`] and is left for the matchers to reject.

/// A single lexical unit of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare identifier or keyword. Original casing is preserved; keyword
    /// comparison happens case-insensitively via [`Token::is_kw`].
    Ident(String),
    /// Numeric literal, kept as text (the translator never evaluates it).
    Number(String),
    /// Single-quoted string literal, quotes stripped, `''` unescaped.
    Str(String),
    /// Positional placeholder `$n`. The digits are as written; `$1` is the
    /// first supplied parameter in the surface syntax.
    Param(usize),
    Comma,
    LParen,
    RParen,
    Eq,
    /// Any other non-whitespace character.
    Symbol(char),
}

impl Token {
    /// Case-insensitive keyword test against an identifier token.
    pub fn is_kw(&self, kw: &str) -> bool {
        matches!(self, Token::Ident(s) if s.eq_ignore_ascii_case(kw))
    }
}

/// Split statement text into tokens. Whitespace separates tokens but is
/// otherwise discarded.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '=' => {
                chars.next();
                tokens.push(Token::Eq);
            }
            '$' => {
                chars.next();
                let mut digits = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() {
                        digits.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match digits.parse::<usize>() {
                    Ok(n) => tokens.push(Token::Param(n)),
                    // A lone `$` is not a placeholder.
                    Err(_) => tokens.push(Token::Symbol('$')),
                }
            }
            '\'' => {
                chars.next();
                let mut value = String::new();
                while let Some(c) = chars.next() {
                    if c == '\'' {
                        // Doubled quote is an escaped quote.
                        if chars.peek() == Some(&'\'') {
                            value.push('\'');
                            chars.next();
                        } else {
                            break;
                        }
                    } else {
                        value.push(c);
                    }
                }
                tokens.push(Token::Str(value));
            }
            c if c.is_ascii_digit() => {
                let mut num = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        num.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Number(num));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_alphanumeric() || d == '_' {
                        ident.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            c => {
                chars.next();
                tokens.push(Token::Symbol(c));
            }
        }
    }

    tokens
}
