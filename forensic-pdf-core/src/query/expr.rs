//! Hand-written recursive-descent parser for search expressions:
//! `A & B`, `A | B` (`&` binds tighter than `|`), bare terms, `~term~`
//! normalized terms, and `*`/`?` wildcards within a term.
//!
//! No parser-combinator crate — grounded on the teacher's hand-rolled
//! tokenizer in `parser::content::ContentTokenizer`.

use super::normalize::normalize;
use regex::Regex;

#[derive(Debug, Clone)]
pub enum Expr {
    Atom(Atom),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone)]
pub struct Atom {
    pub text: String,
    pub normalized: bool,
}

/// Build a substring-matching [`Regex`] from a `*`/`?` wildcard pattern,
/// with every other regex metacharacter treated literally. Shared by
/// [`Atom`] and by selector matching against cache file names.
pub fn wildcard_regex(text: &str) -> Regex {
    let escaped = regex::escape(text);
    let pattern = escaped.replace(r"\*", ".*").replace(r"\?", ".");
    Regex::new(&pattern).unwrap_or_else(|_| Regex::new(&regex::escape(text)).unwrap())
}

impl Atom {
    fn pattern(&self) -> Regex {
        wildcard_regex(&self.text)
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        if self.normalized {
            self.pattern().is_match(&normalize(haystack))
        } else {
            self.pattern().is_match(haystack)
        }
    }
}

impl Expr {
    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            Expr::Atom(atom) => atom.is_match(haystack),
            Expr::And(lhs, rhs) => lhs.is_match(haystack) && rhs.is_match(haystack),
            Expr::Or(lhs, rhs) => lhs.is_match(haystack) || rhs.is_match(haystack),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Term(String),
    Tilde,
    And,
    Or,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '&' => {
                chars.next();
                tokens.push(Token::And);
            }
            '|' => {
                chars.next();
                tokens.push(Token::Or);
            }
            '~' => {
                chars.next();
                tokens.push(Token::Tilde);
            }
            _ => {
                let mut term = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '&' || c == '|' || c == '~' {
                        break;
                    }
                    term.push(c);
                    chars.next();
                }
                if term.is_empty() {
                    return Err(format!("unexpected character '{c}' in query expression"));
                }
                tokens.push(Token::Term(term));
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    fn parse_or(&mut self) -> Result<Expr, String> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.next();
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, String> {
        let mut lhs = self.parse_atom()?;
        while matches!(self.peek(), Some(Token::And)) {
            self.next();
            let rhs = self.parse_atom()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_atom(&mut self) -> Result<Expr, String> {
        match self.next() {
            Some(Token::Term(text)) => Ok(Expr::Atom(Atom {
                text,
                normalized: false,
            })),
            Some(Token::Tilde) => {
                let text = match self.next() {
                    Some(Token::Term(text)) => text,
                    other => return Err(format!("expected term after '~', found {other:?}")),
                };
                match self.next() {
                    Some(Token::Tilde) => {}
                    other => return Err(format!("expected closing '~', found {other:?}")),
                }
                Ok(Expr::Atom(Atom {
                    text,
                    normalized: true,
                }))
            }
            other => Err(format!("expected a term, found {other:?}")),
        }
    }
}

/// Parse a full search expression. An empty expression is an error: there
/// is no such thing as a query that matches everything by omission.
pub fn parse(input: &str) -> Result<Expr, String> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err("empty query expression".to_string());
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        return Err(format!(
            "unexpected trailing tokens starting at {:?}",
            parser.tokens.get(parser.pos)
        ));
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_term_is_literal_case_sensitive() {
        let expr = parse("Invoice").unwrap();
        assert!(expr.is_match("An Invoice follows"));
        assert!(!expr.is_match("an invoice follows"));
    }

    #[test]
    fn normalized_term_ignores_accents_and_case() {
        let expr = parse("~relatorio~").unwrap();
        assert!(expr.is_match("RELATÓRIO final"));
    }

    #[test]
    fn and_requires_both_sides() {
        let expr = parse("foo & bar").unwrap();
        assert!(expr.is_match("foo and bar"));
        assert!(!expr.is_match("foo only"));
    }

    #[test]
    fn or_binds_looser_than_and() {
        let expr = parse("foo & bar | baz").unwrap();
        assert!(expr.is_match("baz alone"));
        assert!(expr.is_match("foo bar"));
        assert!(!expr.is_match("foo alone"));
    }

    #[test]
    fn wildcard_star_matches_any_run() {
        let expr = parse("inv*ce").unwrap();
        assert!(expr.is_match("invoice"));
    }

    #[test]
    fn wildcard_question_matches_single_char() {
        let expr = parse("inv?ice").unwrap();
        assert!(expr.is_match("invoice"));
        assert!(!expr.is_match("invxxice"));
    }

    #[test]
    fn rejects_empty_expression() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn rejects_unclosed_tilde() {
        assert!(parse("~foo").is_err());
    }
}
