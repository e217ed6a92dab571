//! Filter-expression grammar for dashboard search.
//!
//! The upstream search endpoint only filters by a single tag, so anything
//! richer is evaluated client-side: a query is parsed once into a small
//! predicate tree, then the tree is walked per dashboard.
//!
//! Grammar:
//!
//! ```text
//! expr   := term ("or" term)*
//! term   := factor ("and"? factor)*
//! factor := atom | "(" expr ")"
//! atom   := "tag:" WORD | WORD
//! ```
//!
//! A `tag:` atom is an exact tag-equality test; a bare word is a
//! case-insensitive substring test over the record's text fields (title
//! and folder title). Two adjacent factors with no operator between them
//! form an implicit conjunction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ParseError, Result};

/// Matches queries that are a single bare word (letters, digits,
/// underscores, hyphens). Such queries skip the grammar entirely and are
/// pushed down to the server-side tag filter instead.
static SINGLE_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w-]+$").unwrap_or_else(|_| unreachable!()));

/// Returns true if `input` is a single bare word.
///
/// Single-word queries are treated as an exact tag filter and delegated
/// to the server, which avoids fetching the full unfiltered dashboard
/// list.
#[must_use]
pub fn is_single_word(input: &str) -> bool {
    SINGLE_WORD_REGEX.is_match(input)
}

/// A record that a parsed query can be evaluated against.
///
/// Missing fields must simply not match; evaluation is total and never
/// errors.
pub trait QueryTarget {
    /// True if the record carries exactly this tag.
    fn has_tag(&self, tag: &str) -> bool;

    /// True if any of the record's text fields contain `needle`,
    /// case-insensitively.
    fn matches_text(&self, needle: &str) -> bool;
}

/// One node of the predicate tree.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Tag(String),
    Text(String),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    fn matches(&self, target: &impl QueryTarget) -> bool {
        match self {
            Self::Tag(tag) => target.has_tag(tag),
            Self::Text(needle) => target.matches_text(needle),
            Self::And(left, right) => left.matches(target) && right.matches(target),
            Self::Or(left, right) => left.matches(target) || right.matches(target),
        }
    }
}

/// A filter expression parsed into an evaluable predicate tree.
///
/// Parse once, evaluate against many dashboards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    root: Predicate,
}

impl ParsedQuery {
    /// Parse a filter expression.
    pub fn parse(query: &str) -> Result<Self> {
        let tokens = tokenize(query)?;
        if tokens.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut parser = Parser { tokens, pos: 0 };
        let root = parser.parse_or()?;
        match parser.peek() {
            None => Ok(Self { root }),
            Some(Token::RParen) => Err(ParseError::UnbalancedParens),
            Some(token) => Err(ParseError::UnknownOperator {
                operator: token.describe(),
            }),
        }
    }

    /// Evaluate the query against one record.
    pub fn evaluate(&self, target: &impl QueryTarget) -> bool {
        self.root.matches(target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    LParen,
    RParen,
    And,
    Or,
    Tag(String),
    Word(String),
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::LParen => "(".to_string(),
            Self::RParen => ")".to_string(),
            Self::And => "and".to_string(),
            Self::Or => "or".to_string(),
            Self::Tag(name) => format!("tag:{name}"),
            Self::Word(word) => word.clone(),
        }
    }
}

fn tokenize(query: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    let mut flush = |word: &mut String, tokens: &mut Vec<Token>| -> Result<()> {
        if word.is_empty() {
            return Ok(());
        }
        tokens.push(classify(word)?);
        word.clear();
        Ok(())
    };

    for ch in query.chars() {
        match ch {
            '(' => {
                flush(&mut word, &mut tokens)?;
                tokens.push(Token::LParen);
            }
            ')' => {
                flush(&mut word, &mut tokens)?;
                tokens.push(Token::RParen);
            }
            c if c.is_whitespace() => flush(&mut word, &mut tokens)?,
            c => word.push(c),
        }
    }
    flush(&mut word, &mut tokens)?;

    Ok(tokens)
}

fn classify(word: &str) -> Result<Token> {
    if word.eq_ignore_ascii_case("and") {
        return Ok(Token::And);
    }
    if word.eq_ignore_ascii_case("or") {
        return Ok(Token::Or);
    }
    // Punctuation-only runs ("&&", "!", ...) are not part of the grammar.
    if !word.chars().any(char::is_alphanumeric) {
        return Err(ParseError::UnknownOperator {
            operator: word.to_string(),
        });
    }
    if let Some(tag) = word.strip_prefix("tag:") {
        return Ok(Token::Tag(tag.to_string()));
    }
    Ok(Token::Word(word.to_string()))
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
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_or(&mut self) -> Result<Predicate> {
        let mut left = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.pos += 1;
            let right = self.parse_and()?;
            left = Predicate::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Predicate> {
        let mut left = self.parse_factor()?;
        loop {
            match self.peek() {
                Some(Token::And) => {
                    self.pos += 1;
                    let right = self.parse_factor()?;
                    left = Predicate::And(Box::new(left), Box::new(right));
                }
                // Adjacent atoms form an implicit conjunction.
                Some(Token::Tag(_) | Token::Word(_) | Token::LParen) => {
                    let right = self.parse_factor()?;
                    left = Predicate::And(Box::new(left), Box::new(right));
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Predicate> {
        match self.next() {
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(ParseError::UnbalancedParens),
                }
            }
            Some(Token::Tag(name)) => Ok(Predicate::Tag(name)),
            Some(Token::Word(word)) => Ok(Predicate::Text(word)),
            Some(token @ (Token::And | Token::Or)) => Err(ParseError::DanglingOperator {
                operator: token.describe(),
            }),
            Some(Token::RParen) => Err(ParseError::UnbalancedParens),
            None => Err(ParseError::DanglingOperator {
                operator: "end of query".to_string(),
            }),
        }
    }
}
