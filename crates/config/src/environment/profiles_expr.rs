//! Profile expressions used to decide whether a document applies.
//!
//! Responsibilities:
//! - Parse expressions such as `prod`, `!dev`, `prod & eu`, `(a | b) & !c`.
//! - Evaluate a set of expressions against an "is this profile active" predicate.
//!
//! Invariants:
//! - A set of expressions matches when any one of them matches.
//! - `&` and `|` cannot be mixed at the same nesting level without parentheses.
//! - `!` binds to the single operand that follows it.

use thiserror::Error;

/// Errors raised for malformed profile expressions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileExpressionError {
    #[error("Invalid profile expression [{0}]: must contain text")]
    Empty(String),

    #[error("Malformed profile expression [{expression}]: {message}")]
    Malformed { expression: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Name(String),
    Not,
    And,
    Or,
    Open,
    Close,
}

/// A parsed profile expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileExpr {
    Name(String),
    Not(Box<ProfileExpr>),
    And(Vec<ProfileExpr>),
    Or(Vec<ProfileExpr>),
}

impl ProfileExpr {
    pub fn parse(expression: &str) -> Result<Self, ProfileExpressionError> {
        if expression.trim().is_empty() {
            return Err(ProfileExpressionError::Empty(expression.to_string()));
        }
        let tokens = tokenize(expression);
        let mut parser = Parser {
            expression,
            tokens: &tokens,
            pos: 0,
        };
        let parsed = parser.expr()?;
        if parser.pos != tokens.len() {
            return Err(parser.malformed("unexpected ')'"));
        }
        Ok(parsed)
    }

    pub fn matches(&self, is_active: &dyn Fn(&str) -> bool) -> bool {
        match self {
            ProfileExpr::Name(name) => is_active(name),
            ProfileExpr::Not(inner) => !inner.matches(is_active),
            ProfileExpr::And(items) => items.iter().all(|e| e.matches(is_active)),
            ProfileExpr::Or(items) => items.iter().any(|e| e.matches(is_active)),
        }
    }
}

/// A set of profile expressions, matching when any expression matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profiles {
    expressions: Vec<ProfileExpr>,
}

impl Profiles {
    pub fn of<S: AsRef<str>>(expressions: &[S]) -> Result<Self, ProfileExpressionError> {
        let expressions = expressions
            .iter()
            .map(|e| ProfileExpr::parse(e.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { expressions })
    }

    pub fn matches(&self, is_active: &dyn Fn(&str) -> bool) -> bool {
        self.expressions.iter().any(|e| e.matches(is_active))
    }
}

fn tokenize(expression: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut name = String::new();
    let flush = |name: &mut String, tokens: &mut Vec<Token>| {
        if !name.is_empty() {
            tokens.push(Token::Name(std::mem::take(name)));
        }
    };
    for c in expression.chars() {
        let token = match c {
            '!' => Some(Token::Not),
            '&' => Some(Token::And),
            '|' => Some(Token::Or),
            '(' => Some(Token::Open),
            ')' => Some(Token::Close),
            c if c.is_whitespace() => None,
            c => {
                name.push(c);
                continue;
            }
        };
        flush(&mut name, &mut tokens);
        if let Some(token) = token {
            tokens.push(token);
        }
    }
    flush(&mut name, &mut tokens);
    tokens
}

struct Parser<'a> {
    expression: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn malformed(&self, message: &str) -> ProfileExpressionError {
        ProfileExpressionError::Malformed {
            expression: self.expression.to_string(),
            message: message.to_string(),
        }
    }

    fn expr(&mut self) -> Result<ProfileExpr, ProfileExpressionError> {
        let tokens = self.tokens;
        let mut operands = vec![self.operand()?];
        let mut operator: Option<Token> = None;
        while let Some(token) = tokens.get(self.pos) {
            match token {
                Token::And | Token::Or => {
                    if operator.as_ref().is_some_and(|op| op != token) {
                        return Err(self.malformed("mixed '&' and '|' without parentheses"));
                    }
                    operator = Some(token.clone());
                    self.pos += 1;
                    operands.push(self.operand()?);
                }
                Token::Close => break,
                _ => return Err(self.malformed("missing operator between operands")),
            }
        }
        Ok(match operator {
            None => operands.remove(0),
            Some(Token::And) => ProfileExpr::And(operands),
            Some(_) => ProfileExpr::Or(operands),
        })
    }

    fn operand(&mut self) -> Result<ProfileExpr, ProfileExpressionError> {
        let tokens = self.tokens;
        let token = tokens
            .get(self.pos)
            .ok_or_else(|| self.malformed("expression ends unexpectedly"))?;
        self.pos += 1;
        match token {
            Token::Name(name) => Ok(ProfileExpr::Name(name.clone())),
            Token::Not => Ok(ProfileExpr::Not(Box::new(self.operand()?))),
            Token::Open => {
                let inner = self.expr()?;
                match tokens.get(self.pos) {
                    Some(Token::Close) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    _ => Err(self.malformed("missing ')'")),
                }
            }
            _ => Err(self.malformed("operator without operand")),
        }
    }
}
