//! Tokenizer and parser for the running expression
//!
//! The engine writes operators padded with single spaces, so tokens are
//! whitespace-separated pieces. A negative operand (from the sign key) is
//! a single piece like `-7`, distinct from the bare `-` operator.

use crate::core::{CalcError, CalcResult, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator
    Operator(Operation),
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Operator(op) => write!(f, "{op}"),
        }
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    pieces: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            pieces: input.split_whitespace(),
        }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        let Some(piece) = self.pieces.next() else {
            return Ok(None);
        };

        if let Some(op) = Operation::from_symbol(piece) {
            return Ok(Some(Token::Operator(op)));
        }

        read_number(piece).map(Some)
    }
}

/// Reads a number literal, normalizing a comma decimal separator
fn read_number(piece: &str) -> CalcResult<Token> {
    let normalized = piece.replace(',', ".");

    let well_formed = normalized.chars().any(|c| c.is_ascii_digit())
        && normalized
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    if !well_formed {
        return Err(CalcError::InvalidNumber(piece.to_string()));
    }

    let value: f64 = normalized
        .parse()
        .map_err(|_| CalcError::InvalidNumber(piece.to_string()))?;
    if !value.is_finite() {
        return Err(CalcError::InvalidNumber(piece.to_string()));
    }

    Ok(Token::Number(value))
}

/// Recursive descent parser with two precedence levels
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= NUMBER (('×' | '÷') NUMBER)*
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let tokens = Tokenizer::new(input).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses tokens into an AST, requiring every token to be consumed
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::UnexpectedToken {
                token: token.to_string(),
                position: self.pos,
            });
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn current_operator(&self, precedence: u8) -> Option<Operation> {
        match self.current() {
            Some(Token::Operator(op)) if op.precedence() == precedence => Some(*op),
            _ => None,
        }
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.current_operator(1) {
            self.pos += 1;
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_number()?;

        while let Some(op) = self.current_operator(2) {
            self.pos += 1;
            let right = self.parse_number()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_number(&mut self) -> CalcResult<AstNode> {
        let position = self.pos;
        let token = self
            .tokens
            .get(position)
            .ok_or_else(|| CalcError::ParseError("Unexpected end of expression".into()))?;

        match token {
            Token::Number(n) => {
                let value = *n;
                self.pos += 1;
                Ok(AstNode::number(value))
            }
            Token::Operator(op) => Err(CalcError::UnexpectedToken {
                token: op.symbol().to_string(),
                position,
            }),
        }
    }
}
