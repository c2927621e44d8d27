//! Recursive-descent parser for the reference textual NTS format: the
//! inverse of `nts_ir::display`'s `Display for Nts` impl.
//!
//! # Non-goals
//!
//! This is not a parser for any external NTS tool's syntax, and it does not
//! attempt to
//! disambiguate every formula shape a hand-written fixture file could spell
//! two ways: `var'[index] = value` is always parsed as an array write, never
//! as a relation comparing an array read to a value, even though both are
//! representable. The integration test suite builds its fixtures with
//! `nts-ir`'s programmatic builders instead of this format for exactly this
//! reason (see `nts-seq/tests`); this loader exists for the CLI and for
//! round-tripping `-o`/`--inliner-output` by hand.

use nts_ir::{
    AtomicProposition, BasicNts, Formula, Nts, RelOp, Term, TransitionRule, VarKind, VarUse,
};
use thiserror::Error;

use super::lexer::{lex, LexError, Token};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("unexpected end of input, expected {0}")]
    UnexpectedEof(&'static str),
    #[error("expected {expected}, found {found:?}")]
    Unexpected { expected: &'static str, found: Token },
    #[error("`{0}` is not a valid variable kind (expected `int` or `array`)")]
    BadVarKind(String),
    #[error("`{0}` is not a valid variable reference (expected `g<id>` or `l<id>`)")]
    BadVarRef(String),
}

pub fn parse(input: &str) -> Result<Nts, ParseError> {
    let tokens = lex(input)?;
    let mut p = Parser { tokens, pos: 0 };
    p.parse_nts()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, want: &Token, what: &'static str) -> Result<(), ParseError> {
        match self.bump() {
            Some(t) if &t == want => Ok(()),
            Some(t) => Err(ParseError::Unexpected {
                expected: what,
                found: t,
            }),
            None => Err(ParseError::UnexpectedEof(what)),
        }
    }

    fn expect_ident(&mut self, want: &str) -> Result<(), ParseError> {
        match self.bump() {
            Some(Token::Ident(s)) if s == want => Ok(()),
            Some(t) => Err(ParseError::Unexpected {
                expected: "identifier",
                found: t,
            }),
            None => Err(ParseError::UnexpectedEof("identifier")),
        }
    }

    fn ident(&mut self) -> Result<String, ParseError> {
        match self.bump() {
            Some(Token::Ident(s)) => Ok(s),
            Some(t) => Err(ParseError::Unexpected {
                expected: "identifier",
                found: t,
            }),
            None => Err(ParseError::UnexpectedEof("identifier")),
        }
    }

    fn peek_ident_is(&self, want: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(s)) if s == want)
    }

    fn int(&mut self) -> Result<i64, ParseError> {
        match self.bump() {
            Some(Token::Int(n)) => Ok(n),
            Some(t) => Err(ParseError::Unexpected {
                expected: "integer",
                found: t,
            }),
            None => Err(ParseError::UnexpectedEof("integer")),
        }
    }

    fn string(&mut self) -> Result<String, ParseError> {
        match self.bump() {
            Some(Token::Str(s)) => Ok(s),
            Some(t) => Err(ParseError::Unexpected {
                expected: "string literal",
                found: t,
            }),
            None => Err(ParseError::UnexpectedEof("string literal")),
        }
    }

    fn var_kind(&mut self) -> Result<VarKind, ParseError> {
        let name = self.ident()?;
        match name.as_str() {
            "int" => Ok(VarKind::Int),
            "array" => Ok(VarKind::Array),
            other => Err(ParseError::BadVarKind(other.to_string())),
        }
    }

    /// Parses a `g<id>`/`l<id>` reference, consuming a trailing `'` if
    /// present.
    fn var_use(&mut self) -> Result<VarUse, ParseError> {
        let text = self.ident()?;
        let (global, digits) = match text.strip_prefix('g') {
            Some(rest) => (true, rest),
            None => match text.strip_prefix('l') {
                Some(rest) => (false, rest),
                None => return Err(ParseError::BadVarRef(text)),
            },
        };
        let id: u32 = digits
            .parse()
            .map_err(|_| ParseError::BadVarRef(text.clone()))?;
        let primed = matches!(self.peek(), Some(Token::Quote));
        if primed {
            self.bump();
        }
        Ok(VarUse {
            var: nts_ir::VarId(id),
            global,
            primed,
        })
    }

    /// Parses an optional `@name("value")` annotation, returning its name
    /// and value. Used both for the recognized `@origin(...)` case and the
    /// catch-all `Annotation::Other`.
    fn annotation(&mut self) -> Result<(String, String), ParseError> {
        self.expect(&Token::At, "`@`")?;
        let name = self.ident()?;
        self.expect(&Token::LParen, "`(`")?;
        let value = self.string()?;
        self.expect(&Token::RParen, "`)`")?;
        Ok((name, value))
    }

    fn parse_nts(&mut self) -> Result<Nts, ParseError> {
        self.expect_ident("nts")?;
        let name = self.ident()?;
        let mut nts = Nts::new(name);
        self.expect(&Token::LBrace, "`{`")?;

        while self.peek_ident_is("global") {
            self.parse_global(&mut nts)?;
        }
        while self.peek_ident_is("basic_nts") {
            let bnts = self.parse_basic_nts()?;
            nts.add_basic_nts(bnts);
        }
        while self.peek_ident_is("instance") {
            self.bump();
            let name = self.ident()?;
            self.expect(&Token::Semi, "`;`")?;
            nts.add_instance(name);
        }

        self.expect(&Token::RBrace, "`}`")?;
        Ok(nts)
    }

    fn parse_global(&mut self, nts: &mut Nts) -> Result<(), ParseError> {
        self.bump(); // "global"
        let name = self.ident()?;
        self.expect(&Token::Colon, "`:`")?;
        let kind = self.var_kind()?;
        let origin = self.maybe_origin()?;
        self.expect(&Token::Semi, "`;`")?;
        match origin {
            Some(o) => {
                nts.add_global_with_origin(name, kind, o);
            }
            None => {
                nts.add_global(name, kind);
            }
        }
        Ok(())
    }

    fn maybe_origin(&mut self) -> Result<Option<String>, ParseError> {
        if matches!(self.peek(), Some(Token::At)) {
            let (name, value) = self.annotation()?;
            if name == "origin" {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn parse_basic_nts(&mut self) -> Result<BasicNts, ParseError> {
        self.bump(); // "basic_nts"
        let name = self.ident()?;
        let mut bnts = BasicNts::new(name);
        self.expect(&Token::LBrace, "`{`")?;

        while self.peek_ident_is("var") {
            self.bump();
            let name = self.ident()?;
            self.expect(&Token::Colon, "`:`")?;
            let kind = self.var_kind()?;
            let origin = self.maybe_origin()?;
            self.expect(&Token::Semi, "`;`")?;
            match origin {
                Some(o) => {
                    bnts.add_local_with_origin(name, kind, o);
                }
                None => {
                    bnts.add_local(name, kind);
                }
            };
        }

        while self.peek_ident_is("state") {
            self.bump();
            let name = self.ident()?;
            let mut is_initial = false;
            let mut is_final = false;
            let mut is_error = false;
            loop {
                if self.peek_ident_is("init") {
                    self.bump();
                    is_initial = true;
                } else if self.peek_ident_is("final") {
                    self.bump();
                    is_final = true;
                } else if self.peek_ident_is("error") {
                    self.bump();
                    is_error = true;
                } else {
                    break;
                }
            }
            let id = bnts.add_state(name, is_initial, is_final);
            bnts.state_mut(id).is_error = is_error;
            while matches!(self.peek(), Some(Token::At)) {
                let (aname, avalue) = self.annotation()?;
                if aname == "origin" {
                    bnts.state_mut(id).set_origin(avalue);
                } else {
                    bnts.state_mut(id)
                        .annotations
                        .push(nts_ir::Annotation::Other {
                            name: aname,
                            value: avalue,
                        });
                }
            }
            self.expect(&Token::Semi, "`;`")?;
        }

        while matches!(self.peek(), Some(Token::Int(_))) {
            let from = self.int()? as u32;
            self.expect(&Token::Arrow, "`->`")?;
            let to = self.int()? as u32;
            self.expect(&Token::Colon, "`:`")?;
            let rule = self.parse_rule()?;
            self.expect(&Token::Semi, "`;`")?;
            bnts.add_transition(nts_ir::StateId(from), nts_ir::StateId(to), rule);
        }

        self.expect(&Token::RBrace, "`}`")?;
        Ok(bnts)
    }

    fn parse_rule(&mut self) -> Result<TransitionRule, ParseError> {
        if self.peek_ident_is("call") {
            self.bump();
            let callee = self.ident()?;
            self.expect(&Token::LParen, "`(`")?;
            let mut inputs = Vec::new();
            if !matches!(self.peek(), Some(Token::RParen)) {
                inputs.push(self.term()?);
                while matches!(self.peek(), Some(Token::Comma)) {
                    self.bump();
                    inputs.push(self.term()?);
                }
            }
            self.expect(&Token::RParen, "`)`")?;
            self.expect(&Token::Arrow, "`->`")?;
            self.expect(&Token::LParen, "`(`")?;
            let mut outputs = Vec::new();
            if !matches!(self.peek(), Some(Token::RParen)) {
                outputs.push(self.var_use()?);
                while matches!(self.peek(), Some(Token::Comma)) {
                    self.bump();
                    outputs.push(self.var_use()?);
                }
            }
            self.expect(&Token::RParen, "`)`")?;
            Ok(TransitionRule::Call {
                callee,
                inputs,
                outputs,
            })
        } else {
            Ok(TransitionRule::Formula(self.formula()?))
        }
    }

    fn formula(&mut self) -> Result<Formula, ParseError> {
        match self.peek() {
            Some(Token::Bang) => {
                self.bump();
                self.expect(&Token::LParen, "`(`")?;
                let inner = self.formula()?;
                self.expect(&Token::RParen, "`)`")?;
                Ok(Formula::Not(Box::new(inner)))
            }
            Some(Token::Ident(s)) if s == "forall" => {
                self.bump();
                let bound = self.var_use()?;
                self.expect(&Token::Dot, "`.`")?;
                let body = self.formula()?;
                Ok(Formula::Quantified {
                    bound,
                    body: Box::new(body),
                })
            }
            Some(Token::LParen) => {
                self.bump();
                let mut parts = vec![self.formula()?];
                while matches!(self.peek(), Some(Token::AndAnd)) {
                    self.bump();
                    parts.push(self.formula()?);
                }
                self.expect(&Token::RParen, "`)`")?;
                Ok(Formula::And(parts))
            }
            _ => Ok(Formula::Atomic(self.atomic()?)),
        }
    }

    fn atomic(&mut self) -> Result<AtomicProposition, ParseError> {
        let lhs = self.term()?;

        // `var' = havoc()`.
        if let Term::Var(v) = &lhs {
            if v.primed && matches!(self.peek(), Some(Token::Eq)) {
                let save = self.pos;
                self.bump(); // "="
                if self.peek_ident_is("havoc") {
                    self.bump();
                    self.expect(&Token::LParen, "`(`")?;
                    self.expect(&Token::RParen, "`)`")?;
                    return Ok(AtomicProposition::Havoc(*v));
                }
                self.pos = save;
            }
        }

        // `var'[index] = value` — always read as an array write (see the
        // module-level non-goal note on this choice).
        if let Term::Array(v, index) = &lhs {
            if v.primed && matches!(self.peek(), Some(Token::Eq)) {
                self.bump();
                let value = self.term()?;
                return Ok(AtomicProposition::ArrayWrite {
                    array: *v,
                    index: index.clone(),
                    value: Box::new(value),
                });
            }
        }

        let op = match self.peek() {
            Some(Token::Eq) => Some(RelOp::Eq),
            Some(Token::Ne) => Some(RelOp::Ne),
            Some(Token::Lt) => Some(RelOp::Lt),
            Some(Token::Le) => Some(RelOp::Le),
            Some(Token::Gt) => Some(RelOp::Gt),
            Some(Token::Ge) => Some(RelOp::Ge),
            _ => None,
        };
        match op {
            Some(op) => {
                self.bump();
                let rhs = self.term()?;
                Ok(AtomicProposition::Relation(op, lhs, rhs))
            }
            None => Ok(AtomicProposition::BooleanTerm(lhs)),
        }
    }

    fn term(&mut self) -> Result<Term, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.bump();
                self.expect(&Token::LParen, "`(`")?;
                let inner = self.term()?;
                self.expect(&Token::RParen, "`)`")?;
                Ok(Term::Minus(Box::new(inner)))
            }
            Some(Token::LParen) => {
                self.bump();
                let lhs = self.term()?;
                let op = match self.bump() {
                    Some(Token::Plus) => nts_ir::ArithOp::Add,
                    Some(Token::Minus) => nts_ir::ArithOp::Sub,
                    Some(Token::Star) => nts_ir::ArithOp::Mul,
                    Some(Token::Slash) => nts_ir::ArithOp::Div,
                    Some(Token::Percent) => nts_ir::ArithOp::Mod,
                    Some(t) => {
                        return Err(ParseError::Unexpected {
                            expected: "arithmetic operator",
                            found: t,
                        })
                    }
                    None => return Err(ParseError::UnexpectedEof("arithmetic operator")),
                };
                let rhs = self.term()?;
                self.expect(&Token::RParen, "`)`")?;
                Ok(Term::Arith(op, Box::new(lhs), Box::new(rhs)))
            }
            Some(Token::Int(_)) => Ok(Term::IntConst(self.int()?)),
            Some(Token::Ident(s)) if s == "tid" => {
                self.bump();
                Ok(Term::ThreadId)
            }
            Some(Token::Ident(_)) => {
                let v = self.var_use()?;
                if matches!(self.peek(), Some(Token::LBracket)) {
                    self.bump();
                    let index = self.term()?;
                    self.expect(&Token::RBracket, "`]`")?;
                    Ok(Term::Array(v, Box::new(index)))
                } else {
                    Ok(Term::Var(v))
                }
            }
            Some(t) => Err(ParseError::Unexpected {
                expected: "term",
                found: t.clone(),
            }),
            None => Err(ParseError::UnexpectedEof("term")),
        }
    }
}
