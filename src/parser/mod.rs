//! Shunting-yard parser.
//!
//! Statements end with `;`. Within a statement value tokens become
//! independent leaves on the operand stack and operators are reduced by
//! precedence and associativity. An identifier that follows an operand is
//! read as an infix application of a declared binary function.

mod cursor;

use crate::ast::{NodeId, NodeKind, NodeRef, SyntaxTree};
use crate::error::{CompilerFault, ErrorKind, Result};
use crate::lexer::{Token, TokenKind};
use crate::symtab::{Symbol, SymbolTable};
use cursor::Cursor;
use log::{debug, trace};

/// Parses `tokens` with an empty symbol table.
pub fn parse(tokens: &[Token]) -> Result<SyntaxTree> {
    let mut symbols = SymbolTable::new();
    parse_with(tokens, &mut symbols)
}

/// Parses `tokens`, resolving applied identifiers against `symbols`.
///
/// Type signatures (`name : T -> T;`) declare `name` in `symbols` so later
/// statements may apply it.
pub fn parse_with(tokens: &[Token], symbols: &mut SymbolTable) -> Result<SyntaxTree> {
    let mut parser = Parser::new(symbols);
    let mut cursor = Cursor::new(tokens);
    for token in cursor.by_ref() {
        parser.feed(token)?;
    }
    parser.finish(cursor.last())
}

struct Parser<'t, 's> {
    tree: SyntaxTree,
    symbols: &'s mut SymbolTable,
    operands: Vec<NodeId>,
    operators: Vec<&'t Token>,
    expects_operand: bool,
}

impl<'t, 's> Parser<'t, 's> {
    fn new(symbols: &'s mut SymbolTable) -> Self {
        Self {
            tree: SyntaxTree::new(),
            symbols,
            operands: Vec::new(),
            operators: Vec::new(),
            expects_operand: true,
        }
    }

    fn feed(&mut self, token: &'t Token) -> Result<()> {
        trace!("{}: {token}", token.position());
        match token.kind() {
            TokenKind::Identifier if !self.expects_operand => {
                self.push_applied(token)?;
                self.expects_operand = true;
            }
            kind if kind.is_value() => {
                let leaf = self.tree.add_token(token);
                self.operands.push(leaf);
                self.expects_operand = false;
            }
            kind if kind.is_binary_op() => {
                self.push_operator(token)?;
                self.expects_operand = true;
            }
            TokenKind::LParen => {
                self.operators.push(token);
                self.expects_operand = true;
            }
            TokenKind::RParen => {
                self.close_paren(token)?;
                self.expects_operand = false;
            }
            TokenKind::Semicolon => {
                self.end_statement(token)?;
                self.expects_operand = true;
            }
            _ => (),
        }
        Ok(())
    }

    fn push_operator(&mut self, token: &'t Token) -> Result<()> {
        while let Some(&top) = self.operators.last() {
            if top.kind() == TokenKind::LParen || !token.yields_to(top) {
                break;
            }
            self.operators.pop();
            self.reduce(top)?;
        }
        self.operators.push(token);
        Ok(())
    }

    fn push_applied(&mut self, token: &'t Token) -> Result<()> {
        let name = token.text();
        let position = token.position();
        let Some(symbol) = self.symbols.get(name) else {
            return Err(ErrorKind::UnknownSymbol(name.to_owned())
                .at(position.clone())
                .into());
        };
        if symbol.arg_count != 2 {
            let cause = format!(
                "`{name}` takes {} arguments, only binary functions can be applied",
                symbol.arg_count
            );
            let fault = CompilerFault::unimplemented("function application", cause, Some(position.clone()));
            return Err(fault.into());
        }
        self.push_operator(token)
    }

    fn reduce(&mut self, operator: &Token) -> Result<()> {
        let right = self.operands.pop();
        let left = self.operands.pop();
        let (Some(left), Some(right)) = (left, right) else {
            let err = ErrorKind::MissingOperand(operator.text().to_owned());
            return Err(err.at(operator.position().clone()).into());
        };
        let node = self.tree.add_token(operator);
        self.tree.append_child(node, left);
        self.tree.append_child(node, right);
        self.operands.push(node);
        Ok(())
    }

    fn close_paren(&mut self, paren: &Token) -> Result<()> {
        loop {
            match self.operators.pop() {
                None => {
                    let err = ErrorKind::MismatchedParenthesis.at(paren.position().clone());
                    return Err(err.into());
                }
                Some(top) if top.kind() == TokenKind::LParen => return Ok(()),
                Some(top) => self.reduce(top)?,
            }
        }
    }

    fn end_statement(&mut self, semicolon: &Token) -> Result<()> {
        while let Some(top) = self.operators.pop() {
            if top.kind() == TokenKind::LParen {
                let err = ErrorKind::MismatchedParenthesis.at(top.position().clone());
                return Err(err.into());
            }
            self.reduce(top)?;
        }

        if self.operands.len() > 1 {
            let err = ErrorKind::DanglingOperand.at(semicolon.position().clone());
            return Err(err.into());
        }
        if let Some(statement) = self.operands.pop() {
            self.declare(statement);
            let root = self.tree.root_id();
            self.tree.append_child(root, statement);
        }
        Ok(())
    }

    /// Records `name : signature` statements in the symbol table.
    fn declare(&mut self, statement: NodeId) {
        let node = self.tree.get(statement);
        if node.kind() != NodeKind::HasType {
            return;
        }
        let Some((name, signature)) = node.operands() else {
            return;
        };
        let Some(name) = name.value().filter(|_| name.kind() == NodeKind::Identifier) else {
            return;
        };
        let arg_count = arrow_count(signature);
        let symbol = Symbol::function(signature_text(signature), arg_count);
        debug!("declared `{name}` : {} ({arg_count} arguments)", symbol.value);
        self.symbols.declare(name, symbol);
    }

    fn finish(self, last: Option<&Token>) -> Result<SyntaxTree> {
        if let Some(last) = last {
            if !self.operands.is_empty() || !self.operators.is_empty() {
                let err = ErrorKind::UnterminatedStatement.at(last.position().clone());
                return Err(err.into());
            }
        }
        debug!("parsed {} statements", self.tree.root().child_count());
        Ok(self.tree)
    }
}

/// Arrows along the right spine of a signature, i.e. its arity.
fn arrow_count(signature: NodeRef) -> usize {
    let mut count = 0;
    let mut node = signature;
    while node.kind() == NodeKind::MapTo {
        count += 1;
        match node.child(1) {
            Some(result) => node = result,
            None => break,
        }
    }
    count
}

fn signature_text(signature: NodeRef) -> String {
    match (signature.kind(), signature.operands()) {
        (NodeKind::MapTo, Some((from, to))) => {
            let from = match from.kind() {
                NodeKind::MapTo => format!("({})", signature_text(from)),
                _ => signature_text(from),
            };
            format!("{from} -> {}", signature_text(to))
        }
        _ => signature.value().unwrap_or_default().to_owned(),
    }
}
