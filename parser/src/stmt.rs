//! Statement parsing: blocks, declarations, assignments, if/elseif/else chains, while,
//! return, break/continue. Grounded on the teacher's `parser/src/block.rs`
//! (`parse_if_statement`, `parse_while_loop`, `parse_initialization`) for the overall
//! dispatch shape, and on `onyxparser.c`'s `parse_symbol_statement` for the exact
//! declaration/assignment/compound-assignment desugaring the teacher's fragment has no
//! equivalent of.

use crate::ast::{BinaryOpKind, Node, NodeFlags, NodeId, NodeKind};
use crate::core::Parser;
use crate::diagnostics::DiagnosticKind;
use lexer::token::{Token, TokenKind};

impl Parser {
    pub fn parse_statement(&mut self) -> NodeId {
        match self.cursor.current().kind {
            TokenKind::Return => self.parse_return(),
            TokenKind::LBrace => self.parse_block(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Break => {
                let token = self.cursor.advance();
                let id = self.ast.alloc(Node::new(NodeKind::Break, token));
                self.expect_semicolon();
                id
            }
            TokenKind::Continue => {
                let token = self.cursor.advance();
                let id = self.ast.alloc(Node::new(NodeKind::Continue, token));
                self.expect_semicolon();
                id
            }
            TokenKind::Identifier => {
                if let Some(id) = self.try_parse_symbol_statement() {
                    id
                } else {
                    let expr = self.parse_expression();
                    self.expect_semicolon();
                    expr
                }
            }
            TokenKind::Semicolon => {
                // A stray semicolon resolves to the error sentinel without diagnosing;
                // `parse_block`'s caller will simply skip past it.
                let token = self.cursor.advance();
                let _ = token;
                self.ast.error_id()
            }
            _ => {
                let expr = self.parse_expression();
                self.expect_semicolon();
                expr
            }
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn parse_block(&mut self) -> NodeId {
        let token = self.cursor.expect(TokenKind::LBrace, &mut self.diagnostics);
        let mut head: Option<NodeId> = None;
        let mut tail: Option<NodeId> = None;
        while !self.cursor.at(TokenKind::RBrace) && !self.cursor.at_eof() {
            let stmt = self.parse_statement();
            // The shared error sentinel is never mutated or linked into an owned list (§3.2);
            // a stray `;` (or any other statement that resolved to it) simply contributes
            // nothing to this block's `next` chain.
            if self.ast.is_error(stmt) {
                continue;
            }
            match tail {
                None => head = Some(stmt),
                Some(t) => self.ast.get_mut(t).next = Some(stmt),
            }
            tail = Some(stmt);
        }
        self.cursor.expect(TokenKind::RBrace, &mut self.diagnostics);
        self.ast.alloc(Node::new(NodeKind::Block { body: head }, token))
    }

    fn parse_return(&mut self) -> NodeId {
        let token = self.cursor.advance();
        let value = if self.cursor.at(TokenKind::Semicolon) { None } else { Some(self.parse_expression()) };
        let node = self.ast.alloc(Node::new(NodeKind::Return { value }, token));
        self.expect_semicolon();
        node
    }

    fn parse_if(&mut self) -> NodeId {
        let token = self.cursor.advance(); // 'if'
        let cond = self.parse_expression();
        let then_branch = self.parse_block();
        let else_branch = self.parse_else_tail();
        self.ast.alloc(Node::new(NodeKind::If { cond, then_branch, else_branch }, token))
    }

    /// `elseif` chains thread through the parent If's `else_branch`, ending optionally in
    /// a plain `else` block.
    fn parse_else_tail(&mut self) -> Option<NodeId> {
        if self.cursor.at(TokenKind::ElseIf) {
            let token = self.cursor.advance();
            let cond = self.parse_expression();
            let then_branch = self.parse_block();
            let else_branch = self.parse_else_tail();
            Some(self.ast.alloc(Node::new(NodeKind::If { cond, then_branch, else_branch }, token)))
        } else if self.cursor.at(TokenKind::Else) {
            self.cursor.advance();
            Some(self.parse_block())
        } else {
            None
        }
    }

    fn parse_while(&mut self) -> NodeId {
        let token = self.cursor.advance();
        let cond = self.parse_expression();
        let body = self.parse_block();
        self.ast.alloc(Node::new(NodeKind::While { cond, body }, token))
    }

    fn try_parse_symbol_statement(&mut self) -> Option<NodeId> {
        if self.cursor.current().kind != TokenKind::Identifier {
            return None;
        }
        match self.cursor.peek_next().kind {
            TokenKind::Colon | TokenKind::ColonEqual | TokenKind::ColonColon => Some(self.parse_declaration()),
            TokenKind::Equal => Some(self.parse_assignment()),
            TokenKind::PlusEqual
            | TokenKind::MinusEqual
            | TokenKind::StarEqual
            | TokenKind::SlashEqual
            | TokenKind::PercentEqual => Some(self.parse_compound_assignment()),
            _ => None,
        }
    }

    fn parse_declaration(&mut self) -> NodeId {
        let name_token = self.cursor.advance();
        let mut type_node: Option<NodeId> = None;
        let mut is_const = false;
        let mut initializer: Option<(Token, NodeId)> = None;

        match self.cursor.current().kind {
            TokenKind::ColonEqual => {
                let op = self.cursor.advance();
                let value = self.parse_expression();
                initializer = Some((op, value));
            }
            TokenKind::ColonColon => {
                let op = self.cursor.advance();
                is_const = true;
                let value = self.parse_expression();
                initializer = Some((op, value));
            }
            TokenKind::Colon => {
                self.cursor.advance();
                type_node = Some(self.parse_type_expression());
                if self.cursor.at(TokenKind::ColonColon) {
                    let op = self.cursor.advance();
                    is_const = true;
                    let value = self.parse_expression();
                    initializer = Some((op, value));
                } else if self.cursor.at(TokenKind::Equal) {
                    let op = self.cursor.advance();
                    let value = self.parse_expression();
                    initializer = Some((op, value));
                }
            }
            other => {
                self.cursor.post(
                    &mut self.diagnostics,
                    DiagnosticKind::UnexpectedToken { found: format!("{:?}", other) },
                );
            }
        }

        let mut local_node =
            Node::new(NodeKind::Local { name: name_token.text.clone(), is_const }, name_token.clone())
                .with_flags(NodeFlags::LVALUE);
        if let Some(t) = type_node {
            local_node = local_node.with_type(t);
        }
        let local_id = self.ast.alloc(local_node);

        if let Some((op_token, value)) = initializer {
            let target = self.ast.alloc(
                Node::new(NodeKind::Symbol(name_token.text.clone()), name_token.clone()).with_flags(NodeFlags::LVALUE),
            );
            let flags = if self.ast.get(value).is_compile_time() { NodeFlags::COMPILE_TIME } else { NodeFlags::empty() };
            let assign = self.ast.alloc(Node::new(NodeKind::Assign { target, value }, op_token).with_flags(flags));
            self.ast.get_mut(local_id).next = Some(assign);
        }

        self.expect_semicolon();
        local_id
    }

    fn parse_assignment(&mut self) -> NodeId {
        let name_token = self.cursor.advance();
        let target = self.ast.alloc(
            Node::new(NodeKind::Symbol(name_token.text.clone()), name_token.clone()).with_flags(NodeFlags::LVALUE),
        );
        let op_token = self.cursor.advance(); // '='
        let value = self.parse_expression();
        let node = self.ast.alloc(Node::new(NodeKind::Assign { target, value }, op_token));
        self.expect_semicolon();
        node
    }

    fn parse_compound_assignment(&mut self) -> NodeId {
        let name_token = self.cursor.advance();
        let op_token = self.cursor.advance();
        let bin_op = BinaryOpKind::from_compound_assign(op_token.kind)
            .expect("try_parse_symbol_statement only dispatches here on a compound-assign token");

        let lhs_read = self.ast.alloc(Node::new(NodeKind::Symbol(name_token.text.clone()), name_token.clone()));
        let rhs = self.parse_expression();
        let bin_flags = if self.ast.get(lhs_read).is_compile_time() && self.ast.get(rhs).is_compile_time() {
            NodeFlags::COMPILE_TIME
        } else {
            NodeFlags::empty()
        };
        let bin = self
            .ast
            .alloc(Node::new(NodeKind::BinaryOp { op: bin_op, left: lhs_read, right: rhs }, op_token.clone()).with_flags(bin_flags));

        let target = self.ast.alloc(
            Node::new(NodeKind::Symbol(name_token.text.clone()), name_token.clone()).with_flags(NodeFlags::LVALUE),
        );
        let node = self.ast.alloc(Node::new(NodeKind::Assign { target, value: bin }, op_token));
        self.expect_semicolon();
        node
    }

    /// Requires a trailing `;`; if missing, diagnoses once and resynchronizes via `find`.
    pub(crate) fn expect_semicolon(&mut self) {
        if !self.cursor.at(TokenKind::Semicolon) {
            let found = format!("{:?}", self.cursor.current().kind);
            self.cursor.post(&mut self.diagnostics, DiagnosticKind::ExpectedToken { expected: "Semicolon".into(), found });
            self.cursor.find(TokenKind::Semicolon);
        }
        if self.cursor.at(TokenKind::Semicolon) {
            self.cursor.advance();
        }
    }
}
