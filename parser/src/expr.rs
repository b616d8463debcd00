//! Expression parsing: factors (literals, symbols, calls, unary, parenthesized,
//! cast postfixes) and the stack-based precedence climb for binary operators.
//!
//! The precedence climb keeps an explicit `Vec<NodeId>` stack of in-flight `BinaryOp`
//! nodes with strictly decreasing precedence from bottom to top, and splices new operators
//! in by rewriting the appropriate node's `right` child. This mirrors the original C
//! parser's explicit stack rather than the teacher's recursive
//! `parse_expression_with_precedence(min_precedence)` — the stack gives the exact
//! left-associative shape this grammar requires.

use crate::ast::{BinaryOpKind, LiteralValue, Node, NodeFlags, NodeId, NodeKind, UnaryOpKind};
use crate::core::Parser;
use crate::diagnostics::DiagnosticKind;
use lexer::token::{Token, TokenKind};

impl Parser {
    pub fn parse_expression(&mut self) -> NodeId {
        let mut root = self.parse_cast_chain();
        let mut stack: Vec<NodeId> = Vec::new();

        while let Some(op) = BinaryOpKind::from_token_kind(self.cursor.current().kind) {
            let op_token = self.cursor.advance();

            while let Some(&top) = stack.last() {
                if self.binary_op_kind(top).precedence() >= op.precedence() {
                    stack.pop();
                } else {
                    break;
                }
            }

            let left = match stack.last() {
                Some(&top) => self.right_of(top),
                None => root,
            };
            let right = self.parse_cast_chain();

            let flags = if self.is_compile_time(left) && self.is_compile_time(right) {
                NodeFlags::COMPILE_TIME
            } else {
                NodeFlags::empty()
            };
            let node = self.ast.alloc(Node::new(NodeKind::BinaryOp { op, left, right }, op_token).with_flags(flags));

            match stack.last() {
                Some(&top) => self.set_right(top, node),
                None => root = node,
            }
            stack.push(node);
        }

        root
    }

    fn binary_op_kind(&self, id: NodeId) -> BinaryOpKind {
        match self.ast.get(id).kind {
            NodeKind::BinaryOp { op, .. } => op,
            _ => unreachable!("stack only ever holds BinaryOp nodes"),
        }
    }

    fn right_of(&self, id: NodeId) -> NodeId {
        match self.ast.get(id).kind {
            NodeKind::BinaryOp { right, .. } => right,
            _ => unreachable!("stack only ever holds BinaryOp nodes"),
        }
    }

    fn set_right(&mut self, id: NodeId, new_right: NodeId) {
        if let NodeKind::BinaryOp { right, .. } = &mut self.ast.get_mut(id).kind {
            *right = new_right;
        }
    }

    fn is_compile_time(&self, id: NodeId) -> bool {
        self.ast.get(id).is_compile_time()
    }

    /// A factor followed by zero or more `cast <type>` postfixes.
    fn parse_cast_chain(&mut self) -> NodeId {
        let mut node = self.parse_factor();
        while self.cursor.at(TokenKind::Cast) {
            let token = self.cursor.advance();
            let type_node = self.parse_type_expression();
            let flags = if self.is_compile_time(node) { NodeFlags::COMPILE_TIME } else { NodeFlags::empty() };
            node = self
                .ast
                .alloc(Node::new(NodeKind::UnaryOp { op: UnaryOpKind::Cast, operand: node }, token).with_flags(flags).with_type(type_node));
        }
        node
    }

    fn parse_factor(&mut self) -> NodeId {
        let token = self.cursor.current().clone();
        match token.kind {
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expression();
                self.cursor.expect(TokenKind::RParen, &mut self.diagnostics);
                inner
            }
            TokenKind::Minus => {
                self.cursor.advance();
                let operand = self.parse_factor();
                let flags = if self.is_compile_time(operand) { NodeFlags::COMPILE_TIME } else { NodeFlags::empty() };
                self.ast.alloc(Node::new(NodeKind::UnaryOp { op: UnaryOpKind::Negate, operand }, token).with_flags(flags))
            }
            TokenKind::Bang => {
                self.cursor.advance();
                let operand = self.parse_factor();
                let flags = if self.is_compile_time(operand) { NodeFlags::COMPILE_TIME } else { NodeFlags::empty() };
                self.ast.alloc(Node::new(NodeKind::UnaryOp { op: UnaryOpKind::Not, operand }, token).with_flags(flags))
            }
            TokenKind::Identifier => {
                self.cursor.advance();
                let symbol = self.ast.alloc(Node::new(NodeKind::Symbol(token.text.clone()), token.clone()));
                if self.cursor.at(TokenKind::LParen) {
                    self.parse_call(symbol, token)
                } else {
                    symbol
                }
            }
            TokenKind::Integer | TokenKind::Float => {
                self.cursor.advance();
                self.parse_numeric_literal(token)
            }
            TokenKind::True => {
                self.cursor.advance();
                self.ast.alloc(Node::new(NodeKind::Literal(LiteralValue::Bool(true)), token).with_flags(NodeFlags::COMPILE_TIME))
            }
            TokenKind::False => {
                self.cursor.advance();
                self.ast.alloc(Node::new(NodeKind::Literal(LiteralValue::Bool(false)), token).with_flags(NodeFlags::COMPILE_TIME))
            }
            _ => {
                self.cursor.post(
                    &mut self.diagnostics,
                    DiagnosticKind::ExpectedExpression { context: format!("{:?}", token.kind) },
                );
                self.ast.error_id()
            }
        }
    }

    fn parse_call(&mut self, callee: NodeId, call_token: Token) -> NodeId {
        self.cursor.advance(); // consume '('
        let mut args = Vec::new();
        if !self.cursor.at(TokenKind::RParen) {
            loop {
                let arg_token = self.cursor.current().clone();
                let value = self.parse_expression();
                args.push(self.ast.alloc(Node::new(NodeKind::Argument { value }, arg_token)));
                if self.cursor.at(TokenKind::Comma) {
                    self.cursor.advance();
                    if self.cursor.at(TokenKind::RParen) {
                        self.cursor.post(
                            &mut self.diagnostics,
                            DiagnosticKind::UnexpectedToken { found: "trailing comma".into() },
                        );
                        break;
                    }
                    continue;
                }
                break;
            }
        }
        self.cursor.expect(TokenKind::RParen, &mut self.diagnostics);
        self.ast.alloc(Node::new(NodeKind::Call { callee, args }, call_token))
    }

    /// Parses a numeric literal exactly the way `onyxparser.c`'s `parse_numeric_literal`
    /// does: a `.` makes it floating point (`f` suffix forces 32-bit, else 64-bit);
    /// otherwise it is a signed integer, typed `i32` if its magnitude fits, else `i64`.
    fn parse_numeric_literal(&mut self, token: Token) -> NodeId {
        let text = token.text.as_str();
        if token.kind == TokenKind::Float {
            let is_f32 = text.ends_with('f') || text.ends_with('F');
            let trimmed = text.trim_end_matches(['f', 'F']);
            let value = if is_f32 {
                LiteralValue::F32(trimmed.parse::<f32>().unwrap_or(0.0))
            } else {
                LiteralValue::F64(trimmed.parse::<f64>().unwrap_or(0.0))
            };
            return self.ast.alloc(Node::new(NodeKind::Literal(value), token).with_flags(NodeFlags::COMPILE_TIME));
        }

        let raw: i64 = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            u64::from_str_radix(hex, 16).unwrap_or(0) as i64
        } else {
            text.parse::<i64>().unwrap_or(0)
        };
        // §4.2: `i32` if `|value| < 2^32`, else `i64` — matches `onyxparser.c`'s
        // `bh_abs(value) < ((u64) 1 << 32)` exactly, not the narrower i32 range. A magnitude
        // in `[2^31, 2^32)` (e.g. `3000000000`, or `0xFFFFFFFF`) still stays `i32`, truncated
        // (wrapping) into the 32-bit slot the same way the original's signed reinterpretation
        // does.
        let value = if raw.unsigned_abs() < (1u64 << 32) {
            LiteralValue::I32(raw as i32)
        } else {
            LiteralValue::I64(raw)
        };
        self.ast.alloc(Node::new(NodeKind::Literal(value), token).with_flags(NodeFlags::COMPILE_TIME))
    }
}
