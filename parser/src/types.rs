//! Type expressions: chains of `^` pointer markers terminating in either a named basic
//! type or a symbol reference. Grounded on the teacher's token-to-`DataType` mapping idiom
//! in `parser/src/primitive.rs::parse_type`, generalized to the pointer-chain grammar the
//! teacher's fragment never needed.

use crate::ast::{BasicType, Node, NodeId, NodeKind};
use crate::core::Parser;
use crate::diagnostics::DiagnosticKind;
use lexer::token::TokenKind;

impl Parser {
    /// Parses a left-to-right chain of `^` pointer markers terminating in a named type.
    pub fn parse_type_expression(&mut self) -> NodeId {
        if self.cursor.at(TokenKind::Caret) {
            let token = self.cursor.advance();
            let elem = self.parse_type_expression();
            return self.ast.alloc(Node::new(NodeKind::PointerType { elem }, token));
        }

        let token = self.cursor.current().clone();
        if token.kind != TokenKind::Identifier {
            self.cursor.post(
                &mut self.diagnostics,
                DiagnosticKind::UnexpectedToken { found: format!("{:?}", token.kind) },
            );
            self.cursor.advance();
            return self.ast.error_id();
        }
        self.cursor.advance();

        if let Some(basic) = basic_type_from_name(&token.text) {
            self.ast.alloc(Node::new(NodeKind::BasicType(basic), token))
        } else {
            self.ast.alloc(Node::new(NodeKind::Symbol(token.text.clone()), token))
        }
    }
}

fn basic_type_from_name(name: &str) -> Option<BasicType> {
    Some(match name {
        "void" => BasicType::Void,
        "bool" => BasicType::Bool,
        "i8" => BasicType::I8,
        "i16" => BasicType::I16,
        "i32" => BasicType::I32,
        "i64" => BasicType::I64,
        "u8" => BasicType::U8,
        "u16" => BasicType::U16,
        "u32" => BasicType::U32,
        "u64" => BasicType::U64,
        "f32" => BasicType::F32,
        "f64" => BasicType::F64,
        "rawptr" => BasicType::RawPtr,
        _ => return None,
    })
}
