//! Top-level parsing: `use` imports, `name :: expr` bindings, `proc`/`global` definitions
//! with their directive grammar, and the two-token speculative directive matcher.
//! Grounded on `onyxparser.c`'s `parse_possible_directive`, `parse_function_definition`,
//! `parse_global_declaration`, and `parse_top_level_statement` — the teacher's fragment has
//! no equivalent grammar at all (no directives, no `::` bindings).

use crate::ast::{BasicType, ForeignBinding, Node, NodeFlags, NodeId, NodeKind};
use crate::core::{ParseResults, Parser};
use crate::diagnostics::DiagnosticKind;
use lexer::token::TokenKind;

#[derive(Default)]
struct ProcDirectives {
    flags: NodeFlags,
    intrinsic_name: Option<String>,
    foreign: Option<ForeignBinding>,
    export_name: Option<String>,
}

impl Parser {
    pub fn parse_program(&mut self) -> ParseResults {
        let mut results = ParseResults::default();
        while !self.cursor.at_eof() {
            match self.cursor.current().kind {
                TokenKind::Use => {
                    let id = self.parse_use();
                    results.uses.push(id);
                }
                TokenKind::Semicolon => {
                    self.cursor.advance();
                }
                TokenKind::Identifier if self.cursor.peek_next().kind == TokenKind::ColonColon => {
                    let id = self.parse_binding();
                    results.bindings.push(id);
                    if let NodeKind::Binding { node, .. } = &self.ast.get(id).kind {
                        results.pending.push(*node);
                    }
                }
                _ => {
                    let found = format!("{:?}", self.cursor.current().kind);
                    self.cursor.post(&mut self.diagnostics, DiagnosticKind::UnexpectedToken { found });
                    self.cursor.advance();
                }
            }
        }
        results
    }

    fn parse_use(&mut self) -> NodeId {
        let token = self.cursor.advance(); // 'use'
        let filename_token = self.cursor.expect(TokenKind::StringLiteral, &mut self.diagnostics);
        self.expect_semicolon();
        self.ast.alloc(Node::new(NodeKind::Use { filename: filename_token.text }, token))
    }

    fn parse_binding(&mut self) -> NodeId {
        let name_token = self.cursor.advance(); // symbol
        self.cursor.expect(TokenKind::ColonColon, &mut self.diagnostics);
        let node = self.parse_top_level_expression();

        let needs_default_export = matches!(
            &self.ast.get(node).kind,
            NodeKind::Function { export_name: None, .. } | NodeKind::Global { export_name: None, .. }
        );
        if needs_default_export {
            match &mut self.ast.get_mut(node).kind {
                NodeKind::Function { export_name, .. } => *export_name = Some(name_token.text.clone()),
                NodeKind::Global { export_name, .. } => *export_name = Some(name_token.text.clone()),
                _ => {}
            }
            self.ast.get_mut(node).flags |= NodeFlags::EXPORTED;
        }

        self.ast.alloc(Node::new(NodeKind::Binding { name: name_token.text.clone(), node }, name_token))
    }

    fn parse_top_level_expression(&mut self) -> NodeId {
        match self.cursor.current().kind {
            TokenKind::Proc => self.parse_function_definition(),
            TokenKind::Global => self.parse_global_declaration(),
            _ => self.parse_expression(),
        }
    }

    #[tracing::instrument(skip(self))]
    fn parse_function_definition(&mut self) -> NodeId {
        let token = self.cursor.advance(); // 'proc'
        let directives = self.parse_directives();
        self.cursor.expect(TokenKind::LParen, &mut self.diagnostics);
        let params = self.parse_function_params();
        self.cursor.expect(TokenKind::RParen, &mut self.diagnostics);

        let return_type = if self.cursor.at(TokenKind::Arrow) {
            self.cursor.advance();
            self.parse_type_expression()
        } else {
            self.ast.alloc(Node::new(NodeKind::BasicType(BasicType::Void), token.clone()))
        };
        let param_count = self.ast.chain(params).len();
        let func_type = self.ast.alloc(Node::new(NodeKind::FunctionType { params, return_type, param_count }, token.clone()));

        let body = self.parse_block();

        let node = Node::new(
            NodeKind::Function {
                params,
                body: Some(body),
                intrinsic_name: directives.intrinsic_name,
                foreign: directives.foreign,
                export_name: directives.export_name,
            },
            token,
        )
        .with_flags(directives.flags)
        .with_type(func_type);
        self.ast.alloc(node)
    }

    #[tracing::instrument(skip(self))]
    fn parse_global_declaration(&mut self) -> NodeId {
        let token = self.cursor.advance(); // 'global'
        let directives = self.parse_directives();
        let type_node = self.parse_type_expression();
        let node = Node::new(NodeKind::Global { foreign: directives.foreign, export_name: directives.export_name }, token)
            .with_flags(directives.flags | NodeFlags::LVALUE)
            .with_type(type_node);
        self.ast.alloc(node)
    }

    fn parse_function_params(&mut self) -> Option<NodeId> {
        if self.cursor.at(TokenKind::RParen) {
            return None;
        }
        let mut head = None;
        let mut tail: Option<NodeId> = None;
        loop {
            let name_token = self.cursor.expect(TokenKind::Identifier, &mut self.diagnostics);
            self.cursor.expect(TokenKind::Colon, &mut self.diagnostics);
            let type_node = self.parse_type_expression();
            let param = self.ast.alloc(
                Node::new(NodeKind::Param { name: name_token.text.clone() }, name_token)
                    .with_flags(NodeFlags::LVALUE)
                    .with_type(type_node),
            );
            match tail {
                None => head = Some(param),
                Some(t) => self.ast.get_mut(t).next = Some(param),
            }
            tail = Some(param);
            if self.cursor.at(TokenKind::Comma) {
                self.cursor.advance();
                continue;
            }
            break;
        }
        head
    }

    /// Tentatively consumes `#<name>`. On a match both tokens stay consumed; on a
    /// mismatch the `#` is rewound so the caller can try a different directive name (the
    /// one multi-token speculation this parser performs).
    fn parse_possible_directive(&mut self, name: &str) -> bool {
        if !self.cursor.at(TokenKind::Hash) {
            return false;
        }
        self.cursor.advance(); // '#'
        if self.cursor.current().kind == TokenKind::Identifier && self.cursor.current().text == name {
            self.cursor.advance();
            true
        } else {
            self.cursor.rewind();
            false
        }
    }

    fn parse_directives(&mut self) -> ProcDirectives {
        let mut directives = ProcDirectives::default();
        loop {
            if self.parse_possible_directive("intrinsic") {
                directives.flags |= NodeFlags::INTRINSIC;
                if self.cursor.at(TokenKind::StringLiteral) {
                    directives.intrinsic_name = Some(self.cursor.advance().text);
                }
            } else if self.parse_possible_directive("inline") {
                directives.flags |= NodeFlags::INLINE;
            } else if self.parse_possible_directive("foreign") {
                directives.flags |= NodeFlags::FOREIGN;
                let module = self.cursor.expect(TokenKind::StringLiteral, &mut self.diagnostics).text;
                let name = self.cursor.expect(TokenKind::StringLiteral, &mut self.diagnostics).text;
                directives.foreign = Some(ForeignBinding { module, name });
            } else if self.parse_possible_directive("export") {
                directives.flags |= NodeFlags::EXPORTED;
                if self.cursor.at(TokenKind::StringLiteral) {
                    directives.export_name = Some(self.cursor.advance().text);
                }
            } else if self.cursor.at(TokenKind::Hash) {
                self.cursor.advance(); // '#'
                let name_token = if self.cursor.current().kind == TokenKind::Identifier {
                    self.cursor.advance()
                } else {
                    self.cursor.current().clone()
                };
                self.diagnostics.push(DiagnosticKind::UnknownDirective { name: name_token.text }, name_token.position);
            } else {
                break;
            }
        }
        directives
    }
}
