//! Recursive-descent parser for the supported JavaScript subset
//!
//! Produces the same tree shape an ESTree parser would: parenthesized
//! expressions leave no node behind, statement spans include their trailing
//! semicolon, and every node carries start/end positions.

use crate::frontend::{ParseError, SourceLocation};

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};

const RESERVED: &[&str] = &[
    "function", "let", "const", "var", "if", "else", "while", "for", "do", "return", "break",
    "continue", "true", "false", "null", "new", "switch", "case", "default", "throw", "try",
    "catch", "finally", "class", "typeof", "delete", "in", "instanceof", "void", "this",
];

/// Parse source text into a program.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).program()
}

/// Token-stream parser.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

type PResult<T> = Result<T, ParseError>;

impl Parser {
    /// Create a parser over a token stream ending in `Eof`.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse every top-level statement.
    pub fn program(&mut self) -> PResult<Program> {
        let start = self.peek().span.start;
        let mut body = Vec::new();
        while !self.at_eof() {
            body.push(self.statement()?);
        }
        let end = self.peek().span.end;
        Ok(Program {
            body,
            span: Span::new(start, end),
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Token cursor
    // ═══════════════════════════════════════════════════════════════════

    fn peek(&self) -> &Token {
        // tokenize() always appends Eof, and the cursor never passes it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.at_eof() {
            self.pos += 1;
        }
        token
    }

    fn prev_end(&self) -> Position {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span.end)
            .unwrap_or_default()
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        if self.peek().is_punct(p) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, p: &str) -> PResult<Token> {
        if self.peek().is_punct(p) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(&format!("`{}`", p)))
        }
    }

    fn expect_word(&mut self, w: &str) -> PResult<Token> {
        if self.peek().is_word(w) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(&format!("`{}`", w)))
        }
    }

    fn expect_ident(&mut self) -> PResult<(String, Span)> {
        let token = self.peek().clone();
        match &token.kind {
            TokenKind::Word(name) if !RESERVED.contains(&name.as_str()) => {
                self.bump();
                Ok((name.clone(), token.span))
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn unexpected(&self, wanted: &str) -> ParseError {
        let token = self.peek();
        let found = match &token.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("`{}`", token.raw),
        };
        ParseError::new(format!("expected {}, found {}", wanted, found))
            .with_location(SourceLocation::from(token.span.start))
    }

    fn finish_statement(&mut self, kind: NodeKind, start: Position) -> Node {
        self.eat_punct(";");
        Node::new(kind, Span::new(start, self.prev_end()))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════

    fn statement(&mut self) -> PResult<Node> {
        let token = self.peek().clone();
        let start = token.span.start;
        match &token.kind {
            TokenKind::Word(w) if w == "function" => self.function_declaration(),
            TokenKind::Word(w) if DeclKind::from_keyword(w).is_some() => {
                let kind = self.variable_declaration()?;
                Ok(self.finish_statement(kind, start))
            }
            TokenKind::Word(w) if w == "if" => self.if_statement(),
            TokenKind::Word(w) if w == "while" => self.while_statement(),
            TokenKind::Word(w) if w == "for" => self.for_statement(),
            TokenKind::Word(w) if w == "return" => self.return_statement(),
            TokenKind::Word(w) if w == "break" => {
                self.bump();
                Ok(self.finish_statement(NodeKind::BreakStatement, start))
            }
            TokenKind::Word(w) if w == "continue" => {
                self.bump();
                Ok(self.finish_statement(NodeKind::ContinueStatement, start))
            }
            TokenKind::Punct("{") => self.block(),
            TokenKind::Punct(";") => {
                self.bump();
                Ok(Node::new(NodeKind::EmptyStatement, token.span))
            }
            _ => {
                let expr = self.expression()?;
                Ok(self.finish_statement(NodeKind::ExpressionStatement(Box::new(expr)), start))
            }
        }
    }

    fn block(&mut self) -> PResult<Node> {
        let open = self.expect_punct("{")?;
        let mut body = Vec::new();
        while !self.peek().is_punct("}") {
            if self.at_eof() {
                return Err(self.unexpected("`}`"));
            }
            body.push(self.statement()?);
        }
        let close = self.bump();
        Ok(Node::new(
            NodeKind::BlockStatement(body),
            open.span.to(close.span),
        ))
    }

    fn function_declaration(&mut self) -> PResult<Node> {
        let keyword = self.expect_word("function")?;
        let (name, _) = self.expect_ident()?;
        self.expect_punct("(")?;
        let mut params = Vec::new();
        if !self.peek().is_punct(")") {
            loop {
                params.push(self.expect_ident()?.0);
                if !self.eat_punct(",") {
                    break;
                }
            }
        }
        self.expect_punct(")")?;
        let body = self.block()?;
        let span = keyword.span.to(body.span);
        Ok(Node::new(
            NodeKind::FunctionDeclaration {
                name,
                params,
                body: Box::new(body),
            },
            span,
        ))
    }

    // Leaves any trailing `;` to the caller so `for` headers can reuse it.
    fn variable_declaration(&mut self) -> PResult<NodeKind> {
        let keyword = self.bump();
        let kind = match &keyword.kind {
            TokenKind::Word(w) => DeclKind::from_keyword(w),
            _ => None,
        }
        .ok_or_else(|| self.unexpected("`let`, `const` or `var`"))?;

        let mut declarations = Vec::new();
        loop {
            let (name, name_span) = self.expect_ident()?;
            let init = if self.eat_punct("=") {
                Some(self.assignment()?)
            } else {
                None
            };
            let end = init.as_ref().map(|n| n.span.end).unwrap_or(name_span.end);
            declarations.push(Declarator {
                name,
                init,
                span: Span::new(name_span.start, end),
            });
            if !self.eat_punct(",") {
                break;
            }
        }
        Ok(NodeKind::VariableDeclaration { kind, declarations })
    }

    fn parenthesized(&mut self) -> PResult<Node> {
        self.expect_punct("(")?;
        let expr = self.expression()?;
        self.expect_punct(")")?;
        Ok(expr)
    }

    fn if_statement(&mut self) -> PResult<Node> {
        let keyword = self.expect_word("if")?;
        let test = self.parenthesized()?;
        let consequent = self.statement()?;
        let alternate = if self.peek().is_word("else") {
            self.bump();
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        let end = alternate
            .as_ref()
            .map(|n| n.span.end)
            .unwrap_or(consequent.span.end);
        Ok(Node::new(
            NodeKind::IfStatement {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate,
            },
            Span::new(keyword.span.start, end),
        ))
    }

    fn while_statement(&mut self) -> PResult<Node> {
        let keyword = self.expect_word("while")?;
        let test = self.parenthesized()?;
        let body = self.statement()?;
        let span = keyword.span.to(body.span);
        Ok(Node::new(
            NodeKind::WhileStatement {
                test: Box::new(test),
                body: Box::new(body),
            },
            span,
        ))
    }

    fn for_statement(&mut self) -> PResult<Node> {
        let keyword = self.expect_word("for")?;
        self.expect_punct("(")?;

        let init = if self.peek().is_punct(";") {
            None
        } else if matches!(&self.peek().kind, TokenKind::Word(w) if DeclKind::from_keyword(w).is_some()) {
            let start = self.peek().span.start;
            let kind = self.variable_declaration()?;
            Some(Box::new(Node::new(kind, Span::new(start, self.prev_end()))))
        } else {
            Some(Box::new(self.expression()?))
        };
        self.expect_punct(";")?;

        let test = if self.peek().is_punct(";") {
            None
        } else {
            Some(Box::new(self.expression()?))
        };
        self.expect_punct(";")?;

        let update = if self.peek().is_punct(")") {
            None
        } else {
            Some(Box::new(self.expression()?))
        };
        self.expect_punct(")")?;

        let body = self.statement()?;
        let span = keyword.span.to(body.span);
        Ok(Node::new(
            NodeKind::ForStatement {
                init,
                test,
                update,
                body: Box::new(body),
            },
            span,
        ))
    }

    fn return_statement(&mut self) -> PResult<Node> {
        let keyword = self.expect_word("return")?;
        let next = self.peek();
        let bare = next.is_punct(";")
            || next.is_punct("}")
            || matches!(next.kind, TokenKind::Eof)
            || next.span.start.line > keyword.span.start.line;
        let argument = if bare {
            None
        } else {
            Some(Box::new(self.expression()?))
        };
        Ok(self.finish_statement(NodeKind::ReturnStatement { argument }, keyword.span.start))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════

    fn expression(&mut self) -> PResult<Node> {
        self.assignment()
    }

    fn assignment(&mut self) -> PResult<Node> {
        let left = self.conditional()?;
        let operator = match &self.peek().kind {
            TokenKind::Punct(p) => AssignOp::from_str_op(p),
            _ => None,
        };
        let Some(operator) = operator else {
            return Ok(left);
        };

        if !matches!(
            left.kind,
            NodeKind::Identifier(_) | NodeKind::MemberExpression { .. }
        ) {
            return Err(ParseError::new("invalid assignment target")
                .with_location(SourceLocation::from(left.span.start)));
        }
        self.bump();
        let right = self.assignment()?;
        let span = left.span.to(right.span);
        Ok(Node::new(
            NodeKind::AssignmentExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        ))
    }

    fn conditional(&mut self) -> PResult<Node> {
        let test = self.logical_or()?;
        if !self.eat_punct("?") {
            return Ok(test);
        }
        let consequent = self.assignment()?;
        self.expect_punct(":")?;
        let alternate = self.assignment()?;
        let span = test.span.to(alternate.span);
        Ok(Node::new(
            NodeKind::ConditionalExpression {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
            span,
        ))
    }

    fn logical_or(&mut self) -> PResult<Node> {
        let mut left = self.logical_and()?;
        while self.eat_punct("||") {
            let right = self.logical_and()?;
            left = logical(LogicalOp::Or, left, right);
        }
        Ok(left)
    }

    fn logical_and(&mut self) -> PResult<Node> {
        let mut left = self.binary(0)?;
        while self.eat_punct("&&") {
            let right = self.binary(0)?;
            left = logical(LogicalOp::And, left, right);
        }
        Ok(left)
    }

    // Precedence climbing over the binary operator table.
    fn binary(&mut self, min_precedence: u8) -> PResult<Node> {
        let mut left = self.unary()?;
        loop {
            let operator = match &self.peek().kind {
                TokenKind::Punct(p) => BinaryOp::from_str_op(p),
                _ => None,
            };
            let Some(operator) = operator.filter(|op| op.precedence() >= min_precedence) else {
                return Ok(left);
            };
            self.bump();
            let next_min = if operator.is_right_associative() {
                operator.precedence()
            } else {
                operator.precedence() + 1
            };
            let right = self.binary(next_min)?;
            let span = left.span.to(right.span);
            left = Node::new(
                NodeKind::BinaryExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
    }

    fn unary(&mut self) -> PResult<Node> {
        let token = self.peek().clone();
        let operator = match &token.kind {
            TokenKind::Punct("!") => Some(UnaryOp::Not),
            TokenKind::Punct("-") => Some(UnaryOp::Neg),
            TokenKind::Punct("+") => Some(UnaryOp::Plus),
            _ => None,
        };
        if let Some(operator) = operator {
            self.bump();
            let argument = self.unary()?;
            let span = token.span.to(argument.span);
            return Ok(Node::new(
                NodeKind::UnaryExpression {
                    operator,
                    argument: Box::new(argument),
                },
                span,
            ));
        }

        let update = match &token.kind {
            TokenKind::Punct("++") => Some(UpdateOp::Increment),
            TokenKind::Punct("--") => Some(UpdateOp::Decrement),
            _ => None,
        };
        if let Some(operator) = update {
            self.bump();
            let argument = self.unary()?;
            let span = token.span.to(argument.span);
            return Ok(Node::new(
                NodeKind::UpdateExpression {
                    operator,
                    prefix: true,
                    argument: Box::new(argument),
                },
                span,
            ));
        }

        self.postfix()
    }

    fn postfix(&mut self) -> PResult<Node> {
        let argument = self.call_member()?;
        let next = self.peek();
        let same_line = next.span.start.line == argument.span.end.line;
        let operator = match &next.kind {
            TokenKind::Punct("++") if same_line => UpdateOp::Increment,
            TokenKind::Punct("--") if same_line => UpdateOp::Decrement,
            _ => return Ok(argument),
        };
        let op_token = self.bump();
        let span = argument.span.to(op_token.span);
        Ok(Node::new(
            NodeKind::UpdateExpression {
                operator,
                prefix: false,
                argument: Box::new(argument),
            },
            span,
        ))
    }

    fn call_member(&mut self) -> PResult<Node> {
        let mut expr = self.primary()?;
        loop {
            if self.eat_punct("[") {
                let property = self.expression()?;
                let close = self.expect_punct("]")?;
                let span = Span::new(expr.span.start, close.span.end);
                expr = Node::new(
                    NodeKind::MemberExpression {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: true,
                    },
                    span,
                );
            } else if self.eat_punct(".") {
                let (name, name_span) = match &self.peek().kind {
                    TokenKind::Word(name) => {
                        let name = name.clone();
                        (name, self.bump().span)
                    }
                    _ => return Err(self.unexpected("a property name")),
                };
                let span = Span::new(expr.span.start, name_span.end);
                expr = Node::new(
                    NodeKind::MemberExpression {
                        object: Box::new(expr),
                        property: Box::new(Node::new(NodeKind::Identifier(name), name_span)),
                        computed: false,
                    },
                    span,
                );
            } else if self.eat_punct("(") {
                let mut arguments = Vec::new();
                if !self.peek().is_punct(")") {
                    loop {
                        arguments.push(self.assignment()?);
                        if !self.eat_punct(",") {
                            break;
                        }
                    }
                }
                let close = self.expect_punct(")")?;
                let span = Span::new(expr.span.start, close.span.end);
                expr = Node::new(
                    NodeKind::CallExpression {
                        callee: Box::new(expr),
                        arguments,
                    },
                    span,
                );
            } else {
                return Ok(expr);
            }
        }
    }

    fn primary(&mut self) -> PResult<Node> {
        let token = self.peek().clone();
        let kind = match &token.kind {
            TokenKind::Number(n) => NodeKind::Literal(Literal::number(*n, token.raw.clone())),
            TokenKind::Str(s) => NodeKind::Literal(Literal::string(s.clone(), token.raw.clone())),
            TokenKind::Word(w) if w == "true" => NodeKind::Literal(Literal::boolean(true)),
            TokenKind::Word(w) if w == "false" => NodeKind::Literal(Literal::boolean(false)),
            TokenKind::Word(w) if w == "null" => NodeKind::Literal(Literal::null()),
            TokenKind::Word(w) if !RESERVED.contains(&w.as_str()) => NodeKind::Identifier(w.clone()),
            TokenKind::Punct("(") => return self.parenthesized(),
            TokenKind::Punct("[") => return self.array(),
            _ => return Err(self.unexpected("an expression")),
        };
        self.bump();
        Ok(Node::new(kind, token.span))
    }

    fn array(&mut self) -> PResult<Node> {
        let open = self.expect_punct("[")?;
        let mut elements = Vec::new();
        while !self.peek().is_punct("]") {
            elements.push(self.assignment()?);
            if !self.eat_punct(",") {
                break;
            }
        }
        let close = self.expect_punct("]")?;
        Ok(Node::new(
            NodeKind::ArrayExpression(elements),
            open.span.to(close.span),
        ))
    }
}

fn logical(operator: LogicalOp, left: Node, right: Node) -> Node {
    let span = left.span.to(right.span);
    Node::new(
        NodeKind::LogicalExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_expr(src: &str) -> Node {
        let program = parse(src).unwrap();
        match program.body.into_iter().next().map(|n| n.kind) {
            Some(NodeKind::ExpressionStatement(expr)) => *expr,
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let expr = first_expr("a + b * c;");
        match expr.kind {
            NodeKind::BinaryExpression { operator, right, .. } => {
                assert_eq!(operator, BinaryOp::Add);
                assert!(matches!(
                    right.kind,
                    NodeKind::BinaryExpression {
                        operator: BinaryOp::Mul,
                        ..
                    }
                ));
            }
            other => panic!("Expected Binary, got {:?}", other),
        }
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let expr = first_expr("a - b - c");
        match expr.kind {
            NodeKind::BinaryExpression { left, .. } => {
                assert!(matches!(left.kind, NodeKind::BinaryExpression { .. }));
            }
            other => panic!("Expected Binary, got {:?}", other),
        }
    }

    #[test]
    fn test_block_span_ends_after_brace() {
        let program = parse("function f(){\n  return 1;\n}").unwrap();
        match &program.body[0].kind {
            NodeKind::FunctionDeclaration { body, params, .. } => {
                assert!(params.is_empty());
                assert_eq!(body.span.start, Position::new(1, 12));
                assert_eq!(body.span.end, Position::new(3, 1));
            }
            other => panic!("Expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_return_before_newline() {
        let program = parse("function f(){ return\n 1 }").unwrap();
        let NodeKind::FunctionDeclaration { body, .. } = &program.body[0].kind else {
            panic!("Expected function");
        };
        let NodeKind::BlockStatement(stmts) = &body.kind else {
            panic!("Expected block");
        };
        assert!(matches!(stmts[0].kind, NodeKind::ReturnStatement { argument: None }));
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn test_else_if_nests_in_alternate() {
        let program = parse("if (a) { } else if (b) { } else { }").unwrap();
        let NodeKind::IfStatement { alternate, .. } = &program.body[0].kind else {
            panic!("Expected if");
        };
        let alternate = alternate.as_ref().expect("alternate");
        assert!(matches!(
            alternate.kind,
            NodeKind::IfStatement {
                alternate: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_unsupported_forms_still_parse() {
        assert!(matches!(first_expr("f(1)").kind, NodeKind::CallExpression { .. }));
        assert!(matches!(first_expr("a ? b : c").kind, NodeKind::ConditionalExpression { .. }));
        assert!(matches!(first_expr("a && b").kind, NodeKind::LogicalExpression { .. }));
        let program = parse("for (let i = 0; i < 3; i++) {}").unwrap();
        assert!(matches!(program.body[0].kind, NodeKind::ForStatement { .. }));
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = parse("1 = x;").unwrap_err();
        assert!(err.message.contains("invalid assignment target"));
    }

    #[test]
    fn test_missing_paren_reports_found_token() {
        let err = parse("if (x { }").unwrap_err();
        assert_eq!(err.message, "expected `)`, found `{`");
        assert_eq!(err.location, Some(SourceLocation::new(1, 7)));
    }
}
