//! Syntax tree for the supported JavaScript subset
//!
//! Node kinds mirror ESTree names so that trees produced by external parsers
//! map onto them one to one. Kinds the engine deliberately does not handle
//! are still modelled, so that encountering one is an explicit dispatch arm
//! rather than a parse failure.

use std::fmt;

/// A point in the source.
///
/// `line` is 1-based and `column` is a 0-based character offset, following
/// the ESTree `loc` convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column offset (0-indexed)
    pub column: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Start and (exclusive) end of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// First character of the node
    pub start: Position,
    /// One past the last character of the node
    pub end: Position,
}

impl Span {
    /// Create a span from two positions.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span covering `self` through `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start, other.end)
    }
}

/// A parsed program: the top-level statements in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements
    pub body: Vec<Node>,
    /// Span of the whole program
    pub span: Span,
}

/// A syntax node with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What the node is
    pub kind: NodeKind,
    /// Where it is
    pub span: Span,
}

impl Node {
    /// Create a node.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Line the node starts on.
    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    /// ESTree name of this node's kind.
    pub fn kind_name(&self) -> &str {
        self.kind.name()
    }
}

/// `let`, `const` or `var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// `let`
    Let,
    /// `const`
    Const,
    /// `var`
    Var,
}

impl DeclKind {
    /// Keyword text.
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Let => "let",
            DeclKind::Const => "const",
            DeclKind::Var => "var",
        }
    }

    /// Parse a keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "let" => Some(DeclKind::Let),
            "const" => Some(DeclKind::Const),
            "var" => Some(DeclKind::Var),
            _ => None,
        }
    }
}

/// One `name = init` inside a variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    /// Declared name
    pub name: String,
    /// Initializer, if any
    pub init: Option<Node>,
    /// Span of the declarator
    pub span: Span,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `**`
    Pow,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNe,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl BinaryOp {
    /// Operator text.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNe => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }

    /// Parse operator text.
    pub fn from_str_op(op: &str) -> Option<Self> {
        Some(match op {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Rem,
            "**" => BinaryOp::Pow,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::Ne,
            "===" => BinaryOp::StrictEq,
            "!==" => BinaryOp::StrictNe,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::Le,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::Ge,
            _ => return None,
        })
    }

    /// Binding strength, higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::StrictEq | BinaryOp::StrictNe => 1,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => 2,
            BinaryOp::Add | BinaryOp::Sub => 3,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 4,
            BinaryOp::Pow => 5,
        }
    }

    /// `**` groups to the right, everything else to the left.
    pub fn is_right_associative(self) -> bool {
        matches!(self, BinaryOp::Pow)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `&&` and `||`. Parsed, but outside the supported subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// `&&`
    And,
    /// `||`
    Or,
}

/// Prefix unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
    /// `+`
    Plus,
}

impl UnaryOp {
    /// Operator text.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
        }
    }
}

/// `++` or `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    /// `++`
    Increment,
    /// `--`
    Decrement,
}

impl UpdateOp {
    /// Operator text.
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
        }
    }

    /// The arithmetic the update stands for.
    pub fn as_binary(self) -> BinaryOp {
        match self {
            UpdateOp::Increment => BinaryOp::Add,
            UpdateOp::Decrement => BinaryOp::Sub,
        }
    }
}

/// `=` or a compound assignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `op=`
    Compound(BinaryOp),
}

impl AssignOp {
    /// Operator text.
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Compound(BinaryOp::Add) => "+=",
            AssignOp::Compound(BinaryOp::Sub) => "-=",
            AssignOp::Compound(BinaryOp::Mul) => "*=",
            AssignOp::Compound(BinaryOp::Div) => "/=",
            AssignOp::Compound(BinaryOp::Rem) => "%=",
            AssignOp::Compound(BinaryOp::Pow) => "**=",
            AssignOp::Compound(_) => "?=",
        }
    }

    /// Parse operator text.
    pub fn from_str_op(op: &str) -> Option<Self> {
        Some(match op {
            "=" => AssignOp::Assign,
            "+=" => AssignOp::Compound(BinaryOp::Add),
            "-=" => AssignOp::Compound(BinaryOp::Sub),
            "*=" => AssignOp::Compound(BinaryOp::Mul),
            "/=" => AssignOp::Compound(BinaryOp::Div),
            "%=" => AssignOp::Compound(BinaryOp::Rem),
            "**=" => AssignOp::Compound(BinaryOp::Pow),
            _ => return None,
        })
    }
}

/// Literal value with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Interpreted value
    pub value: LiteralValue,
    /// Exactly as written
    pub raw: String,
}

impl Literal {
    /// Numeric literal.
    pub fn number(n: f64, raw: impl Into<String>) -> Self {
        Self {
            value: LiteralValue::Number(n),
            raw: raw.into(),
        }
    }

    /// String literal.
    pub fn string(s: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            value: LiteralValue::Str(s.into()),
            raw: raw.into(),
        }
    }

    /// Boolean literal.
    pub fn boolean(b: bool) -> Self {
        Self {
            value: LiteralValue::Bool(b),
            raw: b.to_string(),
        }
    }

    /// `null`.
    pub fn null() -> Self {
        Self {
            value: LiteralValue::Null,
            raw: "null".to_string(),
        }
    }
}

/// Interpreted literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Any number
    Number(f64),
    /// String contents, escapes resolved
    Str(String),
    /// `true` / `false`
    Bool(bool),
    /// `null`
    Null,
}

/// Every node kind a frontend can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // ═══════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════
    /// `function name(params) { body }`
    FunctionDeclaration {
        /// Function name
        name: String,
        /// Parameter names
        params: Vec<String>,
        /// Body block
        body: Box<Node>,
    },
    /// `while (test) body`
    WhileStatement {
        /// Loop condition
        test: Box<Node>,
        /// Loop body
        body: Box<Node>,
    },
    /// `if (test) consequent else alternate`
    IfStatement {
        /// Branch condition
        test: Box<Node>,
        /// Taken branch
        consequent: Box<Node>,
        /// `else` branch, possibly another `if`
        alternate: Option<Box<Node>>,
    },
    /// `return argument;`
    ReturnStatement {
        /// Returned expression
        argument: Option<Box<Node>>,
    },
    /// `let a = 1, b;`
    VariableDeclaration {
        /// Declaration keyword
        kind: DeclKind,
        /// One entry per declared name
        declarations: Vec<Declarator>,
    },
    /// An expression used as a statement
    ExpressionStatement(Box<Node>),
    /// `{ ... }`
    BlockStatement(Vec<Node>),

    // ═══════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════
    /// `left op right` where `left` is an identifier or member
    AssignmentExpression {
        /// Assignment operator
        operator: AssignOp,
        /// Target
        left: Box<Node>,
        /// Assigned value
        right: Box<Node>,
    },
    /// `left op right`
    BinaryExpression {
        /// Operator
        operator: BinaryOp,
        /// Left operand
        left: Box<Node>,
        /// Right operand
        right: Box<Node>,
    },
    /// `op argument`
    UnaryExpression {
        /// Operator
        operator: UnaryOp,
        /// Operand
        argument: Box<Node>,
    },
    /// `++x`, `x--`
    UpdateExpression {
        /// Operator
        operator: UpdateOp,
        /// Whether the operator precedes the operand
        prefix: bool,
        /// Operand
        argument: Box<Node>,
    },
    /// `object[property]` or `object.property`
    MemberExpression {
        /// Indexed value
        object: Box<Node>,
        /// Index expression, or an identifier for dot access
        property: Box<Node>,
        /// `true` for `[...]` access
        computed: bool,
    },
    /// A name
    Identifier(String),
    /// A literal
    Literal(Literal),
    /// `[a, b, c]`
    ArrayExpression(Vec<Node>),

    // ═══════════════════════════════════════════════════════════════════
    // Recognised but unsupported
    // ═══════════════════════════════════════════════════════════════════
    /// `for (init; test; update) body`
    ForStatement {
        /// Initializer
        init: Option<Box<Node>>,
        /// Condition
        test: Option<Box<Node>>,
        /// Step
        update: Option<Box<Node>>,
        /// Body
        body: Box<Node>,
    },
    /// `callee(arguments)`
    CallExpression {
        /// Called expression
        callee: Box<Node>,
        /// Arguments
        arguments: Vec<Node>,
    },
    /// `test ? consequent : alternate`
    ConditionalExpression {
        /// Condition
        test: Box<Node>,
        /// Value when true
        consequent: Box<Node>,
        /// Value when false
        alternate: Box<Node>,
    },
    /// `left && right`, `left || right`
    LogicalExpression {
        /// Operator
        operator: LogicalOp,
        /// Left operand
        left: Box<Node>,
        /// Right operand
        right: Box<Node>,
    },
    /// `break;`
    BreakStatement,
    /// `continue;`
    ContinueStatement,
    /// A lone `;`
    EmptyStatement,
    /// A kind the frontend passed through without modelling it
    Foreign(String),
}

impl NodeKind {
    /// ESTree name of the kind.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::FunctionDeclaration { .. } => "FunctionDeclaration",
            NodeKind::WhileStatement { .. } => "WhileStatement",
            NodeKind::IfStatement { .. } => "IfStatement",
            NodeKind::ReturnStatement { .. } => "ReturnStatement",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::ExpressionStatement(_) => "ExpressionStatement",
            NodeKind::BlockStatement(_) => "BlockStatement",
            NodeKind::AssignmentExpression { .. } => "AssignmentExpression",
            NodeKind::BinaryExpression { .. } => "BinaryExpression",
            NodeKind::UnaryExpression { .. } => "UnaryExpression",
            NodeKind::UpdateExpression { .. } => "UpdateExpression",
            NodeKind::MemberExpression { .. } => "MemberExpression",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Literal(_) => "Literal",
            NodeKind::ArrayExpression(_) => "ArrayExpression",
            NodeKind::ForStatement { .. } => "ForStatement",
            NodeKind::CallExpression { .. } => "CallExpression",
            NodeKind::ConditionalExpression { .. } => "ConditionalExpression",
            NodeKind::LogicalExpression { .. } => "LogicalExpression",
            NodeKind::BreakStatement => "BreakStatement",
            NodeKind::ContinueStatement => "ContinueStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::Foreign(kind) => kind,
        }
    }
}
