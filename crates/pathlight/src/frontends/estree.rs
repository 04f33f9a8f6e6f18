//! ESTree frontend: esprima-style JSON syntax trees
//!
//! Accepts the JSON an ESTree parser emits with location tracking enabled
//! (`loc` on every node, `raw` on literals). Node types outside the modelled
//! set are kept as [`NodeKind::Foreign`] so that the substitution walk, not
//! the loader, decides whether they are acceptable.

use serde_json::{Map, Value};

use crate::frontend::{Frontend, ParseError, SourceLocation};
use crate::syntax::{
    AssignOp, BinaryOp, DeclKind, Declarator, Literal, LogicalOp, Node, NodeKind, Position,
    Program, Span, UnaryOp, UpdateOp,
};

/// Frontend over ESTree JSON.
#[derive(Debug, Clone, Default)]
pub struct EstreeFrontend;

impl EstreeFrontend {
    /// Create a new ESTree frontend.
    pub fn new() -> Self {
        Self
    }

    /// Convert an already-decoded JSON tree.
    pub fn program_from_value(&self, value: &Value) -> Result<Program, ParseError> {
        let obj = object(value)?;
        let ty = type_of(obj)?;
        if ty != "Program" {
            return Err(ParseError::new(format!("expected a Program, found {}", ty)));
        }
        let body = array_field(obj, "body")?
            .iter()
            .map(convert)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Program {
            body,
            span: span_of(obj)?,
        })
    }
}

impl Frontend for EstreeFrontend {
    fn parse(&self, input: &str) -> Result<Program, ParseError> {
        let value: Value = serde_json::from_str(input).map_err(|e| {
            ParseError::new(format!("invalid ESTree JSON: {}", e))
                .with_location(SourceLocation::new(e.line() as u32, e.column() as u32))
        })?;
        self.program_from_value(&value)
    }

    fn name(&self) -> &str {
        "estree"
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Field access
// ═══════════════════════════════════════════════════════════════════════

fn object(value: &Value) -> Result<&Map<String, Value>, ParseError> {
    value
        .as_object()
        .ok_or_else(|| ParseError::new(format!("expected a node object, found {}", value)))
}

fn type_of(obj: &Map<String, Value>) -> Result<&str, ParseError> {
    obj.get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::new("node without a `type`"))
}

fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Result<&'a Value, ParseError> {
    obj.get(name).ok_or_else(|| missing(obj, name))
}

fn str_field<'a>(obj: &'a Map<String, Value>, name: &str) -> Result<&'a str, ParseError> {
    field(obj, name)?
        .as_str()
        .ok_or_else(|| missing(obj, name))
}

fn array_field<'a>(obj: &'a Map<String, Value>, name: &str) -> Result<&'a Vec<Value>, ParseError> {
    field(obj, name)?
        .as_array()
        .ok_or_else(|| missing(obj, name))
}

fn missing(obj: &Map<String, Value>, name: &str) -> ParseError {
    let ty = obj.get("type").and_then(Value::as_str).unwrap_or("node");
    let err = ParseError::new(format!("{} is missing `{}`", ty, name));
    match span_of(obj) {
        Ok(span) => err.with_location(SourceLocation::from(span.start)),
        Err(_) => err,
    }
}

fn position(value: &Value) -> Option<Position> {
    let line = value.get("line")?.as_u64()?;
    let column = value.get("column")?.as_u64()?;
    Some(Position::new(line as u32, column as u32))
}

fn span_of(obj: &Map<String, Value>) -> Result<Span, ParseError> {
    let ty = obj.get("type").and_then(Value::as_str).unwrap_or("node");
    let loc = obj
        .get("loc")
        .ok_or_else(|| ParseError::new(format!("{} has no `loc`", ty)))?;
    let start = loc.get("start").and_then(position);
    let end = loc.get("end").and_then(position);
    match (start, end) {
        (Some(start), Some(end)) => Ok(Span::new(start, end)),
        _ => Err(ParseError::new(format!("{} has a malformed `loc`", ty))),
    }
}

fn identifier_name(value: &Value) -> Result<String, ParseError> {
    let obj = object(value)?;
    match type_of(obj)? {
        "Identifier" => Ok(str_field(obj, "name")?.to_string()),
        other => Err(ParseError::new(format!("expected an Identifier, found {}", other))
            .with_location(SourceLocation::from(span_of(obj)?.start))),
    }
}

fn boxed(obj: &Map<String, Value>, name: &str) -> Result<Box<Node>, ParseError> {
    convert(field(obj, name)?).map(Box::new)
}

fn optional(obj: &Map<String, Value>, name: &str) -> Result<Option<Box<Node>>, ParseError> {
    match obj.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => convert(value).map(|n| Some(Box::new(n))),
    }
}

fn list(obj: &Map<String, Value>, name: &str) -> Result<Vec<Node>, ParseError> {
    array_field(obj, name)?.iter().map(convert).collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Node conversion
// ═══════════════════════════════════════════════════════════════════════

fn convert(value: &Value) -> Result<Node, ParseError> {
    let obj = object(value)?;
    let ty = type_of(obj)?;
    let span = span_of(obj)?;

    let kind = match ty {
        "FunctionDeclaration" => NodeKind::FunctionDeclaration {
            name: identifier_name(field(obj, "id")?)?,
            params: array_field(obj, "params")?
                .iter()
                .map(identifier_name)
                .collect::<Result<_, _>>()?,
            body: boxed(obj, "body")?,
        },
        "WhileStatement" => NodeKind::WhileStatement {
            test: boxed(obj, "test")?,
            body: boxed(obj, "body")?,
        },
        "IfStatement" => NodeKind::IfStatement {
            test: boxed(obj, "test")?,
            consequent: boxed(obj, "consequent")?,
            alternate: optional(obj, "alternate")?,
        },
        "ReturnStatement" => NodeKind::ReturnStatement {
            argument: optional(obj, "argument")?,
        },
        "VariableDeclaration" => {
            let keyword = str_field(obj, "kind")?;
            let kind = DeclKind::from_keyword(keyword)
                .ok_or_else(|| ParseError::new(format!("unknown declaration kind `{}`", keyword)))?;
            let declarations = array_field(obj, "declarations")?
                .iter()
                .map(declarator)
                .collect::<Result<_, _>>()?;
            NodeKind::VariableDeclaration { kind, declarations }
        }
        "ExpressionStatement" => NodeKind::ExpressionStatement(boxed(obj, "expression")?),
        "BlockStatement" => NodeKind::BlockStatement(list(obj, "body")?),
        "AssignmentExpression" => {
            let op = str_field(obj, "operator")?;
            match AssignOp::from_str_op(op) {
                Some(operator) => NodeKind::AssignmentExpression {
                    operator,
                    left: boxed(obj, "left")?,
                    right: boxed(obj, "right")?,
                },
                None => NodeKind::Foreign(ty.to_string()),
            }
        }
        "BinaryExpression" => {
            let op = str_field(obj, "operator")?;
            match BinaryOp::from_str_op(op) {
                Some(operator) => NodeKind::BinaryExpression {
                    operator,
                    left: boxed(obj, "left")?,
                    right: boxed(obj, "right")?,
                },
                None => NodeKind::Foreign(ty.to_string()),
            }
        }
        "UnaryExpression" => {
            let operator = match str_field(obj, "operator")? {
                "!" => Some(UnaryOp::Not),
                "-" => Some(UnaryOp::Neg),
                "+" => Some(UnaryOp::Plus),
                _ => None,
            };
            match operator {
                Some(operator) => NodeKind::UnaryExpression {
                    operator,
                    argument: boxed(obj, "argument")?,
                },
                None => NodeKind::Foreign(ty.to_string()),
            }
        }
        "UpdateExpression" => {
            let operator = match str_field(obj, "operator")? {
                "++" => UpdateOp::Increment,
                "--" => UpdateOp::Decrement,
                other => return Err(ParseError::new(format!("unknown update operator `{}`", other))),
            };
            NodeKind::UpdateExpression {
                operator,
                prefix: field(obj, "prefix")?.as_bool().unwrap_or(false),
                argument: boxed(obj, "argument")?,
            }
        }
        "MemberExpression" => NodeKind::MemberExpression {
            object: boxed(obj, "object")?,
            property: boxed(obj, "property")?,
            computed: field(obj, "computed")?.as_bool().unwrap_or(false),
        },
        "Identifier" => NodeKind::Identifier(str_field(obj, "name")?.to_string()),
        "Literal" => literal(obj)?,
        "ArrayExpression" => NodeKind::ArrayExpression(list(obj, "elements")?),
        "ForStatement" => NodeKind::ForStatement {
            init: optional(obj, "init")?,
            test: optional(obj, "test")?,
            update: optional(obj, "update")?,
            body: boxed(obj, "body")?,
        },
        "CallExpression" => NodeKind::CallExpression {
            callee: boxed(obj, "callee")?,
            arguments: list(obj, "arguments")?,
        },
        "ConditionalExpression" => NodeKind::ConditionalExpression {
            test: boxed(obj, "test")?,
            consequent: boxed(obj, "consequent")?,
            alternate: boxed(obj, "alternate")?,
        },
        "LogicalExpression" => {
            let operator = match str_field(obj, "operator")? {
                "&&" => LogicalOp::And,
                "||" => LogicalOp::Or,
                _ => return Ok(Node::new(NodeKind::Foreign(ty.to_string()), span)),
            };
            NodeKind::LogicalExpression {
                operator,
                left: boxed(obj, "left")?,
                right: boxed(obj, "right")?,
            }
        }
        "BreakStatement" => NodeKind::BreakStatement,
        "ContinueStatement" => NodeKind::ContinueStatement,
        "EmptyStatement" => NodeKind::EmptyStatement,
        other => NodeKind::Foreign(other.to_string()),
    };
    Ok(Node::new(kind, span))
}

fn declarator(value: &Value) -> Result<Declarator, ParseError> {
    let obj = object(value)?;
    let init = match obj.get("init") {
        None | Some(Value::Null) => None,
        Some(init) => Some(convert(init)?),
    };
    Ok(Declarator {
        name: identifier_name(field(obj, "id")?)?,
        init,
        span: span_of(obj)?,
    })
}

fn literal(obj: &Map<String, Value>) -> Result<NodeKind, ParseError> {
    // Regular expressions decode to an object value, or null with a `regex` key
    if obj.contains_key("regex") {
        return Ok(NodeKind::Foreign("RegExpLiteral".to_string()));
    }
    let raw = obj.get("raw").and_then(Value::as_str);
    let literal = match field(obj, "value")? {
        Value::Number(n) => {
            let n = n.as_f64().unwrap_or(f64::NAN);
            Literal::number(n, raw.map(str::to_string).unwrap_or_else(|| n.to_string()))
        }
        Value::String(s) => {
            let raw = raw.map(str::to_string).unwrap_or_else(|| format!("\"{}\"", s));
            Literal::string(s.clone(), raw)
        }
        Value::Bool(b) => Literal::boolean(*b),
        Value::Null => Literal::null(),
        _ => return Ok(NodeKind::Foreign("Literal".to_string())),
    };
    Ok(NodeKind::Literal(literal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loc(l1: u32, c1: u32, l2: u32, c2: u32) -> Value {
        json!({"start": {"line": l1, "column": c1}, "end": {"line": l2, "column": c2}})
    }

    #[test]
    fn test_literal_keeps_raw_text() {
        let tree = json!({
            "type": "Program", "loc": loc(1, 0, 1, 5), "body": [{
                "type": "ExpressionStatement", "loc": loc(1, 0, 1, 5),
                "expression": {"type": "Literal", "value": 5.0, "raw": "5.0", "loc": loc(1, 0, 1, 3)}
            }]
        });
        let program = EstreeFrontend::new().program_from_value(&tree).unwrap();
        let NodeKind::ExpressionStatement(expr) = &program.body[0].kind else {
            panic!("Expected expression statement");
        };
        assert_eq!(expr.kind, NodeKind::Literal(Literal::number(5.0, "5.0")));
    }

    #[test]
    fn test_unknown_type_becomes_foreign() {
        let tree = json!({
            "type": "Program", "loc": loc(1, 0, 1, 9), "body": [
                {"type": "DebuggerStatement", "loc": loc(1, 0, 1, 9)}
            ]
        });
        let program = EstreeFrontend::new().program_from_value(&tree).unwrap();
        assert_eq!(program.body[0].kind, NodeKind::Foreign("DebuggerStatement".into()));
    }

    #[test]
    fn test_missing_loc_is_an_error() {
        let tree = json!({"type": "Program", "body": []});
        let err = EstreeFrontend::new().program_from_value(&tree).unwrap_err();
        assert_eq!(err.message, "Program has no `loc`");
    }

    #[test]
    fn test_missing_field_reports_node_location() {
        let tree = json!({
            "type": "Program", "loc": loc(1, 0, 2, 0), "body": [
                {"type": "WhileStatement", "loc": loc(2, 4, 2, 9), "body": {"type": "BlockStatement", "body": [], "loc": loc(2, 7, 2, 9)}}
            ]
        });
        let err = EstreeFrontend::new().program_from_value(&tree).unwrap_err();
        assert_eq!(err.message, "WhileStatement is missing `test`");
        assert_eq!(err.location, Some(SourceLocation::new(2, 5)));
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let err = EstreeFrontend::new().parse("{ not json").unwrap_err();
        assert!(err.message.starts_with("invalid ESTree JSON"));
    }
}
