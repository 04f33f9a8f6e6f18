//! Both frontends feed the same substitution

use pathlight::frontends::{EstreeFrontend, ScriptFrontend};
use pathlight::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const SOURCE: &str = "function foo(x){\n    let temp=x;\n    return temp;\n}";

fn loc(l1: u32, c1: u32, l2: u32, c2: u32) -> Value {
    json!({"start": {"line": l1, "column": c1}, "end": {"line": l2, "column": c2}})
}

fn ident(name: &str, at: Value) -> Value {
    json!({"type": "Identifier", "name": name, "loc": at})
}

/// What an ESTree parser with `loc: true` emits for `SOURCE`.
fn estree() -> Value {
    json!({
        "type": "Program",
        "loc": loc(1, 0, 4, 1),
        "body": [{
            "type": "FunctionDeclaration",
            "loc": loc(1, 0, 4, 1),
            "id": ident("foo", loc(1, 9, 1, 12)),
            "params": [ident("x", loc(1, 13, 1, 14))],
            "body": {
                "type": "BlockStatement",
                "loc": loc(1, 15, 4, 1),
                "body": [
                    {
                        "type": "VariableDeclaration",
                        "kind": "let",
                        "loc": loc(2, 4, 2, 15),
                        "declarations": [{
                            "type": "VariableDeclarator",
                            "loc": loc(2, 8, 2, 14),
                            "id": ident("temp", loc(2, 8, 2, 12)),
                            "init": ident("x", loc(2, 13, 2, 14))
                        }]
                    },
                    {
                        "type": "ReturnStatement",
                        "loc": loc(3, 4, 3, 16),
                        "argument": ident("temp", loc(3, 11, 3, 15))
                    }
                ]
            }
        }]
    })
}

fn rendered(frontend: &dyn Frontend, input: &str) -> String {
    let program = frontend.parse(input).expect("parse failed");
    let lines = annotate(&program, &Seeds::new(), &Options::default()).expect("substitution failed");
    render(&lines, &Html::default())
}

#[test]
fn test_frontends_render_identically() {
    let script = rendered(&ScriptFrontend::new(), SOURCE);
    let estree = rendered(&EstreeFrontend::new(), &estree().to_string());
    assert_eq!(estree, script);
    assert_eq!(
        script,
        "<pre><code>function foo (x){</code></pre>\
         <pre><code>    return x;</code></pre>\
         <pre><code> }</code></pre>"
    );
}

#[test]
fn test_foreign_estree_node_is_unsupported_at_substitution() {
    let mut tree = estree();
    tree["body"][0]["body"]["body"][1] = json!({
        "type": "ThrowStatement",
        "loc": loc(3, 4, 3, 16),
        "argument": ident("temp", loc(3, 10, 3, 14))
    });
    let program = EstreeFrontend::new().program_from_value(&tree).unwrap();
    let err = annotate(&program, &Seeds::new(), &Options::default()).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedConstruct {
            kind: "ThrowStatement".to_string(),
            line: 3
        }
    );
}

#[test]
fn test_estree_requires_program_root() {
    let err = EstreeFrontend::new()
        .parse(r#"{"type": "Identifier", "name": "x"}"#)
        .unwrap_err();
    assert_eq!(err.message, "expected a Program, found Identifier");
}

#[test]
fn test_frontend_names() {
    assert_eq!(ScriptFrontend::new().name(), "script");
    assert_eq!(EstreeFrontend::new().name(), "estree");
}
