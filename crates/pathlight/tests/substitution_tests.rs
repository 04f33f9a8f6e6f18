//! End-to-end substitution and coloring tests

use pathlight::frontends::ScriptFrontend;
use pathlight::*;
use pretty_assertions::assert_eq;

fn plain(text: &str) -> String {
    format!("<pre><code>{}</code></pre>", text)
}

fn visited(text: &str) -> String {
    format!("<pre class=visited><code>{}</code></pre>", text)
}

fn unvisited(text: &str) -> String {
    format!("<pre class=unvisited><code>{}</code></pre>", text)
}

fn lines(source: &str, seeds: &Seeds) -> Vec<AnnotatedLine> {
    let program = ScriptFrontend::new().parse(source).expect("parse failed");
    annotate(&program, seeds, &Options::default()).expect("substitution failed")
}

fn seeds(pairs: &[&str]) -> Seeds {
    let mut seeds = Seeds::new();
    for pair in pairs {
        seeds.insert_form(pair).expect("bad seed");
    }
    seeds
}

const PARAMS_IF: &str = "function foo (x, y, z){\n\
    \x20   let temp = x * z;\n\
    \x20   if(y < 9){\n\
    \x20       return temp;\n\
    \x20   }\n\
    \x20   return x;\n\
    }";

// ═══════════════════════════════════════════════════════════════════════
// Reference renderings
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_local_replaced_by_parameter() {
    let source = "function foo(x){\n    let temp=x;\n    return temp;\n}";
    let expected = [
        plain("function foo (x){"),
        plain("    return x;"),
        plain(" }"),
    ]
    .concat();
    assert_eq!(substitute(source, &Seeds::new()).unwrap(), expected);
}

#[test]
fn test_seeded_parameter_stays_symbolic() {
    let source = "function foo(x){\n    let temp=x;\n    return temp;\n}";
    let html = substitute(source, &seeds(&["x=15"])).unwrap();
    assert!(html.contains("    return x;"));
    assert!(!html.contains("15"));
}

#[test]
fn test_unseeded_condition_is_unvisited() {
    let expected = [
        plain("function foo (x,y,z)  {"),
        unvisited("    if (y < 9) {"),
        plain("        return (x * z);"),
        plain("     }"),
        plain("    return x;"),
        plain(" }"),
    ]
    .concat();
    assert_eq!(substitute(PARAMS_IF, &Seeds::new()).unwrap(), expected);
}

#[test]
fn test_negated_unseeded_parameter_is_visited() {
    let source = "function foo (x, y, z){\n    let temp = x+1;\n    if(!y){\n        return temp;\n    }\n    return z;\n}";
    let expected = [
        plain("function foo (x,y,z)  {"),
        visited("    if (!y) {"),
        plain("        return (x + 1);"),
        plain("     }"),
        plain("    return z;"),
        plain(" }"),
    ]
    .concat();
    assert_eq!(substitute(source, &Seeds::new()).unwrap(), expected);
}

#[test]
fn test_if_else_with_top_level_declaration() {
    let source = "let x = 5;\n\
        function foo (){\n\
        \x20   let temp = x + 1;\n\
        \x20   if(temp > 1){\n\
        \x20       return x;\n\
        \x20   }\n\
        \x20   else{\n\
        \x20       return 6;\n\
        \x20   }\n\
        }";
    let expected = [
        plain("let x = 5;"),
        plain("function foo (){"),
        visited("    if ((x + 1) > 1) {"),
        plain("        return x;"),
        plain("     } else"),
        plain("        {"),
        plain("        return 6;"),
        plain("     }"),
        plain(" }"),
    ]
    .concat();
    assert_eq!(substitute(source, &Seeds::new()).unwrap(), expected);
}

#[test]
fn test_while_with_var_declarations() {
    let source = "var x = 5;\n\
        var y = 1;\n\
        function foo (){\n\
        \x20   let temp = x + 1;\n\
        \x20   while(temp > y){\n\
        \x20       temp = temp / 2;\n\
        \x20   }\n\
        \x20   return temp;\n\
        }";
    let expected = [
        plain("var x = 5;"),
        plain("var y = 1;"),
        plain("function foo (){"),
        plain("    while((x + 1) > y){"),
        plain("     }"),
        plain("    return (x + 1);"),
        plain(" }"),
    ]
    .concat();
    assert_eq!(substitute(source, &Seeds::new()).unwrap(), expected);
}

#[test]
fn test_nested_ifs_both_visited() {
    let source = "const y = 5;\n\
        function foo (){\n\
        \x20   let temp = y*2;\n\
        \x20   if(temp > 5){\n\
        \x20       if(temp > 9){\n\
        \x20           return temp;\n\
        \x20       }\n\
        \x20   }\n\
        \x20   return temp;\n\
        }";
    let expected = [
        plain("const y = 5;"),
        plain("function foo (){"),
        visited("    if ((y * 2) > 5) {"),
        visited("        if ((y * 2) > 9) {"),
        plain("            return (y * 2);"),
        plain("         }"),
        plain("     }"),
        plain("    return (y * 2);"),
        plain(" }"),
    ]
    .concat();
    assert_eq!(substitute(source, &Seeds::new()).unwrap(), expected);
}

#[test]
fn test_array_elements_inlined_in_condition() {
    let source = "function foo (x, y, z){\n\
        \x20   var numArr = [5, 6, 7, 8];\n\
        \x20   let temp = y*2;\n\
        \x20   if(numArr[1] == numArr[2]){\n\
        \x20       return temp + z;\n\
        \x20   }\n\
        \x20   return x;\n\
        }";
    let expected = [
        plain("function foo (x,y,z)  {"),
        unvisited("    if (6 == 7)               {"),
        plain("        return (y * 2) + z;"),
        plain("     }"),
        plain("    return x;"),
        plain(" }"),
    ]
    .concat();
    assert_eq!(substitute(source, &Seeds::new()).unwrap(), expected);
}

// ═══════════════════════════════════════════════════════════════════════
// Seeded coloring
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_seeded_condition_is_visited() {
    let out = lines(PARAMS_IF, &seeds(&["x=1", "y=2", "z=3"]));
    let cond = out.iter().find(|l| l.number == 3).unwrap();
    assert_eq!(cond.text, "    if (y < 9) {");
    assert_eq!(cond.shade, Shade::Visited);
}

#[test]
fn test_seeded_condition_false_is_unvisited() {
    let out = lines(PARAMS_IF, &seeds(&["y=12"]));
    assert_eq!(out[1].shade, Shade::Unvisited);
}

#[test]
fn test_else_if_chain_colors_each_condition() {
    let source = "function f(a){\n\
        \x20   if(a < 1){\n\
        \x20       return 1;\n\
        \x20   } else if(a < 5){\n\
        \x20       return 2;\n\
        \x20   } else {\n\
        \x20       return 3;\n\
        \x20   }\n\
        }";
    let out = lines(source, &seeds(&["a=3"]));
    let texts: Vec<_> = out.iter().map(|l| (l.text.as_str(), l.shade)).collect();
    assert_eq!(
        texts,
        vec![
            ("function f (a){", Shade::Plain),
            ("    if (a < 1) {", Shade::Unvisited),
            ("        return 1;", Shade::Plain),
            ("     } else if (a < 5) {", Shade::Visited),
            ("        return 2;", Shade::Plain),
            ("     } else{", Shade::Plain),
            ("        return 3;", Shade::Plain),
            ("     }", Shade::Plain),
            (" }", Shade::Plain),
        ]
    );
}

#[test]
fn test_condition_reads_value_assigned_before_it() {
    let source = "function f(x){\n\
        \x20   x = x + 10;\n\
        \x20   if(x > 10){\n\
        \x20       return x;\n\
        \x20   }\n\
        }";
    let out = lines(source, &seeds(&["x=1"]));
    assert_eq!(out[1].text, "    x = x + 10;");
    assert_eq!(out[2].text, "    if (x > 10) {");
    assert_eq!(out[2].shade, Shade::Visited);
}

#[test]
fn test_seeded_input_array_length() {
    let source = "function f(arr){\n    if(arr.length > 2){\n        return arr[0];\n    }\n}";
    let out = lines(source, &seeds(&["arr=[1, 2, 3]"]));
    assert_eq!(out[1].text, "    if (arr.length > 2) {");
    assert_eq!(out[1].shade, Shade::Visited);
    assert_eq!(out[2].text, "        return arr[0];");
}

#[test]
fn test_string_seed_compares_as_string() {
    let source = "function f(name){\n    if(name == 'bob'){\n        return 1;\n    }\n}";
    assert_eq!(lines(source, &seeds(&["name=bob"]))[1].shade, Shade::Visited);
    assert_eq!(lines(source, &seeds(&["name=al"]))[1].shade, Shade::Unvisited);
}

#[test]
fn test_non_boolean_condition_is_left_plain() {
    let source = "function foo(x){\n    if(x){\n        return 1;\n    }\n    return 2;\n}";
    let html = substitute(source, &seeds(&["x=5"])).unwrap();
    assert!(html.contains(&plain("    if (x) {")));

    let html = substitute(source, &seeds(&["x=true"])).unwrap();
    assert!(html.contains(&visited("    if (x) {")));
}

#[test]
fn test_chain_on_one_line_colored_by_first_condition() {
    let source = "function f(x){\n    if (x > 1) { return 1; } else if (x > 0) { return 2; }\n}";
    assert_eq!(lines(source, &seeds(&["x=5"]))[1].shade, Shade::Visited);
    assert_eq!(lines(source, &seeds(&["x=0.5"]))[1].shade, Shade::Unvisited);
}

#[test]
fn test_hex_seed_is_numeric() {
    let source = "function f(n){\n    if(n == 16){\n        return n;\n    }\n}";
    assert_eq!(lines(source, &seeds(&["n=0x10"]))[1].shade, Shade::Visited);
    assert_eq!(lines(source, &seeds(&["n=inf"]))[1].shade, Shade::Unvisited);
}

// ═══════════════════════════════════════════════════════════════════════
// Scoping and mutation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_branch_record_invisible_after_branch() {
    let source = "function f(x){\n\
        \x20   let t = 1;\n\
        \x20   if(x){\n\
        \x20       t = 2;\n\
        \x20       return t;\n\
        \x20   }\n\
        \x20   return t;\n\
        }";
    let out = lines(source, &Seeds::new());
    assert_eq!(out[2].text, "        return 2;");
    assert_eq!(out[4].text, "    return 1;");
}

#[test]
fn test_else_sees_values_from_its_chain() {
    let source = "function f(x){\n\
        \x20   let t = 1;\n\
        \x20   if(x){\n\
        \x20       t = 5;\n\
        \x20   } else {\n\
        \x20       return t;\n\
        \x20   }\n\
        }";
    let out = lines(source, &Seeds::new());
    let ret = out.iter().find(|l| l.number == 6).unwrap();
    assert_eq!(ret.text, "        return 5;");
}

#[test]
fn test_indexed_assignment_copies_array() {
    let source = "function f(){\n\
        \x20   let numArr = [5, 6, 7, 8];\n\
        \x20   numArr[1] = numArr[2];\n\
        \x20   return numArr;\n\
        }";
    let program = ScriptFrontend::new().parse(source).unwrap();
    let options = Options::default();
    let transcript = Substitution::new(&Seeds::new(), &options)
        .run(&program)
        .unwrap();
    let history: Vec<String> = transcript
        .symbols
        .history("numArr")
        .iter()
        .map(|r| r.value.to_string())
        .collect();
    assert_eq!(history, vec!["[5,6,7,8]", "[5,7,7,8]"]);

    let out = annotate::color(&transcript).unwrap();
    assert_eq!(out[1].text, "    return [5,7,7,8];");
}

#[test]
fn test_indexed_assignment_to_input_is_printed() {
    let source = "function f(arr){\n    arr[0] = 9;\n    if(arr[0] > 5){\n        return 1;\n    }\n}";
    let out = lines(source, &seeds(&["arr=[1, 2]"]));
    assert_eq!(out[1].text, "    arr[0] = 9;");
    assert_eq!(out[2].shade, Shade::Visited);

    // Unseeded, the array is undefined by the time the condition is read
    let err = substitute(source, &Seeds::new()).unwrap_err();
    assert!(matches!(err, Error::EvaluationError { line: 3, .. }));
}

#[test]
fn test_compound_and_update_statements() {
    let source = "function f(n){\n\
        \x20   let t = n;\n\
        \x20   t *= 2;\n\
        \x20   n++;\n\
        \x20   if(t < n){\n\
        \x20       return t;\n\
        \x20   }\n\
        }";
    let out = lines(source, &seeds(&["n=3"]));
    let texts: Vec<_> = out.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "function f (n){",
            "    n++;",
            "    if ((n * 2) < n) {",
            "        return (n * 2);",
            "     }",
            " }",
        ]
    );
    // Both sides read n after the increment: 8 < 4
    assert_eq!(out[2].shade, Shade::Unvisited);
}

#[test]
fn test_loop_body_walked_once() {
    let source = "function f(x){\n\
        \x20   let i = 0;\n\
        \x20   while(i < x){\n\
        \x20       i = i + 1;\n\
        \x20   }\n\
        \x20   return i;\n\
        }";
    let out = lines(source, &Seeds::new());
    assert_eq!(out[1].text, "    while(0 < x){");
    assert_eq!(out[3].text, "    return 0;");
}

#[test]
fn test_simple_values_substituted_without_parentheses() {
    let source = "function f(){\n    let a = 100;\n    let b = -a;\n    return a + b;\n}";
    let out = lines(source, &Seeds::new());
    assert_eq!(out[1].text, "    return 100 + -100;");
}

#[test]
fn test_no_function_renders_top_level_only() {
    let out = lines("let a = [1, 2], b;\nvar c = a;", &Seeds::new());
    let texts: Vec<_> = out.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["let a = [1,2], b;", "var c = a;"]);
}

#[test]
fn test_round_trip_without_substitutions() {
    let source = "function add (a, b){\n    return a + b;\n}";
    let out = lines(source, &Seeds::new());
    let texts: Vec<_> = out.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["function add (a,b) {", "    return a + b;", " }"]);
    assert!(out.iter().all(|l| l.shade == Shade::Plain));
}

#[test]
fn test_terminal_renderer_one_line_per_row() {
    let source = "function foo(x){\n    return x;\n}";
    let out = render(&lines(source, &Seeds::new()), &Terminal);
    assert_eq!(out, "function foo (x){\n    return x;\n }\n");
}
