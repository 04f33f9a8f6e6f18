//! # Pathlight
//!
//! Symbolic substitution and branch coloring for small JavaScript functions.
//!
//! Given a function (plus optional top-level declarations) and values for
//! some of its inputs, pathlight rewrites every line with local variables
//! replaced by the expressions they stand for, and marks each `if` line as
//! visited or unvisited depending on whether the supplied values make its
//! condition true.
//!
//! ## Architecture
//!
//! - **Frontends**: source text or ESTree JSON to a [`Program`]
//! - **Substitution**: a recursive walk that fills a [`LineBuffer`] and a
//!   [`SymbolTable`] ([`eval`])
//! - **Coloring**: conditions re-evaluated over the recorded values
//!   ([`annotate`])
//! - **Rendering**: HTML or terminal output ([`render`])
//!
//! ## Example
//!
//! ```
//! use pathlight::{substitute, Seeds};
//!
//! let source = "function foo(x){\n    let temp=x;\n    return temp;\n}";
//! let html = substitute(source, &Seeds::new()).unwrap();
//! assert_eq!(
//!     html,
//!     "<pre><code>function foo (x){</code></pre>\
//!      <pre><code>    return x;</code></pre>\
//!      <pre><code> }</code></pre>"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod annotate;
pub mod context;
pub mod error;
pub mod eval;
pub mod evaluator;
pub mod frontend;
pub mod frontends;
pub mod lines;
pub mod render;
pub mod symbols;
pub mod syntax;
pub mod term;
pub mod value;

use tracing::info;

// Re-export main types
pub use annotate::{AnnotatedLine, Shade};
pub use context::Options;
pub use error::{Error, Result};
pub use eval::{Substitution, Transcript};
pub use frontend::{Frontend, ParseError, SourceLocation};
pub use lines::LineBuffer;
pub use render::{Html, Render, Terminal};
pub use symbols::{Scope, SeedRecord, SeedValue, Seeds, SymbolTable};
pub use syntax::Program;
pub use term::Term;
pub use value::Value;

/// Substitute and color a program.
pub fn annotate(program: &Program, seeds: &Seeds, options: &Options) -> Result<Vec<AnnotatedLine>> {
    info!(
        statements = program.body.len(),
        seeds = seeds.iter().count(),
        "substituting"
    );
    let transcript = Substitution::new(seeds, options).run(program)?;
    annotate::color(&transcript)
}

/// Parse `source` with the script frontend, substitute, and render as HTML.
pub fn substitute(source: &str, seeds: &Seeds) -> Result<String> {
    let program = frontends::ScriptFrontend::new().parse(source)?;
    let lines = annotate(&program, seeds, &Options::default())?;
    Ok(render(&lines, &Html::default()))
}

/// Render annotated lines.
pub fn render(lines: &[AnnotatedLine], renderer: &impl Render) -> String {
    renderer.render(lines)
}

/// Pathlight version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
