//! Line flattening and branch coloring

use tracing::debug;

use crate::error::{Error, Result};
use crate::eval::Transcript;
use crate::evaluator::{Evaluator, Frame};
use crate::value::Value;

/// How a line is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    /// Conditional line whose condition is `true`
    Visited,
    /// Conditional line whose condition is `false`
    Unvisited,
    /// Any other line, or a condition with a non-boolean value
    Plain,
}

/// A rebuilt output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedLine {
    /// Source line number
    pub number: u32,
    /// Substituted text with original spacing
    pub text: String,
    /// Presentation
    pub shade: Shade,
}

/// Rebuild every buffered line in order and color the conditional ones.
pub fn color(transcript: &Transcript) -> Result<Vec<AnnotatedLine>> {
    let evaluator = Evaluator::new(&transcript.symbols);
    let lines = &transcript.lines;

    lines
        .line_numbers()
        .map(|number| {
            let text = lines.text(number);
            let shade = if lines.is_conditional(number) {
                // Several conditions on one line: the leftmost one colors it
                let Some(probe) = lines.probes(number).first() else {
                    return Err(Error::MalformedConditionReconstruction {
                        line: number,
                        reason: "no condition was recorded for this line".to_string(),
                    });
                };
                let frame = Frame::new(probe.line, &probe.scope, probe.horizon);
                let value = evaluator.eval(&probe.condition, frame)?;
                debug!(line = number, condition = %probe.condition, %value, "colored");
                match value {
                    Value::Bool(true) => Shade::Visited,
                    Value::Bool(false) => Shade::Unvisited,
                    _ => Shade::Plain,
                }
            } else {
                Shade::Plain
            };
            Ok(AnnotatedLine {
                number,
                text,
                shade,
            })
        })
        .collect()
}
