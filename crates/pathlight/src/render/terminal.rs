//! ANSI terminal output

use owo_colors::OwoColorize;

use super::Render;
use crate::annotate::{AnnotatedLine, Shade};

/// Visited lines in green, unvisited lines in red, one line per row.
#[derive(Debug, Clone, Copy, Default)]
pub struct Terminal;

impl Render for Terminal {
    fn line(&self, line: &AnnotatedLine) -> String {
        let text = match line.shade {
            Shade::Visited => line.text.green().to_string(),
            Shade::Unvisited => line.text.red().to_string(),
            Shade::Plain => line.text.clone(),
        };
        text + "\n"
    }
}
