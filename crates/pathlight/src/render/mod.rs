//! Renderers for annotated lines

mod html;
mod terminal;

pub use html::Html;
pub use terminal::Terminal;

use crate::annotate::AnnotatedLine;

/// Turns annotated lines into presentable text.
pub trait Render {
    /// Present a single line, including any separator that follows it.
    fn line(&self, line: &AnnotatedLine) -> String;

    /// Present every line, in order.
    fn render(&self, lines: &[AnnotatedLine]) -> String {
        lines.iter().map(|line| self.line(line)).collect()
    }
}
