//! HTML presentation markers

use super::Render;
use crate::annotate::{AnnotatedLine, Shade};

/// Wraps each line in `<pre><code>`, classed by shade.
///
/// Line text is emitted as is, without escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Html {
    /// Class for lines whose condition holds
    pub visited_class: String,
    /// Class for lines whose condition does not hold
    pub unvisited_class: String,
}

impl Default for Html {
    fn default() -> Self {
        Self {
            visited_class: "visited".to_string(),
            unvisited_class: "unvisited".to_string(),
        }
    }
}

impl Html {
    /// Renderer with custom class names.
    pub fn with_classes(visited: impl Into<String>, unvisited: impl Into<String>) -> Self {
        Self {
            visited_class: visited.into(),
            unvisited_class: unvisited.into(),
        }
    }
}

impl Render for Html {
    fn line(&self, line: &AnnotatedLine) -> String {
        match line.shade {
            Shade::Visited => format!(
                "<pre class={}><code>{}</code></pre>",
                self.visited_class, line.text
            ),
            Shade::Unvisited => format!(
                "<pre class={}><code>{}</code></pre>",
                self.unvisited_class, line.text
            ),
            Shade::Plain => format!("<pre><code>{}</code></pre>", line.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, shade: Shade) -> AnnotatedLine {
        AnnotatedLine {
            number: 1,
            text: text.to_string(),
            shade,
        }
    }

    #[test]
    fn test_markers() {
        let html = Html::default();
        assert_eq!(
            html.render(&[line("a", Shade::Visited), line("b", Shade::Plain)]),
            "<pre class=visited><code>a</code></pre><pre><code>b</code></pre>"
        );
    }

    #[test]
    fn test_custom_classes_and_no_escaping() {
        let html = Html::with_classes("green", "red");
        assert_eq!(
            html.line(&line("if (y < 9) {", Shade::Unvisited)),
            "<pre class=red><code>if (y < 9) {</code></pre>"
        );
    }
}
