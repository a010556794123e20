//! Document generation
//!
//! The wizard builds a draw script from the draft; a [`DocumentRenderer`]
//! turns that script into a savable byte stream. The rendering engine is an
//! external concern behind the trait; the built-in [`PlainRenderer`] emits a
//! deterministic line-oriented encoding useful for saving and inspecting
//! scripts without a PDF engine.

pub mod draw;
pub mod summary;

pub use draw::{DrawCommand, FontWeight, ScriptBuilder};
pub use summary::{build_summary, document_filename, FILENAME_PREFIX};

use std::fmt::Write as _;

/// Errors from turning a draw script into bytes
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("draw script is empty")]
    EmptyScript,

    #[error("page width must be positive, got {0}")]
    InvalidPageWidth(f32),
}

/// Consumes an ordered draw script and a target page width, producing a
/// savable byte stream
pub trait DocumentRenderer {
    fn render(&self, script: &[DrawCommand], page_width: f32) -> Result<Vec<u8>, RenderError>;
}

/// Line-oriented renderer: one command per line, stable across runs
#[derive(Debug, Default)]
pub struct PlainRenderer;

impl DocumentRenderer for PlainRenderer {
    fn render(&self, script: &[DrawCommand], page_width: f32) -> Result<Vec<u8>, RenderError> {
        if script.is_empty() {
            return Err(RenderError::EmptyScript);
        }
        if page_width <= 0.0 {
            return Err(RenderError::InvalidPageWidth(page_width));
        }

        let mut out = String::new();
        let _ = writeln!(out, "page {:.1}", page_width);
        for command in script {
            match command {
                DrawCommand::RectFill { x, y, width, height } => {
                    let _ = writeln!(out, "rect {:.1} {:.1} {:.1} {:.1}", x, y, width, height);
                }
                DrawCommand::Text { x, y, text } => {
                    let _ = writeln!(out, "text {:.1} {:.1} {}", x, y, text);
                }
                DrawCommand::Font(FontWeight::Bold) => out.push_str("font bold\n"),
                DrawCommand::Font(FontWeight::Normal) => out.push_str("font normal\n"),
                DrawCommand::PageBreak => out.push_str("page-break\n"),
            }
        }
        Ok(out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_script_rejected() {
        assert!(matches!(
            PlainRenderer.render(&[], draw::PAGE_WIDTH),
            Err(RenderError::EmptyScript)
        ));
    }

    #[test]
    fn test_invalid_page_width_rejected() {
        let script = vec![DrawCommand::PageBreak];
        assert!(matches!(
            PlainRenderer.render(&script, 0.0),
            Err(RenderError::InvalidPageWidth(_))
        ));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let script = vec![
            DrawCommand::Font(FontWeight::Bold),
            DrawCommand::Text {
                x: 20.0,
                y: 35.0,
                text: "PROJECT OVERVIEW".to_string(),
            },
            DrawCommand::PageBreak,
        ];
        let first = PlainRenderer.render(&script, draw::PAGE_WIDTH).unwrap();
        let second = PlainRenderer.render(&script, draw::PAGE_WIDTH).unwrap();
        assert_eq!(first, second);
        let text = String::from_utf8(first).unwrap();
        assert!(text.starts_with("page 210.0\n"));
        assert!(text.contains("text 20.0 35.0 PROJECT OVERVIEW\n"));
        assert!(text.ends_with("page-break\n"));
    }
}
