//! Draw-script primitives and the cursor-based layout builder
//!
//! The document renderer consumes an ordered list of primitive commands; all
//! layout decisions are made here by a top-to-bottom cursor that advances a
//! fixed line height per field and inserts a page break near the page
//! bottom. No wrapping: overlong fields are truncated with an ellipsis.

/// Page width in layout units (A4 portrait)
pub const PAGE_WIDTH: f32 = 210.0;

/// Left/right content margin
pub const MARGIN: f32 = 20.0;

/// Vertical advance for one field line
pub const LINE_HEIGHT: f32 = 8.0;

/// Cursor position past which the next row starts a new page
pub const PAGE_BREAK_Y: f32 = 250.0;

/// Cursor position at the top of a continuation page
pub const RESUME_Y: f32 = 20.0;

/// Font weight toggle carried by the script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// One primitive layout instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle at an absolute position
    RectFill { x: f32, y: f32, width: f32, height: f32 },
    /// Text at an absolute position
    Text { x: f32, y: f32, text: String },
    /// Switch font weight for subsequent text
    Font(FontWeight),
    /// Start a new page
    PageBreak,
}

/// Truncate a field to `max` characters, marking the cut with an ellipsis
pub fn truncate_field(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Accumulates draw commands while tracking the vertical cursor
pub struct ScriptBuilder {
    commands: Vec<DrawCommand>,
    cursor: f32,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            cursor: 10.0,
        }
    }

    /// Current vertical cursor position
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Move the cursor to an absolute position
    pub fn move_to(&mut self, y: f32) -> &mut Self {
        self.cursor = y;
        self
    }

    /// Advance the cursor by `dy`
    pub fn advance(&mut self, dy: f32) -> &mut Self {
        self.cursor += dy;
        self
    }

    /// Insert a page break if the cursor is past the break threshold
    pub fn ensure_room(&mut self) -> &mut Self {
        if self.cursor > PAGE_BREAK_Y {
            self.commands.push(DrawCommand::PageBreak);
            self.cursor = RESUME_Y;
        }
        self
    }

    pub fn font(&mut self, weight: FontWeight) -> &mut Self {
        self.commands.push(DrawCommand::Font(weight));
        self
    }

    pub fn rect_fill(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.commands.push(DrawCommand::RectFill { x, y, width, height });
        self
    }

    /// Text at an explicit position, independent of the cursor
    pub fn text_at(&mut self, x: f32, y: f32, text: impl Into<String>) -> &mut Self {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
        });
        self
    }

    /// Text at `x` on the current cursor line
    pub fn text(&mut self, x: f32, text: impl Into<String>) -> &mut Self {
        let y = self.cursor;
        self.text_at(x, y, text)
    }

    /// Section heading: bold text at the margin, cursor advanced past it
    pub fn heading(&mut self, title: &str) -> &mut Self {
        self.font(FontWeight::Bold);
        self.text(MARGIN, title);
        self.advance(12.0)
    }

    /// Bold label at the margin with a normal-weight value beside it,
    /// advancing one line
    pub fn label_value(&mut self, label: &str, value: &str) -> &mut Self {
        self.font(FontWeight::Bold);
        self.text(MARGIN, label);
        self.font(FontWeight::Normal);
        self.text(MARGIN + 50.0, value);
        self.advance(LINE_HEIGHT)
    }

    pub fn finish(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
