//! In-memory document model used by the generative strategy.
//!
//! A [`Document`] is a flat list of [`Paragraph`]s, each made of formatted [`Run`]s. The model only
//! carries what the reports need; [`crate::docx::writer`] turns it into WordprocessingML.

/// Highlight colors accepted by `w:highlight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightColor {
    Yellow,
    Green,
    Cyan,
    Magenta,
    Red,
    Blue,
    LightGray,
}

impl HighlightColor {
    /// The `w:val` token for this color.
    pub fn token(self) -> &'static str {
        match self {
            HighlightColor::Yellow => "yellow",
            HighlightColor::Green => "green",
            HighlightColor::Cyan => "cyan",
            HighlightColor::Magenta => "magenta",
            HighlightColor::Red => "red",
            HighlightColor::Blue => "blue",
            HighlightColor::LightGray => "lightGray",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParagraphStyle {
    #[default]
    Normal,
    Title,
    Heading1,
    Heading2,
    /// Indented paragraph used for bullet lines.
    ListParagraph,
}

impl ParagraphStyle {
    /// Style id as declared in `word/styles.xml`, `None` for the default style.
    pub fn style_id(self) -> Option<&'static str> {
        match self {
            ParagraphStyle::Normal => None,
            ParagraphStyle::Title => Some("Title"),
            ParagraphStyle::Heading1 => Some("Heading1"),
            ParagraphStyle::Heading2 => Some("Heading2"),
            ParagraphStyle::ListParagraph => Some("ListParagraph"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn token(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// A span of text sharing one formatting. Line feeds in `text` become line breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Font size in points.
    pub size: Option<u32>,
    /// RGB hex without `#`.
    pub color: Option<String>,
    pub highlight: Option<HighlightColor>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn size(mut self, points: u32) -> Self {
        self.size = Some(points);
        self
    }

    pub fn color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub alignment: Option<Alignment>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A normal paragraph holding a single plain run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new().with_run(Run::new(text))
    }

    pub fn styled(style: ParagraphStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            ..Self::plain(text)
        }
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Concatenated text of every run.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, paragraph: Paragraph) -> &mut Paragraph {
        self.paragraphs.push(paragraph);
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    pub fn heading(&mut self, style: ParagraphStyle, text: impl Into<String>) {
        self.paragraphs.push(Paragraph::styled(style, text));
    }

    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_text_joins_runs() {
        let p = Paragraph::new()
            .with_run(Run::new("Competência ").bold())
            .with_run(Run::new("1"));
        assert_eq!(p.text(), "Competência 1");
        assert!(p.runs[0].bold);
    }

    #[test]
    fn tokens_match_wordprocessingml_values() {
        assert_eq!(HighlightColor::LightGray.token(), "lightGray");
        assert_eq!(Alignment::Justify.token(), "both");
        assert_eq!(ParagraphStyle::Normal.style_id(), None);
        assert_eq!(ParagraphStyle::Heading2.style_id(), Some("Heading2"));
    }

    #[test]
    fn document_text_is_one_line_per_paragraph() {
        let mut doc = Document::new();
        doc.heading(ParagraphStyle::Title, "Correção");
        doc.push(Paragraph::plain("Texto"));
        assert_eq!(doc.text(), "Correção\nTexto");
    }
}
