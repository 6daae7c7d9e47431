//! Data types handed between pipeline stages.
//!
//! Everything the language model produces stays opaque text; these types
//! exist to pin down which stage produced a string and which invariants hold
//! for it, not to impose a schema on the model's prose.

/// Raw user input, either free text or decoded upload bytes.
///
/// Immutable once constructed, and guaranteed non-blank: the constructors
/// reject input with no visible characters so the pipeline never starts on
/// an empty submission.
#[derive(Debug, Clone)]
pub struct Submission {
    text: String,
}

impl Submission {
    /// Wrap free text. Returns None when the text is blank.
    pub fn from_text(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self { text })
    }

    /// Wrap uploaded file bytes, decoding lossily as UTF-8.
    /// Returns None for an empty or blank upload.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::from_text(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Output of the analyze stage: the untouched raw input plus the model's
/// free-text description of it.
///
/// `raw_data` is never mutated after creation and `context` is set exactly
/// once; both fields are private and no setters exist.
#[derive(Debug, Clone)]
pub struct Analysis {
    raw_data: String,
    context: String,
}

impl Analysis {
    pub fn new(submission: &Submission, context: impl Into<String>) -> Self {
        Self {
            raw_data: submission.text().to_string(),
            context: context.into(),
        }
    }

    pub fn raw_data(&self) -> &str {
        &self.raw_data
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

/// The closed menu of chart categories offered to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
    Histogram,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Pie,
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Histogram,
        ChartKind::Scatter,
    ];

    /// The label as it appears in the classify-stage menu.
    pub fn menu_label(&self) -> &'static str {
        match self {
            ChartKind::Pie => "Pie Chart",
            ChartKind::Bar => "Bar Graph",
            ChartKind::Line => "Line Graph",
            ChartKind::Histogram => "Histogram",
            ChartKind::Scatter => "Scatter Plot",
        }
    }

    /// Best-effort match of a free-text reply against the menu.
    ///
    /// Case-insensitive keyword match; returns None when the reply names
    /// nothing on the menu.
    pub fn parse(reply: &str) -> Option<ChartKind> {
        let reply = reply.to_lowercase();
        if reply.contains("pie") {
            Some(ChartKind::Pie)
        } else if reply.contains("histogram") {
            Some(ChartKind::Histogram)
        } else if reply.contains("bar") {
            Some(ChartKind::Bar)
        } else if reply.contains("line") {
            Some(ChartKind::Line)
        } else if reply.contains("scatter") {
            Some(ChartKind::Scatter)
        } else {
            None
        }
    }
}

/// The classify stage's answer: the verbatim reply, plus the menu entry it
/// matched if any.
///
/// The verbatim text is what flows into later prompts — the menu is a
/// suggestion to the model, not a constraint on it. The parsed kind is a
/// typed convenience with an explicit fallback (None) rather than an error.
#[derive(Debug, Clone)]
pub struct Visualization {
    raw: String,
    kind: Option<ChartKind>,
}

impl Visualization {
    pub fn from_reply(reply: impl Into<String>) -> Self {
        let raw = reply.into();
        let kind = ChartKind::parse(&raw);
        Self { raw, kind }
    }

    /// The model's reply, untouched.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> Option<ChartKind> {
        self.kind
    }
}

/// Output of the script stage: a short list of human-readable scene
/// descriptions. No structural parsing is performed on it.
#[derive(Debug, Clone)]
pub struct SceneScript(String);

impl SceneScript {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Output of the synthesize stage: a complete program in the rendering
/// engine's scripting language, ready to be written to a scene file.
#[derive(Debug, Clone)]
pub struct RenderableSource(String);

impl RenderableSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_submission_is_rejected() {
        assert!(Submission::from_text("").is_none());
        assert!(Submission::from_text("   \n\t").is_none());
    }

    #[test]
    fn test_submission_keeps_text_verbatim() {
        let sub = Submission::from_text("Electronics: 40%").unwrap();
        assert_eq!(sub.text(), "Electronics: 40%");
    }

    #[test]
    fn test_submission_from_bytes_decodes_lossily() {
        let sub = Submission::from_bytes(b"A: 1\xFF B: 2").unwrap();
        assert!(sub.text().starts_with("A: 1"));
        assert!(sub.text().ends_with("B: 2"));
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        assert!(Submission::from_bytes(b"").is_none());
    }

    #[test]
    fn test_analysis_preserves_raw_data() {
        let sub = Submission::from_text("a,b,c").unwrap();
        let analysis = Analysis::new(&sub, "three columns");
        assert_eq!(analysis.raw_data(), "a,b,c");
        assert_eq!(analysis.context(), "three columns");
    }

    #[test]
    fn test_chart_kind_parses_menu_answers() {
        for kind in ChartKind::ALL {
            assert_eq!(ChartKind::parse(kind.menu_label()), Some(kind));
        }
    }

    #[test]
    fn test_chart_kind_parse_is_case_insensitive() {
        assert_eq!(ChartKind::parse("PIE CHART"), Some(ChartKind::Pie));
        assert_eq!(ChartKind::parse("a bar graph, please"), Some(ChartKind::Bar));
    }

    #[test]
    fn test_off_menu_reply_keeps_verbatim_text_with_no_kind() {
        let viz = Visualization::from_reply("Sankey Diagram");
        assert_eq!(viz.raw(), "Sankey Diagram");
        assert_eq!(viz.kind(), None);
    }

    #[test]
    fn test_on_menu_reply_parses_kind() {
        let viz = Visualization::from_reply("Line Graph");
        assert_eq!(viz.kind(), Some(ChartKind::Line));
        assert_eq!(viz.raw(), "Line Graph");
    }
}
