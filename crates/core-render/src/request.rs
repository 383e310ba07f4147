//! Read-only input to a refresh cycle, produced by the editor loop.
//!
//! Offsets (`RenderRequest::dot`, `CompletionOverlay::start` / `end`) are UTF-8
//! byte offsets into the concatenated token text, the same encoding the
//! editor's buffer uses. Callers must keep them on char boundaries and within
//! the text; out of range values are not detected.

/// Editor mode, used only to pick the banner under the input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Insert,
    Command,
    Completing,
    /// Any other mode: the banner line is started but left empty.
    Other(String),
}

impl Mode {
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            Mode::Insert | Mode::Other(_) => None,
            Mode::Command => Some("-- COMMAND --"),
            Mode::Completing => Some("-- COMPLETING --"),
        }
    }
}

/// A run of input text sharing one style tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub style: String,
}

impl Token {
    pub fn new(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: style.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePart {
    pub text: String,
    /// Part matches what the user already typed (drawn with the qualifier).
    pub already_typed: bool,
}

impl CandidatePart {
    pub fn new(text: impl Into<String>, already_typed: bool) -> Self {
        Self {
            text: text.into(),
            already_typed,
        }
    }
}

/// One completion candidate: `text` is what the grid shows, `parts` what
/// replaces the completed range in the input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub parts: Vec<CandidatePart>,
}

impl Candidate {
    pub fn from_parts(parts: Vec<CandidatePart>) -> Self {
        let text = parts.iter().map(|p| p.text.as_str()).collect();
        Self { text, parts }
    }

    /// Single untyped part.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::from_parts(vec![CandidatePart::new(text, false)])
    }
}

/// Completion popup state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionOverlay {
    pub candidates: Vec<Candidate>,
    /// Selected candidate, `None` when nothing is selected yet.
    pub current: Option<usize>,
    /// Byte range `[start, end)` of the token text being completed.
    pub start: usize,
    pub end: usize,
    /// Tag for the spliced-in candidate.
    pub style: String,
}

impl CompletionOverlay {
    pub fn selected(&self) -> Option<&Candidate> {
        self.current.and_then(|k| self.candidates.get(k))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderRequest {
    pub prompt: String,
    pub rprompt: String,
    pub tokens: Vec<Token>,
    /// Byte offset of the logical cursor in the concatenated token text.
    pub dot: usize,
    pub completion: Option<CompletionOverlay>,
    pub mode: Mode,
    pub tip: String,
}

impl RenderRequest {
    /// Concatenated token text (what `dot` and the overlay range index into).
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}
