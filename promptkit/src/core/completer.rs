/// A single completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Text inserted into the buffer.
    pub text: String,
    /// Text shown in the completion menu.
    pub display: String,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            display: text.clone(),
            text,
        }
    }
}

/// Completion seam between the prompt surface and whoever supplies
/// candidates.
pub trait Complete {
    /// Complete `line` with the cursor at character offset `pos`.
    fn complete(&self, line: &str, pos: usize) -> Vec<Completion>;
}

/// Completer that never offers anything.
pub struct NoComplete;

impl Complete for NoComplete {
    fn complete(&self, _line: &str, _pos: usize) -> Vec<Completion> {
        Vec::new()
    }
}

/// Longest common prefix of all candidate texts; what first-TAB
/// insertion uses in "default" completion mode.
pub fn common_prefix(completions: &[Completion]) -> String {
    let Some(first) = completions.first() else {
        return String::new();
    };
    let mut prefix = first.text.clone();
    for completion in &completions[1..] {
        let keep = prefix
            .chars()
            .zip(completion.text.chars())
            .take_while(|(a, b)| a == b)
            .count();
        prefix.truncate(
            prefix
                .char_indices()
                .nth(keep)
                .map_or(prefix.len(), |(b, _)| b),
        );
        if prefix.is_empty() {
            break;
        }
    }
    prefix
}
