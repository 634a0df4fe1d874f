//! Prompt assembly for commit message generation.
//!
//! Pure string assembly: collected repository state plus optional free-text
//! guidance become one instruction document. Oversized sections are truncated
//! to a bounded character budget with a visible marker so the document never
//! exceeds the API's input constraints.

use crate::git::RepositoryState;

/// Maximum characters of staged diff included in the prompt.
pub const MAX_DIFF_CHARS: usize = 50_000;

/// Maximum characters of commit history included in the prompt.
pub const MAX_HISTORY_CHARS: usize = 10_000;

/// Marker appended in place of content removed by truncation.
pub const TRUNCATION_MARKER: &str = "\n[truncated due to size]";

/// Literal the model is instructed to return when the diff and context carry
/// too little signal for a meaningful commit message.
pub const INSUFFICIENT_CONTEXT_SENTINEL: &str = "INSUFFICIENT_CONTEXT";

/// System role text sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are an experienced developer. \
    Having just written some code, you are now committing that code to git.";

/// Assembled instruction document for one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDocument {
    /// System role text.
    pub system: String,
    /// User role text: delimited repository state plus style guidelines.
    pub user: String,
}

impl PromptDocument {
    /// Assembles the prompt from repository state and optional guidance.
    ///
    /// Deterministic given identical inputs; performs no I/O.
    pub fn assemble(state: &RepositoryState, guidance: Option<&str>) -> Self {
        let diff = truncate_with_marker(&state.diff, MAX_DIFF_CHARS);
        let history = truncate_with_marker(&state.recent_subjects.join("\n"), MAX_HISTORY_CHARS);

        let mut user = String::new();

        user.push_str(&format!("<branch>\n{}\n</branch>\n\n", state.branch));

        if !history.is_empty() {
            user.push_str(&format!("<history>\n{history}\n</history>\n\n"));
        }

        user.push_str(&format!("<diff>\n{diff}\n</diff>\n\n"));

        if let Some(guidance) = guidance {
            if !guidance.trim().is_empty() {
                user.push_str(&format!("<guidance>\n{}\n</guidance>\n\n", guidance.trim()));
            }
        }

        user.push_str(&format!(
            "Based on these changes and the branch context, generate a concise, \
             one-line commit message following these guidelines:\n\
             - Start with an imperative verb\n\
             - Infer intent from the diff and branch context, if obvious\n\
             - Otherwise, identify exactly what was changed by symbol or function name\n\
             - Surround code-related terms in backticks (e.g. \"Move `function_name`\")\n\
             - Be concise, but not to the point of losing specificity\n\
             - Prefer a single line; avoid writing a paragraph\n\
             - Do not include issue numbers or references\n\
             - If the commit history follows the conventional commit style, \
             use a matching type(scope): prefix; otherwise do not add one\n\
             - Consider the branch name and previous commits for context\n\
             - If there are multiple changes, list the most important one first\n\
             - Do not start the message with \"Update\" or \"Refactor\"\n\n\
             If the diff and context are not enough to produce a meaningful commit \
             message, reply with exactly {INSUFFICIENT_CONTEXT_SENTINEL} and nothing else.\n\n\
             Only write the commit message, nothing else.\n"
        ));

        Self {
            system: SYSTEM_PROMPT.to_string(),
            user,
        }
    }
}

/// Truncates `text` to at most `max_chars` characters, appending
/// [`TRUNCATION_MARKER`] when anything was removed.
///
/// The first `max_chars` characters are preserved exactly, and the result
/// never exceeds `max_chars` plus the marker length.
fn truncate_with_marker(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_index, _)) => {
            let mut truncated = text[..byte_index].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
    }
}
