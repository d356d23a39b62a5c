//! Text shown by the interactive loop.

use std::fmt::Write as _;

use pdfqa_core::{ChatState, Document, LoadOutcome, Role, Turn};

/// Commands listed by `/help`.
pub const HELP: &str = "\
Commands:
  exit, quit      End the session
  /load <path>    Load another PDF (clears the history)
  /history        Show the questions and answers so far
  /reset          Clear the history, keep the document
  /help           Show this help
Anything else is sent as a question.";

/// Banner printed before the question loop, `None` while nothing is loaded.
#[must_use]
pub const fn ready_banner(state: ChatState) -> Option<&'static str> {
    match state {
        ChatState::NoDocument => None,
        ChatState::EmptyDocument | ChatState::Ready => Some(
            "\nPDF processing complete. You can now ask questions about the PDF.\n\
             Type 'exit' or 'quit' to end the session, '/help' for commands.\n",
        ),
    }
}

/// Opening snippet of the document, `None` when `max_chars` is zero.
#[must_use]
pub fn snippet(document: &Document, max_chars: usize) -> Option<String> {
    if max_chars == 0 {
        return None;
    }
    Some(format!(
        "\n--- Extracted Text Snippet ---\n{}\n...",
        document.snippet(max_chars)
    ))
}

/// One-line report of a load, naming the document when it has a title.
#[must_use]
pub fn load_outcome(outcome: LoadOutcome, title: Option<&str>) -> String {
    match outcome {
        LoadOutcome::Loaded { pages } => match title {
            Some(title) => format!(
                "Text extraction successful: \"{title}\" ({pages} {}).",
                plural(pages)
            ),
            None => format!("Text extraction successful ({pages} {}).", plural(pages)),
        },
        LoadOutcome::Empty { pages } => format!(
            "No text could be extracted from the PDF ({pages} {}). Answers will not be grounded in it.",
            plural(pages)
        ),
        LoadOutcome::Unchanged => "Document unchanged.".to_string(),
    }
}

const fn plural(pages: usize) -> &'static str {
    if pages == 1 { "page" } else { "pages" }
}

/// Numbered listing of the committed turns.
#[must_use]
pub fn history(turns: &[Turn]) -> String {
    if turns.is_empty() {
        return "No conversation history.".to_string();
    }
    let mut out = format!("Conversation history ({} messages):", turns.len());
    for turn in turns {
        let role = match turn.role() {
            Role::User => "You",
            Role::Assistant => "Answer",
            Role::System => "System",
        };
        let _ = write!(out, "\n  [{role}] {}", truncate(turn.content(), 100));
    }
    out
}

/// Shortens `s` to at most `max_chars` characters, marking the cut.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    let flat = s.replace('\n', " ");
    match flat.char_indices().nth(max_chars) {
        None => flat,
        Some((end, _)) => format!("{}...", &flat[..end]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfqa_core::{PageText, assemble};

    #[test]
    fn snippet_is_disabled_by_zero() {
        let document = assemble(&[PageText::new(1, "Alpha")]);
        assert_eq!(snippet(&document, 0), None);
        assert_eq!(
            snippet(&document, 500).unwrap(),
            "\n--- Extracted Text Snippet ---\n\n--- Page 1 ---\nAlpha\n..."
        );
    }

    #[test]
    fn ready_banner_needs_a_document() {
        assert_eq!(ready_banner(ChatState::NoDocument), None);
        let banner = ready_banner(ChatState::Ready).unwrap();
        assert!(banner.contains("PDF processing complete."));
        assert!(banner.contains("Type 'exit' or 'quit'"));
        assert_eq!(ready_banner(ChatState::EmptyDocument), Some(banner));
    }

    #[test]
    fn history_lists_turns_in_order() {
        let turns = [Turn::user("Q1"), Turn::assistant("A1")];
        assert_eq!(
            history(&turns),
            "Conversation history (2 messages):\n  [You] Q1\n  [Answer] A1"
        );
        assert_eq!(history(&[]), "No conversation history.");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a\nb", 10), "a b");
    }

    #[test]
    fn load_reports_page_counts() {
        assert_eq!(
            load_outcome(LoadOutcome::Loaded { pages: 1 }, None),
            "Text extraction successful (1 page)."
        );
        assert!(
            load_outcome(LoadOutcome::Empty { pages: 2 }, None)
                .starts_with("No text could be extracted")
        );
    }

    #[test]
    fn load_report_names_the_title() {
        assert_eq!(
            load_outcome(LoadOutcome::Loaded { pages: 3 }, Some("Annual Report")),
            "Text extraction successful: \"Annual Report\" (3 pages)."
        );
    }
}
