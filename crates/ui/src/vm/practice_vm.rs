use buddy_core::{Session, WORDS_PER_ROUND};

use super::markdown_vm::markdown_to_html;

/// User actions emitted by the practice view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PracticeIntent {
    Start,
    Input(String),
    Submit,
    Advance,
    Restart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartVm {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordVm {
    pub progress_label: String,
    pub word: String,
    pub phonetic: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceVm {
    pub disabled: bool,
}

/// Everything the practice page renders, derived from a [`Session`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeVm {
    /// Present only before the first word list is loaded.
    pub start: Option<StartVm>,
    pub word: Option<WordVm>,
    pub input: String,
    pub input_disabled: bool,
    pub submit_disabled: bool,
    /// Latest tutor reply as sanitized HTML.
    pub feedback_html: Option<String>,
    pub advance: Option<AdvanceVm>,
    pub finished: bool,
    pub loading: bool,
}

#[must_use]
pub fn map_practice_vm(session: &Session) -> PracticeVm {
    let loading = session.is_loading();
    let finished = session.is_finished();

    let Some(current) = session.current_word() else {
        return PracticeVm {
            start: Some(StartVm {
                label: if loading { "Loading..." } else { "Start Practice" },
                disabled: loading,
            }),
            word: None,
            input: String::new(),
            input_disabled: true,
            submit_disabled: true,
            feedback_html: None,
            advance: None,
            finished: false,
            loading,
        };
    };

    let word = WordVm {
        progress_label: format!(
            "Word {} of {WORDS_PER_ROUND}:",
            session.current_index() + 1
        ),
        word: current.word().to_string(),
        phonetic: current.phonetic().to_string(),
    };
    let feedback_html = session
        .latest_feedback()
        .map(|message| markdown_to_html(&message.content));
    let advance = feedback_html
        .as_ref()
        .map(|_| AdvanceVm { disabled: finished });
    let locked = loading || finished;

    PracticeVm {
        start: None,
        word: Some(word),
        input: session.input().to_string(),
        input_disabled: locked,
        submit_disabled: locked,
        feedback_html,
        advance,
        finished,
        loading,
    }
}
