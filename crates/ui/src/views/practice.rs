use buddy_core::Session;
use dioxus::prelude::*;
use services::PracticeService;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{PracticeIntent, PracticeVm, map_practice_vm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn PracticeView() -> Element {
    let ctx = use_context::<AppContext>();
    let practice = ctx.practice();
    let tutor_enabled = ctx.tutor_enabled();

    let session = use_signal(Session::new);
    let error = use_signal(|| None::<ViewError>);

    let dispatch_intent = use_callback(move |intent: PracticeIntent| {
        let mut session = session;
        let mut error = error;

        if !matches!(intent, PracticeIntent::Input(_)) {
            tracing::debug!(?intent, "practice intent");
        }

        match intent {
            PracticeIntent::Input(text) => {
                session.write().set_input(text);
            }
            PracticeIntent::Advance => {
                PracticeService::advance_word(&mut session.write());
            }
            PracticeIntent::Start | PracticeIntent::Restart => {
                let pending = match session.write().begin_word_set() {
                    Ok(pending) => pending,
                    Err(err) => {
                        error.set(Some(ViewError::from_session(&err)));
                        return;
                    }
                };
                error.set(None);
                let practice = practice.clone();
                spawn(async move {
                    let reply = practice.send(&pending).await;
                    let result =
                        PracticeService::resolve_word_set(&mut session.write(), pending, reply);
                    error.set(result.err().as_ref().map(ViewError::from_practice));
                });
            }
            PracticeIntent::Submit => {
                let sentence = session.peek().input().to_string();
                let pending = match session.write().begin_submission(&sentence) {
                    Ok(Some(pending)) => pending,
                    Ok(None) => return,
                    Err(err) => {
                        error.set(Some(ViewError::from_session(&err)));
                        return;
                    }
                };
                error.set(None);
                let practice = practice.clone();
                spawn(async move {
                    let reply = practice.send(&pending).await;
                    let result =
                        PracticeService::resolve_feedback(&mut session.write(), pending, reply);
                    error.set(result.err().as_ref().map(ViewError::from_practice));
                });
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<PracticeTestHandles>() {
                handles.register(dispatch_intent, session);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let modifiers = evt.data.modifiers();
        let submit_chord =
            modifiers.contains(Modifiers::CONTROL) || modifiers.contains(Modifiers::META);
        if evt.data.key() == Key::Enter && submit_chord {
            evt.prevent_default();
            dispatch_intent.call(PracticeIntent::Submit);
        }
    });

    let PracticeVm {
        start,
        word,
        input,
        input_disabled,
        submit_disabled,
        feedback_html,
        advance,
        finished,
        loading,
    } = map_practice_vm(&session.read());
    let error_message = (*error.read()).map(ViewError::message);

    rsx! {
        div { class: "page practice-page",
            h1 { class: "practice-title", "Word Buddy 🧡" }
            if let Some(message) = error_message {
                p { class: "practice-error", role: "alert", "{message}" }
            }
            if let Some(start) = start {
                if !tutor_enabled {
                    p { class: "practice-hint", "Set WORD_BUDDY_API_KEY to talk to the tutor." }
                }
                button {
                    class: "btn btn-primary",
                    id: "practice-start",
                    r#type: "button",
                    disabled: start.disabled,
                    onclick: move |_| dispatch_intent.call(PracticeIntent::Start),
                    "{start.label}"
                }
            }
            if let Some(word) = word {
                h2 { class: "practice-word",
                    "{word.progress_label} "
                    strong { "{word.word}" }
                    " "
                    span { class: "practice-phonetic", "{word.phonetic}" }
                }
                textarea {
                    class: "practice-input",
                    id: "practice-input",
                    rows: "3",
                    placeholder: "Write a sentence using the word...",
                    value: "{input}",
                    disabled: input_disabled,
                    oninput: move |evt: FormEvent| dispatch_intent.call(PracticeIntent::Input(evt.value())),
                    onkeydown: move |evt| on_key.call(evt),
                }
                div { class: "practice-actions",
                    button {
                        class: "btn btn-primary",
                        id: "practice-submit",
                        r#type: "button",
                        disabled: submit_disabled,
                        onclick: move |_| dispatch_intent.call(PracticeIntent::Submit),
                        if loading { "Checking..." } else { "Submit" }
                    }
                }
                if let Some(html) = feedback_html {
                    div { class: "practice-feedback", id: "practice-feedback",
                        div { class: "practice-feedback__text", dangerous_inner_html: "{html}" }
                        if finished {
                            div { class: "practice-finished",
                                p { strong { "You’ve finished this set! 🎉" } }
                                button {
                                    class: "btn btn-primary",
                                    id: "practice-restart",
                                    r#type: "button",
                                    disabled: loading,
                                    onclick: move |_| dispatch_intent.call(PracticeIntent::Restart),
                                    "Start New Round"
                                }
                            }
                        }
                        if let Some(next) = advance {
                            button {
                                class: "btn btn-secondary",
                                id: "practice-next",
                                r#type: "button",
                                disabled: next.disabled,
                                onclick: move |_| dispatch_intent.call(PracticeIntent::Advance),
                                "Next Word"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct PracticeTestHandles {
    dispatch: Rc<RefCell<Option<Callback<PracticeIntent>>>>,
    session: Rc<RefCell<Option<Signal<Session>>>>,
}

#[cfg(test)]
impl PracticeTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<PracticeIntent>, session: Signal<Session>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<PracticeIntent> {
        (*self.dispatch.borrow()).expect("practice dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<Session> {
        (*self.session.borrow()).expect("practice session registered")
    }
}
