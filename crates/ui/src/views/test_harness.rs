use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use buddy_core::{Message, Session};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{ChatCompletions, PracticeService, TutorError};

use crate::context::{UiApp, build_app_context};
use crate::views::PracticeView;
use crate::vm::PracticeIntent;

use super::practice::PracticeTestHandles;

pub const WORDS_REPLY: &str = r#"Here are five words for you:
[{"word":"happy","phonetic":"(hap-ee)"},
 {"word":"help","phonetic":"(help)"},
 {"word":"friend","phonetic":"(frend)"},
 {"word":"water","phonetic":"(waw-ter)"},
 {"word":"school","phonetic":"(skool)"}]"#;

/// Tutor that answers from a fixed script, one reply per request.
#[derive(Default)]
pub struct ScriptedTutor {
    replies: Mutex<VecDeque<Result<String, TutorError>>>,
    enabled: bool,
}

impl ScriptedTutor {
    pub fn new(replies: Vec<Result<String, TutorError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ChatCompletions for ScriptedTutor {
    async fn complete(&self, _messages: &[Message]) -> Result<String, TutorError> {
        if !self.enabled {
            return Err(TutorError::Disabled);
        }
        self.replies
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Err(TutorError::EmptyResponse))
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

struct TestApp {
    practice: Arc<PracticeService>,
}

impl UiApp for TestApp {
    fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }
}

#[derive(Props, Clone)]
struct PracticeHarnessProps {
    app: Arc<TestApp>,
    handles: PracticeTestHandles,
}

impl PartialEq for PracticeHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn PracticeRoot(props: PracticeHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { PracticeView {} }
}

pub struct PracticeHarness {
    pub dom: VirtualDom,
    handles: PracticeTestHandles,
}

impl PracticeHarness {
    pub fn new(tutor: ScriptedTutor) -> Self {
        let practice = Arc::new(PracticeService::new(Arc::new(tutor)));
        let handles = PracticeTestHandles::default();
        let mut dom = VirtualDom::new_with_props(
            PracticeRoot,
            PracticeHarnessProps {
                app: Arc::new(TestApp { practice }),
                handles: handles.clone(),
            },
        );
        dom.rebuild_in_place();
        drive_dom(&mut dom);
        Self { dom, handles }
    }

    /// Dispatch an intent and let any spawned tutor request finish.
    pub async fn dispatch(&mut self, intent: PracticeIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        self.drive_async().await;
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Read the live session without subscribing to it.
    pub fn with_session<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        let session = self.handles.session();
        self.dom.in_runtime(|| f(&session.peek()))
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}
