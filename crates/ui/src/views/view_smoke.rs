use buddy_core::SessionPhase;
use services::TutorError;

use super::test_harness::{PracticeHarness, ScriptedTutor, WORDS_REPLY};
use crate::vm::PracticeIntent;

fn ok(reply: &str) -> Result<String, TutorError> {
    Ok(reply.to_string())
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_start_button() {
    let harness = PracticeHarness::new(ScriptedTutor::new(Vec::new()));
    let html = harness.render();
    assert!(html.contains("Word Buddy"), "missing title in {html}");
    assert!(html.contains("Start Practice"), "missing start in {html}");
    assert!(!html.contains("WORD_BUDDY_API_KEY"), "unexpected hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_shows_first_word_after_start() {
    let mut harness = PracticeHarness::new(ScriptedTutor::new(vec![ok(WORDS_REPLY)]));
    harness.dispatch(PracticeIntent::Start).await;

    let html = harness.render();
    assert!(html.contains("Word 1 of 5:"), "missing progress in {html}");
    assert!(html.contains("happy"), "missing word in {html}");
    assert!(html.contains("(hap-ee)"), "missing phonetic in {html}");
    assert!(!html.contains("Start Practice"), "start still shown in {html}");
    assert_eq!(
        harness.with_session(|s| s.phase()),
        SessionPhase::AwaitingInput
    );
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_latest_feedback() {
    let mut harness = PracticeHarness::new(ScriptedTutor::new(vec![
        ok(WORDS_REPLY),
        ok("**Great job!** You used *happy* correctly."),
    ]));
    harness.dispatch(PracticeIntent::Start).await;
    harness
        .dispatch(PracticeIntent::Input("I am happy today.".into()))
        .await;
    harness.dispatch(PracticeIntent::Submit).await;

    let html = harness.render();
    assert!(html.contains("<strong>Great job!</strong>"), "missing feedback in {html}");
    assert!(html.contains("Next Word"), "missing next in {html}");
    assert_eq!(harness.with_session(|s| s.transcript().len()), 2);
    assert_eq!(harness.with_session(|s| s.input().to_string()), "");

    harness.dispatch(PracticeIntent::Advance).await;
    let html = harness.render();
    assert!(html.contains("Word 2 of 5:"), "missing progress in {html}");
    assert!(html.contains("Great job!"), "feedback cleared in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_ignores_blank_submission() {
    let mut harness = PracticeHarness::new(ScriptedTutor::new(vec![ok(WORDS_REPLY)]));
    harness.dispatch(PracticeIntent::Start).await;
    harness.dispatch(PracticeIntent::Input("   ".into())).await;
    harness.dispatch(PracticeIntent::Submit).await;

    assert_eq!(harness.with_session(|s| s.transcript().len()), 0);
    assert!(!harness.with_session(|s| s.is_loading()));
    assert!(!harness.render().contains("practice-feedback"));
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_finishes_round() {
    let mut replies = vec![ok(WORDS_REPLY)];
    replies.extend((0..5).map(|i| ok(&format!("Reply {i}"))));
    let mut harness = PracticeHarness::new(ScriptedTutor::new(replies));
    harness.dispatch(PracticeIntent::Start).await;

    for i in 0..5 {
        if i > 0 {
            harness.dispatch(PracticeIntent::Advance).await;
        }
        harness
            .dispatch(PracticeIntent::Input(format!("Sentence {i}.")))
            .await;
        harness.dispatch(PracticeIntent::Submit).await;
    }

    let html = harness.render();
    assert!(html.contains("finished this set"), "missing banner in {html}");
    assert!(html.contains("Start New Round"), "missing restart in {html}");
    assert!(html.contains("Reply 4"), "missing last reply in {html}");
    assert!(!html.contains("Reply 3"), "older reply shown in {html}");
    assert!(harness.with_session(|s| s.is_finished()));
    assert_eq!(harness.with_session(|s| s.transcript().len()), 10);
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_restart_resets_round() {
    let mut replies = vec![ok(WORDS_REPLY)];
    replies.extend((0..5).map(|_| ok("Nice!")));
    replies.push(ok(WORDS_REPLY));
    let mut harness = PracticeHarness::new(ScriptedTutor::new(replies));
    harness.dispatch(PracticeIntent::Start).await;
    for i in 0..5 {
        if i > 0 {
            harness.dispatch(PracticeIntent::Advance).await;
        }
        harness.dispatch(PracticeIntent::Input("A sentence.".into())).await;
        harness.dispatch(PracticeIntent::Submit).await;
    }
    assert!(harness.with_session(|s| s.is_finished()));

    harness.dispatch(PracticeIntent::Restart).await;
    let html = harness.render();
    assert!(html.contains("Word 1 of 5:"), "missing progress in {html}");
    assert!(!html.contains("finished this set"), "banner still shown in {html}");
    assert_eq!(harness.with_session(|s| s.transcript().len()), 0);
    assert_eq!(harness.with_session(|s| s.current_index()), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_reports_unreadable_word_list() {
    let mut harness =
        PracticeHarness::new(ScriptedTutor::new(vec![ok("Let's practice happy and help!")]));
    harness.dispatch(PracticeIntent::Start).await;

    let html = harness.render();
    assert!(html.contains("Start Practice"), "start missing in {html}");
    assert!(html.contains("could not be read"), "missing error in {html}");
    assert!(!harness.with_session(|s| s.is_loading()));
    assert_eq!(harness.with_session(|s| s.phase()), SessionPhase::Idle);
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_reports_disabled_tutor() {
    let mut harness = PracticeHarness::new(ScriptedTutor::disabled());
    assert!(harness.render().contains("WORD_BUDDY_API_KEY"));

    harness.dispatch(PracticeIntent::Start).await;
    let html = harness.render();
    assert!(html.contains("not configured"), "missing error in {html}");
    assert!(!harness.with_session(|s| s.is_loading()));
}
