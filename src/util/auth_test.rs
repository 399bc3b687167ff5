use super::*;
use crate::config::ClientConfig;
use crate::net::types::Identity;
use crate::testing::{MemoryBrowser, MockTransport, test_session};
use serde_json::json;

fn signed_in() -> SessionState {
    SessionState::resolved(Some(Identity { email: "a@b.com".to_owned() }))
}

#[test]
fn loading_wins_even_when_authenticated() {
    let mut state = signed_in();
    state.loading = true;
    assert_eq!(guard_decision(&state), GuardDecision::Loading);
}

#[test]
fn loading_when_pending_and_signed_out() {
    assert_eq!(guard_decision(&SessionState::pending()), GuardDecision::Loading);
}

#[test]
fn allow_when_settled_with_identity() {
    assert_eq!(guard_decision(&signed_in()), GuardDecision::Allow);
}

#[test]
fn allow_when_settled_with_legacy_token_only() {
    let mut state = SessionState::resolved(None);
    state.credential_token = Some("tok".to_owned());
    assert_eq!(guard_decision(&state), GuardDecision::Allow);
}

#[test]
fn redirect_when_settled_and_signed_out() {
    assert_eq!(guard_decision(&SessionState::resolved(None)), GuardDecision::Redirect);
}

#[test]
fn redirect_targets_login() {
    assert_eq!(GuardDecision::Redirect.target(), Some(LOGIN_ROUTE));
    assert_eq!(GuardDecision::Loading.target(), None);
    assert_eq!(GuardDecision::Allow.target(), None);
}

#[tokio::test]
async fn logout_from_protected_view_leaves_for_home() {
    let mock = MockTransport::new();
    let browser = MemoryBrowser::new();
    mock.reply_json(200, &json!({ "email": "a@b.com" }));
    mock.reply(200, "{}");
    let session = test_session(&mock, &browser, ClientConfig::default());
    session.refresh().await;
    assert_eq!(guard_decision(&session.snapshot()), GuardDecision::Allow);

    session.logout().await;

    let decision = guard_decision(&session.snapshot());
    assert_eq!(decision, GuardDecision::Leave);
    assert_eq!(decision.target(), Some(LOGOUT_ROUTE));
}

#[tokio::test]
async fn logout_leave_also_holds_when_backend_logout_fails() {
    let mock = MockTransport::new();
    let browser = MemoryBrowser::new();
    mock.reply_json(200, &json!({ "email": "a@b.com" }));
    mock.fail("offline");
    let session = test_session(&mock, &browser, ClientConfig::default());
    session.refresh().await;

    session.logout().await;

    assert_eq!(guard_decision(&session.snapshot()).target(), Some(LOGOUT_ROUTE));
}

#[tokio::test]
async fn acknowledged_logout_redirects_to_login() {
    let mock = MockTransport::new();
    let browser = MemoryBrowser::new();
    mock.reply_json(200, &json!({ "email": "a@b.com" }));
    mock.reply(200, "{}");
    let session = test_session(&mock, &browser, ClientConfig::default());
    session.refresh().await;
    session.logout().await;

    let mut state = session.snapshot();
    assert_eq!(guard_decision(&state), GuardDecision::Leave);
    state.acknowledge_logout();
    assert_eq!(guard_decision(&state), GuardDecision::Redirect);
}
