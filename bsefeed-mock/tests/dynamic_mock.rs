use bsefeed::{BseError, RequestKind, Transport, WireRequest};
use bsefeed_mock::{MockBehavior, MockTransport, SESSION_EXPIRED_LOCATION, fixtures};
use url::Url;

fn priming() -> WireRequest {
    WireRequest::priming(Url::parse("https://mock.test/ann.html").unwrap())
}

fn data() -> WireRequest {
    WireRequest::data(
        Url::parse("https://mock.test/w").unwrap(),
        vec![("strScrip", "543985".into())],
    )
}

#[tokio::test]
async fn test_mock_data_return() {
    let mock = MockTransport::new().returning(fixtures::empty_meta_response());
    let session = mock.open_session().unwrap();
    let got = session.get(&data()).await.expect("data ok");
    assert_eq!(got, fixtures::empty_meta_response());
}

#[tokio::test]
async fn test_mock_data_fail() {
    let err = BseError::network("connection reset");
    let mock = MockTransport::new().with_data(MockBehavior::Fail(err.clone()));
    let session = mock.open_session().unwrap();
    let got = session.get(&data()).await.expect_err("err");
    assert_eq!(got, err);
}

#[tokio::test]
async fn test_mock_records_requests_per_session() {
    let mock = MockTransport::new();
    let first = mock.open_session().unwrap();
    let second = mock.open_session().unwrap();
    first.get(&priming()).await.unwrap();
    second.get(&data()).await.unwrap();
    first.get(&data()).await.unwrap();

    assert_eq!(mock.sessions_opened(), 2);
    let seen: Vec<(usize, RequestKind)> = mock
        .requests()
        .iter()
        .map(|r| (r.session, r.request.kind))
        .collect();
    assert_eq!(
        seen,
        vec![
            (0, RequestKind::Priming),
            (1, RequestKind::Data),
            (0, RequestKind::Data),
        ]
    );
    assert_eq!(mock.requests_of(RequestKind::Data).len(), 2);
}

#[tokio::test]
async fn test_mock_require_priming_is_per_session() {
    let mock = MockTransport::new().require_priming();

    let cold = mock.open_session().unwrap();
    let resp = cold.get(&data()).await.unwrap();
    assert_eq!(resp.status, 302);
    assert_eq!(resp.location.as_deref(), Some(SESSION_EXPIRED_LOCATION));

    let warm = mock.open_session().unwrap();
    warm.get(&priming()).await.unwrap();
    let resp = warm.get(&data()).await.unwrap();
    assert_eq!(resp.status, 200);
}

#[tokio::test]
async fn test_mock_failed_priming_leaves_session_cold() {
    let mock = MockTransport::new()
        .require_priming()
        .with_priming(MockBehavior::Fail(BseError::network("dns error")));
    let session = mock.open_session().unwrap();
    assert!(session.get(&priming()).await.is_err());
    let resp = session.get(&data()).await.unwrap();
    assert!(resp.is_redirect());
}

#[tokio::test(start_paused = true)]
async fn test_mock_hang_never_resolves() {
    let mock = MockTransport::new().with_data(MockBehavior::Hang);
    let session = mock.open_session().unwrap();
    let out = tokio::time::timeout(std::time::Duration::from_secs(5), session.get(&data())).await;
    assert!(out.is_err());
    assert_eq!(mock.requests().len(), 1);
}

#[test]
fn test_fixture_shapes() {
    assert!(fixtures::error_page_response().body.chars().count() > 400);
    assert!(fixtures::script_assignment_response().body.contains("var annData = {"));
    assert_eq!(fixtures::sample_rows().as_array().map(Vec::len), Some(2));
}
