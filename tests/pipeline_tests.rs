use json_harvest::fetch::HttpClient;
use json_harvest::stages::{ExtractOptions, download_all, extract_links};
use json_harvest::{
    ErrorKind, Harvester, LinkStrategy, ProgressSink, Session, SessionState, StageEvent, StageKind,
};
use std::net::TcpListener;
use std::path::PathBuf;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Address of a port nothing listens on
fn closed_port_url(file: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/{}", addr, file)
}

async fn collect(mut rx: mpsc::Receiver<StageEvent>) -> Vec<StageEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_extract_links_from_page() {
    let server = MockServer::start().await;
    let page = r#"<html><body>
        <a href="data/first.json">first</a>
        <a href="/second.JSON">second</a>
        <a href="readme.html">readme</a>
        <script src="https://cdn.example.org/third.json"></script>
    </body></html>"#;
    serve(&server, "/catalog/", page).await;

    let page_url = format!("{}/catalog/", server.uri());
    let links = extract_links(&HttpClient::new(), &page_url, &ExtractOptions::default())
        .await
        .unwrap();

    assert_eq!(
        links,
        vec![
            format!("{}/catalog/data/first.json", server.uri()),
            format!("{}/catalog/second.JSON", server.uri()),
            "https://cdn.example.org/third.json".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_extract_fails_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = extract_links(
        &HttpClient::new(),
        &format!("{}/missing", server.uri()),
        &ExtractOptions::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Fetch);
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_download_reports_progress_per_file() {
    let server = MockServer::start().await;
    serve(&server, "/a.json", r#"{"a": 1}"#).await;
    serve(&server, "/nested/b.json", "[1]").await;
    serve(&server, "/c.json", "null").await;

    let links = vec![
        format!("{}/a.json", server.uri()),
        format!("{}/nested/b.json", server.uri()),
        format!("{}/c.json", server.uri()),
    ];
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("json files");
    let (tx, rx) = mpsc::channel(16);

    let saved = download_all(&HttpClient::new(), &links, &dest, &ProgressSink::new(tx))
        .await
        .unwrap();

    assert_eq!(saved.len(), 3);
    assert_eq!(saved[1].url, links[1]);
    assert_eq!(saved[1].path, dest.join("b.json"));
    assert_eq!(std::fs::read_to_string(dest.join("a.json")).unwrap(), r#"{"a": 1}"#);

    let percents: Vec<f64> = collect(rx)
        .await
        .into_iter()
        .filter_map(|event| match event {
            StageEvent::Progress(update) => Some(update.percent()),
            _ => None,
        })
        .collect();
    assert_eq!(
        percents,
        vec![1.0 / 3.0 * 100.0, 2.0 / 3.0 * 100.0, 100.0]
    );
}

#[tokio::test]
async fn test_download_stops_at_first_transport_error() {
    let server = MockServer::start().await;
    serve(&server, "/one.json", "{}").await;
    Mock::given(method("GET"))
        .and(path("/three.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let links = vec![
        format!("{}/one.json", server.uri()),
        closed_port_url("two.json"),
        format!("{}/three.json", server.uri()),
    ];
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().to_path_buf();

    let err = download_all(&HttpClient::new(), &links, &dest, &ProgressSink::none())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Fetch);
    assert!(dest.join("one.json").exists());
    assert!(!dest.join("two.json").exists());
    assert!(!dest.join("three.json").exists());
}

#[tokio::test]
async fn test_harvester_download_failure_reaches_session() {
    let server = MockServer::start().await;
    let page = r#"<a href="first.json">1</a><a href="second.json">2</a><a href="third.json">3</a>"#;
    serve(&server, "/index.html", page).await;
    serve(&server, "/index.html/first.json", r#"{"ok": true}"#).await;
    Mock::given(method("GET"))
        .and(path("/index.html/second.json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/index.html/third.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let harvester = Harvester::new(&format!("{}/index.html", server.uri()), dir.path());
    let mut session = Session::new();
    session.begin_download().unwrap();

    let events = collect(harvester.spawn_download()).await;
    let failures = events
        .iter()
        .filter(|event| matches!(event, StageEvent::Failed(_)))
        .count();
    assert_eq!(failures, 1);
    for event in events {
        session.apply(event);
    }

    match session.state() {
        SessionState::Failed { stage, message } => {
            assert_eq!(*stage, StageKind::Download);
            assert!(message.starts_with("Error during download"));
            assert!(message.contains("500"));
        }
        other => panic!("unexpected state {:?}", other),
    }

    let json_dir = dir.path().join("json files");
    assert!(json_dir.join("first.json").exists());
    assert!(!json_dir.join("third.json").exists());

    session.acknowledge().unwrap();
    let controls = session.controls();
    assert!(controls.download_enabled);
    assert!(controls.convert_enabled);
}

#[tokio::test]
async fn test_full_harvest_writes_json_and_html() {
    let server = MockServer::start().await;
    let page = r#"<ul><li><a href="/api/config.json">config</a></li><li><a href="empty.json">empty</a></li></ul>"#;
    serve(&server, "/", page).await;
    serve(&server, "/api/config.json", r#"{"a": 1, "b": [true, null]}"#).await;
    serve(&server, "/empty.json", "{}").await;

    let dir = tempfile::tempdir().unwrap();
    let harvester =
        Harvester::new(&format!("{}/", server.uri()), dir.path()).with_strategy(LinkStrategy::Markup);
    let mut session = Session::new();

    session.begin_download().unwrap();
    for event in collect(harvester.spawn_download()).await {
        session.apply(event);
    }
    assert_eq!(session.state(), &SessionState::ReadyToConvert);
    assert_eq!(session.controls().progress, 100.0);

    let files = session.begin_conversion().unwrap();
    let json_dir = dir.path().join("json files");
    assert_eq!(
        files,
        vec![json_dir.join("config.json"), json_dir.join("empty.json")]
    );

    for event in collect(harvester.spawn_conversion(files)).await {
        session.apply(event);
    }
    assert_eq!(session.state(), &SessionState::ReadyToConvert);
    assert_eq!(session.controls().status, "Conversion completed.");

    let html_dir = dir.path().join("html files");
    assert_eq!(
        session.html_files(),
        &[html_dir.join("config.html"), html_dir.join("empty.html")]
    );
    assert_eq!(
        std::fs::read_to_string(html_dir.join("config.html")).unwrap(),
        concat!(
            r#"<table border="1"><tr><th>a</th><td>1</td></tr>"#,
            r#"<tr><th>b</th><td><table border="1"><tr><td>true</td></tr><tr><td>null</td></tr></table></td></tr>"#,
            "</table>"
        )
    );
    assert_eq!(
        std::fs::read_to_string(html_dir.join("empty.html")).unwrap(),
        r#"<table border="1"></table>"#
    );
}

#[tokio::test]
async fn test_missing_inputs_fail_the_download_stage() {
    let harvester = Harvester::new("", PathBuf::from("out"));
    let err = harvester.download(&ProgressSink::none()).await.unwrap_err();
    assert_eq!(err.stage, StageKind::Download);
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[tokio::test]
async fn test_conversion_of_nothing_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let harvester = Harvester::new("http://unused.invalid/", dir.path());
    let events = collect(harvester.spawn_conversion(Vec::new())).await;
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], StageEvent::Converted(files) if files.is_empty()));
    assert!(dir.path().join("html files").is_dir());
}
