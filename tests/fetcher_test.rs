use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use multifetch::domain::FetchOutcome;
use multifetch::fetcher::http_fetcher::HttpFetcher;
use multifetch::fetcher::parallel::ParallelFetcher;
use multifetch::fetcher::{FetchError, Fetcher};

/// A local address nothing listens on.
fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

/// Serves responses that announce 100 bytes, send 5, then hang up.
async fn truncated_body_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nshort")
                    .await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}/cut", addr)
}

async fn mount_body(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_returns_full_body() {
    let server = MockServer::start().await;
    mount_body(&server, "/versions.json", 200, r#"["14.1.1","14.1.0"]"#).await;

    let fetcher = HttpFetcher::new().unwrap();
    let body = assert_ok!(fetcher.fetch(&format!("{}/versions.json", server.uri())).await);

    assert_eq!(body, r#"["14.1.1","14.1.0"]"#);
}

#[tokio::test]
async fn test_error_statuses_are_still_bodies() {
    let server = MockServer::start().await;
    mount_body(&server, "/missing", 404, "not found here").await;
    mount_body(&server, "/broken", 500, "internal oops").await;

    let fetcher = HttpFetcher::new().unwrap();

    let missing = assert_ok!(fetcher.fetch(&format!("{}/missing", server.uri())).await);
    let broken = assert_ok!(fetcher.fetch(&format!("{}/broken", server.uri())).await);

    assert_eq!(missing, "not found here");
    assert_eq!(broken, "internal oops");
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    let fetcher = HttpFetcher::new().unwrap();

    let err = assert_err!(fetcher.fetch(&refused_url()).await);

    assert!(matches!(err, FetchError::Request(_)), "got {:?}", err);
    assert!(err.to_string().starts_with("GET request failed: "));
}

#[tokio::test]
async fn test_unusable_url_is_request_error() {
    let fetcher = HttpFetcher::new().unwrap();

    let err = assert_err!(fetcher.fetch("not a url").await);

    assert!(matches!(err, FetchError::Request(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_connection_dropped_mid_body_is_body_error() {
    let fetcher = HttpFetcher::new().unwrap();

    let err = assert_err!(fetcher.fetch(&truncated_body_url().await).await);

    assert!(matches!(err, FetchError::Body(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_truncated_body_fails_only_its_own_slot() {
    let server = MockServer::start().await;
    mount_body(&server, "/a", 200, "alpha").await;
    mount_body(&server, "/b", 200, "beta").await;

    let parallel = ParallelFetcher::new(Arc::new(HttpFetcher::new().unwrap()));
    let urls = vec![
        format!("{}/a", server.uri()),
        truncated_body_url().await,
        format!("{}/b", server.uri()),
    ];

    let outcomes = parallel.fetch_all(urls).await;

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0], FetchOutcome::Success("alpha".into()));
    assert!(outcomes[1]
        .clone()
        .into_legacy()
        .starts_with("Erreur: failed to read response body"));
    assert_eq!(outcomes[2], FetchOutcome::Success("beta".into()));
}

#[tokio::test]
async fn test_invalid_utf8_is_replaced_not_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'o', b'k', 0xff]))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new().unwrap();
    let body = assert_ok!(fetcher.fetch(&format!("{}/bytes", server.uri())).await);

    assert_eq!(body, "ok\u{fffd}");
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", "multifetch-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("seen"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::with_user_agent("multifetch-test/1.0").unwrap();
    let body = assert_ok!(fetcher.fetch(&format!("{}/ua", server.uri())).await);

    assert_eq!(body, "seen");
}

#[tokio::test]
async fn test_batch_mixes_successes_and_failures_in_order() {
    let server = MockServer::start().await;
    mount_body(&server, "/a", 200, "alpha").await;
    mount_body(&server, "/b", 404, "beta").await;

    let parallel = ParallelFetcher::new(Arc::new(HttpFetcher::new().unwrap()));
    let urls = vec![
        format!("{}/a", server.uri()),
        refused_url(),
        format!("{}/b", server.uri()),
    ];

    let outcomes = parallel.fetch_all(urls).await;

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0], FetchOutcome::Success("alpha".into()));
    assert!(!outcomes[1].is_success());
    assert!(outcomes[1].clone().into_legacy().starts_with("Erreur: GET request failed"));
    assert_eq!(outcomes[2], FetchOutcome::Success("beta".into()));
}

#[tokio::test]
async fn test_all_failing_batch_keeps_every_slot() {
    let parallel = ParallelFetcher::new(Arc::new(HttpFetcher::new().unwrap()));
    let urls = vec![refused_url(), "not a url".to_string(), refused_url()];

    let outcomes = parallel.fetch_all(urls).await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| !o.is_success()));
}

#[tokio::test]
async fn test_duplicate_urls_hit_the_server_once_each() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dup"))
        .respond_with(ResponseTemplate::new(200).set_body_string("same"))
        .expect(3)
        .mount(&server)
        .await;

    let parallel = ParallelFetcher::new(Arc::new(HttpFetcher::new().unwrap()));
    let url = format!("{}/dup", server.uri());

    let outcomes = parallel.fetch_all(vec![url.clone(), url.clone(), url]).await;

    assert_eq!(outcomes, vec![FetchOutcome::Success("same".into()); 3]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_slow_urls_are_fetched_in_parallel() {
    let server = MockServer::start().await;
    let delay = Duration::from_millis(400);
    for i in 0..5 {
        Mock::given(method("GET"))
            .and(path(format!("/slow/{}", i)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("slow {}", i))
                    .set_delay(delay),
            )
            .mount(&server)
            .await;
    }

    let parallel = ParallelFetcher::new(Arc::new(HttpFetcher::new().unwrap()));
    let urls: Vec<String> = (0..5).map(|i| format!("{}/slow/{}", server.uri(), i)).collect();

    let started = Instant::now();
    let outcomes = parallel.fetch_all(urls).await;
    let elapsed = started.elapsed();

    let expected: Vec<FetchOutcome> = (0..5)
        .map(|i| FetchOutcome::Success(format!("slow {}", i)))
        .collect();
    assert_eq!(outcomes, expected);
    assert!(elapsed >= delay);
    // Sequential would take 5 x 400ms
    assert!(elapsed < Duration::from_millis(1500), "took {:?}", elapsed);
}
