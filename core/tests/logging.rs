use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use aniting_core::{CatalogClient, ShowcaseViewModel};
use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Counts error events raised from this crate.
#[derive(Clone, Default)]
struct ErrorCount(Arc<AtomicUsize>);

impl ErrorCount {
    fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCount {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() == Level::ERROR && meta.target().starts_with("aniting_core") {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

async fn empty_catalog_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length").then(|| v.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        let body = r#"{"data":{"hero":null,"trending":{"media":[]}}}"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
    });
    url
}

#[tokio::test]
async fn unreachable_endpoint_logs_one_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);

    let errors = ErrorCount::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(errors.clone()));

    let vm = CatalogClient::new(url).fetch_catalog().await;
    assert_eq!(vm, ShowcaseViewModel::default());
    assert_eq!(errors.get(), 1);
}

#[tokio::test]
async fn successful_fetch_logs_no_error() {
    let url = empty_catalog_server().await;

    let errors = ErrorCount::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(errors.clone()));

    let vm = CatalogClient::new(url).fetch_catalog().await;
    assert_eq!(vm, ShowcaseViewModel::default());
    assert_eq!(errors.get(), 0);
}
