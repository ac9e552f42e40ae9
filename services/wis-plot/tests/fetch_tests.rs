//! HTTP retrieval against a local one-shot server.

mod common;

use common::{serve_once, serve_raw};
use wis_netcdf::{NetCdfError, WaveVariables};
use wis_plot::fetch::{FetchConfig, HttpFetcher};
use wis_plot::{FetchError, HttpSource, LoadError, WaveSource};

#[tokio::test]
async fn test_fetch_returns_body() {
    let body = b"CDF\x01 station bytes".to_vec();
    let base = serve_once("200 OK", body.clone()).await;

    let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
    let bytes = fetcher.fetch(&format!("{}/ST44098_200801.nc", base)).await.unwrap();

    assert_eq!(bytes.as_ref(), body.as_slice());
}

#[tokio::test]
async fn test_fetch_not_found_is_unreachable() {
    let base = serve_once("404 Not Found", b"missing".to_vec()).await;
    let url = format!("{}/ST44098_209901.nc", base);

    let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
    let err = fetcher.fetch(&url).await.unwrap_err();

    match err {
        FetchError::ResourceUnreachable { url: failed, reason } => {
            assert_eq!(failed, url);
            assert!(reason.contains("404"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_oversized_content_length_is_unreachable() {
    let head = "HTTP/1.1 200 OK\r\nContent-Length: 4611686018427387904\r\nConnection: close\r\n\r\n";
    let base = serve_raw(head.to_string(), b"CDF".to_vec()).await;

    let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
    let err = fetcher
        .fetch(&format!("{}/ST44098_200801.nc", base))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::ResourceUnreachable { .. }));
}

#[tokio::test]
async fn test_fetch_refused_connection_is_unreachable() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
    let err = fetcher
        .fetch(&format!("http://{}/ST44098_200801.nc", addr))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::ResourceUnreachable { .. }));
}

#[tokio::test]
async fn test_http_source_rejects_non_netcdf_body() {
    let base = serve_once("200 OK", b"<html>maintenance</html>".to_vec()).await;

    let source = HttpSource::new(&FetchConfig::default()).unwrap();
    let err = source
        .open(&format!("{}/ST44098_200801.nc", base), &WaveVariables::default())
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::NetCdf(NetCdfError::InvalidFormat(_))));
    assert!(!err.is_unreachable());
}
