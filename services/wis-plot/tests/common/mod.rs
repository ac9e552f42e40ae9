//! Common test utilities for wis-plot tests
//!
//! Provides helpers for:
//! - An in-memory `WaveSource` keyed by locator
//! - Synthetic monthly datasets
//! - A one-shot local HTTP server

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use test_utils::wave_columns;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wis_common::{LocatorBuilder, StationConfig, WaveDataset, YearMonth};
use wis_netcdf::WaveVariables;
use wis_plot::{FetchError, LoadResult, WaveSource};

/// Base URL used for in-memory locators.
pub const MEMORY_BASE: &str = "mem://wis";

/// Hourly synthetic dataset of `hours` samples from `start_unix`.
pub fn month_dataset(start_unix: i64, hours: usize) -> WaveDataset {
    let cols = wave_columns(start_unix, hours);
    let times = cols
        .time
        .iter()
        .map(|t| Utc.timestamp_opt(*t, 0).unwrap())
        .collect();
    WaveDataset::new(times, cols.height, cols.period, cols.direction).unwrap()
}

/// Locator the pipeline will build for `month` at the default station.
pub fn memory_locator(year: i32, month: u32) -> String {
    LocatorBuilder::new(MEMORY_BASE).locator(
        &StationConfig::default(),
        YearMonth::new(year, month).unwrap(),
    )
}

/// Serves prepared datasets and records every locator it was asked for.
#[derive(Default)]
pub struct MemorySource {
    datasets: HashMap<String, WaveDataset>,
    opened: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn with(mut self, locator: String, dataset: WaveDataset) -> Self {
        self.datasets.insert(locator, dataset);
        self
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl WaveSource for MemorySource {
    async fn open(&self, locator: &str, variables: &WaveVariables) -> LoadResult<WaveDataset> {
        self.opened.lock().unwrap().push(locator.to_string());
        match self.datasets.get(locator) {
            Some(ds) => Ok(ds
                .clone()
                .with_direction_variable(variables.direction.as_str())
                .with_source(locator)),
            None => Err(FetchError::ResourceUnreachable {
                url: locator.to_string(),
                reason: "HTTP error: 404 Not Found".to_string(),
            }
            .into()),
        }
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Serve a single HTTP response on a local port; returns the base URL.
pub async fn serve_once(status_line: &'static str, body: Vec<u8>) -> String {
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status_line,
        body.len()
    );
    serve_raw(head, body).await
}

/// Serve `head` verbatim followed by `body`, then close the connection.
pub async fn serve_raw(head: String, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Read until the end of the request headers
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        socket.write_all(head.as_bytes()).await.ok();
        socket.write_all(&body).await.ok();
        socket.shutdown().await.ok();
    });

    format!("http://{}", addr)
}
