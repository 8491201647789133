//! Test helpers for pipeline integration tests

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread::JoinHandle;

use weather_etl::{ApiKey, Settings};

pub const API_KEY: &str = "0123456789abcdef0123456789abcdef";

pub const SAMPLE_RESPONSE: &str = r#"{"name":"Test City","dt":1609459200,"weather":[{"description":"clear sky"}],"main":{"temp":20.0,"humidity":50,"pressure":1012},"clouds":{"all":1},"wind":{"speed":5.0}}"#;

pub const SAMPLE_RECORD: &str = "Test City;1609459200;clear sky;20.0;1;50;5.0;1012\n";

/// A local HTTP endpoint that answers exactly one request with a canned response.
pub struct OneShotServer {
    url: String,
    handle: Option<JoinHandle<String>>,
}

impl OneShotServer {
    pub fn start(status: u16, reason: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let url = format!("http://{}/data/2.5/weather", listener.local_addr().unwrap());

        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept connection");
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            // Drain headers; GET requests carry no body
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }

            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request_line
        });

        Self {
            url,
            handle: Some(handle),
        }
    }

    pub fn ok(body: &str) -> Self {
        Self::start(200, "OK", body)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Wait for the request to be served and return its request line.
    pub fn request_line(mut self) -> String {
        self.handle
            .take()
            .expect("request already collected")
            .join()
            .expect("server thread panicked")
    }
}

pub fn settings(dir: &Path, api_url: &str) -> Settings {
    Settings::builder(ApiKey::new(API_KEY).unwrap())
        .coordinates(37.7749, -122.4194)
        .raw_path(dir.join("data").join("raw").join("raw.json"))
        .processed_path(dir.join("data").join("processed").join("processed.csv"))
        .sink_path(dir.join("data").join("data.csv"))
        .api_url(api_url)
        .request_timeout_secs(10)
        .build()
        .unwrap()
}

pub fn backups_in(dir: &Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "bak"))
        .collect()
}
