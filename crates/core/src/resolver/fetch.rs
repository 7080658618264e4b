use std::fs::File;
use std::io::{self, Read};
use std::time::Duration;
use url::Url;

/// Opens a byte stream for a registered URL.
pub trait RemoteFetcher: Send + Sync {
    fn open(&self, url: &Url) -> io::Result<Box<dyn Read + Send>>;
}

/// Default fetcher: `file:` URLs are read from disk, `http(s):` through a
/// blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl RemoteFetcher for HttpFetcher {
    fn open(&self, url: &Url) -> io::Result<Box<dyn Read + Send>> {
        match url.scheme() {
            "file" => {
                let path = url.to_file_path().map_err(|_| {
                    io::Error::new(io::ErrorKind::InvalidInput, format!("not a local path: {url}"))
                })?;
                Ok(Box::new(File::open(path)?))
            }
            "http" | "https" => {
                let client = reqwest::blocking::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(io::Error::other)?;
                let response = client
                    .get(url.as_str())
                    .send()
                    .and_then(|r| r.error_for_status())
                    .map_err(io::Error::other)?;
                Ok(Box::new(response))
            }
            scheme => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("unsupported URL scheme '{scheme}'"),
            )),
        }
    }
}
