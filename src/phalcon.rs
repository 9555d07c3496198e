use anyhow::{Context, Result};
use log::{debug, warn};

use crate::{config::EventsRequest, models::RawResponse};

pub struct PhalconClient {
    client: reqwest::Client,
    api_url: String,
}

impl PhalconClient {
    pub fn new(api_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self::with_client(client, api_url))
    }

    pub fn with_client(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
        }
    }

    /// Posts one page request. `Ok(None)` means the endpoint answered with an
    /// empty body.
    pub async fn fetch_events(&self, request: &EventsRequest) -> Result<Option<RawResponse>> {
        debug!("POST {} {:?}", self.api_url, request);

        let response = self
            .client
            .post(&self.api_url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.api_url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response from {}", self.api_url))?;
        if !status.is_success() {
            anyhow::bail!("{} returned {}: {}", self.api_url, status, body);
        }

        if body.trim().is_empty() {
            warn!("Empty response received from {}", self.api_url);
            return Ok(None);
        }

        let parsed = serde_json::from_str(&body)
            .with_context(|| format!("invalid JSON from {}", self.api_url))?;
        Ok(Some(parsed))
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Client for talking to [`serve_once`] without going through any
    /// proxy configured in the environment.
    pub fn local_client(url: &str) -> super::PhalconClient {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        super::PhalconClient::with_client(client, url)
    }

    /// Answers a single HTTP request with `status` and `body`, and hands back
    /// the request body it received.
    pub async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/v1/attack/events", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request_body = read_request_body(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request_body
        });

        (url, handle)
    }

    async fn read_request_body(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    return String::from_utf8_lossy(&buf[end + 4..end + 4 + content_length]).into_owned();
                }
            }
        }
        String::new()
    }
}
