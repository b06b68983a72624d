//! HTTP fetch for networked streams
//!
//! Plain `GET` with no custom headers; the body must be JSON.

use serde_json::Value;

use super::error::CycleError;

/// Shared HTTP client used by every stream's cycle
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Wrap an existing client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch `endpoint` and decode its JSON body
    pub async fn fetch_json(&self, endpoint: &str) -> Result<Value, CycleError> {
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|source| CycleError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CycleError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| CycleError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| CycleError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    //! Minimal HTTP responder for exercising networked streams

    use std::net::SocketAddr;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Client that never routes through a proxy
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    /// Serve the same response to every request until the runtime shuts down
    pub async fn serve(status: u16, body: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let _ = socket.read(&mut buf).await;
                    let response = format!(
                        "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_json() {
        let addr = test_server::serve(200, r#"{"states":[]}"#).await;
        let fetcher = Fetcher::new(test_server::client());

        let value = fetcher.fetch_json(&format!("http://{}/", addr)).await.unwrap();
        assert_eq!(value, serde_json::json!({"states": []}));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let addr = test_server::serve(500, r#"{"error":"boom"}"#).await;
        let fetcher = Fetcher::new(test_server::client());

        let err = fetcher.fetch_json(&format!("http://{}/", addr)).await.unwrap_err();
        assert!(matches!(err, CycleError::Status { status: 500, .. }));
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let addr = test_server::serve(200, "not json").await;
        let fetcher = Fetcher::new(test_server::client());

        let err = fetcher.fetch_json(&format!("http://{}/", addr)).await.unwrap_err();
        assert!(matches!(err, CycleError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = Fetcher::new(test_server::client());
        let err = fetcher.fetch_json(&format!("http://{}/", addr)).await.unwrap_err();
        assert!(matches!(err, CycleError::Request { .. }));
    }
}
