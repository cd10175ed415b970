use std::time::Duration;

/// Client with the given user agent and timeout. A builder failure falls back
/// to reqwest's default client and is logged, since that drops both settings.
pub fn build_client(user_agent: &str, timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("HTTP client config rejected ({e}), using defaults without timeout");
            reqwest::Client::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_settings_build() {
        let _client = build_client("DeltaGhost/0.1", Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_user_agent_falls_back() {
        // Newlines are not legal in a header value; the builder errors.
        let _client = build_client("bad\nagent", Duration::from_secs(2));
    }
}

/// Local HTTP server answering each request with a canned status and body.
#[cfg(test)]
pub(crate) mod canned {
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    pub(crate) struct CannedServer {
        pub base_url: String,
        /// Raw request heads, in arrival order.
        pub requests: Arc<Mutex<Vec<String>>>,
    }

    impl CannedServer {
        /// `respond` gets the server's base URL and the raw request head.
        pub(crate) async fn start<F>(respond: F) -> Self
        where
            F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
        {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let base_url = format!("http://{}", listener.local_addr().unwrap());
            let requests = Arc::new(Mutex::new(Vec::new()));

            let seen = requests.clone();
            let base = base_url.clone();
            tokio::spawn(async move {
                while let Ok((mut stream, _)) = listener.accept().await {
                    let mut head = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut chunk).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => head.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let request = String::from_utf8_lossy(&head).to_string();
                    let (status, body) = respond(&base, &request);
                    seen.lock().unwrap().push(request);

                    let reply = format!(
                        "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(reply.as_bytes()).await;
                    let _ = stream.shutdown().await;
                }
            });

            Self { base_url, requests }
        }

        pub(crate) fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }
}
