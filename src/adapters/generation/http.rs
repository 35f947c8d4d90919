//! Shared plumbing for the HTTP generation adapters.

use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::GenerationError;

pub(crate) fn build_client(timeout: Duration) -> Result<Client, GenerationError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GenerationError::unavailable(format!("failed to build HTTP client: {}", e)))
}

/// Maps a failed send (no response at all) to a transport error.
pub(crate) fn map_send_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() {
        GenerationError::transport(format!("request timed out: {}", err), None)
    } else if err.is_connect() {
        GenerationError::transport(format!("connection failed: {}", err), None)
    } else {
        GenerationError::transport(err.to_string(), err.status().map(|s| s.as_u16()))
    }
}

/// Passes successful responses through and maps everything else.
///
/// 401 and 403 mean the configured credential is unusable, which is the same
/// as having none.
pub(crate) async fn check_status(response: Response) -> Result<Response, GenerationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match status.as_u16() {
        401 | 403 => Err(GenerationError::unavailable(format!(
            "credential rejected ({}): {}",
            status, body
        ))),
        code => Err(GenerationError::transport(
            format!("unexpected status {}: {}", status, body),
            Some(code),
        )),
    }
}

/// Returns the trimmed text, or `Format` when it is missing or blank.
pub(crate) fn require_text(text: Option<String>, backend: &str) -> Result<String, GenerationError> {
    match text.map(|t| t.trim().to_string()) {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(GenerationError::format(format!(
            "{} response contained no text",
            backend
        ))),
    }
}

/// Largest backoff exponent; later retries all wait 64s.
const MAX_BACKOFF_EXPONENT: u32 = 6;

/// Delay before retry number `retry_count + 1`.
pub(crate) fn backoff_delay(retry_count: u32) -> Duration {
    Duration::from_secs(1u64 << retry_count.min(MAX_BACKOFF_EXPONENT))
}

/// Runs `attempt` until it succeeds, fails permanently, or retries run out.
///
/// Backoff doubles from one second (1s, 2s, 4s) and stops growing at 64s.
pub(crate) async fn with_retries<F, Fut>(
    backend: &str,
    max_retries: u32,
    mut attempt: F,
) -> Result<String, GenerationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, GenerationError>>,
{
    let mut retry_count = 0;
    loop {
        match attempt().await {
            Ok(text) => return Ok(text),
            Err(err) if err.is_retryable() && retry_count < max_retries => {
                let delay = backoff_delay(retry_count);
                tracing::debug!(
                    backend,
                    retry = retry_count + 1,
                    delay_secs = delay.as_secs(),
                    error = %err,
                    "Retrying generation request"
                );
                sleep(delay).await;
                retry_count += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    //! Minimal HTTP/1.1 server that answers each connection with the next
    //! canned response and records the raw request.

    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    pub struct CannedServer {
        pub base_url: String,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl CannedServer {
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    pub async fn serve(responses: Vec<(u16, &str)>) -> CannedServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                let raw = read_request(&mut socket).await;
                recorded.lock().unwrap().push(raw);

                let reply = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        CannedServer {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}
