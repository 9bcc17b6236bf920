use crate::horizons::HorizonsError;
use crate::live::{LiveError, LiveRequestHandler};
use crate::{info, warn};
use serde_json::json;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Allows an edge cache in front of the process cache to absorb repeat
/// traffic for the same minute bucket.
const CACHE_CONTROL: &str = "s-maxage=60, stale-while-revalidate=30";
/// Upper bound on the request head; anything larger is not a lookup.
const MAX_REQUEST_BYTES: usize = 8 * 1024;

/// Single-body live-position endpoint: `GET /live?body=<Name>&time=<now|ISO8601>`.
///
/// Speaks just enough HTTP/1.1 for that one resource, one connection per
/// task. Handler errors map onto 400 (validation), 502 (upstream) and
/// 500 (extraction); the acceptor loop never panics on a bad peer.
pub struct LiveEndpoint {
    handler: Arc<LiveRequestHandler>,
}

impl LiveEndpoint {
    pub fn new(handler: Arc<LiveRequestHandler>) -> Self {
        Self { handler }
    }

    /// Binds `bind_addr` and serves until the process exits.
    pub async fn serve(&self, bind_addr: &str) -> std::io::Result<()> {
        let listener = TcpListener::bind(bind_addr).await?;
        info!("Live endpoint listening on {bind_addr}");
        self.serve_on(listener).await
    }

    /// Accept loop over an already-bound listener.
    pub async fn serve_on(&self, listener: TcpListener) -> std::io::Result<()> {
        loop {
            let (socket, _) = listener.accept().await?;
            let handler = Arc::clone(&self.handler);
            tokio::spawn(async move {
                match Self::handle_connection(socket, &handler).await {
                    Err(e) if matches!(
                        e.kind(),
                        ErrorKind::UnexpectedEof
                            | ErrorKind::ConnectionReset
                            | ErrorKind::ConnectionAborted
                    ) => {}
                    Err(e) => warn!("Closing live connection due to {e:?}"),
                    Ok(()) => {}
                }
            });
        }
    }

    async fn handle_connection(
        mut socket: TcpStream,
        handler: &LiveRequestHandler,
    ) -> std::io::Result<()> {
        let head = read_request_head(&mut socket).await?;
        let (status, body) = match parse_request_line(&head) {
            Some(("GET", target)) => Self::respond(target, handler).await,
            Some(_) => (405, json!({ "error": "method not allowed" })),
            None => (400, json!({ "error": "malformed request" })),
        };
        write_response(&mut socket, status, &body).await?;
        socket.shutdown().await
    }

    async fn respond(target: &str, handler: &LiveRequestHandler) -> (u16, serde_json::Value) {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        if path != "/live" {
            return (404, json!({ "error": "not found" }));
        }
        let params = parse_query(query);
        let body = params.get("body").map_or("Earth", String::as_str);
        let time = params.get("time").map_or("now", String::as_str);

        match handler.handle(body, time).await {
            Ok(resolved) => (
                200,
                serde_json::to_value(&resolved).unwrap_or_else(|e| json!({ "error": e.to_string() })),
            ),
            Err(e) => error_response(&e),
        }
    }
}

/// Status mapping for handler failures: bad input 400, upstream 502,
/// unextractable response 500.
fn error_response(error: &LiveError) -> (u16, serde_json::Value) {
    match error {
        LiveError::UnknownBody(_) | LiveError::InvalidTime(_) => {
            (400, json!({ "error": error.to_string() }))
        }
        LiveError::Upstream(HorizonsError::Upstream { status, body }) => (
            502,
            json!({ "error": "upstream ephemeris request failed", "status": status, "body": body }),
        ),
        LiveError::Upstream(other) => (502, json!({ "error": other.to_string() })),
        LiveError::UnrecognizedShape => (500, json!({ "error": error.to_string() })),
    }
}

/// Reads until the end of the request head or the size cap.
async fn read_request_head(socket: &mut TcpStream) -> std::io::Result<String> {
    let mut head = Vec::with_capacity(512);
    let mut chunk = [0u8; 512];
    loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") || head.len() > MAX_REQUEST_BYTES {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&head).into_owned())
}

fn parse_request_line(head: &str) -> Option<(&str, &str)> {
    let mut parts = head.lines().next()?.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    Some((method, target))
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key), percent_decode(value))
        })
        .collect()
}

/// Query-string decoding, form flavor: `+` is a space, `%XX` is a byte.
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                if let Some(byte) = hex {
                    out.push(byte);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

async fn write_response(
    socket: &mut TcpStream,
    status: u16,
    body: &serde_json::Value,
) -> std::io::Result<()> {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        502 => "Bad Gateway",
        _ => "Internal Server Error",
    };
    let payload = body.to_string();
    let mut head = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        payload.len()
    );
    if status == 200 {
        head.push_str("Cache-Control: ");
        head.push_str(CACHE_CONTROL);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    socket.write_all(head.as_bytes()).await?;
    socket.write_all(payload.as_bytes()).await
}
