//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use renegade_chain::config::{ClientConfig, TransportConfig};

/// Answer to one JSON-RPC call: a result or an `(code, message)` error.
pub type RpcReply = Result<Value, (i64, String)>;

/// Start a mock JSON-RPC node on an ephemeral port.
///
/// `handler` receives the method name and params of every call.
pub async fn start_mock_node<F>(handler: F) -> SocketAddr
where
    F: Fn(&str, &Value) -> RpcReply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let _ = serve(socket, handler.as_ref()).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a node that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_stalled_node() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        // Keep sockets open so clients wait instead of seeing a reset
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

async fn serve<F>(mut socket: TcpStream, handler: &F) -> std::io::Result<()>
where
    F: Fn(&str, &Value) -> RpcReply,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    // Read headers
    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let request: Value = serde_json::from_slice(&buf[header_end..]).unwrap_or(Value::Null);
    let response = match request {
        Value::Array(calls) => Value::Array(calls.iter().map(|c| respond(c, handler)).collect()),
        call => respond(&call, handler),
    };

    let body = response.to_string();
    let http = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    socket.write_all(http.as_bytes()).await?;
    socket.shutdown().await
}

fn respond<F>(call: &Value, handler: &F) -> Value
where
    F: Fn(&str, &Value) -> RpcReply,
{
    let id = call["id"].clone();
    let method = call["method"].as_str().unwrap_or_default();
    match handler(method, &call["params"]) {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        }),
    }
}

/// Hex quantity as returned by Ethereum nodes.
#[allow(dead_code)]
pub fn quantity(value: u64) -> Value {
    Value::String(format!("{:#x}", value))
}

/// Transport pointed at `addr` with retries disabled.
pub fn transport_for(addr: SocketAddr) -> TransportConfig {
    TransportConfig {
        url: Some(format!("http://{}", addr)),
        retry_count: 0,
        timeout_ms: 2_000,
        ..TransportConfig::default()
    }
}

/// Client settings with a short polling interval.
#[allow(dead_code)]
pub fn fast_polling() -> ClientConfig {
    ClientConfig {
        polling_interval_ms: 20,
        cache_time_ms: None,
    }
}
