//! JSON HTTP API over `tiny_http`.
//!
//! `tiny_http` is blocking, so one blocking thread accepts connections and
//! hands each request to its own tokio task. Requests for different sessions
//! run concurrently; writes to the same session are serialized by the store's
//! revision check and surface as 409.

mod api;
mod routes;

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::service::ConsultationService;

/// Largest request body read, in bytes.
const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Error)]
enum BodyError {
    #[error("request body exceeds {MAX_BODY_BYTES} bytes")]
    TooLarge,

    #[error("unreadable body: {0}")]
    Unreadable(String),
}

impl BodyError {
    const fn status(&self) -> u16 {
        match self {
            Self::TooLarge => 413,
            Self::Unreadable(_) => 400,
        }
    }
}

/// Serve until Ctrl-C.
pub async fn serve(service: Arc<ConsultationService>, bind: &str) -> anyhow::Result<()> {
    let server = Arc::new(
        tiny_http::Server::http(bind)
            .map_err(|error| anyhow::anyhow!("failed to listen on {bind}: {error}"))?,
    );
    tracing::info!(%bind, "HTTP API listening");
    eprintln!("vnt: listening on http://{bind}");

    let (tx, mut rx) = mpsc::channel::<tiny_http::Request>(64);
    let acceptor = Arc::clone(&server);
    let accept = tokio::task::spawn_blocking(move || {
        for request in acceptor.incoming_requests() {
            if tx.blocking_send(request).is_err() {
                break;
            }
        }
    });

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            request = rx.recv() => {
                let Some(request) = request else { break };
                tokio::spawn(handle_request(Arc::clone(&service), request));
            }
            result = &mut shutdown => {
                if let Err(error) = result {
                    tracing::warn!(%error, "failed to listen for Ctrl-C; stopping");
                }
                tracing::info!("shutting down HTTP API");
                server.unblock();
                break;
            }
        }
    }

    drop(rx);
    accept.await.context("HTTP acceptor thread failed")?;
    Ok(())
}

async fn handle_request(service: Arc<ConsultationService>, request: tiny_http::Request) {
    let read = tokio::task::spawn_blocking(move || {
        let mut request = request;
        let declared = request.body_length();
        let body = read_body(request.as_reader(), declared);
        (request, body)
    })
    .await;
    let Ok((request, body)) = read else {
        tracing::error!("request reader task failed");
        return;
    };

    let method = request.method().to_string();
    let url = request.url().to_string();
    let reply = match body {
        Ok(body) => api::handle(&service, &method, &url, &body).await,
        Err(error) => api::Reply {
            status: error.status(),
            body: serde_json::json!({ "error": error.to_string() }),
        },
    };
    tracing::debug!(%method, %url, status = reply.status, "request handled");

    let mut response =
        tiny_http::Response::from_string(reply.body.to_string()).with_status_code(reply.status);
    if let Ok(header) = tiny_http::Header::from_bytes("Content-Type", "application/json") {
        response = response.with_header(header);
    }

    match tokio::task::spawn_blocking(move || request.respond(response)).await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => tracing::warn!(%method, %url, %error, "failed to write response"),
        Err(error) => tracing::error!(%error, "response writer task failed"),
    }
}

/// Read at most `MAX_BODY_BYTES`. A declared or actual overflow is
/// `TooLarge`, never a truncated body.
fn read_body(reader: impl Read, declared: Option<usize>) -> Result<String, BodyError> {
    if declared.is_some_and(|len| len > MAX_BODY_BYTES) {
        return Err(BodyError::TooLarge);
    }
    let mut bytes = Vec::new();
    reader
        .take(MAX_BODY_BYTES as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(|error| BodyError::Unreadable(error.to_string()))?;
    if bytes.len() > MAX_BODY_BYTES {
        return Err(BodyError::TooLarge);
    }
    String::from_utf8(bytes).map_err(|error| BodyError::Unreadable(error.to_string()))
}
