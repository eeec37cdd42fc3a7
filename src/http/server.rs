//! Local simulation server.
//!
//! # Responsibilities
//! - Create the Axum router and bind it to a listener
//! - Apply the request-side hook (redirect or index rewrite) per request
//! - Apply the response-side hook and attach the merged headers
//!
//! # Design Decisions
//! - This is a harness for exercising the resolver end to end, not an
//!   origin: it answers 200 with the effective fetch path as the body
//! - Merged names/values that are not valid HTTP header tokens are skipped
//!   with a log line rather than failing the response

use axum::{
    body::Body,
    extract::State,
    http::{self, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::event::{EdgeRequest, EdgeResponse, HeaderValue, RedirectResponse, RequestOutcome};
use crate::resolve::Resolver;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}

/// Build the Axum router with the catch-all edge handler.
pub fn build_router(resolver: Arc<Resolver>) -> Router {
    Router::new()
        .route("/{*path}", any(edge_handler))
        .route("/", any(edge_handler))
        .with_state(AppState { resolver })
        .layer(TraceLayer::new_for_http())
}

/// HTTP server wrapping the resolver for local runs.
pub struct HarnessServer {
    router: Router,
}

impl HarnessServer {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self {
            router: build_router(resolver),
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "simulation server starting");
        axum::serve(listener, self.router).await
    }
}

async fn edge_handler(State(state): State<AppState>, req: Request<Body>) -> Response {
    let request = EdgeRequest::new(req.uri().path());

    let forwarded = match state.resolver.viewer_request(request).await {
        RequestOutcome::Redirect(redirect) => return render_redirect(&redirect),
        RequestOutcome::Forward(forwarded) => forwarded,
    };

    let resolved = state
        .resolver
        .viewer_response(&forwarded, EdgeResponse::default())
        .await;

    let mut builder = Response::builder().status(StatusCode::OK);
    if let Some(headers) = builder.headers_mut() {
        attach_headers(headers, &resolved.headers);
    }

    builder
        .body(Body::from(forwarded.uri))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn render_redirect(redirect: &RedirectResponse) -> Response {
    let mut builder = Response::builder()
        .status(StatusCode::from_u16(redirect.status_code).unwrap_or(StatusCode::MOVED_PERMANENTLY));
    if let Some(headers) = builder.headers_mut() {
        attach_headers(headers, &redirect.headers);
    }
    builder
        .body(Body::empty())
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn attach_headers(
    headers: &mut http::HeaderMap,
    merged: &std::collections::BTreeMap<String, HeaderValue>,
) {
    for (name, value) in merged {
        let Ok(name) = http::HeaderName::try_from(name.as_str()) else {
            tracing::debug!(header = %name, "skipping invalid header name");
            continue;
        };
        let Ok(value) = http::HeaderValue::try_from(value.value.as_str()) else {
            tracing::debug!(header = %name, "skipping invalid header value");
            continue;
        };
        headers.insert(name, value);
    }
}
