//! # REST API HTTP Server
//!
//! Axum router for the collection endpoints and the listener that runs it.

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::errors::{RestError, RestResult};
use super::handler::{RegistryHandler, RestHandler};
use super::parser::ListParams;
use super::response::ListResponse;
use crate::config::ServerConfig;
use crate::storage::{MemoryStore, StoreError};

/// REST API server state
pub struct RestServer<H: RestHandler> {
    handler: Arc<H>,
}

impl<H: RestHandler + 'static> RestServer<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let state = Arc::new(self);

        Router::new()
            .route(
                "/v1/:collection",
                get(list_handler::<H>).post(insert_handler::<H>),
            )
            .route(
                "/v1/:collection/:id",
                get(get_handler::<H>)
                    .patch(patch_handler::<H>)
                    .delete(delete_handler::<H>),
            )
            .with_state(state)
    }
}

/// Shared state type
type ServerState<H> = Arc<RestServer<H>>;

/// List objects handler
async fn list_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
    Path(collection): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<(HeaderMap, Json<ListResponse<Value>>)> {
    let params = ListParams::parse(&query);
    let outcome = server.handler.list(&collection, &params)?;

    let mut headers = HeaderMap::new();
    if let Some(link) = outcome.link {
        let value = HeaderValue::from_str(&link)
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        headers.insert(header::LINK, value);
    }

    Ok((headers, Json(outcome.body)))
}

/// Get single object handler
async fn get_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
    Path((collection, id)): Path<(String, String)>,
) -> RestResult<Json<Value>> {
    Ok(Json(server.handler.get(&collection, &id)?))
}

/// Insert object handler
async fn insert_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
    Path(collection): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<(StatusCode, Json<Value>)> {
    let Json(body) = body.map_err(|e| RestError::InvalidBody(e.body_text()))?;
    let stored = server.handler.insert(&collection, body)?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Patch object handler
async fn patch_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
    Path((collection, id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<Json<Value>> {
    let Json(body) = body.map_err(|e| RestError::InvalidBody(e.body_text()))?;
    Ok(Json(server.handler.patch(&collection, &id, body)?))
}

/// Delete object handler
async fn delete_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
    Path((collection, id)): Path<(String, String)>,
) -> RestResult<Json<Value>> {
    server.handler.delete(&collection, &id)?;
    Ok(Json(json!({})))
}

/// CORS policy: a single configured origin, or permissive when none is set
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match config.allowed_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(AllowOrigin::exact(origin)),
        Some(Err(_)) => {
            warn!("allowed_origin is not a valid header value, CORS stays permissive");
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}

/// The complete application: routes, tracing and CORS over `store`
pub fn app(config: &ServerConfig, store: Arc<MemoryStore>) -> Router {
    let handler = RegistryHandler::new(store, config.page_limits());

    RestServer::new(handler)
        .router()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}

/// Bind and serve until the process is stopped
pub async fn serve(config: ServerConfig) -> io::Result<()> {
    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let router = app(&config, Arc::new(MemoryStore::new()));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "registry listening");
    axum::serve(listener, router).await?;

    Ok(())
}
