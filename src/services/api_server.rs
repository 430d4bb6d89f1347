// src/services/api_server.rs
//! API Server for the DID wizard
//!
//! This module exposes the wizard's three steps over HTTP so that a browser
//! front-end can drive them:
//! - Wallet connection (real address or generated demo address)
//! - DID Document creation
//! - Viewing a document from raw JSON, with validation at the boundary
//!
//! The server holds no per-user state. The front-end keeps track of which
//! step the user is on and passes the controller address back on creation.

use axum::{
    body::Bytes,
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::ApiError;
use crate::models::did::DidDocument;
use crate::services::did_viewer::{DidViewer, DocumentView};
use crate::services::document_builder::{DocumentBuilder, DocumentOptions};
use crate::utils::clock::SharedClock;
use crate::wallet::connector::WalletConnector;

// API request and response structures

/// Request payload for connecting a wallet. No address means "demo wallet".
#[derive(Serialize, Deserialize, Default)]
struct ConnectWalletRequest {
    #[serde(default)]
    address: Option<String>,
}

/// Response describing the connected account
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectWalletResponse {
    address: String,
    short_address: String,
    demo: bool,
}

/// Request payload for creating a DID Document
#[derive(Serialize, Deserialize)]
struct CreateDidRequest {
    #[serde(default)]
    controller: String,
    #[serde(flatten)]
    options: DocumentOptions,
}

#[derive(Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// API server state containing the shared document builder
#[derive(Clone)]
pub struct ApiServer {
    /// Builder used for every creation request
    builder: Arc<DocumentBuilder<SharedClock>>,
}

impl ApiServer {
    /// Creates a new instance of the API server
    ///
    /// # Arguments
    /// * `builder` - Document builder configured with the server's DID method,
    ///   default endpoint and proof policy
    pub fn new(builder: DocumentBuilder<SharedClock>) -> Self {
        ApiServer {
            builder: Arc::new(builder),
        }
    }

    /// Configures all API routes
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .route("/connect-wallet", post(Self::connect_wallet_handler))
            .route("/create-did", post(Self::create_did_handler))
            .route("/view-did", post(Self::view_did_handler))
            .layer(CorsLayer::permissive())
            .with_state(Arc::new(self.clone()))
    }

    /// Starts the API server and begins listening for requests
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to (e.g., "127.0.0.1:3000")
    ///
    /// # Errors
    /// Fails if the address cannot be bound or the server stops with an I/O error.
    pub async fn run(&self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("API server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router()).await
    }

    /// Liveness check
    ///
    /// # Endpoint
    /// GET /health
    async fn health_handler() -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok".into(),
        })
    }

    /// Connects a wallet account
    ///
    /// # Endpoint
    /// POST /connect-wallet
    ///
    /// # Request Body
    /// `{"address": "0x..."}` for a real wallet, or `{}` for a demo address
    ///
    /// # Responses
    /// - 200 OK: Returns the address (checksum case kept) and its short form
    /// - 400 Bad Request: Address is not 20 hex-encoded bytes
    async fn connect_wallet_handler(
        Json(payload): Json<ConnectWalletRequest>,
    ) -> Result<Json<ConnectWalletResponse>, ApiError> {
        let account = match payload.address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => WalletConnector::connect(address)?,
            _ => WalletConnector::connect_demo(&mut rand::thread_rng()),
        };

        Ok(Json(ConnectWalletResponse {
            short_address: account.short_address(),
            address: account.address,
            demo: account.demo,
        }))
    }

    /// Creates a new DID Document
    ///
    /// # Endpoint
    /// POST /create-did
    ///
    /// # Request Body
    /// `{"controller": "0x...", "name"?, "description"?, "serviceEndpoint"?}`
    ///
    /// # Responses
    /// - 200 OK: Returns the DID Document
    /// - 400 Bad Request: `EmptyController` or `InvalidServiceEndpoint`
    async fn create_did_handler(
        State(state): State<Arc<ApiServer>>,
        Json(payload): Json<CreateDidRequest>,
    ) -> Result<Json<DidDocument>, ApiError> {
        let document = state.builder.build(&payload.controller, &payload.options)?;
        log::info!("Created {}", document.id);

        Ok(Json(document))
    }

    /// Validates and prepares a DID Document for display
    ///
    /// # Endpoint
    /// POST /view-did
    ///
    /// # Request Body
    /// Raw DID Document JSON. Bytes that are not UTF-8 are a `ParseError`.
    ///
    /// # Responses
    /// - 200 OK: Returns the document view
    /// - 400 Bad Request: `ParseError` or a validation kind
    async fn view_did_handler(body: Bytes) -> Result<Json<DocumentView>, ApiError> {
        Ok(Json(DidViewer::open(&body)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::clock::FixedClock;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let clock: SharedClock =
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
        ApiServer::new(DocumentBuilder::with_clock(clock)).router()
    }

    fn post(app: Router, path: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        let body = body.into();
        tokio_test::block_on(async move {
            let request = Request::builder()
                .method(Method::POST)
                .uri(path)
                .header("content-type", "application/json")
                .body(body)
                .unwrap();
            let response = app.oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

            (status, serde_json::from_slice(&bytes).unwrap())
        })
    }

    #[test]
    fn test_health() {
        let response = tokio_test::block_on(async {
            app()
                .oneshot(Request::get("/health").body(Body::empty()).unwrap())
                .await
                .unwrap()
        });
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_connect_demo_wallet() {
        let (status, body) = post(app(), "/connect-wallet", "{}");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["demo"], true);
        assert_eq!(body["address"].as_str().unwrap().len(), 42);
    }

    #[test]
    fn test_connect_invalid_address() {
        let (status, body) = post(
            app(),
            "/connect-wallet",
            json!({ "address": "0x1234" }).to_string(),
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "InvalidAddress");
        assert_eq!(body["field"], "address");
    }

    #[test]
    fn test_create_did() {
        let (status, body) = post(
            app(),
            "/create-did",
            json!({
                "controller": "abc",
                "name": "Alice",
                "serviceEndpoint": "https://example.com"
            })
            .to_string(),
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "did:eth:abc");
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["service"][0]["serviceEndpoint"], "https://example.com");
        assert_eq!(body["created"], body["updated"]);
        assert!(body.get("proof").is_none());
    }

    #[test]
    fn test_create_did_errors() {
        let (status, body) = post(app(), "/create-did", json!({}).to_string());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "EmptyController");

        let (status, body) = post(
            app(),
            "/create-did",
            json!({ "controller": "abc", "serviceEndpoint": "not-a-url" }).to_string(),
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "InvalidServiceEndpoint");
        assert_eq!(body["field"], "serviceEndpoint");
    }

    #[test]
    fn test_create_then_view() {
        let (_, document) = post(
            app(),
            "/create-did",
            json!({ "controller": "0x52908400098527886e0f7030069857d2e4169ee7" }).to_string(),
        );

        let (status, body) = post(app(), "/view-did", document.to_string());
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"], document);
        assert_eq!(body["downloadFileName"], "did-e4169ee7.json");
    }

    #[test]
    fn test_view_non_utf8_body_is_parse_error() {
        let (status, body) = post(app(), "/view-did", vec![b'{', 0xff, 0xfe]);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "ParseError");
        assert!(body["message"].as_str().is_some());
    }

    #[test]
    fn test_view_rejects_bad_input() {
        let (status, body) = post(app(), "/view-did", "{ not json");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "ParseError");

        let (status, body) = post(
            app(),
            "/view-did",
            json!({
                "id": "did:eth:abc",
                "controller": "abc",
                "created": "2024-05-01T12:00:00Z",
                "updated": "2024-05-01T12:00:00Z"
            })
            .to_string(),
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "MissingVerificationMethod");
    }
}
