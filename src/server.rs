//! HTTP server exposing the item registry.

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::model::{DeleteConfirmation, DeploymentInfo, HealthCheck, Item, NewItem, RootInfo};
use crate::registry::{ItemRegistry, ItemStore};
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

const API_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_NAME: &str = "Pipeline Demo";

type SharedStore = Arc<dyn ItemStore>;

#[derive(Clone)]
pub struct AppState {
    store: SharedStore,
    config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(store: SharedStore, config: ServiceConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the application router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(read_root))
        .route("/health", get(health_check))
        .route("/info", get(get_info))
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .layer(
            tower::ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// A running item service.
///
/// Owns a fresh [`ItemRegistry`]; the listener is served on a background task.
pub struct ItemServer {
    addr: SocketAddr,
    _handle: tokio::task::JoinHandle<()>,
}

impl ItemServer {
    /// Binds and starts serving in the background.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pipeline_demo_api::{ItemServer, ServiceConfig};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let server = ItemServer::new(ServiceConfig::local()).await?;
    /// println!("Items API at {}", server.url());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: ServiceConfig) -> Result<Self> {
        let (listener, app) = bind(config).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                warn!("Server stopped: {}", e);
            }
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// Serves in the foreground until `shutdown` resolves.
    pub async fn run<F>(config: ServiceConfig, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (listener, app) = bind(config).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Server shut down");
        Ok(())
    }

    /// Returns the socket address the server is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the base URL of the server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Returns the port number the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

async fn bind(config: ServiceConfig) -> Result<(TcpListener, Router)> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(
        "Items API listening on {} (environment: {})",
        listener.local_addr()?,
        config.environment
    );

    let app = router(AppState::new(ItemRegistry::shared(), config));
    Ok((listener, app))
}

async fn read_root() -> Json<RootInfo> {
    Json(RootInfo {
        message: format!("Welcome to {} API", APP_NAME),
        version: API_VERSION.to_string(),
        docs: "/docs".to_string(),
        health: "/health".to_string(),
    })
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: API_VERSION.to_string(),
    })
}

async fn get_info(State(state): State<AppState>) -> Json<DeploymentInfo> {
    let config = &state.config;
    Json(DeploymentInfo {
        app_name: APP_NAME.to_string(),
        environment: config.environment.clone(),
        deployment_time: config.deployment_time.clone(),
        build_number: config.build_number.clone(),
    })
}

async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>> {
    debug!("Listing items");
    Ok(Json(state.store.list().await?))
}

async fn get_item(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Item>> {
    debug!("Getting item: {}", id);
    let item = state.store.get(id).await.inspect_err(|e| warn!("{}", e))?;
    Ok(Json(item))
}

async fn create_item(
    State(state): State<AppState>,
    Json(fields): Json<NewItem>,
) -> Result<Json<Item>> {
    Ok(Json(state.store.create(fields).await?))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(fields): Json<NewItem>,
) -> Result<Json<Item>> {
    let item = state
        .store
        .update(id, fields)
        .await
        .inspect_err(|e| warn!("{}", e))?;
    Ok(Json(item))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteConfirmation>> {
    state
        .store
        .delete(id)
        .await
        .inspect_err(|e| warn!("{}", e))?;
    Ok(Json(DeleteConfirmation {
        message: format!("Item {} deleted successfully", id),
    }))
}
