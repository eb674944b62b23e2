// --- File: crates/services/bookify_backend/src/main.rs ---
use axum::extract::State;
use axum::http::{header, Method};
use axum::routing::get;
use axum::{Json, Router};
use bookify_config::load_config;
use bookify_store::{now_timestamp, JsonStore};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

#[cfg(feature = "gcal")]
use bookify_gcal::GcalState;
#[cfg(feature = "widget")]
use bookify_widget::WidgetState;

/// Liveness probe.
#[axum::debug_handler]
async fn health_handler(State(started): State<Instant>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": now_timestamp(),
        "uptimeSeconds": started.elapsed().as_secs(),
    }))
}

#[tokio::main]
async fn main() {
    bookify_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));
    let store = Arc::new(JsonStore::from_config(&config).expect("Failed to open the data file"));
    info!("Data file: {}", store.path().display());
    let started = Instant::now();

    #[cfg(feature = "gcal")]
    let gcal_state = if bookify_common::is_gcal_enabled(&config) {
        let state = GcalState::new(Arc::clone(&config), Arc::clone(&store))
            .expect("Failed to initialize the Google Calendar integration");
        Some(Arc::new(state))
    } else {
        info!("Google Calendar integration is off (use_gcal)");
        None
    };

    #[cfg(feature = "widget")]
    let widget_state = if bookify_common::is_widget_enabled(&config) {
        // Reuse the calendar service behind the API routes; without it the
        // webhook answers in degraded mode.
        let calendar = gcal_state.as_ref().map(|state| Arc::clone(&state.calendar));
        let state = WidgetState::new(Arc::clone(&config), Arc::clone(&store), calendar)
            .expect("Failed to initialize the widget integration");
        Some(Arc::new(state))
    } else {
        info!("Widget integration is off (use_widget)");
        None
    };

    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut app = Router::new()
        .route("/health", get(health_handler))
        .with_state(started);

    #[cfg(feature = "gcal")]
    {
        if let Some(state) = &gcal_state {
            app = app.merge(bookify_gcal::routes(Arc::clone(state)));
        }
    }
    #[cfg(feature = "widget")]
    {
        if let Some(state) = widget_state {
            app = app.merge(bookify_widget::routes(state));
        }
    }

    // Conditionally add Swagger UI and the JSON document.
    #[cfg(feature = "openapi")]
    {
        use bookify_gcal::doc::GcalApiDoc;
        use bookify_widget::doc::WidgetApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Bookify API",
                version = "0.1.0",
                description = "Appointment booking service API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags((name = "bookify", description = "Core service endpoints")),
            servers((url = "/", description = "Bookify server")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(GcalApiDoc::openapi());
        openapi_doc.merge(WidgetApiDoc::openapi());
        info!("Serving API docs at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    // The widget embeds on arbitrary sites, so the API answers cross-origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    let mut app = app.layer(cors);

    // Serve the embed script and demo page in dev mode.
    if cfg!(debug_assertions) {
        info!("Development mode: serving embed assets from ./public");
        app = app.fallback_service(ServeDir::new("public"));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind the server address");
    info!("Bookify server listening at http://{addr}");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
