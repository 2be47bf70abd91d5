//! House Price Prediction Server
//!
//! Serves the prediction form and a JSON API over a scaler/model pair loaded
//! once at startup.

use axum::{
    routing::{get, post},
    Router,
};
use inference_engine::{InferenceError, PricePredictor};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
pub mod format;
pub mod page;
mod routes;

pub use crate::config::{AppConfig, DisplayConfig, LogFormat, LoggingConfig};
pub use error::ApiError;

/// Application state shared across handlers
pub struct AppState {
    /// Loaded predictor, absent when artifacts failed to load
    predictor: Option<PricePredictor>,
    /// Why loading failed
    load_error: Option<String>,
    /// Display settings
    pub display: DisplayConfig,
    /// Prometheus handle when the recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Build state from a load attempt; a failed load leaves prediction
    /// disabled instead of stopping the server
    pub fn new(loaded: Result<PricePredictor, InferenceError>, display: DisplayConfig) -> Self {
        let (predictor, load_error) = match loaded {
            Ok(predictor) => (Some(predictor), None),
            Err(e) => {
                error!("Error loading model or scaler: {}", e);
                (None, Some(e.to_string()))
            }
        };

        Self {
            predictor,
            load_error,
            display,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Load artifacts named in the config
    pub fn load(config: &AppConfig) -> Self {
        Self::new(
            PricePredictor::load(&config.artifacts),
            config.display.clone(),
        )
    }

    /// Attach a Prometheus handle for `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get the predictor, or the load failure
    pub fn predictor(&self) -> Result<&PricePredictor, ApiError> {
        match &self.predictor {
            Some(predictor) => Ok(predictor),
            None => Err(ApiError::Unavailable(
                self.load_error
                    .clone()
                    .unwrap_or_else(|| "artifacts not loaded".to_string()),
            )),
        }
    }

    /// Load failure message, if any
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::form::show).post(routes::form::submit))
        .route("/api/v1/predict", post(routes::predict::predict))
        .route("/api/v1/health", get(routes::health::health))
        .route("/api/v1/schema", get(routes::health::schema))
        .route("/metrics", get(routes::health::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let parsed = config.level.parse::<Level>().ok();
    let level = parsed.unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    match config.format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }

    if parsed.is_none() {
        warn!("Unknown log level {:?}, using INFO", config.level);
    }
    Ok(())
}

/// Run the server
pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = AppState::load(&config);

    if config.metrics.enabled {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => state = state.with_metrics(handle),
            Err(e) => warn!("Metrics disabled: {}", e),
        }
    }

    let app = create_router(Arc::new(state));

    info!("Starting server on {}", config.server.addr);

    let listener = tokio::net::TcpListener::bind(&config.server.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use inference_engine::{LinearRegressor, StandardScaler};
    use tower::ServiceExt;

    /// 1000 per sq ft over an identity scaler
    fn loaded_state() -> Arc<AppState> {
        let scaler = StandardScaler::new(vec![0.0; 13], vec![1.0; 13]).unwrap();
        let mut coefficients = vec![0.0; 13];
        coefficients[0] = 1_000.0;
        let model = LinearRegressor::new(coefficients, 0.0).unwrap();
        let predictor = PricePredictor::new(Box::new(scaler), Box::new(model));
        Arc::new(AppState::new(predictor, DisplayConfig::default()))
    }

    fn unloaded_state() -> Arc<AppState> {
        let loaded = Err(InferenceError::ModelLoadError(
            "svm_model.json: No such file or directory".to_string(),
        ));
        Arc::new(AppState::new(loaded, DisplayConfig::default()))
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const FORM_BODY: &str = "area=2500&bedrooms=3&bathrooms=2&stories=1&parking=1\
&mainroad=Yes&guestroom=No&basement=No&hotwaterheating=No&airconditioning=Yes\
&furnishingstatus=Semi-Furnished";

    #[tokio::test]
    async fn test_form_page_renders() {
        let app = create_router(loaded_state());
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("House Price Prediction App"));
        assert!(html.contains("Input Summary"));
        assert!(!html.contains("Error loading model or scaler"));
    }

    #[tokio::test]
    async fn test_form_submit_shows_price() {
        let app = create_router(loaded_state());
        let response = app.oneshot(form_request(FORM_BODY)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Predicted House Price: \u{20b9} 2,500,000.00"));
        assert!(html.contains(r#"<option value="Semi-Furnished" selected>"#));
    }

    #[tokio::test]
    async fn test_form_submit_unknown_furnishing() {
        let app = create_router(loaded_state());
        let body = FORM_BODY.replace("Semi-Furnished", "Lavish");
        let response = app.oneshot(form_request(&body)).await.unwrap();

        let html = body_text(response).await;
        assert!(html.contains("Prediction error: Invalid input: Unknown furnishing status"));
        assert!(!html.contains("Predicted House Price"));
    }

    #[tokio::test]
    async fn test_form_submit_empty_area_stays_on_page() {
        let app = create_router(loaded_state());
        let body = FORM_BODY.replace("area=2500", "area=");
        let response = app.oneshot(form_request(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Prediction error: Invalid request body"));
        assert!(html.contains("Predict Price"));
        assert!(!html.contains("Predicted House Price"));
    }

    #[tokio::test]
    async fn test_load_failure_is_shown_and_disables_prediction() {
        let app = create_router(unloaded_state());
        let response = app.oneshot(form_request(FORM_BODY)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Error loading model or scaler: Model load failed"));
        assert!(html.contains("Prediction error: Model not loaded"));
    }

    #[tokio::test]
    async fn test_json_predict() {
        let app = create_router(loaded_state());
        let request = json_request(
            "/api/v1/predict",
            serde_json::json!({
                "area": 500, "bedrooms": 1, "bathrooms": 1, "stories": 1, "parking": 0,
                "mainroad": "No", "guestroom": "No", "basement": "No",
                "hotwaterheating": "No", "airconditioning": "No",
                "furnishingstatus": "Unfurnished"
            }),
        );
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["price"], 500_000.0);
        assert_eq!(body["formatted"], "\u{20b9} 500,000.00");
        assert_eq!(
            body["features"]["values"],
            serde_json::json!([500.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0])
        );
    }

    #[tokio::test]
    async fn test_json_predict_out_of_range() {
        let app = create_router(loaded_state());
        let mut record =
            serde_json::to_value(feature_encoder::RawFeatureRecord::default()).unwrap();
        record["bedrooms"] = serde_json::json!(12);
        let response = app
            .oneshot(json_request("/api/v1/predict", record))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["kind"], "encoding");
    }

    #[tokio::test]
    async fn test_json_predict_missing_field() {
        let app = create_router(loaded_state());
        let request = json_request("/api/v1/predict", serde_json::json!({ "area": 500 }));
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["kind"], "invalid_body");
        assert!(body["error"].as_str().unwrap().contains("bedrooms"));
    }

    #[tokio::test]
    async fn test_json_predict_unloaded() {
        let app = create_router(unloaded_state());
        let record = serde_json::to_value(feature_encoder::RawFeatureRecord::default()).unwrap();
        let response = app
            .oneshot(json_request("/api/v1/predict", record))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_reports_degraded() {
        let app = create_router(unloaded_state());
        let response = app
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["model_loaded"], false);
    }

    #[tokio::test]
    async fn test_health_reports_loaded_model() {
        let app = create_router(loaded_state());
        let response = app
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model"], "linear");
    }

    #[tokio::test]
    async fn test_schema() {
        let app = create_router(loaded_state());
        let response = app
            .oneshot(Request::get("/api/v1/schema").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["features"].as_array().unwrap().len(), 13);
        assert_eq!(body["furnishing"][1], "Semi-Furnished");
    }

    #[tokio::test]
    async fn test_metrics_disabled_without_recorder() {
        let app = create_router(loaded_state());
        let response = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
