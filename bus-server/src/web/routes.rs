//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::pipeline::{self, Dashboard, FilterForm, PipelineError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/dashboard", post(dashboard))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Full dashboard page. Filters come from the query string.
async fn index_page(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(pairs)) => IndexQuery::from_pairs(pairs),
        Err(rejection) => Err(rejection.body_text()),
    };
    let form = match query {
        Ok(q) => FilterForm::from(q),
        Err(message) => return error_page(AppError::BadRequest { message }),
    };
    match pipeline::run_session(&state.db, &form).await {
        Ok(dashboard) => {
            let template = IndexTemplate {
                view: DashboardView::from_dashboard(&dashboard),
            };
            match template.render() {
                Ok(html) => Html(html).into_response(),
                Err(e) => AppError::template(e).into_response(),
            }
        }
        Err(e) => error_page(AppError::from(e)),
    }
}

/// Render an error as a full page, keeping its status code.
fn error_page(err: AppError) -> Response {
    let status = err.status();
    let title = match &err {
        AppError::BadRequest { .. } => "Invalid filter",
        AppError::Internal { .. } => "Database unavailable",
    };
    err.log();
    let template = ErrorTemplate {
        title: title.to_string(),
        message: err.message().to_string(),
    };
    let html = template
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e));
    (status, Html(html)).into_response()
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Re-run the pipeline after a widget change.
///
/// Takes a JSON [`FilterForm`]; an empty body means all defaults.
async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let form: FilterForm = if body.is_empty() {
        FilterForm::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            warn!(body = %String::from_utf8_lossy(&body), "JSON parse error: {e}");
            AppError::BadRequest {
                message: format!("Invalid JSON: {e}"),
            }
        })?
    };

    let dashboard: Dashboard = pipeline::run_session(&state.db, &form).await?;

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = DashboardTemplate {
            view: DashboardView::from_dashboard(&dashboard),
        };
        let html = template.render().map_err(AppError::template)?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(DashboardResponse::from_dashboard(dashboard)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl AppError {
    fn template(e: askama::Error) -> Self {
        AppError::Internal {
            message: format!("Template error: {}", e),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message } | AppError::Internal { message } => message,
        }
    }

    fn log(&self) {
        match self {
            AppError::BadRequest { message } => warn!(status = 400, "{message}"),
            AppError::Internal { message } => error!(status = 500, "{message}"),
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::InvalidInput(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            PipelineError::Db(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        self.log();
        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::HeaderValue;
    use tempfile::{TempDir, tempdir};

    use crate::db::schema::{NewListing, create_table, insert_listing};
    use crate::db::{Database, DbConfig};

    async fn app_state(listings: &[NewListing]) -> (TempDir, AppState) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bus.db");
        let db = Database::open(&DbConfig::local(path.to_str().unwrap()))
            .await
            .unwrap();
        {
            let session = db.session().unwrap();
            create_table(&session).await.unwrap();
            for listing in listings {
                insert_listing(&session, listing).await.unwrap();
            }
        }
        (dir, AppState::new(db))
    }

    fn listings() -> Vec<NewListing> {
        vec![
            NewListing::new("Karnataka", "Bangalore-Chennai", "AC", "08:00", 1200.0, 4.0),
            NewListing::new("Karnataka", "Bangalore-Chennai", "Sleeper", "22:15", 950.0, 3.0),
            NewListing::new("Kerala", "Kochi-Kannur", "Sleeper", "23:00", 1500.0, 4.5),
        ]
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn html_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        headers
    }

    #[test]
    fn accepts_html_checks_header() {
        assert!(accepts_html(&html_headers()));
        assert!(!accepts_html(&HeaderMap::new()));
        let mut json = HeaderMap::new();
        json.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!accepts_html(&json));
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn index_renders_defaults() {
        let (_dir, state) = app_state(&listings()).await;
        let response = index_page(State(state), Ok(Query(vec![]))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Bangalore-Chennai"));
        assert!(html.contains("Kerala"));
    }

    #[tokio::test]
    async fn index_with_bad_rating_is_bad_request() {
        let (_dir, state) = app_state(&listings()).await;
        let query = vec![("min_rating".to_string(), "7".to_string())];
        let response = index_page(State(state), Ok(Query(query))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_text(response).await;
        assert!(html.contains("Invalid filter"));
    }

    #[tokio::test]
    async fn index_without_table_is_an_error_page() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.db");
        let db = Database::open(&DbConfig::local(path.to_str().unwrap()))
            .await
            .unwrap();
        let response = index_page(State(AppState::new(db)), Ok(Query(vec![]))).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("Database unavailable"));
    }

    #[tokio::test]
    async fn index_with_malformed_number_renders_error_page() {
        let (_dir, state) = app_state(&listings()).await;
        let query = vec![("min_rating".to_string(), "abc".to_string())];
        let response = index_page(State(state), Ok(Query(query))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_text(response).await;
        assert!(html.contains("<html"));
        assert!(html.contains("min_rating must be a whole number"));
    }

    #[tokio::test]
    async fn index_selects_repeated_bus_types() {
        let (_dir, state) = app_state(&[
            NewListing::new("Goa", "Panaji-Margao", "AC, Push Back", "08:00", 900.0, 4.0),
            NewListing::new("Goa", "Panaji-Margao", "Sleeper", "09:00", 700.0, 4.0),
        ])
        .await;
        let query = vec![("bus_types".to_string(), "AC, Push Back".to_string())];
        let response = index_page(State(state), Ok(Query(query))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"value="AC, Push Back" checked"#));
        assert!(!html.contains(r#"value="Sleeper" checked"#));
        assert!(html.contains("Available Buses (1)"));
    }

    #[tokio::test]
    async fn dashboard_returns_json_by_default() {
        let (_dir, state) = app_state(&listings()).await;
        let body = Bytes::from(r#"{"state":"Kerala","min_rating":4}"#);
        let response = dashboard(State(state), HeaderMap::new(), body)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["selection"]["state"], "Kerala");
        assert_eq!(json["selection"]["route"], "Kochi-Kannur");
        assert_eq!(json["listings"]["rows"].as_array().unwrap().len(), 1);
        assert_eq!(json["notices"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn dashboard_returns_fragment_for_html() {
        let (_dir, state) = app_state(&listings()).await;
        let body = Bytes::from(r#"{"state":"Karnataka","min_rating":5}"#);
        let response = dashboard(State(state), html_headers(), body)
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("No buses match the selected filters."));
        assert!(!html.contains("<html"));
    }

    #[tokio::test]
    async fn dashboard_empty_body_uses_defaults() {
        let (_dir, state) = app_state(&listings()).await;
        let response = dashboard(State(state), HeaderMap::new(), Bytes::new())
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["selection"]["state"], "Karnataka");
        assert_eq!(json["selection"]["price"]["max"], 3000);
    }

    #[tokio::test]
    async fn dashboard_rejects_bad_json() {
        let (_dir, state) = app_state(&listings()).await;
        let err = dashboard(State(state), HeaderMap::new(), Bytes::from("{not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn dashboard_rejects_inverted_price_range() {
        let (_dir, state) = app_state(&listings()).await;
        let body = Bytes::from(r#"{"min_price":3000,"max_price":100}"#);
        let err = dashboard(State(state), HeaderMap::new(), body)
            .await
            .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(json["error"].as_str().unwrap().starts_with("invalid filter"));
    }
}
