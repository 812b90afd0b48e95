use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Json, Router};
use log::info;

use crate::dashboard::{Dashboard, DashboardView};
use crate::filter::Filter;
use crate::page::render_page;

pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/dashboard", get(api_dashboard))
        .route("/health", get(health))
        .with_state(dashboard)
}

pub async fn serve(dashboard: Arc<Dashboard>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Serving dashboard on http://{}", addr);
    axum::serve(listener, router(dashboard))
        .await
        .context("Server error")?;
    Ok(())
}

async fn index(State(dashboard): State<Arc<Dashboard>>) -> Html<String> {
    Html(render_page(&dashboard.render(&Filter::default())).into_string())
}

async fn submit(
    State(dashboard): State<Arc<Dashboard>>,
    Form(filter): Form<Filter>,
) -> Html<String> {
    Html(render_page(&dashboard.render(&filter)).into_string())
}

async fn api_dashboard(
    State(dashboard): State<Arc<Dashboard>>,
    Query(filter): Query<Filter>,
) -> Json<DashboardView> {
    Json(dashboard.render(&filter))
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Record};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn make_router() -> Router {
        let dataset = Dataset::from_records(vec![
            Record::new("A", "North", "Crude", 2019, 1000.0),
            Record::new("A", "North", "Crude", 2020, 2000.0),
            Record::new("B", "South", "Crude", 2019, 500.0),
        ]);
        router(Arc::new(Dashboard::new(Arc::new(dataset))))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = make_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn test_index_unfiltered() {
        let response = make_router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("3,500 KL"));
        assert!(html.contains("1,167 KL"));
    }

    #[tokio::test]
    async fn test_form_post_filters_cards() {
        let request = Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("state=A&region="))
            .unwrap();
        let response = make_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("3,000 KL"));
        assert!(html.contains("1,500 KL"));
    }

    #[tokio::test]
    async fn test_api_json() {
        let response = make_router()
            .oneshot(
                Request::get("/api/dashboard?region=South")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["total_production"], "500 KL");
        assert_eq!(json["state_count"], 1);
        assert_eq!(json["selected_region"], "South");
        assert_eq!(json["charts"]["top_states"]["id"], "top_states");
    }
}
