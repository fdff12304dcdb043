// ismartgate_exporter - Prometheus metrics exporter for iSmartGate devices
//
// Copyright 2022 Nick Pillitteri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use prometheus_client::encoding::text::encode;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const TEXT_FORMAT: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// State shared by every request to the metrics server.
#[derive(Debug)]
pub struct RequestContext {
    registry: Registry,
}

impl RequestContext {
    pub fn new(registry: Registry) -> Self {
        RequestContext { registry }
    }
}

/// Build a router that exposes the metrics in `context` at `/metrics` in text format.
pub fn router(context: Arc<RequestContext>) -> Router {
    Router::new()
        .route("/metrics", get(text_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}

async fn text_metrics(State(context): State<Arc<RequestContext>>) -> Response {
    let mut buf = String::new();

    match encode(&mut buf, &context.registry) {
        Ok(_) => {
            tracing::debug!(message = "encoded prometheus metrics to text format", num_bytes = buf.len());
            ([(CONTENT_TYPE, TEXT_FORMAT)], buf).into_response()
        }
        Err(e) => {
            tracing::error!(message = "error encoding metrics", error = %e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{router, RequestContext, TEXT_FORMAT};
    use crate::metrics::TemperatureMetrics;
    use prometheus_client::registry::Registry;
    use reqwest::header::CONTENT_TYPE;
    use reqwest::{Client, StatusCode};
    use std::net::SocketAddr;
    use std::sync::Arc;

    async fn spawn_server(registry: Registry) -> SocketAddr {
        let app = router(Arc::new(RequestContext::new(registry)));
        let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(app.into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);
        addr
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let mut reg = Registry::default();
        let metrics = TemperatureMetrics::new(&mut reg);
        metrics.temperature(1, 68.0);
        let addr = spawn_server(reg).await;

        let res = Client::new()
            .get(format!("http://{}/metrics", addr))
            .send()
            .await
            .unwrap();

        assert_eq!(StatusCode::OK, res.status());
        assert_eq!(TEXT_FORMAT, res.headers()[CONTENT_TYPE].to_str().unwrap());

        let body = res.text().await.unwrap();
        assert!(body.contains("temperature_fahrenheit{door=\"door1\"} 68.0"), "{}", body);
        assert!(body.ends_with("# EOF\n"), "{}", body);
    }

    #[tokio::test]
    async fn test_metrics_endpoint_sees_later_updates() {
        let mut reg = Registry::default();
        let metrics = TemperatureMetrics::new(&mut reg);
        let addr = spawn_server(reg).await;
        let client = Client::new();
        let url = format!("http://{}/metrics", addr);

        let before = client.get(&url).send().await.unwrap().text().await.unwrap();
        assert!(!before.contains("door1"), "{}", before);

        metrics.temperature(1, 41.0);
        let after = client.get(&url).send().await.unwrap().text().await.unwrap();
        assert!(after.contains("temperature_fahrenheit{door=\"door1\"} 41.0"), "{}", after);
    }

    #[tokio::test]
    async fn test_wrong_method_and_path() {
        let addr = spawn_server(Registry::default()).await;
        let client = Client::new();

        let res = client.post(format!("http://{}/metrics", addr)).send().await.unwrap();
        assert_eq!(StatusCode::METHOD_NOT_ALLOWED, res.status());

        let res = client.get(format!("http://{}/", addr)).send().await.unwrap();
        assert_eq!(StatusCode::NOT_FOUND, res.status());
    }
}
