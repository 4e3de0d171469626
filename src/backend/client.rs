//! Smart Home Backend Client
//!
//! A JSON-over-HTTP client for the realtime, command and limits endpoints.

use crate::backend::Backend;
use crate::backend::error::BackendError;
use crate::consts::cli_consts::backend::{COMMAND_ENDPOINT, LIMITS_ENDPOINT, REALTIME_ENDPOINT};
use crate::environment::Environment;
use crate::snapshot::{Command, LimitUpdate, Limits, SensorSnapshot};
use reqwest::{Client, ClientBuilder, Response};
use serde::{Deserialize, Serialize};

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("smarthome-hub/", env!("CARGO_PKG_VERSION"));

/// Body of a `set_limits` answer.
#[derive(Debug, Deserialize)]
struct LimitsResponse {
    status: String,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    limits: Option<Limits>,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    environment: Environment,
}

impl BackendClient {
    /// No request timeouts are configured: a hung request only ends when the
    /// transport gives up.
    pub fn new(environment: Environment) -> Result<Self, BackendError> {
        let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> Result<String, BackendError> {
        Ok(self.environment.endpoint_url(endpoint)?)
    }

    async fn handle_response_status(response: Response) -> Result<Response, BackendError> {
        if !response.status().is_success() {
            return Err(BackendError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_json(&self, endpoint: &str) -> Result<serde_json::Value, BackendError> {
        let url = self.build_url(endpoint)?;
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// Posts a JSON body and hands back the raw response, whatever its status.
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response, BackendError> {
        let url = self.build_url(endpoint)?;
        log::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Ok(response)
    }
}

#[async_trait::async_trait]
impl Backend for BackendClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn get_realtime(&self) -> Result<SensorSnapshot, BackendError> {
        let body = self.get_json(REALTIME_ENDPOINT).await?;
        Ok(SensorSnapshot::from_json(body)?)
    }

    async fn send_command(&self, command: &Command) -> Result<(), BackendError> {
        let response = self.post_json(COMMAND_ENDPOINT, command).await?;
        log::debug!(
            "command {} answered with status {}",
            command,
            response.status()
        );
        Ok(())
    }

    async fn set_limits(&self, update: &LimitUpdate) -> Result<Limits, BackendError> {
        let response = self.post_json(LIMITS_ENDPOINT, update).await?;
        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        let body: LimitsResponse =
            serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))?;

        if body.status != "ok" {
            return Err(BackendError::Rejected(body.msg.unwrap_or(body.status)));
        }
        body.limits
            .ok_or_else(|| BackendError::Decode("missing `limits` in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::actions;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    type Recorded = Arc<Mutex<Vec<Value>>>;

    /// Serves the router on an ephemeral port and returns its base address.
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base: &str) -> BackendClient {
        BackendClient::new(Environment::Custom {
            api_url: base.to_string(),
        })
        .unwrap()
    }

    fn recording_router(recorded: Recorded, status: StatusCode) -> Router {
        Router::new()
            .route(
                "/command",
                post(
                    move |State(recorded): State<Recorded>, Json(body): Json<Value>| async move {
                        recorded.lock().unwrap().push(body);
                        (status, Json(json!({"status": "ok"})))
                    },
                ),
            )
            .with_state(recorded)
    }

    #[tokio::test]
    async fn test_get_realtime_parses_node_map() {
        let router = Router::new().route(
            "/realtime",
            get(|| async {
                Json(json!({
                    "kitchen": {
                        "node": "kitchen", "temp": 22.5, "gas": 0.3,
                        "temp_th": 30, "gas_th": 1.0, "time": "12:00:01"
                    }
                }))
            }),
        );
        let client = client_for(&spawn_backend(router).await);

        let snapshot = client.get_realtime().await.unwrap();
        assert_eq!(snapshot.node_count(), 1);
        assert_eq!(snapshot.nodes["kitchen"].format_temp(), "22.5°C");
    }

    #[tokio::test]
    async fn test_get_realtime_non_success_is_http_error() {
        let router = Router::new().route(
            "/realtime",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        );
        let client = client_for(&spawn_backend(router).await);

        match client.get_realtime().await {
            Err(BackendError::Http { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "down for maintenance");
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_realtime_malformed_body_is_decode_error() {
        let router = Router::new().route("/realtime", get(|| async { "<html>oops</html>" }));
        let client = client_for(&spawn_backend(router).await);

        assert!(matches!(
            client.get_realtime().await,
            Err(BackendError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client_for(&format!("http://{}", addr));

        assert!(matches!(
            client.get_realtime().await,
            Err(BackendError::Reqwest(_))
        ));
    }

    #[tokio::test]
    // A placeholder address never reaches the network.
    async fn test_placeholder_address_is_config_error() {
        let client = client_for("https://PASTE_YOUR_URL_HERE");
        let err = client.get_realtime().await.unwrap_err();
        assert!(err.is_config());
        let err = client
            .send_command(&Command::new("kitchen", actions::LIGHT_ON))
            .await
            .unwrap_err();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_send_command_posts_json_body() {
        let recorded = Recorded::default();
        let base = spawn_backend(recording_router(recorded.clone(), StatusCode::OK)).await;
        let client = client_for(&base);

        client
            .send_command(&Command::new("kitchen", actions::LIGHT_ON))
            .await
            .unwrap();

        let bodies = recorded.lock().unwrap().clone();
        assert_eq!(bodies, vec![json!({"device": "kitchen", "action": "LIGHT_ON"})]);
    }

    #[tokio::test]
    // Commands are not deduplicated and the response status is not inspected.
    async fn test_send_command_twice_posts_twice() {
        let recorded = Recorded::default();
        let base = spawn_backend(recording_router(
            recorded.clone(),
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
        .await;
        let client = client_for(&base);
        let command = Command::new("kitchen", actions::LIGHT_OFF);

        client.send_command(&command).await.unwrap();
        client.send_command(&command).await.unwrap();

        assert_eq!(recorded.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_set_limits_returns_applied_limits() {
        let router = Router::new().route(
            "/set_limits",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "status": "ok",
                    "limits": {"temp_th": body["temp_th"], "gas_th": 1.2}
                }))
            }),
        );
        let client = client_for(&spawn_backend(router).await);

        let limits = client
            .set_limits(&LimitUpdate {
                device: "kitchen".to_string(),
                temp_th: Some(28.5),
                gas_th: None,
            })
            .await
            .unwrap();
        assert_eq!(limits.to_string(), "Max Temp 28.5°C | Max Gas 1.2V");
    }

    #[tokio::test]
    async fn test_set_limits_rejection() {
        let router = Router::new().route(
            "/set_limits",
            post(|| async { Json(json!({"status": "error", "msg": "unknown device"})) }),
        );
        let client = client_for(&spawn_backend(router).await);

        let err = client
            .set_limits(&LimitUpdate {
                device: "attic".to_string(),
                temp_th: None,
                gas_th: Some(0.9),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Rejected(msg) if msg == "unknown device"));
    }
}
