//! Event delivery: single-attempt authenticated POST of the JSON payload.

use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::config::ConfigurationStore;
use crate::dto::Event;
use crate::errors::{ConfigError, DeliveryError, ForwardResult};

/// HTTP client for the configured event endpoint.
///
/// Construction injects the shared `reqwest::Client` and the configuration
/// accessor; the endpoint url and token are re-read per send.
pub struct EventDeliveryClient<C> {
    http: reqwest::Client,
    store: C,
}

impl<C: ConfigurationStore> EventDeliveryClient<C> {
    pub fn new(http: reqwest::Client, store: C) -> Self {
        Self { http, store }
    }

    /// Sends one event to the configured endpoint.
    ///
    /// Fails without touching the network when the endpoint url is empty.
    /// Any transport failure or non-2xx status surfaces as a
    /// [`DeliveryError`]; nothing is retried.
    pub async fn send(&self, event: &Event) -> ForwardResult<()> {
        let config = self.store.get();
        if !config.is_valid() {
            return Err(ConfigError::EmptyUrl.into());
        }

        let body = serde_json::to_vec(event).map_err(DeliveryError::Serialize)?;

        debug!(url = %config.url, event = %event.id, "delivering push event");

        let response = self
            .http
            .post(&config.url)
            .bearer_auth(&config.token)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(DeliveryError::from)?;

        response.error_for_status().map_err(DeliveryError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::config::fakes::{active_config, StaticStore};
    use crate::config::ForwarderConfig;
    use crate::dto::Push;
    use crate::errors::Error;

    fn sample_event() -> Event {
        Event {
            id: "e-1".into(),
            time: Utc::now().to_rfc3339(),
            data: Push {
                repository_id: "42".into(),
                repository_name: "heart-of-gold".into(),
                repository_namespace: "hitchhiker".into(),
                user: Some("trillian".into()),
                date_pushed: Utc::now(),
                commits: Vec::new(),
            },
        }
    }

    #[tokio::test]
    async fn empty_url_fails_before_any_network_call() {
        let store = StaticStore(ForwarderConfig {
            url: String::new(),
            token: "sekret".into(),
            active: true,
        });
        let client = EventDeliveryClient::new(reqwest::Client::new(), store);

        let result = client.send(&sample_event()).await;

        assert!(matches!(result, Err(Error::Config(ConfigError::EmptyUrl))));
    }

    #[tokio::test]
    async fn posts_json_with_bearer_authorization() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("authorization", "Bearer sekret")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "id": "e-1",
                "data": { "repositoryName": "heart-of-gold" }
            })))
            .with_status(200)
            .create_async()
            .await;

        let store = StaticStore(active_config(&server.url(), "sekret"));
        let client = EventDeliveryClient::new(reqwest::Client::new(), store);

        client.send(&sample_event()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_maps_to_delivery_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(500)
            .create_async()
            .await;

        let store = StaticStore(active_config(&server.url(), "sekret"));
        let client = EventDeliveryClient::new(reqwest::Client::new(), store);

        let result = client.send(&sample_event()).await;

        assert!(matches!(
            result,
            Err(Error::Delivery(DeliveryError::Server(500)))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_maps_to_network_error() {
        // Reserved port with nothing listening.
        let store = StaticStore(active_config("http://127.0.0.1:9/", "sekret"));
        let client = EventDeliveryClient::new(reqwest::Client::new(), store);

        let result = client.send(&sample_event()).await;

        assert!(matches!(
            result,
            Err(Error::Delivery(DeliveryError::Network(_)))
        ));
    }
}
