//! HTTP client for network-based API calls

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use shared::client::{AllOrdersResponse, AllUsersResponse, OrderDetailsResponse, User};
use shared::{MessageResponse, Order, OrderError};
use tracing::{debug, instrument};

use crate::api::{OrderMutation, OrderQuery, UserDirectory};
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for the canteen backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL extended by `segments`, each percent-encoded as one segment
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &[&str], query: &[(&str, &str)]) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        self.send(self.client.get(url).query(query)).await
    }

    /// Make a PUT request without body
    pub async fn put<T: DeserializeOwned>(&self, path: &[&str], query: &[(&str, &str)]) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        self.send(self.client.put(url).query(query)).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &[&str], query: &[(&str, &str)]) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        self.send(self.client.delete(url).query(query)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// Error bodies are `{ "success": false, "message": "..." }`; the message
    /// is kept so the operator sees what the server said.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = server_message(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
            debug!(%status, %message, "Request rejected");
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
                StatusCode::FORBIDDEN => ClientError::Forbidden(message),
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::BAD_REQUEST => ClientError::Validation(message),
                _ => ClientError::Server(message),
            });
        }

        serde_json::from_str(&text).map_err(Into::into)
    }
}

/// Extract `message` from an error body
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<MessageResponse>(body)
        .ok()
        .map(|r| r.message)
        .filter(|m| !m.is_empty())
}

/// A 2xx response can still carry `success: false`
fn ensure_success(resp: MessageResponse) -> ClientResult<MessageResponse> {
    if resp.success {
        Ok(resp)
    } else {
        Err(OrderError::MutationFailed(resp.message).into())
    }
}

// ========== Order API ==========

#[async_trait]
impl OrderQuery for HttpClient {
    #[instrument(skip(self))]
    async fn query_order(&self, order_id: &str) -> ClientResult<Order> {
        let resp: OrderDetailsResponse = self.get(&["order", order_id], &[]).await?;
        Ok(resp.data.order)
    }

    #[instrument(skip(self))]
    async fn query_orders(&self, admin_id: &str) -> ClientResult<Vec<Order>> {
        let resp: AllOrdersResponse = self.get(&["order", "all"], &[("id", admin_id)]).await?;
        Ok(resp.data.orders)
    }
}

#[async_trait]
impl OrderMutation for HttpClient {
    #[instrument(skip(self))]
    async fn mutate_order_status(
        &self,
        user_id: &str,
        order_id: &str,
    ) -> ClientResult<MessageResponse> {
        let resp = self
            .put(&["order", order_id], &[("id", user_id)])
            .await?;
        ensure_success(resp)
    }

    #[instrument(skip(self))]
    async fn delete_order(&self, user_id: &str, order_id: &str) -> ClientResult<MessageResponse> {
        let resp = self
            .delete(&["order", order_id], &[("id", user_id)])
            .await?;
        ensure_success(resp)
    }
}

// ========== User API ==========

#[async_trait]
impl UserDirectory for HttpClient {
    #[instrument(skip(self))]
    async fn query_users(&self, admin_id: &str) -> ClientResult<Vec<User>> {
        let resp: AllUsersResponse = self.get(&["user", "all"], &[("id", admin_id)]).await?;
        Ok(resp.data.users)
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: &str, admin_id: &str) -> ClientResult<MessageResponse> {
        let resp = self
            .delete(&["user", user_id], &[("id", admin_id)])
            .await?;
        ensure_success(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HttpClient {
        HttpClient::new(&ClientConfig::new(base_url)).unwrap()
    }

    #[test]
    fn test_endpoint_join() {
        let with_slash = client("http://localhost:4000/api/v1/");
        assert_eq!(
            with_slash.endpoint(&["order", "42"]).unwrap().as_str(),
            "http://localhost:4000/api/v1/order/42"
        );
        let without_slash = client("http://localhost:4000/api/v1");
        assert_eq!(
            without_slash.endpoint(&["user", "all"]).unwrap().as_str(),
            "http://localhost:4000/api/v1/user/all"
        );
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        let client = client("http://localhost:4000/api/v1/");
        let url = client.endpoint(&["order", "a/b?c#d"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/v1/order/a%2Fb%3Fc%23d");
        assert_eq!(url.path_segments().unwrap().count(), 4);
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpClient::new(&ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_server_message() {
        assert_eq!(
            server_message(r#"{"success":false,"message":"Order Not Found"}"#).as_deref(),
            Some("Order Not Found")
        );
        assert_eq!(server_message("<html>502</html>"), None);
        assert_eq!(server_message(r#"{"success":false,"message":""}"#), None);
    }

    #[test]
    fn test_ensure_success() {
        assert!(ensure_success(MessageResponse::message(true, "ok")).is_ok());
        let err = ensure_success(MessageResponse::message(false, "nope")).unwrap_err();
        assert!(matches!(err, ClientError::Order(OrderError::MutationFailed(_))));
        assert_eq!(err.operator_message(), "nope");
    }
}
