//! Remote data gateway for the backend REST API.
//!
//! Every endpoint returns a uniform envelope `{ success, message?, data? }`.
//! The envelope's `success` flag - not the transport status alone - is the
//! authoritative outcome signal: a 200 with `success: false` is a failure,
//! and callers must check both. [`Envelope::ok_data`] folds the two checks
//! into one `Result`.
//!
//! # Example
//!
//! ```rust,ignore
//! use ute_shop_client::api::ApiClient;
//! use ute_shop_client::config::ClientConfig;
//!
//! let api = ApiClient::new(&ClientConfig::from_env()?)?;
//! let products = api.featured_products(Some(12)).await?.ok_data()?;
//! ```

pub mod types;

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use ute_shop_core::{Product, ProductId};

use crate::config::ClientConfig;
use types::{
    AuthData, Brand, Category, LoginRequest, ProductQuery, ProfileData, RegisterRequest,
    RemoteCartLine, RemoteWishlistEntry, ResendOtpRequest, VerifyOtpRequest, WishlistCheck,
};

/// Errors that can occur when talking to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (unreachable host, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid envelope JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Non-success HTTP status, with the best message we could extract.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or a synthesized one.
        message: String,
    },

    /// The backend answered with `success: false`.
    #[error("request rejected: {message}")]
    Rejected {
        /// The envelope's message, or a generic one.
        message: String,
    },
}

/// The uniform response envelope every endpoint wraps its data in.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Authoritative outcome flag.
    pub success: bool,
    /// Human-readable outcome description.
    #[serde(default)]
    pub message: Option<String>,
    /// Endpoint-specific payload.
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload of a successful envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if `success` is false or `data` is
    /// absent, carrying the envelope's message when it has one.
    pub fn ok_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected {
                message: self
                    .message
                    .unwrap_or_else(|| "request failed".to_owned()),
            });
        }
        self.data.ok_or_else(|| ApiError::Rejected {
            message: self
                .message
                .unwrap_or_else(|| "response has no data".to_owned()),
        })
    }
}

/// Shape of a non-success error body, when the backend sends one.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the backend REST API.
///
/// Cheaply cloneable; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration.
    ///
    /// The request timeout is applied here, at the transport boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_url.clone(),
            }),
        })
    }

    /// Execute a request and parse the response envelope.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>, ApiError> {
        let mut url = Url::parse(&format!("{}{path}", self.inner.base_url))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let mut request = self.inner.http.request(method, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Prefer the backend's message; fall back to a generic one when
            // the error body is missing or unparseable.
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("Network error (HTTP {status})"));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>, ApiError> {
        self.request(Method::GET, path, None, token, query).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
        token: Option<&str>,
    ) -> Result<Envelope<T>, ApiError> {
        self.request(Method::POST, path, Some(body), token, &[])
            .await
    }

    async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
        token: Option<&str>,
    ) -> Result<Envelope<T>, ApiError> {
        self.request(Method::PUT, path, Some(body), token, &[])
            .await
    }

    async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<Envelope<T>, ApiError> {
        self.request(Method::DELETE, path, None, token, &[]).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// `GET /products`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn products(&self, query: &ProductQuery) -> Result<Envelope<Vec<Product>>, ApiError> {
        self.get("/products", None, &query.pairs()).await
    }

    /// `GET /products/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Envelope<Product>, ApiError> {
        self.get(&format!("/products/{id}"), None, &[]).await
    }

    /// `GET /products/{id}/related`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn related_products(
        &self,
        id: &ProductId,
        limit: Option<u32>,
    ) -> Result<Envelope<Vec<Product>>, ApiError> {
        let query = limit.map(|n| ("limit", n.to_string()));
        self.get(
            &format!("/products/{id}/related"),
            None,
            query.as_slice(),
        )
        .await
    }

    /// `GET /products/featured`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn featured_products(
        &self,
        limit: Option<u32>,
    ) -> Result<Envelope<Vec<Product>>, ApiError> {
        let query = limit.map(|n| ("limit", n.to_string()));
        self.get("/products/featured", None, query.as_slice()).await
    }

    /// `GET /products/bestseller`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn bestseller_products(
        &self,
        limit: Option<u32>,
    ) -> Result<Envelope<Vec<Product>>, ApiError> {
        let query = limit.map(|n| ("limit", n.to_string()));
        self.get("/products/bestseller", None, query.as_slice())
            .await
    }

    // =========================================================================
    // Categories & Brands
    // =========================================================================

    /// `GET /categories`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Envelope<Vec<Category>>, ApiError> {
        self.get("/categories", None, &[]).await
    }

    /// `GET /categories/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn category(&self, id: &ProductId) -> Result<Envelope<Category>, ApiError> {
        self.get(&format!("/categories/{id}"), None, &[]).await
    }

    /// `GET /categories/slug/{slug}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn category_by_slug(&self, slug: &str) -> Result<Envelope<Category>, ApiError> {
        self.get(&format!("/categories/slug/{slug}"), None, &[])
            .await
    }

    /// `GET /brands`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn brands(&self) -> Result<Envelope<Vec<Brand>>, ApiError> {
        self.get("/brands", None, &[]).await
    }

    /// `GET /brands/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn brand(&self, id: &ProductId) -> Result<Envelope<Brand>, ApiError> {
        self.get(&format!("/brands/{id}"), None, &[]).await
    }

    /// `GET /brands/slug/{slug}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn brand_by_slug(&self, slug: &str) -> Result<Envelope<Brand>, ApiError> {
        self.get(&format!("/brands/slug/{slug}"), None, &[]).await
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// `POST /auth/register`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self, body), fields(email = %body.email))]
    pub async fn register(
        &self,
        body: &RegisterRequest,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.post("/auth/register", &serde_json::to_value(body)?, None)
            .await
    }

    /// `POST /auth/login`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self, body), fields(email = %body.email))]
    pub async fn login(&self, body: &LoginRequest) -> Result<Envelope<AuthData>, ApiError> {
        self.post("/auth/login", &serde_json::to_value(body)?, None)
            .await
    }

    /// `POST /auth/logout`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.post("/auth/logout", &serde_json::json!({}), Some(token))
            .await
    }

    /// `POST /auth/verify-otp`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self, body), fields(email = %body.email))]
    pub async fn verify_otp(&self, body: &VerifyOtpRequest) -> Result<Envelope<AuthData>, ApiError> {
        self.post("/auth/verify-otp", &serde_json::to_value(body)?, None)
            .await
    }

    /// `POST /auth/resend-otp`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self, body), fields(email = %body.email))]
    pub async fn resend_otp(
        &self,
        body: &ResendOtpRequest,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.post("/auth/resend-otp", &serde_json::to_value(body)?, None)
            .await
    }

    /// `GET /auth/profile`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip_all)]
    pub async fn profile(&self, token: &str) -> Result<Envelope<ProfileData>, ApiError> {
        self.get("/auth/profile", Some(token), &[]).await
    }

    // =========================================================================
    // Server-side cart
    // =========================================================================

    /// `GET /cart`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip_all)]
    pub async fn cart(&self, token: &str) -> Result<Envelope<Vec<RemoteCartLine>>, ApiError> {
        self.get("/cart", Some(token), &[]).await
    }

    /// `POST /cart`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn add_cart_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
        token: &str,
    ) -> Result<Envelope<Vec<RemoteCartLine>>, ApiError> {
        let body = serde_json::json!({ "product_id": product_id, "quantity": quantity });
        self.post("/cart", &body, Some(token)).await
    }

    /// `PUT /cart/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn update_cart_item(
        &self,
        id: &ProductId,
        quantity: u32,
        token: &str,
    ) -> Result<Envelope<Vec<RemoteCartLine>>, ApiError> {
        let body = serde_json::json!({ "quantity": quantity });
        self.put(&format!("/cart/{id}"), &body, Some(token)).await
    }

    /// `DELETE /cart/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn remove_cart_item(
        &self,
        id: &ProductId,
        token: &str,
    ) -> Result<Envelope<Vec<RemoteCartLine>>, ApiError> {
        self.delete(&format!("/cart/{id}"), Some(token)).await
    }

    /// `DELETE /cart`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip_all)]
    pub async fn clear_cart(&self, token: &str) -> Result<Envelope<Vec<RemoteCartLine>>, ApiError> {
        self.delete("/cart", Some(token)).await
    }

    // =========================================================================
    // Server-side wishlist
    // =========================================================================

    /// `GET /wishlist`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip_all)]
    pub async fn wishlist(
        &self,
        token: &str,
    ) -> Result<Envelope<Vec<RemoteWishlistEntry>>, ApiError> {
        self.get("/wishlist", Some(token), &[]).await
    }

    /// `POST /wishlist`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn add_wishlist_item(
        &self,
        product_id: &ProductId,
        token: &str,
    ) -> Result<Envelope<Vec<RemoteWishlistEntry>>, ApiError> {
        let body = serde_json::json!({ "product_id": product_id });
        self.post("/wishlist", &body, Some(token)).await
    }

    /// `GET /wishlist/check/{productId}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn check_wishlist(
        &self,
        product_id: &ProductId,
        token: &str,
    ) -> Result<Envelope<WishlistCheck>, ApiError> {
        self.get(&format!("/wishlist/check/{product_id}"), Some(token), &[])
            .await
    }

    /// `DELETE /wishlist/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn remove_wishlist_item(
        &self,
        id: &ProductId,
        token: &str,
    ) -> Result<Envelope<Vec<RemoteWishlistEntry>>, ApiError> {
        self.delete(&format!("/wishlist/{id}"), Some(token)).await
    }

    /// `DELETE /wishlist`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip_all)]
    pub async fn clear_wishlist(
        &self,
        token: &str,
    ) -> Result<Envelope<Vec<RemoteWishlistEntry>>, ApiError> {
        self.delete("/wishlist", Some(token)).await
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// `GET /health`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip_all)]
    pub async fn health(&self) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.get("/health", None, &[]).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn envelope_tolerates_missing_optional_fields() {
        let env: Envelope<Vec<u32>> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(env.success);
        assert!(env.message.is_none());
        assert!(env.data.is_none());
    }

    #[test]
    fn ok_data_unwraps_success() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"success": true, "data": [1, 2]}"#).unwrap();
        assert_eq!(env.ok_data().unwrap(), vec![1, 2]);
    }

    #[test]
    fn ok_data_carries_the_rejection_message() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"success": false, "message": "out of stock"}"#).unwrap();
        match env.ok_data() {
            Err(ApiError::Rejected { message }) => assert_eq!(message, "out of stock"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn success_without_data_is_still_a_rejection() {
        let env: Envelope<Vec<u32>> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(env.ok_data(), Err(ApiError::Rejected { .. })));
    }
}
