//! Wire types for the backend REST API.
//!
//! Shapes here are bit-compatible with the backend's JSON. Open extension
//! fields are preserved via `#[serde(flatten)]` maps, matching the loose
//! payloads the backend actually sends.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ute_shop_core::{ProductId, User};

// =============================================================================
// Catalog resources
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: ProductId,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A product brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: ProductId,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query parameters for product listings.
///
/// Only populated fields are serialized onto the request URL.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Maximum number of products to return.
    pub limit: Option<u32>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Free-text search.
    pub search: Option<String>,
    /// Filter by category id or slug.
    pub category: Option<String>,
    /// Filter by brand id or slug.
    pub brand: Option<String>,
}

impl ProductQuery {
    /// A query asking for at most `limit` products.
    #[must_use]
    pub const fn limited(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            page: None,
            search: None,
            category: None,
            brand: None,
        }
    }

    /// The populated parameters as key/value pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(brand) = &self.brand {
            pairs.push(("brand", brand.clone()));
        }
        pairs
    }
}

// =============================================================================
// Auth payloads
// =============================================================================

/// Body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /auth/verify-otp`.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Body for `POST /auth/resend-otp`.
#[derive(Debug, Clone, Serialize)]
pub struct ResendOtpRequest {
    pub email: String,
}

/// Data returned by login and OTP verification.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Data returned by `GET /auth/profile`.
///
/// The backend sometimes nests the user under a `user` field and sometimes
/// returns the user object directly; both shapes normalize to a [`User`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileData {
    Nested { user: User },
    Bare(User),
}

impl ProfileData {
    /// The user, whichever shape it arrived in.
    #[must_use]
    pub fn into_user(self) -> User {
        match self {
            Self::Nested { user } | Self::Bare(user) => user,
        }
    }
}

// =============================================================================
// Remote cart / wishlist resources
// =============================================================================

/// A server-side cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteCartLine {
    /// Server-assigned line id.
    pub id: ProductId,
    /// The product the line refers to.
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A server-side wishlist entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteWishlistEntry {
    /// Server-assigned entry id.
    pub id: ProductId,
    /// The product the entry refers to.
    pub product_id: ProductId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Data returned by `GET /wishlist/check/{productId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct WishlistCheck {
    #[serde(rename = "isInWishlist", default)]
    pub is_in_wishlist: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn profile_data_normalizes_both_shapes() {
        let nested: ProfileData =
            serde_json::from_str(r#"{"user": {"id": 1, "email": "a@b.com", "name": "An"}}"#)
                .unwrap();
        let bare: ProfileData =
            serde_json::from_str(r#"{"id": 1, "email": "a@b.com", "name": "An"}"#).unwrap();

        assert_eq!(nested.into_user().id, bare.into_user().id);
    }

    #[test]
    fn product_query_serializes_only_populated_fields() {
        let query = ProductQuery {
            limit: Some(12),
            search: Some("tee".to_owned()),
            ..ProductQuery::default()
        };
        assert_eq!(
            query.pairs(),
            vec![("limit", "12".to_owned()), ("search", "tee".to_owned())]
        );
        assert!(ProductQuery::default().pairs().is_empty());
    }

    #[test]
    fn wishlist_check_defaults_to_false() {
        let check: WishlistCheck = serde_json::from_str("{}").unwrap();
        assert!(!check.is_in_wishlist);
    }
}
