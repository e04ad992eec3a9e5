//! Newtype IDs for type-safe entity references.
//!
//! The upstream API is loose about id types: the same entity may arrive as
//! the JSON number `5` in one payload and the string `"5"` in another. Ids
//! defined here canonicalize both to a single string representation at the
//! boundary, so membership tests everywhere else are plain structural
//! equality instead of coercive comparison.

/// Macro to define a type-safe, string-canonical ID wrapper.
///
/// Creates a newtype wrapper around `String` that:
/// - deserializes from a JSON string *or* number (integers are
///   canonicalized by their decimal rendering, so `5` equals `"5"`)
/// - always serializes as a string
/// - derives `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Ord`
///
/// # Example
///
/// ```rust
/// use ute_shop_core::ProductId;
///
/// let a: ProductId = serde_json::from_str("5").unwrap();
/// let b: ProductId = serde_json::from_str("\"5\"").unwrap();
/// assert_eq!(a, b);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an id from anything displayable (numeric ids included).
            #[must_use]
            pub fn new(id: impl ::core::fmt::Display) -> Self {
                Self(id.to_string())
            }

            /// Returns the canonical string form.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the id and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id.to_string())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                #[derive(::serde::Deserialize)]
                #[serde(untagged)]
                enum Raw {
                    Int(i64),
                    Str(String),
                }

                Ok(match Raw::deserialize(deserializer)? {
                    Raw::Int(n) => Self(n.to_string()),
                    Raw::Str(s) => Self(s),
                })
            }
        }
    };
}

// Standard entity ids
define_id!(ProductId);
define_id!(UserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_forms_are_equal() {
        let from_number: ProductId = serde_json::from_str("5").unwrap();
        let from_string: ProductId = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(from_number, from_string, "5 and \"5\" must canonicalize");
        assert_eq!(from_number, ProductId::from(5));
    }

    #[test]
    fn serializes_as_string() {
        let id = ProductId::from(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }

    #[test]
    fn non_numeric_ids_pass_through() {
        let id: ProductId = serde_json::from_str("\"sku-00xy\"").unwrap();
        assert_eq!(id.as_str(), "sku-00xy");
    }

    #[test]
    fn distinct_id_types_exist() {
        // UserId and ProductId are different types; this asserts the macro
        // expands both without collision.
        let user: UserId = serde_json::from_str("\"u-1\"").unwrap();
        assert_eq!(user.as_str(), "u-1");
    }
}
