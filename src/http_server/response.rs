//! # Response Formatting
//!
//! Payloads go out as bare JSON, or as `name(json)` when the client asks for
//! JSONP with `?callback=name` or `?jsonp=name`. The JSONP body keeps the JSON
//! content type; the header middleware stamps it on every response.
//!
//! Parameters never reject a request: a repeated key keeps its first value
//! and unrelated keys are ignored.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::errors::{ApiError, ApiResult};

/// JSONP query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonpParams {
    pub callback: Option<String>,
    pub jsonp: Option<String>,
}

impl JsonpParams {
    /// Read `callback` and `jsonp` from the query string of `uri`.
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();

        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "callback" => &mut params.callback,
                "jsonp" => &mut params.jsonp,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Function name to wrap the payload in. `callback` wins over `jsonp`;
    /// empty values count as absent.
    pub fn function_name(&self) -> Option<&str> {
        non_empty(&self.callback).or_else(|| non_empty(&self.jsonp))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for JsonpParams {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Encode `payload` as the 200 response body.
pub fn respond<T: Serialize>(payload: &T, params: &JsonpParams) -> ApiResult<Response> {
    let json = serde_json::to_string(payload).map_err(ApiError::serialization("response.encode"))?;

    let body = match params.function_name() {
        Some(name) => format!("{name}({json})"),
        None => json,
    };

    Ok((StatusCode::OK, body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tag;

    fn params(callback: Option<&str>, jsonp: Option<&str>) -> JsonpParams {
        JsonpParams {
            callback: callback.map(str::to_string),
            jsonp: jsonp.map(str::to_string),
        }
    }

    async fn body_of(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_from_uri_keeps_first_value() {
        let uri: Uri = "/v1/tags?callback=a&jsonp=x&callback=b&jsonp=y&other=1"
            .parse()
            .unwrap();
        assert_eq!(JsonpParams::from_uri(&uri), params(Some("a"), Some("x")));
    }

    #[test]
    fn test_from_uri_without_query() {
        let uri: Uri = "/v1/tags".parse().unwrap();
        assert_eq!(JsonpParams::from_uri(&uri), JsonpParams::default());

        let uri: Uri = "/v1/tags?callback=my%20fn".parse().unwrap();
        assert_eq!(JsonpParams::from_uri(&uri).function_name(), Some("my fn"));
    }

    #[test]
    fn test_function_name_precedence() {
        assert_eq!(params(None, None).function_name(), None);
        assert_eq!(params(Some("cb"), None).function_name(), Some("cb"));
        assert_eq!(params(None, Some("jp")).function_name(), Some("jp"));
        assert_eq!(params(Some("cb"), Some("jp")).function_name(), Some("cb"));
        assert_eq!(params(Some(""), Some("jp")).function_name(), Some("jp"));
        assert_eq!(params(Some(""), Some("")).function_name(), None);
    }

    #[tokio::test]
    async fn test_bare_json_body() {
        let tags = vec![Tag {
            id: 1,
            label: "go".to_string(),
        }];
        let response = respond(&tags, &JsonpParams::default()).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_of(response).await, r#"[{"id":1,"label":"go"}]"#);
    }

    #[tokio::test]
    async fn test_jsonp_body() {
        let tags: Vec<Tag> = vec![];
        let response = respond(&tags, &params(Some("foo"), Some("bar"))).unwrap();
        assert_eq!(body_of(response).await, "foo([])");
    }
}
