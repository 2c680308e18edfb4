//! Request description consumed by [`ApiClient`](super::ApiClient)
//!
//! An [`ApiRequest`] is plain data: verb, path relative to the management
//! API root, query pairs, extra headers and a body. The dispatcher turns it
//! into an HTTP request and attaches the bearer token.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;

/// Body of an outgoing request
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `multipart/form-data` with a single file part
    Multipart { field: String, file_name: String, bytes: Vec<u8> },
    /// Bytes sent as-is with the given content type
    Raw { content_type: String, bytes: Vec<u8> },
}

/// A management API call, before authentication
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(super) method: Method,
    pub(super) path: String,
    pub(super) query: Vec<(String, String)>,
    pub(super) headers: HeaderMap,
    pub(super) body: RequestBody,
}

impl ApiRequest {
    /// `path` is relative to the base URL, e.g. `v1/o/acme/apis`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter. Values are form-encoded when sent.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set a header. An `Authorization` header set here is replaced by the
    /// bearer token when the request is sent.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn form<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.body = RequestBody::Form(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    #[must_use]
    pub fn multipart_file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.body =
            RequestBody::Multipart { field: field.into(), file_name: file_name.into(), bytes };
        self
    }

    #[must_use]
    pub fn raw(mut self, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.body = RequestBody::Raw { content_type: content_type.into(), bytes };
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::CONTENT_TYPE;
    use serde_json::json;

    use super::*;

    #[test]
    fn builder_collects_parts() {
        let request = ApiRequest::post("v1/o/acme/apis")
            .query("action", "import")
            .query("validate", true)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"))
            .json(json!({"name": "orders"}));

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.path(), "v1/o/acme/apis");
        assert_eq!(
            request.query_pairs(),
            &[("action".to_string(), "import".to_string()), ("validate".to_string(), "true".to_string())]
        );
        assert_eq!(request.headers()[CONTENT_TYPE], "application/octet-stream");
        assert_eq!(request.body(), &RequestBody::Json(json!({"name": "orders"})));
    }

    #[test]
    fn later_body_replaces_earlier() {
        let request = ApiRequest::post("x").json(json!({})).form([("command", "install")]);
        assert_eq!(
            request.body(),
            &RequestBody::Form(vec![("command".to_string(), "install".to_string())])
        );
    }
}
