//! Request descriptors: one planned HTTP call before execution.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// HTTP method for a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of work for the batch executor.
///
/// Immutable once constructed. A descriptor carries no identity of its own: it
/// is identified by its position in the input sequence, and the executor
/// guarantees the outcome lands at that same index.
#[derive(Debug, Clone, Serialize)]
pub struct RequestDescriptor {
    /// Resource path relative to the API base URL, e.g. `/users/PXXXXXX`.
    pub endpoint: String,
    pub method: Method,
    pub params: HashMap<String, String>,
    /// JSON request body, absent for GET/DELETE style calls.
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            params: HashMap::new(),
            body: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Put, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Delete, endpoint)
    }

    /// Add a single query parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Replace the full query-parameter map.
    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_builders() {
        let d = RequestDescriptor::put("/users/U1")
            .with_param("from", "admin@example.com")
            .with_body(json!({"user": {"id": "U1", "role": "observer"}}));

        assert_eq!(d.method, Method::Put);
        assert_eq!(d.endpoint, "/users/U1");
        assert_eq!(d.params.get("from").map(String::as_str), Some("admin@example.com"));
        assert!(d.body.is_some());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
