//! Request head handed to handlers, middleware and the not-found policy.
//!
//! The body is split off before dispatch and travels separately as a
//! [`BodyReader`](crate::BodyReader), so a `RequestHead` is cheap to share behind an `Arc`.

use http::request::Parts;
use http::{HeaderMap, Method, Uri, Version};

/// Method, target and headers of an inbound request
#[derive(Debug, Clone)]
pub struct RequestHead {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
}

impl RequestHead {
    pub fn new(method: Method, uri: Uri, version: Version, headers: HeaderMap) -> Self {
        Self { method, uri, version, headers }
    }

    /// Returns the HTTP method of the request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the URI of the request
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the HTTP version of the request
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the HTTP headers of the request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The request target as sent by the client: path plus query, empty when absent
    pub fn url(&self) -> &str {
        self.uri.path_and_query().map_or("", |pq| pq.as_str())
    }

    /// The route lookup key: the request target with the query string stripped
    pub fn path(&self) -> &str {
        self.uri.path_and_query().map_or("", |pq| pq.path())
    }

    /// Returns the query string without the leading `?`
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }
}

impl From<Parts> for RequestHead {
    fn from(parts: Parts) -> Self {
        Self { method: parts.method, uri: parts.uri, version: parts.version, headers: parts.headers }
    }
}

#[cfg(test)]
mod tests {
    use super::RequestHead;
    use http::{Method, Request, Uri};

    fn head(uri: &str) -> RequestHead {
        Request::builder().method(Method::GET).uri(uri).body(()).unwrap().into_parts().0.into()
    }

    #[test]
    fn test_path_strips_query() {
        let head = head("/hello?name=world&x=1");
        assert_eq!(head.path(), "/hello");
        assert_eq!(head.url(), "/hello?name=world&x=1");
        assert_eq!(head.query(), Some("name=world&x=1"));
    }

    #[test]
    fn test_path_without_query() {
        let head = head("/api/users");
        assert_eq!(head.path(), "/api/users");
        assert_eq!(head.url(), "/api/users");
        assert_eq!(head.query(), None);
    }

    #[test]
    fn test_absent_target_is_empty() {
        let head = RequestHead::new(
            Method::GET,
            Uri::from_static("example.com:80"),
            http::Version::HTTP_11,
            http::HeaderMap::new(),
        );
        assert_eq!(head.path(), "");
        assert_eq!(head.url(), "");
    }
}
