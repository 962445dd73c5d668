use http::Method;
use std::fmt;

/// The closed set of methods the router keeps a route table for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RouteMethod {
    pub const ALL: [RouteMethod; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Maps an http method onto its route table, `None` for methods without one (HEAD, TRACE, ...)
    pub fn from_http(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Self::Get),
            Method::POST => Some(Self::Post),
            Method::PUT => Some(Self::Put),
            Method::PATCH => Some(Self::Patch),
            Method::DELETE => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RouteMethod> for Method {
    fn from(method: RouteMethod) -> Self {
        match method {
            RouteMethod::Get => Method::GET,
            RouteMethod::Post => Method::POST,
            RouteMethod::Put => Method::PUT,
            RouteMethod::Patch => Method::PATCH,
            RouteMethod::Delete => Method::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RouteMethod;
    use http::Method;

    #[test]
    fn test_from_http() {
        for method in RouteMethod::ALL {
            let http_method: Method = method.into();
            assert_eq!(RouteMethod::from_http(&http_method), Some(method));
            assert_eq!(http_method.as_str(), method.as_str());
        }

        assert_eq!(RouteMethod::from_http(&Method::HEAD), None);
        assert_eq!(RouteMethod::from_http(&Method::OPTIONS), None);
        assert_eq!(RouteMethod::from_http(&Method::TRACE), None);
    }
}
