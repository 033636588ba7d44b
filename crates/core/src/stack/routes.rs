//! HTTP API route declarations.

use std::fmt;

use super::function::HandlerName;

/// HTTP methods used by the product API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binds one method and path to a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub method: HttpMethod,
    pub path: String,
    pub handler: HandlerName,
}

impl RouteSpec {
    pub fn new(method: HttpMethod, path: impl Into<String>, handler: HandlerName) -> Self {
        Self {
            method,
            path: path.into(),
            handler,
        }
    }
}

impl fmt::Display for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.method, self.path, self.handler)
    }
}

/// The HTTP API fronting the handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpApiSpec {
    pub api_name: String,
    pub routes: Vec<RouteSpec>,
}

/// Returns the canonical product API.
pub fn products_api() -> HttpApiSpec {
    HttpApiSpec {
        api_name: "ProductsApi".to_string(),
        routes: vec![
            RouteSpec::new(HttpMethod::Put, "/{id}", HandlerName::PutProduct),
            RouteSpec::new(HttpMethod::Get, "/{id}", HandlerName::GetProduct),
            RouteSpec::new(HttpMethod::Get, "/", HandlerName::GetAllProducts),
            RouteSpec::new(HttpMethod::Delete, "/{id}", HandlerName::DeleteProduct),
        ],
    }
}
