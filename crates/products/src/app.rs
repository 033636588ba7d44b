use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::{on, MethodFilter, MethodRouter},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use products_core::stack::{HandlerName, HttpMethod, RouteSpec};

use crate::{
    handlers::error::ApiError,
    handlers::products::{
        delete_product, get_product, list_products, method_not_allowed, not_found, put_product,
    },
    state::AppState,
};

/// Create the application router from the declared routes.
///
/// Only the handlers named by `routes` are mounted, so a process can serve a
/// single handler or all of them.
pub fn create_app(state: AppState, routes: &[&RouteSpec], request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // Routes sharing a path are merged into one method router.
    let mut by_path: BTreeMap<&str, MethodRouter<AppState>> = BTreeMap::new();
    for route in routes {
        let method_router = handler_route(route);
        let merged = match by_path.remove(route.path.as_str()) {
            Some(existing) => existing.merge(method_router),
            None => method_router,
        };
        by_path.insert(route.path.as_str(), merged);
    }

    let router = by_path
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            router.route(path, method_router)
        });

    router
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(map_response(json_timeout))
        .with_state(state)
}

/// Gives the timeout layer's empty 408 the same JSON body as every other error.
async fn json_timeout(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        return ApiError::new(StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response();
    }
    response
}

fn handler_route(route: &RouteSpec) -> MethodRouter<AppState> {
    let filter = method_filter(route.method);
    match route.handler {
        HandlerName::PutProduct => on(filter, put_product),
        HandlerName::GetProduct => on(filter, get_product),
        HandlerName::GetAllProducts => on(filter, list_products),
        HandlerName::DeleteProduct => on(filter, delete_product),
    }
}

fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Put => MethodFilter::PUT,
        HttpMethod::Delete => MethodFilter::DELETE,
    }
}
