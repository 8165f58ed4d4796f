//! Core traits: the transport seam and the default failure outcome.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::{RestError, RestResult};
use crate::http::{HttpRequest, HttpResponse};

/// A boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Performs a single HTTP exchange.
///
/// Implementations send [`HttpRequest::full_url`] without re-encoding it,
/// and report transport failures (connection, timeout, TLS) as `Err`. Any
/// response that arrives, whatever its status, is `Ok`.
pub trait HttpExecutor: Send + Sync {
    /// Send the request and return the status code and raw body.
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, RestResult<HttpResponse>>;
}

impl<T: HttpExecutor + ?Sized> HttpExecutor for Arc<T> {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, RestResult<HttpResponse>> {
        (**self).execute(request)
    }
}

/// The value produced by the default failure handler.
///
/// Builders created by an [`Endpoint`](crate::Endpoint) install a failure
/// handler that ignores the response and returns
/// [`FailureDefault::internal_error`]. Result types that want a different
/// failure path attach one with `on_failure`.
pub trait FailureDefault {
    /// A generic internal-error value.
    fn internal_error() -> Self;
}

impl<T, E: From<RestError>> FailureDefault for Result<T, E> {
    fn internal_error() -> Self {
        Err(RestError::internal("request was not successful").into())
    }
}
