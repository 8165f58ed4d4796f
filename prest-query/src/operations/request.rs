//! Shared request state and the capability traits every builder implements.

use std::future::Future;
use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::error::{RestError, RestResult};
use crate::filter::Query;
use crate::http::{HttpRequest, HttpResponse};
use crate::status::SuccessCodes;
use crate::traits::{BoxFuture, FailureDefault, HttpExecutor};

use super::OperationKind;

/// Handler invoked for responses outside the success set.
pub type FailureHandler<R> = Arc<dyn Fn(HttpResponse) -> BoxFuture<'static, R> + Send + Sync>;

/// The default failure handler: discard the response, return a generic
/// internal error.
pub(crate) fn default_failure<R>() -> FailureHandler<R>
where
    R: FailureDefault + Send + 'static,
{
    Arc::new(|_response| Box::pin(async { R::internal_error() }))
}

/// Which rows an update or delete may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowScope {
    /// Neither filtered nor opted into all rows.
    #[default]
    Unscoped,
    /// At least one filter was added.
    Filtered,
    /// The caller asked for every row.
    AllRows,
}

/// Configuration shared by all request builders.
pub struct RequestCore<E, R> {
    executor: E,
    kind: OperationKind,
    request: HttpRequest,
    success: SuccessCodes,
    on_failure: FailureHandler<R>,
    prefer: SmallVec<[&'static str; 2]>,
    scope: RowScope,
    debug: bool,
}

impl<E: Clone, R> Clone for RequestCore<E, R> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            kind: self.kind,
            request: self.request.clone(),
            success: self.success.clone(),
            on_failure: Arc::clone(&self.on_failure),
            prefer: self.prefer.clone(),
            scope: self.scope,
            debug: self.debug,
        }
    }
}

impl<E, R> RequestCore<E, R>
where
    E: HttpExecutor,
    R: Send + 'static,
{
    /// Create a core with the defaults of `kind`.
    pub(crate) fn new(executor: E, kind: OperationKind, url: &str, token: &str) -> Self
    where
        R: FailureDefault,
    {
        let mut request = HttpRequest::new(kind.method(), url);
        request.set_header("Authorization", format!("Bearer {}", token));

        Self {
            executor,
            kind,
            request,
            success: kind.default_success(),
            on_failure: default_failure(),
            prefer: SmallVec::new(),
            scope: RowScope::default(),
            debug: false,
        }
    }

    /// The operation kind.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// The request as it would be sent now.
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub(crate) fn request_mut(&mut self) -> &mut HttpRequest {
        &mut self.request
    }

    /// The current success set.
    pub fn success(&self) -> &SuccessCodes {
        &self.success
    }

    pub(crate) fn set_success(&mut self, codes: SuccessCodes) {
        self.success = codes;
    }

    /// The current row scope.
    pub fn scope(&self) -> RowScope {
        self.scope
    }

    /// Whether debug diagnostics are enabled.
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub(crate) fn set_failure(&mut self, handler: FailureHandler<R>) {
        self.on_failure = handler;
    }

    pub(crate) fn enable_debug(&mut self)
    where
        R: FailureDefault,
    {
        self.debug = true;
        self.on_failure = default_failure();
    }

    /// Add a `Prefer` directive; duplicates are ignored.
    pub(crate) fn prefer(&mut self, directive: &'static str) {
        if !self.prefer.contains(&directive) {
            self.prefer.push(directive);
        }
    }

    pub(crate) fn add_filters(&mut self, queries: impl IntoIterator<Item = Query>) {
        for query in queries {
            let (column, value) = query.into_param();
            self.request.push_query(column, value);
            if self.scope == RowScope::Unscoped {
                self.scope = RowScope::Filtered;
            }
        }
    }

    pub(crate) fn allow_all_rows(&mut self) {
        if self.scope == RowScope::Unscoped {
            self.scope = RowScope::AllRows;
        }
    }

    /// Perform the request and route the response.
    ///
    /// Exactly one HTTP call is made. Transport errors are returned as-is;
    /// any response is handed to the success handler when its status is in
    /// the success set and to the failure handler otherwise.
    pub(crate) async fn dispatch<F, Fut>(self, on_success: F) -> RestResult<R>
    where
        F: FnOnce(HttpResponse) -> Fut,
        Fut: Future<Output = R>,
    {
        let Self {
            executor,
            kind,
            mut request,
            success,
            on_failure,
            prefer,
            scope,
            debug,
        } = self;

        if kind.requires_scope() && scope == RowScope::Unscoped {
            let err = RestError::unscoped_mutation(request.method.as_str(), request.full_url());
            warn!(operation = kind.as_str(), url = %request.url, "refusing unscoped request");
            return Err(err);
        }

        if !prefer.is_empty() {
            request.set_header("Prefer", prefer.join(","));
        }

        let url = request.full_url();
        if debug {
            debug!(
                operation = kind.as_str(),
                method = %request.method,
                url = %url,
                body = ?request.body,
                "dispatching request"
            );
        } else {
            trace!(operation = kind.as_str(), url = %url, "dispatching request");
        }

        let response = executor.execute(request).await?;

        if success.contains(response.status) {
            trace!(status = response.status, "routing to success handler");
            Ok(on_success(response).await)
        } else {
            if debug {
                warn!(
                    operation = kind.as_str(),
                    url = %url,
                    status = response.status,
                    body = %response.body,
                    "request failed"
                );
            } else {
                trace!(status = response.status, "routing to failure handler");
            }
            Ok(on_failure(response).await)
        }
    }
}

/// Behavior shared by every request builder.
///
/// Configuration methods consume the builder and return the updated value;
/// builders are `Clone`, so an intermediate configuration can be kept and
/// reused for several requests.
pub trait RestOperation: Sized {
    /// Transport used to send the request.
    type Executor: HttpExecutor + 'static;
    /// Value produced by the success and failure handlers.
    type Output: Send + 'static;

    /// Shared request state.
    fn core(&self) -> &RequestCore<Self::Executor, Self::Output>;

    /// Mutable shared request state.
    fn core_mut(&mut self) -> &mut RequestCore<Self::Executor, Self::Output>;

    /// Consume the builder, keeping only the shared state.
    fn into_core(self) -> RequestCore<Self::Executor, Self::Output>;

    /// The request as it would be sent now.
    fn request(&self) -> &HttpRequest {
        self.core().request()
    }

    /// The current success set.
    fn success_codes(&self) -> &SuccessCodes {
        self.core().success()
    }

    /// Replace the success set entirely.
    ///
    /// The new set is not merged with the previous one: after
    /// `set_success([418])`, a `200` is routed to the failure handler.
    fn set_success(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.core_mut().set_success(SuccessCodes::new(codes));
        self
    }

    /// Handle responses outside the success set.
    fn on_failure<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(HttpResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Self::Output> + Send + 'static,
    {
        self.core_mut()
            .set_failure(Arc::new(move |response| Box::pin(handler(response))));
        self
    }

    /// Use the default failure handler and log the outgoing request and
    /// failed responses.
    ///
    /// Diagnostics only: the result on failure is the same generic internal
    /// error as without `debug`.
    fn debug(mut self) -> Self
    where
        Self::Output: FailureDefault,
    {
        self.core_mut().enable_debug();
        self
    }

    /// Execute the request, handling successful responses with `handler`.
    ///
    /// Consumes the builder; the returned future performs exactly one HTTP
    /// call.
    fn on_success<F, Fut>(self, handler: F) -> BoxFuture<'static, RestResult<Self::Output>>
    where
        F: FnOnce(HttpResponse) -> Fut + Send + 'static,
        Fut: Future<Output = Self::Output> + Send + 'static,
    {
        Box::pin(self.into_core().dispatch(handler))
    }
}

/// Builders whose target rows are narrowed by filters.
pub trait Filterable: RestOperation {
    /// Add filters. Every query becomes one query-string parameter, in
    /// order; PostgREST combines them with `AND`.
    fn where_(mut self, queries: impl IntoIterator<Item = Query>) -> Self {
        self.core_mut().add_filters(queries);
        self
    }

    /// Explicitly target every row of the resource.
    ///
    /// Updates and deletes without a filter are refused unless this was
    /// called. Selects never need it.
    fn all_rows(mut self) -> Self {
        self.core_mut().allow_all_rows();
        self
    }
}
