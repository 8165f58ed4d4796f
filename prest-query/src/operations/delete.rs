//! Delete operation builder.

use crate::traits::{FailureDefault, HttpExecutor};

use super::OperationKind;
use super::request::{Filterable, RequestCore, RestOperation};

/// A `DELETE` request removing the rows matched by its filters.
///
/// Like updates, deletes must be scoped with a filter or
/// [`all_rows`](Filterable::all_rows) before they are sent.
pub struct DeleteRequest<E, R> {
    core: RequestCore<E, R>,
}

impl<E: Clone, R> Clone for DeleteRequest<E, R> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<E, R> DeleteRequest<E, R>
where
    E: HttpExecutor + 'static,
    R: FailureDefault + Send + 'static,
{
    pub(crate) fn new(executor: E, url: &str, token: &str) -> Self {
        Self {
            core: RequestCore::new(executor, OperationKind::Delete, url, token),
        }
    }
}

impl<E, R> DeleteRequest<E, R>
where
    E: HttpExecutor + 'static,
    R: Send + 'static,
{
    /// Ask the server to return the deleted rows.
    pub fn returning(mut self) -> Self {
        self.core.prefer("return=representation");
        self
    }
}

impl<E, R> RestOperation for DeleteRequest<E, R>
where
    E: HttpExecutor + 'static,
    R: Send + 'static,
{
    type Executor = E;
    type Output = R;

    fn core(&self) -> &RequestCore<E, R> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut RequestCore<E, R> {
        &mut self.core
    }

    fn into_core(self) -> RequestCore<E, R> {
        self.core
    }
}

impl<E, R> Filterable for DeleteRequest<E, R>
where
    E: HttpExecutor + 'static,
    R: Send + 'static,
{
}
