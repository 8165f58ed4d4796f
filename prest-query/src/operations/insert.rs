//! Insert operation builder.

use serde_json::Value;

use crate::traits::{FailureDefault, HttpExecutor};

use super::OperationKind;
use super::request::{RequestCore, RestOperation};

/// A `POST` request inserting one row or a batch.
///
/// A `409 Conflict` counts as success by default, so inserting a row that
/// already exists is silently ignored. Use
/// [`fail_if_already_exists`](Self::fail_if_already_exists) to route it to
/// the failure handler instead.
pub struct InsertRequest<E, R> {
    core: RequestCore<E, R>,
}

impl<E: Clone, R> Clone for InsertRequest<E, R> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<E, R> InsertRequest<E, R>
where
    E: HttpExecutor + 'static,
    R: FailureDefault + Send + 'static,
{
    pub(crate) fn new(executor: E, url: &str, token: &str, body: Value) -> Self {
        let mut core = RequestCore::new(executor, OperationKind::Insert, url, token);
        core.request_mut().body = Some(body);
        Self { core }
    }
}

impl<E, R> InsertRequest<E, R>
where
    E: HttpExecutor + 'static,
    R: Send + 'static,
{
    /// Treat `409 Conflict` as a failure.
    pub fn fail_if_already_exists(mut self) -> Self {
        let strict = self.core.success().without(409);
        self.core.set_success(strict);
        self
    }

    /// Upsert: rows whose primary key exists are updated in place.
    pub fn merge_duplicates(mut self) -> Self {
        self.core.prefer("resolution=merge-duplicates");
        self
    }

    /// Ask the server to return the inserted rows.
    pub fn returning(mut self) -> Self {
        self.core.prefer("return=representation");
        self
    }
}

impl<E, R> RestOperation for InsertRequest<E, R>
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
