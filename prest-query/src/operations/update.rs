//! Update operation builder.

use serde_json::Value;

use crate::traits::{FailureDefault, HttpExecutor};

use super::OperationKind;
use super::request::{Filterable, RequestCore, RestOperation};

/// A `PATCH` request modifying the rows matched by its filters.
///
/// Dispatch is refused unless at least one filter was added with
/// [`where_`](Filterable::where_) or the request was widened with
/// [`all_rows`](Filterable::all_rows).
pub struct UpdateRequest<E, R> {
    core: RequestCore<E, R>,
}

impl<E: Clone, R> Clone for UpdateRequest<E, R> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<E, R> UpdateRequest<E, R>
where
    E: HttpExecutor + 'static,
    R: FailureDefault + Send + 'static,
{
    pub(crate) fn new(executor: E, url: &str, token: &str, body: Value) -> Self {
        let mut core = RequestCore::new(executor, OperationKind::Update, url, token);
        core.request_mut().body = Some(body);
        Self { core }
    }
}

impl<E, R> UpdateRequest<E, R>
where
    E: HttpExecutor + 'static,
    R: Send + 'static,
{
    /// Ask the server to return the updated rows.
    pub fn returning(mut self) -> Self {
        self.core.prefer("return=representation");
        self
    }
}

impl<E, R> RestOperation for UpdateRequest<E, R>
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

impl<E, R> Filterable for UpdateRequest<E, R>
where
    E: HttpExecutor + 'static,
    R: Send + 'static,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, RestError};
    use crate::http::{HttpMethod, HttpResponse};
    use crate::predicate::{eq, in_list};
    use crate::testing::MockExecutor;
    use serde_json::json;

    type Outcome = Result<u16, RestError>;

    fn update(mock: &MockExecutor) -> UpdateRequest<MockExecutor, Outcome> {
        UpdateRequest::new(mock.clone(), "http://api/users", "tok", json!({"active": false}))
    }

    async fn status(response: HttpResponse) -> Outcome {
        Ok(response.status)
    }

    #[tokio::test]
    async fn test_filtered_update() {
        let mock = MockExecutor::respond_with(204, "");
        let result = update(&mock)
            .where_([in_list("id", [1, 2, 3])])
            .on_success(status)
            .await
            .unwrap();
        assert_eq!(result.unwrap(), 204);

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Patch);
        assert_eq!(sent.query_string(), "id=in.(1,2,3)");
        assert_eq!(sent.body, Some(json!({"active": false})));
    }

    #[tokio::test]
    async fn test_unscoped_update_is_refused() {
        let mock = MockExecutor::respond_with(204, "");
        let err = update(&mock)
            .where_(Vec::new())
            .on_success(status)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UnscopedMutation);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_all_rows_update() {
        let mock = MockExecutor::respond_with(200, "[]");
        let result = update(&mock)
            .all_rows()
            .returning()
            .on_success(status)
            .await
            .unwrap();
        assert_eq!(result.unwrap(), 200);

        let sent = mock.last_request().unwrap();
        assert!(sent.query.is_empty());
        assert_eq!(sent.header("Prefer"), Some("return=representation"));
    }

    #[tokio::test]
    async fn test_update_failure_status() {
        let mock = MockExecutor::respond_with(400, "bad column");
        let result = update(&mock)
            .where_([eq("id", 1)])
            .on_success(status)
            .await
            .unwrap();
        assert!(result.unwrap_err().is_internal());
    }
}
