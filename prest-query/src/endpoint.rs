//! Endpoints: a resource URL plus the credentials used to reach it.

use std::fmt;

use serde_json::{Value, json};

use crate::http::Fields;
use crate::operations::{DeleteRequest, InsertRequest, SelectRequest, UpdateRequest};
use crate::traits::{FailureDefault, HttpExecutor};

/// A factory for requests against one resource.
///
/// Each method returns a fresh builder seeded with the resource URL and
/// an `Authorization: Bearer` header. The endpoint itself never changes.
///
/// # Example
///
/// ```rust,ignore
/// use prest_query::prelude::*;
///
/// let users = Endpoint::new(executor, "https://api.example.com/users", token);
///
/// let active: RestResult<Vec<User>> = users
///     .select()
///     .where_([eq("active", true)])
///     .on_success(|res| async move { res.json() })
///     .await?;
/// ```
#[derive(Clone)]
pub struct Endpoint<E> {
    executor: E,
    path: String,
    token: String,
}

impl<E> fmt::Debug for Endpoint<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("path", &self.path)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl<E> Endpoint<E>
where
    E: HttpExecutor + Clone + 'static,
{
    /// Create an endpoint for the resource at `path`.
    pub fn new(executor: E, path: impl Into<String>, token: impl Into<String>) -> Self {
        let path = path.into();
        crate::prest_debug!(path = %path, "endpoint created");
        Self {
            executor,
            path,
            token: token.into(),
        }
    }

    /// The resource URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The transport.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Read rows.
    pub fn select<R>(&self) -> SelectRequest<E, R>
    where
        R: FailureDefault + Send + 'static,
    {
        SelectRequest::new(self.executor.clone(), &self.path, &self.token)
    }

    /// Insert one row.
    pub fn insert<R>(&self, fields: Fields) -> InsertRequest<E, R>
    where
        R: FailureDefault + Send + 'static,
    {
        InsertRequest::new(
            self.executor.clone(),
            &self.path,
            &self.token,
            Value::Object(fields),
        )
    }

    /// Insert several rows in one request. The body is a JSON array.
    pub fn insert_bulk<R>(&self, rows: impl IntoIterator<Item = Fields>) -> InsertRequest<E, R>
    where
        R: FailureDefault + Send + 'static,
    {
        let rows = rows.into_iter().map(Value::Object).collect();
        InsertRequest::new(
            self.executor.clone(),
            &self.path,
            &self.token,
            Value::Array(rows),
        )
    }

    /// Modify rows.
    pub fn update<R>(&self, fields: Fields) -> UpdateRequest<E, R>
    where
        R: FailureDefault + Send + 'static,
    {
        UpdateRequest::new(
            self.executor.clone(),
            &self.path,
            &self.token,
            Value::Object(fields),
        )
    }

    /// Remove rows.
    pub fn delete<R>(&self) -> DeleteRequest<E, R>
    where
        R: FailureDefault + Send + 'static,
    {
        DeleteRequest::new(self.executor.clone(), &self.path, &self.token)
    }

    /// Soft-delete rows: an update setting `deleted` to `true`.
    pub fn logic_deletion<R>(&self) -> UpdateRequest<E, R>
    where
        R: FailureDefault + Send + 'static,
    {
        self.deleted_flag(true)
    }

    /// Restore soft-deleted rows: an update setting `deleted` to `false`.
    pub fn undo_logic_deletion<R>(&self) -> UpdateRequest<E, R>
    where
        R: FailureDefault + Send + 'static,
    {
        self.deleted_flag(false)
    }

    fn deleted_flag<R>(&self, deleted: bool) -> UpdateRequest<E, R>
    where
        R: FailureDefault + Send + 'static,
    {
        UpdateRequest::new(
            self.executor.clone(),
            &self.path,
            &self.token,
            json!({ "deleted": deleted }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, RestError};
    use crate::http::{HttpMethod, HttpResponse, to_fields};
    use crate::operations::{Filterable, RestOperation};
    use crate::predicate::eq;
    use crate::testing::MockExecutor;
    use pretty_assertions::assert_eq;

    type Outcome = Result<u16, RestError>;

    fn endpoint(mock: &MockExecutor) -> Endpoint<MockExecutor> {
        Endpoint::new(mock.clone(), "http://api/users", "secret-token")
    }

    async fn status(response: HttpResponse) -> Outcome {
        Ok(response.status)
    }

    #[test]
    fn test_debug_redacts_token() {
        let mock = MockExecutor::new();
        let rendered = format!("{:?}", endpoint(&mock));
        assert!(rendered.contains("http://api/users"));
        assert!(!rendered.contains("secret-token"));
    }

    #[test]
    fn test_builders_share_seed() {
        let mock = MockExecutor::new();
        let users = endpoint(&mock);

        let select = users.select::<Outcome>();
        let delete = users.delete::<Outcome>();
        for request in [select.request(), delete.request()] {
            assert_eq!(request.url, "http://api/users");
            assert_eq!(request.header("Authorization"), Some("Bearer secret-token"));
        }
        assert_eq!(select.request().method, HttpMethod::Get);
        assert_eq!(delete.request().method, HttpMethod::Delete);
    }

    #[test]
    fn test_insert_bodies() {
        let mock = MockExecutor::new();
        let users = endpoint(&mock);
        let ann = to_fields(&json!({"name": "ann"})).unwrap();
        let bob = to_fields(&json!({"name": "bob"})).unwrap();

        let single = users.insert::<Outcome>(ann.clone());
        assert_eq!(single.request().body, Some(json!({"name": "ann"})));

        let bulk = users.insert_bulk::<Outcome>([ann, bob]);
        assert_eq!(
            bulk.request().body,
            Some(json!([{"name": "ann"}, {"name": "bob"}]))
        );
    }

    #[tokio::test]
    async fn test_logic_deletion() {
        let mock = MockExecutor::respond_with(204, "");
        let users = endpoint(&mock);

        users
            .logic_deletion::<Outcome>()
            .where_([eq("id", 3)])
            .on_success(status)
            .await
            .unwrap()
            .unwrap();
        users
            .undo_logic_deletion::<Outcome>()
            .where_([eq("id", 3)])
            .on_success(status)
            .await
            .unwrap()
            .unwrap();

        let sent = mock.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].method, HttpMethod::Patch);
        assert_eq!(sent[0].body, Some(json!({"deleted": true})));
        assert_eq!(sent[1].body, Some(json!({"deleted": false})));
        assert_eq!(sent[1].query_string(), "id=eq.3");
    }

    #[tokio::test]
    async fn test_unscoped_logic_deletion_is_refused() {
        let mock = MockExecutor::new();
        let err = endpoint(&mock)
            .logic_deletion::<Outcome>()
            .on_success(status)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnscopedMutation);
        assert_eq!(mock.call_count(), 0);
    }
}
