//! Select operation builder.

use std::fmt;

use crate::escape::escape;
use crate::traits::{FailureDefault, HttpExecutor};

use super::OperationKind;
use super::request::{Filterable, RequestCore, RestOperation};

/// `Accept` value asking PostgREST for a single JSON object.
pub const SINGULAR_ACCEPT: &str = "application/vnd.pgrst.object+json";

/// Sort direction for [`SelectRequest::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Wire suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `GET` request reading rows.
///
/// # Example
///
/// ```rust,ignore
/// let rows = endpoint
///     .select()
///     .columns(["id", "name"])
///     .where_([eq("owner", 1)])
///     .on_success(|res| async move { res.json::<Vec<User>>() })
///     .await?;
/// ```
pub struct SelectRequest<E, R> {
    core: RequestCore<E, R>,
    columns: Vec<String>,
    singular: bool,
    order: Vec<(String, SortOrder)>,
}

impl<E: Clone, R> Clone for SelectRequest<E, R> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            columns: self.columns.clone(),
            singular: self.singular,
            order: self.order.clone(),
        }
    }
}

impl<E, R> SelectRequest<E, R>
where
    E: HttpExecutor + 'static,
    R: FailureDefault + Send + 'static,
{
    pub(crate) fn new(executor: E, url: &str, token: &str) -> Self {
        Self {
            core: RequestCore::new(executor, OperationKind::Select, url, token),
            columns: Vec::new(),
            singular: false,
            order: Vec::new(),
        }
    }
}

impl<E, R> SelectRequest<E, R>
where
    E: HttpExecutor + 'static,
    R: Send + 'static,
{
    /// Restrict the returned columns.
    ///
    /// Sent as the first query parameter, `select=c1,c2`. Calling it again
    /// replaces the previous list; an empty list drops the parameter.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.columns = columns.into_iter().map(|c| c.as_ref().to_string()).collect();

        let encoded: Vec<String> = self.columns.iter().map(|c| escape(c)).collect();
        let query = &mut self.core.request_mut().query;
        query.retain(|(key, _)| key != "select");
        if !encoded.is_empty() {
            query.insert(0, ("select".to_string(), encoded.join(",")));
        }
        self
    }

    /// Ask for a single object rather than an array.
    pub fn singular(mut self) -> Self {
        self.singular = true;
        self.core
            .request_mut()
            .set_header("Accept", SINGULAR_ACCEPT);
        self
    }

    /// Add a sort key. Keys apply in the order they were added.
    pub fn order(mut self, column: &str, direction: SortOrder) -> Self {
        self.order.push((column.to_string(), direction));

        let value: Vec<String> = self
            .order
            .iter()
            .map(|(column, direction)| format!("{}.{}", escape(column), direction))
            .collect();
        self.set_param("order", value.join(","));
        self
    }

    /// Return at most `n` rows.
    pub fn limit(mut self, n: u64) -> Self {
        self.set_param("limit", n.to_string());
        self
    }

    /// Skip the first `n` rows.
    pub fn offset(mut self, n: u64) -> Self {
        self.set_param("offset", n.to_string());
        self
    }

    /// Selected columns, in order.
    pub fn selected_columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether singular mode is on.
    pub fn is_singular(&self) -> bool {
        self.singular
    }

    fn set_param(&mut self, key: &str, value: String) {
        let query = &mut self.core.request_mut().query;
        match query.iter_mut().find(|(existing, _)| existing == key) {
            Some(entry) => entry.1 = value,
            None => query.push((key.to_string(), value)),
        }
    }
}

impl<E, R> RestOperation for SelectRequest<E, R>
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

impl<E, R> Filterable for SelectRequest<E, R>
where
    E: HttpExecutor + 'static,
    R: Send + 'static,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestError;
    use crate::http::HttpResponse;
    use crate::predicate::{eq, gt};
    use crate::testing::MockExecutor;
    use pretty_assertions::assert_eq;

    type Outcome = Result<String, RestError>;

    fn select(mock: &MockExecutor) -> SelectRequest<MockExecutor, Outcome> {
        SelectRequest::new(mock.clone(), "http://api/users", "tok")
    }

    async fn body(response: HttpResponse) -> Outcome {
        Ok(response.body)
    }

    #[test]
    fn test_columns_first_param() {
        let mock = MockExecutor::new();
        let request = select(&mock)
            .where_([eq("owner", 1)])
            .columns(["id", "name"])
            .singular();

        assert_eq!(request.request().query_string(), "select=id,name&owner=eq.1");
        assert_eq!(request.request().header("Accept"), Some(SINGULAR_ACCEPT));
        assert!(request.is_singular());
    }

    #[test]
    fn test_columns_replaces_previous() {
        let mock = MockExecutor::new();
        let request = select(&mock).columns(["id"]).columns(["name", "a,b"]);

        assert_eq!(request.request().query_string(), "select=name,a%2Cb");
        assert_eq!(request.request().query_value("select"), Some("name,a%2Cb"));
        assert_eq!(request.selected_columns(), &["name", "a,b"]);
    }

    #[test]
    fn test_empty_columns_drop_select() {
        let mock = MockExecutor::new();
        let request = select(&mock)
            .columns(["id"])
            .where_([eq("id", 1)])
            .columns(Vec::<&str>::new());

        assert_eq!(request.request().query_value("select"), None);
        assert_eq!(request.request().query_string(), "id=eq.1");
        assert!(request.selected_columns().is_empty());
    }

    #[test]
    fn test_order_limit_offset() {
        let mock = MockExecutor::new();
        let request = select(&mock)
            .where_([gt("age", 18)])
            .order("name", SortOrder::Asc)
            .limit(10)
            .order("age", SortOrder::Desc)
            .offset(20)
            .limit(5);

        assert_eq!(
            request.request().query_string(),
            "age=gt.18&order=name.asc,age.desc&limit=5&offset=20"
        );
        assert_eq!(request.request().query_value("limit"), Some("5"));
    }

    #[test]
    fn test_clone_branches() {
        let mock = MockExecutor::new();
        let base = select(&mock).columns(["id"]);
        let narrowed = base.clone().where_([eq("id", 7)]);

        assert_eq!(base.request().query_string(), "select=id");
        assert_eq!(narrowed.request().query_string(), "select=id&id=eq.7");
    }

    #[tokio::test]
    async fn test_select_without_filters_sends_no_predicates() {
        let mock = MockExecutor::respond_with(200, "[]");
        let result = select(&mock).on_success(body).await.unwrap();

        assert_eq!(result.unwrap(), "[]");
        let sent = mock.last_request().unwrap();
        assert!(sent.query.is_empty());
        assert_eq!(sent.full_url(), "http://api/users");
    }

    #[tokio::test]
    async fn test_set_success_replaces() {
        let mock = MockExecutor::respond_with(200, "[]");
        let result = select(&mock)
            .set_success([418])
            .on_success(body)
            .await
            .unwrap();

        assert!(result.unwrap_err().is_internal());
    }

    #[tokio::test]
    async fn test_custom_failure_handler() {
        let mock = MockExecutor::respond_with(404, "missing");
        let result = select(&mock)
            .on_failure(|response| async move { Ok(format!("fallback {}", response.status)) })
            .on_success(body)
            .await
            .unwrap();

        assert_eq!(result.unwrap(), "fallback 404");
    }
}
