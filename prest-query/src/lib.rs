//! # prest-query
//!
//! Typed request builders for PostgREST-style APIs.
//!
//! This crate provides:
//! - Escaping of caller-supplied column names and values
//! - A predicate algebra rendering filters to query-string fragments
//! - One builder per operation (`select`, `insert`, `update`, `delete`)
//! - Status-code routing to success and failure handlers
//! - The [`HttpExecutor`] seam a transport implements
//!
//! ## Filters
//!
//! ```rust
//! use prest_query::predicate::{and, eq, in_list, is, not, or};
//!
//! let q = eq("owner", 1);
//! assert_eq!(q.to_string(), "owner=eq.1");
//!
//! let q = or([eq("role", "admin"), and([eq("role", "staff"), is("verified", Some(true))])]);
//! assert_eq!(q.to_string(), "or=(role.eq.admin,and(role.eq.staff,verified.is.true))");
//!
//! let q = not(in_list("status", ["archived", "deleted"]));
//! assert_eq!(q.to_string(), "status=not.in.(archived,deleted)");
//! ```
//!
//! Values are escaped, so delimiters inside data cannot change the shape of
//! a filter:
//!
//! ```rust
//! use prest_query::predicate::eq;
//!
//! assert_eq!(eq("name", "a,b").value(), "eq.a%2Cb");
//! ```
//!
//! ## Requests
//!
//! ```rust
//! use prest_query::prelude::*;
//! use prest_query::testing::MockExecutor;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mock = MockExecutor::respond_with(200, r#"{"id":1,"name":"ann"}"#);
//! let users = Endpoint::new(mock.clone(), "http://localhost:3000/users", "token");
//!
//! let row: RestResult<serde_json::Value> = users
//!     .select()
//!     .columns(["id", "name"])
//!     .where_([eq("owner", 1)])
//!     .singular()
//!     .on_success(|res| async move { res.json() })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(row.unwrap()["name"], "ann");
//! assert_eq!(
//!     mock.last_request().unwrap().full_url(),
//!     "http://localhost:3000/users?select=id,name&owner=eq.1"
//! );
//! # }
//! ```

#[macro_use]
pub mod macros;

pub mod endpoint;
pub mod error;
pub mod escape;
pub mod filter;
pub mod http;
pub mod logging;
pub mod operations;
pub mod predicate;
pub mod status;
pub mod testing;
pub mod traits;

pub use endpoint::Endpoint;
pub use error::{ErrorCode, ErrorContext, RestError, RestResult};
pub use escape::{escape, unescape};
pub use filter::{Comparison, FilterValue, Operator, Predicate, Query};
pub use http::{Fields, HttpMethod, HttpRequest, HttpResponse, to_fields};
pub use operations::{
    DeleteRequest, FailureHandler, Filterable, InsertRequest, OperationKind, RequestCore,
    RestOperation, RowScope, SelectRequest, SortOrder, UpdateRequest,
};
pub use status::SuccessCodes;
pub use traits::{BoxFuture, FailureDefault, HttpExecutor};

// Re-export logging helpers
pub use logging::{LogFormat, is_debug_enabled};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::endpoint::Endpoint;
    pub use crate::error::{RestError, RestResult};
    pub use crate::filter::{FilterValue, Query};
    pub use crate::http::{Fields, HttpResponse, to_fields};
    pub use crate::operations::{Filterable, RestOperation, SortOrder};
    pub use crate::predicate::{
        and, eq, gt, gte, ilike, in_list, is, like, lt, lte, neq, not, or,
    };
    pub use crate::traits::{FailureDefault, HttpExecutor};
}
