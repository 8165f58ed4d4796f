//! Request builders for the fluent API.
//!
//! This module provides one builder per operation:
//! - `SelectRequest` - Read rows (`GET`)
//! - `InsertRequest` - Insert one row or a batch (`POST`)
//! - `UpdateRequest` - Modify matching rows (`PATCH`)
//! - `DeleteRequest` - Remove matching rows (`DELETE`)
//!
//! Shared behavior (success set, failure handler, execution) lives on the
//! [`RestOperation`] trait; filter accumulation on [`Filterable`].

mod delete;
mod insert;
mod request;
mod select;
mod update;

pub use delete::DeleteRequest;
pub use insert::InsertRequest;
pub use request::{FailureHandler, Filterable, RequestCore, RestOperation, RowScope};
pub use select::{SelectRequest, SortOrder};
pub use update::UpdateRequest;

use crate::http::HttpMethod;
use crate::status::SuccessCodes;

/// The four request kinds and their fixed defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Read rows.
    Select,
    /// Insert rows.
    Insert,
    /// Update rows.
    Update,
    /// Delete rows.
    Delete,
}

impl OperationKind {
    /// HTTP method used by this kind.
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Select => HttpMethod::Get,
            Self::Insert => HttpMethod::Post,
            Self::Update => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Status codes treated as success until `set_success` replaces them.
    pub fn default_success(&self) -> SuccessCodes {
        match self {
            Self::Select => SuccessCodes::from([200]),
            // PostgREST answers inserts with 201; 200 is kept for servers
            // that reply with a representation, 409 so duplicates are ignored.
            Self::Insert => SuccessCodes::from([200, 201, 409]),
            Self::Update => SuccessCodes::from([200, 204]),
            Self::Delete => SuccessCodes::from([200, 202, 204]),
        }
    }

    /// Whether dispatch requires a filter or an explicit all-rows opt-in.
    pub fn requires_scope(&self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }

    /// Lowercase name, used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}
