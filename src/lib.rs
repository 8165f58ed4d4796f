//! # Prest
//!
//! Typed request builders for PostgREST-style REST-over-SQL APIs.
//!
//! Prest provides:
//! - A predicate algebra (`eq`, `in_list`, `and`, `not`, ...) whose output is
//!   always escaped
//! - One builder per operation, configured by value and executed once
//! - Routing of every response to a success or failure handler by status
//! - A reqwest transport (default `reqwest` feature)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use prest::prelude::*;
//! use prest::ReqwestExecutor;
//!
//! #[derive(serde::Deserialize)]
//! struct Todo {
//!     id: i64,
//!     task: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     prest::logging::init();
//!
//!     let executor = ReqwestExecutor::from_env()?;
//!     let todos = executor.endpoint("todos", std::env::var("JWT")?)?;
//!
//!     let open: RestResult<Vec<Todo>> = todos
//!         .select()
//!         .columns(["id", "task"])
//!         .where_([eq("done", false)])
//!         .order("id", SortOrder::Asc)
//!         .on_success(|res| async move { res.json() })
//!         .await?;
//!
//!     todos
//!         .logic_deletion::<RestResult<()>>()
//!         .where_([in_list("id", [1, 2, 3])])
//!         .on_success(|_| async { Ok(()) })
//!         .await??;
//!
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub use prest_query::*;

/// reqwest transport.
#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod transport {
    pub use prest_reqwest::*;
}

#[cfg(feature = "reqwest")]
pub use prest_reqwest::{HttpError, ReqwestConfig, ReqwestExecutor};
