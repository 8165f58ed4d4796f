//! # prest-reqwest
//!
//! [`reqwest`] transport for the Prest request builders.
//!
//! ```rust,no_run
//! use prest_query::prelude::*;
//! use prest_reqwest::ReqwestExecutor;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = ReqwestExecutor::from_url("http://localhost:3000")?;
//! let todos = executor.endpoint("todos", "my-jwt")?;
//!
//! let open: RestResult<Vec<serde_json::Value>> = todos
//!     .select()
//!     .where_([eq("done", false)])
//!     .on_success(|res| async move { res.json() })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! [`ReqwestConfig::from_env`] reads:
//!
//! - `PREST_URL` - API base URL (required)
//! - `PREST_TIMEOUT_MS` - Request timeout
//! - `PREST_CONNECT_TIMEOUT_MS` - Connection timeout
//! - `PREST_USER_AGENT` - User agent

pub mod config;
pub mod env;
pub mod error;
pub mod executor;

pub use config::{ReqwestConfig, ReqwestConfigBuilder};
pub use env::{EnvSource, MapEnvSource, StdEnvSource};
pub use error::{HttpError, HttpResult};
pub use executor::ReqwestExecutor;
