//! Client-side query cache for BizFlow resources
//!
//! Queries are keyed by resource name, fetched at most once at a time, and
//! refreshed only through explicit invalidation. Mutations wait for the
//! server, then invalidate and refetch the keys they affect before returning,
//! so a caller never observes pre-mutation data after a mutation resolves.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::significant_drop_tightening,
    clippy::future_not_send
)]

pub mod cache;
pub mod error;
pub mod key;
pub mod query;

pub use cache::QueryClient;
pub use error::{QueryError, QueryResult};
pub use key::QueryKey;
pub use query::{Query, QueryState, QueryStatus};
