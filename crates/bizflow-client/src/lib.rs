//! Typed HTTP client for the BizFlow backend
//!
//! [`HttpClient`] injects the bearer token from a shared [`Session`] and maps
//! proxy-style paths onto the backend. The [`services`] module wraps each REST
//! operation in a typed method, and [`AuthProvider`] owns every change to the
//! session.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::significant_drop_tightening,
    clippy::unnecessary_literal_bound,
    clippy::future_not_send
)]

pub mod auth;
pub mod error;
pub mod http;
pub mod services;
pub mod session;

pub use auth::AuthProvider;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use http::HttpClient;
pub use services::{Ack, Assistant, Listing, Services};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore, Tokens};
