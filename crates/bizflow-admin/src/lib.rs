//! BizFlow store administration
//!
//! View models for the admin screens on top of [`bizflow_client`] and the
//! [`bizflow_query`] cache, plus catalog export. The `bizflow-admin` binary
//! drives them from the command line.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::significant_drop_tightening,
    clippy::future_not_send
)]

pub mod app;
pub mod error;
pub mod export;
pub mod gate;
pub mod messages;
pub mod shell;
pub mod state;
pub mod views;

pub use app::App;
pub use error::{ExportError, ViewError, ViewResult};
pub use gate::{AuthGate, GateDecision, Gated};
pub use shell::{MENU, MenuItem, Route, Shell};
pub use state::ScreenState;
