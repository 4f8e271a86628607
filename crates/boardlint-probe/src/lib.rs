//! # boardlint-probe — Live Endpoint Probing
//!
//! Checks that the backend serving a widget registry is running and that
//! every widget endpoint answers with a payload of the shape its widget
//! type renders.
//!
//! Probing is async (reqwest) but strictly sequential: one request in
//! flight at a time, each with a bounded timeout and no retry. The caller
//! owns the runtime.
//!
//! ## Modules
//!
//! - [`config`]: [`ProbeConfig`], from the environment or built directly.
//! - [`shape`]: the expected response shape per widget type.
//! - [`prober`]: [`EndpointProber`] and the [`ProbeReport`] it produces.

pub mod config;
pub mod prober;
pub mod shape;

pub use config::{ConfigError, ProbeConfig, DEFAULT_BASE_URL};
pub use prober::{EndpointProber, ProbeError, ProbeFailure, ProbeOutcome, ProbeReport};
pub use shape::ResponseShape;
