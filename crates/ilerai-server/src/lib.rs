//! Delivery layer for IlerAI PHC: composition root, HTTP endpoint and
//! logging bootstrap shared by the `ilerai` binary and its tests.

pub mod bootstrap;
pub mod http;
pub mod logging;

pub use bootstrap::{Overrides, Runtime};
pub use http::router;
