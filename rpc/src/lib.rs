//! Rosetta API server of CKB.
//!
//! Every endpoint is a JSON `POST`. The service modules under [`module`] translate between the
//! Rosetta model and the node, [`ServiceBuilder`] wires the enabled ones into one router and
//! [`RpcServer`] serves it.
mod error;
pub mod module;
mod server;
mod service_builder;

#[cfg(test)]
mod tests;

pub use error::{RosettaJson, RpcError};
pub use server::RpcServer;
pub use service_builder::ServiceBuilder;
