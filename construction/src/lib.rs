//! The transaction construction pipeline.
//!
//! Operations are checked by [`validate_operations`], inputs are grouped by lock script
//! ([`group_by_lock`]) and the unsigned transaction is assembled with a witness placeholder at the
//! first input of every group. Each group is signed once over the sighash-all digest
//! ([`sighash_all_message`]); the returned signatures are written back by [`combine`].
//!
//! Every step is a pure function of its arguments and the read-only [`ConstructionContext`]. The
//! steps are dispatched per lock family through the traits in [`factory`].
mod builder;
mod combiner;
mod context;
mod derive;
mod estimator;
pub mod factory;
mod lock_group;
mod parser;
mod signing;
mod validator;

#[cfg(test)]
mod tests;

pub use builder::{build_unsigned_tx, collect_cell_deps, placeholder_witness, SIGNATURE_SIZE};
pub use combiner::combine;
pub use context::ConstructionContext;
pub use derive::derive_account;
pub use estimator::{estimate_fee, estimate_tx_size};
pub use lock_group::{group_by_lock, LockGroup};
pub use parser::{parse_transaction, to_rosetta_transaction};
pub use signing::{build_signing_payloads, sighash_all_message};
pub use validator::{validate_operations, InputOperation, OutputOperation, ValidatedOperations};
