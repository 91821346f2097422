//! Ledger Client
//!
//! Client for a participant's ledger API: submits commands, reads active
//! contracts and transaction streams, and manages parties.
//!
//! # Architecture
//!
//! - **Value Codec**: Pure mapping between native values and the wire value union
//! - **Retry Executor**: Bounded attempts, classified by transport status code
//! - **Ledger Session**: Open/close lifecycle around one transport
//!
//! # Invariants
//!
//! - Tuples of arity 1..=20 travel as `DA.Types:TupleN` records and decode back to tuples
//! - Numerics travel as fixed-precision decimal text, never binary floating point
//! - A retried submission keeps its command id
//! - Only the allow-listed status codes are ever retried

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod metrics;
pub mod proto;
pub mod retry;
pub mod session;
pub mod transport;
pub mod types;
pub mod value;

// Re-exports
pub use codec::{decode, encode, numeric, reltime, Codec, Decode};
pub use commands::{
    create_contract, create_contract_and_exercise, exercise_contract_choice, IntoList,
    SubmitOptions,
};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use events::{disclosure, ActiveContract, ArchivedEvent, CreatedEvent, Event, Transaction};
pub use metrics::RetryMetrics;
pub use retry::{RetryConfig, RetryPolicy, RetryableCodes};
pub use session::LedgerSession;
pub use transport::{Connect, GrpcConnector, GrpcTransport, LedgerTransport};
pub use types::{ContractId, Identifier, Offset, Package, Party, PartyDetails};
pub use value::{Record, Value};
