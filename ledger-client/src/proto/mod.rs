//! Wire messages of the ledger API v2
//!
//! Mirrors the `com.daml.ledger.api.v2` protobuf packages. Only the messages
//! and fields this client reads or writes are declared; prost skips unknown
//! fields on decode, so newer servers remain readable.

#![allow(missing_docs)]

pub mod ledger;
pub mod services;
pub mod value;

pub use ledger::*;
pub use services::*;
pub use value::{
    gen_map, text_map, Enum, GenMap, Identifier, List, Optional, Record, RecordField, TextMap,
    Value, Variant,
};

/// Fully-qualified gRPC method paths
pub mod paths {
    /// `VersionService/GetLedgerApiVersion`
    pub const GET_LEDGER_API_VERSION: &str =
        "/com.daml.ledger.api.v2.VersionService/GetLedgerApiVersion";
    /// `StateService/GetLedgerEnd`
    pub const GET_LEDGER_END: &str = "/com.daml.ledger.api.v2.StateService/GetLedgerEnd";
    /// `StateService/GetActiveContracts`
    pub const GET_ACTIVE_CONTRACTS: &str =
        "/com.daml.ledger.api.v2.StateService/GetActiveContracts";
    /// `UpdateService/GetUpdates`
    pub const GET_UPDATES: &str = "/com.daml.ledger.api.v2.UpdateService/GetUpdates";
    /// `CommandService/SubmitAndWaitForTransaction`
    pub const SUBMIT_AND_WAIT_FOR_TRANSACTION: &str =
        "/com.daml.ledger.api.v2.CommandService/SubmitAndWaitForTransaction";
    /// `PackageService/ListPackages`
    pub const LIST_PACKAGES: &str = "/com.daml.ledger.api.v2.PackageService/ListPackages";
    /// `admin.PartyManagementService/ListKnownParties`
    pub const LIST_KNOWN_PARTIES: &str =
        "/com.daml.ledger.api.v2.admin.PartyManagementService/ListKnownParties";
    /// `admin.PartyManagementService/AllocateParty`
    pub const ALLOCATE_PARTY: &str =
        "/com.daml.ledger.api.v2.admin.PartyManagementService/AllocateParty";
}
