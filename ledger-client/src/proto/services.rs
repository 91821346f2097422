//! Request and response messages of the v2 ledger services

use super::ledger::{
    ActiveContract, Commands, ParticipantOffset, Reassignment, Transaction, TransactionFilter,
};

/// `VersionService/GetLedgerApiVersion` request
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetLedgerApiVersionRequest {}

/// `VersionService/GetLedgerApiVersion` response
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetLedgerApiVersionResponse {
    /// Ledger API version string
    #[prost(string, tag = "1")]
    pub version: ::prost::alloc::string::String,
}

/// `StateService/GetLedgerEnd` request
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetLedgerEndRequest {}

/// `StateService/GetLedgerEnd` response
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetLedgerEndResponse {
    /// Current ledger end
    #[prost(message, optional, tag = "1")]
    pub offset: ::core::option::Option<ParticipantOffset>,
}

/// `StateService/GetActiveContracts` request
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetActiveContractsRequest {
    /// Which contracts to return
    #[prost(message, optional, tag = "1")]
    pub filter: ::core::option::Option<TransactionFilter>,
    /// Include labels in records
    #[prost(bool, tag = "2")]
    pub verbose: bool,
}

/// One message of the `StateService/GetActiveContracts` stream
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetActiveContractsResponse {
    /// Set on the trailing message that carries the snapshot offset
    #[prost(string, tag = "1")]
    pub offset: ::prost::alloc::string::String,
    /// Workflow id
    #[prost(string, tag = "2")]
    pub workflow_id: ::prost::alloc::string::String,
    /// The contract, if this message carries one
    #[prost(message, optional, tag = "3")]
    pub active_contract: ::core::option::Option<ActiveContract>,
}

/// `UpdateService/GetUpdates` request
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetUpdatesRequest {
    /// Exclusive lower bound
    #[prost(message, optional, tag = "1")]
    pub begin_exclusive: ::core::option::Option<ParticipantOffset>,
    /// Inclusive upper bound; unset streams indefinitely
    #[prost(message, optional, tag = "2")]
    pub end_inclusive: ::core::option::Option<ParticipantOffset>,
    /// Which events to return
    #[prost(message, optional, tag = "3")]
    pub filter: ::core::option::Option<TransactionFilter>,
    /// Include labels in records
    #[prost(bool, tag = "4")]
    pub verbose: bool,
}

/// One message of the `UpdateService/GetUpdates` stream
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetUpdatesResponse {
    /// Update kind
    #[prost(oneof = "get_updates_response::Update", tags = "1, 2")]
    pub update: ::core::option::Option<get_updates_response::Update>,
}

/// Nested types for [`GetUpdatesResponse`]
pub mod get_updates_response {
    /// Update kinds
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Update {
        /// A transaction
        #[prost(message, tag = "1")]
        Transaction(super::Transaction),
        /// A reassignment
        #[prost(message, tag = "2")]
        Reassignment(super::Reassignment),
    }
}

/// `CommandService/SubmitAndWaitForTransaction` request
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubmitAndWaitRequest {
    /// Commands to submit
    #[prost(message, optional, tag = "1")]
    pub commands: ::core::option::Option<Commands>,
}

/// `CommandService/SubmitAndWaitForTransaction` response
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubmitAndWaitForTransactionResponse {
    /// The resulting transaction
    #[prost(message, optional, tag = "1")]
    pub transaction: ::core::option::Option<Transaction>,
}

/// `PackageService/ListPackages` request
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListPackagesRequest {}

/// `PackageService/ListPackages` response
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListPackagesResponse {
    /// Known package ids
    #[prost(string, repeated, tag = "1")]
    pub package_ids: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

/// Party as known to the participant
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PartyDetails {
    /// Party identifier
    #[prost(string, tag = "1")]
    pub party: ::prost::alloc::string::String,
    /// Hosted by this participant
    #[prost(bool, tag = "3")]
    pub is_local: bool,
}

/// `PartyManagementService/ListKnownParties` request
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListKnownPartiesRequest {
    /// Continuation token from a previous page
    #[prost(string, tag = "2")]
    pub page_token: ::prost::alloc::string::String,
    /// Maximum page size, 0 for the server default
    #[prost(int32, tag = "3")]
    pub page_size: i32,
}

/// `PartyManagementService/ListKnownParties` response
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListKnownPartiesResponse {
    /// Parties on this page
    #[prost(message, repeated, tag = "1")]
    pub party_details: ::prost::alloc::vec::Vec<PartyDetails>,
    /// Empty on the last page
    #[prost(string, tag = "2")]
    pub next_page_token: ::prost::alloc::string::String,
}

/// `PartyManagementService/AllocateParty` request
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AllocatePartyRequest {
    /// Hint for the party identifier
    #[prost(string, tag = "1")]
    pub party_id_hint: ::prost::alloc::string::String,
}

/// `PartyManagementService/AllocateParty` response
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AllocatePartyResponse {
    /// The allocated party
    #[prost(message, optional, tag = "1")]
    pub party_details: ::core::option::Option<PartyDetails>,
}
