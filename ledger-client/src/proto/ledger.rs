//! `com.daml.ledger.api.v2` commands, events, transactions and filters

use super::value::{Identifier, Record, Value};

/// A batch of commands submitted atomically
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Commands {
    /// Workflow correlation id
    #[prost(string, tag = "1")]
    pub workflow_id: ::prost::alloc::string::String,
    /// Submitting application
    #[prost(string, tag = "2")]
    pub application_id: ::prost::alloc::string::String,
    /// Unique command id, used for deduplication
    #[prost(string, tag = "3")]
    pub command_id: ::prost::alloc::string::String,
    /// Commands to execute
    #[prost(message, repeated, tag = "4")]
    pub commands: ::prost::alloc::vec::Vec<Command>,
    /// Deduplication window
    #[prost(oneof = "commands::DeduplicationPeriod", tags = "5, 6")]
    pub deduplication_period: ::core::option::Option<commands::DeduplicationPeriod>,
    /// Parties on whose behalf the commands act
    #[prost(string, repeated, tag = "9")]
    pub act_as: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Additional readers
    #[prost(string, repeated, tag = "10")]
    pub read_as: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Submission id
    #[prost(string, tag = "11")]
    pub submission_id: ::prost::alloc::string::String,
    /// Explicitly disclosed contracts
    #[prost(message, repeated, tag = "12")]
    pub disclosed_contracts: ::prost::alloc::vec::Vec<DisclosedContract>,
}

/// Nested types for [`Commands`]
pub mod commands {
    /// How far back the ledger looks for duplicate command ids
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum DeduplicationPeriod {
        /// Relative duration
        #[prost(message, tag = "5")]
        DeduplicationDuration(::prost_types::Duration),
        /// Absolute offset
        #[prost(string, tag = "6")]
        DeduplicationOffset(::prost::alloc::string::String),
    }
}

/// A single ledger command
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Command {
    /// Command kind
    #[prost(oneof = "command::Command", tags = "1, 2, 3")]
    pub command: ::core::option::Option<command::Command>,
}

/// Nested types for [`Command`]
pub mod command {
    /// Command kinds
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Command {
        /// Create a contract
        #[prost(message, tag = "1")]
        Create(super::CreateCommand),
        /// Exercise a choice on an existing contract
        #[prost(message, tag = "2")]
        Exercise(super::ExerciseCommand),
        /// Create a contract and exercise a choice on it
        #[prost(message, tag = "3")]
        CreateAndExercise(super::CreateAndExerciseCommand),
    }
}

/// Create a contract
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateCommand {
    /// Template to instantiate
    #[prost(message, optional, tag = "1")]
    pub template_id: ::core::option::Option<Identifier>,
    /// Template arguments
    #[prost(message, optional, tag = "2")]
    pub create_arguments: ::core::option::Option<Record>,
}

/// Exercise a choice on an existing contract
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExerciseCommand {
    /// Template of the target contract
    #[prost(message, optional, tag = "1")]
    pub template_id: ::core::option::Option<Identifier>,
    /// Target contract
    #[prost(string, tag = "2")]
    pub contract_id: ::prost::alloc::string::String,
    /// Choice name
    #[prost(string, tag = "3")]
    pub choice: ::prost::alloc::string::String,
    /// Choice argument
    #[prost(message, optional, tag = "4")]
    pub choice_argument: ::core::option::Option<Value>,
}

/// Create a contract and exercise a choice on it in one transaction
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateAndExerciseCommand {
    /// Template to instantiate
    #[prost(message, optional, tag = "1")]
    pub template_id: ::core::option::Option<Identifier>,
    /// Template arguments
    #[prost(message, optional, tag = "2")]
    pub create_arguments: ::core::option::Option<Record>,
    /// Choice name
    #[prost(string, tag = "3")]
    pub choice: ::prost::alloc::string::String,
    /// Choice argument
    #[prost(message, optional, tag = "4")]
    pub choice_argument: ::core::option::Option<Value>,
}

/// A contract disclosed to the submitter out of band
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DisclosedContract {
    /// Template of the contract
    #[prost(message, optional, tag = "1")]
    pub template_id: ::core::option::Option<Identifier>,
    /// Contract id
    #[prost(string, tag = "2")]
    pub contract_id: ::prost::alloc::string::String,
    /// Opaque blob from the created event
    #[prost(bytes = "vec", tag = "3")]
    pub created_event_blob: ::prost::alloc::vec::Vec<u8>,
}

/// A ledger event
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Event {
    /// Event kind
    #[prost(oneof = "event::Event", tags = "1, 2")]
    pub event: ::core::option::Option<event::Event>,
}

/// Nested types for [`Event`]
pub mod event {
    /// Event kinds in a flat transaction
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Event {
        /// Contract created
        #[prost(message, tag = "1")]
        Created(super::CreatedEvent),
        /// Contract archived
        #[prost(message, tag = "2")]
        Archived(super::ArchivedEvent),
    }
}

/// A contract was created
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreatedEvent {
    /// Offset of the enclosing update
    #[prost(string, tag = "1")]
    pub offset: ::prost::alloc::string::String,
    /// Node id within the transaction
    #[prost(int32, tag = "2")]
    pub node_id: i32,
    /// Created contract
    #[prost(string, tag = "3")]
    pub contract_id: ::prost::alloc::string::String,
    /// Template of the contract
    #[prost(message, optional, tag = "4")]
    pub template_id: ::core::option::Option<Identifier>,
    /// Contract key, if the template has one
    #[prost(message, optional, tag = "5")]
    pub contract_key: ::core::option::Option<Value>,
    /// Template arguments
    #[prost(message, optional, tag = "6")]
    pub create_arguments: ::core::option::Option<Record>,
    /// Opaque blob usable for explicit disclosure
    #[prost(bytes = "vec", tag = "7")]
    pub created_event_blob: ::prost::alloc::vec::Vec<u8>,
    /// Interface views (kept opaque)
    #[prost(message, repeated, tag = "8")]
    pub interface_views: ::prost::alloc::vec::Vec<InterfaceView>,
    /// Parties notified of the event
    #[prost(string, repeated, tag = "9")]
    pub witness_parties: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Signatories
    #[prost(string, repeated, tag = "10")]
    pub signatories: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Observers
    #[prost(string, repeated, tag = "11")]
    pub observers: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Ledger effective time of the create
    #[prost(message, optional, tag = "12")]
    pub created_at: ::core::option::Option<::prost_types::Timestamp>,
    /// Package name of the template
    #[prost(string, tag = "13")]
    pub package_name: ::prost::alloc::string::String,
}

/// Interface view computed for a created contract
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InterfaceView {
    /// Interface
    #[prost(message, optional, tag = "1")]
    pub interface_id: ::core::option::Option<Identifier>,
    /// View value
    #[prost(message, optional, tag = "3")]
    pub view_value: ::core::option::Option<Record>,
}

/// A contract was archived
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ArchivedEvent {
    /// Offset of the enclosing update
    #[prost(string, tag = "1")]
    pub offset: ::prost::alloc::string::String,
    /// Node id within the transaction
    #[prost(int32, tag = "2")]
    pub node_id: i32,
    /// Archived contract
    #[prost(string, tag = "3")]
    pub contract_id: ::prost::alloc::string::String,
    /// Template of the contract
    #[prost(message, optional, tag = "4")]
    pub template_id: ::core::option::Option<Identifier>,
    /// Parties notified of the event
    #[prost(string, repeated, tag = "5")]
    pub witness_parties: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Package name of the template
    #[prost(string, tag = "6")]
    pub package_name: ::prost::alloc::string::String,
}

/// A committed transaction, flat event form
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transaction {
    /// Update id
    #[prost(string, tag = "1")]
    pub update_id: ::prost::alloc::string::String,
    /// Command id (only visible to the submitter)
    #[prost(string, tag = "2")]
    pub command_id: ::prost::alloc::string::String,
    /// Workflow id
    #[prost(string, tag = "3")]
    pub workflow_id: ::prost::alloc::string::String,
    /// Ledger effective time
    #[prost(message, optional, tag = "4")]
    pub effective_at: ::core::option::Option<::prost_types::Timestamp>,
    /// Events in the transaction
    #[prost(message, repeated, tag = "5")]
    pub events: ::prost::alloc::vec::Vec<Event>,
    /// Absolute offset of the transaction
    #[prost(string, tag = "6")]
    pub offset: ::prost::alloc::string::String,
    /// Synchronizer the transaction was committed on
    #[prost(string, tag = "7")]
    pub domain_id: ::prost::alloc::string::String,
}

/// A contract moved between synchronizers
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Reassignment {
    /// Update id
    #[prost(string, tag = "1")]
    pub update_id: ::prost::alloc::string::String,
    /// Command id
    #[prost(string, tag = "2")]
    pub command_id: ::prost::alloc::string::String,
    /// Workflow id
    #[prost(string, tag = "3")]
    pub workflow_id: ::prost::alloc::string::String,
    /// Absolute offset of the reassignment
    #[prost(string, tag = "4")]
    pub offset: ::prost::alloc::string::String,
}

/// A contract active as of a snapshot
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ActiveContract {
    /// The create that brought the contract into existence
    #[prost(message, optional, tag = "1")]
    pub created_event: ::core::option::Option<CreatedEvent>,
    /// Synchronizer the contract is assigned to
    #[prost(string, tag = "2")]
    pub domain_id: ::prost::alloc::string::String,
    /// Number of reassignments so far
    #[prost(uint64, tag = "3")]
    pub reassignment_counter: u64,
}

/// Position in the ledger's update log, absolute or a boundary
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ParticipantOffset {
    /// Offset kind
    #[prost(oneof = "participant_offset::Value", tags = "1, 2")]
    pub value: ::core::option::Option<participant_offset::Value>,
}

/// Nested types for [`ParticipantOffset`]
pub mod participant_offset {
    /// Well-known boundaries of the update log
    #[derive(
        Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
    )]
    #[repr(i32)]
    pub enum ParticipantBoundary {
        /// Before the first update
        ParticipantBegin = 0,
        /// After the last update at request time
        ParticipantEnd = 1,
    }

    /// Offset kinds
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        /// Absolute offset string
        #[prost(string, tag = "1")]
        Absolute(::prost::alloc::string::String),
        /// Boundary
        #[prost(enumeration = "ParticipantBoundary", tag = "2")]
        Boundary(i32),
    }
}

/// Selects which events a party sees
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionFilter {
    /// Filters per reading party
    #[prost(map = "string, message", tag = "1")]
    pub filters_by_party:
        ::std::collections::HashMap<::prost::alloc::string::String, Filters>,
}

/// Union of cumulative filters
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Filters {
    /// Filters, combined inclusively
    #[prost(message, repeated, tag = "1")]
    pub cumulative: ::prost::alloc::vec::Vec<CumulativeFilter>,
}

/// A single template or wildcard filter
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CumulativeFilter {
    /// Filter kind
    #[prost(oneof = "cumulative_filter::IdentifierFilter", tags = "1, 3")]
    pub identifier_filter: ::core::option::Option<cumulative_filter::IdentifierFilter>,
}

/// Nested types for [`CumulativeFilter`]
pub mod cumulative_filter {
    /// Filter kinds
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum IdentifierFilter {
        /// All templates
        #[prost(message, tag = "1")]
        WildcardFilter(super::WildcardFilter),
        /// One template
        #[prost(message, tag = "3")]
        TemplateFilter(super::TemplateFilter),
    }
}

/// Matches all templates
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WildcardFilter {
    /// Include the created event blob
    #[prost(bool, tag = "1")]
    pub include_created_event_blob: bool,
}

/// Matches one template
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TemplateFilter {
    /// Template
    #[prost(message, optional, tag = "1")]
    pub template_id: ::core::option::Option<Identifier>,
    /// Include the created event blob
    #[prost(bool, tag = "2")]
    pub include_created_event_blob: bool,
}
