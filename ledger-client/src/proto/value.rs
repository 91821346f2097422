//! `com.daml.ledger.api.v2` value messages

/// Encodes values that the ledger accepts as command arguments or includes
/// in events. Exactly one field of `sum` is set per instance.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Value {
    /// Populated tag
    #[prost(
        oneof = "value::Sum",
        tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16"
    )]
    pub sum: ::core::option::Option<value::Sum>,
}

/// Nested types for [`Value`]
pub mod value {
    /// The tagged union of wire values
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Sum {
        /// Unit value (`google.protobuf.Empty`)
        #[prost(message, tag = "1")]
        Unit(()),
        /// Boolean
        #[prost(bool, tag = "2")]
        Bool(bool),
        /// Signed 64-bit integer
        #[prost(sint64, tag = "3")]
        Int64(i64),
        /// Days since the unix epoch
        #[prost(int32, tag = "4")]
        Date(i32),
        /// Microseconds since the unix epoch, UTC
        #[prost(sfixed64, tag = "5")]
        Timestamp(i64),
        /// Decimal string, never binary floating point
        #[prost(string, tag = "6")]
        Numeric(::prost::alloc::string::String),
        /// Party identifier
        #[prost(string, tag = "7")]
        Party(::prost::alloc::string::String),
        /// UTF-8 text
        #[prost(string, tag = "8")]
        Text(::prost::alloc::string::String),
        /// Opaque contract identifier
        #[prost(string, tag = "9")]
        ContractId(::prost::alloc::string::String),
        /// Optional value (inner value absent means `None`)
        #[prost(message, tag = "10")]
        Optional(super::Optional),
        /// Homogeneous list
        #[prost(message, tag = "11")]
        List(super::List),
        /// Map keyed by text
        #[prost(message, tag = "12")]
        TextMap(super::TextMap),
        /// Map keyed by arbitrary values
        #[prost(message, tag = "13")]
        GenMap(super::GenMap),
        /// Record
        #[prost(message, tag = "14")]
        Record(super::Record),
        /// Variant
        #[prost(message, tag = "15")]
        Variant(super::Variant),
        /// Enum constructor
        #[prost(message, tag = "16")]
        Enum(super::Enum),
    }
}

/// Names a ledger-defined type
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Identifier {
    /// Package containing the type
    #[prost(string, tag = "1")]
    pub package_id: ::prost::alloc::string::String,
    /// Dot-separated module name
    #[prost(string, tag = "3")]
    pub module_name: ::prost::alloc::string::String,
    /// Dot-separated entity name
    #[prost(string, tag = "4")]
    pub entity_name: ::prost::alloc::string::String,
}

/// Record with optional type identifier and labelled fields
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Record {
    /// Type identifier (optional on submission)
    #[prost(message, optional, tag = "1")]
    pub record_id: ::core::option::Option<Identifier>,
    /// Fields in declaration order
    #[prost(message, repeated, tag = "2")]
    pub fields: ::prost::alloc::vec::Vec<RecordField>,
}

/// A single labelled record field
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RecordField {
    /// Field label
    #[prost(string, tag = "1")]
    pub label: ::prost::alloc::string::String,
    /// Field value
    #[prost(message, optional, tag = "2")]
    pub value: ::core::option::Option<Value>,
}

/// Variant constructor applied to a payload
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Variant {
    /// Type identifier (optional on submission)
    #[prost(message, optional, tag = "1")]
    pub variant_id: ::core::option::Option<Identifier>,
    /// Constructor name
    #[prost(string, tag = "2")]
    pub constructor: ::prost::alloc::string::String,
    /// Payload
    #[prost(message, optional, boxed, tag = "3")]
    pub value: ::core::option::Option<::prost::alloc::boxed::Box<Value>>,
}

/// Enum constructor without payload
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Enum {
    /// Type identifier (optional on submission)
    #[prost(message, optional, tag = "1")]
    pub enum_id: ::core::option::Option<Identifier>,
    /// Constructor name
    #[prost(string, tag = "2")]
    pub constructor: ::prost::alloc::string::String,
}

/// Ordered list of values
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct List {
    /// Elements
    #[prost(message, repeated, tag = "1")]
    pub elements: ::prost::alloc::vec::Vec<Value>,
}

/// Optional value; an absent inner value encodes `None`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Optional {
    /// Present value
    #[prost(message, optional, boxed, tag = "1")]
    pub value: ::core::option::Option<::prost::alloc::boxed::Box<Value>>,
}

/// Map keyed by text
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TextMap {
    /// Entries
    #[prost(message, repeated, tag = "1")]
    pub entries: ::prost::alloc::vec::Vec<text_map::Entry>,
}

/// Nested types for [`TextMap`]
pub mod text_map {
    /// A text map entry
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Entry {
        /// Key
        #[prost(string, tag = "1")]
        pub key: ::prost::alloc::string::String,
        /// Value
        #[prost(message, optional, tag = "2")]
        pub value: ::core::option::Option<super::Value>,
    }
}

/// Map keyed by arbitrary values, in insertion order
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GenMap {
    /// Entries
    #[prost(message, repeated, tag = "1")]
    pub entries: ::prost::alloc::vec::Vec<gen_map::Entry>,
}

/// Nested types for [`GenMap`]
pub mod gen_map {
    /// A generic map entry
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Entry {
        /// Key
        #[prost(message, optional, tag = "1")]
        pub key: ::core::option::Option<super::Value>,
        /// Value
        #[prost(message, optional, tag = "2")]
        pub value: ::core::option::Option<super::Value>,
    }
}
