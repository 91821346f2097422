//! Native value model
//!
//! [`Value`] is the host-side counterpart of the wire value union. It is what
//! [`crate::codec::decode`] produces and what command builders accept.
//!
//! Two asymmetries with the wire form:
//!
//! - Records whose type is one of the well-known `DA.Types:TupleN` types are
//!   represented as [`Value::Tuple`], not as records with `_1.._N` labels.
//! - Decoding drops record, variant and enum type identifiers.

use crate::types::{ContractId, Identifier, Party};
use crate::{proto, Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::str::FromStr;

/// Native ledger value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Unit
    Unit,
    /// Boolean
    Bool(bool),
    /// Signed 64-bit integer
    Int64(i64),
    /// Arbitrary-precision decimal
    Numeric(BigDecimal),
    /// Text
    Text(String),
    /// UTC timestamp, microsecond resolution on the wire
    Timestamp(DateTime<Utc>),
    /// Calendar date
    Date(NaiveDate),
    /// Party
    Party(Party),
    /// Contract id
    ContractId(ContractId),
    /// Optional value
    Optional(Option<Box<Value>>),
    /// Ordered list
    List(Vec<Value>),
    /// Map keyed by text
    TextMap(IndexMap<String, Value>),
    /// Map keyed by arbitrary values
    Map(GenMap),
    /// Labelled record
    Record(Record),
    /// Positional tuple, encoded as a `DA.Types:TupleN` record
    Tuple(Vec<Value>),
    /// Variant constructor with payload
    Variant(Variant),
    /// Enum constructor
    Enum(EnumValue),
    /// Already-encoded wire value, passed through unchanged on encode
    #[serde(skip_serializing)]
    Wire(proto::Value),
}

impl Value {
    /// Absent optional
    pub fn none() -> Self {
        Value::Optional(None)
    }

    /// Present optional
    pub fn some(value: impl Into<Value>) -> Self {
        Value::Optional(Some(Box::new(value.into())))
    }

    /// Text, if this is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Party, if this is one
    pub fn as_party(&self) -> Option<&Party> {
        match self {
            Value::Party(party) => Some(party),
            _ => None,
        }
    }

    /// Record, if this is one
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Whether this is an absent optional
    pub fn is_none(&self) -> bool {
        matches!(self, Value::Optional(None))
    }
}

/// Labelled record fields with an optional type identifier
///
/// Field order is the emission order on the wire; equality ignores it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// Type identifier, sent on encode and dropped on decode
    pub id: Option<Identifier>,
    /// Fields by label
    pub fields: IndexMap<String, Value>,
}

impl Record {
    /// Create empty record without type identifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty record tagged with `id`
    pub fn with_id(id: Identifier) -> Self {
        Self {
            id: Some(id),
            fields: IndexMap::new(),
        }
    }

    /// Append a field (builder style); a repeated label replaces the value
    pub fn field(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(label.into(), value.into());
        self
    }

    /// Insert a field, returning the previous value for the label
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(label.into(), value.into())
    }

    /// Look up a field
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.fields.get(label)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            id: None,
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Map keyed by arbitrary values
///
/// Entries keep insertion order so the wire order is stable; equality is
/// order-insensitive.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct GenMap {
    entries: Vec<(Value, Value)>,
}

impl GenMap {
    /// Create empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous value for the key
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Look up a key
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for GenMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).map_or(false, |ov| ov == v))
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for GenMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = GenMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Variant constructor applied to a payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    /// Type identifier, sent on encode and dropped on decode
    #[serde(skip)]
    pub id: Option<Identifier>,
    /// Constructor name
    pub constructor: String,
    /// Payload
    pub value: Box<Value>,
}

/// Enum constructor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    /// Type identifier, sent on encode and dropped on decode
    #[serde(skip)]
    pub id: Option<Identifier>,
    /// Constructor name
    pub constructor: String,
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int64(v.into())
    }
}

impl TryFrom<u64> for Value {
    type Error = Error;

    fn try_from(v: u64) -> Result<Self> {
        i64::try_from(v)
            .map(Value::Int64)
            .map_err(|_| Error::unsupported_type(&v, "integer exceeds int64 range"))
    }
}

impl TryFrom<f64> for Value {
    type Error = Error;

    /// Floats become numerics formatted at the default precision
    fn try_from(v: f64) -> Result<Self> {
        let text = crate::codec::format_float(v, crate::codec::DEFAULT_NUMERIC_PRECISION)?;
        BigDecimal::from_str(&text)
            .map(Value::Numeric)
            .map_err(|e| Error::unsupported_type(&v, e.to_string()))
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::Numeric(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Numeric(big_decimal(v))
    }
}

/// Exact conversion of a fixed-precision decimal
pub fn big_decimal(v: Decimal) -> BigDecimal {
    BigDecimal::new(BigInt::from(v.mantissa()), i64::from(v.scale()))
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<Party> for Value {
    fn from(v: Party) -> Self {
        Value::Party(v)
    }
}

impl From<ContractId> for Value {
    fn from(v: ContractId) -> Self {
        Value::ContractId(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl From<GenMap> for Value {
    fn from(v: GenMap) -> Self {
        Value::Map(v)
    }
}

impl From<Variant> for Value {
    fn from(v: Variant) -> Self {
        Value::Variant(v)
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Value::Enum(v)
    }
}

impl From<proto::Value> for Value {
    fn from(v: proto::Value) -> Self {
        Value::Wire(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Value::Optional(v.map(|inner| Box::new(inner.into())))
    }
}

/// Party value
pub fn party(id: impl Into<String>) -> Value {
    Value::Party(Party::new(id))
}

/// Contract id value
pub fn contract_id(id: impl Into<String>) -> Value {
    Value::ContractId(ContractId::new(id))
}

/// Optional value; `None` stays an explicit absent optional on the wire
pub fn optional<T: Into<Value>>(value: Option<T>) -> Value {
    value.into()
}

/// Positional tuple
pub fn tuple(values: impl IntoIterator<Item = Value>) -> Value {
    Value::Tuple(values.into_iter().collect())
}

/// Record without type identifier, fields in iteration order
pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Record {
    fields.into_iter().collect()
}

/// Record tagged with `id`, fields in iteration order
pub fn record_with_id<K: Into<String>>(
    id: Identifier,
    fields: impl IntoIterator<Item = (K, Value)>,
) -> Record {
    Record {
        id: Some(id),
        ..record(fields)
    }
}

/// Variant value
pub fn variant(id: Identifier, constructor: impl Into<String>, value: impl Into<Value>) -> Value {
    Value::Variant(Variant {
        id: Some(id),
        constructor: constructor.into(),
        value: Box::new(value.into()),
    })
}
