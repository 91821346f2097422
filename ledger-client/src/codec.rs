//! Value codec
//!
//! Bidirectional mapping between native [`Value`]s and the wire value union.
//! Pure and stateless: encode dispatches statically over the native enum,
//! decode matches on the populated wire tag.
//!
//! # Conventions
//!
//! - Tuples of arity 1..=20 travel as records typed `DA.Types:TupleN` with
//!   positional labels `_1.._N`, and come back as tuples.
//! - Numerics always travel as decimal text with a fixed number of
//!   fractional digits (10 unless configured otherwise).
//! - An absent optional is an explicit `Optional` with no inner value.

use crate::types::Identifier;
use crate::value::{EnumValue, GenMap, Record, Value, Variant};
use crate::{proto, Error, Result};
use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, Duration, NaiveDate};
use indexmap::IndexMap;
use proto::value::value::Sum;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Fractional digits used when encoding numerics
pub const DEFAULT_NUMERIC_PRECISION: u32 = 10;

/// Package holding the `DA.Types` tuple types
pub const DA_TYPES_PACKAGE_ID: &str =
    "5aee9b21b8e9a4c4975b5f4c4198e6e6e8469df49e2010820e792f393db870f4";

/// Module holding the tuple types
pub const DA_TYPES_MODULE: &str = "DA.Types";

/// Package holding `DA.Time.Types:RelTime`
pub const DA_TIME_TYPES_PACKAGE_ID: &str =
    "b70db8369e1c461d5c70f1c86f526a29e9776c655e6ffc2560f95b05ccb8b946";

/// Largest tuple arity with a well-known type
pub const MAX_TUPLE_ARITY: usize = 20;

/// Encode-side configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    numeric_precision: u32,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            numeric_precision: DEFAULT_NUMERIC_PRECISION,
        }
    }
}

impl Codec {
    /// Create codec emitting `numeric_precision` fractional digits
    pub fn new(numeric_precision: u32) -> Self {
        Self { numeric_precision }
    }

    /// Fractional digits emitted for numerics
    pub fn numeric_precision(&self) -> u32 {
        self.numeric_precision
    }

    /// Encode a native value
    pub fn encode(&self, value: &Value) -> Result<proto::Value> {
        let sum = match value {
            Value::Wire(wire) => return Ok(wire.clone()),
            Value::Unit => Sum::Unit(()),
            Value::Bool(b) => Sum::Bool(*b),
            Value::Int64(i) => Sum::Int64(*i),
            Value::Numeric(d) => Sum::Numeric(format_decimal(d, self.numeric_precision)),
            Value::Text(text) => Sum::Text(text.clone()),
            Value::Timestamp(ts) => Sum::Timestamp(ts.timestamp_micros()),
            Value::Date(date) => Sum::Date(days_since_epoch(date)?),
            Value::Party(party) => Sum::Party(party.as_str().to_string()),
            Value::ContractId(cid) => Sum::ContractId(cid.as_str().to_string()),
            Value::Optional(inner) => Sum::Optional(proto::Optional {
                value: match inner {
                    Some(v) => Some(Box::new(self.encode(v)?)),
                    None => None,
                },
            }),
            Value::List(elements) => Sum::List(proto::List {
                elements: elements
                    .iter()
                    .map(|e| self.encode(e))
                    .collect::<Result<_>>()?,
            }),
            Value::TextMap(map) => Sum::TextMap(proto::TextMap {
                entries: map
                    .iter()
                    .map(|(k, v)| {
                        Ok(proto::text_map::Entry {
                            key: k.clone(),
                            value: Some(self.encode(v)?),
                        })
                    })
                    .collect::<Result<_>>()?,
            }),
            Value::Map(map) => Sum::GenMap(self.encode_genmap(map)?),
            Value::Record(record) => Sum::Record(self.encode_record(record)?),
            Value::Tuple(values) => Sum::Record(self.encode_tuple(values)?),
            Value::Variant(variant) => Sum::Variant(proto::Variant {
                variant_id: variant.id.as_ref().map(Identifier::to_proto),
                constructor: variant.constructor.clone(),
                value: Some(Box::new(self.encode(&variant.value)?)),
            }),
            Value::Enum(e) => Sum::Enum(proto::Enum {
                enum_id: e.id.as_ref().map(Identifier::to_proto),
                constructor: e.constructor.clone(),
            }),
        };

        Ok(proto::Value { sum: Some(sum) })
    }

    /// Encode a record; fields are emitted in insertion order
    pub fn encode_record(&self, record: &Record) -> Result<proto::Record> {
        let fields = record
            .fields
            .iter()
            .map(|(label, value)| {
                Ok(proto::RecordField {
                    label: label.clone(),
                    value: Some(self.encode(value)?),
                })
            })
            .collect::<Result<_>>()?;

        Ok(proto::Record {
            record_id: record.id.as_ref().map(Identifier::to_proto),
            fields,
        })
    }

    fn encode_tuple(&self, values: &[Value]) -> Result<proto::Record> {
        let record_id = tuple_id(values.len())?;

        let fields = values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                Ok(proto::RecordField {
                    label: format!("_{}", index + 1),
                    value: Some(self.encode(value)?),
                })
            })
            .collect::<Result<_>>()?;

        Ok(proto::Record {
            record_id: Some(record_id.to_proto()),
            fields,
        })
    }

    fn encode_genmap(&self, map: &GenMap) -> Result<proto::GenMap> {
        let entries = map
            .iter()
            .map(|(k, v)| {
                Ok(proto::gen_map::Entry {
                    key: Some(self.encode(k)?),
                    value: Some(self.encode(v)?),
                })
            })
            .collect::<Result<_>>()?;

        Ok(proto::GenMap { entries })
    }
}

/// Encode with the default codec
pub fn encode(value: &Value) -> Result<proto::Value> {
    Codec::default().encode(value)
}

/// Encode a record with the default codec
pub fn encode_record(record: &Record) -> Result<proto::Record> {
    Codec::default().encode_record(record)
}

/// Type identifier of the well-known tuple type of `arity`
pub fn tuple_id(arity: usize) -> Result<Identifier> {
    if !(1..=MAX_TUPLE_ARITY).contains(&arity) {
        return Err(Error::UnsupportedArity(arity));
    }

    Ok(Identifier::new(
        DA_TYPES_PACKAGE_ID,
        DA_TYPES_MODULE,
        format!("Tuple{}", arity),
    ))
}

/// Arity if `id` names a well-known tuple type
///
/// The package id is not checked; only module and entity name are.
pub fn tuple_arity(id: &proto::Identifier) -> Option<usize> {
    if id.module_name != DA_TYPES_MODULE {
        return None;
    }

    id.entity_name
        .strip_prefix("Tuple")
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| (1..=MAX_TUPLE_ARITY).contains(n))
}

/// `DA.Time.Types:RelTime`
pub fn rel_time_id() -> Identifier {
    Identifier::new(DA_TIME_TYPES_PACKAGE_ID, "DA.Time.Types", "RelTime")
}

/// Relative time record, summing the three components in microseconds
pub fn reltime(microseconds: i64, milliseconds: i64, seconds: i64) -> Record {
    Record::with_id(rel_time_id()).field(
        "microseconds",
        (seconds * 1000 + milliseconds) * 1000 + microseconds,
    )
}

/// Anything that can be rendered as wire numeric text
pub trait NumericSource {
    /// Decimal text with `precision` fractional digits
    fn to_numeric_text(&self, precision: u32) -> Result<String>;
}

macro_rules! integer_numeric_source {
    ($($t:ty),*) => {
        $(
            impl NumericSource for $t {
                fn to_numeric_text(&self, precision: u32) -> Result<String> {
                    Ok(pad_integer(&self.to_string(), precision))
                }
            }
        )*
    };
}

integer_numeric_source!(i32, i64, u32, u64);

impl NumericSource for f64 {
    fn to_numeric_text(&self, precision: u32) -> Result<String> {
        format_float(*self, precision)
    }
}

impl NumericSource for f32 {
    fn to_numeric_text(&self, precision: u32) -> Result<String> {
        format_float(f64::from(*self), precision)
    }
}

impl NumericSource for BigDecimal {
    fn to_numeric_text(&self, precision: u32) -> Result<String> {
        Ok(format_decimal(self, precision))
    }
}

impl NumericSource for Decimal {
    fn to_numeric_text(&self, precision: u32) -> Result<String> {
        Ok(format_decimal(&crate::value::big_decimal(*self), precision))
    }
}

/// Text is taken to already be decimal text and is passed through
impl NumericSource for &str {
    fn to_numeric_text(&self, _precision: u32) -> Result<String> {
        Ok(self.to_string())
    }
}

impl NumericSource for String {
    fn to_numeric_text(&self, _precision: u32) -> Result<String> {
        Ok(self.clone())
    }
}

/// Wire numeric from an integer, float, decimal or decimal text
pub fn numeric(n: impl NumericSource, precision: u32) -> Result<proto::Value> {
    Ok(proto::Value {
        sum: Some(Sum::Numeric(n.to_numeric_text(precision)?)),
    })
}

pub(crate) fn format_float(f: f64, precision: u32) -> Result<String> {
    if !f.is_finite() {
        return Err(Error::unsupported_type(&f, "numeric must be finite"));
    }
    Ok(format!("{:.*}", precision as usize, f))
}

/// Plain decimal text with exactly `precision` fractional digits, rounded half to even
fn format_decimal(d: &BigDecimal, precision: u32) -> String {
    let (mantissa, _) = d
        .with_scale_round(i64::from(precision), RoundingMode::HalfEven)
        .as_bigint_and_exponent();
    let mantissa = mantissa.to_string();
    let (sign, digits) = match mantissa.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", mantissa.as_str()),
    };

    let precision = precision as usize;
    if precision == 0 {
        return format!("{}{}", sign, digits);
    }

    let digits = format!("{:0>width$}", digits, width = precision + 1);
    let (integer, fraction) = digits.split_at(digits.len() - precision);
    format!("{}{}.{}", sign, integer, fraction)
}

fn pad_integer(digits: &str, precision: u32) -> String {
    if precision == 0 {
        digits.to_string()
    } else {
        format!("{}.{}", digits, "0".repeat(precision as usize))
    }
}

fn epoch_date() -> NaiveDate {
    NaiveDate::default()
}

fn days_since_epoch(date: &NaiveDate) -> Result<i32> {
    let days = date.signed_duration_since(epoch_date()).num_days();
    i32::try_from(days).map_err(|_| Error::unsupported_type(date, "date out of range"))
}

/// Wire shapes with a native decoding
pub trait Decode {
    /// Native form
    type Output;

    /// Decode into native form
    fn decode(&self) -> Result<Self::Output>;
}

/// Decode any supported wire shape
pub fn decode<D: Decode + ?Sized>(wire: &D) -> Result<D::Output> {
    wire.decode()
}

impl Decode for proto::Value {
    type Output = Value;

    fn decode(&self) -> Result<Value> {
        let sum = self
            .sum
            .as_ref()
            .ok_or_else(|| Error::unsupported_wire_tag(self, Some("value tag unset")))?;

        Ok(match sum {
            Sum::Unit(()) => Value::Unit,
            Sum::Bool(b) => Value::Bool(*b),
            Sum::Int64(i) => Value::Int64(*i),
            Sum::Date(days) => Value::Date(
                epoch_date()
                    .checked_add_signed(Duration::days(i64::from(*days)))
                    .ok_or_else(|| Error::decode_failure(self, Some("date out of range")))?,
            ),
            Sum::Timestamp(micros) => Value::Timestamp(
                DateTime::from_timestamp_micros(*micros)
                    .ok_or_else(|| Error::decode_failure(self, Some("timestamp out of range")))?,
            ),
            Sum::Numeric(text) => Value::Numeric(
                BigDecimal::from_str(text)
                    .map_err(|e| Error::decode_failure(self, Some(&e.to_string())))?,
            ),
            Sum::Party(p) => Value::Party(p.as_str().into()),
            Sum::Text(text) => Value::Text(text.clone()),
            Sum::ContractId(cid) => Value::ContractId(cid.as_str().into()),
            Sum::Optional(opt) => match &opt.value {
                Some(inner) => Value::Optional(Some(Box::new(inner.decode()?))),
                None => Value::Optional(None),
            },
            Sum::List(list) => Value::List(list.decode()?),
            Sum::TextMap(map) => Value::TextMap(decode_text_map(map)?),
            Sum::GenMap(map) => Value::Map(decode_genmap(map)?),
            Sum::Record(record) => record.decode()?,
            Sum::Variant(variant) => Value::Variant(Variant {
                id: None,
                constructor: variant.constructor.clone(),
                value: Box::new(
                    variant
                        .value
                        .as_deref()
                        .ok_or_else(|| Error::decode_failure(self, Some("variant without value")))?
                        .decode()?,
                ),
            }),
            Sum::Enum(e) => Value::Enum(EnumValue {
                id: None,
                constructor: e.constructor.clone(),
            }),
        })
    }
}

/// Tuple records decode to [`Value::Tuple`], all others to [`Value::Record`]
impl Decode for proto::Record {
    type Output = Value;

    fn decode(&self) -> Result<Value> {
        let mut fields = IndexMap::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = field
                .value
                .as_ref()
                .ok_or_else(|| Error::decode_failure(field, Some("record field without value")))?;
            fields.insert(field.label.clone(), value.decode()?);
        }

        match self.record_id.as_ref().and_then(tuple_arity) {
            Some(arity) => {
                let mut values = Vec::with_capacity(arity);
                for index in 1..=arity {
                    let label = format!("_{}", index);
                    let value = fields.swap_remove(&label).ok_or_else(|| {
                        Error::decode_failure(
                            self,
                            Some(&format!("tuple record missing field {}", label)),
                        )
                    })?;
                    values.push(value);
                }
                Ok(Value::Tuple(values))
            }
            None => Ok(Value::Record(Record { id: None, fields })),
        }
    }
}

impl Decode for proto::List {
    type Output = Vec<Value>;

    fn decode(&self) -> Result<Vec<Value>> {
        self.elements.iter().map(Decode::decode).collect()
    }
}

impl Decode for proto::Identifier {
    type Output = Identifier;

    fn decode(&self) -> Result<Identifier> {
        Ok(Identifier::from_proto(self))
    }
}

fn decode_text_map(map: &proto::TextMap) -> Result<IndexMap<String, Value>> {
    map.entries
        .iter()
        .map(|entry| {
            let value = entry
                .value
                .as_ref()
                .ok_or_else(|| Error::decode_failure(entry, Some("text map entry without value")))?;
            Ok((entry.key.clone(), value.decode()?))
        })
        .collect()
}

fn decode_genmap(map: &proto::GenMap) -> Result<GenMap> {
    let mut decoded = GenMap::new();
    for entry in &map.entries {
        let (key, value) = match (&entry.key, &entry.value) {
            (Some(k), Some(v)) => (k, v),
            _ => return Err(Error::decode_failure(entry, Some("incomplete gen map entry"))),
        };
        decoded.insert(key.decode()?, value.decode()?);
    }
    Ok(decoded)
}
