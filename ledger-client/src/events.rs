//! Decoded response envelopes
//!
//! Created and archived events, transactions and active contracts in native
//! form. They serialize to nested maps keyed by field name; events carry an
//! `"event"` discriminator of `"created"` or `"archived"`.

use crate::codec::Decode;
use crate::types::{ContractId, Identifier, Party};
use crate::value::Value;
use crate::{proto, Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A contract was created
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedEvent {
    /// Offset of the enclosing update
    pub offset: String,
    /// Created contract
    pub contract_id: ContractId,
    /// Template of the contract
    pub template_id: Identifier,
    /// Parties notified of the event
    pub witness_parties: Vec<Party>,
    /// Signatories
    pub signatories: Vec<Party>,
    /// Observers
    pub observers: Vec<Party>,
    /// Package name of the template
    pub package_name: String,
    /// Number of interface views delivered with the event
    pub interface_views_count: usize,
    /// Template arguments
    pub create_arguments: Value,
    /// Opaque blob usable for explicit disclosure
    #[serde(with = "serde_bytes")]
    pub created_event_blob: Vec<u8>,
    /// Ledger effective time of the create
    pub created_at: Option<DateTime<Utc>>,
}

/// A contract was archived
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchivedEvent {
    /// Offset of the enclosing update
    pub offset: String,
    /// Archived contract
    pub contract_id: ContractId,
    /// Template of the contract
    pub template_id: Identifier,
    /// Parties notified of the event
    pub witness_parties: Vec<Party>,
    /// Package name of the template
    pub package_name: String,
}

/// Event in a flat transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Contract created
    Created(CreatedEvent),
    /// Contract archived
    Archived(ArchivedEvent),
}

impl Event {
    /// Contract the event refers to
    pub fn contract_id(&self) -> &ContractId {
        match self {
            Event::Created(created) => &created.contract_id,
            Event::Archived(archived) => &archived.contract_id,
        }
    }
}

/// Committed transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Update id
    pub update_id: String,
    /// Command id (empty unless read by the submitter)
    pub command_id: String,
    /// Workflow id
    pub workflow_id: String,
    /// Absolute offset
    pub offset: String,
    /// Ledger effective time
    pub effective_at: Option<DateTime<Utc>>,
    /// Events in ledger order
    pub events: Vec<Event>,
}

impl Transaction {
    /// Created events only
    pub fn created(&self) -> impl Iterator<Item = &CreatedEvent> {
        self.events.iter().filter_map(|event| match event {
            Event::Created(created) => Some(created),
            Event::Archived(_) => None,
        })
    }
}

/// Contract active as of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveContract {
    /// Number of reassignments so far
    pub reassignment_counter: u64,
    /// The create that brought the contract into existence
    #[serde(flatten)]
    pub created: CreatedEvent,
}

/// Explicit disclosure of a created contract for a later submit
pub fn disclosure(created: &CreatedEvent) -> proto::DisclosedContract {
    proto::DisclosedContract {
        template_id: Some(created.template_id.to_proto()),
        contract_id: created.contract_id.as_str().to_string(),
        created_event_blob: created.created_event_blob.clone(),
    }
}

/// Decode a `GetUpdates` stream message; only transactions are handled
pub fn decode_updates_response(response: &proto::GetUpdatesResponse) -> Result<Transaction> {
    use proto::get_updates_response::Update;

    match &response.update {
        Some(Update::Transaction(tx)) => tx.decode(),
        Some(Update::Reassignment(reassignment)) => {
            Err(Error::not_supported(reassignment, "domain reassignments"))
        }
        None => Err(Error::decode_failure(response, Some("update tag unset"))),
    }
}

fn parties(ids: &[String]) -> Vec<Party> {
    ids.iter().map(|id| Party::new(id.as_str())).collect()
}

fn timestamp(ts: &Option<prost_types::Timestamp>) -> Result<Option<DateTime<Utc>>> {
    let Some(ts) = ts else {
        return Ok(None);
    };

    u32::try_from(ts.nanos)
        .ok()
        .and_then(|nanos| DateTime::from_timestamp(ts.seconds, nanos))
        .map(Some)
        .ok_or_else(|| Error::decode_failure(ts, Some("timestamp out of range")))
}

fn template_id(id: &Option<proto::Identifier>, owner: &impl std::fmt::Debug) -> Result<Identifier> {
    id.as_ref()
        .map(Identifier::from_proto)
        .ok_or_else(|| Error::decode_failure(owner, Some("event without template id")))
}

impl Decode for proto::CreatedEvent {
    type Output = CreatedEvent;

    fn decode(&self) -> Result<CreatedEvent> {
        let create_arguments = match &self.create_arguments {
            Some(args) => args.decode()?,
            None => return Err(Error::decode_failure(self, Some("created event without arguments"))),
        };

        Ok(CreatedEvent {
            offset: self.offset.clone(),
            contract_id: ContractId::new(self.contract_id.as_str()),
            template_id: template_id(&self.template_id, self)?,
            witness_parties: parties(&self.witness_parties),
            signatories: parties(&self.signatories),
            observers: parties(&self.observers),
            package_name: self.package_name.clone(),
            interface_views_count: self.interface_views.len(),
            create_arguments,
            created_event_blob: self.created_event_blob.clone(),
            created_at: timestamp(&self.created_at)?,
        })
    }
}

impl Decode for proto::ArchivedEvent {
    type Output = ArchivedEvent;

    fn decode(&self) -> Result<ArchivedEvent> {
        Ok(ArchivedEvent {
            offset: self.offset.clone(),
            contract_id: ContractId::new(self.contract_id.as_str()),
            template_id: template_id(&self.template_id, self)?,
            witness_parties: parties(&self.witness_parties),
            package_name: self.package_name.clone(),
        })
    }
}

impl Decode for proto::Event {
    type Output = Event;

    fn decode(&self) -> Result<Event> {
        use proto::event::Event as Kind;

        match &self.event {
            Some(Kind::Created(created)) => Ok(Event::Created(created.decode()?)),
            Some(Kind::Archived(archived)) => Ok(Event::Archived(archived.decode()?)),
            None => Err(Error::unsupported_wire_tag(self, Some("event tag unset"))),
        }
    }
}

impl Decode for proto::Transaction {
    type Output = Transaction;

    fn decode(&self) -> Result<Transaction> {
        Ok(Transaction {
            update_id: self.update_id.clone(),
            command_id: self.command_id.clone(),
            workflow_id: self.workflow_id.clone(),
            offset: self.offset.clone(),
            effective_at: timestamp(&self.effective_at)?,
            events: self.events.iter().map(Decode::decode).collect::<Result<_>>()?,
        })
    }
}

impl Decode for proto::ActiveContract {
    type Output = ActiveContract;

    fn decode(&self) -> Result<ActiveContract> {
        let created = self
            .created_event
            .as_ref()
            .ok_or_else(|| Error::decode_failure(self, Some("active contract without created event")))?;

        Ok(ActiveContract {
            reassignment_counter: self.reassignment_counter,
            created: created.decode()?,
        })
    }
}

impl Decode for proto::SubmitAndWaitForTransactionResponse {
    type Output = Transaction;

    fn decode(&self) -> Result<Transaction> {
        self.transaction
            .as_ref()
            .ok_or_else(|| Error::decode_failure(self, Some("response without transaction")))?
            .decode()
    }
}

impl Decode for proto::GetUpdatesResponse {
    type Output = Transaction;

    fn decode(&self) -> Result<Transaction> {
        decode_updates_response(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use proto::value::value::Sum;

    fn asset_created(contract_id: &str) -> proto::CreatedEvent {
        proto::CreatedEvent {
            offset: "0000000a".to_string(),
            contract_id: contract_id.to_string(),
            template_id: Some(Identifier::new("pkg", "Main", "Asset").to_proto()),
            create_arguments: Some(proto::Record {
                record_id: None,
                fields: vec![proto::RecordField {
                    label: "owner".to_string(),
                    value: Some(proto::Value {
                        sum: Some(Sum::Party("alice::1".to_string())),
                    }),
                }],
            }),
            created_event_blob: vec![1, 2, 3],
            signatories: vec!["alice::1".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_created_event_serializes_with_discriminator() {
        let event = proto::Event {
            event: Some(proto::event::Event::Created(asset_created("cid-1"))),
        };
        let decoded = decode(&event).unwrap();

        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json["event"], "created");
        assert_eq!(json["contract_id"], "cid-1");
        assert_eq!(json["template_id"]["module_name"], "Main");
        assert_eq!(json["create_arguments"]["owner"], "alice::1");
        assert_eq!(json["signatories"][0], "alice::1");
    }

    #[test]
    fn test_archived_event() {
        let event = proto::Event {
            event: Some(proto::event::Event::Archived(proto::ArchivedEvent {
                contract_id: "cid-2".to_string(),
                template_id: Some(Identifier::new("pkg", "Main", "Asset").to_proto()),
                ..Default::default()
            })),
        };
        let decoded = decode(&event).unwrap();
        assert_eq!(decoded.contract_id().as_str(), "cid-2");
        assert_eq!(serde_json::to_value(&decoded).unwrap()["event"], "archived");
    }

    #[test]
    fn test_active_contract_is_flattened() {
        let contract = proto::ActiveContract {
            created_event: Some(asset_created("cid-3")),
            domain_id: "domain".to_string(),
            reassignment_counter: 2,
        };
        let json = serde_json::to_value(decode(&contract).unwrap()).unwrap();
        assert_eq!(json["reassignment_counter"], 2);
        assert_eq!(json["contract_id"], "cid-3");
    }

    #[test]
    fn test_reassignment_is_not_supported() {
        let response = proto::GetUpdatesResponse {
            update: Some(proto::get_updates_response::Update::Reassignment(
                proto::Reassignment::default(),
            )),
        };
        assert!(matches!(
            decode_updates_response(&response),
            Err(Error::NotSupported { .. })
        ));

        let empty = proto::GetUpdatesResponse { update: None };
        assert!(matches!(
            decode_updates_response(&empty),
            Err(Error::DecodeFailure { .. })
        ));
    }

    #[test]
    fn test_transaction_update() {
        let response = proto::GetUpdatesResponse {
            update: Some(proto::get_updates_response::Update::Transaction(
                proto::Transaction {
                    update_id: "u1".to_string(),
                    offset: "0000000b".to_string(),
                    effective_at: Some(prost_types::Timestamp { seconds: 10, nanos: 0 }),
                    events: vec![proto::Event {
                        event: Some(proto::event::Event::Created(asset_created("cid-4"))),
                    }],
                    ..Default::default()
                },
            )),
        };

        let tx = decode(&response).unwrap();
        assert_eq!(tx.update_id, "u1");
        assert_eq!(tx.effective_at.map(|t| t.timestamp()), Some(10));
        assert_eq!(tx.created().count(), 1);
    }

    #[test]
    fn test_disclosure_from_created_event() {
        let created = decode(&asset_created("cid-5")).unwrap();
        let disclosed = disclosure(&created);
        assert_eq!(disclosed.contract_id, "cid-5");
        assert_eq!(disclosed.created_event_blob, vec![1, 2, 3]);
        assert_eq!(disclosed.template_id.unwrap().entity_name, "Asset");
    }
}
