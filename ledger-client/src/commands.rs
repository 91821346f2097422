//! Command builders
//!
//! Pure constructors for ledger commands and transaction filters. They do
//! no I/O and can be used without a session, e.g. to pre-build a batch for
//! a later submit.

use crate::codec::Codec;
use crate::types::{ContractId, Identifier, Party};
use crate::value::{Record, Value};
use crate::{proto, Result};
use std::collections::HashMap;

impl Codec {
    /// Create command for `template_id`
    pub fn create_contract(
        &self,
        template_id: &Identifier,
        arguments: &Record,
    ) -> Result<proto::Command> {
        Ok(command(proto::command::Command::Create(proto::CreateCommand {
            template_id: Some(template_id.to_proto()),
            create_arguments: Some(self.encode_record(arguments)?),
        })))
    }

    /// Exercise command for `choice` on `contract_id`
    pub fn exercise_contract_choice(
        &self,
        template_id: &Identifier,
        contract_id: &ContractId,
        choice: &str,
        argument: &Value,
    ) -> Result<proto::Command> {
        Ok(command(proto::command::Command::Exercise(
            proto::ExerciseCommand {
                template_id: Some(template_id.to_proto()),
                contract_id: contract_id.as_str().to_string(),
                choice: choice.to_string(),
                choice_argument: Some(self.encode(argument)?),
            },
        )))
    }

    /// Create-and-exercise command
    pub fn create_contract_and_exercise(
        &self,
        template_id: &Identifier,
        arguments: &Record,
        choice: &str,
        argument: &Value,
    ) -> Result<proto::Command> {
        Ok(command(proto::command::Command::CreateAndExercise(
            proto::CreateAndExerciseCommand {
                template_id: Some(template_id.to_proto()),
                create_arguments: Some(self.encode_record(arguments)?),
                choice: choice.to_string(),
                choice_argument: Some(self.encode(argument)?),
            },
        )))
    }
}

fn command(kind: proto::command::Command) -> proto::Command {
    proto::Command {
        command: Some(kind),
    }
}

/// Create command, default codec
pub fn create_contract(template_id: &Identifier, arguments: &Record) -> Result<proto::Command> {
    Codec::default().create_contract(template_id, arguments)
}

/// Exercise command, default codec
pub fn exercise_contract_choice(
    template_id: &Identifier,
    contract_id: &ContractId,
    choice: &str,
    argument: impl Into<Value>,
) -> Result<proto::Command> {
    Codec::default().exercise_contract_choice(template_id, contract_id, choice, &argument.into())
}

/// Create-and-exercise command, default codec
pub fn create_contract_and_exercise(
    template_id: &Identifier,
    arguments: &Record,
    choice: &str,
    argument: impl Into<Value>,
) -> Result<proto::Command> {
    Codec::default().create_contract_and_exercise(template_id, arguments, choice, &argument.into())
}

/// Filter scoped to `party`; no templates means every template
pub fn transaction_filter(party: &Party, template_ids: &[Identifier]) -> proto::TransactionFilter {
    use proto::cumulative_filter::IdentifierFilter;

    let cumulative = if template_ids.is_empty() {
        vec![proto::CumulativeFilter {
            identifier_filter: Some(IdentifierFilter::WildcardFilter(proto::WildcardFilter {
                include_created_event_blob: true,
            })),
        }]
    } else {
        template_ids
            .iter()
            .map(|id| proto::CumulativeFilter {
                identifier_filter: Some(IdentifierFilter::TemplateFilter(proto::TemplateFilter {
                    template_id: Some(id.to_proto()),
                    include_created_event_blob: true,
                })),
            })
            .collect()
    };

    let mut filters_by_party = HashMap::new();
    filters_by_party.insert(party.as_str().to_string(), proto::Filters { cumulative });

    proto::TransactionFilter { filters_by_party }
}

/// Optional settings for a submit
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    /// Command id; a fresh one is generated when unset
    pub command_id: Option<String>,
    /// Absolute offset to deduplicate against
    pub deduplication_offset: Option<String>,
    /// Contracts disclosed to the submitter
    pub disclosed_contracts: Vec<proto::DisclosedContract>,
}

impl SubmitOptions {
    /// Use a fixed command id
    pub fn command_id(mut self, command_id: impl Into<String>) -> Self {
        self.command_id = Some(command_id.into());
        self
    }

    /// Set the deduplication offset
    pub fn deduplication_offset(mut self, offset: impl Into<String>) -> Self {
        self.deduplication_offset = Some(offset.into());
        self
    }

    /// Add a disclosed contract
    pub fn disclose(mut self, contract: proto::DisclosedContract) -> Self {
        self.disclosed_contracts.push(contract);
        self
    }
}

/// One item or many, normalized to a list
///
/// A single item becomes a one-element list; `None` and empty collections
/// become an empty list.
pub trait IntoList<T> {
    /// Normalize to a list
    fn into_list(self) -> Vec<T>;
}

macro_rules! into_list {
    ($t:ty) => {
        impl IntoList<$t> for $t {
            fn into_list(self) -> Vec<$t> {
                vec![self]
            }
        }

        impl IntoList<$t> for Vec<$t> {
            fn into_list(self) -> Vec<$t> {
                self
            }
        }

        impl IntoList<$t> for Option<$t> {
            fn into_list(self) -> Vec<$t> {
                self.into_iter().collect()
            }
        }

        impl IntoList<$t> for &[$t] {
            fn into_list(self) -> Vec<$t> {
                self.to_vec()
            }
        }

        impl<const N: usize> IntoList<$t> for [$t; N] {
            fn into_list(self) -> Vec<$t> {
                self.into()
            }
        }
    };
}

into_list!(proto::Command);
into_list!(Party);

impl IntoList<Party> for &Party {
    fn into_list(self) -> Vec<Party> {
        vec![self.clone()]
    }
}

impl IntoList<Party> for &str {
    fn into_list(self) -> Vec<Party> {
        if self.is_empty() {
            Vec::new()
        } else {
            vec![Party::new(self)]
        }
    }
}

impl IntoList<Party> for Vec<&str> {
    fn into_list(self) -> Vec<Party> {
        self.into_iter().map(Party::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::party;
    use proto::cumulative_filter::IdentifierFilter;

    fn asset_id() -> Identifier {
        Identifier::new("#asset-model", "Main", "Asset")
    }

    #[test]
    fn test_create_contract() {
        let args = Record::new().field("owner", party("alice::1")).field("name", "gold");
        let cmd = create_contract(&asset_id(), &args).unwrap();

        match cmd.command {
            Some(proto::command::Command::Create(create)) => {
                assert_eq!(create.template_id.unwrap().entity_name, "Asset");
                let labels: Vec<String> = create
                    .create_arguments
                    .unwrap()
                    .fields
                    .into_iter()
                    .map(|f| f.label)
                    .collect();
                assert_eq!(labels, vec!["owner", "name"]);
            }
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_exercise_contract_choice() {
        let cid = ContractId::new("cid-1");
        let args = Record::new().field("newOwner", party("bob::2"));
        let cmd = exercise_contract_choice(&asset_id(), &cid, "Give", args).unwrap();

        match cmd.command {
            Some(proto::command::Command::Exercise(exercise)) => {
                assert_eq!(exercise.contract_id, "cid-1");
                assert_eq!(exercise.choice, "Give");
                assert!(exercise.choice_argument.is_some());
            }
            other => panic!("expected exercise, got {:?}", other),
        }
    }

    #[test]
    fn test_create_and_exercise() {
        let cmd = create_contract_and_exercise(&asset_id(), &Record::new(), "Archive", Record::new())
            .unwrap();
        assert!(matches!(
            cmd.command,
            Some(proto::command::Command::CreateAndExercise(_))
        ));
    }

    #[test]
    fn test_empty_template_list_is_wildcard() {
        let alice = Party::new("alice::1");
        let filter = transaction_filter(&alice, &[]);
        let filters = &filter.filters_by_party["alice::1"];
        assert!(matches!(
            filters.cumulative[0].identifier_filter,
            Some(IdentifierFilter::WildcardFilter(_))
        ));

        let filter = transaction_filter(&alice, &[asset_id(), asset_id()]);
        assert_eq!(filter.filters_by_party["alice::1"].cumulative.len(), 2);
    }

    #[test]
    fn test_into_list_normalization() {
        assert_eq!(IntoList::<Party>::into_list("alice::1"), vec![Party::new("alice::1")]);
        assert!(IntoList::<Party>::into_list("").is_empty());
        assert!(IntoList::<Party>::into_list(None::<Party>).is_empty());
        assert_eq!(
            IntoList::<Party>::into_list(vec!["a", "b"]),
            vec![Party::new("a"), Party::new("b")]
        );

        let cmd = create_contract(&asset_id(), &Record::new()).unwrap();
        assert_eq!(IntoList::<proto::Command>::into_list(cmd.clone()).len(), 1);
        assert_eq!(IntoList::<proto::Command>::into_list(vec![cmd.clone(), cmd]).len(), 2);
        assert!(IntoList::<proto::Command>::into_list(Vec::<proto::Command>::new()).is_empty());
    }
}
