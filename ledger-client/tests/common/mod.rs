//! In-memory ledger for session tests
//!
//! `MockLedger` serves the ledger services from shared state and records
//! every request it receives. Queued failures are returned by the next
//! calls, one per call, before the request is served.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use ledger_client::transport::ResponseStream;
use ledger_client::{proto, Connect, Identifier, LedgerTransport, Result};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use tonic::Status;

pub const ADDRESS: &str = "mock-ledger:6865";
pub const APPLICATION_ID: &str = "session-tests";

/// Server-side state of the mock
#[derive(Default)]
pub struct LedgerState {
    pub version: String,
    pub ledger_end: String,
    pub packages: Vec<String>,
    pub parties: Vec<proto::PartyDetails>,
    /// Parties per page; 0 serves everything in one page
    pub page_size: usize,
    /// Answer every party page with the token it was asked for
    pub repeat_page_token: bool,
    pub active_contracts: Vec<proto::GetActiveContractsResponse>,
    pub updates: Vec<proto::GetUpdatesResponse>,
    pub failures: VecDeque<Status>,

    pub party_requests: Vec<proto::ListKnownPartiesRequest>,
    pub allocations: Vec<String>,
    pub submissions: Vec<proto::SubmitAndWaitRequest>,
    pub acs_requests: Vec<proto::GetActiveContractsRequest>,
    pub update_requests: Vec<proto::GetUpdatesRequest>,
}

#[derive(Clone, Default)]
pub struct MockLedger {
    state: Arc<Mutex<LedgerState>>,
    streams_opened: Arc<AtomicUsize>,
    streams_released: Arc<AtomicUsize>,
}

/// Server stream that counts itself released when dropped
struct TrackedStream<S> {
    inner: S,
    released: Arc<AtomicUsize>,
}

impl<S: Stream + Unpin> Stream for TrackedStream<S> {
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl<S> Drop for TrackedStream<S> {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl MockLedger {
    pub fn new() -> Self {
        let ledger = Self::default();
        {
            let mut state = ledger.state();
            state.version = "2.0.0".to_string();
            state.ledger_end = "0000000a".to_string();
        }
        ledger
    }

    /// Mock hosting `alice::1` and `bob::2` locally and `dave::3` remotely
    pub fn with_parties() -> Self {
        let ledger = Self::new();
        ledger.add_party("alice::1", true);
        ledger.add_party("bob::2", true);
        ledger.add_party("dave::3", false);
        ledger
    }

    pub fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap()
    }

    pub fn add_party(&self, party: &str, is_local: bool) {
        self.state().parties.push(proto::PartyDetails {
            party: party.to_string(),
            is_local,
        });
    }

    /// Queue `count` failures with `code`
    pub fn fail_next(&self, code: tonic::Code, count: usize) {
        let mut state = self.state();
        for i in 0..count {
            state
                .failures
                .push_back(Status::new(code, format!("injected failure {}", i + 1)));
        }
    }

    /// Server streams handed out so far
    pub fn streams_opened(&self) -> usize {
        self.streams_opened.load(Ordering::SeqCst)
    }

    /// Server streams dropped by the client so far
    pub fn streams_released(&self) -> usize {
        self.streams_released.load(Ordering::SeqCst)
    }

    fn serve<T: Send + 'static>(&self, messages: Vec<T>) -> ResponseStream<T> {
        self.streams_opened.fetch_add(1, Ordering::SeqCst);
        TrackedStream {
            inner: futures::stream::iter(messages.into_iter().map(Ok)),
            released: self.streams_released.clone(),
        }
        .boxed()
    }

    fn take_failure(&self) -> std::result::Result<(), Status> {
        match self.state().failures.pop_front() {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LedgerTransport for MockLedger {
    async fn get_ledger_api_version(
        &self,
        _request: proto::GetLedgerApiVersionRequest,
    ) -> std::result::Result<proto::GetLedgerApiVersionResponse, Status> {
        self.take_failure()?;
        Ok(proto::GetLedgerApiVersionResponse {
            version: self.state().version.clone(),
        })
    }

    async fn get_ledger_end(
        &self,
        _request: proto::GetLedgerEndRequest,
    ) -> std::result::Result<proto::GetLedgerEndResponse, Status> {
        self.take_failure()?;
        let end = self.state().ledger_end.clone();
        Ok(proto::GetLedgerEndResponse {
            offset: Some(proto::ParticipantOffset {
                value: Some(proto::participant_offset::Value::Absolute(end)),
            }),
        })
    }

    async fn get_active_contracts(
        &self,
        request: proto::GetActiveContractsRequest,
    ) -> std::result::Result<ResponseStream<proto::GetActiveContractsResponse>, Status> {
        self.take_failure()?;
        let mut state = self.state();
        state.acs_requests.push(request);
        let messages = state.active_contracts.clone();
        drop(state);
        Ok(self.serve(messages))
    }

    async fn get_updates(
        &self,
        request: proto::GetUpdatesRequest,
    ) -> std::result::Result<ResponseStream<proto::GetUpdatesResponse>, Status> {
        self.take_failure()?;
        let mut state = self.state();
        state.update_requests.push(request);
        let messages = state.updates.clone();
        drop(state);
        Ok(self.serve(messages))
    }

    async fn submit_and_wait_for_transaction(
        &self,
        request: proto::SubmitAndWaitRequest,
    ) -> std::result::Result<proto::SubmitAndWaitForTransactionResponse, Status> {
        self.state().submissions.push(request.clone());
        self.take_failure()?;

        let commands = request.commands.unwrap_or_default();
        let events = commands
            .commands
            .iter()
            .enumerate()
            .filter_map(|(i, command)| match &command.command {
                Some(proto::command::Command::Create(create)) => Some(proto::Event {
                    event: Some(proto::event::Event::Created(proto::CreatedEvent {
                        offset: "0000000b".to_string(),
                        node_id: i as i32,
                        contract_id: format!("cid-{}", i),
                        template_id: create.template_id.clone(),
                        create_arguments: create.create_arguments.clone(),
                        signatories: commands.act_as.clone(),
                        witness_parties: commands.act_as.clone(),
                        ..Default::default()
                    })),
                }),
                _ => None,
            })
            .collect();

        Ok(proto::SubmitAndWaitForTransactionResponse {
            transaction: Some(proto::Transaction {
                update_id: format!("update-{}", commands.command_id),
                command_id: commands.command_id.clone(),
                workflow_id: commands.workflow_id.clone(),
                offset: "0000000b".to_string(),
                events,
                ..Default::default()
            }),
        })
    }

    async fn list_packages(
        &self,
        _request: proto::ListPackagesRequest,
    ) -> std::result::Result<proto::ListPackagesResponse, Status> {
        self.take_failure()?;
        Ok(proto::ListPackagesResponse {
            package_ids: self.state().packages.clone(),
        })
    }

    async fn list_known_parties(
        &self,
        request: proto::ListKnownPartiesRequest,
    ) -> std::result::Result<proto::ListKnownPartiesResponse, Status> {
        self.take_failure()?;
        let mut state = self.state();

        let start = if request.page_token.is_empty() {
            0
        } else {
            request
                .page_token
                .parse::<usize>()
                .map_err(|_| Status::invalid_argument("bad page token"))?
        };
        state.party_requests.push(request.clone());

        let end = match state.page_size {
            0 => state.parties.len(),
            n => (start + n).min(state.parties.len()),
        };
        let next_page_token = if state.repeat_page_token && !request.page_token.is_empty() {
            request.page_token.clone()
        } else if end < state.parties.len() {
            end.to_string()
        } else {
            String::new()
        };

        Ok(proto::ListKnownPartiesResponse {
            party_details: state.parties[start..end].to_vec(),
            next_page_token,
        })
    }

    async fn allocate_party(
        &self,
        request: proto::AllocatePartyRequest,
    ) -> std::result::Result<proto::AllocatePartyResponse, Status> {
        self.take_failure()?;
        let mut state = self.state();

        let details = proto::PartyDetails {
            party: format!("{}::1220ab", request.party_id_hint),
            is_local: true,
        };
        state.allocations.push(request.party_id_hint);
        state.parties.push(details.clone());

        Ok(proto::AllocatePartyResponse {
            party_details: Some(details),
        })
    }
}

/// Hands out clones of one [`MockLedger`]
#[derive(Clone, Default)]
pub struct MockConnector {
    pub ledger: MockLedger,
    pub connects: Arc<AtomicUsize>,
    pub refuse: bool,
}

impl MockConnector {
    pub fn new(ledger: MockLedger) -> Self {
        Self {
            ledger,
            ..Default::default()
        }
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connect for MockConnector {
    type Transport = MockLedger;

    async fn connect(&self, address: &str) -> Result<MockLedger> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.refuse {
            return Err(Status::unavailable(format!("{} refused connection", address)).into());
        }
        Ok(self.ledger.clone())
    }
}

pub fn asset_id() -> Identifier {
    Identifier::new("asset-pkg", "Main", "Asset")
}

/// Active contract message for an asset owned by `owner`
pub fn active_asset(contract_id: &str, owner: &str, offset: &str) -> proto::GetActiveContractsResponse {
    proto::GetActiveContractsResponse {
        offset: offset.to_string(),
        workflow_id: String::new(),
        active_contract: Some(proto::ActiveContract {
            created_event: Some(proto::CreatedEvent {
                contract_id: contract_id.to_string(),
                template_id: Some(asset_id().to_proto()),
                create_arguments: Some(proto::Record {
                    record_id: None,
                    fields: vec![proto::RecordField {
                        label: "owner".to_string(),
                        value: Some(proto::Value {
                            sum: Some(proto::value::value::Sum::Party(owner.to_string())),
                        }),
                    }],
                }),
                signatories: vec![owner.to_string()],
                ..Default::default()
            }),
            domain_id: "domain".to_string(),
            reassignment_counter: 0,
        }),
    }
}

/// Update stream message carrying an empty transaction at `offset`
pub fn transaction_update(offset: &str) -> proto::GetUpdatesResponse {
    proto::GetUpdatesResponse {
        update: Some(proto::get_updates_response::Update::Transaction(
            proto::Transaction {
                update_id: format!("update-{}", offset),
                command_id: format!("cmd-{}", offset),
                offset: offset.to_string(),
                ..Default::default()
            },
        )),
    }
}

/// Update stream message carrying a reassignment
pub fn reassignment_update(offset: &str) -> proto::GetUpdatesResponse {
    proto::GetUpdatesResponse {
        update: Some(proto::get_updates_response::Update::Reassignment(
            proto::Reassignment {
                update_id: format!("reassign-{}", offset),
                offset: offset.to_string(),
                ..Default::default()
            },
        )),
    }
}
