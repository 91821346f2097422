//! Ledger session
//!
//! Owns one transport between `open()` and `close()` and exposes the ledger
//! operations on top of it. Requests are assembled with the codec and sent
//! through the retry executor; responses are decoded to native form.
//!
//! # Lifecycle
//!
//! `Unopened -> Open -> Closed`. `Closed` is terminal. A session dropped
//! while open releases its transport.

use crate::codec::{Codec, Decode};
use crate::commands::{transaction_filter, IntoList, SubmitOptions};
use crate::config::ClientConfig;
use crate::events::{decode_updates_response, ActiveContract, Transaction};
use crate::retry::RetryPolicy;
use crate::transport::{Connect, GrpcConnector, LedgerTransport};
use crate::types::{Identifier, Offset, Party, PartyDetails};
use crate::{proto, Error, Result};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::fmt;
use std::future::Future;
use tracing::{debug, info};
use uuid::Uuid;

enum SessionState<T> {
    Unopened,
    Open(T),
    Closed,
}

/// Session against one ledger participant
pub struct LedgerSession<C: Connect = GrpcConnector> {
    address: String,
    application_id: String,
    connector: C,
    codec: Codec,
    retry: RetryPolicy,
    state: SessionState<C::Transport>,
}

impl LedgerSession<GrpcConnector> {
    /// Unopened gRPC session with default settings
    pub fn new(address: impl Into<String>, application_id: impl Into<String>) -> Self {
        Self::with_connector(GrpcConnector::default(), address, application_id)
    }

    /// Unopened gRPC session configured from `config`
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_connector(
            GrpcConnector::new(config.connect_timeout()),
            config.ledger_address.clone(),
            config.application_id.clone(),
        )
        .with_codec(Codec::new(config.numeric_precision))
        .with_retry(RetryPolicy::new(config.retry.clone()))
    }
}

impl<C: Connect> LedgerSession<C> {
    /// Unopened session using `connector`
    pub fn with_connector(
        connector: C,
        address: impl Into<String>,
        application_id: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            application_id: application_id.into(),
            connector,
            codec: Codec::default(),
            retry: RetryPolicy::default(),
            state: SessionState::Unopened,
        }
    }

    /// Open session using `connector`
    pub async fn connect(
        connector: C,
        address: impl Into<String>,
        application_id: impl Into<String>,
    ) -> Result<Self> {
        let mut session = Self::with_connector(connector, address, application_id);
        session.open().await?;
        Ok(session)
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the codec
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Ledger address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Application id sent with submissions
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Codec used for this session's commands
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Whether the session is open
    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open(_))
    }

    /// Establish the transport; valid only once
    pub async fn open(&mut self) -> Result<()> {
        if !matches!(self.state, SessionState::Unopened) {
            return Err(Error::AlreadyOpen(self.address.clone()));
        }

        let transport = self.connector.connect(&self.address).await?;
        self.state = SessionState::Open(transport);

        info!("Ledger session opened: {}", self.address);
        Ok(())
    }

    /// Release the transport; the session cannot be reopened
    pub fn close(&mut self) -> Result<()> {
        if !self.is_open() {
            return Err(Error::NotOpen(self.address.clone()));
        }

        self.state = SessionState::Closed;

        info!("Ledger session closed: {}", self.address);
        Ok(())
    }

    fn transport(&self) -> Result<&C::Transport> {
        match &self.state {
            SessionState::Open(transport) => Ok(transport),
            _ => Err(Error::NotOpen(self.address.clone())),
        }
    }

    async fn call<'a, F, Fut, R>(&'a self, operation_name: &str, rpc: F) -> Result<R>
    where
        F: Fn(&'a C::Transport) -> Fut,
        Fut: Future<Output = std::result::Result<R, tonic::Status>>,
    {
        let transport = self.transport()?;

        self.retry
            .execute(
                || {
                    let call = rpc(transport);
                    async move { call.await.map_err(Error::from) }
                },
                operation_name,
            )
            .await
    }

    /// Ledger API version
    pub async fn get_ledger_version(&self) -> Result<String> {
        let response = self
            .call("get_ledger_version", |t| {
                t.get_ledger_api_version(proto::GetLedgerApiVersionRequest {})
            })
            .await?;

        Ok(response.version)
    }

    /// Current ledger end
    pub async fn get_ledger_end(&self) -> Result<Offset> {
        let response = self
            .call("get_ledger_end", |t| {
                t.get_ledger_end(proto::GetLedgerEndRequest {})
            })
            .await?;

        Offset::from_proto(&response.offset.unwrap_or_default())
    }

    /// Package ids known to the participant
    pub async fn list_packages(&self) -> Result<Vec<String>> {
        let response = self
            .call("list_packages", |t| {
                t.list_packages(proto::ListPackagesRequest {})
            })
            .await?;

        Ok(response.package_ids)
    }

    /// Every party known to the participant, across all pages
    pub async fn list_parties(&self) -> Result<Vec<PartyDetails>> {
        let mut parties = Vec::new();
        let mut page_token = String::new();

        loop {
            let request = proto::ListKnownPartiesRequest {
                page_token: page_token.clone(),
                page_size: 0,
            };
            let response = self
                .call("list_parties", |t| t.list_known_parties(request.clone()))
                .await?;

            parties.extend(response.party_details.iter().map(PartyDetails::from_proto));

            if response.next_page_token.is_empty() {
                break;
            }
            if response.next_page_token == page_token {
                return Err(Error::decode_failure(
                    &response.next_page_token,
                    Some("party listing repeated its page token"),
                ));
            }
            page_token = response.next_page_token;
        }

        Ok(parties)
    }

    /// Parties hosted by this participant
    pub async fn list_local_parties(&self) -> Result<Vec<PartyDetails>> {
        let mut parties = self.list_parties().await?;
        parties.retain(|p| p.is_local);
        Ok(parties)
    }

    /// First local party whose full id or base name is `name`
    pub async fn lookup_local_party_id(&self, name: &str) -> Result<Option<Party>> {
        Ok(self
            .list_local_parties()
            .await?
            .into_iter()
            .map(|p| p.party)
            .find(|party| party.matches(name)))
    }

    /// Like [`Self::lookup_local_party_id`], failing with `PartyNotFound` on a miss
    pub async fn require_local_party_id(&self, name: &str) -> Result<Party> {
        self.lookup_local_party_id(name)
            .await?
            .ok_or_else(|| Error::PartyNotFound(name.to_string()))
    }

    /// Existing local party for `hint`, or a newly allocated one
    pub async fn allocate_party(&self, hint: &str) -> Result<Party> {
        if let Some(party) = self.lookup_local_party_id(hint).await? {
            debug!("Party {} already allocated as {}", hint, party);
            return Ok(party);
        }

        let request = proto::AllocatePartyRequest {
            party_id_hint: hint.to_string(),
        };
        let response = self
            .call("allocate_party", |t| t.allocate_party(request.clone()))
            .await?;

        let details = response
            .party_details
            .ok_or_else(|| Error::decode_failure(&hint, Some("allocation returned no party")))?;

        info!("Allocated party {}", details.party);
        Ok(Party::new(details.party))
    }

    /// Submit commands and wait for the resulting transaction
    ///
    /// The command id is fixed before the first attempt, so a retried
    /// submission is deduplicated by the ledger.
    pub async fn submit(
        &self,
        act_as: impl IntoList<Party>,
        commands: impl IntoList<proto::Command>,
        options: SubmitOptions,
    ) -> Result<Transaction> {
        use proto::commands::DeduplicationPeriod;

        let command_id = options
            .command_id
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let act_as: Vec<String> = act_as.into_list().into_iter().map(Party::into_string).collect();
        let commands = commands.into_list();

        debug!(
            "Submitting {} command(s) as {:?}, command id {}",
            commands.len(),
            act_as,
            command_id
        );

        let request = proto::SubmitAndWaitRequest {
            commands: Some(proto::Commands {
                application_id: self.application_id.clone(),
                command_id,
                act_as,
                commands,
                deduplication_period: options
                    .deduplication_offset
                    .map(DeduplicationPeriod::DeduplicationOffset),
                disclosed_contracts: options.disclosed_contracts,
                ..Default::default()
            }),
        };

        let response = self
            .call("submit", |t| t.submit_and_wait_for_transaction(request.clone()))
            .await?;

        response.decode()
    }

    /// Contracts active for `party` now; no templates means every template
    pub async fn get_active_contracts(
        &self,
        party: &Party,
        template_ids: &[Identifier],
    ) -> Result<Vec<ActiveContract>> {
        let request = proto::GetActiveContractsRequest {
            filter: Some(transaction_filter(party, template_ids)),
            verbose: true,
        };
        let mut stream = self
            .call("get_active_contracts", |t| {
                t.get_active_contracts(request.clone())
            })
            .await?;

        let mut contracts = Vec::new();
        while let Some(message) = stream.next().await {
            let message = message?;

            // Messages with an offset mark the snapshot position, not contracts
            if !message.offset.is_empty() {
                continue;
            }
            if let Some(contract) = &message.active_contract {
                contracts.push(contract.decode()?);
            }
        }

        Ok(contracts)
    }

    /// Transactions from ledger begin up to the ledger end at call time
    pub async fn get_updates(
        &self,
        party: &Party,
        template_ids: &[Identifier],
    ) -> Result<BoxStream<'_, Result<Transaction>>> {
        let end = self.get_ledger_end().await?;
        self.updates(party, template_ids, Offset::Begin, Some(end))
            .await
    }

    /// Transactions after the ledger end at call time, until dropped
    pub async fn get_update_stream(
        &self,
        party: &Party,
        template_ids: &[Identifier],
    ) -> Result<BoxStream<'_, Result<Transaction>>> {
        let begin = self.get_ledger_end().await?;
        self.updates(party, template_ids, begin, None).await
    }

    async fn updates(
        &self,
        party: &Party,
        template_ids: &[Identifier],
        begin_exclusive: Offset,
        end_inclusive: Option<Offset>,
    ) -> Result<BoxStream<'_, Result<Transaction>>> {
        debug!(
            "Reading updates for {} from {} to {}",
            party,
            begin_exclusive,
            end_inclusive
                .as_ref()
                .map_or_else(|| "open end".to_string(), Offset::to_string)
        );

        let request = proto::GetUpdatesRequest {
            begin_exclusive: Some(begin_exclusive.to_proto()),
            end_inclusive: end_inclusive.as_ref().map(Offset::to_proto),
            filter: Some(transaction_filter(party, template_ids)),
            verbose: true,
        };
        let stream = self
            .call("get_updates", |t| t.get_updates(request.clone()))
            .await?;

        Ok(stream
            .map(|message| {
                message
                    .map_err(Error::from)
                    .and_then(|update| decode_updates_response(&update))
            })
            .boxed())
    }
}

impl<C: Connect> Drop for LedgerSession<C> {
    fn drop(&mut self) {
        if self.is_open() {
            self.state = SessionState::Closed;
            debug!("Ledger session released on drop: {}", self.address);
        }
    }
}

impl<C: Connect> fmt::Debug for LedgerSession<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            SessionState::Unopened => "unopened",
            SessionState::Open(_) => "open",
            SessionState::Closed => "closed",
        };

        f.debug_struct("LedgerSession")
            .field("address", &self.address)
            .field("application_id", &self.application_id)
            .field("state", &state)
            .finish()
    }
}
