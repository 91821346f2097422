//! Transport seam
//!
//! [`LedgerTransport`] is the narrow interface the session drives: unary
//! calls and server-streaming calls over the v2 ledger services, failing
//! with a [`tonic::Status`]. [`GrpcTransport`] is the production
//! implementation over a tonic channel; tests plug in an in-memory double.

use crate::{proto, Result};
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::fmt;
use std::time::Duration;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};
use tracing::debug;

/// Server-streaming response; dropping it cancels the call
pub type ResponseStream<T> = BoxStream<'static, std::result::Result<T, Status>>;

/// Remote ledger services
#[async_trait]
pub trait LedgerTransport: Send + Sync {
    /// `VersionService/GetLedgerApiVersion`
    async fn get_ledger_api_version(
        &self,
        request: proto::GetLedgerApiVersionRequest,
    ) -> std::result::Result<proto::GetLedgerApiVersionResponse, Status>;

    /// `StateService/GetLedgerEnd`
    async fn get_ledger_end(
        &self,
        request: proto::GetLedgerEndRequest,
    ) -> std::result::Result<proto::GetLedgerEndResponse, Status>;

    /// `StateService/GetActiveContracts`
    async fn get_active_contracts(
        &self,
        request: proto::GetActiveContractsRequest,
    ) -> std::result::Result<ResponseStream<proto::GetActiveContractsResponse>, Status>;

    /// `UpdateService/GetUpdates`
    async fn get_updates(
        &self,
        request: proto::GetUpdatesRequest,
    ) -> std::result::Result<ResponseStream<proto::GetUpdatesResponse>, Status>;

    /// `CommandService/SubmitAndWaitForTransaction`
    async fn submit_and_wait_for_transaction(
        &self,
        request: proto::SubmitAndWaitRequest,
    ) -> std::result::Result<proto::SubmitAndWaitForTransactionResponse, Status>;

    /// `PackageService/ListPackages`
    async fn list_packages(
        &self,
        request: proto::ListPackagesRequest,
    ) -> std::result::Result<proto::ListPackagesResponse, Status>;

    /// `PartyManagementService/ListKnownParties`
    async fn list_known_parties(
        &self,
        request: proto::ListKnownPartiesRequest,
    ) -> std::result::Result<proto::ListKnownPartiesResponse, Status>;

    /// `PartyManagementService/AllocateParty`
    async fn allocate_party(
        &self,
        request: proto::AllocatePartyRequest,
    ) -> std::result::Result<proto::AllocatePartyResponse, Status>;
}

/// Opens transports to a ledger address
#[async_trait]
pub trait Connect: Send + Sync {
    /// Transport produced
    type Transport: LedgerTransport;

    /// Establish a transport to `address`
    async fn connect(&self, address: &str) -> Result<Self::Transport>;
}

/// gRPC transport over a tonic channel
#[derive(Clone)]
pub struct GrpcTransport {
    grpc: tonic::client::Grpc<Channel>,
}

impl fmt::Debug for GrpcTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrpcTransport").finish_non_exhaustive()
    }
}

impl GrpcTransport {
    /// Wrap an established channel
    pub fn new(channel: Channel) -> Self {
        Self {
            grpc: tonic::client::Grpc::new(channel),
        }
    }

    async fn ready(&self) -> std::result::Result<tonic::client::Grpc<Channel>, Status> {
        let mut grpc = self.grpc.clone();
        grpc.ready()
            .await
            .map_err(|e| Status::new(Code::Unknown, format!("Service was not ready: {}", e)))?;
        Ok(grpc)
    }

    async fn unary<Req, Resp>(
        &self,
        request: Req,
        path: &'static str,
    ) -> std::result::Result<Resp, Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        debug!("Calling {}", path);
        let mut grpc = self.ready().await?;
        let codec = tonic::codec::ProstCodec::<Req, Resp>::default();

        grpc.unary(
            tonic::Request::new(request),
            PathAndQuery::from_static(path),
            codec,
        )
        .await
        .map(tonic::Response::into_inner)
    }

    async fn server_streaming<Req, Resp>(
        &self,
        request: Req,
        path: &'static str,
    ) -> std::result::Result<ResponseStream<Resp>, Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        debug!("Opening stream {}", path);
        let mut grpc = self.ready().await?;
        let codec = tonic::codec::ProstCodec::<Req, Resp>::default();

        let streaming = grpc
            .server_streaming(
                tonic::Request::new(request),
                PathAndQuery::from_static(path),
                codec,
            )
            .await?
            .into_inner();

        Ok(streaming.boxed())
    }
}

#[async_trait]
impl LedgerTransport for GrpcTransport {
    async fn get_ledger_api_version(
        &self,
        request: proto::GetLedgerApiVersionRequest,
    ) -> std::result::Result<proto::GetLedgerApiVersionResponse, Status> {
        self.unary(request, proto::paths::GET_LEDGER_API_VERSION).await
    }

    async fn get_ledger_end(
        &self,
        request: proto::GetLedgerEndRequest,
    ) -> std::result::Result<proto::GetLedgerEndResponse, Status> {
        self.unary(request, proto::paths::GET_LEDGER_END).await
    }

    async fn get_active_contracts(
        &self,
        request: proto::GetActiveContractsRequest,
    ) -> std::result::Result<ResponseStream<proto::GetActiveContractsResponse>, Status> {
        self.server_streaming(request, proto::paths::GET_ACTIVE_CONTRACTS)
            .await
    }

    async fn get_updates(
        &self,
        request: proto::GetUpdatesRequest,
    ) -> std::result::Result<ResponseStream<proto::GetUpdatesResponse>, Status> {
        self.server_streaming(request, proto::paths::GET_UPDATES).await
    }

    async fn submit_and_wait_for_transaction(
        &self,
        request: proto::SubmitAndWaitRequest,
    ) -> std::result::Result<proto::SubmitAndWaitForTransactionResponse, Status> {
        self.unary(request, proto::paths::SUBMIT_AND_WAIT_FOR_TRANSACTION)
            .await
    }

    async fn list_packages(
        &self,
        request: proto::ListPackagesRequest,
    ) -> std::result::Result<proto::ListPackagesResponse, Status> {
        self.unary(request, proto::paths::LIST_PACKAGES).await
    }

    async fn list_known_parties(
        &self,
        request: proto::ListKnownPartiesRequest,
    ) -> std::result::Result<proto::ListKnownPartiesResponse, Status> {
        self.unary(request, proto::paths::LIST_KNOWN_PARTIES).await
    }

    async fn allocate_party(
        &self,
        request: proto::AllocatePartyRequest,
    ) -> std::result::Result<proto::AllocatePartyResponse, Status> {
        self.unary(request, proto::paths::ALLOCATE_PARTY).await
    }
}

/// Connects [`GrpcTransport`]s over plaintext HTTP/2
#[derive(Debug, Clone)]
pub struct GrpcConnector {
    connect_timeout: Duration,
}

impl Default for GrpcConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl GrpcConnector {
    /// Connector giving up on connection after `connect_timeout`
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

#[async_trait]
impl Connect for GrpcConnector {
    type Transport = GrpcTransport;

    async fn connect(&self, address: &str) -> Result<GrpcTransport> {
        let uri = endpoint_uri(address);
        debug!("Connecting to {}", uri);

        let channel = Endpoint::from_shared(uri)?
            .connect_timeout(self.connect_timeout)
            .connect()
            .await?;

        Ok(GrpcTransport::new(channel))
    }
}

/// `host:port` addresses get an `http://` scheme
pub fn endpoint_uri(address: &str) -> String {
    if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uri() {
        assert_eq!(endpoint_uri("localhost:6865"), "http://localhost:6865");
        assert_eq!(endpoint_uri("https://ledger:443"), "https://ledger:443");
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_address() {
        let err = GrpcConnector::default().connect("not a uri").await.unwrap_err();
        assert!(matches!(err, crate::Error::Connection(_)));
    }
}
