//! The verdicts and results that a discovery run produces.

use std::fmt;
use std::net::SocketAddr;

use crate::{DiscoveryVariant, QueryType};


/// Everything a discovery run found out.
#[derive(PartialEq, Debug, Clone)]
pub struct QueryResult {

    /// The question this run set out to answer.
    pub query_type: QueryType,

    /// The discovery procedure that was run.
    pub variant: DiscoveryVariant,

    /// How the run ended. `Success` means the fields below hold a verdict;
    /// anything else names the probe failure that cut the run short.
    pub error: QueryError,

    /// The server the probes were sent to.
    pub server: SocketAddr,

    /// The local endpoint the probes were sent from.
    pub local: Option<SocketAddr>,

    /// The public endpoint the server saw the probes arrive from. Absent
    /// for a Symmetric verdict from the classic procedure, because the
    /// external port changes with every destination.
    pub public: Option<SocketAddr>,

    /// The NAT classification.
    pub nat_type: NatType,

    /// The error the server responded with, when `error` is `ServerError`.
    pub server_error: Option<ServerError>,

    /// How the NAT chooses external mappings, when the behavior-discovery
    /// procedure measured it.
    pub mapping: Option<MappingBehavior>,

    /// Which inbound packets the NAT lets through, when the
    /// behavior-discovery procedure measured it.
    pub filtering: Option<FilteringBehavior>,
}

impl QueryResult {

    /// A result with nothing discovered yet. The engines fill it in as
    /// their probes come back.
    pub(crate) fn unspecified(query_type: QueryType, variant: DiscoveryVariant, server: SocketAddr) -> Self {
        Self {
            query_type,
            variant,
            error: QueryError::Success,
            server,
            local: None,
            public: None,
            nat_type: NatType::Unspecified,
            server_error: None,
            mapping: None,
            filtering: None,
        }
    }
}


/// The legacy cone/symmetric NAT classification.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum NatType {

    /// No classification was reached. This is the verdict when a query
    /// asked a narrower question than full discovery, as well as the
    /// placeholder when a run fails.
    Unspecified,

    /// No NAT and no firewall: the host is reachable directly.
    OpenInternet,

    /// One external mapping per local socket, open to anyone.
    FullCone,

    /// One external mapping per local socket, filtered by remote address.
    Restricted,

    /// One external mapping per local socket, filtered by remote address
    /// and port.
    PortRestricted,

    /// A fresh external mapping per destination. No single public endpoint
    /// exists for the socket.
    Symmetric,

    /// No address translation, but a firewall that only passes inbound
    /// packets from endpoints this host has already sent to.
    SymmetricUdpFirewall,
}

impl fmt::Display for NatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified           => write!(f, "Unspecified"),
            Self::OpenInternet          => write!(f, "Open Internet"),
            Self::FullCone              => write!(f, "Full cone"),
            Self::Restricted            => write!(f, "Restricted cone"),
            Self::PortRestricted        => write!(f, "Port-restricted cone"),
            Self::Symmetric             => write!(f, "Symmetric"),
            Self::SymmetricUdpFirewall  => write!(f, "Symmetric UDP firewall"),
        }
    }
}


/// How a NAT chooses the external address and port for outbound packets as
/// the destination varies.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum MappingBehavior {

    /// There is no NAT: the local endpoint is the public one.
    NoMapping,

    /// The same external mapping is reused for every destination.
    EndpointIndependent,

    /// A new mapping per destination address.
    AddressDependent,

    /// A new mapping per destination address and port.
    AddressAndPortDependent,
}

impl fmt::Display for MappingBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMapping                => write!(f, "No mapping"),
            Self::EndpointIndependent      => write!(f, "Endpoint-independent"),
            Self::AddressDependent         => write!(f, "Address-dependent"),
            Self::AddressAndPortDependent  => write!(f, "Address-and-port-dependent"),
        }
    }
}


/// Which inbound packets a NAT allows through an external mapping, based on
/// where the host has already sent packets.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum FilteringBehavior {

    /// Anyone may send to the mapping.
    EndpointIndependent,

    /// Only addresses this host has sent to may send back.
    AddressDependent,

    /// Only exact endpoints this host has sent to may send back.
    AddressAndPortDependent,
}

impl fmt::Display for FilteringBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndpointIndependent      => write!(f, "Endpoint-independent"),
            Self::AddressDependent         => write!(f, "Address-dependent"),
            Self::AddressAndPortDependent  => write!(f, "Address-and-port-dependent"),
        }
    }
}


/// How a discovery run ended.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum QueryError {

    /// The run reached a verdict.
    Success,

    /// The server answered a probe with an error response.
    ServerError,

    /// A response failed to parse, or lacked an attribute the procedure
    /// needs, or wasn’t a kind of response the procedure expects.
    BadResponse,

    /// A response carried a transaction ID that wasn’t ours.
    BadTransactionId,

    /// No response arrived before the deadline, on a probe where silence
    /// isn’t a classification signal.
    Timeout,

    /// The server doesn’t support behavior discovery: it offered neither
    /// an OTHER-ADDRESS nor a CHANGED-ADDRESS to probe against.
    NotSupported,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success           => write!(f, "Success"),
            Self::ServerError       => write!(f, "Server error"),
            Self::BadResponse       => write!(f, "Bad response"),
            Self::BadTransactionId  => write!(f, "Bad transaction ID"),
            Self::Timeout           => write!(f, "Timeout"),
            Self::NotSupported      => write!(f, "Not supported"),
        }
    }
}


/// The contents of an ERROR-CODE attribute the server sent back.
#[derive(PartialEq, Debug, Clone)]
pub struct ServerError {

    /// The composite numeric code, such as `420`.
    pub code: u16,

    /// The reason phrase that came with it.
    pub phrase: String,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.phrase)
    }
}
