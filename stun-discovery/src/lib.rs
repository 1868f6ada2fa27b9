#![warn(deprecated_in_future)]
#![warn(future_incompatible)]
#![warn(missing_copy_implementations)]
#![warn(missing_docs)]
#![warn(nonstandard_style)]
#![warn(rust_2018_compatibility)]
#![warn(rust_2018_idioms)]
#![warn(single_use_lifetimes)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused)]

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::wildcard_imports)]

#![deny(clippy::cast_possible_truncation)]
#![deny(clippy::cast_lossless)]
#![deny(clippy::cast_possible_wrap)]
#![deny(clippy::cast_sign_loss)]
#![deny(unsafe_code)]


//! The discovery crate is the ‘brains’ part of gnat. It owns the transport
//! that probes travel over and the two procedures that decide what to send
//! next: the classic binding/change-request ladder, and behavior discovery,
//! which measures mapping and filtering independently.
//!
//! Both procedures are synchronous and single-threaded: each probe is
//! answered (or times out) before the next one is built. A run owns its
//! socket for its whole duration, and the only timing knob is the receive
//! timeout, applied to every wait independently.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::thread;
use std::time::Duration;

use log::*;


mod transport;
pub use self::transport::{Transport, Error};

mod report;
pub use self::report::{QueryResult, NatType, MappingBehavior, FilteringBehavior, QueryError, ServerError};

mod probe;

mod classic;

mod behavior;


/// The question a discovery run sets out to answer. Narrower questions
/// take fewer probes.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum QueryType {

    /// Just the public endpoint: one probe.
    PublicIp,

    /// Whether a NAT sits in front of this host at all.
    OpenNat,

    /// The full classification.
    ExactNat,
}


/// Which discovery procedure to run.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum DiscoveryVariant {

    /// The classic binding/change-request procedure.
    Rfc3489,

    /// The behavior-discovery procedure, which measures mapping and
    /// filtering separately.
    Rfc5780,
}


/// Configuration for a discovery run.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Config {

    /// How long to wait for each response. A probe that misses this
    /// deadline is never retried; depending on the probe, the silence is
    /// either a classification signal or a `Timeout` verdict.
    pub receive_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            receive_timeout: Duration::from_millis(2000),
        }
    }
}


/// Runs a discovery query over a fresh UDP socket, bound to the given
/// local address if one is supplied and to an ephemeral any-address port
/// otherwise. The socket is closed when the run finishes.
///
/// Binding to the any-address weakens one check: the comparison between
/// the local endpoint and the server-reported one falls back to probing
/// for the outbound interface address, which can misjudge multi-homed
/// hosts. Supply a local address to make that comparison exact.
///
/// # Errors
///
/// Returns an `Error` if the socket cannot be bound, or if sending or
/// receiving fails at the I/O level. Protocol-level failures — timeouts,
/// unusable responses, server errors — are reported in the result’s
/// `error` field instead.
pub fn query(server: SocketAddr, query_type: QueryType, variant: DiscoveryVariant, local_bind: Option<SocketAddr>, config: &Config) -> Result<QueryResult, Error> {
    let bind_addr = local_bind.unwrap_or_else(|| any_address_for(server));

    info!("Opening UDP socket bound to {}", bind_addr);
    let socket = UdpSocket::bind(bind_addr)?;

    query_with_transport(&socket, server, query_type, variant, config)
}


/// Runs a discovery query over a socket the caller already owns. The
/// socket is borrowed, never closed, and can be reused afterwards — though
/// any NAT mappings the probes created will name it.
///
/// # Errors
///
/// As for [`query`].
pub fn query_with_socket(socket: &UdpSocket, server: SocketAddr, query_type: QueryType, variant: DiscoveryVariant, config: &Config) -> Result<QueryResult, Error> {
    query_with_transport(socket, server, query_type, variant, config)
}


/// Runs a discovery query over any transport. Given the same sequence of
/// replies and timeouts, the verdict is the same every time — which is
/// exactly what the scripted transports in the tests rely on.
///
/// # Errors
///
/// As for [`query`].
pub fn query_with_transport<T: Transport + ?Sized>(transport: &T, server: SocketAddr, query_type: QueryType, variant: DiscoveryVariant, config: &Config) -> Result<QueryResult, Error> {
    info!("Running {:?} discovery ({:?}) against {}", variant, query_type, server);
    let mut result = QueryResult::unspecified(query_type, variant, server);

    let outcome = match variant {
        DiscoveryVariant::Rfc3489 => classic::discover(transport, server, query_type, config, &mut result),
        DiscoveryVariant::Rfc5780 => behavior::discover(transport, server, query_type, config, &mut result),
    };

    match outcome {
        Ok(()) => {
            debug!("Discovery finished -> {:?}", result.nat_type);
        }
        Err(probe::ProbeError::Transport(e)) => {
            return Err(e);
        }
        Err(probe::ProbeError::Timeout) => {
            result.error = QueryError::Timeout;
        }
        Err(probe::ProbeError::BadResponse) => {
            result.error = QueryError::BadResponse;
        }
        Err(probe::ProbeError::BadTransactionId) => {
            result.error = QueryError::BadTransactionId;
        }
        Err(probe::ProbeError::NotSupported) => {
            result.error = QueryError::NotSupported;
        }
        Err(probe::ProbeError::Server(se)) => {
            result.error = QueryError::ServerError;
            result.server_error = Some(se);
        }
    }

    Ok(result)
}


/// Runs [`query`] on a worker thread, handing back the join handle. The
/// run itself stays synchronous; the only suspension point is here at the
/// boundary, never inside the procedures.
pub fn spawn_query(server: SocketAddr, query_type: QueryType, variant: DiscoveryVariant, local_bind: Option<SocketAddr>, config: Config) -> thread::JoinHandle<Result<QueryResult, Error>> {
    thread::spawn(move || query(server, query_type, variant, local_bind, &config))
}


/// The unspecified address in the server’s family, with an ephemeral port.
fn any_address_for(server: SocketAddr) -> SocketAddr {
    if server.is_ipv4() {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)
    }
    else {
        SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0)
    }
}
