//! The classic discovery procedure, from the original 2003 STUN
//! specification.
//!
//! One fully random transaction ID is generated per run and reused for
//! every probe. The probes walk a fixed ladder: learn the mapped address
//! from the primary server, compare it against the local endpoint, ask the
//! server to respond from its alternate IP and port, then from its
//! alternate port only, and read a cone/symmetric verdict off which of
//! those responses make it back.
//!
//! # References
//!
//! - [RFC 3489 §10.1](https://tools.ietf.org/html/rfc3489) — STUN,
//!   Simple Traversal of UDP Through NATs (March 2003)

use log::*;

use std::net::SocketAddr;

use stun::{Message, TransactionId};

use crate::probe::{change_request_probe, exchange, observed_local_addr, ProbeError};
use crate::report::{NatType, QueryResult};
use crate::transport::Transport;
use crate::{Config, QueryType};


/// Runs classic discovery against the given server, filling in the result
/// as probes come back. A returned error names whichever failure ended the
/// run early.
pub(crate) fn discover<T: Transport + ?Sized>(transport: &T, server: SocketAddr, query_type: QueryType, config: &Config, result: &mut QueryResult) -> Result<(), ProbeError> {
    let transaction_id = TransactionId::random();

    let local = observed_local_addr(transport, server)?;
    result.local = Some(local);

    // First, a plain binding request to the primary server. Its answer is
    // required: without a mapped address there is nothing to discover.
    info!("Sending the initial binding request to {}", server);
    let request = Message::binding_request(transaction_id);
    let reply = match exchange(transport, &request, server, config.receive_timeout)? {
        Some(reply)  => reply,
        None         => return Err(ProbeError::Timeout),
    };

    let public = match reply.mapped_address() {
        Some(endpoint) => endpoint,
        None => {
            warn!("First response carries no MAPPED-ADDRESS");
            return Err(ProbeError::BadResponse);
        }
    };
    result.public = Some(public);
    let changed = reply.changed_address();

    if query_type == QueryType::PublicIp {
        // The public endpoint was the whole question.
        return Ok(());
    }

    if public == local {
        // The server saw exactly the endpoint we bound, so nothing
        // rewrote the packets. A change-request probe tells a firewall
        // from a truly open path.
        info!("Public endpoint equals local endpoint; probing for a firewall");
        let request = change_request_probe(transaction_id, true, true);
        match exchange(transport, &request, server, config.receive_timeout)? {
            Some(_reply) => {
                result.nat_type = NatType::OpenInternet;
            }
            None => {
                result.nat_type = NatType::SymmetricUdpFirewall;
            }
        }
        return Ok(());
    }

    // A NAT rewrote our source endpoint. If a response from the server’s
    // alternate IP and port still gets through, the mapping is open to
    // anyone.
    info!("NAT detected; asking {} to respond from its alternate endpoint", server);
    let request = change_request_probe(transaction_id, true, true);
    if exchange(transport, &request, server, config.receive_timeout)?.is_some() {
        result.nat_type = NatType::FullCone;
        return Ok(());
    }

    if query_type == QueryType::OpenNat {
        // There is a NAT, and that was the whole question.
        return Ok(());
    }

    let changed = match changed {
        Some(endpoint) => endpoint,
        None => {
            warn!("First response carried no CHANGED-ADDRESS to continue with");
            return Err(ProbeError::BadResponse);
        }
    };

    // Ask the alternate endpoint for our mapped address. A different
    // answer than the primary’s means the NAT allocates a mapping per
    // destination, and no single public endpoint exists.
    info!("Sending a binding request to the alternate endpoint {}", changed);
    let request = Message::binding_request(transaction_id);
    let reply = match exchange(transport, &request, changed, config.receive_timeout)? {
        Some(reply)  => reply,
        None         => return Err(ProbeError::Timeout),
    };

    let public_again = match reply.mapped_address() {
        Some(endpoint) => endpoint,
        None => {
            warn!("Alternate endpoint’s response carries no MAPPED-ADDRESS");
            return Err(ProbeError::BadResponse);
        }
    };

    if public_again != public {
        info!("Mapped address changed with the destination ({} vs {})", public_again, public);
        result.nat_type = NatType::Symmetric;
        result.public = None;
        return Ok(());
    }

    // The mapping is stable, so the remaining question is how strictly
    // inbound packets are filtered: by address, or by address and port.
    info!("Asking {} to respond from a different port", changed);
    let request = change_request_probe(transaction_id, false, true);
    match exchange(transport, &request, changed, config.receive_timeout)? {
        Some(_reply) => {
            result.nat_type = NatType::Restricted;
        }
        None => {
            result.nat_type = NatType::PortRestricted;
        }
    }

    Ok(())
}
