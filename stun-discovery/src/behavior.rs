//! The behavior-discovery procedure, from the 2010 revision of NAT
//! characterization.
//!
//! Where the classic procedure reads one verdict off one ladder of probes,
//! this one measures two properties independently — how the NAT allocates
//! external mappings, and which inbound packets it lets through — and then
//! derives the legacy taxonomy from the pair. The transaction ID carries
//! the magic cookie in its first four octets, and the mapped address
//! arrives XOR-obfuscated.
//!
//! # References
//!
//! - [RFC 5780 §4](https://tools.ietf.org/html/rfc5780) — NAT Behavior
//!   Discovery Using STUN (May 2010)

use log::*;

use std::net::SocketAddr;

use stun::{Message, TransactionId};

use crate::probe::{change_request_probe, exchange, observed_local_addr, ProbeError};
use crate::report::{FilteringBehavior, MappingBehavior, NatType, QueryResult};
use crate::transport::Transport;
use crate::{Config, QueryType};


/// Runs behavior discovery against the given server, filling in the result
/// as probes come back.
pub(crate) fn discover<T: Transport + ?Sized>(transport: &T, server: SocketAddr, query_type: QueryType, config: &Config, result: &mut QueryResult) -> Result<(), ProbeError> {
    let transaction_id = TransactionId::with_magic_cookie();

    let local = observed_local_addr(transport, server)?;
    result.local = Some(local);

    // The opening request doubles as the first mapping test: it learns our
    // public endpoint, and which alternate endpoint the server offers for
    // the follow-up tests.
    info!("Sending the initial binding request to {}", server);
    let request = Message::binding_request(transaction_id);
    let reply = match exchange(transport, &request, server, config.receive_timeout)? {
        Some(reply)  => reply,
        None         => return Err(ProbeError::Timeout),
    };

    let other = reply.other_address().or_else(|| reply.changed_address());

    let first_mapped = match reply.xor_mapped_address() {
        Some(endpoint) => endpoint,
        None if other.is_none() => {
            info!("Server speaks neither XOR-MAPPED-ADDRESS nor an alternate endpoint");
            return Err(ProbeError::NotSupported);
        }
        None => {
            warn!("First response carries no XOR-MAPPED-ADDRESS");
            return Err(ProbeError::BadResponse);
        }
    };
    result.public = Some(first_mapped);

    if query_type == QueryType::PublicIp {
        return Ok(());
    }

    let mapping = mapping_test(transport, server, other, first_mapped, local, transaction_id, config)?;
    result.mapping = Some(mapping);

    if query_type == QueryType::OpenNat {
        // Filtering can’t change whether a NAT exists, so skip measuring
        // it. An endpoint-independent mapping alone doesn’t pick a cone
        // type, and that part of the verdict stays unspecified.
        result.nat_type = match mapping {
            MappingBehavior::NoMapping            => NatType::OpenInternet,
            MappingBehavior::EndpointIndependent  => NatType::Unspecified,
            _                                     => NatType::Symmetric,
        };
        return Ok(());
    }

    let filtering = filtering_test(transport, server, transaction_id, config)?;
    result.filtering = Some(filtering);

    result.nat_type = synthesize(mapping, filtering);
    Ok(())
}


/// The mapping tests: ask for our mapped address from the alternate
/// address at the primary port, and if it moved, from the alternate
/// address and port too.
fn mapping_test<T: Transport + ?Sized>(transport: &T, server: SocketAddr, other: Option<SocketAddr>, first_mapped: SocketAddr, local: SocketAddr, transaction_id: TransactionId, config: &Config) -> Result<MappingBehavior, ProbeError> {
    let other = match other {
        Some(endpoint) => endpoint,
        None => {
            info!("Server offered no alternate endpoint for the mapping tests");
            return Err(ProbeError::NotSupported);
        }
    };

    let target = SocketAddr::new(other.ip(), server.port());
    info!("Repeating the binding request toward {}", target);
    let request = Message::binding_request(transaction_id);
    let reply = match exchange(transport, &request, target, config.receive_timeout)? {
        Some(reply)  => reply,
        None         => return Err(ProbeError::Timeout),
    };

    let second_mapped = match reply.xor_mapped_address() {
        Some(endpoint) => endpoint,
        None => {
            warn!("Mapping test response carries no XOR-MAPPED-ADDRESS");
            return Err(ProbeError::BadResponse);
        }
    };

    if second_mapped == first_mapped {
        return Ok(if first_mapped == local {
            MappingBehavior::NoMapping
        }
        else {
            MappingBehavior::EndpointIndependent
        });
    }

    info!("Mapping moved with the address; repeating toward {}", other);
    let request = Message::binding_request(transaction_id);
    let reply = match exchange(transport, &request, other, config.receive_timeout)? {
        Some(reply)  => reply,
        None         => return Err(ProbeError::Timeout),
    };

    let third_mapped = match reply.xor_mapped_address() {
        Some(endpoint) => endpoint,
        None => {
            warn!("Mapping test response carries no XOR-MAPPED-ADDRESS");
            return Err(ProbeError::BadResponse);
        }
    };

    Ok(if third_mapped == second_mapped {
        MappingBehavior::AddressDependent
    }
    else {
        MappingBehavior::AddressAndPortDependent
    })
}


/// The filtering tests: ask the primary server to respond from elsewhere,
/// and read the filtering off which of the responses arrive.
fn filtering_test<T: Transport + ?Sized>(transport: &T, server: SocketAddr, transaction_id: TransactionId, config: &Config) -> Result<FilteringBehavior, ProbeError> {
    info!("Asking {} to respond from its alternate IP and port", server);
    let request = change_request_probe(transaction_id, true, true);
    if exchange(transport, &request, server, config.receive_timeout)?.is_some() {
        return Ok(FilteringBehavior::EndpointIndependent);
    }

    info!("Asking {} to respond from its alternate port only", server);
    let request = change_request_probe(transaction_id, false, true);
    Ok(if exchange(transport, &request, server, config.receive_timeout)?.is_some() {
        FilteringBehavior::AddressDependent
    }
    else {
        FilteringBehavior::AddressAndPortDependent
    })
}


/// Derives the legacy taxonomy from the two measured behaviors.
fn synthesize(mapping: MappingBehavior, filtering: FilteringBehavior) -> NatType {
    match (mapping, filtering) {
        (MappingBehavior::NoMapping, _)               => NatType::OpenInternet,
        (MappingBehavior::EndpointIndependent, f)     => match f {
            FilteringBehavior::EndpointIndependent      => NatType::FullCone,
            FilteringBehavior::AddressDependent         => NatType::Restricted,
            FilteringBehavior::AddressAndPortDependent  => NatType::PortRestricted,
        },
        (MappingBehavior::AddressDependent, _) |
        (MappingBehavior::AddressAndPortDependent, _) => NatType::Symmetric,
    }
}
