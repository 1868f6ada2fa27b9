//! One probe: serialise a request, send it, wait for the deadline, and
//! validate whatever came back.
//!
//! Every reply goes through the same checks, in order: it must parse, it
//! must carry our transaction ID, and it must be a Binding Response or a
//! Binding Error Response. An error response must carry an ERROR-CODE
//! attribute to count as a server error; without one it’s just a bad
//! response.

use std::io;
use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::time::Duration;

use log::*;

use stun::{Message, MessageType, TransactionId};
use stun::attribute::{Attribute, ChangeRequest};

use crate::report::ServerError;
use crate::transport::{Error, Transport};


/// The ways a probe can cut a discovery run short. A timeout is only an
/// error on the probes where the engines expect an answer; elsewhere they
/// never construct one of these for it.
#[derive(Debug)]
pub(crate) enum ProbeError {

    /// No response arrived before the deadline.
    Timeout,

    /// The response was unusable: it failed to parse, lacked a required
    /// attribute, or was a message type we never asked for.
    BadResponse,

    /// The response carried somebody else’s transaction ID.
    BadTransactionId,

    /// The server responded with an error response.
    Server(ServerError),

    /// The server offered nothing to run the mapping test against.
    NotSupported,

    /// The socket itself failed. This one isn’t a verdict about the NAT;
    /// the façade surfaces it as a hard error instead.
    Transport(Error),
}

/// Sends the given request and waits for a validated reply. `Ok(None)`
/// means the deadline passed; what that signifies depends on which probe
/// this was, so interpreting it is the engine’s business.
pub(crate) fn exchange<T: Transport + ?Sized>(transport: &T, request: &Message, remote: SocketAddr, timeout: Duration) -> Result<Option<Message>, ProbeError> {
    let bytes = match request.to_bytes() {
        Ok(bytes)  => bytes,
        Err(ioe)   => return Err(ProbeError::Transport(ioe.into())),
    };

    transport.send_to(&bytes, remote).map_err(ProbeError::Transport)?;

    let datagram = match transport.receive(timeout).map_err(ProbeError::Transport)? {
        Some(datagram)  => datagram,
        None            => return Ok(None),
    };

    let message = match Message::from_bytes(&datagram) {
        Ok(message) => message,
        Err(e) => {
            warn!("Failed to parse response -> {:?}", e);
            return Err(ProbeError::BadResponse);
        }
    };

    if message.transaction_id != request.transaction_id {
        warn!("Response carries transaction ID {:?}, not ours", message.transaction_id);
        return Err(ProbeError::BadTransactionId);
    }

    match message.message_type {
        MessageType::BindingResponse => {
            debug!("Validated binding response with {} attributes", message.attributes.len());
            Ok(Some(message))
        }
        MessageType::BindingErrorResponse => {
            match message.error_code() {
                Some(ec) => {
                    info!("Server answered with error {} ({})", ec.code(), ec.phrase);
                    Err(ProbeError::Server(ServerError { code: ec.code(), phrase: ec.phrase.clone() }))
                }
                None => {
                    warn!("Error response carries no ERROR-CODE attribute");
                    Err(ProbeError::BadResponse)
                }
            }
        }
        other => {
            warn!("Response has unexpected message type {:?}", other);
            Err(ProbeError::BadResponse)
        }
    }
}


/// Builds a Binding Request carrying a CHANGE-REQUEST attribute with the
/// given flags.
pub(crate) fn change_request_probe(transaction_id: TransactionId, change_ip: bool, change_port: bool) -> Message {
    Message::binding_request_with(transaction_id, vec![
        Attribute::ChangeRequest(ChangeRequest { change_ip, change_port }),
    ])
}


/// The local endpoint the probes leave from, for comparing against the
/// endpoint the server reports.
///
/// A socket bound to the any-address reports an unspecified IP, which would
/// never compare equal to anything. In that case, aim a throwaway socket at
/// the server to learn which interface the probes actually leave through,
/// and substitute its address, keeping the real bound port.
pub(crate) fn observed_local_addr<T: Transport + ?Sized>(transport: &T, server: SocketAddr) -> Result<SocketAddr, ProbeError> {
    let local = transport.local_addr().map_err(ProbeError::Transport)?;
    if ! local.ip().is_unspecified() {
        return Ok(local);
    }

    match outbound_interface_ip(server) {
        Ok(ip) => {
            debug!("Bound to the any-address; outbound interface is {}", ip);
            Ok(SocketAddr::new(ip, local.port()))
        }
        Err(e) => {
            warn!("Failed to determine the outbound interface address: {}", e);
            Ok(local)
        }
    }
}

fn outbound_interface_ip(server: SocketAddr) -> io::Result<IpAddr> {
    let any: SocketAddr = if server.is_ipv4() {
        (std::net::Ipv4Addr::UNSPECIFIED, 0).into()
    }
    else {
        (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
    };

    let socket = UdpSocket::bind(any)?;
    socket.connect(server)?;
    Ok(socket.local_addr()?.ip())
}
