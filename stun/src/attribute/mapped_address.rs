use std::io;
use std::net::SocketAddr;

use crate::attribute::address;
use crate::types::TransactionId;
use crate::wire::*;


/// A **MAPPED-ADDRESS** attribute, which contains the endpoint the server
/// saw the client’s request arrive from. This is the whole point of the
/// classic discovery procedure: a host behind a NAT sees its own private
/// address, and the server tells it the public one.
///
/// # References
///
/// - [RFC 3489 §11.2.1](https://tools.ietf.org/html/rfc3489) — STUN,
///   Simple Traversal of UDP Through NATs (March 2003)
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct MappedAddress {

    /// The endpoint contained in the packet.
    pub endpoint: SocketAddr,
}

impl Wire for MappedAddress {
    const NAME: &'static str = "MAPPED-ADDRESS";
    const ATTR_TYPE: u16 = 0x0001;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        let endpoint = address::read_endpoint(stated_length, c)?;
        Ok(Self { endpoint })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        address::write_endpoint(self.endpoint, bytes)
    }
}
