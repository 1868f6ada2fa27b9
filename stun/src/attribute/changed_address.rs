use std::io;
use std::net::SocketAddr;

use crate::attribute::address;
use crate::types::TransactionId;
use crate::wire::*;


/// A **CHANGED-ADDRESS** attribute, which holds the alternate endpoint the
/// server would respond from if asked to change both its IP and port. The
/// classic procedure sends its later probes to this endpoint.
///
/// # References
///
/// - [RFC 3489 §11.2.3](https://tools.ietf.org/html/rfc3489) — STUN,
///   Simple Traversal of UDP Through NATs (March 2003)
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct ChangedAddress {

    /// The endpoint contained in the packet.
    pub endpoint: SocketAddr,
}

impl Wire for ChangedAddress {
    const NAME: &'static str = "CHANGED-ADDRESS";
    const ATTR_TYPE: u16 = 0x0005;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        let endpoint = address::read_endpoint(stated_length, c)?;
        Ok(Self { endpoint })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        address::write_endpoint(self.endpoint, bytes)
    }
}
