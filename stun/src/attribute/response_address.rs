use std::io;
use std::net::SocketAddr;

use crate::attribute::address;
use crate::types::TransactionId;
use crate::wire::*;


/// A **RESPONSE-ADDRESS** attribute, which a client may send to ask the
/// server to direct its response somewhere other than the source of the
/// request. This client never sends one, but decodes it for completeness.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct ResponseAddress {

    /// The endpoint contained in the packet.
    pub endpoint: SocketAddr,
}

impl Wire for ResponseAddress {
    const NAME: &'static str = "RESPONSE-ADDRESS";
    const ATTR_TYPE: u16 = 0x0002;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        let endpoint = address::read_endpoint(stated_length, c)?;
        Ok(Self { endpoint })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        address::write_endpoint(self.endpoint, bytes)
    }
}
