use std::io;
use std::net::SocketAddr;

use crate::attribute::address;
use crate::types::TransactionId;
use crate::wire::*;


/// A **SOURCE-ADDRESS** attribute, which holds the endpoint the server
/// sent its response from. Useful when a change-request probe asked the
/// server to respond from its alternate address.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct SourceAddress {

    /// The endpoint contained in the packet.
    pub endpoint: SocketAddr,
}

impl Wire for SourceAddress {
    const NAME: &'static str = "SOURCE-ADDRESS";
    const ATTR_TYPE: u16 = 0x0004;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        let endpoint = address::read_endpoint(stated_length, c)?;
        Ok(Self { endpoint })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        address::write_endpoint(self.endpoint, bytes)
    }
}
