use std::io;
use std::net::SocketAddr;

use crate::attribute::address;
use crate::types::TransactionId;
use crate::wire::*;


/// A **RESPONSE-ORIGIN** attribute, the behavior-discovery equivalent of
/// SOURCE-ADDRESS: the endpoint the server actually responded from.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct ResponseOrigin {

    /// The endpoint contained in the packet.
    pub endpoint: SocketAddr,
}

impl Wire for ResponseOrigin {
    const NAME: &'static str = "RESPONSE-ORIGIN";
    const ATTR_TYPE: u16 = 0x802C;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        let endpoint = address::read_endpoint(stated_length, c)?;
        Ok(Self { endpoint })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        address::write_endpoint(self.endpoint, bytes)
    }
}
