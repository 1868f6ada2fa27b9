use std::io;
use std::net::SocketAddr;

use crate::attribute::address;
use crate::types::TransactionId;
use crate::wire::*;


/// A **REFLECTED-FROM** attribute, a classic-era companion to
/// RESPONSE-ADDRESS. Decoded for completeness.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct ReflectedFrom {

    /// The endpoint contained in the packet.
    pub endpoint: SocketAddr,
}

impl Wire for ReflectedFrom {
    const NAME: &'static str = "REFLECTED-FROM";
    const ATTR_TYPE: u16 = 0x000B;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        let endpoint = address::read_endpoint(stated_length, c)?;
        Ok(Self { endpoint })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        address::write_endpoint(self.endpoint, bytes)
    }
}
