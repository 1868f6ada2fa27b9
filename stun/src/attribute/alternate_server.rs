use std::io;
use std::net::SocketAddr;

use crate::attribute::address;
use crate::types::TransactionId;
use crate::wire::*;


/// An **ALTERNATE-SERVER** attribute, with which a server suggests a
/// different server to try. This client surfaces it but never follows it.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct AlternateServer {

    /// The endpoint contained in the packet.
    pub endpoint: SocketAddr,
}

impl Wire for AlternateServer {
    const NAME: &'static str = "ALTERNATE-SERVER";
    const ATTR_TYPE: u16 = 0x8023;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        let endpoint = address::read_endpoint(stated_length, c)?;
        Ok(Self { endpoint })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        address::write_endpoint(self.endpoint, bytes)
    }
}
