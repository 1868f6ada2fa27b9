use std::io;
use std::net::SocketAddr;

use crate::attribute::address;
use crate::types::TransactionId;
use crate::wire::*;


/// An **OTHER-ADDRESS** attribute, the behavior-discovery procedure’s
/// replacement for CHANGED-ADDRESS: the alternate endpoint the mapping
/// tests should send their follow-up requests to.
///
/// # References
///
/// - [RFC 5780 §7.4](https://tools.ietf.org/html/rfc5780) — NAT Behavior
///   Discovery Using STUN (May 2010)
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct OtherAddress {

    /// The endpoint contained in the packet.
    pub endpoint: SocketAddr,
}

impl Wire for OtherAddress {
    const NAME: &'static str = "OTHER-ADDRESS";
    const ATTR_TYPE: u16 = 0x802B;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        let endpoint = address::read_endpoint(stated_length, c)?;
        Ok(Self { endpoint })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        address::write_endpoint(self.endpoint, bytes)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    const TXID: TransactionId = TransactionId([0; 16]);

    #[test]
    fn parses() {
        let buf = &[
            0x00,        // reserved
            0x01,        // family (IPv4)
            0x0D, 0x97,  // port (3479)
            0xC6, 0x33, 0x64, 0x0A,  // address (198.51.100.10)
        ];

        assert_eq!(OtherAddress::read(buf.len() as _, &mut Cursor::new(buf), &TXID).unwrap(),
                   OtherAddress { endpoint: "198.51.100.10:3479".parse().unwrap() });
    }
}
