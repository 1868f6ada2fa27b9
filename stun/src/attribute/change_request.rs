use std::io;

use log::*;

use crate::types::TransactionId;
use crate::wire::*;


/// A **CHANGE-REQUEST** attribute, with which the client asks the server to
/// respond from a different IP address and/or port than the one the request
/// was sent to. Whether such a response arrives at all is how the discovery
/// procedures probe a NAT’s filtering behavior.
///
/// # References
///
/// - [RFC 3489 §11.2.4](https://tools.ietf.org/html/rfc3489) — STUN,
///   Simple Traversal of UDP Through NATs (March 2003)
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct ChangeRequest {

    /// Whether the server should respond from a different IP address.
    pub change_ip: bool,

    /// Whether the server should respond from a different port.
    pub change_port: bool,
}

const CHANGE_IP_BIT: u32 = 0b_0100;
const CHANGE_PORT_BIT: u32 = 0b_0010;

impl Wire for ChangeRequest {
    const NAME: &'static str = "CHANGE-REQUEST";
    const ATTR_TYPE: u16 = 0x0003;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        if stated_length != 4 {
            warn!("Length is incorrect (attribute length {:?}, but should be four)", stated_length);
            let mandated_length = MandatedLength::Exactly(4);
            return Err(WireError::WrongAttributeLength { stated_length, mandated_length });
        }

        let flags = c.read_u32::<BigEndian>()?;
        trace!("Read flags -> {:#06b}", flags);

        let change_ip   = flags & CHANGE_IP_BIT   != 0;
        let change_port = flags & CHANGE_PORT_BIT != 0;

        Ok(Self { change_ip, change_port })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        let mut flags = 0_u32;
        if self.change_ip   { flags |= CHANGE_IP_BIT; }
        if self.change_port { flags |= CHANGE_PORT_BIT; }

        bytes.write_u32::<BigEndian>(flags)
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
            0x00, 0x00, 0x00, 0x06,  // change IP and change port
        ];

        assert_eq!(ChangeRequest::read(buf.len() as _, &mut Cursor::new(buf), &TXID).unwrap(),
                   ChangeRequest { change_ip: true, change_port: true });
    }

    #[test]
    fn parses_port_only() {
        let buf = &[
            0x00, 0x00, 0x00, 0x02,  // change port
        ];

        assert_eq!(ChangeRequest::read(buf.len() as _, &mut Cursor::new(buf), &TXID).unwrap(),
                   ChangeRequest { change_ip: false, change_port: true });
    }

    #[test]
    fn record_too_short() {
        let buf = &[
            0x00, 0x00, 0x06,  // too few flag bytes
        ];

        assert_eq!(ChangeRequest::read(buf.len() as _, &mut Cursor::new(buf), &TXID),
                   Err(WireError::WrongAttributeLength { stated_length: 3, mandated_length: MandatedLength::Exactly(4) }));
    }

    #[test]
    fn record_empty() {
        assert_eq!(ChangeRequest::read(0, &mut Cursor::new(&[]), &TXID),
                   Err(WireError::WrongAttributeLength { stated_length: 0, mandated_length: MandatedLength::Exactly(4) }));
    }

    #[test]
    fn round_trips() {
        let attribute = ChangeRequest { change_ip: true, change_port: false };

        let mut bytes = Vec::new();
        attribute.write(&mut bytes, &TXID).unwrap();

        assert_eq!(bytes, &[ 0x00, 0x00, 0x00, 0x04 ]);
        assert_eq!(ChangeRequest::read(bytes.len() as _, &mut Cursor::new(&bytes), &TXID).unwrap(),
                   attribute);
    }
}
