use std::io;

use log::*;

use crate::types::TransactionId;
use crate::wire::*;


/// An **UNKNOWN-ATTRIBUTES** attribute, carried by a 420 error response to
/// list the comprehension-required attribute types the server did not
/// understand.
#[derive(PartialEq, Debug, Clone)]
pub struct UnknownAttributes {

    /// The attribute type numbers contained in the packet.
    pub types: Vec<u16>,
}

impl Wire for UnknownAttributes {
    const NAME: &'static str = "UNKNOWN-ATTRIBUTES";
    const ATTR_TYPE: u16 = 0x000A;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        if stated_length % 2 != 0 {
            warn!("Length is incorrect (attribute length {:?}, but should be a run of two-byte types)", stated_length);
            let mandated_length = MandatedLength::MultipleOf(2);
            return Err(WireError::WrongAttributeLength { stated_length, mandated_length });
        }

        let mut types = Vec::with_capacity(usize::from(stated_length / 2));
        for _ in 0 .. stated_length / 2 {
            types.push(c.read_u16::<BigEndian>()?);
        }
        trace!("Parsed types -> {:?}", types);

        Ok(Self { types })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        for type_number in &self.types {
            bytes.write_u16::<BigEndian>(*type_number)?;
        }
        Ok(())
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
            0x00, 0x08,  // MESSAGE-INTEGRITY
            0x80, 0x28,  // FINGERPRINT
        ];

        assert_eq!(UnknownAttributes::read(buf.len() as _, &mut Cursor::new(buf), &TXID).unwrap(),
                   UnknownAttributes { types: vec![ 0x0008, 0x8028 ] });
    }

    #[test]
    fn odd_length() {
        let buf = &[
            0x00, 0x08, 0x80,  // one and a half types
        ];

        assert_eq!(UnknownAttributes::read(buf.len() as _, &mut Cursor::new(buf), &TXID),
                   Err(WireError::WrongAttributeLength { stated_length: 3, mandated_length: MandatedLength::MultipleOf(2) }));
    }

    #[test]
    fn record_empty() {
        assert_eq!(UnknownAttributes::read(0, &mut Cursor::new(&[]), &TXID).unwrap(),
                   UnknownAttributes { types: vec![] });
    }
}
