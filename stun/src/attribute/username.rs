use std::io;

use crate::types::TransactionId;
use crate::wire::*;


/// A **USERNAME** attribute, used by STUN’s authentication mechanisms.
///
/// # Encoding
///
/// The text encoding is not specified, but this crate treats it as UTF-8.
/// Invalid bytes are turned into the replacement character.
#[derive(PartialEq, Debug, Clone)]
pub struct Username {

    /// The name contained in the attribute.
    pub name: String,
}

impl Wire for Username {
    const NAME: &'static str = "USERNAME";
    const ATTR_TYPE: u16 = 0x0006;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        let mut buf = vec![0_u8; usize::from(stated_length)];
        c.read_exact(&mut buf)?;

        let name = String::from_utf8_lossy(&buf).to_string();
        Ok(Self { name })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        bytes.extend_from_slice(self.name.as_bytes());
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
            0x67, 0x6E, 0x61, 0x74,  // "gnat"
        ];

        assert_eq!(Username::read(buf.len() as _, &mut Cursor::new(buf), &TXID).unwrap(),
                   Username { name: "gnat".into() });
    }

    #[test]
    fn buffer_ends_abruptly() {
        let buf = &[
            0x67, 0x6E,  // half a name
        ];

        assert_eq!(Username::read(4, &mut Cursor::new(buf), &TXID),
                   Err(WireError::IO));
    }
}
