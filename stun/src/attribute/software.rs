use std::io;

use crate::types::TransactionId;
use crate::wire::*;


/// A **SOFTWARE** attribute, a free-form description of the software that
/// produced the message.
#[derive(PartialEq, Debug, Clone)]
pub struct Software {

    /// The description contained in the attribute.
    pub description: String,
}

impl Wire for Software {
    const NAME: &'static str = "SOFTWARE";
    const ATTR_TYPE: u16 = 0x8022;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        let mut buf = vec![0_u8; usize::from(stated_length)];
        c.read_exact(&mut buf)?;

        let description = String::from_utf8_lossy(&buf).to_string();
        Ok(Self { description })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        bytes.extend_from_slice(self.description.as_bytes());
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
            0x73, 0x74, 0x75, 0x6E, 0x64,  // "stund"
        ];

        assert_eq!(Software::read(buf.len() as _, &mut Cursor::new(buf), &TXID).unwrap(),
                   Software { description: "stund".into() });
    }
}
