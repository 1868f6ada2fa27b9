use std::io;

use log::*;

use crate::types::TransactionId;
use crate::wire::*;


/// A **FINGERPRINT** attribute: a CRC-32 over the message, XORed with a
/// fixed constant. Carried opaquely, like MESSAGE-INTEGRITY.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Fingerprint {

    /// The checksum contained in the attribute.
    pub checksum: u32,
}

impl Wire for Fingerprint {
    const NAME: &'static str = "FINGERPRINT";
    const ATTR_TYPE: u16 = 0x8028;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        if stated_length != 4 {
            warn!("Length is incorrect (attribute length {:?}, but should be four)", stated_length);
            let mandated_length = MandatedLength::Exactly(4);
            return Err(WireError::WrongAttributeLength { stated_length, mandated_length });
        }

        let checksum = c.read_u32::<BigEndian>()?;
        Ok(Self { checksum })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        bytes.write_u32::<BigEndian>(self.checksum)
    }
}
