use std::io;

use log::*;

use crate::types::TransactionId;
use crate::wire::*;


/// A **MESSAGE-INTEGRITY** attribute: an HMAC-SHA1 digest over the message.
/// This crate carries the twenty digest octets opaquely — computing or
/// verifying them belongs to STUN’s authentication mechanisms, which the
/// discovery procedures don’t use.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct MessageIntegrity {

    /// The digest contained in the attribute.
    pub digest: [u8; 20],
}

impl Wire for MessageIntegrity {
    const NAME: &'static str = "MESSAGE-INTEGRITY";
    const ATTR_TYPE: u16 = 0x0008;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        if stated_length != 20 {
            warn!("Length is incorrect (attribute length {:?}, but should be twenty)", stated_length);
            let mandated_length = MandatedLength::Exactly(20);
            return Err(WireError::WrongAttributeLength { stated_length, mandated_length });
        }

        let mut digest = [0_u8; 20];
        c.read_exact(&mut digest)?;

        Ok(Self { digest })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        bytes.extend_from_slice(&self.digest);
        Ok(())
    }
}
