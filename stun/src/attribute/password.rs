use std::io;

use crate::types::TransactionId;
use crate::wire::*;


/// A **PASSWORD** attribute, sent by classic-era servers in Shared Secret
/// responses. Decoded for completeness; this client never requests one.
#[derive(PartialEq, Debug, Clone)]
pub struct Password {

    /// The password contained in the attribute.
    pub password: String,
}

impl Wire for Password {
    const NAME: &'static str = "PASSWORD";
    const ATTR_TYPE: u16 = 0x0007;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        let mut buf = vec![0_u8; usize::from(stated_length)];
        c.read_exact(&mut buf)?;

        let password = String::from_utf8_lossy(&buf).to_string();
        Ok(Self { password })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        bytes.extend_from_slice(self.password.as_bytes());
        Ok(())
    }
}
