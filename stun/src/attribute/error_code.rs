use std::io;

use log::*;

use crate::types::TransactionId;
use crate::wire::*;


/// An **ERROR-CODE** attribute, carried by error responses. The code is
/// split across two octets on the wire: a class (the hundreds digit, valid
/// between 3 and 6) and a number (the remainder, valid between 0 and 99),
/// followed by a human-readable phrase.
///
/// # Encoding
///
/// The phrase must be valid UTF-8; a response carrying anything else
/// fails to decode.
///
/// # References
///
/// - [RFC 3489 §11.2.9](https://tools.ietf.org/html/rfc3489) — STUN,
///   Simple Traversal of UDP Through NATs (March 2003)
#[derive(PartialEq, Debug, Clone)]
pub struct ErrorCode {

    /// The error class, the hundreds digit of the composite code.
    pub class: u8,

    /// The error number within the class.
    pub number: u8,

    /// The reason phrase contained in the packet.
    pub phrase: String,
}

impl ErrorCode {

    /// The composite numeric code, such as `420`.
    pub fn code(&self) -> u16 {
        u16::from(self.class) * 100 + u16::from(self.number)
    }
}

impl Wire for ErrorCode {
    const NAME: &'static str = "ERROR-CODE";
    const ATTR_TYPE: u16 = 0x0009;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, _transaction_id: &TransactionId) -> Result<Self, WireError> {
        if stated_length < 4 {
            warn!("Length is incorrect (attribute length {:?}, but should be at least four)", stated_length);
            let mandated_length = MandatedLength::AtLeast(4);
            return Err(WireError::WrongAttributeLength { stated_length, mandated_length });
        }

        let _reserved = c.read_u16::<BigEndian>()?;

        let class = c.read_u8()? & 0b_0000_0111;
        trace!("Read class -> {:?}", class);

        let number = c.read_u8()?;
        trace!("Read number -> {:?}", number);

        if !(3 ..= 6).contains(&class) || number > 99 {
            warn!("Error class {} or number {} is out of range", class, number);
            return Err(WireError::InvalidErrorCode { class, number });
        }

        let mut buf = vec![0_u8; usize::from(stated_length - 4)];
        c.read_exact(&mut buf)?;

        let phrase = match String::from_utf8(buf) {
            Ok(phrase) => phrase,
            Err(e) => {
                warn!("Phrase is not valid UTF-8 -> {:?}", e.utf8_error());
                return Err(WireError::InvalidPhrase);
            }
        };
        trace!("Parsed phrase -> {:?}", phrase);

        Ok(Self { class, number, phrase })
    }

    fn write(&self, bytes: &mut Vec<u8>, _transaction_id: &TransactionId) -> io::Result<()> {
        bytes.write_u16::<BigEndian>(0)?;  // reserved
        bytes.write_u8(self.class)?;
        bytes.write_u8(self.number)?;
        bytes.extend_from_slice(self.phrase.as_bytes());
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
            0x00, 0x00,  // reserved
            0x04,        // class
            0x14,        // number (20)
            0x42, 0x61, 0x64, 0x20, 0x52, 0x65, 0x71, 0x75,  // phrase...
            0x65, 0x73, 0x74,  // ("Bad Request")
        ];

        let attribute = ErrorCode::read(buf.len() as _, &mut Cursor::new(buf), &TXID).unwrap();
        assert_eq!(attribute, ErrorCode { class: 4, number: 20, phrase: "Bad Request".into() });
        assert_eq!(attribute.code(), 420);
    }

    #[test]
    fn parses_empty_phrase() {
        let buf = &[
            0x00, 0x00,  // reserved
            0x05,        // class
            0x00,        // number
        ];

        let attribute = ErrorCode::read(buf.len() as _, &mut Cursor::new(buf), &TXID).unwrap();
        assert_eq!(attribute.code(), 500);
        assert_eq!(attribute.phrase, "");
    }

    #[test]
    fn class_out_of_range() {
        let buf = &[
            0x00, 0x00,  // reserved
            0x02,        // class (too low)
            0x00,        // number
        ];

        assert_eq!(ErrorCode::read(buf.len() as _, &mut Cursor::new(buf), &TXID),
                   Err(WireError::InvalidErrorCode { class: 2, number: 0 }));
    }

    #[test]
    fn number_out_of_range() {
        let buf = &[
            0x00, 0x00,  // reserved
            0x04,        // class
            0x64,        // number (100)
        ];

        assert_eq!(ErrorCode::read(buf.len() as _, &mut Cursor::new(buf), &TXID),
                   Err(WireError::InvalidErrorCode { class: 4, number: 100 }));
    }

    #[test]
    fn record_too_short() {
        let buf = &[
            0x00, 0x00,  // reserved, and nothing else
        ];

        assert_eq!(ErrorCode::read(buf.len() as _, &mut Cursor::new(buf), &TXID),
                   Err(WireError::WrongAttributeLength { stated_length: 2, mandated_length: MandatedLength::AtLeast(4) }));
    }

    #[test]
    fn phrase_not_utf8() {
        let buf = &[
            0x00, 0x00,  // reserved
            0x04,        // class
            0x14,        // number (20)
            0xFF, 0xFE,  // a phrase that is not UTF-8
        ];

        assert_eq!(ErrorCode::read(buf.len() as _, &mut Cursor::new(buf), &TXID),
                   Err(WireError::InvalidPhrase));
    }

    #[test]
    fn round_trips() {
        let attribute = ErrorCode { class: 3, number: 0, phrase: "Try Alternate".into() };

        let mut bytes = Vec::new();
        attribute.write(&mut bytes, &TXID).unwrap();

        assert_eq!(ErrorCode::read(bytes.len() as _, &mut Cursor::new(&bytes), &TXID).unwrap(),
                   attribute);
    }
}
