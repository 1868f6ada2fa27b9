//! Parsing the STUN wire protocol.
//!
//! One deviation from the STUN RFCs is deliberate: attribute bodies are
//! written and read back-to-back, without the nominal padding to four-octet
//! boundaries. The classic discovery procedure interoperates with a wide
//! range of servers this way, and changing it would change which packets
//! this crate accepts.

pub(crate) use std::io::{Cursor, Read};
pub(crate) use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use std::convert::TryFrom;
use std::io;

use log::*;

use crate::attribute::Attribute;
use crate::types::*;


impl Message {

    /// Converts this message to a vector of bytes.
    ///
    /// The body length field in the emitted header always equals the number
    /// of attribute octets that follow it, whatever the attributes are.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut body = Vec::with_capacity(32);
        for attribute in &self.attributes {
            let attribute_bytes = attribute.to_bytes(&self.transaction_id)?;
            body.extend(attribute_bytes);
        }

        let body_length = u16::try_from(body.len()).expect("Message body too long");

        let mut bytes = Vec::with_capacity(20 + body.len());
        bytes.write_u16::<BigEndian>(self.message_type.to_u16())?;
        bytes.write_u16::<BigEndian>(body_length)?;
        bytes.extend_from_slice(&self.transaction_id.0);
        bytes.extend(body);

        Ok(bytes)
    }

    /// Reads bytes off of the given slice, parsing them into a message.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        info!("Parsing message");
        trace!("Bytes -> {:?}", bytes);
        let mut c = Cursor::new(bytes);

        let type_number = c.read_u16::<BigEndian>()?;
        let message_type = match MessageType::from_u16(type_number) {
            Some(mt)  => mt,
            None      => return Err(WireError::UnknownMessageType(type_number)),
        };
        trace!("Read message type -> {:?}", message_type);

        let body_length = c.read_u16::<BigEndian>()?;
        trace!("Read body length -> {:?}", body_length);

        let mut id_bytes = [0_u8; 16];
        c.read_exact(&mut id_bytes)?;
        let transaction_id = TransactionId(id_bytes);
        trace!("Read transaction ID -> {:?}", transaction_id);

        let body_end = 20 + u64::from(body_length);
        if (bytes.len() as u64) < body_end {
            warn!("Buffer is {} bytes long but the header declares {}", bytes.len(), body_end);
            return Err(WireError::IO);
        }

        let mut attributes = Vec::new();
        while c.position() < body_end {
            if let Some(attribute) = Attribute::from_bytes(&mut c, &transaction_id)? {
                attributes.push(attribute);
            }
        }

        if c.position() != body_end {
            let parsed_length = u16::try_from(c.position() - 20).unwrap_or(u16::MAX);
            return Err(WireError::WrongBodyLength { stated_length: body_length, parsed_length });
        }

        Ok(Self { message_type, transaction_id, attributes })
    }
}


/// Trait for decoding and encoding STUN attribute bodies read over
/// the wire.
pub trait Wire: Sized {

    /// This attribute’s name as a string, such as `"MAPPED-ADDRESS"`.
    const NAME: &'static str;

    /// The number signifying that an attribute is of this type.
    /// See <https://www.iana.org/assignments/stun-parameters/stun-parameters.xhtml>
    const ATTR_TYPE: u16;

    /// Read at most `stated_length` bytes from the given `Cursor`, which is
    /// positioned at the start of this attribute’s body. The transaction ID
    /// of the enclosing message is passed in because XOR-MAPPED-ADDRESS
    /// needs it to undo its obfuscation.
    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, transaction_id: &TransactionId) -> Result<Self, WireError>;

    /// Append this attribute’s body — no type or length header — to the
    /// given byte vector.
    fn write(&self, bytes: &mut Vec<u8>, transaction_id: &TransactionId) -> io::Result<()>;
}


/// Helper macro to get the type number of an attribute at compile-time.
///
/// # Examples
///
/// ```
/// use stun::{attr_type, attribute::ChangeRequest};
///
/// assert_eq!(3, attr_type!(ChangeRequest));
/// ```
#[macro_export]
macro_rules! attr_type {
    ($type:ty) => {
        <$type as $crate::Wire>::ATTR_TYPE
    }
}


/// Something that can go wrong deciphering a message.
#[derive(PartialEq, Debug)]
pub enum WireError {

    /// There was an IO error reading from the cursor.
    /// Almost all the time, this means that the buffer was too short.
    IO,
    // (io::Error is not PartialEq so we don’t propagate it)

    /// When the protocol requires attributes of this type to have a certain
    /// length, but the response specified a different length.
    ///
    /// This error should be returned regardless of the _content_ of the
    /// attribute, whatever it is.
    WrongAttributeLength {

        /// The length of the attribute’s body, as specified in the packet.
        stated_length: u16,

        /// The length that the protocol mandates for this attribute type.
        mandated_length: MandatedLength,
    },

    /// When an attribute consumed a different number of bytes than its
    /// header declared. The attributes after it in the packet cannot be
    /// trusted at that point, so parsing stops.
    MisalignedAttribute {

        /// The length of the attribute’s body, as specified in the packet.
        stated_length: u16,

        /// The number of bytes actually consumed by reading the body.
        consumed_length: u16,
    },

    /// When the attribute section did not line up exactly with the body
    /// length declared in the message header.
    WrongBodyLength {

        /// The body length, as specified in the message header.
        stated_length: u16,

        /// The number of attribute bytes actually parsed.
        parsed_length: u16,
    },

    /// When the message type number is not one we know about.
    UnknownMessageType(u16),

    /// When an address attribute specified an address family other than
    /// IPv4 or IPv6.
    InvalidAddressFamily(u8),

    /// When an ERROR-CODE attribute carried a class or number outside the
    /// ranges the protocol allows.
    InvalidErrorCode {

        /// The error class, valid between 3 and 6.
        class: u8,

        /// The error number, valid between 0 and 99.
        number: u8,
    },

    /// When an ERROR-CODE attribute carried a reason phrase that wasn’t
    /// valid UTF-8.
    InvalidPhrase,
    // (Utf8Error carries nothing a caller could act on, so it isn’t kept)
}


/// The length that an attribute type requires its body to have.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum MandatedLength {

    /// The body must be exactly this many bytes in length.
    Exactly(u16),

    /// The body must be _at least_ this many bytes in length.
    AtLeast(u16),

    /// The body’s length must be a multiple of this number.
    MultipleOf(u16),
}


impl From<io::Error> for WireError {
    fn from(ioe: io::Error) -> Self {
        error!("IO error -> {:?}", ioe);
        Self::IO
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::attribute::{ChangeRequest, ErrorCode, MappedAddress, ChangedAddress};
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    const TXID: TransactionId = TransactionId([ 0x21, 0x12, 0xA4, 0x42,
                                                1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12 ]);

    #[test]
    fn complete_response() {
        let buf = &[
            0x01, 0x01,  // message type (Binding Response)
            0x00, 0x18,  // body length (24)
            0x21, 0x12, 0xA4, 0x42,  // transaction ID...
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06,  // ...
            0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,  // ...

            // the mapped address:
            0x00, 0x01,  // attribute type
            0x00, 0x08,  // attribute length
            0x00,        // reserved
            0x01,        // family (IPv4)
            0xC7, 0x57,  // port (51031)
            0xCB, 0x00, 0x71, 0x07,  // address (203.0.113.7)

            // the changed address:
            0x00, 0x05,  // attribute type
            0x00, 0x08,  // attribute length
            0x00,        // reserved
            0x01,        // family (IPv4)
            0x0D, 0x96,  // port (3478)
            0xCB, 0x00, 0x71, 0x08,  // address (203.0.113.8)
        ];

        let message = Message {
            message_type: MessageType::BindingResponse,
            transaction_id: TXID,
            attributes: vec![
                Attribute::MappedAddress(MappedAddress {
                    endpoint: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7)), 51031),
                }),
                Attribute::ChangedAddress(ChangedAddress {
                    endpoint: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 8)), 3478),
                }),
            ],
        };

        assert_eq!(Message::from_bytes(buf), Ok(message));
    }

    #[test]
    fn parse_nothing() {
        assert_eq!(Message::from_bytes(&[]), Err(WireError::IO));
    }

    #[test]
    fn truncated_header() {
        let buf = &[
            0x01, 0x01,  // message type
            0x00, 0x00,  // body length
            0x21, 0x12,  // an incomplete transaction ID
        ];

        assert_eq!(Message::from_bytes(buf), Err(WireError::IO));
    }

    #[test]
    fn unknown_message_type() {
        let buf = &[
            0xFF, 0xFF,  // message type (not one of ours)
            0x00, 0x00,  // body length
            0x21, 0x12, 0xA4, 0x42, 0x01, 0x02, 0x03, 0x04,  // transaction ID...
            0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,  // ...
        ];

        assert_eq!(Message::from_bytes(buf), Err(WireError::UnknownMessageType(0xFFFF)));
    }

    #[test]
    fn declared_body_longer_than_buffer() {
        let buf = &[
            0x01, 0x01,  // message type
            0x00, 0x08,  // body length (but there is no body at all)
            0x21, 0x12, 0xA4, 0x42, 0x01, 0x02, 0x03, 0x04,  // transaction ID...
            0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,  // ...
        ];

        assert_eq!(Message::from_bytes(buf), Err(WireError::IO));
    }

    #[test]
    fn attribute_overruns_declared_body() {
        let buf = &[
            0x00, 0x01,  // message type (Binding Request)
            0x00, 0x04,  // body length (4: only room for an attribute header)
            0x21, 0x12, 0xA4, 0x42, 0x01, 0x02, 0x03, 0x04,  // transaction ID...
            0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,  // ...

            0x00, 0x03,  // attribute type (CHANGE-REQUEST)
            0x00, 0x04,  // attribute length...
            0x00, 0x00, 0x00, 0x06,  // ...and a body that crosses the boundary
        ];

        assert_eq!(Message::from_bytes(buf),
                   Err(WireError::WrongBodyLength { stated_length: 4, parsed_length: 8 }));
    }

    #[test]
    fn round_trips() {
        let message = Message {
            message_type: MessageType::BindingRequest,
            transaction_id: TXID,
            attributes: vec![
                Attribute::ChangeRequest(ChangeRequest { change_ip: true, change_port: true }),
            ],
        };

        let bytes = message.to_bytes().unwrap();
        assert_eq!(Message::from_bytes(&bytes), Ok(message));
    }

    #[test]
    fn length_field_counts_the_attribute_section() {
        let message = Message {
            message_type: MessageType::BindingErrorResponse,
            transaction_id: TXID,
            attributes: vec![
                Attribute::ErrorCode(ErrorCode { class: 4, number: 20, phrase: "Bad Request".into() }),
            ],
        };

        let bytes = message.to_bytes().unwrap();
        let body_length = u16::from_be_bytes([ bytes[2], bytes[3] ]);

        assert_eq!(usize::from(body_length), bytes.len() - 20);
        assert_eq!(body_length, 4 + 4 + 11);  // TLV header, code fields, phrase
    }
}
