//! STUN requests and responses share a single packet format: a fixed
//! 20-octet header (type, body length, transaction ID) followed by a run of
//! attributes. A request differs from a response only in its type number and
//! in which attributes it carries, so unlike many protocols there is one
//! `Message` type here rather than a request/response pair.

use std::net::SocketAddr;

use crate::attribute::{Attribute, ErrorCode};


/// The magic cookie constant. Under the modern behavior-discovery encoding,
/// these four octets sit at the top of the transaction ID, and they
/// participate in the XOR-MAPPED-ADDRESS obfuscation.
pub const MAGIC_COOKIE: u32 = 0x2112_A442;


/// A STUN message: either a request about to be sent out over a transport,
/// or a response parsed from a received datagram.
#[derive(PartialEq, Debug, Clone)]
pub struct Message {

    /// The type number of this message, such as a Binding Request.
    pub message_type: MessageType,

    /// The transaction ID of this message. This is used to make sure
    /// responses answer the request we actually sent, and to un-XOR
    /// obfuscated address attributes.
    pub transaction_id: TransactionId,

    /// The attributes carried in this message, in wire order.
    pub attributes: Vec<Attribute>,
}


/// A STUN message type number.
///
/// The Shared Secret types are never sent by this crate, but servers from
/// the classic era may still emit them, so they are kept around for
/// decoding completeness.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum MessageType {

    /// A **Binding Request**, sent by the client.
    BindingRequest,

    /// A **Binding Response**, answering a Binding Request.
    BindingResponse,

    /// A **Binding Error Response**, carrying an ERROR-CODE attribute.
    BindingErrorResponse,

    /// A **Shared Secret Request**.
    SharedSecretRequest,

    /// A **Shared Secret Response**.
    SharedSecretResponse,

    /// A **Shared Secret Error Response**.
    SharedSecretErrorResponse,
}

impl MessageType {

    /// Returns the message type with the given type number, or `None` if
    /// the number is not one we know about.
    pub fn from_u16(uu: u16) -> Option<Self> {
        match uu {
            0x0001 => Some(Self::BindingRequest),
            0x0101 => Some(Self::BindingResponse),
            0x0111 => Some(Self::BindingErrorResponse),
            0x0002 => Some(Self::SharedSecretRequest),
            0x0102 => Some(Self::SharedSecretResponse),
            0x0112 => Some(Self::SharedSecretErrorResponse),
                 _ => None,
        }
    }

    /// Converts this message type into its two-byte type number.
    pub fn to_u16(self) -> u16 {
        match self {
            Self::BindingRequest             => 0x0001,
            Self::BindingResponse            => 0x0101,
            Self::BindingErrorResponse       => 0x0111,
            Self::SharedSecretRequest        => 0x0002,
            Self::SharedSecretResponse       => 0x0102,
            Self::SharedSecretErrorResponse  => 0x0112,
        }
    }
}


/// A 16-octet transaction ID, generated once per discovery run and reused
/// for every probe in that run. Responses carry it back verbatim.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct TransactionId(pub [u8; 16]);

impl TransactionId {

    /// Generates a fully random transaction ID, as used by the classic
    /// binding/change-request procedure.
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Generates a transaction ID whose first four octets are the magic
    /// cookie, as used by the behavior-discovery procedure. The remaining
    /// twelve octets are random.
    pub fn with_magic_cookie() -> Self {
        let mut bytes = [0_u8; 16];
        bytes[.. 4].copy_from_slice(&MAGIC_COOKIE.to_be_bytes());

        let tail: [u8; 12] = rand::random();
        bytes[4 ..].copy_from_slice(&tail);

        Self(bytes)
    }
}


impl Message {

    /// Creates a Binding Request carrying no attributes.
    pub fn binding_request(transaction_id: TransactionId) -> Self {
        Self {
            message_type: MessageType::BindingRequest,
            transaction_id,
            attributes: Vec::new(),
        }
    }

    /// Creates a Binding Request carrying the given attributes.
    pub fn binding_request_with(transaction_id: TransactionId, attributes: Vec<Attribute>) -> Self {
        Self {
            message_type: MessageType::BindingRequest,
            transaction_id,
            attributes,
        }
    }

    /// Returns the endpoint in this message’s MAPPED-ADDRESS attribute,
    /// if it carries one.
    pub fn mapped_address(&self) -> Option<SocketAddr> {
        self.attributes.iter().find_map(|a| {
            match a {
                Attribute::MappedAddress(ma)  => Some(ma.endpoint),
                _                             => None,
            }
        })
    }

    /// Returns the endpoint in this message’s CHANGED-ADDRESS attribute,
    /// if it carries one.
    pub fn changed_address(&self) -> Option<SocketAddr> {
        self.attributes.iter().find_map(|a| {
            match a {
                Attribute::ChangedAddress(ca)  => Some(ca.endpoint),
                _                              => None,
            }
        })
    }

    /// Returns the endpoint in this message’s OTHER-ADDRESS attribute,
    /// if it carries one.
    pub fn other_address(&self) -> Option<SocketAddr> {
        self.attributes.iter().find_map(|a| {
            match a {
                Attribute::OtherAddress(oa)  => Some(oa.endpoint),
                _                            => None,
            }
        })
    }

    /// Returns the de-obfuscated endpoint in this message’s
    /// XOR-MAPPED-ADDRESS attribute, if it carries one.
    pub fn xor_mapped_address(&self) -> Option<SocketAddr> {
        self.attributes.iter().find_map(|a| {
            match a {
                Attribute::XorMappedAddress(xma)  => Some(xma.endpoint),
                _                                 => None,
            }
        })
    }

    /// Returns this message’s ERROR-CODE attribute, if it carries one.
    pub fn error_code(&self) -> Option<&ErrorCode> {
        self.attributes.iter().find_map(|a| {
            match a {
                Attribute::ErrorCode(ec)  => Some(ec),
                _                         => None,
            }
        })
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn type_numbers_round_trip() {
        for uu in &[ 0x0001, 0x0101, 0x0111, 0x0002, 0x0102, 0x0112 ] {
            assert_eq!(MessageType::from_u16(*uu).unwrap().to_u16(), *uu);
        }
    }

    #[test]
    fn unknown_type_number() {
        assert_eq!(MessageType::from_u16(0x0003), None);
    }

    #[test]
    fn cookie_prefix() {
        let id = TransactionId::with_magic_cookie();
        assert_eq!(&id.0[.. 4], &[ 0x21, 0x12, 0xA4, 0x42 ]);
    }

    #[test]
    fn random_ids_differ() {
        assert_ne!(TransactionId::random(), TransactionId::random());
    }
}
