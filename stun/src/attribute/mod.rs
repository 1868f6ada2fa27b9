//! All the STUN attribute types, as well as how to parse each type.


mod address;

mod mapped_address;
pub use self::mapped_address::MappedAddress;

mod response_address;
pub use self::response_address::ResponseAddress;

mod change_request;
pub use self::change_request::ChangeRequest;

mod source_address;
pub use self::source_address::SourceAddress;

mod changed_address;
pub use self::changed_address::ChangedAddress;

mod username;
pub use self::username::Username;

mod password;
pub use self::password::Password;

mod message_integrity;
pub use self::message_integrity::MessageIntegrity;

mod error_code;
pub use self::error_code::ErrorCode;

mod unknown_attributes;
pub use self::unknown_attributes::UnknownAttributes;

mod reflected_from;
pub use self::reflected_from::ReflectedFrom;

mod xor_mapped_address;
pub use self::xor_mapped_address::XorMappedAddress;

mod software;
pub use self::software::Software;

mod alternate_server;
pub use self::alternate_server::AlternateServer;

mod fingerprint;
pub use self::fingerprint::Fingerprint;

mod other_address;
pub use self::other_address::OtherAddress;

mod response_origin;
pub use self::response_origin::ResponseOrigin;


use std::convert::TryFrom;
use std::io;

use log::*;

use crate::types::TransactionId;
use crate::wire::*;


/// An attribute that’s been parsed from a byte buffer.
#[derive(PartialEq, Debug, Clone)]
pub enum Attribute {

    /// A **MAPPED-ADDRESS** attribute.
    MappedAddress(MappedAddress),

    /// A **RESPONSE-ADDRESS** attribute.
    ResponseAddress(ResponseAddress),

    /// A **CHANGE-REQUEST** attribute.
    ChangeRequest(ChangeRequest),

    /// A **SOURCE-ADDRESS** attribute.
    SourceAddress(SourceAddress),

    /// A **CHANGED-ADDRESS** attribute.
    ChangedAddress(ChangedAddress),

    /// A **USERNAME** attribute.
    Username(Username),

    /// A **PASSWORD** attribute.
    Password(Password),

    /// A **MESSAGE-INTEGRITY** attribute. The digest is carried but not
    /// verified; authentication is outside this crate’s remit.
    MessageIntegrity(MessageIntegrity),

    /// An **ERROR-CODE** attribute.
    ErrorCode(ErrorCode),

    /// An **UNKNOWN-ATTRIBUTES** attribute.
    UnknownAttributes(UnknownAttributes),

    /// A **REFLECTED-FROM** attribute.
    ReflectedFrom(ReflectedFrom),

    /// An **XOR-MAPPED-ADDRESS** attribute.
    XorMappedAddress(XorMappedAddress),

    /// A **SOFTWARE** attribute.
    Software(Software),

    /// An **ALTERNATE-SERVER** attribute.
    AlternateServer(AlternateServer),

    /// A **FINGERPRINT** attribute. The checksum is carried but not
    /// verified, for the same reason as MESSAGE-INTEGRITY.
    Fingerprint(Fingerprint),

    /// An **OTHER-ADDRESS** attribute, the behavior-discovery successor
    /// to CHANGED-ADDRESS.
    OtherAddress(OtherAddress),

    /// A **RESPONSE-ORIGIN** attribute.
    ResponseOrigin(ResponseOrigin),
}


impl Attribute {

    /// Reads one attribute — TLV header, then body — from the given cursor.
    /// Attributes with a type number we don’t recognise are skipped over by
    /// advancing the cursor past their stated length, and produce `None`.
    pub(crate) fn from_bytes(c: &mut Cursor<&[u8]>, transaction_id: &TransactionId) -> Result<Option<Self>, WireError> {
        let type_number = c.read_u16::<BigEndian>()?;
        let stated_length = c.read_u16::<BigEndian>()?;
        let body_start = c.position();

        macro_rules! try_attribute {
            ($attribute:tt) => {
                if $attribute::ATTR_TYPE == type_number {
                    info!("Parsing {} attribute (type {:#06X}, len {})", $attribute::NAME, type_number, stated_length);
                    let attribute = $attribute::read(stated_length, c, transaction_id).map(Self::$attribute)?;

                    let consumed_length = u16::try_from(c.position() - body_start).unwrap_or(u16::MAX);
                    if consumed_length != stated_length {
                        warn!("{} attribute consumed {} bytes but declared {}", $attribute::NAME, consumed_length, stated_length);
                        return Err(WireError::MisalignedAttribute { stated_length, consumed_length });
                    }

                    return Ok(Some(attribute));
                }
            }
        }

        // Try all the attributes, one type at a time, returning early if
        // the type number matches.
        try_attribute!(MappedAddress);
        try_attribute!(ResponseAddress);
        try_attribute!(ChangeRequest);
        try_attribute!(SourceAddress);
        try_attribute!(ChangedAddress);
        try_attribute!(Username);
        try_attribute!(Password);
        try_attribute!(MessageIntegrity);
        try_attribute!(ErrorCode);
        try_attribute!(UnknownAttributes);
        try_attribute!(ReflectedFrom);
        try_attribute!(XorMappedAddress);
        try_attribute!(Software);
        try_attribute!(AlternateServer);
        try_attribute!(Fingerprint);
        try_attribute!(OtherAddress);
        try_attribute!(ResponseOrigin);

        // Otherwise, skip the stated length and carry on with the next
        // attribute.
        debug!("Skipping unknown attribute type {:#06X} ({} bytes)", type_number, stated_length);
        let body_end = body_start + u64::from(stated_length);
        if body_end > c.get_ref().len() as u64 {
            return Err(WireError::IO);
        }

        c.set_position(body_end);
        Ok(None)
    }

    /// This attribute’s type number.
    pub fn attr_type(&self) -> u16 {
        match self {
            Self::MappedAddress(_)      => MappedAddress::ATTR_TYPE,
            Self::ResponseAddress(_)    => ResponseAddress::ATTR_TYPE,
            Self::ChangeRequest(_)      => ChangeRequest::ATTR_TYPE,
            Self::SourceAddress(_)      => SourceAddress::ATTR_TYPE,
            Self::ChangedAddress(_)     => ChangedAddress::ATTR_TYPE,
            Self::Username(_)           => Username::ATTR_TYPE,
            Self::Password(_)           => Password::ATTR_TYPE,
            Self::MessageIntegrity(_)   => MessageIntegrity::ATTR_TYPE,
            Self::ErrorCode(_)          => ErrorCode::ATTR_TYPE,
            Self::UnknownAttributes(_)  => UnknownAttributes::ATTR_TYPE,
            Self::ReflectedFrom(_)      => ReflectedFrom::ATTR_TYPE,
            Self::XorMappedAddress(_)   => XorMappedAddress::ATTR_TYPE,
            Self::Software(_)           => Software::ATTR_TYPE,
            Self::AlternateServer(_)    => AlternateServer::ATTR_TYPE,
            Self::Fingerprint(_)        => Fingerprint::ATTR_TYPE,
            Self::OtherAddress(_)       => OtherAddress::ATTR_TYPE,
            Self::ResponseOrigin(_)     => ResponseOrigin::ATTR_TYPE,
        }
    }

    fn write_body(&self, bytes: &mut Vec<u8>, transaction_id: &TransactionId) -> io::Result<()> {
        match self {
            Self::MappedAddress(ma)      => ma.write(bytes, transaction_id),
            Self::ResponseAddress(ra)    => ra.write(bytes, transaction_id),
            Self::ChangeRequest(cr)      => cr.write(bytes, transaction_id),
            Self::SourceAddress(sa)      => sa.write(bytes, transaction_id),
            Self::ChangedAddress(ca)     => ca.write(bytes, transaction_id),
            Self::Username(un)           => un.write(bytes, transaction_id),
            Self::Password(pw)           => pw.write(bytes, transaction_id),
            Self::MessageIntegrity(mi)   => mi.write(bytes, transaction_id),
            Self::ErrorCode(ec)          => ec.write(bytes, transaction_id),
            Self::UnknownAttributes(ua)  => ua.write(bytes, transaction_id),
            Self::ReflectedFrom(rf)      => rf.write(bytes, transaction_id),
            Self::XorMappedAddress(xma)  => xma.write(bytes, transaction_id),
            Self::Software(sw)           => sw.write(bytes, transaction_id),
            Self::AlternateServer(als)   => als.write(bytes, transaction_id),
            Self::Fingerprint(fp)        => fp.write(bytes, transaction_id),
            Self::OtherAddress(oa)       => oa.write(bytes, transaction_id),
            Self::ResponseOrigin(ro)     => ro.write(bytes, transaction_id),
        }
    }

    /// Serialises this attribute — TLV header, then body — into a vector of
    /// bytes. The length field is the exact number of body bytes produced.
    pub fn to_bytes(&self, transaction_id: &TransactionId) -> io::Result<Vec<u8>> {
        let mut body = Vec::with_capacity(16);
        self.write_body(&mut body, transaction_id)?;

        let length = u16::try_from(body.len()).expect("Attribute body too long");

        let mut bytes = Vec::with_capacity(4 + body.len());
        bytes.write_u16::<BigEndian>(self.attr_type())?;
        bytes.write_u16::<BigEndian>(length)?;
        bytes.extend(body);

        Ok(bytes)
    }
}
