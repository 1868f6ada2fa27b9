use stun::{Message, MessageType, TransactionId, WireError};
use stun::attribute::{Attribute, ChangedAddress, MappedAddress, SourceAddress};


#[test]
fn parse_nothing() {
    assert!(Message::from_bytes(&[]).is_err());
}


#[test]
fn parse_classic_binding_response() {
    let buf = &[
        0x01, 0x01,  // message type (Binding Response)
        0x00, 0x24,  // body length (36)
        0x8F, 0x07, 0x00, 0xC2, 0x7D, 0x71, 0x93, 0x22,  // transaction ID...
        0xA0, 0x55, 0x10, 0x4E, 0x3B, 0x6E, 0x19, 0xFF,  // (fully random, classic style)

        // the mapped address:
        0x00, 0x01,  // attribute type
        0x00, 0x08,  // attribute length
        0x00,        // reserved
        0x01,        // family (IPv4)
        0xC7, 0x38,  // port (51000)
        0xCB, 0x00, 0x71, 0x07,  // address (203.0.113.7)

        // the source address:
        0x00, 0x04,  // attribute type
        0x00, 0x08,  // attribute length
        0x00,        // reserved
        0x01,        // family (IPv4)
        0x0D, 0x96,  // port (3478)
        0xC6, 0x33, 0x64, 0x01,  // address (198.51.100.1)

        // the changed address:
        0x00, 0x05,  // attribute type
        0x00, 0x08,  // attribute length
        0x00,        // reserved
        0x01,        // family (IPv4)
        0x0D, 0x97,  // port (3479)
        0xC6, 0x33, 0x64, 0x02,  // address (198.51.100.2)
    ];

    let message = Message {
        message_type: MessageType::BindingResponse,
        transaction_id: TransactionId([ 0x8F, 0x07, 0x00, 0xC2, 0x7D, 0x71, 0x93, 0x22,
                                        0xA0, 0x55, 0x10, 0x4E, 0x3B, 0x6E, 0x19, 0xFF ]),
        attributes: vec![
            Attribute::MappedAddress(MappedAddress {
                endpoint: "203.0.113.7:51000".parse().unwrap(),
            }),
            Attribute::SourceAddress(SourceAddress {
                endpoint: "198.51.100.1:3478".parse().unwrap(),
            }),
            Attribute::ChangedAddress(ChangedAddress {
                endpoint: "198.51.100.2:3479".parse().unwrap(),
            }),
        ],
    };

    assert_eq!(Message::from_bytes(buf), Ok(message));
}


#[test]
fn parse_error_response() {
    let buf = &[
        0x01, 0x11,  // message type (Binding Error Response)
        0x00, 0x13,  // body length (19)
        0x21, 0x12, 0xA4, 0x42, 0x01, 0x02, 0x03, 0x04,  // transaction ID...
        0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,  // ...

        // the error code:
        0x00, 0x09,  // attribute type
        0x00, 0x0F,  // attribute length (15)
        0x00, 0x00,  // reserved
        0x04,        // class
        0x14,        // number (20)
        0x42, 0x61, 0x64, 0x20, 0x52, 0x65, 0x71, 0x75,  // phrase...
        0x65, 0x73, 0x74,  // ("Bad Request")
    ];

    let message = Message::from_bytes(buf).unwrap();
    assert_eq!(message.message_type, MessageType::BindingErrorResponse);

    let error_code = message.error_code().unwrap();
    assert_eq!(error_code.code(), 420);
    assert_eq!(error_code.phrase, "Bad Request");
}


#[test]
fn parse_xor_mapped_address_with_cookie_id() {
    let buf = &[
        0x01, 0x01,  // message type (Binding Response)
        0x00, 0x0C,  // body length (12)
        0x21, 0x12, 0xA4, 0x42,  // the magic cookie...
        0xD0, 0x05, 0x71, 0x49, 0x3C, 0x0F, 0x64, 0x98,  // ...then random
        0x7E, 0x11, 0x53, 0xE2,  // ...

        // the xor-mapped address:
        0x00, 0x20,  // attribute type
        0x00, 0x08,  // attribute length
        0x00,        // reserved
        0x01,        // family (IPv4)
        0xE2, 0x42,  // port 50000, XORed with the cookie’s top half
        0xE7, 0x21, 0xC0, 0x4B,  // address 198.51.100.9, XORed with the cookie
    ];

    let message = Message::from_bytes(buf).unwrap();
    assert_eq!(message.xor_mapped_address(),
               Some("198.51.100.9:50000".parse().unwrap()));
}


// The skipping policy: attribute types we don’t recognise are stepped over
// by their stated length, and everything around them still parses.
#[test]
fn skip_unknown_attribute_between_known_ones() {
    let buf = &[
        0x01, 0x01,  // message type (Binding Response)
        0x00, 0x1F,  // body length (31)
        0x21, 0x12, 0xA4, 0x42, 0x01, 0x02, 0x03, 0x04,  // transaction ID...
        0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,  // ...

        // the mapped address:
        0x00, 0x01,  // attribute type
        0x00, 0x08,  // attribute length
        0x00, 0x01,  // reserved, family
        0x9C, 0x40,  // port (40000)
        0x0A, 0x00, 0x00, 0x05,  // address (10.0.0.5)

        // an unassigned attribute type:
        0xFF, 0xFE,  // attribute type
        0x00, 0x03,  // attribute length
        0xDE, 0xAD, 0xBE,  // some bytes

        // the changed address:
        0x00, 0x05,  // attribute type
        0x00, 0x08,  // attribute length
        0x00, 0x01,  // reserved, family
        0x0D, 0x97,  // port (3479)
        0xC6, 0x33, 0x64, 0x02,  // address (198.51.100.2)
    ];

    let message = Message::from_bytes(buf).unwrap();
    assert_eq!(message.attributes, vec![
        Attribute::MappedAddress(MappedAddress { endpoint: "10.0.0.5:40000".parse().unwrap() }),
        Attribute::ChangedAddress(ChangedAddress { endpoint: "198.51.100.2:3479".parse().unwrap() }),
    ]);
}


#[test]
fn parse_shared_secret_response() {
    let buf = &[
        0x01, 0x02,  // message type (Shared Secret Response)
        0x00, 0x00,  // body length
        0x21, 0x12, 0xA4, 0x42, 0x01, 0x02, 0x03, 0x04,  // transaction ID...
        0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,  // ...
    ];

    let message = Message::from_bytes(buf).unwrap();
    assert_eq!(message.message_type, MessageType::SharedSecretResponse);
    assert!(message.attributes.is_empty());
}


#[test]
fn reject_trailing_attribute_fragment() {
    let buf = &[
        0x01, 0x01,  // message type (Binding Response)
        0x00, 0x02,  // body length (2: half an attribute header)
        0x21, 0x12, 0xA4, 0x42, 0x01, 0x02, 0x03, 0x04,  // transaction ID...
        0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,  // ...

        0x00, 0x01,  // a lone attribute type with no length field
    ];

    assert!(Message::from_bytes(buf).is_err());
}


#[test]
fn reject_bad_inner_attribute() {
    let buf = &[
        0x01, 0x01,  // message type (Binding Response)
        0x00, 0x0C,  // body length (12)
        0x21, 0x12, 0xA4, 0x42, 0x01, 0x02, 0x03, 0x04,  // transaction ID...
        0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,  // ...

        // a mapped address with an impossible family:
        0x00, 0x01,  // attribute type
        0x00, 0x08,  // attribute length
        0x00,        // reserved
        0x09,        // family (not a real one)
        0x9C, 0x40,  // port
        0x0A, 0x00, 0x00, 0x05,  // address
    ];

    assert_eq!(Message::from_bytes(buf), Err(WireError::InvalidAddressFamily(9)));
}
