use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use log::*;

use crate::types::TransactionId;
use crate::wire::*;


/// An **XOR-MAPPED-ADDRESS** attribute, which carries the same information
/// as MAPPED-ADDRESS, obfuscated against the transaction ID. The
/// obfuscation exists because some NATs rewrite any four bytes that look
/// like their own public address, wherever they appear in a packet.
///
/// The port is XORed with the first two octets of the transaction ID (which,
/// under the behavior-discovery encoding, are the top half of the magic
/// cookie); an IPv4 address with the first four octets; an IPv6 address with
/// all sixteen.
///
/// # References
///
/// - [RFC 5389 §15.2](https://tools.ietf.org/html/rfc5389) — Session
///   Traversal Utilities for NAT (October 2008)
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct XorMappedAddress {

    /// The endpoint contained in the packet, with the obfuscation undone.
    pub endpoint: SocketAddr,
}


const FAMILY_IPV4: u8 = 1;
const FAMILY_IPV6: u8 = 2;

impl Wire for XorMappedAddress {
    const NAME: &'static str = "XOR-MAPPED-ADDRESS";
    const ATTR_TYPE: u16 = 0x0020;

    fn read(stated_length: u16, c: &mut Cursor<&[u8]>, transaction_id: &TransactionId) -> Result<Self, WireError> {
        let id = &transaction_id.0;

        let _reserved = c.read_u8()?;

        let family = c.read_u8()?;
        trace!("Read family -> {:?}", family);

        let x_port = c.read_u16::<BigEndian>()?;
        let port = x_port ^ u16::from_be_bytes([ id[0], id[1] ]);
        trace!("Parsed port -> {:?}", port);

        match family {
            FAMILY_IPV4 => {
                if stated_length != 8 {
                    warn!("Length is incorrect (attribute length {:?}, but IPv4 endpoints are eight bytes)", stated_length);
                    let mandated_length = MandatedLength::Exactly(8);
                    return Err(WireError::WrongAttributeLength { stated_length, mandated_length });
                }

                let mut buf = [0_u8; 4];
                c.read_exact(&mut buf)?;
                for (b, i) in buf.iter_mut().zip(id) {
                    *b ^= i;
                }

                let address = Ipv4Addr::from(buf);
                trace!("Parsed IPv4 address -> {:?}", address);

                Ok(Self { endpoint: SocketAddr::new(IpAddr::V4(address), port) })
            }

            FAMILY_IPV6 => {
                if stated_length != 20 {
                    warn!("Length is incorrect (attribute length {:?}, but IPv6 endpoints are twenty bytes)", stated_length);
                    let mandated_length = MandatedLength::Exactly(20);
                    return Err(WireError::WrongAttributeLength { stated_length, mandated_length });
                }

                let mut buf = [0_u8; 16];
                c.read_exact(&mut buf)?;
                for (b, i) in buf.iter_mut().zip(id) {
                    *b ^= i;
                }

                let address = Ipv6Addr::from(buf);
                trace!("Parsed IPv6 address -> {:?}", address);

                Ok(Self { endpoint: SocketAddr::new(IpAddr::V6(address), port) })
            }

            _ => {
                warn!("Address family {} is neither IPv4 nor IPv6", family);
                Err(WireError::InvalidAddressFamily(family))
            }
        }
    }

    fn write(&self, bytes: &mut Vec<u8>, transaction_id: &TransactionId) -> io::Result<()> {
        let id = &transaction_id.0;

        bytes.write_u8(0)?;  // reserved

        match self.endpoint.ip() {
            IpAddr::V4(address) => {
                bytes.write_u8(FAMILY_IPV4)?;
                bytes.write_u16::<BigEndian>(self.endpoint.port() ^ u16::from_be_bytes([ id[0], id[1] ]))?;

                let mut buf = address.octets();
                for (b, i) in buf.iter_mut().zip(id) {
                    *b ^= i;
                }
                bytes.extend_from_slice(&buf);
            }
            IpAddr::V6(address) => {
                bytes.write_u8(FAMILY_IPV6)?;
                bytes.write_u16::<BigEndian>(self.endpoint.port() ^ u16::from_be_bytes([ id[0], id[1] ]))?;

                let mut buf = address.octets();
                for (b, i) in buf.iter_mut().zip(id) {
                    *b ^= i;
                }
                bytes.extend_from_slice(&buf);
            }
        }

        Ok(())
    }
}
