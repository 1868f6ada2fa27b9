//! Reading and writing the endpoint body shared by the address attributes.
//!
//! Eight attribute types carry the same four-field body: a reserved octet,
//! an address family octet, a two-octet port, and four or sixteen octets of
//! address. The helpers here do the work once; the per-attribute modules
//! supply their own names and type numbers.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use log::*;

use crate::wire::*;


const FAMILY_IPV4: u8 = 1;
const FAMILY_IPV6: u8 = 2;


/// Reads an endpoint body from the given cursor.
pub(crate) fn read_endpoint(stated_length: u16, c: &mut Cursor<&[u8]>) -> Result<SocketAddr, WireError> {
    let _reserved = c.read_u8()?;

    let family = c.read_u8()?;
    trace!("Read family -> {:?}", family);

    let port = c.read_u16::<BigEndian>()?;
    trace!("Read port -> {:?}", port);

    match family {
        FAMILY_IPV4 => {
            if stated_length != 8 {
                warn!("Length is incorrect (attribute length {:?}, but IPv4 endpoints are eight bytes)", stated_length);
                let mandated_length = MandatedLength::Exactly(8);
                return Err(WireError::WrongAttributeLength { stated_length, mandated_length });
            }

            let mut buf = [0_u8; 4];
            c.read_exact(&mut buf)?;

            let address = Ipv4Addr::from(buf);
            trace!("Parsed IPv4 address -> {:?}", address);

            Ok(SocketAddr::new(IpAddr::V4(address), port))
        }

        FAMILY_IPV6 => {
            if stated_length != 20 {
                warn!("Length is incorrect (attribute length {:?}, but IPv6 endpoints are twenty bytes)", stated_length);
                let mandated_length = MandatedLength::Exactly(20);
                return Err(WireError::WrongAttributeLength { stated_length, mandated_length });
            }

            let mut buf = [0_u8; 16];
            c.read_exact(&mut buf)?;

            let address = Ipv6Addr::from(buf);
            trace!("Parsed IPv6 address -> {:?}", address);

            Ok(SocketAddr::new(IpAddr::V6(address), port))
        }

        _ => {
            warn!("Address family {} is neither IPv4 nor IPv6", family);
            Err(WireError::InvalidAddressFamily(family))
        }
    }
}


/// Appends an endpoint body to the given byte vector.
pub(crate) fn write_endpoint(endpoint: SocketAddr, bytes: &mut Vec<u8>) -> io::Result<()> {
    bytes.write_u8(0)?;  // reserved

    match endpoint.ip() {
        IpAddr::V4(address) => {
            bytes.write_u8(FAMILY_IPV4)?;
            bytes.write_u16::<BigEndian>(endpoint.port())?;
            bytes.extend_from_slice(&address.octets());
        }
        IpAddr::V6(address) => {
            bytes.write_u8(FAMILY_IPV6)?;
            bytes.write_u16::<BigEndian>(endpoint.port())?;
            bytes.extend_from_slice(&address.octets());
        }
    }

    Ok(())
}
