//! Turning the user’s server argument into a socket address.

use std::fmt;
use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use log::*;


/// Parses a `host:port` argument into the endpoint probes will be sent to.
///
/// The argument must contain exactly one `:`, and the port must be a
/// 16-bit number. The host is tried as a literal IP address first; failing
/// that, it goes through the system resolver and the first address wins.
/// (An IPv6 literal contains its own colons, so this format can’t name
/// one — bind locally with `--local` and use a resolvable name instead.)
pub fn resolve_server(input: &str) -> Result<SocketAddr, ResolveError> {
    if input.is_empty() {
        return Err(ResolveError::Empty);
    }

    if input.chars().filter(|c| *c == ':').count() != 1 {
        return Err(ResolveError::NotHostPort(input.into()));
    }

    let (host, port_str) = match input.split_once(':') {
        Some(pair)  => pair,
        None        => return Err(ResolveError::NotHostPort(input.into())),
    };

    let port = match port_str.parse::<u16>() {
        Ok(port)  => port,
        Err(_)    => return Err(ResolveError::InvalidPort(port_str.into())),
    };

    if let Ok(ip) = host.parse::<IpAddr>() {
        trace!("Server is a literal address");
        return Ok(SocketAddr::new(ip, port));
    }

    info!("Resolving {:?} via the system resolver", host);
    let mut addrs = (host, port).to_socket_addrs()?;

    match addrs.next() {
        Some(addr) => {
            debug!("Resolved {:?} to {}", host, addr);
            Ok(addr)
        }
        None => {
            Err(ResolveError::NoAddresses(host.into()))
        }
    }
}


/// Something that can go wrong turning an argument into an endpoint.
#[derive(Debug)]
pub enum ResolveError {

    /// The argument was the empty string.
    Empty,

    /// The argument didn’t have the `host:port` shape.
    NotHostPort(String),

    /// The port didn’t parse as a 16-bit number.
    InvalidPort(String),

    /// The resolver had no addresses for the host name.
    NoAddresses(String),

    /// There was an error talking to the resolver.
    IO(io::Error),
}

impl From<io::Error> for ResolveError {
    fn from(error: io::Error) -> ResolveError {
        Self::IO(error)
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => {
                write!(f, "No server given")
            }
            Self::NotHostPort(input) => {
                write!(f, "Server {:?} is not in host:port form", input)
            }
            Self::InvalidPort(port) => {
                write!(f, "Invalid port number {:?}", port)
            }
            Self::NoAddresses(host) => {
                write!(f, "No addresses found for {:?}", host)
            }
            Self::IO(ioe) => {
                write!(f, "Error resolving server: {}", ioe)
            }
        }
    }
}
