//! The transport that discovery probes travel over.

use std::fmt;
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use log::*;


/// The size of the receive buffer: comfortably larger than any message a
/// discovery server sends. A datagram bigger than this has its excess
/// discarded.
const BUFFER_SIZE: usize = 2048;


/// The trait implemented by everything a discovery run can probe through —
/// a real UDP socket, or a scripted stand-in under test.
///
/// The methods take `&self` because `UdpSocket`’s own do; a scripted
/// implementation keeps its state behind a `RefCell`.
pub trait Transport {

    /// Sends the given bytes as one datagram to the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an `Error` if there’s an I/O error sending the data.
    fn send_to(&self, bytes: &[u8], remote: SocketAddr) -> Result<(), Error>;

    /// Waits for one datagram, for at most the given duration. Returns
    /// `None` if nothing arrived in time — the engines treat that as a
    /// classification signal, never as a reason to retry.
    ///
    /// # Errors
    ///
    /// Returns an `Error` if there’s an I/O error other than the deadline
    /// passing.
    fn receive(&self, timeout: Duration) -> Result<Option<Vec<u8>>, Error>;

    /// The local endpoint this transport is bound to.
    ///
    /// # Errors
    ///
    /// Returns an `Error` if the socket has no usable local address.
    fn local_addr(&self) -> Result<SocketAddr, Error>;
}


impl Transport for UdpSocket {
    fn send_to(&self, bytes: &[u8], remote: SocketAddr) -> Result<(), Error> {
        info!("Sending {} bytes of data to {} over UDP", bytes.len(), remote);

        let len = UdpSocket::send_to(self, bytes, remote)?;
        debug!("Sent {} bytes", len);

        Ok(())
    }

    fn receive(&self, timeout: Duration) -> Result<Option<Vec<u8>>, Error> {
        self.set_read_timeout(Some(timeout))?;

        info!("Waiting up to {:?} to receive...", timeout);
        let mut buf = vec![0; BUFFER_SIZE];
        match self.recv_from(&mut buf) {
            Ok((len, from)) => {
                info!("Received {} bytes of data from {}", len, from);
                buf.truncate(len);
                Ok(Some(buf))
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::TimedOut => {
                debug!("The deadline passed with no datagram");
                Ok(None)
            }
            Err(e) => {
                Err(e.into())
            }
        }
    }

    fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(UdpSocket::local_addr(self)?)
    }
}


/// Something that can go wrong talking to a discovery server.
#[derive(Debug)]
pub enum Error {

    /// There was a problem with the network sending or receiving data.
    NetworkError(io::Error),
}

impl From<io::Error> for Error {
    fn from(inner: io::Error) -> Self {
        Self::NetworkError(inner)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkError(ioe) => {
                write!(f, "Network error: {}", ioe)
            }
        }
    }
}
