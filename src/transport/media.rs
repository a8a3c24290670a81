//! Datagram socket paired with the control session.
//!
//! Opened only when media is enabled. The control engine never reads
//! from it; voice handling belongs to the application.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::net::{UdpSocket, lookup_host};

use crate::core::Address;

/// Largest datagram accepted by [`MediaSocket::recv`].
pub const MEDIA_RECV_BUFFER_SIZE: usize = 1024;

/// Connected UDP socket towards the voice server.
#[derive(Debug)]
pub struct MediaSocket {
    socket: UdpSocket,
    recv_buffer: Vec<u8>,
}

impl MediaSocket {
    /// Resolve `address` and connect an ephemeral local socket to it.
    pub async fn open(address: &Address) -> io::Result<Self> {
        let remote = lookup_host((address.host(), address.port()))
            .await?
            .next()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no address for {address}"))
            })?;
        Self::connect(remote).await
    }

    /// Bind an ephemeral local socket of the right family and connect it to `remote`.
    pub async fn connect(remote: SocketAddr) -> io::Result<Self> {
        let local: SocketAddr = if remote.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(remote).await?;
        Ok(Self {
            socket,
            recv_buffer: vec![0u8; MEDIA_RECV_BUFFER_SIZE],
        })
    }

    /// Local address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Remote address.
    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.socket.peer_addr()
    }

    /// Send one datagram.
    pub async fn send(&self, data: &[u8]) -> io::Result<usize> {
        self.socket.send(data).await
    }

    /// Receive one datagram.
    pub async fn recv(&mut self) -> io::Result<&[u8]> {
        let len = self.socket.recv(&mut self.recv_buffer).await?;
        Ok(&self.recv_buffer[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_media_socket_connects_to_peer() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();

        let media = MediaSocket::connect(server_addr).await.unwrap();
        assert_eq!(media.peer_addr().unwrap(), server_addr);

        media.send(b"ping").await.unwrap();
        let mut buf = [0u8; 16];
        let (len, from) = server.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..len], b"ping");
        assert_eq!(from.port(), media.local_addr().unwrap().port());
    }

    #[tokio::test]
    async fn test_media_socket_receives() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let mut media = MediaSocket::open(&Address::new(
            "127.0.0.1",
            server.local_addr().unwrap().port(),
        ))
        .await
        .unwrap();

        let client_port = media.local_addr().unwrap().port();
        server
            .send_to(b"voice", ("127.0.0.1", client_port))
            .await
            .unwrap();
        assert_eq!(media.recv().await.unwrap(), b"voice");
    }
}
