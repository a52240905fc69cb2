//! Pre-flight check for an active network path.
//!
//! When the check fails the fetch ends with `FeedError::Connectivity` and no
//! HTTP request is attempted. The default check, `NetworkPath`, never
//! contacts the feed server, so a server that is down or refusing
//! connections still surfaces as a network failure from the transport.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::time::Duration;

pub trait Connectivity: Send + Sync {
    fn is_connected(&self) -> bool;
}

impl<C: Connectivity + ?Sized> Connectivity for Box<C> {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}

/// Skips the check; used when `connectivity_check = false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_connected(&self) -> bool {
        true
    }
}

/// Asks the OS for a route to the endpoint host.
///
/// Resolves the host, then `connect`s an unbound UDP socket to it. UDP
/// connect only selects a route and sends nothing, so this answers "is the
/// device on a network that reaches this address" without talking to the
/// server.
#[derive(Debug, Clone)]
pub struct NetworkPath {
    host: String,
    port: u16,
}

impl NetworkPath {
    /// Returns `None` when `url` has no recognizable host.
    pub fn for_url(url: &str) -> Option<Self> {
        let (host, port) = host_and_port(url)?;
        Some(Self { host, port })
    }
}

impl Connectivity for NetworkPath {
    fn is_connected(&self) -> bool {
        resolve(&self.host, self.port).iter().any(|addr| {
            let local: IpAddr = match addr {
                SocketAddr::V4(_) => Ipv4Addr::UNSPECIFIED.into(),
                SocketAddr::V6(_) => Ipv6Addr::UNSPECIFIED.into(),
            };
            UdpSocket::bind((local, 0))
                .and_then(|socket| socket.connect(addr))
                .is_ok()
        })
    }
}

fn resolve(host: &str, port: u16) -> Vec<SocketAddr> {
    match (host, port).to_socket_addrs() {
        Ok(addrs) => addrs.collect(),
        Err(err) => {
            tracing::debug!(host, error = %err, "host did not resolve");
            Vec::new()
        }
    }
}

/// Resolves the endpoint host and opens, then drops, one TCP connection.
///
/// Stricter than `NetworkPath`: an endpoint that is down reads as offline.
/// Only used when `strict_endpoint_check = true`.
#[derive(Debug, Clone)]
pub struct HostProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HostProbe {
    /// Returns `None` when `url` has no recognizable host.
    pub fn for_url(url: &str, timeout: Duration) -> Option<Self> {
        let (host, port) = host_and_port(url)?;
        Some(Self {
            host,
            port,
            timeout,
        })
    }
}

impl Connectivity for HostProbe {
    fn is_connected(&self) -> bool {
        resolve(&self.host, self.port)
            .iter()
            .any(|addr| TcpStream::connect_timeout(addr, self.timeout).is_ok())
    }
}

/// Split `scheme://[user@]host[:port]/...` into host and port.
fn host_and_port(url: &str) -> Option<(String, u16)> {
    let (scheme, rest) = url.split_once("://")?;
    let default_port = match scheme.to_ascii_lowercase().as_str() {
        "http" => 80,
        "https" => 443,
        _ => return None,
    };

    let authority = rest.split(['/', '?', '#']).next()?;
    let authority = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    let (host, port) = if let Some(bracketed) = authority.strip_prefix('[') {
        let (host, after) = bracketed.split_once(']')?;
        (host, after.strip_prefix(':'))
    } else {
        match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        }
    };

    if host.is_empty() {
        return None;
    }
    let port = match port {
        Some(port) => port.parse().ok()?,
        None => default_port,
    };
    Some((host.to_string(), port))
}
