// Listener module
// Creates the TCP listener the serve loop accepts from

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a `TcpListener` bound to `addr`.
///
/// `SO_REUSEADDR` is set so the demo can be relaunched while the previous
/// socket is still in TIME_WAIT. `SO_REUSEPORT` is deliberately not set: a
/// second live instance on the same port must fail to bind rather than
/// silently share the address.
///
/// # Returns
///
/// * `Ok(TcpListener)` - Successfully created and bound listener
/// * `Err(std::io::Error)` - Address in use, or socket creation failed
pub fn create_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    // Create socket with appropriate domain (IPv4 or IPv6)
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // Allow rebinding a port left in TIME_WAIT state
    socket.set_reuse_address(true)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    // Convert socket2::Socket to std::net::TcpListener, then to tokio::net::TcpListener
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_bind_on_same_port_fails() {
        let addr = "127.0.0.1:0".parse().expect("valid addr");
        let first = create_listener(addr).expect("first bind");
        let bound = first.local_addr().expect("local addr");

        let second = create_listener(bound);
        assert!(second.is_err(), "second listener on {bound} should fail");
    }
}
