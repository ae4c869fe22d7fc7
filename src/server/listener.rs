// Reusable listener module
// Creates TCP listeners with SO_REUSEPORT support

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a `TcpListener` with `SO_REUSEPORT` and `SO_REUSEADDR` enabled.
///
/// Lets a restarted process bind the port while the previous one is still
/// draining connections in `TIME_WAIT`.
///
/// # Arguments
///
/// * `addr` - The socket address to bind to
/// * `backlog` - Pending connection queue length passed to `listen(2)`
pub fn create_reusable_listener(
    addr: std::net::SocketAddr,
    backlog: i32,
) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;

    // Required before handing the socket to tokio
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(backlog)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
