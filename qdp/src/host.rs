//! Host and port argument parsing

use crate::error::{Error, Result};

/// Split `host[:port]` into its parts, using `default_port` when absent
///
/// IPv6 literals must be bracketed to carry a port (`[::1]:5330`); a bare
/// literal such as `::1` is taken as a host on its own.
///
/// ```
/// assert_eq!(qdp::split_host_port("q330-a:6330", 5330).unwrap(), ("q330-a".to_string(), 6330));
/// assert_eq!(qdp::split_host_port("[fe80::1]", 5330).unwrap(), ("fe80::1".to_string(), 5330));
/// ```
pub fn split_host_port(arg: &str, default_port: u16) -> Result<(String, u16)> {
    let invalid = || Error::InvalidHost(arg.to_string());

    let (host, port) = if let Some(rest) = arg.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or_else(invalid)?;
        match tail {
            "" => (host, None),
            _ => (host, Some(tail.strip_prefix(':').ok_or_else(invalid)?)),
        }
    } else {
        match arg.split_once(':') {
            Some((host, port)) if !port.contains(':') => (host, Some(port)),
            _ => (arg, None),
        }
    };

    if host.is_empty() {
        return Err(invalid());
    }

    let port = match port {
        Some(port) => port.parse().map_err(|_| invalid())?,
        None => default_port,
    };

    Ok((host.to_string(), port))
}
