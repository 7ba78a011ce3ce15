use std::fmt;

use crate::errors::{QuicError, Result};

/// A syntactically valid `host:port` migration target.
///
/// Only the shape is checked: no name resolution and no reachability probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectPath {
    host: String,
    port: u16,
}

impl DirectPath {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_ipv6(&self) -> bool {
        self.host.contains(':')
    }
}

impl fmt::Display for DirectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ipv6() {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl std::str::FromStr for DirectPath {
    type Err = QuicError;

    fn from_str(s: &str) -> Result<Self> {
        validate_direct_path(s)
    }
}

/// Checks `target` is a well-formed `host:port` or `[ipv6]:port` pair.
///
/// Stricter than a bare host/port split: the host must be non-empty, and a
/// bracketed host must be an IPv6 literal. `":443"` and `"[host]:443"` fail.
pub fn validate_direct_path(target: &str) -> Result<DirectPath> {
    let invalid = || QuicError::InvalidTargetAddress {
        target: target.to_string(),
    };

    let (host, port) = if let Some(rest) = target.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or_else(invalid)?;
        let port = tail.strip_prefix(':').ok_or_else(invalid)?;
        if !host.contains(':') {
            return Err(invalid());
        }
        (host, port)
    } else {
        let (host, port) = target.split_once(':').ok_or_else(invalid)?;
        if host.contains(':') || port.contains(':') {
            return Err(invalid());
        }
        (host, port)
    };

    let bad_char = |c: char| c == '[' || c == ']' || c.is_whitespace();
    if host.is_empty() || host.contains(bad_char) {
        return Err(invalid());
    }

    Ok(DirectPath {
        host: host.to_string(),
        port: parse_port(port).ok_or_else(invalid)?,
    })
}

fn parse_port(raw: &str) -> Option<u16> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u16>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_valid_paths() {
        let path = validate_direct_path("127.0.0.1:443").unwrap();
        assert_eq!(path.host(), "127.0.0.1");
        assert_eq!(path.port(), 443);
        assert!(!path.is_ipv6());

        let path = validate_direct_path("example.com:8443").unwrap();
        assert_eq!(path.to_string(), "example.com:8443");

        let path = validate_direct_path("[2001:db8::1]:4433").unwrap();
        assert_eq!(path.host(), "2001:db8::1");
        assert!(path.is_ipv6());
        assert_eq!(path.to_string(), "[2001:db8::1]:4433");

        assert_eq!(validate_direct_path("10.0.0.1:0").unwrap().port(), 0);
        assert_eq!(validate_direct_path("10.0.0.1:65535").unwrap().port(), 65535);
    }

    #[test]
    fn test_invalid_paths() {
        for target in [
            "",
            "no-port",
            "host:",
            "host:https",
            "host:+443",
            "host:65536",
            ":443",
            "a:b:443",
            "::1:443",
            "[::1]443",
            "[::1]",
            "[]:443",
            "[host]:443",
            "ho]st:443",
            "bad host:443",
        ] {
            let err = validate_direct_path(target).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidTargetAddress, "accepted {:?}", target);
        }
    }

    #[test]
    fn test_from_str() {
        let path: DirectPath = "192.168.1.10:443".parse().unwrap();
        assert_eq!(path.port(), 443);
        assert!("invalid".parse::<DirectPath>().is_err());
    }
}
