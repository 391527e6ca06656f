//! Proxy model definitions
//!
//! Contains the canonical data structures for decoded proxy servers.

use std::fmt;

/// Represents the type of a proxy.
///
/// Only VMess links are decoded today; the enum exists so the output schema
/// and the synthesized labels have one place to read the protocol name from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyType {
    VMess,
}

impl ProxyType {
    /// Lowercase name as used in link schemes and Clash `type` fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::VMess => "vmess",
        }
    }
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport carried underneath the proxy protocol (`net` in VMess links).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Network {
    Tcp,
    Ws,
    H2,
    Http,
    Grpc,
    /// Any transport name we do not model explicitly, kept verbatim.
    Other(String),
}

impl Network {
    /// Map a raw `net` value onto a transport. Empty means TCP.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "" | "tcp" => Network::Tcp,
            "ws" => Network::Ws,
            "h2" => Network::H2,
            "http" => Network::Http,
            "grpc" => Network::Grpc,
            other => Network::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Network::Tcp => "tcp",
            Network::Ws => "ws",
            Network::H2 => "h2",
            Network::Http => "http",
            Network::Grpc => "grpc",
            Network::Other(name) => name,
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Tcp
    }
}

/// WebSocket transport options, present only for [`Network::Ws`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsOptions {
    pub path: String,
    /// Value for the `Host` header; may be empty.
    pub host: String,
}

/// Canonical representation of one proxy endpoint.
///
/// A descriptor is only ever built by the decoder, which guarantees that
/// `hostname` and `user_id` are non-empty, `port` is non-zero and
/// `ws_opts` is `Some` exactly when `network` is [`Network::Ws`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDescriptor {
    pub proxy_type: ProxyType,
    /// Human readable label. Rewritten by the name resolver.
    pub remark: String,
    pub hostname: String,
    pub port: u16,
    pub user_id: String,
    pub alter_id: u32,
    pub cipher: String,
    pub tls: bool,
    pub network: Network,
    pub ws_opts: Option<WsOptions>,
}

impl ProxyDescriptor {
    /// Deduplication identity of this descriptor.
    pub fn endpoint_key(&self) -> EndpointKey {
        EndpointKey {
            host: self.hostname.clone(),
            port: self.port,
        }
    }
}

/// `(host, port)` pair identifying a physical server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointKey {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A decoded descriptor together with the tag of the source it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedProxy {
    pub proxy: ProxyDescriptor,
    pub source_tag: String,
}

impl SourcedProxy {
    pub fn new(proxy: ProxyDescriptor, source_tag: impl Into<String>) -> Self {
        Self {
            proxy,
            source_tag: source_tag.into(),
        }
    }
}

/// Cipher written for every VMess proxy.
pub const VMESS_DEFAULT_CIPHER: &str = "auto";

/// Sentinel destinations appended to the manual selection group.
pub const DIRECT_POLICY: &str = "DIRECT";
pub const REJECT_POLICY: &str = "REJECT";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_from_name() {
        assert_eq!(Network::from_name(""), Network::Tcp);
        assert_eq!(Network::from_name("ws"), Network::Ws);
        assert_eq!(Network::from_name(" grpc "), Network::Grpc);
        assert_eq!(
            Network::from_name("kcp"),
            Network::Other("kcp".to_string())
        );
        assert_eq!(Network::from_name("kcp").as_str(), "kcp");
    }

    #[test]
    fn test_endpoint_key_display() {
        let key = EndpointKey {
            host: "1.2.3.4".to_string(),
            port: 443,
        };
        assert_eq!(key.to_string(), "1.2.3.4:443");
    }
}
