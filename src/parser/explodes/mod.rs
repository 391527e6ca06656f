pub mod vmess;

use crate::models::ProxyDescriptor;

use super::DecodeError;

pub use vmess::explode_vmess;

/// Decode one trimmed link line into a descriptor, dispatching on its scheme.
pub fn explode(link: &str) -> Result<ProxyDescriptor, DecodeError> {
    if link.starts_with(vmess::VMESS_PREFIX) {
        explode_vmess(link)
    } else {
        Err(DecodeError::UnsupportedScheme)
    }
}
