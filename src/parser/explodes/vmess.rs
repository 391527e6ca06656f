use crate::models::{
    Network, ProxyDescriptor, ProxyType, WsOptions, VMESS_DEFAULT_CIPHER,
};
use crate::parser::DecodeError;
use crate::utils::base64::decode_lenient;
use serde_json::Value;

pub const VMESS_PREFIX: &str = "vmess://";

/// Read a field that publishers emit either as a JSON string or a number.
fn json_text(json: &Value, key: &str) -> Option<String> {
    match &json[key] {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Like [`json_text`] but treats blank strings as absent.
fn json_non_empty(json: &Value, key: &str) -> Option<String> {
    json_text(json, key).filter(|s| !s.trim().is_empty())
}

fn parse_port(json: &Value) -> Result<u16, DecodeError> {
    let raw = json_text(json, "port").unwrap_or_default();
    match raw.trim().parse::<u32>() {
        Ok(port) if (1..=65535).contains(&port) => Ok(port as u16),
        _ => Err(DecodeError::InvalidPort(raw)),
    }
}

fn parse_alter_id(json: &Value) -> Result<u32, DecodeError> {
    match json_non_empty(json, "aid") {
        None => Ok(0),
        Some(aid) => aid
            .trim()
            .parse::<u32>()
            .map_err(|_| DecodeError::MalformedPayload(format!("invalid alterId {:?}", aid))),
    }
}

/// Parse a VMess share link (`vmess://` + base64 JSON) into a descriptor.
///
/// The JSON keys follow the v2rayN share format: `ps`, `add`, `port`, `id`,
/// `aid`, `net`, `tls`, `path` and `host`.
pub fn explode_vmess(vmess: &str) -> Result<ProxyDescriptor, DecodeError> {
    let encoded = vmess
        .strip_prefix(VMESS_PREFIX)
        .ok_or(DecodeError::UnsupportedScheme)?;

    let bytes = decode_lenient(encoded)
        .map_err(|e| DecodeError::MalformedPayload(format!("base64: {}", e)))?;
    let decoded = String::from_utf8(bytes)
        .map_err(|e| DecodeError::MalformedPayload(format!("utf-8: {}", e)))?;
    let json: Value = serde_json::from_str(&decoded)
        .map_err(|e| DecodeError::MalformedPayload(format!("json: {}", e)))?;
    if !json.is_object() {
        return Err(DecodeError::MalformedPayload(
            "payload is not a JSON object".to_string(),
        ));
    }

    let proxy_type = ProxyType::VMess;
    let add = json_non_empty(&json, "add")
        .map(|s| s.trim().to_string())
        .ok_or(DecodeError::MissingRequiredField("add"))?;
    let id = json_non_empty(&json, "id")
        .map(|s| s.trim().to_string())
        .ok_or(DecodeError::MissingRequiredField("id"))?;
    let port = parse_port(&json)?;
    let alter_id = parse_alter_id(&json)?;

    let remark = json_non_empty(&json, "ps")
        .unwrap_or_else(|| format!("{}-{}", proxy_type, add));
    let network = Network::from_name(&json_text(&json, "net").unwrap_or_default());
    let tls = json_text(&json, "tls").as_deref() == Some("tls");

    let ws_opts = match network {
        Network::Ws => Some(WsOptions {
            path: json_non_empty(&json, "path").unwrap_or_else(|| "/".to_string()),
            host: json_text(&json, "host").unwrap_or_default(),
        }),
        _ => None,
    };

    Ok(ProxyDescriptor {
        proxy_type,
        remark,
        hostname: add,
        port,
        user_id: id,
        alter_id,
        cipher: VMESS_DEFAULT_CIPHER.to_string(),
        tls,
        network,
        ws_opts,
    })
}
