//! Ingress adapter - turns an HTTP request into an `IncomingRequest`

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::http::{header, HeaderMap, Method, Uri};

use crate::types::IncomingRequest;

/// Capture everything the log keeps about a request
pub fn capture_request(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    remote: Option<SocketAddr>,
    body: &[u8],
) -> IncomingRequest {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(media_type)
        .unwrap_or_default();

    let json_data = if is_json_media_type(&content_type) {
        serde_json::from_slice(body).ok()
    } else {
        None
    };

    let form_data = if content_type == "application/x-www-form-urlencoded" {
        parse_urlencoded(&String::from_utf8_lossy(body))
    } else {
        BTreeMap::new()
    };

    IncomingRequest {
        method: Some(method.as_str().to_string()),
        path: Some(uri.path().to_string()),
        ip_address: remote.map(|addr| addr.ip().to_string()),
        user_agent: headers
            .get(header::USER_AGENT)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned()),
        headers: collect_headers(headers),
        query_params: uri.query().map(parse_urlencoded).unwrap_or_default(),
        form_data,
        json_data,
        data: String::from_utf8_lossy(body).into_owned(),
    }
}

/// Lowercased media type without parameters
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// `application/json` or any `application/*+json`
fn is_json_media_type(media_type: &str) -> bool {
    media_type == "application/json"
        || (media_type.starts_with("application/") && media_type.ends_with("+json"))
}

/// Header map with Title-Case names; repeated headers are joined with `, `
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        collected
            .entry(title_case(name.as_str()))
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    collected
}

fn title_case(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse `a=1&b=two+words`; the first occurrence of a key wins
fn parse_urlencoded(input: &str) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    for pair in input.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.entry(decode_component(key)).or_insert_with(|| decode_component(value));
    }
    params
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}
