use http::HeaderMap;
use std::collections::HashMap;

/// Flatten an outer HTTP header map into the single-valued form the
/// inner response type carries. Repeated header names collapse to the
/// last value seen; non-UTF-8 values are dropped.
pub fn headers_to_map(headers: &HeaderMap) -> HashMap<String, String> {
    let mut map = HashMap::new();

    for (name, value) in headers.iter() {
        if let Ok(val) = value.to_str() {
            map.insert(name.as_str().to_string(), val.to_string());
        }
    }

    map
}

/// Case-insensitive header lookup in a flattened map
pub fn header_value<'a>(map: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    map.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_headers_to_map_empty() {
        let map = headers_to_map(&HeaderMap::new());
        assert!(map.is_empty());
    }

    #[test]
    fn test_headers_to_map_multiple() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/octet-stream".parse().unwrap());
        headers.insert("userpseudonym", "abc123".parse().unwrap());

        let map = headers_to_map(&headers);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("content-type").unwrap(), "application/octet-stream");
        assert_eq!(map.get("userpseudonym").unwrap(), "abc123");
    }

    #[test]
    fn test_headers_to_map_repeated_name_keeps_last() {
        let mut headers = HeaderMap::new();
        headers.insert("x-a", "first".parse().unwrap());
        headers.append("x-a", "second".parse().unwrap());

        let map = headers_to_map(&headers);
        assert_eq!(map.get("x-a").unwrap(), "second");
    }

    #[test]
    fn test_headers_to_map_drops_non_utf8() {
        let mut headers = HeaderMap::new();
        headers.insert("x-binary", HeaderValue::from_bytes(&[0xFF, 0xFE]).unwrap());
        headers.insert("x-text", "ok".parse().unwrap());

        let map = headers_to_map(&headers);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x-text").unwrap(), "ok");
    }

    #[test]
    fn test_header_value_case_insensitive() {
        let mut map = HashMap::new();
        map.insert("Userpseudonym".to_string(), "p-1".to_string());

        assert_eq!(header_value(&map, "userpseudonym"), Some("p-1"));
        assert_eq!(header_value(&map, "USERPSEUDONYM"), Some("p-1"));
        assert_eq!(header_value(&map, "x-request-id"), None);
    }
}
