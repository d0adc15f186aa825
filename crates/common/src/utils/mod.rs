mod encoding;
mod headers;

pub use encoding::{decode_base64, encode_base64};
pub use headers::{header_value, headers_to_map};
