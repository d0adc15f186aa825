mod request;
mod response;

pub use request::{InnerRequest, Method, encode};
pub use response::InnerResponse;
