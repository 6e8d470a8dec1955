pub(crate) mod decode;
pub(crate) mod encode;
mod error;

pub use encode::ToXml;
pub use error::{DecodeError, DecodeResult, EncodeError};
