pub mod error;
pub mod der;
pub mod charset;
pub mod certificate;

pub use error::{Error, Result};
pub use der::{DerEncode, decode_der};
pub use charset::CharSet;
