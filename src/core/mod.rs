//! Core value types, constants, and error taxonomy.

mod address;
pub mod constants;
mod credentials;
mod error;

pub use address::Address;
pub use credentials::{ClientCertificate, Credentials};
pub use error::*;
