///shell style ${VAR}, ${VAR:-default} and ${VAR-default} substitution
pub mod envsubst;
mod error;
mod openfaas;
pub use openfaas::*;

pub use error::*;
