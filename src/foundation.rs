pub mod error;
pub(crate) mod hash;
