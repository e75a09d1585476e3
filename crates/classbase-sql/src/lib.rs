pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub use classbase_core::stmt::{self, Statement};
