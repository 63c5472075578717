//! Route handlers. Each returns an HTML fragment or a JSON string.

pub mod ark;
pub mod util;
