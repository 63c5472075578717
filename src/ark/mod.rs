//! Ark Passive simulator — what-if point allocation over a character's
//! armory-reported board. State lives in WASM memory (thread_local) for the
//! lifetime of the Web Worker and is never persisted.

pub mod board;
pub mod catalogue;
pub mod category;
pub mod codec;
pub mod engine;
pub mod icon;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod tooltip;

#[cfg(test)]
pub(crate) mod fixtures;
