//! # Instance Trees
//!
//! Decoded record instances: [`Hub`]/[`Node`] owned trees mirroring a
//! schema template, plus the recursive codec that materializes them from
//! byte buffers and writes them back.

mod codec;
mod hub;

pub use codec::{decode_buffer, decode_hubs, encode_buffer, encode_hubs};
pub use hub::{Hub, Node, Section};
