//! Instance content API outbound adapter.
//!
//! Implements `ShadowProfileStore` and the composite-key
//! `ShadowProfileLookup`.

mod dto;
mod http_store;

pub use http_store::ContentHttpStore;
