//! Dataset host outbound adapter.
//!
//! Implements `LocationCatalogue` and the email-keyed `ShadowProfileLookup`.

mod dto;
mod http_source;

pub use http_source::DatasetHttpSource;
