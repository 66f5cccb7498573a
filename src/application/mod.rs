//! Application module - lookup orchestration
//!
//! Composes the infrastructure pieces (cache, retry controller, fetcher,
//! parsers) into the operations consumers call.

pub mod lookup;

pub use lookup::LookupService;
