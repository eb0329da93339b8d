//! Subdomain reconnaissance module.
//!
//! This module resolves a target domain into a candidate host set by
//! querying a public certificate-transparency log. Resolution is
//! best-effort: a failed query degrades to the target domain alone.

pub mod crt_sh;

pub use crt_sh::SubdomainResolver;
