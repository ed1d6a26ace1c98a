//! Authorization server descriptors.
//!
//! `descriptor` exposes validated metadata ([`ProviderDescriptor`]) covering the token and
//! health endpoints, the TLS rule for those endpoints, and the grant capability flags that
//! gate which flows a requester will attempt.

pub mod descriptor;

pub use descriptor::*;
