//! Remote collaborators.
//!
//! Everything that talks to the network sits behind a trait so resolution can
//! be tested offline: [`Probe`] verifies that an artifact URL is fetchable and
//! [`ReleaseApi`] looks up the installer's latest release tag. [`HttpClient`]
//! implements both over blocking HTTP.

pub mod http;
pub mod probe;
pub mod release;

pub use http::{HttpClient, RetryPolicy};
pub use probe::Probe;
pub use release::ReleaseApi;
