//! Resolution of manifest entries into actions and artifact URLs.
//!
//! Both resolvers are pure over the manifest. The only side effect is the
//! artifact existence probe, which goes through the [`Probe`](crate::sources::Probe)
//! seam so rules can be exercised without network access.

pub mod action;
pub mod artifact;

pub use action::resolve_action;
pub use artifact::{compose_url, generate_url, Artifact, Candidate};
