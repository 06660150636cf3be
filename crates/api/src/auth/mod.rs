//! Authentication plumbing: access-token generation/validation and the
//! revocation list that gives sessions an explicit teardown.

pub mod jwt;
pub mod revocation;
