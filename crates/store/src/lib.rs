//! Client for the storage collaborator.
//!
//! The catalog's persistence lives in a remote service exposing a
//! PostgREST-style query/insert interface. This crate owns the HTTP
//! plumbing: one [`client::StoreClient`] per process, created from
//! [`client::StoreConfig`], with a bounded request timeout so a stalled
//! collaborator call cannot hold a loading state forever.

pub mod client;

pub use client::{StoreClient, StoreConfig, StoreError};
