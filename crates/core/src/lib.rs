//! Acehive domain core.
//!
//! Pure decision logic for the academic-resource console: the degree
//! taxonomy, the classification engine that turns a form draft into a
//! storable record, the submission lifecycle, the table browsing and
//! filtering engine, and the per-table column sanitizer.
//!
//! This crate performs no I/O. Everything network-facing lives in
//! `acehive-store` (the storage collaborator client) and `acehive-api`
//! (the HTTP service).

pub mod browse;
pub mod columns;
pub mod error;
pub mod resource;
pub mod submission;
pub mod taxonomy;
pub mod types;
