//! # peer-core
//!
//! Core types and error types for peerlist.
//!
//! This crate provides the foundational types shared across all peerlist crates:
//! - [`entry::Entry`], the typed record behind one rendered review row
//! - [`candidate::Candidate`], one person returned by the lookup endpoint
//! - [`severity::Severity`], the tag carried by user-facing notifications
//! - Cross-cutting error types

pub mod candidate;
pub mod entry;
pub mod errors;
pub mod severity;
