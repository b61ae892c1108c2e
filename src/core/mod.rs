//! core
//!
//! Core domain types and metadata operations for File Meta.
//!
//! # Modules
//!
//! - [`types`] - Strong types: FormatId, PropertyKey
//! - [`vartype`] - Variant type codes and their labels
//! - [`variant`] - Typed values, coercion and display formatting
//! - [`strings`] - Vector display string splitting and joining
//! - [`schema`] - Well-known property sets and property names
//! - [`document`] - Metadata document, XML form and file encoding
//! - [`metadata`] - Export, import, presence and deletion
//! - [`error`] - Error taxonomy and status codes
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for File Meta storage
//!
//! # Design Principles
//!
//! - Core operations take a store handle and never open one themselves
//! - Every operation stops at its first failure
//! - Only ids, type codes and values are authoritative in a document

pub mod config;
pub mod document;
pub mod error;
pub mod metadata;
pub mod paths;
pub mod schema;
pub mod strings;
pub mod types;
pub mod variant;
pub mod vartype;
