//! File Meta - structured metadata for arbitrary files
//!
//! File Meta attaches property sets (groups of typed values keyed by a
//! format id and a property id) to files, and moves them to and from a
//! textual XML document so they can be inspected, edited and restored.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, runs operations)
//! - [`core`] - Domain types, value model, XML document and the export,
//!   import and delete operations
//! - [`store`] - The property store capability and its implementations
//! - [`ui`] - User interaction utilities
//!
//! # Round trip
//!
//! ```
//! use filemeta::core::document::xml;
//! use filemeta::core::metadata;
//! use filemeta::store::MemoryStore;
//!
//! let text = r#"<Metadata>
//!     <Storage FormatID="{F29F85E0-4FF9-1068-AB91-08002B27B3D9}">
//!         <Property Id="2" TypeId="31"><Value>Quarterly report</Value></Property>
//!     </Storage>
//! </Metadata>"#;
//!
//! let doc = xml::from_xml(text).unwrap();
//! let mut store = MemoryStore::new();
//! metadata::import(&doc, &mut store).unwrap();
//!
//! let exported = metadata::export(&store).unwrap();
//! assert_eq!(
//!     exported.groups[0].entries[0].value.as_deref(),
//!     Some("Quarterly report")
//! );
//! ```

pub mod cli;
pub mod core;
pub mod store;
pub mod ui;
