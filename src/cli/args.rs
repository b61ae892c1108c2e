//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Design
//!
//! One operation flag (`--export`, `--import` or `--delete`) picks what
//! happens to every file; export is the default. Options that clap cannot
//! express as simple conflicts are checked by [`Cli::validate`], which
//! reports them as [`MetaError::InvalidArgument`].

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::core::error::MetaError;
use crate::core::paths::XmlLocation;

/// File Meta - export, import and delete file metadata as XML.
#[derive(Parser, Debug)]
#[command(name = "filemeta")]
#[command(author, version, about)]
#[command(long_about = "File Meta attaches property sets to arbitrary files and \
moves them to and from an XML document.\n\n\
By default the document for FILE is FILE.metadata.xml next to it.")]
#[command(group(
    ArgGroup::new("function")
        .args(["export", "import", "delete"])
        .multiple(false)
))]
pub struct Cli {
    /// Export metadata from each file to XML (default)
    #[arg(short = 'e', long)]
    pub export: bool,

    /// Import metadata from XML into each file
    #[arg(short = 'i', long)]
    pub import: bool,

    /// Delete all metadata from each file
    #[arg(short = 'd', long)]
    pub delete: bool,

    /// XML file to use (single target only)
    #[arg(short = 'x', long = "xml", value_name = "FILE")]
    pub xml: Option<PathBuf>,

    /// Folder holding the XML files
    #[arg(short = 'f', long, value_name = "DIR")]
    pub folder: Option<PathBuf>,

    /// Write exported XML to the console instead of a file
    #[arg(short = 'c', long)]
    pub console: bool,

    /// Export what the shell reports for the file, not just stored metadata
    #[arg(short = 'v', long)]
    pub explorer: bool,

    /// Wait for Enter before exiting
    #[arg(short = 'p', long)]
    pub prompt: bool,

    /// Minimal output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Show debug output
    #[arg(long)]
    pub debug: bool,

    /// Files to process
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

/// What to do with each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Export,
    Import,
    Delete,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Export => "export",
            Operation::Import => "import",
            Operation::Delete => "delete",
        }
    }
}

impl Cli {
    /// The selected operation.
    pub fn operation(&self) -> Operation {
        if self.import {
            Operation::Import
        } else if self.delete {
            Operation::Delete
        } else {
            Operation::Export
        }
    }

    /// Where each file's XML document lives.
    pub fn xml_location(&self) -> XmlLocation {
        match (&self.xml, &self.folder) {
            (Some(file), _) => XmlLocation::File(file.clone()),
            (None, Some(folder)) => XmlLocation::Folder(folder.clone()),
            (None, None) => XmlLocation::Default,
        }
    }

    /// Check option combinations clap does not catch.
    ///
    /// # Errors
    ///
    /// Returns `MetaError::InvalidArgument` describing the first bad
    /// combination found.
    pub fn validate(&self) -> Result<(), MetaError> {
        let invalid = |message: &str| Err(MetaError::InvalidArgument(message.to_string()));

        if self.xml.is_some() {
            if self.files.len() > 1 {
                return invalid("--xml can only be used with a single file");
            }
            if self.folder.is_some() {
                return invalid("--xml cannot be combined with --folder");
            }
            if self.console {
                return invalid("--xml cannot be combined with --console");
            }
        }

        if let Some(folder) = &self.folder {
            if !folder.is_dir() {
                return Err(MetaError::InvalidArgument(format!(
                    "--folder '{}' is not a directory",
                    folder.display()
                )));
            }
            if self.console {
                return invalid("--folder cannot be combined with --console");
            }
        }

        if self.console && self.operation() != Operation::Export {
            return invalid("--console can only be used with --export");
        }
        if self.explorer && self.operation() != Operation::Export {
            return invalid("--explorer can only be used with --export");
        }

        Ok(())
    }
}
