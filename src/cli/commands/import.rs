//! cli::commands::import
//!
//! Import metadata from XML into a file.

use std::path::Path;

use anyhow::{Context as _, Result};

use super::{open_store, Context};
use crate::core::document;
use crate::core::error::MetaError;
use crate::core::metadata;
use crate::store::StoreMode;
use crate::ui::output;

pub(super) fn run(file: &Path, ctx: &Context) -> Result<()> {
    let xml_path = ctx.xml_path(file);
    if !xml_path.is_file() {
        return Err(MetaError::FileNotFound(xml_path).into());
    }

    let doc = document::read_file(&xml_path)
        .with_context(|| format!("failed to read {}", xml_path.display()))?;

    // A document without property sets leaves the store untouched.
    if doc.is_empty() {
        output::debug(
            format!("{} has no property sets", xml_path.display()),
            ctx.verbosity,
        );
    } else {
        let mut store = open_store(file, StoreMode::ReadWrite, ctx)?;
        let written = metadata::import(&doc, &mut store)?;
        output::debug(format!("wrote {written} properties"), ctx.verbosity);
    }

    output::success(
        format!(
            "Imported metadata to {} from {}",
            file.display(),
            xml_path.display()
        ),
        ctx.verbosity,
    );
    Ok(())
}
