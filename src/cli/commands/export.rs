//! cli::commands::export
//!
//! Export a file's metadata to XML.
//!
//! With `--explorer` the file-system view of the target is chained under
//! its stored metadata, so the document holds what the shell would show.

use std::path::Path;

use anyhow::{Context as _, Result};

use super::{open_store, store_open_error, Context};
use crate::core::document::{self, xml};
use crate::core::metadata;
use crate::store::{ChainedStore, FileSystemStore, StoreMode};
use crate::ui::output;

pub(super) fn run(file: &Path, ctx: &Context) -> Result<()> {
    let store = open_store(file, StoreMode::Read, ctx)?;
    let doc = if ctx.explorer {
        let shell = FileSystemStore::open(file).map_err(|e| store_open_error(file, e))?;
        metadata::export(&ChainedStore::new(store, Some(shell)))?
    } else {
        metadata::export(&store)?
    };
    output::debug(
        format!(
            "exported {} properties in {} sets",
            doc.entry_count(),
            doc.groups.len()
        ),
        ctx.verbosity,
    );

    if ctx.console {
        output::document(&xml::to_xml(&doc)?);
        return Ok(());
    }

    let xml_path = ctx.xml_path(file);
    document::write_file(&xml_path, &doc)
        .with_context(|| format!("failed to export metadata from {}", file.display()))?;
    output::success(
        format!("Exported metadata to {}", xml_path.display()),
        ctx.verbosity,
    );
    Ok(())
}
