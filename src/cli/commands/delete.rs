//! cli::commands::delete
//!
//! Remove every property set from a file.

use std::path::Path;

use anyhow::Result;

use super::{open_store, Context};
use crate::core::metadata;
use crate::store::StoreMode;
use crate::ui::output;

pub(super) fn run(file: &Path, ctx: &Context) -> Result<()> {
    // Check with a read handle first so files without metadata are never
    // locked for writing.
    let present = {
        let store = open_store(file, StoreMode::Read, ctx)?;
        metadata::is_metadata_present(&store)?
    };
    if !present {
        output::debug(
            format!("{} has no metadata", file.display()),
            ctx.verbosity,
        );
        return Ok(());
    }

    let mut store = open_store(file, StoreMode::ReadWrite, ctx)?;
    let removed = metadata::delete_all(&mut store)?;
    output::debug(format!("removed {removed} property sets"), ctx.verbosity);
    output::success(
        format!("Removed all metadata from {}", file.display()),
        ctx.verbosity,
    );
    Ok(())
}
