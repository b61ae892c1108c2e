//! cli::commands
//!
//! Per-file command handlers.
//!
//! # Design
//!
//! Each handler takes one target file and the shared [`Context`]. It opens
//! the store it needs, calls the matching core operation and reports the
//! outcome. [`dispatch`] runs the selected handler over every file, keeps
//! going after a failure and returns the status code of the last one.

mod delete;
mod export;
mod import;

use std::path::Path;

use anyhow::Result;

use crate::cli::args::Operation;
use crate::core::config::Config;
use crate::core::error::{MetaError, ERROR_INVALID_FUNCTION};
use crate::core::paths::XmlLocation;
use crate::store::{provider, PropertyStoreWriter, StoreError, StoreMode};
use crate::ui::output::{self, Verbosity};

/// Settings shared by every file in one run.
#[derive(Debug)]
pub struct Context {
    pub verbosity: Verbosity,
    pub config: Config,
    pub xml: XmlLocation,
    pub console: bool,
    pub explorer: bool,
}

impl Context {
    /// Path of the XML document for `target`.
    pub fn xml_path(&self, target: &Path) -> std::path::PathBuf {
        self.xml.resolve(target, self.config.suffix())
    }
}

/// Run `operation` on each file and return the process exit code.
pub fn dispatch<P: AsRef<Path>>(operation: Operation, files: &[P], ctx: &Context) -> i32 {
    let mut code = 0;
    for file in files {
        let file = file.as_ref();
        if let Err(err) = run_one(operation, file, ctx) {
            output::error(format!("{err:#}"));
            code = status_code(&err);
        }
    }
    code
}

fn run_one(operation: Operation, file: &Path, ctx: &Context) -> Result<()> {
    if !file.exists() {
        return Err(MetaError::FileNotFound(file.to_path_buf()).into());
    }
    if !ctx.explorer && !ctx.config.handles(file) {
        output::debug(
            format!("skipping {}: extension not handled", file.display()),
            ctx.verbosity,
        );
        return Ok(());
    }

    output::debug(
        format!("{} {}", operation.name(), file.display()),
        ctx.verbosity,
    );
    match operation {
        Operation::Export => export::run(file, ctx),
        Operation::Import => import::run(file, ctx),
        Operation::Delete => delete::run(file, ctx),
    }
}

/// Exit code for a failed file.
pub fn status_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<MetaError>()
        .map_or(ERROR_INVALID_FUNCTION, MetaError::status_code)
}

/// Open the store attached to `file` through the default provider.
pub(crate) fn open_store(
    file: &Path,
    mode: StoreMode,
    ctx: &Context,
) -> Result<Box<dyn PropertyStoreWriter>, MetaError> {
    let provider = provider();
    output::debug(
        format!(
            "opening {} store for {} ({:?})",
            provider.name(),
            file.display(),
            mode
        ),
        ctx.verbosity,
    );
    provider.open(file, mode).map_err(|source| store_open_error(file, source))
}

pub(crate) fn store_open_error(file: &Path, source: StoreError) -> MetaError {
    match source {
        StoreError::NotFound(path) => MetaError::FileNotFound(path),
        source => MetaError::StoreOpen {
            path: file.to_path_buf(),
            source,
        },
    }
}
