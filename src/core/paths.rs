//! core::paths
//!
//! Centralized path routing for File Meta storage locations.
//!
//! # Storage Layout
//!
//! Property sets for a target file live next to it:
//! - `<dir>/.filemeta/<file name>.json` - persisted property sets
//! - `<dir>/.filemeta/<file name>.json.lock` - exclusive writer lock
//!
//! Exported XML defaults to `<target><suffix>` (suffix `.metadata.xml`
//! unless configured), or goes to an explicit file or folder.
//!
//! # Example
//!
//! ```
//! use filemeta::core::paths::{SidecarPaths, XmlLocation};
//! use std::path::{Path, PathBuf};
//!
//! let paths = SidecarPaths::for_target(Path::new("/docs/report.txt"));
//! assert_eq!(
//!     paths.sidecar_path(),
//!     PathBuf::from("/docs/.filemeta/report.txt.json")
//! );
//!
//! let xml = XmlLocation::Default.resolve(Path::new("/docs/report.txt"), ".metadata.xml");
//! assert_eq!(xml, PathBuf::from("/docs/report.txt.metadata.xml"));
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Directory holding sidecar files, relative to the target's directory.
pub const SIDECAR_DIR: &str = ".filemeta";

/// Default suffix appended to a target's path to name its XML file.
pub const DEFAULT_XML_SUFFIX: &str = ".metadata.xml";

/// Sidecar locations for one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarPaths {
    target: PathBuf,
    dir: PathBuf,
    file_name: OsString,
}

impl SidecarPaths {
    pub fn for_target(target: &Path) -> Self {
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = target
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| target.as_os_str().to_os_string());

        Self {
            target: target.to_path_buf(),
            dir: parent.join(SIDECAR_DIR),
            file_name,
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// The `.filemeta` directory next to the target.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sidecar_path(&self) -> PathBuf {
        self.dir.join(with_suffix(&self.file_name, ".json"))
    }

    pub fn lock_path(&self) -> PathBuf {
        self.dir.join(with_suffix(&self.file_name, ".json.lock"))
    }

    /// Staging file for atomic writes of the sidecar.
    pub fn temp_path(&self) -> PathBuf {
        self.dir.join(with_suffix(&self.file_name, ".json.tmp"))
    }
}

/// Where the XML document for a target goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum XmlLocation {
    /// Next to the target: `<target><suffix>`.
    #[default]
    Default,
    /// An explicit file.
    File(PathBuf),
    /// `<folder>/<target file name><suffix>`.
    Folder(PathBuf),
}

impl XmlLocation {
    pub fn resolve(&self, target: &Path, suffix: &str) -> PathBuf {
        match self {
            XmlLocation::Default => PathBuf::from(with_suffix(target.as_os_str(), suffix)),
            XmlLocation::File(path) => path.clone(),
            XmlLocation::Folder(folder) => {
                let name = target.file_name().unwrap_or(target.as_os_str());
                folder.join(with_suffix(name, suffix))
            }
        }
    }
}

fn with_suffix(base: &std::ffi::OsStr, suffix: &str) -> OsString {
    let mut name = base.to_os_string();
    name.push(suffix);
    name
}
