use std::path::{Path, PathBuf};

/// Base name of the native core types module.
pub const LIBRARY_NAME: &str = "daqcoretypes";

/// Exported symbol writing (major, minor, revision).
pub const VERSION_ENTRY_POINT: &str = "daqCoreTypesGetVersion";

/// Where the native core types module is resolved from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreTypesConfig {
    /// File name or path handed to the platform loader. The module must be
    /// a build of the core types library: its `daqCoreTypesGetVersion` is
    /// called with the fixed three-`u32` signature.
    pub library: PathBuf,
}

impl Default for CoreTypesConfig {
    fn default() -> Self {
        Self {
            library: PathBuf::from(libloading::library_filename(LIBRARY_NAME)),
        }
    }
}

impl CoreTypesConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_library(mut self, library: impl AsRef<Path>) -> Self {
        self.library = library.as_ref().to_path_buf();
        self
    }
}
