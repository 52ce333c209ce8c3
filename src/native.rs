//! Access to the native core types module.
//!
//! The module is resolved once per process and stays loaded afterwards. The
//! first caller of [`library`] (or [`load`]/[`install`]) decides which module
//! that is; every later call reads the same resolved entry point without
//! locking.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;

use crate::{
    config::{CoreTypesConfig, VERSION_ENTRY_POINT},
    error::LinkageError,
    version::Version,
};

/// `void daqCoreTypesGetVersion(unsigned int* major, unsigned int* minor, unsigned int* revision)`
pub type GetVersionFn = unsafe extern "C" fn(major: *mut u32, minor: *mut u32, revision: *mut u32);

static LIBRARY: OnceCell<CoreTypesLibrary> = OnceCell::new();

/// Resolved entry points of the native core types module.
#[derive(Debug)]
pub struct CoreTypesLibrary {
    get_version: GetVersionFn,
    source: Option<PathBuf>,
    // Keeps the module mapped for as long as `get_version` may be called.
    _library: Option<libloading::Library>,
}

impl CoreTypesLibrary {
    /// Loads the configured module and resolves `daqCoreTypesGetVersion`.
    ///
    /// Only the fixed entry point is ever looked up; a module that exports
    /// other symbols but not this one is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`LinkageError`] when the module cannot be loaded or does not
    /// export the entry point.
    pub fn open(config: &CoreTypesConfig) -> Result<Self, LinkageError> {
        // SAFETY: loading runs the module's initialisers, which the core types
        // library keeps free of side effects on the host process.
        let library = unsafe { libloading::Library::new(&config.library) }.map_err(|err| {
            LinkageError::LoadFailed {
                library: config.library.clone(),
                reason: err.to_string(),
            }
        })?;

        Self::from_library(library, config)
    }

    fn from_library(
        library: libloading::Library,
        config: &CoreTypesConfig,
    ) -> Result<Self, LinkageError> {
        let get_version = {
            // SAFETY: every core types build exports `daqCoreTypesGetVersion`
            // with the `GetVersionFn` signature.
            let symbol = unsafe { library.get::<GetVersionFn>(VERSION_ENTRY_POINT.as_bytes()) }
                .map_err(|err| LinkageError::MissingEntryPoint {
                    library: config.library.clone(),
                    entry_point: VERSION_ENTRY_POINT,
                    reason: err.to_string(),
                })?;
            *symbol
        };

        log::debug!(
            "resolved {VERSION_ENTRY_POINT} from {}",
            config.library.display()
        );

        Ok(Self {
            get_version,
            source: Some(config.library.clone()),
            _library: Some(library),
        })
    }

    /// Wraps an entry point that is already linked into the process.
    ///
    /// # Safety
    ///
    /// `get_version` must follow the `GetVersionFn` contract: write one
    /// `u32` through each pointer and touch nothing else. It must stay valid
    /// for the lifetime of the returned value.
    #[must_use]
    pub unsafe fn from_entry_point(get_version: GetVersionFn) -> Self {
        Self {
            get_version,
            source: None,
            _library: None,
        }
    }

    /// Path of the loaded module, `None` for statically linked entry points.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn version(&self) -> Version {
        let mut major = 0u32;
        let mut minor = 0u32;
        let mut revision = 0u32;

        // SAFETY: three live, writable out-parameters of the declared width.
        unsafe { (self.get_version)(&mut major, &mut minor, &mut revision) };

        Version::new(major, minor, revision)
    }
}

/// Makes `library` the process-wide core types library.
///
/// # Errors
///
/// Hands `library` back if a library was already resolved.
pub fn install(library: CoreTypesLibrary) -> Result<&'static CoreTypesLibrary, CoreTypesLibrary> {
    LIBRARY.try_insert(library).map_err(|(_, library)| library)
}

/// Resolves the process-wide library from `config` unless one is already
/// resolved, in which case that one is returned and `config` is ignored.
///
/// # Errors
///
/// Returns [`LinkageError`] if resolution was attempted and failed. A failed
/// attempt leaves the slot empty.
pub fn load(config: &CoreTypesConfig) -> Result<&'static CoreTypesLibrary, LinkageError> {
    LIBRARY
        .get_or_try_init(|| CoreTypesLibrary::open(config))
        .inspect_err(|err| log::warn!("{err}"))
}

/// The process-wide library, resolved with the default configuration on first
/// use.
///
/// # Panics
///
/// Panics when the native module cannot be resolved; nothing in the binding
/// works without it.
pub fn library() -> &'static CoreTypesLibrary {
    if let Some(library) = LIBRARY.get() {
        return library;
    }
    match load(&CoreTypesConfig::default()) {
        Ok(library) => library,
        Err(err) => panic!("core types library is required: {err}"),
    }
}

/// Version of the process-wide core types library.
///
/// # Panics
///
/// See [`library`].
#[must_use]
pub fn get_version() -> Version {
    library().version()
}

/// Like [`get_version`], reporting a missing library as an error.
///
/// # Errors
///
/// Returns [`LinkageError`] when the default module cannot be resolved.
pub fn try_get_version() -> Result<Version, LinkageError> {
    match LIBRARY.get() {
        Some(library) => Ok(library.version()),
        None => load(&CoreTypesConfig::default()).map(CoreTypesLibrary::version),
    }
}
