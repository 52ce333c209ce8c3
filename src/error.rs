use std::path::PathBuf;

use crate::core_type::CoreType;

/// A checked cast was asked for a kind the handle does not hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot cast {actual} value to {expected}")]
pub struct CastError {
    pub expected: CoreType,
    pub actual: CoreType,
}

/// The native core types module or its entry point could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum LinkageError {
    #[error("failed to load native library '{}': {reason}", library.display())]
    LoadFailed { library: PathBuf, reason: String },

    #[error("native library '{}' does not export '{entry_point}': {reason}", library.display())]
    MissingEntryPoint {
        library: PathBuf,
        entry_point: &'static str,
        reason: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown core type discriminant {0}")]
pub struct UnknownCoreType(pub u32);
