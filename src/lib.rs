pub mod config;
pub mod core_type;
pub mod error;
pub mod native;
pub mod object;
pub mod resolve;
pub mod version;

#[cfg(feature = "python")]
mod python;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub use config::CoreTypesConfig;
pub use core_type::CoreType;
pub use error::{CastError, LinkageError, UnknownCoreType};
pub use native::{CoreTypesLibrary, get_version};
pub use object::{BaseObject, BoolObject, FloatObject, IntegerObject, StringObject, TypedView, Value};
pub use resolve::{Representation, resolve};
pub use version::Version;
