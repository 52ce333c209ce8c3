mod convert;

use pyo3::{create_exception, exceptions};

create_exception!(_daq_coretypes, CastError, exceptions::PyTypeError);
create_exception!(_daq_coretypes, LinkageError, exceptions::PyImportError);

#[pyo3::pymodule(name = "_daq_coretypes")]
mod daq_coretypes {
    use std::path::{Path, PathBuf};

    use pyo3::{exceptions::PyValueError, prelude::*};

    #[pymodule_export]
    use super::{CastError, LinkageError};
    use crate::{
        config::CoreTypesConfig,
        core_type::CoreType,
        native,
        python::convert::resolve_python,
        version::Version,
    };

    #[pymodule_export]
    const _VERSION: &str = env!("CARGO_PKG_VERSION");

    #[pymodule_init]
    fn init(m: &Bound<'_, PyModule>) -> PyResult<()> {
        for core_type in CoreType::ALL {
            m.add(core_type.name(), u32::from(core_type))?;
        }
        Ok(())
    }

    #[pyclass(frozen, eq, from_py_object, name = "Version", module = "_daq_coretypes")]
    #[derive(Clone, Copy, PartialEq, Eq)]
    struct PyVersion {
        #[pyo3(get)]
        major: u32,
        #[pyo3(get)]
        minor: u32,
        #[pyo3(get)]
        revision: u32,
    }

    #[pymethods]
    impl PyVersion {
        fn __repr__(&self) -> String {
            format!(
                "Version(major={}, minor={}, revision={})",
                self.major, self.minor, self.revision
            )
        }

        fn __str__(&self) -> String {
            Version::new(self.major, self.minor, self.revision).to_string()
        }
    }

    impl From<Version> for PyVersion {
        fn from(version: Version) -> Self {
            Self {
                major: version.major,
                minor: version.minor,
                revision: version.revision,
            }
        }
    }

    #[pyfunction]
    fn get_version(py: Python) -> PyResult<PyVersion> {
        py.detach(native::try_get_version)
            .map(PyVersion::from)
            .map_err(|err| LinkageError::new_err(err.to_string()))
    }

    #[pyfunction]
    #[pyo3(signature = (path=None))]
    fn load_library(py: Python, path: Option<PathBuf>) -> PyResult<Option<PathBuf>> {
        let mut config = CoreTypesConfig::new();
        if let Some(path) = path {
            config = config.with_library(path);
        }

        let library = py
            .detach(|| native::load(&config))
            .map_err(|err| LinkageError::new_err(err.to_string()))?;
        Ok(library.source().map(Path::to_path_buf))
    }

    #[pyfunction]
    fn resolve<'py>(value: &Bound<'py, PyAny>, tag: u32) -> PyResult<Bound<'py, PyAny>> {
        let tag = CoreType::try_from(tag).map_err(|err| PyValueError::new_err(err.to_string()))?;
        resolve_python(value, tag)
    }
}
