use pyo3::{
    IntoPyObjectExt,
    exceptions::PyRecursionError,
    prelude::*,
    types::{PyBool, PyBytes, PyComplex, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple},
};

use super::CastError;
use crate::{
    core_type::CoreType,
    object::{BaseObject, Value},
    resolve::{Representation, placeholder, resolve},
};

const MAX_DEPTH: usize = 256;

pub(crate) fn python_to_object(obj: &Bound<'_, PyAny>) -> PyResult<BaseObject> {
    to_object(obj, 0)
}

fn to_object(obj: &Bound<'_, PyAny>, depth: usize) -> PyResult<BaseObject> {
    if depth > MAX_DEPTH {
        return Err(PyRecursionError::new_err(format!(
            "containers nested deeper than {MAX_DEPTH} levels cannot be converted"
        )));
    }
    if obj.is_none() {
        return Ok(BaseObject::undefined());
    }
    if let Ok(bool) = obj.cast::<PyBool>() {
        return Ok(BaseObject::from(bool.is_true()));
    }
    if let Ok(int) = obj.cast::<PyInt>() {
        return Ok(BaseObject::from(int.extract::<i64>()?));
    }
    if let Ok(float) = obj.cast::<PyFloat>() {
        return Ok(BaseObject::from(float.value()));
    }
    if let Ok(str) = obj.cast::<PyString>() {
        return Ok(BaseObject::from(str.to_string_lossy().into_owned()));
    }
    if let Ok(bytes) = obj.cast::<PyBytes>() {
        return Ok(BaseObject::binary(bytes.as_bytes().to_vec()));
    }
    if let Ok(complex) = obj.cast::<PyComplex>() {
        return Ok(BaseObject::complex(complex.real(), complex.imag()));
    }
    if let Ok(tuple) = obj.cast::<PyTuple>() {
        let mut items = Vec::with_capacity(tuple.len());
        for item in tuple.iter() {
            items.push(to_object(&item, depth + 1)?);
        }
        return Ok(BaseObject::list(items));
    }
    if let Ok(list) = obj.cast::<PyList>() {
        let mut items = Vec::with_capacity(list.len());
        for item in list.iter() {
            items.push(to_object(&item, depth + 1)?);
        }
        return Ok(BaseObject::list(items));
    }
    if let Ok(dict) = obj.cast::<PyDict>() {
        let mut entries = Vec::with_capacity(dict.len());
        for (k, v) in dict.iter() {
            entries.push((to_object(&k, depth + 1)?, to_object(&v, depth + 1)?));
        }
        return Ok(BaseObject::dict(entries));
    }
    if obj.is_callable() {
        return Ok(BaseObject::new(Value::Func));
    }
    Ok(BaseObject::new(Value::Object))
}

pub(crate) fn representation_to_python<'py>(
    py: Python<'py>,
    representation: &Representation,
) -> PyResult<Bound<'py, PyAny>> {
    match representation {
        Representation::Bool(view) => view.value().into_bound_py_any(py),
        Representation::Int(view) => view.value().into_bound_py_any(py),
        Representation::Float(view) => view.value().into_bound_py_any(py),
        Representation::String(view) | Representation::Placeholder(view) => {
            view.value().into_bound_py_any(py)
        }
    }
}

/// Kinds without a typed view never look at `value`, so any Python object
/// resolves to its placeholder.
pub(crate) fn resolve_python<'py>(
    value: &Bound<'py, PyAny>,
    tag: CoreType,
) -> PyResult<Bound<'py, PyAny>> {
    let representation = if tag.has_typed_view() {
        let object = python_to_object(value)?;
        resolve(&object, tag).map_err(|err| CastError::new_err(err.to_string()))?
    } else {
        placeholder(tag)
    };

    representation_to_python(value.py(), &representation)
}

#[cfg(test)]
mod tests {
    use pyo3::exceptions::PyOverflowError;

    use super::*;

    fn with_python(f: impl for<'py> FnOnce(Python<'py>)) {
        Python::initialize();
        Python::attach(f);
    }

    fn convert(obj: &Bound<'_, PyAny>) -> BaseObject {
        python_to_object(obj).unwrap()
    }

    #[test]
    fn scalars_map_to_their_kinds() {
        with_python(|py| {
            let bool = convert(&true.into_bound_py_any(py).unwrap());
            assert_eq!(bool.value(), &Value::Bool(true));

            let int = convert(&7_i64.into_bound_py_any(py).unwrap());
            assert_eq!(int.value(), &Value::Int(7));

            let float = convert(&1.5_f64.into_bound_py_any(py).unwrap());
            assert_eq!(float.value(), &Value::Float(1.5));

            let str = convert(&"hello".into_bound_py_any(py).unwrap());
            assert_eq!(str.value(), &Value::String("hello".to_owned()));

            let none = convert(&py.None().into_bound(py));
            assert_eq!(none.core_type(), CoreType::Undefined);
        });
    }

    #[test]
    fn bool_is_not_treated_as_int() {
        with_python(|py| {
            let value = false.into_bound_py_any(py).unwrap();
            assert_eq!(convert(&value).core_type(), CoreType::Bool);
        });
    }

    #[test]
    fn bytes_and_complex_keep_their_payload() {
        with_python(|py| {
            let bytes = PyBytes::new(py, b"\x01\x02").into_any();
            assert_eq!(convert(&bytes).value(), &Value::BinaryData(vec![1, 2]));

            let complex = PyComplex::from_doubles(py, 1.0, -2.0).into_any();
            assert_eq!(
                convert(&complex).value(),
                &Value::ComplexNumber {
                    real: 1.0,
                    imaginary: -2.0
                }
            );
        });
    }

    #[test]
    fn containers_convert_recursively() {
        with_python(|py| {
            let tuple = PyTuple::new(py, [1_i64, 2]).unwrap().into_any();
            assert_eq!(
                convert(&tuple).value(),
                &Value::List(vec![BaseObject::from(1_i64), BaseObject::from(2_i64)])
            );

            let dict = PyDict::new(py);
            dict.set_item("k", PyList::new(py, [true]).unwrap()).unwrap();
            assert_eq!(
                convert(dict.as_any()).value(),
                &Value::Dict(vec![(
                    BaseObject::from("k"),
                    BaseObject::list(vec![BaseObject::from(true)])
                )])
            );
        });
    }

    #[test]
    fn callables_and_other_objects() {
        with_python(|py| {
            let func = py.eval(c"len", None, None).unwrap();
            assert_eq!(convert(&func).core_type(), CoreType::Func);

            let object = py.eval(c"object()", None, None).unwrap();
            assert_eq!(convert(&object).core_type(), CoreType::Object);
        });
    }

    #[test]
    fn self_referencing_list_is_a_recursion_error() {
        with_python(|py| {
            let list = PyList::empty(py);
            list.append(&list).unwrap();

            let err = python_to_object(list.as_any()).unwrap_err();
            assert!(err.is_instance_of::<PyRecursionError>(py));
        });
    }

    #[test]
    fn untyped_tags_ignore_the_value() {
        with_python(|py| {
            let list = PyList::empty(py);
            list.append(&list).unwrap();
            let resolved = resolve_python(list.as_any(), CoreType::List).unwrap();
            assert_eq!(resolved.extract::<String>().unwrap(), "<ctList>");

            let huge = py.eval(c"2**70", None, None).unwrap();
            let resolved = resolve_python(&huge, CoreType::List).unwrap();
            assert_eq!(resolved.extract::<String>().unwrap(), "<ctList>");

            let err = resolve_python(&huge, CoreType::Int).unwrap_err();
            assert!(err.is_instance_of::<PyOverflowError>(py));
        });
    }

    #[test]
    fn typed_tags_return_python_values_or_cast_error() {
        with_python(|py| {
            let hello = "hello".into_bound_py_any(py).unwrap();
            let resolved = resolve_python(&hello, CoreType::String).unwrap();
            assert_eq!(resolved.extract::<String>().unwrap(), "hello");

            let err = resolve_python(&hello, CoreType::Int).unwrap_err();
            assert!(err.is_instance_of::<CastError>(py));

            let flag = true.into_bound_py_any(py).unwrap();
            let resolved = resolve_python(&flag, CoreType::Bool).unwrap();
            assert!(resolved.cast::<PyBool>().unwrap().is_true());

            let number = 2.25_f64.into_bound_py_any(py).unwrap();
            let resolved = resolve_python(&number, CoreType::Float).unwrap();
            assert!((resolved.extract::<f64>().unwrap() - 2.25).abs() < f64::EPSILON);
        });
    }
}
