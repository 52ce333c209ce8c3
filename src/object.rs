use std::{fmt, sync::Arc};

use crate::{core_type::CoreType, error::CastError};

/// Concrete representation owned by a [`BaseObject`].
#[derive(Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<BaseObject>),
    Dict(Vec<(BaseObject, BaseObject)>),
    Ratio { numerator: i64, denominator: i64 },
    Proc,
    Object,
    BinaryData(Vec<u8>),
    Func,
    ComplexNumber { real: f64, imaginary: f64 },
    Struct {
        name: String,
        fields: Vec<(String, BaseObject)>,
    },
    Undefined,
}

impl Value {
    #[must_use]
    pub const fn core_type(&self) -> CoreType {
        match self {
            Value::Bool(_) => CoreType::Bool,
            Value::Int(_) => CoreType::Int,
            Value::Float(_) => CoreType::Float,
            Value::String(_) => CoreType::String,
            Value::List(_) => CoreType::List,
            Value::Dict(_) => CoreType::Dict,
            Value::Ratio { .. } => CoreType::Ratio,
            Value::Proc => CoreType::Proc,
            Value::Object => CoreType::Object,
            Value::BinaryData(_) => CoreType::BinaryData,
            Value::Func => CoreType::Func,
            Value::ComplexNumber { .. } => CoreType::ComplexNumber,
            Value::Struct { .. } => CoreType::Struct,
            Value::Undefined => CoreType::Undefined,
        }
    }
}

/// Shared, type-erased handle to a core value.
///
/// Cloning adds a holder; the value is dropped with the last one. The kind is
/// fixed at construction, so [`BaseObject::core_type`] never changes.
#[derive(Clone, PartialEq)]
pub struct BaseObject(Arc<Value>);

impl BaseObject {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(Arc::new(value))
    }

    #[must_use]
    pub fn list(items: Vec<BaseObject>) -> Self {
        Self::new(Value::List(items))
    }

    #[must_use]
    pub fn dict(entries: Vec<(BaseObject, BaseObject)>) -> Self {
        Self::new(Value::Dict(entries))
    }

    #[must_use]
    pub fn ratio(numerator: i64, denominator: i64) -> Self {
        Self::new(Value::Ratio {
            numerator,
            denominator,
        })
    }

    #[must_use]
    pub fn complex(real: f64, imaginary: f64) -> Self {
        Self::new(Value::ComplexNumber { real, imaginary })
    }

    #[must_use]
    pub fn binary(data: Vec<u8>) -> Self {
        Self::new(Value::BinaryData(data))
    }

    #[must_use]
    pub fn structure(name: impl Into<String>, fields: Vec<(String, BaseObject)>) -> Self {
        Self::new(Value::Struct {
            name: name.into(),
            fields,
        })
    }

    #[must_use]
    pub fn undefined() -> Self {
        Self::new(Value::Undefined)
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn core_type(&self) -> CoreType {
        self.0.core_type()
    }

    /// Number of handles and views currently sharing this value.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &BaseObject) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Checked cast to a typed view over the same value.
    ///
    /// # Errors
    ///
    /// Returns [`CastError`] when the handle holds a kind other than `T`'s.
    pub fn cast<T: TypedView>(&self) -> Result<T, CastError> {
        T::try_from_base(self.clone())
    }
}

impl fmt::Debug for BaseObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.value(), f)
    }
}

impl From<Value> for BaseObject {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl From<bool> for BaseObject {
    fn from(value: bool) -> Self {
        Self::new(Value::Bool(value))
    }
}

impl From<i64> for BaseObject {
    fn from(value: i64) -> Self {
        Self::new(Value::Int(value))
    }
}

impl From<f64> for BaseObject {
    fn from(value: f64) -> Self {
        Self::new(Value::Float(value))
    }
}

impl From<&str> for BaseObject {
    fn from(value: &str) -> Self {
        Self::new(Value::String(value.to_owned()))
    }
}

impl From<String> for BaseObject {
    fn from(value: String) -> Self {
        Self::new(Value::String(value))
    }
}

/// Kind-specific view sharing ownership of a [`BaseObject`]'s value.
pub trait TypedView: Sized {
    const CORE_TYPE: CoreType;

    /// Takes over `handle` if it holds [`Self::CORE_TYPE`].
    ///
    /// # Errors
    ///
    /// Returns [`CastError`] on a kind mismatch; `handle` is released.
    fn try_from_base(handle: BaseObject) -> Result<Self, CastError>;

    fn as_base(&self) -> &BaseObject;

    #[must_use]
    fn into_base(self) -> BaseObject;
}

macro_rules! typed_view {
    ($(#[$meta:meta])* $name:ident, $core_type:ident, $value:ty, |$v:ident| $get:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name(BaseObject);

        impl $name {
            #[inline]
            #[must_use]
            pub fn value(&self) -> $value {
                match self.0.value() {
                    Value::$core_type($v) => $get,
                    // Only `try_from_base` builds a view, after checking the
                    // kind, and the wrapped handle is private and immutable.
                    other => unreachable!(
                        "{} view over {} value",
                        stringify!($name),
                        other.core_type()
                    ),
                }
            }
        }

        impl TypedView for $name {
            const CORE_TYPE: CoreType = CoreType::$core_type;

            fn try_from_base(handle: BaseObject) -> Result<Self, CastError> {
                match handle.core_type() {
                    CoreType::$core_type => Ok(Self(handle)),
                    actual => Err(CastError {
                        expected: CoreType::$core_type,
                        actual,
                    }),
                }
            }

            fn as_base(&self) -> &BaseObject {
                &self.0
            }

            fn into_base(self) -> BaseObject {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.value(), f)
            }
        }
    };
}

typed_view!(
    /// Boolean view.
    BoolObject, Bool, bool, |v| *v
);
typed_view!(
    /// 64-bit signed integer view.
    IntegerObject, Int, i64, |v| *v
);
typed_view!(
    /// Double-precision floating-point view.
    FloatObject, Float, f64, |v| *v
);
typed_view!(
    /// String view; [`StringObject::value`] borrows from the shared value.
    StringObject, String, &str, |v| v.as_str()
);

impl StringObject {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(BaseObject::from(text.into()))
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn handle_reports_kind_of_its_value() {
        assert_eq!(BaseObject::from(true).core_type(), CoreType::Bool);
        assert_eq!(BaseObject::from(7_i64).core_type(), CoreType::Int);
        assert_eq!(BaseObject::from(0.5).core_type(), CoreType::Float);
        assert_eq!(BaseObject::from("x").core_type(), CoreType::String);
        assert_eq!(BaseObject::list(Vec::new()).core_type(), CoreType::List);
        assert_eq!(BaseObject::dict(Vec::new()).core_type(), CoreType::Dict);
        assert_eq!(BaseObject::ratio(1, 3).core_type(), CoreType::Ratio);
        assert_eq!(BaseObject::new(Value::Proc).core_type(), CoreType::Proc);
        assert_eq!(BaseObject::new(Value::Object).core_type(), CoreType::Object);
        assert_eq!(BaseObject::binary(vec![1, 2]).core_type(), CoreType::BinaryData);
        assert_eq!(BaseObject::new(Value::Func).core_type(), CoreType::Func);
        assert_eq!(BaseObject::complex(1.0, -1.0).core_type(), CoreType::ComplexNumber);
        assert_eq!(BaseObject::structure("S", Vec::new()).core_type(), CoreType::Struct);
        assert_eq!(BaseObject::undefined().core_type(), CoreType::Undefined);
    }

    #[test]
    fn cast_shares_the_value() {
        let handle = BaseObject::from("hello");
        assert_eq!(handle.ref_count(), 1);

        let view: StringObject = handle.cast().unwrap();
        assert_eq!(view.value(), "hello");
        assert_eq!(handle.ref_count(), 2);
        assert!(view.as_base().ptr_eq(&handle));

        drop(handle);
        assert_eq!(view.as_base().ref_count(), 1);
        assert_eq!(view.value(), "hello");
    }

    #[test]
    fn cast_to_wrong_view_fails() {
        let handle = BaseObject::from(3.25);
        let err = handle.cast::<IntegerObject>().unwrap_err();
        assert_eq!(
            err,
            CastError {
                expected: CoreType::Int,
                actual: CoreType::Float
            }
        );
        assert_eq!(err.to_string(), "cannot cast ctFloat value to ctInt");
        assert_eq!(handle.ref_count(), 1);
    }

    #[test]
    fn views_can_be_taken_from_many_threads() {
        let handle = BaseObject::from(42_i64);
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let handle = handle.clone();
                thread::spawn(move || handle.cast::<IntegerObject>().map(|view| view.value()))
            })
            .collect();

        for worker in workers {
            assert_eq!(worker.join().unwrap(), Ok(42));
        }
        assert_eq!(handle.ref_count(), 1);
    }
}
