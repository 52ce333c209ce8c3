use std::fmt;

use crate::{
    core_type::CoreType,
    error::CastError,
    object::{BaseObject, BoolObject, FloatObject, IntegerObject, StringObject, TypedView},
};

/// Most specific form of a value the binding can hand out for a tag.
#[derive(Clone, Debug, PartialEq)]
pub enum Representation {
    Bool(BoolObject),
    Int(IntegerObject),
    Float(FloatObject),
    String(StringObject),
    /// `<ctName>` text for kinds without a typed view.
    Placeholder(StringObject),
}

impl Representation {
    #[must_use]
    pub fn core_type(&self) -> CoreType {
        match self {
            Representation::Bool(_) => CoreType::Bool,
            Representation::Int(_) => CoreType::Int,
            Representation::Float(_) => CoreType::Float,
            Representation::String(_) | Representation::Placeholder(_) => CoreType::String,
        }
    }

    #[must_use]
    pub fn as_placeholder(&self) -> Option<&str> {
        match self {
            Representation::Placeholder(text) => Some(text.value()),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_base(self) -> BaseObject {
        match self {
            Representation::Bool(view) => view.into_base(),
            Representation::Int(view) => view.into_base(),
            Representation::Float(view) => view.into_base(),
            Representation::String(view) | Representation::Placeholder(view) => view.into_base(),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Bool(view) => fmt::Display::fmt(view, f),
            Representation::Int(view) => fmt::Display::fmt(view, f),
            Representation::Float(view) => fmt::Display::fmt(view, f),
            Representation::String(view) | Representation::Placeholder(view) => {
                fmt::Display::fmt(view, f)
            }
        }
    }
}

/// `<ctName>` text standing in for a kind without a typed view.
#[must_use]
pub fn placeholder(tag: CoreType) -> Representation {
    log::trace!("no typed view for {tag}, using placeholder");

    let name = tag.name();
    let mut text = String::with_capacity(name.len() + 2);
    text.push('<');
    text.push_str(name);
    text.push('>');
    Representation::Placeholder(StringObject::new(text))
}

/// Views `value` as the kind named by `tag`.
///
/// Tags with a typed view are checked against the handle's actual kind.
/// Every other tag yields a [`Representation::Placeholder`] and never fails.
///
/// # Errors
///
/// Returns [`CastError`] when `tag` has a typed view and `value` holds a
/// different kind.
pub fn resolve(value: &BaseObject, tag: CoreType) -> Result<Representation, CastError> {
    Ok(match tag {
        CoreType::Bool => Representation::Bool(value.cast()?),
        CoreType::Int => Representation::Int(value.cast()?),
        CoreType::Float => Representation::Float(value.cast()?),
        CoreType::String => Representation::String(value.cast()?),
        CoreType::List
        | CoreType::Dict
        | CoreType::Ratio
        | CoreType::Proc
        | CoreType::Object
        | CoreType::BinaryData
        | CoreType::Func
        | CoreType::ComplexNumber
        | CoreType::Struct
        | CoreType::Undefined => placeholder(tag),
    })
}
