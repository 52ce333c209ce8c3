use std::fmt;

use crate::error::UnknownCoreType;

macro_rules! core_types {
    ($($variant:ident = $raw:literal => $name:literal,)*) => {
        /// Kind discriminator of a core value.
        ///
        /// Discriminants are the raw values the native library uses, so a tag
        /// read across the native boundary converts with [`CoreType::try_from`].
        #[repr(u32)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum CoreType {
            $($variant = $raw,)*
        }

        impl CoreType {
            pub const ALL: [CoreType; <[&str]>::len(&[$($name),*])] = [$(CoreType::$variant),*];

            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(CoreType::$variant => $name,)*
                }
            }
        }

        impl TryFrom<u32> for CoreType {
            type Error = UnknownCoreType;

            fn try_from(raw: u32) -> Result<Self, Self::Error> {
                match raw {
                    $($raw => Ok(CoreType::$variant),)*
                    other => Err(UnknownCoreType(other)),
                }
            }
        }
    };
}

// Every kind is listed exactly once; `ALL`, `name` and `try_from` follow.
core_types! {
    Bool = 0 => "ctBool",
    Int = 1 => "ctInt",
    Float = 2 => "ctFloat",
    String = 3 => "ctString",
    List = 4 => "ctList",
    Dict = 5 => "ctDict",
    Ratio = 6 => "ctRatio",
    Proc = 7 => "ctProc",
    Object = 8 => "ctObject",
    BinaryData = 9 => "ctBinaryData",
    Func = 10 => "ctFunc",
    ComplexNumber = 11 => "ctComplexNumber",
    Struct = 12 => "ctStruct",
    Undefined = 0xFFFF => "ctUndefined",
}

impl CoreType {
    /// Whether the binding exposes a typed view for this kind.
    #[must_use]
    pub const fn has_typed_view(self) -> bool {
        match self {
            CoreType::Bool | CoreType::Int | CoreType::Float | CoreType::String => true,
            CoreType::List
            | CoreType::Dict
            | CoreType::Ratio
            | CoreType::Proc
            | CoreType::Object
            | CoreType::BinaryData
            | CoreType::Func
            | CoreType::ComplexNumber
            | CoreType::Struct
            | CoreType::Undefined => false,
        }
    }
}

impl fmt::Display for CoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<CoreType> for u32 {
    fn from(core_type: CoreType) -> Self {
        core_type as u32
    }
}
