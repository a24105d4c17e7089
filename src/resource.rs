//! Class identity for serializable resources.
//!
//! Rust has no runtime class objects, so a resource names itself through
//! [`ClassRef`]: the fully qualified type name plus the source file that declares
//! it. The [`resource!`](crate::resource!) macro implements both traits for any
//! `serde::Serialize` type.

use serde_json::Value;
use std::path::{Path, PathBuf};

/// Identity of a described class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassRef {
    name: String,
    file: PathBuf,
}

impl ClassRef {
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }

    /// Fully qualified class name (e.g. `app::model::Article`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source file declaring the class.
    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Static class identity, available without an instance.
pub trait Class {
    fn class() -> ClassRef;
}

/// An object that can pass through the serializer.
pub trait Resource {
    /// Runtime class of this object.
    fn class_ref(&self) -> ClassRef;

    /// Convert the object to its JSON representation.
    fn to_value(&self) -> serde_json::Result<Value>;
}

/// Implement [`Class`] and [`Resource`] for one or more `Serialize` types.
///
/// The class name is `std::any::type_name` of the type and the source file is the
/// file the macro is invoked from.
///
/// ```ignore
/// #[derive(Serialize)]
/// struct Article { id: u32, title: String }
///
/// serializer_translation::resource!(Article);
/// ```
#[macro_export]
macro_rules! resource {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Class for $ty {
                fn class() -> $crate::ClassRef {
                    $crate::ClassRef::new(::std::any::type_name::<$ty>(), file!())
                }
            }

            impl $crate::Resource for $ty {
                fn class_ref(&self) -> $crate::ClassRef {
                    <$ty as $crate::Class>::class()
                }

                fn to_value(
                    &self,
                ) -> $crate::__private::serde_json::Result<$crate::__private::serde_json::Value> {
                    $crate::__private::serde_json::to_value(self)
                }
            }
        )+
    };
}
