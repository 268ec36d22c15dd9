//! Declarative struct population
//!
//! `#[derive(Populate)]` describes every field with a [`FieldDescriptor`] and
//! generates [`Populate::populate_from`], which resolves each field's value
//! and hands it to the coercion for the field's [`TargetKind`]. The functions
//! in this module are the runtime half of that generated code.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::marker::PhantomData;

use chrono::TimeDelta;

use crate::duration::parse_duration;
use crate::error::{CoerceError, Error};
use crate::parse::{is_truthy, parse_float, split_list, split_map, DEFAULT_DELIMITER};
use crate::source::Source;

/// The coercion category a value is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    String,
    Signed { bits: u32 },
    Unsigned { bits: u32 },
    Float { bits: u32 },
    Bool,
    Duration,
    StringList,
    StringMap,
    /// The field names its own deserializer function.
    Custom,
    Unsupported,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Signed { bits } => write!(f, "{bits}-bit integer"),
            Self::Unsigned { bits } => write!(f, "{bits}-bit unsigned integer"),
            Self::Float { bits } => write!(f, "{bits}-bit float"),
            Self::Bool => f.write_str("boolean"),
            Self::Duration => f.write_str("duration"),
            Self::StringList => f.write_str("string list"),
            Self::StringMap => f.write_str("string map"),
            Self::Custom => f.write_str("custom"),
            Self::Unsupported => f.write_str("unsupported"),
        }
    }
}

/// Metadata for one populated field, generated by `#[derive(Populate)]`.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Field identifier as declared
    pub name: &'static str,
    /// Lookup key without prefix
    pub key: &'static str,
    /// Literal from `#[env(default = "...")]`
    pub default: Option<&'static str>,
    /// Declared type as written
    pub type_name: &'static str,
    #[doc(hidden)]
    pub resolve_kind: fn() -> TargetKind,
}

impl FieldDescriptor {
    /// The coercion the field's type is dispatched to.
    pub fn kind(&self) -> TargetKind {
        (self.resolve_kind)()
    }
}

/// Types a field may be populated into.
pub trait FieldValue: Sized {
    const KIND: TargetKind;

    fn coerce(raw: &str) -> Result<Self, CoerceError>;
}

/// A struct whose fields can be filled from a [`Source`].
///
/// Implemented by `#[derive(Populate)]`; see the crate docs for the
/// `#[env(...)]` attributes.
pub trait Populate {
    /// Descriptors of every visited field, in declaration order.
    const FIELDS: &'static [FieldDescriptor];

    /// Fill fields from `source`, looking each key up as `prefix + key`.
    ///
    /// Fields without a value keep their current value. The first coercion
    /// failure aborts; fields assigned before it stay assigned.
    fn populate_from<S: Source + ?Sized>(&mut self, source: &S, prefix: &str)
        -> Result<(), Error>;
}

/// Populate `target` from `source` with keys prefixed by `prefix`.
pub fn populate<T, S>(target: &mut T, source: &S, prefix: &str) -> Result<(), Error>
where
    T: Populate,
    S: Source + ?Sized,
{
    target.populate_from(source, prefix)
}

/// Resolve the working value for a field: the environment value, else the
/// literal default. `None` means the field is skipped.
#[doc(hidden)]
pub fn working_value<S: Source + ?Sized>(
    source: &S,
    prefix: &str,
    field: &FieldDescriptor,
) -> Option<String> {
    let mut value = source.resolve(&format!("{prefix}{}", field.key));
    if value.is_empty() {
        if let Some(default) = field.default {
            value = default.to_string();
        }
    }
    (!value.is_empty()).then_some(value)
}

/// Coerce `raw` into the field's type, tagging failures with the field.
#[doc(hidden)]
pub fn coerce_field<T: FieldValue>(field: &FieldDescriptor, raw: &str) -> Result<T, Error> {
    T::coerce(raw).map_err(|e| Error::field(field, e))
}

/// Picks a field's coercion from its concrete type.
///
/// Generated code calls the [`ViaFieldValue`] and [`ViaUnsupported`] methods
/// on `&Dispatch<T>`. Method resolution prefers the impl on `Dispatch<T>`,
/// which exists only for `T: FieldValue`, and otherwise autorefs to the
/// impl on `&Dispatch<T>` that reports the field as unsupported. Type
/// aliases resolve to their target before this choice is made.
#[doc(hidden)]
pub struct Dispatch<T>(PhantomData<T>);

impl<T> Dispatch<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Dispatch<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[doc(hidden)]
pub trait ViaFieldValue {
    type Target;

    fn field_kind(&self) -> TargetKind;

    fn coerce_value(&self, field: &FieldDescriptor, raw: &str) -> Result<Self::Target, Error>;
}

impl<T: FieldValue> ViaFieldValue for Dispatch<T> {
    type Target = T;

    fn field_kind(&self) -> TargetKind {
        T::KIND
    }

    fn coerce_value(&self, field: &FieldDescriptor, raw: &str) -> Result<T, Error> {
        coerce_field::<T>(field, raw)
    }
}

#[doc(hidden)]
pub trait ViaUnsupported {
    type Target;

    fn field_kind(&self) -> TargetKind {
        TargetKind::Unsupported
    }

    fn coerce_value(&self, field: &FieldDescriptor, _raw: &str) -> Result<Self::Target, Error> {
        Err(Error::unsupported(field))
    }
}

impl<T> ViaUnsupported for &Dispatch<T> {
    type Target = T;
}

impl FieldValue for String {
    const KIND: TargetKind = TargetKind::String;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_string())
    }
}

macro_rules! impl_field_value_int {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                const KIND: TargetKind = TargetKind::$variant { bits: <$ty>::BITS };

                fn coerce(raw: &str) -> Result<Self, CoerceError> {
                    raw.parse::<$ty>()
                        .map_err(|e| CoerceError::new(Self::KIND, raw, e))
                }
            }
        )*
    };
}

impl_field_value_int!(Signed: i8, i16, i32, i64, isize);
impl_field_value_int!(Unsigned: u8, u16, u32, u64, usize);

impl FieldValue for f32 {
    const KIND: TargetKind = TargetKind::Float { bits: 32 };

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        parse_float::<f32>(raw).map_err(|e| CoerceError::new(Self::KIND, raw, e))
    }
}

impl FieldValue for f64 {
    const KIND: TargetKind = TargetKind::Float { bits: 64 };

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        parse_float::<f64>(raw).map_err(|e| CoerceError::new(Self::KIND, raw, e))
    }
}

impl FieldValue for bool {
    const KIND: TargetKind = TargetKind::Bool;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(is_truthy(raw))
    }
}

impl FieldValue for TimeDelta {
    const KIND: TargetKind = TargetKind::Duration;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        parse_duration(raw).map_err(|e| CoerceError::new(Self::KIND, raw, e))
    }
}

impl FieldValue for std::time::Duration {
    const KIND: TargetKind = TargetKind::Duration;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        TimeDelta::coerce(raw)?
            .to_std()
            .map_err(|_| CoerceError::new(Self::KIND, raw, "negative duration"))
    }
}

impl FieldValue for Vec<String> {
    const KIND: TargetKind = TargetKind::StringList;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(split_list(raw, DEFAULT_DELIMITER))
    }
}

impl FieldValue for HashMap<String, String> {
    const KIND: TargetKind = TargetKind::StringMap;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(split_map(raw))
    }
}

impl FieldValue for BTreeMap<String, String> {
    const KIND: TargetKind = TargetKind::StringMap;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(split_map(raw))
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: TargetKind = T::KIND;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        T::coerce(raw).map(Some)
    }
}
