mod collation;
mod column;
mod compare;

#[cfg(test)]
mod tests;

use crate::{
    error::{ErrorDetail, ErrorOrigin, InternalError},
    object::ObjectRef,
    types::{Binary, DateTime, Decimal},
};
use sqlrow_primitives::ValueFamily;
use std::sync::Arc;

// re-exports
pub use collation::{
    CaseInsensitiveCollation, Collation, CollationRef, OrdinalCollation, default_collation,
};
pub use column::{ColumnValue, ObjectRefEq};
pub use compare::{cmp_f64, natural_cmp};

/// Text rendered for SQL NULL when no other label is configured.
pub const NULL_LABEL: &str = "<NULL>";

///
/// ScalarValue
///
/// One present (non-null) value, tagged by evaluation family.
///

#[derive(Clone, Debug)]
pub enum ScalarValue {
    Binary(Binary),
    Boolean(bool),
    DateTime(DateTime),
    Decimal(Decimal),
    Double(f64),
    Integer(i64),
    UInteger(u64),
    String(String),
    Object(ObjectRef),
}

impl ScalarValue {
    #[must_use]
    pub const fn family(&self) -> ValueFamily {
        match self {
            Self::Binary(_) => ValueFamily::Binary,
            Self::Boolean(_) => ValueFamily::Boolean,
            Self::DateTime(_) => ValueFamily::DateTime,
            Self::Decimal(_) => ValueFamily::Decimal,
            Self::Double(_) => ValueFamily::Double,
            Self::Integer(_) => ValueFamily::Integer,
            Self::UInteger(_) => ValueFamily::UInteger,
            Self::String(_) => ValueFamily::String,
            Self::Object(_) => ValueFamily::Object,
        }
    }

    /// Render as text for diagnostics and the string accessor.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Binary(v) => v.to_hex(),
            Self::Boolean(v) => v.to_string(),
            Self::DateTime(v) => v.to_string(),
            Self::Decimal(v) => v.to_string(),
            Self::Double(v) => v.to_string(),
            Self::Integer(v) => v.to_string(),
            Self::UInteger(v) => v.to_string(),
            Self::String(v) => v.clone(),
            Self::Object(v) => v.render(),
        }
    }
}

// Objects are equal when they share identity; everything else by value.
impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Binary(a), Self::Binary(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => cmp_f64(*a, *b).is_eq(),
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::UInteger(a), Self::UInteger(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => {
                Arc::ptr_eq(a, b) || a.object_id() == b.object_id()
            }
            _ => false,
        }
    }
}

///
/// Literal
///
/// Already-evaluated nullable value of a known family. Expressions return
/// literals; comparers accept them as the left operand of a key comparison.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    family: ValueFamily,
    value: Option<ScalarValue>,
}

impl Literal {
    #[must_use]
    pub const fn null(family: ValueFamily) -> Self {
        Self {
            family,
            value: None,
        }
    }

    #[must_use]
    pub fn present(value: ScalarValue) -> Self {
        Self {
            family: value.family(),
            value: Some(value),
        }
    }

    /// Build a literal and verify the payload matches the declared family.
    pub fn new(family: ValueFamily, value: Option<ScalarValue>) -> Result<Self, InternalError> {
        if let Some(value) = &value
            && value.family() != family
        {
            return Err(InternalError::type_mismatch(
                ErrorOrigin::Expression,
                format!(
                    "literal declared as {family} carries a {} value",
                    value.family()
                ),
            ));
        }

        Ok(Self { family, value })
    }

    #[must_use]
    pub fn binary(value: Option<Binary>) -> Self {
        Self::from_parts(ValueFamily::Binary, value.map(ScalarValue::Binary))
    }

    #[must_use]
    pub fn boolean(value: Option<bool>) -> Self {
        Self::from_parts(ValueFamily::Boolean, value.map(ScalarValue::Boolean))
    }

    #[must_use]
    pub fn date_time(value: Option<DateTime>) -> Self {
        Self::from_parts(ValueFamily::DateTime, value.map(ScalarValue::DateTime))
    }

    #[must_use]
    pub fn decimal(value: Option<Decimal>) -> Self {
        Self::from_parts(ValueFamily::Decimal, value.map(ScalarValue::Decimal))
    }

    #[must_use]
    pub fn double(value: Option<f64>) -> Self {
        Self::from_parts(ValueFamily::Double, value.map(ScalarValue::Double))
    }

    #[must_use]
    pub fn integer(value: Option<i64>) -> Self {
        Self::from_parts(ValueFamily::Integer, value.map(ScalarValue::Integer))
    }

    #[must_use]
    pub fn uinteger(value: Option<u64>) -> Self {
        Self::from_parts(ValueFamily::UInteger, value.map(ScalarValue::UInteger))
    }

    #[must_use]
    pub fn string(value: Option<String>) -> Self {
        Self::from_parts(ValueFamily::String, value.map(ScalarValue::String))
    }

    /// Present string literal.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::present(ScalarValue::String(value.into()))
    }

    #[must_use]
    pub fn object(value: Option<ObjectRef>) -> Self {
        Self::from_parts(ValueFamily::Object, value.map(ScalarValue::Object))
    }

    fn from_parts(family: ValueFamily, value: Option<ScalarValue>) -> Self {
        Self { family, value }
    }

    #[must_use]
    pub const fn family(&self) -> ValueFamily {
        self.family
    }

    #[must_use]
    pub const fn value(&self) -> Option<&ScalarValue> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn into_value(self) -> Option<ScalarValue> {
        self.value
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Fail unless this literal belongs to `family`.
    pub fn expect_family(&self, family: ValueFamily) -> Result<(), InternalError> {
        if self.family == family {
            Ok(())
        } else {
            Err(self.family_mismatch(family.label()))
        }
    }

    ///
    /// TYPED READS
    ///

    pub fn to_binary(&self) -> Result<Option<Binary>, InternalError> {
        match &self.value {
            None if self.family == ValueFamily::Binary => Ok(None),
            Some(ScalarValue::Binary(v)) => Ok(Some(v.clone())),
            _ => Err(self.family_mismatch("Binary")),
        }
    }

    pub fn to_boolean(&self) -> Result<Option<bool>, InternalError> {
        match &self.value {
            None if self.family == ValueFamily::Boolean => Ok(None),
            Some(ScalarValue::Boolean(v)) => Ok(Some(*v)),
            _ => Err(self.family_mismatch("Boolean")),
        }
    }

    pub fn to_date_time(&self) -> Result<Option<DateTime>, InternalError> {
        match &self.value {
            None if self.family == ValueFamily::DateTime => Ok(None),
            Some(ScalarValue::DateTime(v)) => Ok(Some(*v)),
            _ => Err(self.family_mismatch("DateTime")),
        }
    }

    /// Read as decimal, widening from either integer family.
    pub fn to_decimal(&self) -> Result<Option<Decimal>, InternalError> {
        match &self.value {
            None if matches!(
                self.family,
                ValueFamily::Decimal | ValueFamily::Integer | ValueFamily::UInteger
            ) =>
            {
                Ok(None)
            }
            Some(ScalarValue::Decimal(v)) => Ok(Some(*v)),
            Some(ScalarValue::Integer(v)) => Ok(Some(Decimal::from_i64(*v))),
            Some(ScalarValue::UInteger(v)) => Ok(Some(Decimal::from_u64(*v))),
            _ => Err(self.family_mismatch("Decimal")),
        }
    }

    pub fn to_double(&self) -> Result<Option<f64>, InternalError> {
        match &self.value {
            None if self.family == ValueFamily::Double => Ok(None),
            Some(ScalarValue::Double(v)) => Ok(Some(*v)),
            _ => Err(self.family_mismatch("Double")),
        }
    }

    /// Read as signed integer, widening from unsigned when it fits.
    pub fn to_integer(&self) -> Result<Option<i64>, InternalError> {
        match &self.value {
            None if matches!(self.family, ValueFamily::Integer | ValueFamily::UInteger) => Ok(None),
            Some(ScalarValue::Integer(v)) => Ok(Some(*v)),
            Some(ScalarValue::UInteger(v)) => i64::try_from(*v)
                .map(Some)
                .map_err(|_| self.range_mismatch("Integer")),
            _ => Err(self.family_mismatch("Integer")),
        }
    }

    /// Read as unsigned integer, accepting non-negative signed values.
    pub fn to_uinteger(&self) -> Result<Option<u64>, InternalError> {
        match &self.value {
            None if matches!(self.family, ValueFamily::Integer | ValueFamily::UInteger) => Ok(None),
            Some(ScalarValue::UInteger(v)) => Ok(Some(*v)),
            Some(ScalarValue::Integer(v)) => u64::try_from(*v)
                .map(Some)
                .map_err(|_| self.range_mismatch("UInteger")),
            _ => Err(self.family_mismatch("UInteger")),
        }
    }

    pub fn to_string_value(&self) -> Result<Option<String>, InternalError> {
        match &self.value {
            None if self.family == ValueFamily::String => Ok(None),
            Some(ScalarValue::String(v)) => Ok(Some(v.clone())),
            _ => Err(self.family_mismatch("String")),
        }
    }

    pub fn to_object(&self) -> Result<Option<ObjectRef>, InternalError> {
        match &self.value {
            None if self.family == ValueFamily::Object => Ok(None),
            Some(ScalarValue::Object(v)) => Ok(Some(Arc::clone(v))),
            _ => Err(self.family_mismatch("Object")),
        }
    }

    /// Render any literal as text; `None` for NULL.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.value.as_ref().map(ScalarValue::render)
    }

    fn family_mismatch(&self, requested: &str) -> InternalError {
        InternalError::type_mismatch(
            ErrorOrigin::Expression,
            format!("cannot read {} literal as {requested}", self.family),
        )
        .with_detail(ErrorDetail::TypeMismatch {
            expected: requested.to_string(),
            actual: self.family.canonical_type_code(),
            index: None,
        })
    }

    fn range_mismatch(&self, requested: &str) -> InternalError {
        InternalError::type_mismatch(
            ErrorOrigin::Expression,
            format!(
                "{} literal value {} does not fit {requested}",
                self.family,
                self.render().unwrap_or_default()
            ),
        )
    }
}

impl From<ScalarValue> for Literal {
    fn from(value: ScalarValue) -> Self {
        Self::present(value)
    }
}

