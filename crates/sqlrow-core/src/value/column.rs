use crate::{
    object::ObjectRef,
    types::{Binary, DateTime, Decimal},
    value::{Literal, NULL_LABEL},
};
use sqlrow_primitives::TypeCode;

///
/// ColumnValue
///
/// Name-resolved property value tagged by its declared type code.
/// Returned by `Row::get_value` for consumers that bind columns late.
///

#[derive(Clone, Debug, PartialEq)]
pub enum ColumnValue {
    Binary(Option<Binary>),
    Boolean(Option<bool>),
    Byte(Option<u8>),
    DateTime(Option<DateTime>),
    Decimal(Option<Decimal>),
    Double(Option<f64>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Object(Option<ObjectRefEq>),
    SByte(Option<i8>),
    Single(Option<f32>),
    String(Option<String>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
}

impl ColumnValue {
    #[must_use]
    pub const fn type_code(&self) -> TypeCode {
        match self {
            Self::Binary(_) => TypeCode::Binary,
            Self::Boolean(_) => TypeCode::Boolean,
            Self::Byte(_) => TypeCode::Byte,
            Self::DateTime(_) => TypeCode::DateTime,
            Self::Decimal(_) => TypeCode::Decimal,
            Self::Double(_) => TypeCode::Double,
            Self::Int16(_) => TypeCode::Int16,
            Self::Int32(_) => TypeCode::Int32,
            Self::Int64(_) => TypeCode::Int64,
            Self::Object(_) => TypeCode::Object,
            Self::SByte(_) => TypeCode::SByte,
            Self::Single(_) => TypeCode::Single,
            Self::String(_) => TypeCode::String,
            Self::UInt16(_) => TypeCode::UInt16,
            Self::UInt32(_) => TypeCode::UInt32,
            Self::UInt64(_) => TypeCode::UInt64,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        match self {
            Self::Binary(v) => v.is_none(),
            Self::Boolean(v) => v.is_none(),
            Self::Byte(v) => v.is_none(),
            Self::DateTime(v) => v.is_none(),
            Self::Decimal(v) => v.is_none(),
            Self::Double(v) => v.is_none(),
            Self::Int16(v) => v.is_none(),
            Self::Int32(v) => v.is_none(),
            Self::Int64(v) => v.is_none(),
            Self::Object(v) => v.is_none(),
            Self::SByte(v) => v.is_none(),
            Self::Single(v) => v.is_none(),
            Self::String(v) => v.is_none(),
            Self::UInt16(v) => v.is_none(),
            Self::UInt32(v) => v.is_none(),
            Self::UInt64(v) => v.is_none(),
        }
    }

    /// Widen back into the evaluation family literal.
    #[must_use]
    pub fn to_literal(&self) -> Literal {
        match self {
            Self::Binary(v) => Literal::binary(v.clone()),
            Self::Boolean(v) => Literal::boolean(*v),
            Self::Byte(v) => Literal::uinteger(v.map(u64::from)),
            Self::DateTime(v) => Literal::date_time(*v),
            Self::Decimal(v) => Literal::decimal(*v),
            Self::Double(v) => Literal::double(*v),
            Self::Int16(v) => Literal::integer(v.map(i64::from)),
            Self::Int32(v) => Literal::integer(v.map(i64::from)),
            Self::Int64(v) => Literal::integer(*v),
            Self::Object(v) => Literal::object(v.as_ref().map(|o| o.0.clone())),
            Self::SByte(v) => Literal::integer(v.map(i64::from)),
            Self::Single(v) => Literal::double(v.map(f64::from)),
            Self::String(v) => Literal::string(v.clone()),
            Self::UInt16(v) => Literal::uinteger(v.map(u64::from)),
            Self::UInt32(v) => Literal::uinteger(v.map(u64::from)),
            Self::UInt64(v) => Literal::uinteger(*v),
        }
    }

    /// Render as text; `None` for NULL.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Single(v) => v.map(|v| v.to_string()),
            _ => self.to_literal().render(),
        }
    }

    /// Render as text, using `null_label` for NULL.
    #[must_use]
    pub fn render_with_null(&self, null_label: &str) -> String {
        self.to_text().unwrap_or_else(|| null_label.to_string())
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.render_with_null(NULL_LABEL)
    }
}

///
/// ObjectRefEq
///
/// Object handle compared by identity so column values stay `PartialEq`.
///

#[derive(Clone, Debug)]
pub struct ObjectRefEq(pub ObjectRef);

impl ObjectRefEq {
    #[must_use]
    pub fn object(&self) -> &ObjectRef {
        &self.0
    }
}

impl PartialEq for ObjectRefEq {
    fn eq(&self, other: &Self) -> bool {
        self.0.object_id() == other.0.object_id()
    }
}

impl From<ObjectRef> for ObjectRefEq {
    fn from(object: ObjectRef) -> Self {
        Self(object)
    }
}
