#[macro_use]
mod macros;

use std::fmt;

///
/// TypeCode
///
/// Declared column type of one projected row property.
/// Several codes share one evaluation family (see [`ValueFamily`]).
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TypeCode {
    Binary,
    Boolean,
    Byte,
    DateTime,
    Decimal,
    Double,
    Int16,
    Int32,
    Int64,
    Object,
    SByte,
    Single,
    String,
    UInt16,
    UInt32,
    UInt64,
}

impl TypeCode {
    /// Return the full metadata descriptor for one type code.
    #[must_use]
    pub const fn metadata(self) -> TypeMetadata {
        type_code_registry!(metadata_from_registry, self)
    }

    /// Return the evaluation family expressions of this code produce.
    #[must_use]
    pub const fn family(self) -> ValueFamily {
        self.metadata().family
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        self.metadata().label
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.metadata().is_numeric
    }

    #[must_use]
    pub const fn is_integral(self) -> bool {
        self.metadata().is_integral
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        self.metadata().is_signed
    }

    /// Return whether a typed accessor for `self` may read a property
    /// declared as `source`.
    ///
    /// Accepted sources are the exact code plus every code that widens
    /// losslessly into it. The string accessor accepts everything.
    #[must_use]
    pub const fn accepts(self, source: Self) -> bool {
        match self {
            Self::String => true,
            Self::Decimal => matches!(source, Self::Decimal) || source.is_integral(),
            Self::Double => matches!(source, Self::Double | Self::Single),
            Self::Int16 => matches!(source, Self::Int16 | Self::SByte | Self::Byte),
            Self::Int32 => matches!(
                source,
                Self::Int32 | Self::Int16 | Self::SByte | Self::UInt16 | Self::Byte
            ),
            Self::Int64 => matches!(
                source,
                Self::Int64
                    | Self::Int32
                    | Self::Int16
                    | Self::SByte
                    | Self::UInt32
                    | Self::UInt16
                    | Self::Byte
            ),
            Self::UInt16 => matches!(source, Self::UInt16 | Self::Byte),
            Self::UInt32 => matches!(source, Self::UInt32 | Self::UInt16 | Self::Byte),
            Self::UInt64 => matches!(
                source,
                Self::UInt64 | Self::UInt32 | Self::UInt16 | Self::Byte
            ),
            Self::Binary
            | Self::Boolean
            | Self::Byte
            | Self::DateTime
            | Self::Object
            | Self::SByte
            | Self::Single => self as u8 == source as u8,
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// TypeMetadata
///
/// Capability metadata shared by binding, row, and comparer layers.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TypeMetadata {
    pub family: ValueFamily,
    pub label: &'static str,
    pub is_numeric: bool,
    pub is_integral: bool,
    pub is_signed: bool,
}

///
/// ValueFamily
///
/// Representation an expression evaluates to, independent of the declared
/// storage width. Comparers are keyed by family.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueFamily {
    Binary,
    Boolean,
    DateTime,
    Decimal,
    Double,
    Integer,
    UInteger,
    String,
    Object,
}

impl ValueFamily {
    /// Return the widest type code evaluating through this family.
    #[must_use]
    pub const fn canonical_type_code(self) -> TypeCode {
        match self {
            Self::Binary => TypeCode::Binary,
            Self::Boolean => TypeCode::Boolean,
            Self::DateTime => TypeCode::DateTime,
            Self::Decimal => TypeCode::Decimal,
            Self::Double => TypeCode::Double,
            Self::Integer => TypeCode::Int64,
            Self::UInteger => TypeCode::UInt64,
            Self::String => TypeCode::String,
            Self::Object => TypeCode::Object,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::Decimal => "Decimal",
            Self::Double => "Double",
            Self::Integer => "Integer",
            Self::UInteger => "UInteger",
            Self::String => "String",
            Self::Object => "Object",
        }
    }
}

impl fmt::Display for ValueFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered list of all type codes in registry order.
pub const ALL_TYPE_CODES: [TypeCode; 16] = type_code_registry!(all_codes_from_registry);

///
/// TESTS
///
