use crate::{
    db::{
        binding::PropertyMapping,
        row::{Row, RowError},
    },
    error::{ErrorOrigin, InternalError},
    object::ObjectRef,
    obs::sink::{MetricsEvent, record},
    types::{Binary, DateTime, Decimal},
    value::{ColumnValue, ObjectRefEq},
};
use sqlrow_primitives::TypeCode;
use std::fmt::Display;

///
/// TYPED ACCESSORS
///
/// Each accessor bounds-checks the index, then accepts the property's
/// declared type when it is the accessor's own type or widens losslessly
/// into it. Anything else is a type mismatch; values are never coerced.
///

impl Row {
    pub fn get_binary(&self, index: usize) -> Result<Option<Binary>, InternalError> {
        let property = self.checked_property(index, TypeCode::Binary)?;

        property.expression().evaluate_to_binary(self)
    }

    pub fn get_boolean(&self, index: usize) -> Result<Option<bool>, InternalError> {
        let property = self.checked_property(index, TypeCode::Boolean)?;

        property.expression().evaluate_to_boolean(self)
    }

    pub fn get_byte(&self, index: usize) -> Result<Option<u8>, InternalError> {
        let property = self.checked_property(index, TypeCode::Byte)?;
        let value = property.expression().evaluate_to_uinteger(self)?;

        narrow(value, TypeCode::Byte, property)
    }

    pub fn get_date_time(&self, index: usize) -> Result<Option<DateTime>, InternalError> {
        let property = self.checked_property(index, TypeCode::DateTime)?;

        property.expression().evaluate_to_date_time(self)
    }

    pub fn get_decimal(&self, index: usize) -> Result<Option<Decimal>, InternalError> {
        let property = self.checked_property(index, TypeCode::Decimal)?;

        property.expression().evaluate_to_decimal(self)
    }

    pub fn get_double(&self, index: usize) -> Result<Option<f64>, InternalError> {
        let property = self.checked_property(index, TypeCode::Double)?;

        property.expression().evaluate_to_double(self)
    }

    pub fn get_int16(&self, index: usize) -> Result<Option<i16>, InternalError> {
        let property = self.checked_property(index, TypeCode::Int16)?;
        let value = property.expression().evaluate_to_integer(self)?;

        narrow(value, TypeCode::Int16, property)
    }

    pub fn get_int32(&self, index: usize) -> Result<Option<i32>, InternalError> {
        let property = self.checked_property(index, TypeCode::Int32)?;
        let value = property.expression().evaluate_to_integer(self)?;

        narrow(value, TypeCode::Int32, property)
    }

    pub fn get_int64(&self, index: usize) -> Result<Option<i64>, InternalError> {
        let property = self.checked_property(index, TypeCode::Int64)?;

        property.expression().evaluate_to_integer(self)
    }

    pub fn get_object(&self, index: usize) -> Result<Option<ObjectRef>, InternalError> {
        let property = self.checked_property(index, TypeCode::Object)?;

        property.expression().evaluate_to_object(self)
    }

    pub fn get_sbyte(&self, index: usize) -> Result<Option<i8>, InternalError> {
        let property = self.checked_property(index, TypeCode::SByte)?;
        let value = property.expression().evaluate_to_integer(self)?;

        narrow(value, TypeCode::SByte, property)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn get_single(&self, index: usize) -> Result<Option<f32>, InternalError> {
        let property = self.checked_property(index, TypeCode::Single)?;
        let value = property.expression().evaluate_to_double(self)?;

        Ok(value.map(|v| v as f32))
    }

    /// Read any property as text. Binary renders as uppercase hex, objects
    /// through their own renderer.
    pub fn get_string(&self, index: usize) -> Result<Option<String>, InternalError> {
        let property = self.checked_property(index, TypeCode::String)?;
        if property.type_code() == TypeCode::String {
            return property.expression().evaluate_to_string(self);
        }

        Ok(self.value_at(index)?.to_text())
    }

    pub fn get_uint16(&self, index: usize) -> Result<Option<u16>, InternalError> {
        let property = self.checked_property(index, TypeCode::UInt16)?;
        let value = property.expression().evaluate_to_uinteger(self)?;

        narrow(value, TypeCode::UInt16, property)
    }

    pub fn get_uint32(&self, index: usize) -> Result<Option<u32>, InternalError> {
        let property = self.checked_property(index, TypeCode::UInt32)?;
        let value = property.expression().evaluate_to_uinteger(self)?;

        narrow(value, TypeCode::UInt32, property)
    }

    pub fn get_uint64(&self, index: usize) -> Result<Option<u64>, InternalError> {
        let property = self.checked_property(index, TypeCode::UInt64)?;

        property.expression().evaluate_to_uinteger(self)
    }

    ///
    /// LATE-BOUND ACCESS
    ///

    /// Resolve `name` ignoring case and read the property through the
    /// accessor of its declared type.
    pub fn get_value(&self, name: &str) -> Result<ColumnValue, InternalError> {
        let index = self.binding.property_index_ci(name)?;

        self.value_at(index)
    }

    /// Read property `index` through the accessor of its declared type.
    pub fn value_at(&self, index: usize) -> Result<ColumnValue, InternalError> {
        let value = match self.property(index)?.type_code() {
            TypeCode::Binary => ColumnValue::Binary(self.get_binary(index)?),
            TypeCode::Boolean => ColumnValue::Boolean(self.get_boolean(index)?),
            TypeCode::Byte => ColumnValue::Byte(self.get_byte(index)?),
            TypeCode::DateTime => ColumnValue::DateTime(self.get_date_time(index)?),
            TypeCode::Decimal => ColumnValue::Decimal(self.get_decimal(index)?),
            TypeCode::Double => ColumnValue::Double(self.get_double(index)?),
            TypeCode::Int16 => ColumnValue::Int16(self.get_int16(index)?),
            TypeCode::Int32 => ColumnValue::Int32(self.get_int32(index)?),
            TypeCode::Int64 => ColumnValue::Int64(self.get_int64(index)?),
            TypeCode::Object => ColumnValue::Object(self.get_object(index)?.map(ObjectRefEq)),
            TypeCode::SByte => ColumnValue::SByte(self.get_sbyte(index)?),
            TypeCode::Single => ColumnValue::Single(self.get_single(index)?),
            TypeCode::String => {
                let property = self.property(index)?;
                ColumnValue::String(property.expression().evaluate_to_string(self)?)
            }
            TypeCode::UInt16 => ColumnValue::UInt16(self.get_uint16(index)?),
            TypeCode::UInt32 => ColumnValue::UInt32(self.get_uint32(index)?),
            TypeCode::UInt64 => ColumnValue::UInt64(self.get_uint64(index)?),
        };

        Ok(value)
    }

    // Bounds-checked mapping lookup.
    fn property(&self, index: usize) -> Result<&PropertyMapping, InternalError> {
        let count = self.binding.property_count();
        if index >= count {
            return Err(InternalError::out_of_range(
                ErrorOrigin::Row,
                "property",
                index,
                count,
            ));
        }

        self.binding.property(index)
    }

    // Bounds-checked mapping lookup that also verifies the accessor may read
    // the declared type.
    fn checked_property(
        &self,
        index: usize,
        accessor: TypeCode,
    ) -> Result<&PropertyMapping, InternalError> {
        let property = self.property(index)?;
        let actual = property.type_code();
        if !accessor.accepts(actual) {
            record(MetricsEvent::AccessorMismatch {
                requested: accessor,
                actual,
            });

            return Err(RowError::TypeMismatch {
                accessor,
                actual,
                index,
            }
            .into());
        }

        Ok(property)
    }
}

// Narrow a widened evaluation result into the accessor's representation.
fn narrow<S, T>(
    value: Option<S>,
    accessor: TypeCode,
    property: &PropertyMapping,
) -> Result<Option<T>, InternalError>
where
    S: Copy + Display,
    T: TryFrom<S>,
{
    value
        .map(|v| {
            T::try_from(v).map_err(|_| {
                RowError::ValueOutOfRange {
                    accessor,
                    actual: property.type_code(),
                    index: property.index(),
                    value: v.to_string(),
                }
                .into()
            })
        })
        .transpose()
}
