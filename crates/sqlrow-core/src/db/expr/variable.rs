use crate::{
    error::{ErrorOrigin, InternalError},
    value::Literal,
};
use sqlrow_primitives::ValueFamily;
use std::sync::RwLock;

///
/// VariableArray
///
/// Parameter values bound into a prepared query. Each slot has a fixed
/// family; values may be rebound between executions. Re-parameterizing a
/// plan clones its expressions against a fresh array, so two plan copies
/// never observe each other's bindings.
///

#[derive(Debug)]
pub struct VariableArray {
    slots: Vec<VariableSlot>,
}

#[derive(Debug)]
struct VariableSlot {
    family: ValueFamily,
    value: RwLock<Literal>,
}

impl VariableArray {
    /// Build an array of unbound (NULL) slots.
    #[must_use]
    pub fn new(families: &[ValueFamily]) -> Self {
        let slots = families
            .iter()
            .map(|family| VariableSlot {
                family: *family,
                value: RwLock::new(Literal::null(*family)),
            })
            .collect();

        Self { slots }
    }

    /// Build an array whose slot families follow the given literals.
    #[must_use]
    pub fn from_literals(values: Vec<Literal>) -> Self {
        let slots = values
            .into_iter()
            .map(|value| VariableSlot {
                family: value.family(),
                value: RwLock::new(value),
            })
            .collect();

        Self { slots }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn family(&self, index: usize) -> Result<ValueFamily, InternalError> {
        Ok(self.slot(index)?.family)
    }

    pub fn get(&self, index: usize) -> Result<Literal, InternalError> {
        let slot = self.slot(index)?;
        let value = slot.value.read().map_err(|_| {
            InternalError::internal(
                ErrorOrigin::Expression,
                format!("variable slot {index} lock poisoned"),
            )
        })?;

        Ok(value.clone())
    }

    /// Rebind one slot; the literal must match the slot family.
    pub fn set(&self, index: usize, value: Literal) -> Result<(), InternalError> {
        let slot = self.slot(index)?;
        value.expect_family(slot.family)?;

        let mut guard = slot.value.write().map_err(|_| {
            InternalError::internal(
                ErrorOrigin::Expression,
                format!("variable slot {index} lock poisoned"),
            )
        })?;
        *guard = value;

        Ok(())
    }

    fn slot(&self, index: usize) -> Result<&VariableSlot, InternalError> {
        self.slots.get(index).ok_or_else(|| {
            InternalError::out_of_range(ErrorOrigin::Expression, "variable", index, self.len())
        })
    }
}
