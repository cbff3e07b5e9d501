use crate::{
    db::{
        binding::{BindingError, PropertyMapping, TypeBinding, TypeBindingRef},
        expr::{ExprRef, ExtentSet, VariableArray},
    },
    error::{ErrorOrigin, InternalError},
    obs::sink::{MetricsEvent, record},
};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock},
};

// Property indices grouped by the extent at which they become evaluable,
// indexed by extent number.
type Buckets = Arc<[Vec<usize>]>;

///
/// RowTypeBinding
///
/// Projection schema of a row: ordered property mappings, the joined source
/// schemas, and an optional extent evaluation order.
///
/// Built once by the planner through the accretion methods, then shared
/// read-only (`Arc<RowTypeBinding>`) by every row of the query. The
/// per-extent bucket cache is built at most once; concurrent first callers
/// all observe the same buckets.
///

#[derive(Debug, Default)]
pub struct RowTypeBinding {
    type_bindings: Arc<Vec<TypeBindingRef>>,
    extent_order: Option<Arc<[usize]>>,
    properties: Vec<PropertyMapping>,
    index_by_name: HashMap<String, usize>,
    buckets: OnceLock<Buckets>,
}

impl RowTypeBinding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// ACCRETION
    ///

    /// Join one more source schema; returns its extent number.
    ///
    /// Clears any configured extent order, which must cover every joined
    /// extent.
    pub fn add_type_binding(&mut self, type_binding: TypeBindingRef) -> usize {
        Arc::make_mut(&mut self.type_bindings).push(type_binding);
        self.extent_order = None;
        self.buckets = OnceLock::new();

        self.type_bindings.len() - 1
    }

    /// Bind `name` to the next property index.
    pub fn add_property_mapping(
        &mut self,
        name: impl Into<String>,
        expression: ExprRef,
    ) -> Result<usize, InternalError> {
        let name = name.into();
        if self.index_by_name.contains_key(&name) {
            return Err(BindingError::DuplicatePropertyName(name).into());
        }

        let mut extents = ExtentSet::new();
        expression.instantiate_extent_set(&mut extents);
        if let Some(extent) = extents.iter().find(|e| *e >= self.type_bindings.len()) {
            return Err(BindingError::UnknownExtent {
                property: name,
                extent,
                extents: self.type_bindings.len(),
            }
            .into());
        }

        let index = self.properties.len();
        let mapping = PropertyMapping::new(name, index, expression)?;
        self.index_by_name.insert(mapping.name().to_string(), index);
        self.properties.push(mapping);
        self.buckets = OnceLock::new();

        Ok(index)
    }

    /// Configure the order in which joined extents are bound during
    /// iteration. Must be a permutation of every joined extent number.
    pub fn set_extent_order(&mut self, order: Vec<usize>) -> Result<(), InternalError> {
        let extents = self.type_bindings.len();
        let mut seen = vec![false; extents];
        let valid = !order.is_empty()
            && order.len() == extents
            && order
                .iter()
                .all(|extent| seen.get_mut(*extent).is_some_and(|s| !std::mem::replace(s, true)));

        if !valid {
            return Err(BindingError::InvalidExtentOrder { order, extents }.into());
        }

        self.extent_order = Some(order.into());
        self.buckets = OnceLock::new();

        Ok(())
    }

    ///
    /// QUERY
    ///

    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn type_binding_count(&self) -> usize {
        self.type_bindings.len()
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyMapping] {
        &self.properties
    }

    #[must_use]
    pub fn type_bindings(&self) -> &[TypeBindingRef] {
        &self.type_bindings
    }

    #[must_use]
    pub fn extent_order(&self) -> Option<&[usize]> {
        self.extent_order.as_deref()
    }

    pub fn property_index(&self, name: &str) -> Result<usize, InternalError> {
        self.index_by_name
            .get(name)
            .copied()
            .ok_or_else(|| InternalError::not_found(ErrorOrigin::Binding, name))
    }

    /// Resolve a property name ignoring case; an exact match wins.
    pub fn property_index_ci(&self, name: &str) -> Result<usize, InternalError> {
        if let Some(index) = self.index_by_name.get(name) {
            return Ok(*index);
        }

        let lowered = name.to_lowercase();
        self.properties
            .iter()
            .find(|p| p.name().to_lowercase() == lowered)
            .map(PropertyMapping::index)
            .ok_or_else(|| InternalError::not_found(ErrorOrigin::Binding, name))
    }

    pub fn property(&self, index: usize) -> Result<&PropertyMapping, InternalError> {
        self.properties.get(index).ok_or_else(|| {
            InternalError::out_of_range(
                ErrorOrigin::Binding,
                "property",
                index,
                self.properties.len(),
            )
        })
    }

    pub fn property_by_name(&self, name: &str) -> Result<&PropertyMapping, InternalError> {
        self.property(self.property_index(name)?)
    }

    pub fn property_name(&self, index: usize) -> Result<&str, InternalError> {
        Ok(self.property(index)?.name())
    }

    pub fn type_binding(&self, index: usize) -> Result<&TypeBindingRef, InternalError> {
        self.type_bindings.get(index).ok_or_else(|| {
            InternalError::out_of_range(
                ErrorOrigin::Binding,
                "type binding",
                index,
                self.type_bindings.len(),
            )
        })
    }

    /// Property indices that become evaluable once `extent` is bound.
    ///
    /// Each property lands in the bucket of the extent, among those its
    /// expression reads, that comes last in the evaluation order. Properties
    /// that read no extent land in the first extent of the order. Buckets
    /// are built on first call and cached.
    pub fn property_list(&self, extent: usize) -> Result<&[usize], InternalError> {
        let Some(order) = self.extent_order.as_deref() else {
            return Err(BindingError::ExtentOrderNotSet.into());
        };

        let buckets = self.buckets.get_or_init(|| self.build_buckets(order));
        buckets
            .get(extent)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                InternalError::out_of_range(ErrorOrigin::Binding, "extent", extent, buckets.len())
            })
    }

    fn build_buckets(&self, order: &[usize]) -> Buckets {
        let mut buckets = vec![Vec::new(); order.len()];
        let first = order.first().copied().unwrap_or_default();
        let mut extents = ExtentSet::new();

        for property in &self.properties {
            extents.clear();
            property.expression().instantiate_extent_set(&mut extents);
            let extent = extents.last_included(order).unwrap_or(first);
            buckets[extent].push(property.index());
        }

        record(MetricsEvent::BucketBuild {
            extents: order.len() as u64,
            properties: self.properties.len() as u64,
        });

        buckets.into()
    }

    /// Copy this binding for a re-parameterized plan.
    ///
    /// Property expressions are deep-copied against `variables`; joined
    /// schemas, the extent order, and any built buckets are shared.
    #[must_use]
    pub fn clone_with(&self, variables: &Arc<VariableArray>) -> Self {
        record(MetricsEvent::PlanClone {
            properties: self.properties.len() as u64,
        });

        Self {
            type_bindings: Arc::clone(&self.type_bindings),
            extent_order: self.extent_order.clone(),
            properties: self
                .properties
                .iter()
                .map(|p| p.clone_with(variables))
                .collect(),
            index_by_name: self.index_by_name.clone(),
            buckets: self.buckets.clone(),
        }
    }

    fn write_plan(&self, f: &mut fmt::Formatter<'_>, tabs: usize) -> fmt::Result {
        let pad = "  ".repeat(tabs);
        let inner = "  ".repeat(tabs + 1);

        writeln!(f, "{pad}Tables(")?;
        for (number, type_binding) in self.type_bindings.iter().enumerate() {
            match type_binding.as_row_type() {
                Some(nested) => {
                    writeln!(f, "{inner}{number} =")?;
                    nested.write_plan(f, tabs + 2)?;
                }
                None => writeln!(f, "{inner}{number} = {}", type_binding.name())?,
            }
        }
        writeln!(f, "{pad})")?;

        writeln!(f, "{pad}Projection(")?;
        for property in &self.properties {
            write!(
                f,
                "{inner}{} {}: {}",
                property.index(),
                property.display_name(),
                property.type_code()
            )?;
            match property.expression().as_path() {
                Some(path) => writeln!(f, " <- {}.{}", path.extent_number(), path.full_path())?,
                None => writeln!(f)?,
            }
        }
        writeln!(f, "{pad})")
    }
}

impl fmt::Display for RowTypeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_plan(f, 0)
    }
}

impl TypeBinding for RowTypeBinding {
    fn name(&self) -> &str {
        "Row"
    }

    fn property_count(&self) -> usize {
        self.properties.len()
    }

    fn as_row_type(&self) -> Option<&Self> {
        Some(self)
    }
}
