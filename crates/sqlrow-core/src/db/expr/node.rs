use crate::{
    db::{
        binding::TypeBindingRef,
        expr::{ExprRef, ExtentSet, NavigablePath, ValueExpression, VariableArray},
        row::Row,
    },
    error::{ErrorOrigin, InternalError},
    object::{ObjectRef, object_literal},
    value::Literal,
};
use sqlrow_primitives::{TypeCode, ValueFamily};
use std::sync::Arc;

///
/// Constant
///

#[derive(Clone, Debug)]
pub struct Constant {
    type_code: TypeCode,
    literal: Literal,
}

impl Constant {
    pub fn new(type_code: TypeCode, literal: Literal) -> Result<Self, InternalError> {
        literal.expect_family(type_code.family())?;

        Ok(Self { type_code, literal })
    }

    #[must_use]
    pub fn boxed(self) -> ExprRef {
        Box::new(self)
    }
}

impl ValueExpression for Constant {
    fn type_code(&self) -> TypeCode {
        self.type_code
    }

    fn evaluate(&self, _row: &Row) -> Result<Literal, InternalError> {
        Ok(self.literal.clone())
    }

    fn clone_with(&self, _variables: &Arc<VariableArray>) -> ExprRef {
        Box::new(self.clone())
    }

    fn instantiate_extent_set(&self, _extents: &mut ExtentSet) {}
}

///
/// Variable
///
/// Reads one slot of the bound variable array at evaluation time.
///

#[derive(Clone, Debug)]
pub struct Variable {
    type_code: TypeCode,
    index: usize,
    variables: Arc<VariableArray>,
}

impl Variable {
    pub fn new(
        variables: &Arc<VariableArray>,
        index: usize,
        type_code: TypeCode,
    ) -> Result<Self, InternalError> {
        let family = variables.family(index)?;
        if family != type_code.family() {
            return Err(InternalError::type_mismatch(
                ErrorOrigin::Expression,
                format!("variable {index} holds {family}, declared as {type_code}"),
            ));
        }

        Ok(Self {
            type_code,
            index,
            variables: Arc::clone(variables),
        })
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn boxed(self) -> ExprRef {
        Box::new(self)
    }
}

impl ValueExpression for Variable {
    fn type_code(&self) -> TypeCode {
        self.type_code
    }

    fn evaluate(&self, _row: &Row) -> Result<Literal, InternalError> {
        self.variables.get(self.index)
    }

    fn clone_with(&self, variables: &Arc<VariableArray>) -> ExprRef {
        Box::new(Self {
            type_code: self.type_code,
            index: self.index,
            variables: Arc::clone(variables),
        })
    }

    fn instantiate_extent_set(&self, _extents: &mut ExtentSet) {}
}

///
/// ExtentPath
///
/// Navigates from the object attached at one extent through object-valued
/// properties to a terminal property. Any NULL hop yields NULL.
///

#[derive(Clone, Debug)]
pub struct ExtentPath {
    type_code: TypeCode,
    extent: usize,
    segments: Vec<String>,
}

impl ExtentPath {
    pub fn new<I, S>(extent: usize, segments: I, type_code: TypeCode) -> Result<Self, InternalError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(String::is_empty) {
            return Err(InternalError::invalid_argument(
                ErrorOrigin::Expression,
                "path requires at least one non-empty segment",
            ));
        }

        Ok(Self {
            type_code,
            extent,
            segments,
        })
    }

    /// Single-hop path reading one property of the extent object.
    pub fn property(
        extent: usize,
        name: impl Into<String>,
        type_code: TypeCode,
    ) -> Result<Self, InternalError> {
        Self::new(extent, [name.into()], type_code)
    }

    #[must_use]
    pub fn boxed(self) -> ExprRef {
        Box::new(self)
    }

    // Follow intermediate object hops; `None` when any hop is NULL.
    fn navigate(&self, start: &ObjectRef) -> Result<Option<ObjectRef>, InternalError> {
        let mut current = Arc::clone(start);
        let hops = self.segments.len() - 1;
        for segment in &self.segments[..hops] {
            match current.property(segment)?.to_object()? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }

        Ok(Some(current))
    }
}

impl ValueExpression for ExtentPath {
    fn type_code(&self) -> TypeCode {
        self.type_code
    }

    fn evaluate(&self, row: &Row) -> Result<Literal, InternalError> {
        let family = self.type_code.family();
        let Some(start) = row.access_object(self.extent)? else {
            return Ok(Literal::null(family));
        };
        let Some(owner) = self.navigate(start)? else {
            return Ok(Literal::null(family));
        };

        let literal = owner.property(self.name())?;
        if literal.family() != family {
            return Err(InternalError::type_mismatch(
                ErrorOrigin::Expression,
                format!(
                    "path {} declared as {} but stored value is {}",
                    self.full_path(),
                    self.type_code,
                    literal.family()
                ),
            ));
        }

        Ok(literal)
    }

    fn clone_with(&self, _variables: &Arc<VariableArray>) -> ExprRef {
        Box::new(self.clone())
    }

    fn instantiate_extent_set(&self, extents: &mut ExtentSet) {
        extents.include(self.extent);
    }

    fn as_path(&self) -> Option<&dyn NavigablePath> {
        Some(self)
    }
}

impl NavigablePath for ExtentPath {
    fn extent_number(&self) -> usize {
        self.extent
    }

    fn name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    fn full_path(&self) -> String {
        self.segments.join(".")
    }
}

///
/// ExtentObject
///
/// The object attached at one extent, projected as an object column.
///

#[derive(Clone, Debug)]
pub struct ExtentObject {
    extent: usize,
    type_binding: Option<TypeBindingRef>,
}

impl ExtentObject {
    #[must_use]
    pub const fn new(extent: usize, type_binding: Option<TypeBindingRef>) -> Self {
        Self {
            extent,
            type_binding,
        }
    }

    #[must_use]
    pub fn boxed(self) -> ExprRef {
        Box::new(self)
    }
}

impl ValueExpression for ExtentObject {
    fn type_code(&self) -> TypeCode {
        TypeCode::Object
    }

    fn evaluate(&self, row: &Row) -> Result<Literal, InternalError> {
        let object = row.access_object(self.extent)?.map(Arc::clone);
        let literal = object_literal(object);
        debug_assert_eq!(literal.family(), ValueFamily::Object);

        Ok(literal)
    }

    fn clone_with(&self, _variables: &Arc<VariableArray>) -> ExprRef {
        Box::new(self.clone())
    }

    fn instantiate_extent_set(&self, extents: &mut ExtentSet) {
        extents.include(self.extent);
    }

    fn type_binding(&self) -> Option<TypeBindingRef> {
        self.type_binding.clone()
    }
}
