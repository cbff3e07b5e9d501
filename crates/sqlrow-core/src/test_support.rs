use crate::{
    db::{
        Row, RowTypeBinding,
        binding::{ExtentBinding, TypeBindingRef},
        expr::{ExprRef, ExtentPath},
    },
    object::{ObjectRef, StoredObject},
    value::Literal,
};
use sqlrow_primitives::TypeCode;
use std::sync::Arc;

pub(crate) const PERSON_EXTENT: usize = 0;

pub(crate) fn person_extent() -> TypeBindingRef {
    ExtentBinding::new("Person", ["Name", "Age", "Manager"]).into_ref()
}

pub(crate) fn person(id: u64, name: Option<&str>, age: Option<i64>) -> ObjectRef {
    person_with_manager(id, name, age, None)
}

pub(crate) fn person_with_manager(
    id: u64,
    name: Option<&str>,
    age: Option<i64>,
    manager: Option<ObjectRef>,
) -> ObjectRef {
    StoredObject::new(id, "Person")
        .with_property("Name", Literal::string(name.map(str::to_string)))
        .with_property("Age", Literal::integer(age))
        .with_property("Manager", Literal::object(manager))
        .into_ref()
}

pub(crate) fn age_path() -> ExprRef {
    ExtentPath::property(PERSON_EXTENT, "Age", TypeCode::Int64)
        .expect("age path")
        .boxed()
}

pub(crate) fn name_path() -> ExprRef {
    ExtentPath::property(PERSON_EXTENT, "Name", TypeCode::String)
        .expect("name path")
        .boxed()
}

/// One-extent binding projecting `Age` (0) and `Name` (1) of a person.
pub(crate) fn person_binding() -> Arc<RowTypeBinding> {
    let mut binding = RowTypeBinding::new();
    binding.add_type_binding(person_extent());
    binding
        .add_property_mapping("Age", age_path())
        .expect("age property");
    binding
        .add_property_mapping("Name", name_path())
        .expect("name property");
    binding.set_extent_order(vec![PERSON_EXTENT]).expect("order");

    Arc::new(binding)
}

pub(crate) fn person_row(binding: &Arc<RowTypeBinding>, object: ObjectRef) -> Row {
    let mut row = Row::new(Arc::clone(binding));
    row.attach_object(PERSON_EXTENT, Some(object))
        .expect("person extent slot");

    row
}
