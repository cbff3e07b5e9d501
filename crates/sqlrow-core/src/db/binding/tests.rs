use crate::{
    db::{
        binding::{ExtentBinding, PropertyMapping, RowTypeBinding, TypeBinding},
        expr::{Constant, ExtentObject, ExtentPath, Variable, VariableArray},
        row::Row,
    },
    error::ErrorClass,
    obs::sink::{MetricsEvent, MetricsSink, with_metrics_sink},
    test_support::{age_path, name_path, person_binding, person_extent},
    value::Literal,
};
use sqlrow_primitives::{TypeCode, ValueFamily};
use std::{cell::RefCell, collections::BTreeSet, rc::Rc, sync::Arc};

#[derive(Default)]
struct CaptureSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CaptureSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

// Person (0) joined with Company (1); properties spread over both.
fn join_binding() -> RowTypeBinding {
    let mut binding = RowTypeBinding::new();
    binding.add_type_binding(person_extent());
    binding.add_type_binding(ExtentBinding::new("Company", ["Title"]).into_ref());

    binding
        .add_property_mapping("Name", name_path())
        .expect("name");
    binding
        .add_property_mapping(
            "Title",
            ExtentPath::property(1, "Title", TypeCode::String)
                .expect("title")
                .boxed(),
        )
        .expect("title");
    binding
        .add_property_mapping(
            "Flag",
            Constant::new(TypeCode::Boolean, Literal::boolean(Some(true)))
                .expect("flag")
                .boxed(),
        )
        .expect("flag");
    binding
        .add_property_mapping("Company", ExtentObject::new(1, None).boxed())
        .expect("company");

    binding
}

#[test]
fn property_indexes_follow_insertion_order() {
    let binding = person_binding();

    assert_eq!(binding.property_count(), 2);
    assert_eq!(binding.property_index("Age").expect("age"), 0);
    assert_eq!(binding.property_index("Name").expect("name"), 1);
    assert_eq!(binding.property_name(1).expect("name"), "Name");
    assert_eq!(binding.property(0).expect("age").type_code(), TypeCode::Int64);
}

#[test]
fn unknown_name_is_not_found() {
    let err = person_binding()
        .property_index("Salary")
        .expect_err("missing property");

    assert!(err.is_not_found());
    assert_eq!(err.message, "there is no property with name: Salary");
}

#[test]
fn case_insensitive_lookup_prefers_exact_match() {
    let mut binding = RowTypeBinding::new();
    binding.add_type_binding(person_extent());
    binding.add_property_mapping("name", name_path()).expect("lower");
    binding.add_property_mapping("Name", name_path()).expect("upper");

    assert_eq!(binding.property_index_ci("Name").expect("exact"), 1);
    assert_eq!(binding.property_index_ci("NAME").expect("folded"), 0);
    assert!(binding.property_index("NAME").is_err());
}

#[test]
fn out_of_range_property_and_type_binding_fail() {
    let binding = person_binding();

    assert!(binding.property(2).expect_err("property").is_out_of_range());
    assert!(binding.type_binding(1).expect_err("schema").is_out_of_range());
    assert_eq!(binding.type_binding(0).expect("person").name(), "Person");
}

#[test]
fn duplicate_property_name_is_rejected() {
    let mut binding = RowTypeBinding::new();
    binding.add_type_binding(person_extent());
    binding.add_property_mapping("Name", name_path()).expect("first");

    let err = binding
        .add_property_mapping("Name", name_path())
        .expect_err("duplicate");

    assert!(err.is_invariant_violation());
    assert_eq!(binding.property_count(), 1);
}

#[test]
fn empty_property_name_is_an_argument_error() {
    let err = PropertyMapping::new("", 0, age_path()).expect_err("empty name");

    assert_eq!(err.class, ErrorClass::InvalidArgument);
}

#[test]
fn property_reading_unjoined_extent_is_rejected() {
    let mut binding = RowTypeBinding::new();
    binding.add_type_binding(person_extent());

    let err = binding
        .add_property_mapping(
            "Title",
            ExtentPath::property(3, "Title", TypeCode::String)
                .expect("path")
                .boxed(),
        )
        .expect_err("extent 3 is not joined");

    assert!(err.is_invariant_violation());
}

#[test]
fn positional_name_takes_display_name_from_path() {
    let path_mapping = PropertyMapping::new("0", 0, age_path()).expect("path");
    let computed = PropertyMapping::new(
        "1",
        1,
        Constant::new(TypeCode::Int32, Literal::integer(Some(1)))
            .expect("constant")
            .boxed(),
    )
    .expect("computed");
    let named = PropertyMapping::new("Years", 2, age_path()).expect("named");

    assert_eq!(path_mapping.display_name(), "Age");
    assert_eq!(computed.display_name(), "1");
    assert_eq!(named.display_name(), "Years");
}

#[test]
fn object_property_carries_nested_type_binding() {
    let mapping = PropertyMapping::new(
        "Owner",
        0,
        ExtentObject::new(0, Some(person_extent())).boxed(),
    )
    .expect("object");

    assert_eq!(mapping.type_code(), TypeCode::Object);
    assert_eq!(
        mapping.type_binding().map(|b| b.property_count()),
        Some(3)
    );
}

#[test]
fn buckets_require_extent_order() {
    let binding = join_binding();

    let err = binding.property_list(0).expect_err("no order");

    assert!(err.is_invariant_violation());
}

#[test]
fn extent_order_must_be_a_full_permutation() {
    let mut binding = join_binding();

    assert!(binding.set_extent_order(vec![]).is_err());
    assert!(binding.set_extent_order(vec![0]).is_err());
    assert!(binding.set_extent_order(vec![0, 0]).is_err());
    assert!(binding.set_extent_order(vec![0, 2]).is_err());
    assert!(binding.set_extent_order(vec![1, 0]).is_ok());
    assert_eq!(binding.extent_order(), Some([1, 0].as_slice()));
}

#[test]
fn adding_a_type_binding_clears_extent_order() {
    let mut binding = join_binding();
    binding.set_extent_order(vec![0, 1]).expect("order");

    binding.add_type_binding(ExtentBinding::new("City", ["Name"]).into_ref());

    assert_eq!(binding.extent_order(), None);
}

#[test]
fn buckets_follow_last_bound_extent() {
    let mut binding = join_binding();
    binding.set_extent_order(vec![1, 0]).expect("order");

    // Person is bound last, so constants go to Company (first in order).
    assert_eq!(binding.property_list(0).expect("person"), [0]);
    assert_eq!(binding.property_list(1).expect("company"), [1, 2, 3]);
    assert!(binding.property_list(2).expect_err("extent 2").is_out_of_range());
}

#[test]
fn buckets_are_cached_and_cover_every_property_once() {
    let mut binding = join_binding();
    binding.set_extent_order(vec![0, 1]).expect("order");

    let first = binding.property_list(1).expect("first call");
    let second = binding.property_list(1).expect("second call");
    assert!(std::ptr::eq(first, second));

    let mut seen = BTreeSet::new();
    let mut total = 0;
    for extent in 0..binding.type_binding_count() {
        for index in binding.property_list(extent).expect("bucket") {
            seen.insert(*index);
            total += 1;
        }
    }

    assert_eq!(total, binding.property_count());
    assert_eq!(seen.into_iter().collect::<Vec<_>>(), [0, 1, 2, 3]);
}

#[test]
fn bucket_build_is_recorded_once() {
    let mut binding = join_binding();
    binding.set_extent_order(vec![0, 1]).expect("order");
    let sink = Rc::new(CaptureSink::default());

    with_metrics_sink(sink.clone(), || {
        binding.property_list(0).expect("build");
        binding.property_list(1).expect("cached");
    });

    assert_eq!(
        sink.events.borrow().as_slice(),
        [MetricsEvent::BucketBuild {
            extents: 2,
            properties: 4
        }]
    );
}

#[test]
fn concurrent_first_bucket_access_sees_one_cache() {
    let mut binding = join_binding();
    binding.set_extent_order(vec![0, 1]).expect("order");
    let binding = Arc::new(binding);

    let addresses: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let binding = Arc::clone(&binding);
                scope.spawn(move || {
                    binding.property_list(1).expect("bucket").as_ptr() as usize
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .collect()
    });

    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn clone_shares_schema_and_rebinds_variables() {
    let vars = Arc::new(VariableArray::from_literals(vec![Literal::integer(Some(1))]));
    let mut binding = RowTypeBinding::new();
    binding.add_type_binding(person_extent());
    binding
        .add_property_mapping(
            "Limit",
            Variable::new(&vars, 0, TypeCode::Int64)
                .expect("variable")
                .boxed(),
        )
        .expect("limit");
    binding.set_extent_order(vec![0]).expect("order");
    let bucket_before = binding.property_list(0).expect("bucket").as_ptr();

    let new_vars = Arc::new(VariableArray::new(&[ValueFamily::Integer]));
    new_vars.set(0, Literal::integer(Some(99))).expect("bind");
    let cloned = Arc::new(binding.clone_with(&new_vars));
    let original = Arc::new(binding);

    assert!(std::ptr::eq(
        original.type_bindings().as_ptr(),
        cloned.type_bindings().as_ptr()
    ));
    assert_eq!(cloned.property_list(0).expect("bucket").as_ptr(), bucket_before);
    assert_eq!(cloned.extent_order(), Some([0].as_slice()));

    let original_row = Row::new(Arc::clone(&original));
    let cloned_row = Row::new(Arc::clone(&cloned));
    assert_eq!(original_row.get_int64(0).expect("original"), Some(1));
    assert_eq!(cloned_row.get_int64(0).expect("clone"), Some(99));
}

#[test]
fn plan_rendering_lists_tables_and_projection() {
    let mut outer = RowTypeBinding::new();
    outer.add_type_binding(person_extent());
    outer.add_type_binding(Arc::new(join_binding()));
    outer.add_property_mapping("Age", age_path()).expect("age");

    let rendered = outer.to_string();

    assert!(rendered.starts_with("Tables(\n  0 = Person\n  1 =\n    Tables(\n"));
    assert!(rendered.contains("  0 Age: Int64 <- 0.Age\n"));
    assert!(rendered.contains("      2 Flag: Boolean\n"));
    assert!(rendered.ends_with("Projection(\n  0 Age: Int64 <- 0.Age\n)\n"));
}

#[test]
fn row_type_binding_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<RowTypeBinding>();
    assert_eq!(person_binding().name(), "Row");
}
