use crate::{
    object::StoredObject,
    types::{Binary, Decimal},
    value::{
        CaseInsensitiveCollation, Collation, ColumnValue, Literal, OrdinalCollation, ScalarValue,
        cmp_f64, natural_cmp,
    },
};
use sqlrow_primitives::{TypeCode, ValueFamily};
use std::cmp::Ordering;

#[test]
fn literal_new_rejects_payload_of_foreign_family() {
    let err = Literal::new(ValueFamily::Integer, Some(ScalarValue::String("x".into())))
        .expect_err("family mismatch must be rejected");

    assert!(err.is_type_mismatch());
}

#[test]
fn null_literal_keeps_its_family() {
    let lit = Literal::null(ValueFamily::Decimal);

    assert!(lit.is_null());
    assert_eq!(lit.family(), ValueFamily::Decimal);
    assert_eq!(lit.to_decimal().expect("decimal read"), None);
    assert!(lit.to_integer().is_err());
}

#[test]
fn integer_literal_widens_to_decimal() {
    let lit = Literal::integer(Some(-42));

    assert_eq!(
        lit.to_decimal().expect("widening read"),
        Some(Decimal::from_i64(-42))
    );
}

#[test]
fn negative_integer_does_not_read_as_unsigned() {
    let err = Literal::integer(Some(-1))
        .to_uinteger()
        .expect_err("negative value cannot be unsigned");

    assert!(err.is_type_mismatch());
}

#[test]
fn large_unsigned_does_not_read_as_signed() {
    assert!(Literal::uinteger(Some(u64::MAX)).to_integer().is_err());
    assert_eq!(
        Literal::uinteger(Some(7)).to_integer().expect("fits"),
        Some(7)
    );
}

#[test]
fn render_returns_none_for_null_and_text_otherwise() {
    assert_eq!(Literal::boolean(None).render(), None);
    assert_eq!(Literal::boolean(Some(true)).render().as_deref(), Some("true"));
    assert_eq!(
        Literal::binary(Some(Binary::from(vec![0xde, 0xad]))).render().as_deref(),
        Some("DEAD")
    );
}

#[test]
fn nan_sorts_below_every_number() {
    assert_eq!(cmp_f64(f64::NAN, f64::NEG_INFINITY), Ordering::Less);
    assert_eq!(cmp_f64(1.0, f64::NAN), Ordering::Greater);
    assert_eq!(cmp_f64(f64::NAN, f64::NAN), Ordering::Equal);
}

#[test]
fn natural_cmp_orders_objects_by_identity_not_content() {
    let low = StoredObject::new(3, "Person")
        .with_property("Name", Literal::text("Zed"))
        .into_ref();
    let high = StoredObject::new(9, "Person")
        .with_property("Name", Literal::text("Abe"))
        .into_ref();

    let ordering = natural_cmp(
        &ScalarValue::Object(low),
        &ScalarValue::Object(high),
        &OrdinalCollation,
    );

    assert_eq!(ordering, Some(Ordering::Less));
}

#[test]
fn natural_cmp_rejects_mixed_families() {
    let ordering = natural_cmp(
        &ScalarValue::Integer(1),
        &ScalarValue::UInteger(1),
        &OrdinalCollation,
    );

    assert_eq!(ordering, None);
}

#[test]
fn case_insensitive_collation_folds_case_but_stays_total() {
    let collation = CaseInsensitiveCollation;

    assert_eq!(collation.compare("apple", "Banana"), Ordering::Less);
    assert_eq!(OrdinalCollation.compare("apple", "Banana"), Ordering::Greater);
    assert_ne!(collation.compare("abc", "ABC"), Ordering::Equal);
    assert_eq!(
        collation.compare("abc", "ABC"),
        collation.compare("ABC", "abc").reverse()
    );
}

#[test]
fn column_value_reports_declared_code_and_renders_null() {
    let value = ColumnValue::Int16(None);

    assert_eq!(value.type_code(), TypeCode::Int16);
    assert!(value.is_null());
    assert_eq!(value.render(), "<NULL>");
    assert_eq!(value.render_with_null("NULL"), "NULL");
}

#[test]
fn single_column_renders_with_single_precision() {
    assert_eq!(ColumnValue::Single(Some(0.1)).render(), "0.1");
}
