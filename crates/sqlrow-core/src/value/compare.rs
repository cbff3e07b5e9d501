use crate::value::{Collation, ScalarValue};
use std::cmp::Ordering;

/// Natural ascending order of two present values of the same family.
///
/// Returns `None` for mismatched families. Strings follow `collation`;
/// objects order by identity, never by content.
#[must_use]
pub fn natural_cmp(
    left: &ScalarValue,
    right: &ScalarValue,
    collation: &dyn Collation,
) -> Option<Ordering> {
    let ordering = match (left, right) {
        (ScalarValue::Binary(a), ScalarValue::Binary(b)) => a.cmp(b),
        (ScalarValue::Boolean(a), ScalarValue::Boolean(b)) => a.cmp(b),
        (ScalarValue::DateTime(a), ScalarValue::DateTime(b)) => a.cmp(b),
        (ScalarValue::Decimal(a), ScalarValue::Decimal(b)) => a.cmp(b),
        (ScalarValue::Double(a), ScalarValue::Double(b)) => cmp_f64(*a, *b),
        (ScalarValue::Integer(a), ScalarValue::Integer(b)) => a.cmp(b),
        (ScalarValue::UInteger(a), ScalarValue::UInteger(b)) => a.cmp(b),
        (ScalarValue::String(a), ScalarValue::String(b)) => collation.compare(a, b),
        (ScalarValue::Object(a), ScalarValue::Object(b)) => a.object_id().cmp(&b.object_id()),
        _ => return None,
    };

    Some(ordering)
}

/// Total order over doubles: NaN sorts below every number and equals itself.
#[must_use]
pub fn cmp_f64(left: f64, right: f64) -> Ordering {
    match left.partial_cmp(&right) {
        Some(ordering) => ordering,
        None => match (left.is_nan(), right.is_nan()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        },
    }
}
