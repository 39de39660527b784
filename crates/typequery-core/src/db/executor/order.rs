use crate::{
    db::query::{OrderDirection, OrderKey, OrderTarget},
    traits::EntityKind,
    value::canonical_cmp,
};
use std::cmp::Ordering;

/// Stable in-place sort by the composite key list.
///
/// Keys apply lexicographically; rows tied on every key keep their
/// incoming order.
pub(super) fn sort_rows<E: EntityKind>(rows: &mut [E], keys: &[OrderKey<E::Field>]) {
    rows.sort_by(|left, right| compare_rows(left, right, keys));
}

pub(super) fn compare_rows<E: EntityKind>(
    left: &E,
    right: &E,
    keys: &[OrderKey<E::Field>],
) -> Ordering {
    for key in keys {
        let ord = match key.target {
            OrderTarget::Id => left.id().cmp(&right.id()),
            OrderTarget::Field(field) => {
                canonical_cmp(&left.get_value(field), &right.get_value(field))
            }
        };

        let ord = match key.direction {
            OrderDirection::Asc => ord,
            OrderDirection::Desc => ord.reverse(),
        };

        if ord.is_ne() {
            return ord;
        }
    }

    Ordering::Equal
}
