use std::fmt::{Debug, Display};

use pretty_assertions::assert_eq;

pub fn assert_in_any_order<T: Eq + Ord + Debug>(
    values: impl IntoIterator<Item = T>,
    expected: impl IntoIterator<Item = T>,
) {
    let mut values = values.into_iter().collect::<Vec<_>>();
    values.sort();

    let mut expected = expected.into_iter().collect::<Vec<_>>();
    expected.sort();

    assert_eq!(values, expected);
}

/// Compares moves by their coordinate form, ignoring order.
pub fn assert_moves_in_any_order<M: Display>(
    moves: impl IntoIterator<Item = M>,
    expected: &[&str],
) {
    assert_in_any_order(
        moves.into_iter().map(|m| m.to_string()),
        expected.iter().map(|m| m.to_string()),
    );
}
