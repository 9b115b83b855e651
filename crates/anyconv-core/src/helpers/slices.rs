//! Slice helpers

use crate::conversion::{convert_to_force, Target};
use crate::value::Value;

/// Convert every element into `T`; elements that fail become `T::default()`
pub fn clone_cast<T, U>(items: &[U]) -> Vec<T>
where
    T: Target,
    U: Clone + Into<Value>,
{
    items
        .iter()
        .map(|item| convert_to_force::<T>(&item.clone().into()))
        .collect()
}
