use crate::error::{ExtensionsResult, IndexOutOfRangeSnafu};
use snafu::OptionExt;

/// Returns clones of the first `N` elements of `list`.
///
/// ```
/// use core_extensions::Deconstruct;
///
/// let parts = vec!["a", "b", "c"];
/// let [first, second] = parts.deconstruct::<2>()?;
/// assert_eq!((first, second), ("a", "b"));
/// # Ok::<(), core_extensions::ExtensionsError>(())
/// ```
///
/// # Errors
///
/// `IndexOutOfRange` with the first missing index when `list` has fewer than
/// `N` elements.
pub fn deconstruct<T: Clone, const N: usize>(list: &[T]) -> ExtensionsResult<[T; N]> {
    let head: &[T; N] = list
        .get(..N)
        .and_then(|head| head.try_into().ok())
        .context(IndexOutOfRangeSnafu {
            index: list.len(),
            len: list.len(),
        })?;
    Ok(head.clone())
}

pub trait Deconstruct<T> {
    fn deconstruct<const N: usize>(&self) -> ExtensionsResult<[T; N]>;
}

impl<T: Clone> Deconstruct<T> for [T] {
    fn deconstruct<const N: usize>(&self) -> ExtensionsResult<[T; N]> {
        deconstruct(self)
    }
}
