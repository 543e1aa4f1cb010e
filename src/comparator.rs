//! Total orders used to arrange the elements of a tree.

use std::cmp::Ordering;

/// A total order over `T`.
///
/// The order must be consistent for the whole lifetime of the collection using it. A
/// comparator that changes its answers between calls breaks the ordering of every tree built
/// with it, and the tree has no way to detect that.
///
/// Any closure or function of type `Fn(&T, &T) -> Ordering` is a comparator.
///
/// # Examples
///
/// ```
/// use avl_collections::avl_tree::AvlSet;
///
/// // longer strings first, ties broken alphabetically
/// let mut set = AvlSet::with_comparator(|a: &&str, b: &&str| {
///     b.len().cmp(&a.len()).then(a.cmp(b))
/// });
/// set.insert("fig").unwrap();
/// set.insert("banana").unwrap();
/// set.insert("kiwi").unwrap();
///
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec![&"banana", &"kiwi", &"fig"]);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The ordering given by the element type's `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<T> Comparator<T> for NaturalOrder
where
    T: Ord + ?Sized,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::{Comparator, NaturalOrder};
    use std::cmp::Ordering;

    #[test]
    fn test_natural_order() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare("b", "a"), Ordering::Greater);
        assert_eq!(NaturalOrder.compare(&7u8, &7u8), Ordering::Equal);
    }

    #[test]
    fn test_closure() {
        let reverse = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(reverse.compare(&1, &2), Ordering::Greater);
        assert_eq!(reverse.compare(&2, &2), Ordering::Equal);
    }

    #[test]
    fn test_fn_item() {
        fn by_len(a: &str, b: &str) -> Ordering {
            a.len().cmp(&b.len())
        }
        assert_eq!(by_len.compare("abc", "de"), Ordering::Greater);
    }
}
