use crate::avl_tree::node::Node;
use crate::avl_tree::tree;
use crate::comparator::{Comparator, NaturalOrder};
use crate::error::{AvlError, Result};
use log::debug;
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// An ordered set of unique elements implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Elements are arranged by a
/// comparator fixed at construction, which defaults to the natural order of `T`.
///
/// Inserting an element that compares equal to a stored one fails with
/// `AvlError::DuplicateKey`, and removing an absent element fails with `AvlError::NotFound`.
/// Either way the set is left exactly as it was.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::AvlSet;
/// use avl_collections::AvlError;
///
/// let mut set = AvlSet::new();
/// set.insert(0).unwrap();
/// set.insert(3).unwrap();
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.insert(3), Err(AvlError::DuplicateKey));
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert_eq!(set.remove(&0), Ok(0));
/// assert_eq!(set.remove(&1), Err(AvlError::NotFound));
/// ```
#[derive(Clone)]
pub struct AvlSet<T, C = NaturalOrder> {
    tree: tree::Tree<T>,
    len: usize,
    comparator: C,
}

impl<T> AvlSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `AvlSet<T>` ordered by `T`'s `Ord` implementation.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        AvlSet::with_comparator(NaturalOrder)
    }
}

impl<T, C> AvlSet<T, C> {
    /// Returns the number of elements in the set.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(2).unwrap();
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
        self.len = 0;
    }

    /// Returns the height of the underlying tree counted in edges, or `None` if the set is
    /// empty. A set holding a single element has height `Some(0)`.
    ///
    /// The height never exceeds `1.44 * log2(len)`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.height(), None);
    ///
    /// for i in 0..7 {
    ///     set.insert(i).unwrap();
    /// }
    /// assert_eq!(set.height(), Some(2));
    /// ```
    pub fn height(&self) -> Option<usize> {
        self.tree.as_ref().map(|node| node.height - 1)
    }

    /// Returns the comparator that orders the set.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the minimum element of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.tree)
    }

    /// Returns the maximum element of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.tree)
    }

    /// Returns an iterator over the set. The iterator will yield elements in ascending order
    /// using in-order traversal. Each call starts a fresh traversal.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter<T> {
        AvlSetIter {
            current: &self.tree,
            stack: Vec::new(),
        }
    }

    /// Clones the elements of the set in ascending order into `buffer`, starting at
    /// `offset`. Nothing is written unless every element fits.
    ///
    /// # Errors
    ///
    /// Returns `AvlError::OutOfRange` if `offset` lies past the end of `buffer`, and
    /// `AvlError::InsufficientCapacity` if `buffer` cannot hold all elements from `offset`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    /// use avl_collections::AvlError;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(3).unwrap();
    /// set.insert(1).unwrap();
    ///
    /// let mut buffer = [0; 4];
    /// set.copy_to(&mut buffer, 1).unwrap();
    /// assert_eq!(buffer, [0, 1, 3, 0]);
    ///
    /// assert_eq!(
    ///     set.copy_to(&mut buffer, 3),
    ///     Err(AvlError::InsufficientCapacity { required: 2, available: 1 }),
    /// );
    /// ```
    pub fn copy_to(&self, buffer: &mut [T], offset: usize) -> Result<()>
    where
        T: Clone,
    {
        if offset > buffer.len() {
            return Err(AvlError::OutOfRange {
                offset,
                len: buffer.len(),
            });
        }

        let available = buffer.len() - offset;
        if self.len > available {
            return Err(AvlError::InsufficientCapacity {
                required: self.len,
                available,
            });
        }

        for (slot, value) in buffer[offset..].iter_mut().zip(self.iter()) {
            *slot = value.clone();
        }
        Ok(())
    }
}

impl<T, C> AvlSet<T, C>
where
    C: Comparator<T>,
{
    /// Constructs a new, empty `AvlSet<T, C>` ordered by `comparator`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    /// set.insert(1).unwrap();
    /// set.insert(2).unwrap();
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&2, &1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        AvlSet {
            tree: None,
            len: 0,
            comparator,
        }
    }

    /// Inserts a value into the set.
    ///
    /// # Errors
    ///
    /// Returns `AvlError::DuplicateKey` if an element comparing equal to `value` is already in
    /// the set. The set is not modified and `value` is dropped.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    /// use avl_collections::AvlError;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.insert(1), Ok(()));
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Err(AvlError::DuplicateKey));
    /// ```
    pub fn insert(&mut self, value: T) -> Result<()> {
        match tree::insert(&mut self.tree, value, &self.comparator) {
            Ok(()) => {
                self.len += 1;
                Ok(())
            },
            Err(_) => {
                debug!("rejected duplicate insert into a set of {} elements", self.len);
                Err(AvlError::DuplicateKey)
            },
        }
    }

    /// Removes the element that compares equal to `value` and returns it.
    ///
    /// # Errors
    ///
    /// Returns `AvlError::NotFound` if no such element exists. The set is not modified.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    /// use avl_collections::AvlError;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.remove(&1), Ok(1));
    /// assert_eq!(set.remove(&1), Err(AvlError::NotFound));
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<T> {
        match tree::remove(&mut self.tree, value, &self.comparator) {
            Some(removed) => {
                self.len -= 1;
                Ok(removed)
            },
            None => {
                debug!("removal missed in a set of {} elements", self.len);
                Err(AvlError::NotFound)
            },
        }
    }

    /// Checks if an element comparing equal to `value` exists in the set.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Returns a reference to the stored element that compares equal to `value`. Returns
    /// `None` if no such element exists.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// // order by the first field only
    /// let mut set = AvlSet::with_comparator(|a: &(u32, &str), b: &(u32, &str)| a.0.cmp(&b.0));
    /// set.insert((1, "one")).unwrap();
    /// assert_eq!(set.get(&(1, "")), Some(&(1, "one")));
    /// assert_eq!(set.get(&(2, "")), None);
    /// ```
    pub fn get(&self, value: &T) -> Option<&T> {
        tree::get(&self.tree, value, &self.comparator)
    }

    /// Returns an element in the set that is less than or equal to a particular value. Returns
    /// `None` if such an element does not exist.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, value: &T) -> Option<&T> {
        tree::floor(&self.tree, value, &self.comparator)
    }

    /// Returns an element in the set that is greater than or equal to a particular value.
    /// Returns `None` if such an element does not exist.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil(&self, value: &T) -> Option<&T> {
        tree::ceil(&self.tree, value, &self.comparator)
    }
}

impl<T, C> IntoIterator for AvlSet<T, C> {
    type Item = T;
    type IntoIter = AvlSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a AvlSet<T, C>
where
    T: 'a,
{
    type Item = &'a T;
    type IntoIter = AvlSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlSet<T, C>`.
///
/// This iterator traverses the elements of the set in-order and yields owned values.
pub struct AvlSetIntoIter<T> {
    current: tree::Tree<T>,
    stack: Vec<Node<T>>,
}

impl<T> Iterator for AvlSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { value, right, .. } = node;
            self.current = right;
            value
        })
    }
}

/// An iterator for `AvlSet<T, C>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct AvlSetIter<'a, T>
where
    T: 'a,
{
    current: &'a tree::Tree<T>,
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let Node { ref value, ref right, .. } = node;
            self.current = right;
            value
        })
    }
}

impl<T, C> Default for AvlSet<T, C>
where
    C: Default,
{
    fn default() -> Self {
        AvlSet {
            tree: None,
            len: 0,
            comparator: C::default(),
        }
    }
}

impl<T, C> fmt::Debug for AvlSet<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for AvlSet<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, C> Eq for AvlSet<T, C> where T: Eq {}

impl<T, C> Serialize for AvlSet<T, C>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for value in self.iter() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

struct AvlSetVisitor<T, C> {
    marker: PhantomData<fn() -> AvlSet<T, C>>,
}

impl<'de, T, C> Visitor<'de> for AvlSetVisitor<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    type Value = AvlSet<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of unique values")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = AvlSet::default();
        while let Some(value) = seq.next_element()? {
            set.insert(value).map_err(<A::Error as de::Error>::custom)?;
        }
        Ok(set)
    }
}

impl<'de, T, C> Deserialize<'de> for AvlSet<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(AvlSetVisitor {
            marker: PhantomData,
        })
    }
}
