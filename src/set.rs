use super::iterator::{Cursor, Iter};
use super::tree::{self, AvlNode, AvlTree};
use core::iter::Peekable;
use std::cmp::Ordering;
use std::marker::PhantomData;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

/// An ordered set of unique values backed by an AVL tree whose nodes keep
/// parent links, cached heights and cached subtree sizes.
pub struct AvlTreeSet<T> {
    // Empty, or a tree whose nodes are owned by this set alone.
    root: AvlTree<T>,
    marker: PhantomData<Box<AvlNode<T>>>,
}

unsafe impl<T: Send> Send for AvlTreeSet<T> {}
unsafe impl<T: Sync> Sync for AvlTreeSet<T> {}

impl<T> AvlTreeSet<T> {
    pub fn new() -> Self {
        Self {
            root: None,
            marker: PhantomData,
        }
    }

    pub fn clear(&mut self) {
        unsafe { tree::destroy(self.root.take()) }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        unsafe { tree::size(self.root) }
    }

    /// Height of the tree, `0` when empty.
    pub fn height(&self) -> usize {
        unsafe { tree::height(self.root) }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root)
    }

    pub fn first(&self) -> Option<&T> {
        self.value_at(self.root.map(|root| unsafe { tree::leftmost(root) }))
    }

    pub fn last(&self) -> Option<&T> {
        self.value_at(self.root.map(|root| unsafe { tree::rightmost(root) }))
    }

    /// The `index`-th smallest value, counting from zero.
    pub fn nth(&self, index: usize) -> Option<&T> {
        self.value_at(unsafe { tree::nth(self.root, index) })
    }

    /// Cursor at the smallest value, or at the end position when empty.
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        self.cursor_at(self.root.map(|root| unsafe { tree::leftmost(root) }))
    }

    /// Cursor at the largest value, or at the end position when empty.
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        self.cursor_at(self.root.map(|root| unsafe { tree::rightmost(root) }))
    }

    /// Cursor one past the largest value.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        self.cursor_at(None)
    }

    /// Hands the nodes over to the caller, leaving the set empty.
    pub(crate) fn take_root(&mut self) -> AvlTree<T> {
        self.root.take()
    }

    fn cursor_at(&self, node: AvlTree<T>) -> Cursor<'_, T> {
        Cursor::new(node, self.root)
    }

    fn value_at(&self, node: AvlTree<T>) -> Option<&T> {
        node.map(|node| unsafe { &(*node.as_ptr()).value })
    }
}

impl<T> Drop for AvlTreeSet<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, T: 'a + Ord> AvlTreeSet<T> {
    /// Builds a set from fallible items. On the first `Err` every node built
    /// so far is released and the error is handed back.
    pub fn try_from_iter<E, I>(iter: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<T, E>>,
    {
        let mut set = Self::new();

        for item in iter {
            match item {
                Ok(value) => {
                    set.insert(value);
                }
                Err(error) => {
                    set.clear();
                    return Err(error);
                }
            }
        }

        Ok(set)
    }

    /// Adds `value`, returning `false` if an equal value was already present.
    pub fn insert(&mut self, value: T) -> bool {
        let (root, step) = unsafe { tree::insert(self.root, value) };

        self.root = Some(root);

        step.is_some()
    }

    /// Removes and returns the value equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let (root, taken) = unsafe { tree::remove(self.root, value) };

        self.root = root;

        taken
    }

    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    pub fn contains(&self, value: &T) -> bool {
        unsafe { tree::find(self.root, value) }.is_some()
    }

    pub fn get(&self, value: &T) -> Option<&T> {
        self.value_at(unsafe { tree::find(self.root, value) })
    }

    /// Cursor at the value equal to `value`, or at the end position.
    pub fn find(&self, value: &T) -> Cursor<'_, T> {
        self.cursor_at(unsafe { tree::find(self.root, value) })
    }

    /// Cursor at the smallest value not less than `value`, or at the end
    /// position.
    pub fn lower_bound(&self, value: &T) -> Cursor<'_, T> {
        self.cursor_at(unsafe { tree::lower_bound(self.root, value) })
    }

    /// Number of values strictly less than `value`.
    pub fn rank(&self, value: &T) -> usize {
        unsafe { tree::rank(self.root, value) }
    }

    /// Moves every value of `other` into `self`, leaving `other` empty.
    pub fn append(&mut self, other: &mut Self) {
        let mut values = Vec::with_capacity(other.len());

        unsafe { tree::drain_into(other.take_root(), &mut values) };

        for value in values {
            self.insert(value);
        }
    }

    pub fn union(&'a self, other: &'a Self) -> impl Iterator<Item = &'a T> + 'a {
        AvlTreeSetUnionIter {
            left_iter: self.iter().peekable(),
            right_iter: other.iter().peekable(),
        }
    }

    pub fn intersection(&'a self, other: &'a Self) -> impl Iterator<Item = &'a T> + 'a {
        self.iter().filter(move |&value| other.contains(value))
    }

    pub fn difference(&'a self, other: &'a Self) -> impl Iterator<Item = &'a T> + 'a {
        self.iter().filter(move |&value| !other.contains(value))
    }

    pub fn symmetric_difference(&'a self, other: &'a Self) -> impl Iterator<Item = &'a T> + 'a {
        AvlTreeSetUnionIter {
            left_iter: self.difference(other).peekable(),
            right_iter: other.difference(self).peekable(),
        }
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|value| other.contains(value))
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection(other).next().is_none()
    }
}

pub struct AvlTreeSetUnionIter<'a, T: 'a + Ord, I: Iterator<Item = &'a T>> {
    left_iter: Peekable<I>,
    right_iter: Peekable<I>,
}

impl<'a, T: 'a + Ord, I: Iterator<Item = &'a T>> Iterator for AvlTreeSetUnionIter<'a, T, I> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(&left_value) = self.left_iter.peek() {
            if let Some(&right_value) = self.right_iter.peek() {
                match left_value.cmp(&right_value) {
                    Ordering::Less => self.left_iter.next(),
                    Ordering::Equal => {
                        self.right_iter.next();
                        self.left_iter.next()
                    }
                    Ordering::Greater => self.right_iter.next(),
                }
            } else {
                self.left_iter.next()
            }
        } else {
            self.right_iter.next()
        }
    }
}

// Refit from quickcheck's `BTreeSet` impl
#[cfg(test)]
impl<T: Arbitrary + Ord> Arbitrary for AvlTreeSet<T> {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let vec: Vec<T> = Arbitrary::arbitrary(g);
        vec.into_iter().collect()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let vec: Vec<T> = self.iter().cloned().collect();
        Box::new(vec.shrink().map(|v| v.into_iter().collect::<Self>()))
    }
}
