use crate::tree::{self, AvlTree};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// A position inside an [`AvlTreeSet`](crate::AvlTreeSet): either an element
/// or the end position one past the maximum.
///
/// Moving walks parent links, so no path stack is kept. The cursor borrows
/// the set, which keeps the tree from being restructured underneath it.
pub struct Cursor<'a, T> {
    current: AvlTree<T>,
    root: AvlTree<T>,
    marker: PhantomData<&'a T>,
}

// A cursor only ever reads the tree, like a `&'a T`.
unsafe impl<'a, T: Sync> Send for Cursor<'a, T> {}
unsafe impl<'a, T: Sync> Sync for Cursor<'a, T> {}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(current: AvlTree<T>, root: AvlTree<T>) -> Self {
        Self {
            current,
            root,
            marker: PhantomData,
        }
    }

    /// The element under the cursor, `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        self.current.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the in-order successor, or to the end position after the
    /// maximum.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the end position.
    pub fn move_next(&mut self) {
        let node = self
            .current
            .unwrap_or_else(|| panic!("called move_next() on a cursor at the end position"));

        self.current = unsafe { tree::successor(node) };
    }

    /// Moves to the in-order predecessor. From the end position this moves to
    /// the maximum; from the minimum it moves to the end position.
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            Some(node) => unsafe { tree::predecessor(node) },
            None => self.root.map(|root| unsafe { tree::rightmost(root) }),
        };
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T: fmt::Debug> fmt::Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

/// Ascending iterator over borrowed elements.
pub struct Iter<'a, T> {
    front: AvlTree<T>,
    back: AvlTree<T>,
    remaining: usize,
    marker: PhantomData<&'a T>,
}

unsafe impl<'a, T: Sync> Send for Iter<'a, T> {}
unsafe impl<'a, T: Sync> Sync for Iter<'a, T> {}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: AvlTree<T>) -> Self {
        unsafe {
            Self {
                front: root.map(|root| tree::leftmost(root)),
                back: root.map(|root| tree::rightmost(root)),
                remaining: tree::size(root),
                marker: PhantomData,
            }
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.front?;

        unsafe {
            self.front = tree::successor(node);
            self.remaining -= 1;

            Some(&(*node.as_ptr()).value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.back?;

        unsafe {
            self.back = tree::predecessor(node);
            self.remaining -= 1;

            Some(&(*node.as_ptr()).value)
        }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Ascending iterator over owned elements, produced by consuming a set.
pub struct IntoIter<T> {
    values: std::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(values: Vec<T>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.values.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod specs {
    use crate::set::AvlTreeSet;
    use itertools::assert_equal;

    fn scenario() -> AvlTreeSet<i32> {
        vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect()
    }

    #[test]
    fn cursor_walks_forward_to_end() {
        let set = scenario();
        let mut cursor = set.cursor_front();
        let mut values = Vec::new();

        while let Some(&value) = cursor.get() {
            values.push(value);
            cursor.move_next();
        }

        assert_eq!(values, vec![1, 3, 4, 5, 7, 8, 9]);
        assert!(cursor.is_end());
        assert_eq!(cursor, set.cursor_end());
    }

    #[test]
    fn cursor_steps_back_from_end() {
        let set = scenario();
        let mut cursor = set.cursor_end();

        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&9));
        assert_eq!(cursor, set.cursor_back());

        cursor.move_next();
        assert!(cursor.is_end());
    }

    #[test]
    fn cursor_walks_backward_past_minimum() {
        let set = scenario();
        let mut cursor = set.cursor_end();
        let mut values = Vec::new();

        cursor.move_prev();

        while let Some(&value) = cursor.get() {
            values.push(value);
            cursor.move_prev();
        }

        assert_eq!(values, vec![9, 8, 7, 5, 4, 3, 1]);
        assert!(cursor.is_end());
    }

    #[test]
    fn cursor_on_empty_set_stays_at_end() {
        let set = AvlTreeSet::<i32>::new();
        let mut cursor = set.cursor_end();

        assert_eq!(set.cursor_front(), cursor);

        cursor.move_prev();
        assert!(cursor.is_end());
    }

    #[test]
    #[should_panic(expected = "move_next")]
    fn cursor_refuses_to_pass_end() {
        let set = scenario();
        let mut cursor = set.cursor_end();

        cursor.move_next();
    }

    #[test]
    fn iter_meets_in_the_middle() {
        let set = (0..10).collect::<AvlTreeSet<u8>>();
        let mut iter = set.iter();

        assert_eq!(iter.len(), 10);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&9));
        assert_eq!(iter.len(), 8);
        assert_equal(iter.by_ref().rev(), [8u8, 7, 6, 5, 4, 3, 2, 1].iter());
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn iter_debug_lists_remaining_values() {
        let set = vec![3, 1, 2].into_iter().collect::<AvlTreeSet<i32>>();
        let mut iter = set.iter();

        assert_eq!(format!("{:?}", iter), "[1, 2, 3]");

        iter.next();
        iter.next_back();

        assert_eq!(format!("{:?}", iter), "[2]");
    }

    #[test]
    fn into_iter_moves_values_out() {
        let set = vec!["pear", "apple", "fig"]
            .into_iter()
            .map(String::from)
            .collect::<AvlTreeSet<_>>();
        let mut into_iter = set.into_iter();

        assert_eq!(into_iter.len(), 3);
        assert_eq!(into_iter.next_back(), Some(String::from("pear")));
        assert_equal(into_iter, vec![String::from("apple"), String::from("fig")]);
    }
}
