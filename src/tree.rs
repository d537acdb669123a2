//! Raw AVL nodes.
//!
//! Nodes are allocated with `Box` and then handled only through the
//! `NonNull` taken from the leaked box; child links own, parent links do
//! not. Every function here is `unsafe`: each pointer handed in must be a
//! live node of a well-formed tree that nothing else is mutating.

use std::cmp::{max, Ordering};
use std::mem::swap;
use std::ptr::NonNull;

pub struct AvlNode<T> {
    pub value: T,
    pub left: AvlTree<T>,
    pub right: AvlTree<T>,
    // `None` only at the root.
    pub parent: AvlTree<T>,
    pub height: usize,
    pub size: usize,
}

pub type NodePtr<T> = NonNull<AvlNode<T>>;
pub type AvlTree<T> = Option<NodePtr<T>>;

impl<T> AvlNode<T> {
    pub fn create(value: T) -> NodePtr<T> {
        let boxed = Box::new(AvlNode {
            value,
            left: None,
            right: None,
            parent: None,
            height: 1,
            size: 1,
        });

        NonNull::from(Box::leak(boxed))
    }

    /// Frees an unlinked node and hands back its value.
    pub unsafe fn destroy(node: NodePtr<T>) -> T {
        let boxed = Box::from_raw(node.as_ptr());
        boxed.value
    }
}

pub unsafe fn height<T>(tree: AvlTree<T>) -> usize {
    tree.map_or(0, |node| (*node.as_ptr()).height)
}

pub unsafe fn size<T>(tree: AvlTree<T>) -> usize {
    tree.map_or(0, |node| (*node.as_ptr()).size)
}

pub unsafe fn balance_factor<T>(node: NodePtr<T>) -> isize {
    let n = node.as_ptr();
    height((*n).left) as isize - height((*n).right) as isize
}

/// Refreshes the cached height and size from the direct children and points
/// both children back at `node`.
pub unsafe fn recalculate<T>(node: NodePtr<T>) {
    let n = node.as_ptr();

    (*n).height = 1 + max(height((*n).left), height((*n).right));
    (*n).size = 1 + size((*n).left) + size((*n).right);

    if let Some(left) = (*n).left {
        (*left.as_ptr()).parent = Some(node);
    }

    if let Some(right) = (*n).right {
        (*right.as_ptr()).parent = Some(node);
    }
}

pub unsafe fn leftmost<T>(mut node: NodePtr<T>) -> NodePtr<T> {
    while let Some(left) = (*node.as_ptr()).left {
        node = left;
    }

    node
}

pub unsafe fn rightmost<T>(mut node: NodePtr<T>) -> NodePtr<T> {
    while let Some(right) = (*node.as_ptr()).right {
        node = right;
    }

    node
}

/// In-order successor, or `None` at the maximum.
pub unsafe fn successor<T>(mut node: NodePtr<T>) -> AvlTree<T> {
    if let Some(right) = (*node.as_ptr()).right {
        return Some(leftmost(right));
    }

    while let Some(parent) = (*node.as_ptr()).parent {
        if (*parent.as_ptr()).left == Some(node) {
            return Some(parent);
        }

        node = parent;
    }

    None
}

/// In-order predecessor, or `None` at the minimum.
pub unsafe fn predecessor<T>(mut node: NodePtr<T>) -> AvlTree<T> {
    if let Some(left) = (*node.as_ptr()).left {
        return Some(rightmost(left));
    }

    while let Some(parent) = (*node.as_ptr()).parent {
        if (*parent.as_ptr()).right == Some(node) {
            return Some(parent);
        }

        node = parent;
    }

    None
}

/// Promotes the right child of `node` and returns it as the new subtree
/// root, or `None` when there is no right child. The caller stores the
/// result in the slot that held `node`.
pub unsafe fn rotate_left<T>(node: NodePtr<T>) -> AvlTree<T> {
    let n = node.as_ptr();
    let pivot = (*n).right?;
    let p = pivot.as_ptr();

    (*n).right = (*p).left;
    (*p).left = Some(node);
    (*p).parent = (*n).parent;

    recalculate(node);
    recalculate(pivot);

    Some(pivot)
}

/// Mirror of [`rotate_left`].
pub unsafe fn rotate_right<T>(node: NodePtr<T>) -> AvlTree<T> {
    let n = node.as_ptr();
    let pivot = (*n).left?;
    let p = pivot.as_ptr();

    (*n).left = (*p).right;
    (*p).right = Some(node);
    (*p).parent = (*n).parent;

    recalculate(node);
    recalculate(pivot);

    Some(pivot)
}

/// Rebalances after an insertion that descended through `step`, the
/// ordering of the inserted value against the heavy child.
unsafe fn rebalance_inserted<T>(node: NodePtr<T>, step: Ordering) -> NodePtr<T> {
    let n = node.as_ptr();

    match balance_factor(node) {
        2 => {
            if step == Ordering::Greater {
                if let Some(left) = (*n).left {
                    (*n).left = rotate_left(left).or(Some(left));
                }
            }

            rotate_right(node).unwrap_or(node)
        }
        -2 => {
            if step == Ordering::Less {
                if let Some(right) = (*n).right {
                    (*n).right = rotate_right(right).or(Some(right));
                }
            }

            rotate_left(node).unwrap_or(node)
        }
        _ => node,
    }
}

/// Rebalances after a removal, choosing the case from the heavy child's own
/// balance factor.
unsafe fn rebalance_removed<T>(node: NodePtr<T>) -> NodePtr<T> {
    let n = node.as_ptr();

    match balance_factor(node) {
        2 => {
            if let Some(left) = (*n).left {
                if balance_factor(left) < 0 {
                    (*n).left = rotate_left(left).or(Some(left));
                }
            }

            rotate_right(node).unwrap_or(node)
        }
        -2 => {
            if let Some(right) = (*n).right {
                if balance_factor(right) > 0 {
                    (*n).right = rotate_right(right).or(Some(right));
                }
            }

            rotate_left(node).unwrap_or(node)
        }
        _ => node,
    }
}

/// Inserts `value` below `tree` and returns the new subtree root, plus how
/// `value` compared against the old root (`Equal` when `tree` was empty).
/// The ordering is `None` when an equal value is already present.
pub unsafe fn insert<T: Ord>(tree: AvlTree<T>, value: T) -> (NodePtr<T>, Option<Ordering>) {
    let node = match tree {
        Some(node) => node,
        None => return (AvlNode::create(value), Some(Ordering::Equal)),
    };
    let n = node.as_ptr();

    let ordering = value.cmp(&(*n).value);
    let step = match ordering {
        Ordering::Less => {
            let (left, step) = insert((*n).left, value);
            (*n).left = Some(left);
            step
        }
        Ordering::Greater => {
            let (right, step) = insert((*n).right, value);
            (*n).right = Some(right);
            step
        }
        Ordering::Equal => None,
    };

    match step {
        Some(step) => {
            recalculate(node);
            (rebalance_inserted(node, step), Some(ordering))
        }
        None => (node, None),
    }
}

/// Removes the node equal to `value` below `tree`. Returns the new subtree
/// root and the removed value.
pub unsafe fn remove<T: Ord>(tree: AvlTree<T>, value: &T) -> (AvlTree<T>, Option<T>) {
    let node = match tree {
        Some(node) => node,
        None => return (None, None),
    };
    let n = node.as_ptr();

    let taken = match value.cmp(&(*n).value) {
        Ordering::Less => {
            let (left, taken) = remove((*n).left, value);
            (*n).left = left;
            taken
        }
        Ordering::Greater => {
            let (right, taken) = remove((*n).right, value);
            (*n).right = right;
            taken
        }
        Ordering::Equal => match ((*n).left, (*n).right) {
            (Some(_), Some(right)) => {
                // The target moves to the leftmost slot of the right subtree,
                // which has at most one child.
                let successor = leftmost(right);
                swap(&mut (*n).value, &mut (*successor.as_ptr()).value);

                let (right, taken) = remove(Some(right), value);
                (*n).right = right;
                taken
            }
            (left, right) => {
                let child = left.or(right);

                if let Some(child) = child {
                    (*child.as_ptr()).parent = (*n).parent;
                }

                return (child, Some(AvlNode::destroy(node)));
            }
        },
    };

    if taken.is_none() {
        return (Some(node), None);
    }

    recalculate(node);

    (Some(rebalance_removed(node)), taken)
}

pub unsafe fn find<T: Ord>(tree: AvlTree<T>, value: &T) -> AvlTree<T> {
    let mut current_tree = tree;

    while let Some(current_node) = current_tree {
        let n = current_node.as_ptr();

        match value.cmp(&(*n).value) {
            Ordering::Less => current_tree = (*n).left,
            Ordering::Equal => return Some(current_node),
            Ordering::Greater => current_tree = (*n).right,
        }
    }

    None
}

/// Node holding the smallest value not less than `value`.
pub unsafe fn lower_bound<T: Ord>(tree: AvlTree<T>, value: &T) -> AvlTree<T> {
    let node = tree?;
    let n = node.as_ptr();

    match value.cmp(&(*n).value) {
        Ordering::Equal => Some(node),
        Ordering::Less => lower_bound((*n).left, value).or(Some(node)),
        Ordering::Greater => lower_bound((*n).right, value),
    }
}

/// Zero-based k-th smallest node, steering by the cached subtree sizes.
pub unsafe fn nth<T>(tree: AvlTree<T>, mut index: usize) -> AvlTree<T> {
    let mut current_tree = tree;

    while let Some(current_node) = current_tree {
        let n = current_node.as_ptr();
        let left_size = size((*n).left);

        match index.cmp(&left_size) {
            Ordering::Less => current_tree = (*n).left,
            Ordering::Equal => return Some(current_node),
            Ordering::Greater => {
                index -= left_size + 1;
                current_tree = (*n).right;
            }
        }
    }

    None
}

/// Number of values strictly less than `value`.
pub unsafe fn rank<T: Ord>(tree: AvlTree<T>, value: &T) -> usize {
    let mut current_tree = tree;
    let mut rank = 0;

    while let Some(current_node) = current_tree {
        let n = current_node.as_ptr();

        match value.cmp(&(*n).value) {
            Ordering::Less => current_tree = (*n).left,
            Ordering::Equal => return rank + size((*n).left),
            Ordering::Greater => {
                rank += size((*n).left) + 1;
                current_tree = (*n).right;
            }
        }
    }

    rank
}

/// Frees every node of `tree`, children before their parent.
pub unsafe fn destroy<T>(tree: AvlTree<T>) {
    if let Some(node) = tree {
        destroy((*node.as_ptr()).left);
        destroy((*node.as_ptr()).right);
        AvlNode::destroy(node);
    }
}

/// Moves every value out of `tree` in ascending order, freeing the nodes.
pub unsafe fn drain_into<T>(tree: AvlTree<T>, values: &mut Vec<T>) {
    if let Some(node) = tree {
        drain_into((*node.as_ptr()).left, values);
        let right = (*node.as_ptr()).right;
        values.push(AvlNode::destroy(node));
        drain_into(right, values);
    }
}

#[cfg(test)]
pub unsafe fn assert_invariants<T: Ord + std::fmt::Debug>(tree: AvlTree<T>) {
    unsafe fn check<T: Ord + std::fmt::Debug>(
        node: NodePtr<T>,
        parent: AvlTree<T>,
        lower: Option<&T>,
        upper: Option<&T>,
    ) -> (usize, usize) {
        let n = &*node.as_ptr();

        assert!(n.parent == parent, "broken parent link at {:?}", n.value);

        if let Some(lower) = lower {
            assert!(lower < &n.value, "{:?} not above {:?}", n.value, lower);
        }

        if let Some(upper) = upper {
            assert!(&n.value < upper, "{:?} not below {:?}", n.value, upper);
        }

        let (left_height, left_size) = match n.left {
            Some(left) => check(left, Some(node), lower, Some(&n.value)),
            None => (0, 0),
        };
        let (right_height, right_size) = match n.right {
            Some(right) => check(right, Some(node), Some(&n.value), upper),
            None => (0, 0),
        };

        assert!(
            (left_height as isize - right_height as isize).abs() <= 1,
            "unbalanced at {:?}",
            n.value
        );
        assert_eq!(n.height, 1 + max(left_height, right_height));
        assert_eq!(n.size, 1 + left_size + right_size);

        (n.height, n.size)
    }

    if let Some(root) = tree {
        check(root, None, None, None);
    }
}
