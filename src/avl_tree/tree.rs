use crate::avl_tree::node::Node;
use crate::comparator::Comparator;
use log::trace;
use std::cmp::Ordering;
use std::mem;

pub type Tree<T> = Option<Box<Node<T>>>;

pub fn height<T>(tree: &Tree<T>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height,
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

// Refreshes the cached height of the subtree root and applies at most one single or double
// rotation if its balance factor left [-1, 1].
fn balance<T>(tree: &mut Tree<T>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();
    let factor = node.balance();

    if factor > 1 {
        let double = node
            .left
            .as_ref()
            .map_or(false, |child| height(&child.left) < height(&child.right));
        trace!(
            "left-heavy subtree (balance {}, height {}): applying {} rotation",
            factor,
            node.height,
            if double { "left-right" } else { "right" },
        );
        if double {
            if let Some(child) = node.left.take() {
                node.left = Some(rotate_left(child));
            }
        }
        node = rotate_right(node);
    } else if factor < -1 {
        let double = node
            .right
            .as_ref()
            .map_or(false, |child| height(&child.right) < height(&child.left));
        trace!(
            "right-heavy subtree (balance {}, height {}): applying {} rotation",
            factor,
            node.height,
            if double { "right-left" } else { "left" },
        );
        if double {
            if let Some(child) = node.right.take() {
                node.right = Some(rotate_right(child));
            }
        }
        node = rotate_left(node);
    }

    *tree = Some(node);
}

// precondition: there exists a minimum node in the tree
fn remove_min<T>(tree: &mut Tree<T>) -> Box<Node<T>> {
    if let Some(ref mut node) = tree {
        if node.left.is_some() {
            let ret = remove_min(&mut node.left);
            balance(tree);
            return ret;
        }
    }

    match tree.take() {
        Some(mut node) => {
            *tree = node.right.take();
            node
        },
        None => unreachable!(),
    }
}

// Splices a matched node out of the tree and returns the subtree that takes its place
// together with the removed value. The returned subtree still needs rebalancing.
fn unlink<T>(mut node: Box<Node<T>>) -> (Tree<T>, T) {
    match (node.left.take(), node.right.take()) {
        (None, None) => (None, node.value),
        (left, None) => (left, node.value),
        (left, Some(mut right)) => {
            if right.left.is_none() {
                right.left = left;
                return (Some(right), node.value);
            }

            match left {
                Some(mut left) if left.right.is_none() => {
                    left.right = Some(right);
                    (Some(left), node.value)
                },
                left => {
                    // the slot survives and takes over the successor's value
                    let mut right = Some(right);
                    let successor = remove_min(&mut right);
                    node.left = left;
                    node.right = right;
                    let removed = mem::replace(&mut node.value, successor.value);
                    (Some(node), removed)
                },
            }
        },
    }
}

/// Inserts `value` into the tree. Returns the value back if an equal element is already
/// stored, in which case the tree is left untouched.
pub fn insert<T, C>(tree: &mut Tree<T>, value: T, comparator: &C) -> Result<(), T>
where
    C: Comparator<T>,
{
    match tree {
        Some(ref mut node) => match comparator.compare(&value, &node.value) {
            Ordering::Less => insert(&mut node.left, value, comparator)?,
            Ordering::Greater => insert(&mut node.right, value, comparator)?,
            Ordering::Equal => return Err(value),
        },
        None => {
            *tree = Some(Box::new(Node::new(value)));
            return Ok(());
        },
    }

    balance(tree);
    Ok(())
}

/// Removes the element equal to `value` and returns it. A miss returns `None` without
/// touching a single node.
pub fn remove<T, C>(tree: &mut Tree<T>, value: &T, comparator: &C) -> Option<T>
where
    C: Comparator<T>,
{
    let ret = match tree.take() {
        Some(mut node) => match comparator.compare(value, &node.value) {
            Ordering::Less => {
                let ret = remove(&mut node.left, value, comparator);
                *tree = Some(node);
                ret?
            },
            Ordering::Greater => {
                let ret = remove(&mut node.right, value, comparator);
                *tree = Some(node);
                ret?
            },
            Ordering::Equal => {
                let (subtree, removed) = unlink(node);
                *tree = subtree;
                removed
            },
        },
        None => return None,
    };

    balance(tree);
    Some(ret)
}

pub fn get<'a, T, C>(tree: &'a Tree<T>, value: &T, comparator: &C) -> Option<&'a T>
where
    C: Comparator<T>,
{
    tree.as_ref().and_then(|node| {
        match comparator.compare(value, &node.value) {
            Ordering::Less => get(&node.left, value, comparator),
            Ordering::Greater => get(&node.right, value, comparator),
            Ordering::Equal => Some(&node.value),
        }
    })
}

pub fn ceil<'a, T, C>(tree: &'a Tree<T>, value: &T, comparator: &C) -> Option<&'a T>
where
    C: Comparator<T>,
{
    tree.as_ref().and_then(|node| {
        match comparator.compare(value, &node.value) {
            Ordering::Greater => ceil(&node.right, value, comparator),
            Ordering::Less => {
                match ceil(&node.left, value, comparator) {
                    None => Some(&node.value),
                    res => res,
                }
            },
            Ordering::Equal => Some(&node.value),
        }
    })
}

pub fn floor<'a, T, C>(tree: &'a Tree<T>, value: &T, comparator: &C) -> Option<&'a T>
where
    C: Comparator<T>,
{
    tree.as_ref().and_then(|node| {
        match comparator.compare(value, &node.value) {
            Ordering::Less => floor(&node.left, value, comparator),
            Ordering::Greater => {
                match floor(&node.right, value, comparator) {
                    None => Some(&node.value),
                    res => res,
                }
            },
            Ordering::Equal => Some(&node.value),
        }
    })
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.value
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.value
    })
}

/// Walks the whole tree and panics if any structural invariant is broken. Returns the number
/// of reachable nodes.
#[cfg(test)]
pub fn check<T, C>(tree: &Tree<T>, comparator: &C) -> usize
where
    C: Comparator<T>,
{
    fn check_bounded<T, C>(
        tree: &Tree<T>,
        lower: Option<&T>,
        upper: Option<&T>,
        comparator: &C,
    ) -> usize
    where
        C: Comparator<T>,
    {
        let node = match tree {
            Some(ref node) => node,
            None => return 0,
        };

        if let Some(lower) = lower {
            assert_eq!(comparator.compare(lower, &node.value), Ordering::Less);
        }
        if let Some(upper) = upper {
            assert_eq!(comparator.compare(&node.value, upper), Ordering::Less);
        }

        let expected_height = std::cmp::max(height(&node.left), height(&node.right)) + 1;
        assert_eq!(node.height, expected_height);
        assert!(node.balance().abs() <= 1);

        check_bounded(&node.left, lower, Some(&node.value), comparator)
            + check_bounded(&node.right, Some(&node.value), upper, comparator)
            + 1
    }

    let len = check_bounded(tree, None, None, comparator);
    if len > 0 {
        let edges = (height(tree) - 1) as f64;
        assert!(edges <= 1.44 * (len as f64).log2());
    }
    len
}
