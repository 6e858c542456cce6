//! Ordered character storage.
//!
//! [`OrderedList`] is a red-black tree indexed by implicit position instead of
//! by key: every node caches the size of its subtree, so the index of an
//! element is never stored, only derived while descending. Lookup, insertion
//! and removal are O(log n). All rebalancing is expressed as bottom-up
//! structural rewrites over owned children; a rewrite builds replacement
//! nodes from the pieces of the old ones and recomputes the cached counts in
//! the constructor, so the subtree-count invariant can never drift.

/// Error returned when an index does not address an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRange {
    /// The offending index.
    pub index: usize,
    /// Element count at the time of the call.
    pub len: usize,
}

impl std::fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "index {} out of range for length {}", self.index, self.len)
    }
}

impl std::error::Error for IndexOutOfRange {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug)]
enum Child<T> {
    Leaf,
    Node(Box<Node<T>>),
}

#[derive(Debug)]
struct Node<T> {
    color: Color,
    left: Child<T>,
    data: T,
    right: Child<T>,
    count: usize,
}

impl<T> Child<T> {
    fn node(color: Color, left: Child<T>, data: T, right: Child<T>) -> Child<T> {
        let count = 1 + left.count() + right.count();
        Child::Node(Box::new(Node {
            color,
            left,
            data,
            right,
            count,
        }))
    }

    fn count(&self) -> usize {
        match self {
            Child::Leaf => 0,
            Child::Node(n) => n.count,
        }
    }
}

/// Completion state of a rebalancing pass.
///
/// `Done` means the subtree already satisfies the balance invariants and the
/// fixup can stop propagating; `Todo` means the parent still has to inspect
/// the rebuilt subtree (a pending red-red conflict on insertion, a pending
/// black-height deficit on removal).
#[derive(Debug)]
enum Step<T> {
    Done(Child<T>),
    Todo(Child<T>),
}

impl<T> Step<T> {
    fn map(self, f: impl FnOnce(Child<T>) -> Child<T>) -> Step<T> {
        match self {
            Step::Done(c) => Step::Done(f(c)),
            Step::Todo(c) => Step::Todo(f(c)),
        }
    }

    fn into_inner(self) -> Child<T> {
        match self {
            Step::Done(c) | Step::Todo(c) => c,
        }
    }
}

/// A balanced sequence addressed by position.
///
/// ```
/// use folio_core::OrderedList;
///
/// let mut list = OrderedList::new();
/// list.insert(0, 'a');
/// list.insert(1, 'c');
/// list.insert(1, 'b');
/// assert_eq!(list.iter().copied().collect::<String>(), "abc");
/// assert_eq!(list.remove_at(1), Ok('b'));
/// ```
#[derive(Debug)]
pub struct OrderedList<T> {
    root: Child<T>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        OrderedList { root: Child::Leaf }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.root.count()
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfRange> {
        if index >= self.len() {
            return Err(IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        let mut target = index;
        let mut cur = &self.root;
        loop {
            let Child::Node(n) = cur else {
                unreachable!("descent ran past a leaf with a verified index")
            };
            let left_count = n.left.count();
            if target == left_count {
                return Ok(&n.data);
            }
            if target < left_count {
                cur = &n.left;
            } else {
                target -= left_count + 1;
                cur = &n.right;
            }
        }
    }

    /// Mutably borrows the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfRange> {
        let len = self.len();
        if index >= len {
            return Err(IndexOutOfRange { index, len });
        }
        let mut target = index;
        let mut cur = &mut self.root;
        loop {
            let Child::Node(n) = cur else {
                unreachable!("descent ran past a leaf with a verified index")
            };
            let left_count = n.left.count();
            if target == left_count {
                return Ok(&mut n.data);
            }
            if target < left_count {
                cur = &mut n.left;
            } else {
                target -= left_count + 1;
                cur = &mut n.right;
            }
        }
    }

    /// Inserts `value` so that it becomes the element at `index`, shifting
    /// everything at and after `index` one position right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`. Like `Vec::insert`, passing an index outside
    /// the sequence is a caller bug, not a runtime condition.
    pub fn insert(&mut self, index: usize, value: T) {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        let root = std::mem::replace(&mut self.root, Child::Leaf);
        self.root = Self::blacken(Self::insert_aux(root, index, value).into_inner());
    }

    /// Removes and returns the element at `index`, shifting everything after
    /// it one position left.
    pub fn remove_at(&mut self, index: usize) -> Result<T, IndexOutOfRange> {
        let len = self.len();
        if index >= len {
            return Err(IndexOutOfRange { index, len });
        }
        let root = std::mem::replace(&mut self.root, Child::Leaf);
        let (step, removed) = Self::delete_aux(root, index);
        self.root = step.into_inner();
        Ok(removed)
    }

    /// Iterates the elements in index order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.descend(&self.root);
        iter
    }

    fn blacken(child: Child<T>) -> Child<T> {
        match child {
            Child::Node(mut n) => {
                n.color = Color::Black;
                Child::Node(n)
            }
            leaf => leaf,
        }
    }

    fn insert_aux(child: Child<T>, index: usize, value: T) -> Step<T> {
        match child {
            Child::Leaf => Step::Todo(Child::node(Color::Red, Child::Leaf, value, Child::Leaf)),
            Child::Node(n) => {
                let Node {
                    color,
                    left,
                    data,
                    right,
                    ..
                } = *n;
                let left_count = left.count();
                if index <= left_count {
                    match Self::insert_aux(left, index, value) {
                        Step::Done(lt) => Step::Done(Child::node(color, lt, data, right)),
                        Step::Todo(lt) => Self::balance(color, lt, data, right),
                    }
                } else {
                    match Self::insert_aux(right, index - left_count - 1, value) {
                        Step::Done(rt) => Step::Done(Child::node(color, left, data, rt)),
                        Step::Todo(rt) => Self::balance(color, left, data, rt),
                    }
                }
            }
        }
    }

    /// Insertion fixup. A red node reports `Todo` so its parent can detect a
    /// red-red conflict; a black node either rewrites one of the four
    /// conflict shapes below itself into a red parent with two black
    /// children (still `Todo` for the level above) or absorbs the pass.
    fn balance(color: Color, left: Child<T>, data: T, right: Child<T>) -> Step<T> {
        if color == Color::Red {
            return Step::Todo(Child::node(Color::Red, left, data, right));
        }
        match Self::rewrite_left(Color::Red, left, data, right) {
            Ok(n) => Step::Todo(n),
            Err((left, data, right)) => match Self::rewrite_right(Color::Red, left, data, right) {
                Ok(n) => Step::Todo(n),
                Err((left, data, right)) => Step::Done(Child::node(Color::Black, left, data, right)),
            },
        }
    }

    /// Removal fixup at a node whose sibling side may hold a red pair. The
    /// same four rewrites as insertion, but the root keeps its color and the
    /// result is final (`Done`): the rewrite moves one black onto the short
    /// side. When no shape matches, recoloring the node itself is the last
    /// chance to absorb the deficit.
    fn balance_delete(color: Color, left: Child<T>, data: T, right: Child<T>) -> Step<T> {
        match Self::rewrite_left(color, left, data, right) {
            Ok(n) => Step::Done(n),
            Err((left, data, right)) => match Self::rewrite_right(color, left, data, right) {
                Ok(n) => Step::Done(n),
                Err((left, data, right)) => {
                    Self::blacken_delete(Child::node(color, left, data, right))
                }
            },
        }
    }

    /// Rewrites `(c, R(R(a,x,b), y, c'), z, d)` or `(c, R(a, x, R(b,y,c')), z, d)`
    /// into `c(B(..), m, B(..))`; hands the pieces back when neither shape
    /// matches.
    #[allow(clippy::type_complexity)]
    fn rewrite_left(
        color: Color,
        left: Child<T>,
        z: T,
        d: Child<T>,
    ) -> Result<Child<T>, (Child<T>, T, Child<T>)> {
        let l = match left {
            Child::Node(n) if n.color == Color::Red => *n,
            other => return Err((other, z, d)),
        };
        let Node {
            left: ll,
            data: ly,
            right: lr,
            ..
        } = l;
        match ll {
            Child::Node(g) if g.color == Color::Red => {
                let Node {
                    left: a,
                    data: x,
                    right: b,
                    ..
                } = *g;
                Ok(Child::node(
                    color,
                    Child::node(Color::Black, a, x, b),
                    ly,
                    Child::node(Color::Black, lr, z, d),
                ))
            }
            ll => match lr {
                Child::Node(g) if g.color == Color::Red => {
                    let Node {
                        left: b,
                        data: y,
                        right: c,
                        ..
                    } = *g;
                    Ok(Child::node(
                        color,
                        Child::node(Color::Black, ll, ly, b),
                        y,
                        Child::node(Color::Black, c, z, d),
                    ))
                }
                lr => Err((Child::node(Color::Red, ll, ly, lr), z, d)),
            },
        }
    }

    /// Mirror of [`Self::rewrite_left`] for a red pair under the right child.
    #[allow(clippy::type_complexity)]
    fn rewrite_right(
        color: Color,
        a: Child<T>,
        x: T,
        right: Child<T>,
    ) -> Result<Child<T>, (Child<T>, T, Child<T>)> {
        let r = match right {
            Child::Node(n) if n.color == Color::Red => *n,
            other => return Err((a, x, other)),
        };
        let Node {
            left: rl,
            data: ry,
            right: rr,
            ..
        } = r;
        match rl {
            Child::Node(g) if g.color == Color::Red => {
                let Node {
                    left: b,
                    data: y,
                    right: c,
                    ..
                } = *g;
                Ok(Child::node(
                    color,
                    Child::node(Color::Black, a, x, b),
                    y,
                    Child::node(Color::Black, c, ry, rr),
                ))
            }
            rl => match rr {
                Child::Node(g) if g.color == Color::Red => {
                    let Node {
                        left: c,
                        data: z,
                        right: d,
                        ..
                    } = *g;
                    Ok(Child::node(
                        color,
                        Child::node(Color::Black, a, x, rl),
                        ry,
                        Child::node(Color::Black, c, z, d),
                    ))
                }
                rr => Err((a, x, Child::node(Color::Red, rl, ry, rr))),
            },
        }
    }

    /// Recoloring a red subtree root black settles a pending deficit; a
    /// black root or a leaf cannot absorb it and propagates `Todo`.
    fn blacken_delete(child: Child<T>) -> Step<T> {
        match child {
            Child::Node(mut n) if n.color == Color::Red => {
                n.color = Color::Black;
                Step::Done(Child::Node(n))
            }
            other => Step::Todo(other),
        }
    }

    fn delete_aux(child: Child<T>, index: usize) -> (Step<T>, T) {
        match child {
            Child::Leaf => unreachable!("descent ran past a leaf with a verified index"),
            Child::Node(n) => {
                let Node {
                    color,
                    left,
                    data,
                    right,
                    ..
                } = *n;
                let left_count = left.count();
                if index == left_count {
                    Self::delete_current(color, left, data, right)
                } else if index < left_count {
                    let (step, removed) = Self::delete_aux(left, index);
                    let step = match step {
                        Step::Done(lt) => Step::Done(Child::node(color, lt, data, right)),
                        Step::Todo(lt) => Self::eq_left(color, lt, data, right),
                    };
                    (step, removed)
                } else {
                    let (step, removed) = Self::delete_aux(right, index - left_count - 1);
                    let step = match step {
                        Step::Done(rt) => Step::Done(Child::node(color, left, data, rt)),
                        Step::Todo(rt) => Self::eq_right(color, left, data, rt),
                    };
                    (step, removed)
                }
            }
        }
    }

    /// Removes the node at hand. With no right subtree the left child takes
    /// its place (a removed red changes no black height, a removed black
    /// leaves a deficit for [`Self::blacken_delete`]); otherwise the minimum
    /// of the right subtree is spliced in as the replacement value.
    fn delete_current(color: Color, left: Child<T>, data: T, right: Child<T>) -> (Step<T>, T) {
        match (color, right) {
            (Color::Red, Child::Leaf) => (Step::Done(left), data),
            (Color::Black, Child::Leaf) => (Self::blacken_delete(left), data),
            (color, right) => {
                let (step, min) = Self::delete_min(right);
                let step = match step {
                    Step::Done(rt) => Step::Done(Child::node(color, left, min, rt)),
                    Step::Todo(rt) => Self::eq_right(color, left, min, rt),
                };
                (step, data)
            }
        }
    }

    fn delete_min(child: Child<T>) -> (Step<T>, T) {
        match child {
            Child::Leaf => unreachable!("taking the minimum of an empty subtree"),
            Child::Node(n) => {
                let Node {
                    color,
                    left,
                    data,
                    right,
                    ..
                } = *n;
                match left {
                    Child::Leaf => match color {
                        Color::Red => (Step::Done(right), data),
                        Color::Black => (Self::blacken_delete(right), data),
                    },
                    left => {
                        let (step, min) = Self::delete_min(left);
                        let step = match step {
                            Step::Done(lt) => Step::Done(Child::node(color, lt, data, right)),
                            Step::Todo(lt) => Self::eq_left(color, lt, data, right),
                        };
                        (step, min)
                    }
                }
            }
        }
    }

    /// Fixup for a left subtree that is one black short. A black sibling is
    /// recolored red and the node rebalanced in place; a red sibling is
    /// rotated so the recursion meets a black one on the next step.
    fn eq_left(color: Color, left: Child<T>, data: T, right: Child<T>) -> Step<T> {
        match right {
            Child::Node(s) if s.color == Color::Black => {
                let Node {
                    left: c,
                    data: y,
                    right: d,
                    ..
                } = *s;
                Self::balance_delete(color, left, data, Child::node(Color::Red, c, y, d))
            }
            Child::Node(s) => {
                let Node {
                    left: c,
                    data: z,
                    right: d,
                    ..
                } = *s;
                Self::eq_left(Color::Red, left, data, c)
                    .map(|n| Child::node(Color::Black, n, z, d))
            }
            Child::Leaf => unreachable!("deficit fixup against a leaf sibling"),
        }
    }

    /// Mirror of [`Self::eq_left`] for a right subtree that is one black
    /// short.
    fn eq_right(color: Color, left: Child<T>, data: T, right: Child<T>) -> Step<T> {
        match left {
            Child::Node(s) if s.color == Color::Black => {
                let Node {
                    left: a,
                    data: x,
                    right: b,
                    ..
                } = *s;
                Self::balance_delete(color, Child::node(Color::Red, a, x, b), data, right)
            }
            Child::Node(s) => {
                let Node {
                    left: a,
                    data: x,
                    right: b,
                    ..
                } = *s;
                Self::eq_right(Color::Red, b, data, right)
                    .map(|n| Child::node(Color::Black, a, x, n))
            }
            Child::Leaf => unreachable!("deficit fixup against a leaf sibling"),
        }
    }
}

/// In-order borrowing iterator over an [`OrderedList`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn descend(&mut self, mut child: &'a Child<T>) {
        while let Child::Node(n) = child {
            self.stack.push(n);
            child = &n.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let n = self.stack.pop()?;
        self.descend(&n.right);
        Some(&n.data)
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
