use core::cmp::Ordering;
use core::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

/// A value storable in [`RedBlackTree`].
///
/// `key` is the single ordering key; every placement and comparison decision
/// in the tree uses it and nothing else. The returned key must stay the same
/// for as long as the value is stored — the tree cannot notice a key changing
/// underneath it and the search structure silently rots if one does.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Node colors, including the two transient levels used by the deletion
/// repair.
///
/// A tree at rest holds only `Red` and `Black` nodes. `DoublyBlack` and
/// `NegativeRed` exist while `remove` is bubbling a black-height deficit up
/// the tree and are all gone again by the time it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    NegativeRed,
    Red,
    Black,
    DoublyBlack,
}

impl Color {
    /// Returns `true` if the color is [`Red`].
    ///
    /// [`Red`]: Color::Red
    #[must_use]
    fn is_red(&self) -> bool {
        matches!(self, Self::Red)
    }

    /// Returns `true` if the color is [`Black`].
    ///
    /// [`Black`]: Color::Black
    #[must_use]
    fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }

    /// One level towards black: Red -> Black -> DoublyBlack.
    #[must_use]
    fn blacker(self) -> Self {
        match self {
            Self::NegativeRed => Self::Red,
            Self::Red => Self::Black,
            Self::Black => Self::DoublyBlack,
            Self::DoublyBlack => panic!("no color level above doubly-black"),
        }
    }

    /// One level towards red: DoublyBlack -> Black -> Red.
    #[must_use]
    fn redder(self) -> Self {
        match self {
            Self::NegativeRed => panic!("no color level below negative-red"),
            Self::Red => Self::NegativeRed,
            Self::Black => Self::Red,
            Self::DoublyBlack => Self::Black,
        }
    }
}

/// Child slot selector.
///
/// The fix-up procedures are left/right symmetric, so they take the mirror as
/// a value instead of spelling every case out twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    Left,
    Right,
}

impl Dir {
    #[must_use]
    fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

struct Node<T> {
    payload: T,
    color: Color,
    parent: Option<RawNode<T>>,
    left: Option<RawNode<T>>,
    right: Option<RawNode<T>>,
}

impl<T: Keyed> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("Node");
        f.field("key", &self.payload.key()).field("color", &self.color);

        let mut dbg_opt_node = |name: &str, node: &Option<RawNode<T>>| match node {
            Some(node) => {
                let node = unsafe { node.as_ref() };
                f.field(name, &(node.payload.key(), node.color));
            }
            None => {
                f.field(name, &None::<&str>);
            }
        };
        dbg_opt_node("parent", &self.parent);
        dbg_opt_node("left", &self.left);
        dbg_opt_node("right", &self.right);

        f.finish()
    }
}

/// Wrapper around `NonNull<Node<T>>` to provide convenient methods in order
/// to make the tree algorithms much more readable.
#[derive(Debug, PartialEq, Eq)]
#[repr(transparent)]
pub(crate) struct RawNode<T> {
    ptr: NonNull<Node<T>>,
}

impl<T> Clone for RawNode<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawNode<T> {}

impl<T> RawNode<T> {
    fn from_node(node: Node<T>) -> Self {
        Self {
            ptr: unsafe { NonNull::new_unchecked(Box::into_raw(Box::new(node))) },
        }
    }

    #[inline]
    fn as_ptr(&self) -> *mut Node<T> {
        self.ptr.as_ptr()
    }

    #[inline]
    unsafe fn as_ref<'a>(&self) -> &'a Node<T> {
        unsafe { self.ptr.as_ref() }
    }

    #[inline]
    unsafe fn payload<'a>(&self) -> &'a T {
        unsafe { &(*self.as_ptr()).payload }
    }

    #[inline]
    pub(crate) unsafe fn key<'a>(&self) -> &'a str
    where
        T: Keyed,
        T: 'a,
    {
        unsafe { (*self.as_ptr()).payload.key() }
    }

    #[inline]
    unsafe fn parent(&self) -> Option<RawNode<T>> {
        unsafe { (*self.as_ptr()).parent }
    }

    #[inline]
    unsafe fn set_parent(&mut self, new_parent: Option<RawNode<T>>) {
        unsafe {
            (*self.as_ptr()).parent = new_parent;
        }
    }

    #[inline]
    pub(crate) unsafe fn left(&self) -> Option<RawNode<T>> {
        unsafe { (*self.as_ptr()).left }
    }

    #[inline]
    unsafe fn set_left(&mut self, new_left: Option<RawNode<T>>) {
        unsafe {
            (*self.as_ptr()).left = new_left;
        }
    }

    #[inline]
    pub(crate) unsafe fn right(&self) -> Option<RawNode<T>> {
        unsafe { (*self.as_ptr()).right }
    }

    #[inline]
    unsafe fn set_right(&mut self, new_right: Option<RawNode<T>>) {
        unsafe {
            (*self.as_ptr()).right = new_right;
        }
    }

    #[inline]
    unsafe fn child(&self, dir: Dir) -> Option<RawNode<T>> {
        match dir {
            Dir::Left => unsafe { self.left() },
            Dir::Right => unsafe { self.right() },
        }
    }

    #[inline]
    unsafe fn set_child(&mut self, dir: Dir, child: Option<RawNode<T>>) {
        match dir {
            Dir::Left => unsafe { self.set_left(child) },
            Dir::Right => unsafe { self.set_right(child) },
        }
    }

    #[inline]
    unsafe fn color(&self) -> Color {
        unsafe { (*self.as_ptr()).color }
    }

    #[inline]
    unsafe fn set_color(&mut self, new_color: Color) {
        unsafe { (*self.as_ptr()).color = new_color }
    }

    #[inline]
    pub(crate) unsafe fn is_red(&self) -> bool {
        unsafe { self.color().is_red() }
    }

    #[inline]
    unsafe fn has_red_child(&self) -> bool {
        unsafe {
            self.left().map(|n| n.color().is_red()).unwrap_or(false)
                || self.right().map(|n| n.color().is_red()).unwrap_or(false)
        }
    }

    #[inline]
    unsafe fn pos(&self) -> NodePos {
        let ptr = self.as_ptr();
        match unsafe { (*ptr).parent } {
            Some(p) => match unsafe { (p.left(), p.right()) } {
                (None, None) => unreachable!(),
                (None, Some(_)) => NodePos::Right,
                (Some(_), None) => NodePos::Left,
                (Some(left), Some(right)) => {
                    if ptr::eq(ptr, left.as_ptr()) {
                        NodePos::Left
                    } else {
                        assert!(ptr::eq(ptr, right.as_ptr()));
                        NodePos::Right
                    }
                }
            },
            None => NodePos::Root,
        }
    }

    /// Which child slot of its parent this node occupies.
    ///
    /// Asking for the direction of a node without a parent is a programming
    /// error.
    #[inline]
    unsafe fn dir(&self) -> Dir {
        match unsafe { self.pos() } {
            NodePos::Root => panic!("child-direction query on a node without a parent"),
            NodePos::Left => Dir::Left,
            NodePos::Right => Dir::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodePos {
    Root,
    Left,
    Right,
}

/// An ordered map over values that carry their own string ordering key.
///
/// Backed by a red-black tree: [`add`], [`find`] and [`remove`] run in
/// O(log n) and [`iter`] visits values in ascending key order. Duplicate keys
/// are rejected on insert — the value already stored wins.
///
/// The tree assumes exclusive access; it contains no synchronization and the
/// raw node links make it neither `Send` nor `Sync`.
///
/// [`add`]: RedBlackTree::add
/// [`find`]: RedBlackTree::find
/// [`remove`]: RedBlackTree::remove
/// [`iter`]: RedBlackTree::iter
pub struct RedBlackTree<T> {
    root: Option<RawNode<T>>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

impl<T> Drop for RedBlackTree<T> {
    fn drop(&mut self) {
        // TODO: handle panics in `T::drop`

        unsafe fn inner<T>(node: RawNode<T>) {
            if let Some(l) = unsafe { node.left() } {
                unsafe { inner(l) };
            }
            if let Some(r) = unsafe { node.right() } {
                unsafe { inner(r) };
            }
            let _: Box<Node<T>> = unsafe { Box::from_raw(node.as_ptr()) };
        }

        if let Some(root) = self.root.take() {
            self.len = 0;
            unsafe { inner(root) };
        }
    }
}

impl<T: Keyed> fmt::Debug for RedBlackTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct TreeDebug<'a, T> {
            root: RawNode<T>,
            marker: PhantomData<&'a Node<T>>,
        }

        impl<T: Keyed> fmt::Debug for TreeDebug<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut f = f.debug_list();

                let mut func = |node: RawNode<T>| {
                    f.entry(unsafe { node.as_ref() });
                };

                unsafe { inorder_for_each_core(self.root, &mut func) };
                f.finish()
            }
        }

        let mut f = f.debug_struct("RedBlackTree");
        f.field("len", &self.len);

        match self.root {
            None => {
                f.field("root", &None::<&str>);
                let nodes: &[&str] = &[];
                f.field("nodes", &nodes);
            }
            Some(root) => {
                f.field("root", &Some(unsafe { root.as_ref() }));
                f.field(
                    "nodes",
                    &TreeDebug {
                        root,
                        marker: PhantomData,
                    },
                );
            }
        }

        f.finish()
    }
}

unsafe fn inorder_for_each_core<T, F>(node: RawNode<T>, f: &mut F)
where
    F: FnMut(RawNode<T>),
{
    if let Some(l) = unsafe { node.left() } {
        unsafe { inorder_for_each_core(l, f) };
    }
    f(node);
    if let Some(r) = unsafe { node.right() } {
        unsafe { inorder_for_each_core(r, f) };
    }
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RedBlackTree<T> {
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            marker: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The payload at the root, or `None` when the tree is empty.
    ///
    /// Whatever sits at the root is an artifact of the rebalancing history,
    /// not a minimum or maximum; this is only an arbitrary-element peek.
    pub fn top(&self) -> Option<&T> {
        self.root.map(|node| unsafe { node.payload() })
    }

    /// In-order iteration: payloads in ascending key order.
    ///
    /// The iterator borrows the tree, so the tree cannot be structurally
    /// modified while one is live.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut stack = Vec::new();
        let mut cur = self.root;
        while let Some(node) = cur {
            stack.push(node);
            cur = unsafe { node.left() };
        }

        Iter {
            stack,
            marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn root_node(&self) -> Option<RawNode<T>> {
        self.root
    }

    /// Rotates `node` in direction `dir`.
    ///
    ///    p                         p
    ///    |                         |
    /// +-node--+                 +--up--+
    /// |       |       -->       |      |
    /// a    +--up--+         +-node-+   c
    ///      |      |         |      |
    ///      b      c         a      b
    ///
    /// (shown for `dir == Left`; a, b, c can be any subtrees). A pure
    /// structural edit: no color changes, no invariant checks — callers own
    /// the colors. The child opposite the rotation direction must exist.
    fn rotate(&mut self, mut node: RawNode<T>, dir: Dir) {
        unsafe {
            let mut up = node
                .child(dir.opposite())
                .expect("rotation requires a child opposite the rotation direction");

            // hand `up`'s inner subtree over to `node`
            let inner = up.child(dir);
            node.set_child(dir.opposite(), inner);
            if let Some(mut inner) = inner {
                inner.set_parent(Some(node));
            }

            // attach `up` to node's parent
            let parent = node.parent();
            up.set_parent(parent);
            match node.pos() {
                NodePos::Root => self.root = Some(up),
                NodePos::Left => parent.unwrap().set_left(Some(up)),
                NodePos::Right => parent.unwrap().set_right(Some(up)),
            }

            // attach `node` under `up`
            up.set_child(dir, Some(node));
            node.set_parent(Some(up));
        }
    }

    fn insert_fixup(&mut self, new_node: RawNode<T>) {
        let mut node = new_node;
        unsafe {
            loop {
                let Some(mut parent) = node.parent() else { break };
                if !parent.color().is_red() {
                    break;
                }
                debug_assert!(node.color().is_red());

                // `node` and its parent are the only red-red pair. A red
                // parent is never the root, so the grandparent exists and is
                // black.
                let side = parent.dir();
                let mut grand = parent.parent().unwrap();
                debug_assert!(grand.color().is_black());

                match grand.child(side.opposite()) {
                    Some(mut uncle) if uncle.color().is_red() => {
                        //     +--- g:b ---+               +--- g:r ---+
                        //     |           |               |           |
                        //  + p:r +     + u:r +   -->   + p:b +     + u:b +
                        //  |     |     |     |         |     |     |     |
                        // n:r    a     b     c        n:r    a     b     c
                        //
                        // Recoloring keeps every path's black count intact
                        // but may leave the grandparent red under another red
                        // node, so the repair restarts from there.
                        parent.set_color(Color::Black);
                        uncle.set_color(Color::Black);
                        grand.set_color(Color::Red);
                        node = grand;
                    }
                    _ => {
                        if node.dir() != side {
                            // zig-zag: rotate the parent in its own child
                            // direction so both reds line up on one side
                            self.rotate(parent, side);
                            mem::swap(&mut parent, &mut node);
                        }

                        //         +-- g:b --+             +---- p:b ----+
                        //         |         |             |             |
                        //     +- p:r -+     u    -->   + n:r +      + g:r +
                        //     |       |                |     |      |     |
                        //  + n:r +    c                a     b      c     u
                        //  |     |
                        //  a     b
                        //
                        // Fixes the one violation for good; no iteration.
                        parent.set_color(Color::Black);
                        grand.set_color(Color::Red);
                        self.rotate(grand, side.opposite());
                        break;
                    }
                }
            }

            if let Some(mut root) = self.root {
                root.set_color(Color::Black);
            }
        }
    }

    unsafe fn min_of(root: RawNode<T>) -> RawNode<T> {
        let mut x = root;
        while let Some(left) = unsafe { x.left() } {
            x = left;
        }

        x
    }

    fn remove_node(&mut self, node: RawNode<T>) -> T {
        unsafe {
            let doomed = match (node.left(), node.right()) {
                (Some(_), Some(right)) => {
                    // Two children: the payload is replaced by the in-order
                    // successor's, and the successor node — which cannot have
                    // a left child — is unlinked in this node's stead.
                    let successor = Self::min_of(right);
                    mem::swap(
                        &mut (*node.as_ptr()).payload,
                        &mut (*successor.as_ptr()).payload,
                    );
                    successor
                }
                _ => node,
            };

            self.unlink(doomed)
        }
    }

    /// Unlinks a node with at most one child and frees it, returning its
    /// payload.
    ///
    /// The fix-up must run while the node is still linked: it needs the
    /// node's original position and color to decide where the black-height
    /// deficit goes.
    unsafe fn unlink(&mut self, node: RawNode<T>) -> T {
        unsafe {
            debug_assert!(node.left().is_none() || node.right().is_none());
            self.remove_fixup(node);

            let child = node.left().or(node.right());
            self.replace_subtree(node, child);
            self.len -= 1;

            let node: Box<Node<T>> = Box::from_raw(node.as_ptr());
            node.payload
        }
    }

    /// Deletion fix-up, run on the node about to be spliced out.
    fn remove_fixup(&mut self, mut x: RawNode<T>) {
        unsafe {
            if x.color().is_red() {
                // unlinking a red node changes no path's black count
                return;
            }

            if let Some(mut child) = x.left().or(x.right()) {
                // The child is about to be spliced into x's place; it absorbs
                // the removed black level by turning black itself.
                debug_assert!(child.color().is_red());
                child.set_color(Color::Black);
                return;
            }

            // Black leaf: every path through it is about to lose one black
            // node, which only the ancestors can compensate.
            x.set_color(Color::DoublyBlack);
            self.bubble_up(x);
        }
    }

    /// Moves a doubly-black deficit towards the root until a local repair
    /// absorbs it.
    ///
    /// Each step pushes one black level from the children onto the parent:
    /// the parent gets blacker, both children get redder. The deficit node
    /// returns to plain black; the sibling's new color decides what happens
    /// next. A sibling at negative-red or a red sibling with a red child is
    /// repaired on the spot, consuming the parent's extra black. Otherwise
    /// the parent itself may now be doubly-black and the bubble repeats a
    /// level up. A doubly-black root is simply forced black — there is no
    /// level above it left to satisfy.
    fn bubble_up(&mut self, mut deficit: RawNode<T>) {
        unsafe {
            loop {
                debug_assert_eq!(deficit.color(), Color::DoublyBlack);
                let Some(mut parent) = deficit.parent() else {
                    deficit.set_color(Color::Black);
                    return;
                };
                let side = deficit.dir();
                let mut sibling = parent
                    .child(side.opposite())
                    .expect("doubly-black node without a sibling breaks black-height uniformity");

                parent.set_color(parent.color().blacker());
                deficit.set_color(deficit.color().redder());
                sibling.set_color(sibling.color().redder());

                match sibling.color() {
                    Color::NegativeRed => {
                        // the sibling was red a moment ago, so the parent is
                        // now doubly-black and the sibling's children are
                        // present and black
                        self.fix_negative_red(sibling);
                        return;
                    }
                    Color::Red if sibling.has_red_child() => {
                        self.fix_double_red(parent);
                        return;
                    }
                    _ => {}
                }

                if parent.color() == Color::DoublyBlack {
                    deficit = parent;
                } else {
                    return;
                }
            }
        }
    }

    /// Repairs a negative-red node left behind by a bubble step.
    ///
    /// Lifting the negative-red node's inner child to the top of the cluster
    /// restores proper colors everywhere at once:
    ///
    /// ```text
    ///     +---- p:bb ----+                   +---- in:b ----+
    ///     |              |                   |              |
    ///     d         +- s:nr -+     -->   +- p:b -+     +- s:b -+
    ///               |        |           |       |     |       |
    ///           +- in:b -+  out:b        d       a     b     out:r
    ///           |        |
    ///           a        b
    /// ```
    ///
    /// (mirrored when the deficit `d` sits on the right). Reddening the outer
    /// child can put two reds next to each other, which the double-red repair
    /// then clears.
    fn fix_negative_red(&mut self, mut s: RawNode<T>) {
        unsafe {
            let mut p = s.parent().unwrap();
            debug_assert_eq!(p.color(), Color::DoublyBlack);

            let side = s.dir();
            let mut inner = s
                .child(side.opposite())
                .expect("negative-red node must have two children");
            let mut outer = s
                .child(side)
                .expect("negative-red node must have two children");
            debug_assert!(inner.color().is_black() && outer.color().is_black());

            self.rotate(s, side);
            self.rotate(p, side.opposite());

            inner.set_color(Color::Black);
            p.set_color(Color::Black);
            s.set_color(Color::Black);
            outer.set_color(Color::Red);

            if outer.has_red_child() {
                self.fix_double_red(s);
            }
        }
    }

    /// Restructures a red node with a red child into a locally balanced
    /// triple.
    ///
    /// The three nodes — `g`, its red child and the red grandchild — are
    /// reassembled with the middle key of the triple on top, holding `g`'s
    /// color one level redder, and the outer two black:
    ///
    /// ```text
    ///     +--- g ---+                  +--- m ---+
    ///     |         |                  |         |
    ///     a     +- c:r -+     -->   +- g:b -+ +- n:b -+
    ///           |       |           |       | |       |
    ///           b   +- n:r -+       a       b d       e
    ///               |       |
    ///               d       e
    /// ```
    ///
    /// where `m` holds `g.color().redder()`. A doubly-black `g` comes out
    /// black, which is how a bubble step's deficit gets absorbed; a plain
    /// black `g` comes out red, which can recreate the same shape one level
    /// up — hence the loop.
    fn fix_double_red(&mut self, g: RawNode<T>) {
        let mut g = g;
        unsafe {
            loop {
                let (c, side) =
                    Self::red_chain_start(g).expect("double-red repair without a red-red pair");

                let straight = c
                    .child(side)
                    .map(|n| n.color().is_red())
                    .unwrap_or(false);
                let mut middle = if straight {
                    c
                } else {
                    // zig-zag: rotate the red child in its own direction so
                    // the chain lines up before the final rotation
                    self.rotate(c, side);
                    g.child(side).unwrap()
                };

                let g_color = g.color();
                self.rotate(g, side.opposite());
                middle.set_color(g_color.redder());
                middle.left().unwrap().set_color(Color::Black);
                middle.right().unwrap().set_color(Color::Black);

                match middle.parent() {
                    Some(parent) if middle.color().is_red() && parent.color().is_red() => {
                        g = parent.parent().expect("red node cannot be the root");
                    }
                    _ => return,
                }
            }
        }
    }

    /// The red child of `g` that owns a red child of its own, preferring the
    /// straight-line chain when both of `g`'s children qualify.
    unsafe fn red_chain_start(g: RawNode<T>) -> Option<(RawNode<T>, Dir)> {
        unsafe {
            for side in [Dir::Left, Dir::Right] {
                if let Some(c) = g.child(side) {
                    if c.color().is_red() && c.has_red_child() {
                        return Some((c, side));
                    }
                }
            }

            None
        }
    }

    /// Replaces subtree `old` with subtree `new`.
    unsafe fn replace_subtree(&mut self, old: RawNode<T>, new: Option<RawNode<T>>) {
        unsafe {
            match old.pos() {
                NodePos::Root => self.root = new,
                NodePos::Left => old.parent().unwrap().set_left(new),
                NodePos::Right => old.parent().unwrap().set_right(new),
            }

            if let Some(mut new) = new {
                new.set_parent(old.parent());
            }
        }
    }
}

impl<T: Keyed> RedBlackTree<T> {
    /// Inserts `payload` at the position its key orders it to.
    ///
    /// If a value with an equal key is already stored, the tree keeps it and
    /// `payload` is dropped.
    pub fn add(&mut self, payload: T) {
        // move left/right down the tree until we find an empty slot
        let mut link = None;
        let mut cur = self.root;
        while let Some(node) = cur {
            match payload.key().cmp(unsafe { node.key() }) {
                Ordering::Less => {
                    link = Some((node, Dir::Left));
                    cur = unsafe { node.left() };
                }
                Ordering::Equal => return,
                Ordering::Greater => {
                    link = Some((node, Dir::Right));
                    cur = unsafe { node.right() };
                }
            }
        }

        // a fresh node is always a red leaf
        let new_node = RawNode::from_node(Node {
            payload,
            color: Color::Red,
            parent: link.map(|(parent, _)| parent),
            left: None,
            right: None,
        });
        match link {
            Some((mut parent, dir)) => unsafe { parent.set_child(dir, Some(new_node)) },
            None => self.root = Some(new_node),
        }

        self.len += 1;
        self.insert_fixup(new_node);
    }

    /// Looks up the payload stored under `key`.
    pub fn find(&self, key: &str) -> Option<&T> {
        self.lookup(key).map(|node| unsafe { node.payload() })
    }

    /// Removes and returns the payload stored under `key`.
    ///
    /// Removing a key that is not stored is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let node = self.lookup(key)?;
        let payload = self.remove_node(node);

        if let Some(mut root) = self.root {
            unsafe { root.set_color(Color::Black) };
        }

        if cfg!(debug_assertions) {
            // no transient repair level may survive a remove
            unsafe fn check<T>(node: RawNode<T>) {
                unsafe {
                    assert!(
                        matches!(node.color(), Color::Red | Color::Black),
                        "transient color left behind by remove"
                    );
                    if let Some(l) = node.left() {
                        check(l);
                    }
                    if let Some(r) = node.right() {
                        check(r);
                    }
                }
            }
            if let Some(root) = self.root {
                unsafe { check(root) };
            }
        }

        Some(payload)
    }

    fn lookup(&self, key: &str) -> Option<RawNode<T>> {
        let mut cur = self.root;
        while let Some(node) = cur {
            cur = match key.cmp(unsafe { node.key() }) {
                Ordering::Less => unsafe { node.left() },
                Ordering::Equal => return Some(node),
                Ordering::Greater => unsafe { node.right() },
            };
        }

        None
    }
}

/// Lazy in-order iterator over a tree's payloads, ascending by key.
///
/// Holds a shared borrow of the tree for its whole lifetime, so a structural
/// mutation while an iterator is live does not compile.
pub struct Iter<'a, T> {
    stack: Vec<RawNode<T>>,
    marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        unsafe {
            // the popped node's left subtree is already exhausted; queue the
            // left spine of its right subtree before yielding it
            let mut cur = node.right();
            while let Some(n) = cur {
                self.stack.push(n);
                cur = n.left();
            }

            Some(node.payload())
        }
    }
}
