//! Peripheral views of a tree: Graphviz export and plain key listings.
//!
//! Everything here consumes the core's iteration and node inspection; the
//! tree itself never writes to any output, all sinks are injected.

use std::io::{self, Write};

use crate::red_black_tree::{Keyed, RawNode, RedBlackTree};

/// Renders the tree in the DOT graph description language.
///
/// Every stored node becomes a vertex drawn in the node's color. Absent
/// children show up as numbered point-shaped vertices, so the virtual black
/// leaves of the tree are visible in the picture. An empty tree renders as an
/// empty digraph.
pub fn dot_graph<T: Keyed>(tree: &RedBlackTree<T>) -> String {
    let mut lines = vec![String::from("digraph BST {")];
    if let Some(root) = tree.root_node() {
        unsafe { node_dot(root, &mut lines) };
    }
    lines.push(String::from("}"));

    lines.join("\n")
}

/// Writes the DOT rendering of the tree to `out`.
pub fn dot_write<T, W>(tree: &RedBlackTree<T>, out: &mut W) -> io::Result<()>
where
    T: Keyed,
    W: Write,
{
    out.write_all(dot_graph(tree).as_bytes())?;
    out.write_all(b"\n")
}

/// Writes every stored key in ascending order, one per line.
pub fn write_keys<T, W>(tree: &RedBlackTree<T>, out: &mut W) -> io::Result<()>
where
    T: Keyed,
    W: Write,
{
    for payload in tree.iter() {
        writeln!(out, "{}", payload.key())?;
    }

    Ok(())
}

unsafe fn node_dot<T: Keyed>(node: RawNode<T>, lines: &mut Vec<String>) {
    unsafe {
        let key = node.key();
        let color = if node.is_red() { "red" } else { "black" };
        lines.push(format!("    {key} [color=\"{color}\" fontcolor=\"{color}\"];"));

        for child in [node.left(), node.right()] {
            match child {
                Some(child) => {
                    lines.push(format!("    {key} -> {};", child.key()));
                    node_dot(child, lines);
                }
                None => {
                    let n = lines.len();
                    lines.push(format!("    null{n} [shape=point];"));
                    lines.push(format!("    {key} -> null{n};"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf {
        key: String,
    }

    impl Keyed for Leaf {
        fn key(&self) -> &str {
            &self.key
        }
    }

    fn tree_of(keys: &[&str]) -> RedBlackTree<Leaf> {
        let mut tree = RedBlackTree::new();
        for key in keys {
            tree.add(Leaf { key: (*key).into() });
        }
        tree
    }

    #[test]
    fn empty_graph() {
        assert_eq!(dot_graph(&tree_of(&[])), "digraph BST {\n}");
    }

    #[test]
    fn three_node_graph() {
        // "C", "A", "B" settles as black B on top with red A and C below
        let tree = tree_of(&["C", "A", "B"]);
        let expected = "\
digraph BST {
    B [color=\"black\" fontcolor=\"black\"];
    B -> A;
    A [color=\"red\" fontcolor=\"red\"];
    null4 [shape=point];
    A -> null4;
    null6 [shape=point];
    A -> null6;
    B -> C;
    C [color=\"red\" fontcolor=\"red\"];
    null10 [shape=point];
    C -> null10;
    null12 [shape=point];
    C -> null12;
}";
        assert_eq!(dot_graph(&tree), expected);
    }

    #[test]
    fn vertex_per_key() {
        let keys = ["04", "01", "03", "02", "06", "05"];
        let dot = dot_graph(&tree_of(&keys));
        for key in keys {
            let vertices = dot
                .lines()
                .filter(|line| line.trim_start().starts_with(&format!("{key} [")))
                .count();
            assert_eq!(vertices, 1, "key {key} must appear as exactly one vertex");
        }
    }

    #[test]
    fn dot_write_matches_string() {
        let tree = tree_of(&["B", "A", "C"]);
        let mut out = Vec::new();
        dot_write(&tree, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), dot_graph(&tree) + "\n");
    }

    #[test]
    fn key_listing() {
        let tree = tree_of(&["C", "A", "B"]);
        let mut out = Vec::new();
        write_keys(&tree, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "A\nB\nC\n");
    }
}
