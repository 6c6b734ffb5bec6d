use alloc::vec::Vec;
use core::fmt;

/// Number of leaves: one per byte value.
pub const LEAF_COUNT: usize = 256;
/// Leaves plus the 255 merge nodes created during construction.
pub const NODE_COUNT: usize = 2 * LEAF_COUNT - 1;

/// An index into the node arena.
///
/// Leaves occupy `0..256`, merge nodes `256..511`. The root is always the last
/// node created (`510`). Absence is encoded with a reserved sentinel rather than
/// a separate `Option` so a `Node` stays 16 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(u16);

impl NodeRef {
    /// Sentinel for "no node" (no parent, no child).
    pub const NONE: NodeRef = NodeRef(u16::MAX);
    /// The final merge node.
    pub const ROOT: NodeRef = NodeRef((NODE_COUNT - 1) as u16);

    #[inline(always)]
    pub const fn leaf(symbol: u8) -> Self {
        NodeRef(symbol as u16)
    }

    /// Returns `None` for indices outside the arena.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NODE_COUNT {
            Some(NodeRef(index as u16))
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn is_none(self) -> bool {
        self.0 == u16::MAX
    }

    /// The byte value this reference stands for, if it names a leaf.
    #[inline(always)]
    pub const fn as_symbol(self) -> Option<u8> {
        if (self.0 as usize) < LEAF_COUNT {
            Some(self.0 as u8)
        } else {
            None
        }
    }

    #[inline(always)]
    fn get(self) -> Option<Self> {
        if self.is_none() { None } else { Some(self) }
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("NodeRef(NONE)")
        } else {
            write!(f, "NodeRef({})", self.0)
        }
    }
}

/// A node in the flat 511-entry arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    /// Leaf weight, or the sum of both children for merge nodes.
    /// Summed as `u64` so any table of `u32` weights builds without overflow.
    pub frequency: u64,
    pub parent: NodeRef,
    pub left: NodeRef,
    pub right: NodeRef,
}

static_assertions::assert_eq_size!(Node, [u8; 16]);

impl Node {
    const fn leaf(frequency: u64) -> Self {
        Self {
            frequency,
            parent: NodeRef::NONE,
            left: NodeRef::NONE,
            right: NodeRef::NONE,
        }
    }

    /// A node with neither child. Every leaf, and nothing else in a finished tree.
    #[inline(always)]
    pub const fn is_childless(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// The fixed-shape Huffman tree built from a static frequency table.
///
/// Construction is deterministic and bit-for-bit reproducible: two trees built
/// from the same table are identical, which is what keeps independently built
/// encoders and decoders wire compatible.
#[derive(Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
}

impl fmt::Debug for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuffmanTree")
            .field("nodes_len", &self.nodes.len())
            .field("root_frequency", &self.nodes[NodeRef::ROOT.index()].frequency)
            .finish()
    }
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lightest unparented nodes.
    ///
    /// ## Tie-break
    /// A single left-to-right scan keeps two running picks. A later candidate
    /// only displaces the *heavier* of the two picks (the second pick when they
    /// weigh the same), and only when it is strictly lighter. The first pick
    /// becomes the right child of the new node, the second pick the left child.
    /// Both rules shape the code lengths and must not be replaced with a
    /// priority queue.
    ///
    /// ## Performance
    /// O(n²) over 511 nodes, run once per codec.
    pub fn build(frequencies: &[u32; LEAF_COUNT]) -> Self {
        let mut nodes = Vec::with_capacity(NODE_COUNT);
        nodes.extend(frequencies.iter().map(|&f| Node::leaf(u64::from(f))));

        while nodes.len() < NODE_COUNT {
            let (first, second) = Self::lightest_pair(&nodes);
            let merged = NodeRef(nodes.len() as u16);
            let frequency = nodes[first.index()].frequency + nodes[second.index()].frequency;

            nodes[first.index()].parent = merged;
            nodes[second.index()].parent = merged;
            nodes.push(Node {
                frequency,
                parent: NodeRef::NONE,
                left: second,
                right: first,
            });
        }

        debug_assert!(nodes[NODE_COUNT - 2].parent == NodeRef::ROOT);
        debug_assert!(nodes[NODE_COUNT - 1].parent.is_none());

        Self { nodes }
    }

    /// Scans the unparented nodes for the two smallest weights.
    ///
    /// While fewer than `NODE_COUNT` nodes exist there are `511 - len >= 2`
    /// unparented nodes, so both picks are always filled.
    fn lightest_pair(nodes: &[Node]) -> (NodeRef, NodeRef) {
        let mut first = NodeRef::NONE;
        let mut second = NodeRef::NONE;

        for (idx, node) in nodes.iter().enumerate() {
            if !node.parent.is_none() {
                continue;
            }
            let candidate = NodeRef(idx as u16);
            if first.is_none() {
                first = candidate;
                continue;
            }
            if second.is_none() {
                second = candidate;
                continue;
            }

            let first_freq = nodes[first.index()].frequency;
            let second_freq = nodes[second.index()].frequency;
            if first_freq > second_freq {
                if node.frequency < first_freq {
                    first = candidate;
                }
            } else if node.frequency < second_freq {
                second = candidate;
            }
        }

        (first, second)
    }

    #[inline(always)]
    pub fn root(&self) -> NodeRef {
        NodeRef::ROOT
    }

    #[inline(always)]
    pub fn node(&self, node: NodeRef) -> Option<&Node> {
        self.nodes.get(node.index())
    }

    /// All 511 nodes in index order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline(always)]
    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node)?.parent.get()
    }

    #[inline(always)]
    pub fn left(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node)?.left.get()
    }

    #[inline(always)]
    pub fn right(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node)?.right.get()
    }

    /// Child taken for a transmitted bit: `false` is left, `true` is right.
    #[inline(always)]
    pub fn child(&self, node: NodeRef, bit: bool) -> Option<NodeRef> {
        if bit { self.right(node) } else { self.left(node) }
    }

    /// `true` when the node has no children. Out-of-arena references count as
    /// childless so a walk can never continue from them.
    #[inline(always)]
    pub fn is_leaf(&self, node: NodeRef) -> bool {
        self.node(node).map_or(true, Node::is_childless)
    }

    pub fn frequency(&self, node: NodeRef) -> u64 {
        self.node(node).map_or(0, |n| n.frequency)
    }

    /// Number of edges between a leaf and the root.
    pub fn depth(&self, symbol: u8) -> usize {
        let mut depth = 0;
        let mut node = NodeRef::leaf(symbol);
        while let Some(parent) = self.parent(node) {
            depth += 1;
            node = parent;
        }
        depth
    }
}


#[cfg(kani)]
mod proofs {
    use super::*;

    #[kani::proof]
    fn prove_child_lookup_stays_in_arena() {
        let tree = HuffmanTree::build(&[1; LEAF_COUNT]);
        let raw: u16 = kani::any();
        let bit: bool = kani::any();

        // Any reference, including the sentinel and garbage indices, resolves
        // to either a valid arena index or `None`.
        if let Some(child) = tree.child(NodeRef(raw), bit) {
            assert!(child.index() < NODE_COUNT);
        }
    }
}
