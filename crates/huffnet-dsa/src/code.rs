use core::fmt;

use crate::tree::{HuffmanTree, NodeRef, LEAF_COUNT};

/// Tree depth at which a symbol is sent as a raw byte instead.
pub const LITERAL_THRESHOLD: u8 = 8;

/// The transmitted form of one symbol: `len` bits of `bits`, least-significant
/// bit first.
///
/// Bit 0 is the control bit. `1` means a tree walk follows, `0` means the next
/// eight bits are the byte itself.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Code {
    bits: u16,
    len: u8,
}

impl Code {
    /// Control bit `0` followed by the literal byte.
    const fn literal(symbol: u8) -> Self {
        Self {
            bits: (symbol as u16) << 1,
            len: LITERAL_THRESHOLD + 1,
        }
    }

    /// Control bit `1` followed by a tree walk of `depth` bits.
    const fn walk(path: u16, depth: u8) -> Self {
        Self {
            bits: (path << 1) | 1,
            len: depth + 1,
        }
    }

    #[inline(always)]
    pub const fn bits(self) -> u16 {
        self.bits
    }

    /// Length in bits, control bit included.
    #[inline(always)]
    pub const fn len(self) -> u8 {
        self.len
    }

    #[inline(always)]
    pub const fn is_literal(self) -> bool {
        self.bits & 1 == 0
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({:0width$b}/{})", self.bits, self.len, width = self.len as usize)
    }
}

/// Per-symbol codes derived once from a finished tree.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Code; LEAF_COUNT],
    depths: [u8; LEAF_COUNT],
}

impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeTable")
            .field("literal_symbols", &self.literal_count())
            .field("shortest", &self.codes.iter().map(|c| c.len).min())
            .finish()
    }
}

impl CodeTable {
    /// Walks every leaf up to the root.
    ///
    /// Each step shifts the running value left and ORs in `1` for a right child,
    /// `0` for a left child. The step taken at the leaf ends up most significant
    /// and the step below the root least significant, so the value is already
    /// in transmission order: read LSB-first, it is the root-to-leaf path.
    ///
    /// Symbols at depth `LITERAL_THRESHOLD` or deeper are sent as literals.
    pub fn derive(tree: &HuffmanTree) -> Self {
        let mut codes = [Code::default(); LEAF_COUNT];
        let mut depths = [0u8; LEAF_COUNT];

        for symbol in 0..=u8::MAX {
            let mut path: u16 = 0;
            let mut depth: usize = 0;
            let mut node = NodeRef::leaf(symbol);

            while let Some(parent) = tree.parent(node) {
                let is_right = tree.right(parent) == Some(node);
                debug_assert!(is_right || tree.left(parent) == Some(node));
                // Paths deeper than 16 spill out of `path`; they are literals anyway.
                path = (path << 1) | u16::from(is_right);
                depth += 1;
                node = parent;
            }

            let depth = depth.min(u8::MAX as usize) as u8;
            depths[symbol as usize] = depth;
            codes[symbol as usize] = if depth >= LITERAL_THRESHOLD {
                Code::literal(symbol)
            } else {
                Code::walk(path, depth)
            };
        }

        Self { codes, depths }
    }

    #[inline(always)]
    pub fn code(&self, symbol: u8) -> Code {
        self.codes[symbol as usize]
    }

    /// Depth of the symbol's leaf, before the literal fallback.
    pub fn raw_len(&self, symbol: u8) -> u8 {
        self.depths[symbol as usize]
    }

    pub fn is_literal(&self, symbol: u8) -> bool {
        self.code(symbol).is_literal()
    }

    pub fn literal_count(&self) -> usize {
        self.codes.iter().filter(|c| c.is_literal()).count()
    }

    /// `(symbol, code)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes.iter().enumerate().map(|(s, &c)| (s as u8, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_table_sends_every_symbol_literally() {
        let table = CodeTable::derive(&HuffmanTree::build(&[1; LEAF_COUNT]));
        assert_eq!(table.literal_count(), LEAF_COUNT);
        for (symbol, code) in table.iter() {
            assert_eq!(code.len(), 9);
            assert_eq!(code.bits(), u16::from(symbol) << 1);
            assert_eq!(table.raw_len(symbol), 8);
        }
    }

    #[test]
    fn dominant_symbol_gets_one_bit_path() {
        let mut freqs = [0u32; LEAF_COUNT];
        freqs[b'a' as usize] = 1_000;
        let tree = HuffmanTree::build(&freqs);
        let table = CodeTable::derive(&tree);

        let code = table.code(b'a');
        assert_eq!(table.raw_len(b'a'), 1);
        assert_eq!(code.len(), 2);
        assert!(!code.is_literal());

        // The path bit says which side of the root the leaf hangs on.
        let expected = u16::from(tree.right(tree.root()) == Some(NodeRef::leaf(b'a')));
        assert_eq!(code.bits(), (expected << 1) | 1);
    }

    #[test]
    fn walk_codes_replay_to_their_leaf() {
        let mut freqs = [0u32; LEAF_COUNT];
        for (i, f) in freqs.iter_mut().enumerate().take(12) {
            *f = 4_000 >> i;
        }
        let tree = HuffmanTree::build(&freqs);
        let table = CodeTable::derive(&tree);

        for (symbol, code) in table.iter().filter(|(_, c)| !c.is_literal()) {
            let mut node = tree.root();
            for step in 1..code.len() {
                let bit = (code.bits() >> step) & 1 == 1;
                node = tree.child(node, bit).expect("path leaves the tree");
            }
            assert_eq!(node, NodeRef::leaf(symbol));
        }
    }
}
