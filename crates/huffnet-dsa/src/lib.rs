#![no_std]
extern crate alloc;

pub mod tree;
pub mod code;

pub use tree::{HuffmanTree, Node, NodeRef, LEAF_COUNT, NODE_COUNT};
pub use code::{Code, CodeTable, LITERAL_THRESHOLD};
