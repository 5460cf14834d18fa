//! Command-tree model
//!
//! Commands form an owned tree: every node carries its own descriptions, flag
//! declarations, and children, and the whole tree is built up front and passed
//! into [`crate::execute`]. There is no global registry.
//!
//! Flags declared on a node are "local" to it and visible to every descendant
//! as "inherited", so shared switches only need to be declared once near the
//! root.

pub mod flag;
pub mod node;
pub mod resolve;
