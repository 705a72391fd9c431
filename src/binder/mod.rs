//! Parent links for a parsed tree.
//!
//! The AST owns its children and has no back references. [`bind`] walks a
//! [`Program`](crate::ast::statements::Program) once and records, for every
//! reachable node, the node it hangs from. Nodes are identified by their
//! pre-order position in the walk, so the table is an index and never a
//! second owner of the tree.

pub mod binder;

#[cfg(test)]
mod tests;
