//! Acyclicity check for node trees.
//!
//! The tree is flattened into an index arena and searched depth-first with
//! three-colour marking: ids on the current path are *visiting*, nodes whose
//! subtree has been fully explored are *visited*. Reaching an id that is
//! already on the path means the id recurs among its own descendants.

use std::collections::HashSet;

use super::MbirdNode;
use crate::error::{Error, Result};

struct Slot<'a> {
    id: &'a str,
    children: Vec<usize>,
}

/// Fails with [`Error::Cycle`] naming the first id found repeating along a
/// root-to-leaf path.
pub(crate) fn check_acyclic(root: &MbirdNode) -> Result<()> {
    let mut arena = Vec::new();
    flatten(root, &mut arena);

    let mut search = CycleSearch {
        arena: &arena,
        visiting: HashSet::new(),
        visited: vec![false; arena.len()],
    };
    for index in 0..arena.len() {
        if !search.visited[index] {
            search.visit(index)?;
        }
    }
    Ok(())
}

fn flatten<'a>(node: &'a MbirdNode, arena: &mut Vec<Slot<'a>>) -> usize {
    let index = arena.len();
    arena.push(Slot {
        id: node.id(),
        children: Vec::with_capacity(node.children().len()),
    });
    for child in node.children() {
        let child_index = flatten(child, arena);
        arena[index].children.push(child_index);
    }
    index
}

struct CycleSearch<'a> {
    arena: &'a [Slot<'a>],
    visiting: HashSet<&'a str>,
    visited: Vec<bool>,
}

impl<'a> CycleSearch<'a> {
    fn visit(&mut self, index: usize) -> Result<()> {
        let arena = self.arena;
        let slot = &arena[index];

        if self.visiting.contains(slot.id) {
            return Err(Error::Cycle {
                id: slot.id.to_string(),
            });
        }
        if self.visited[index] {
            return Ok(());
        }

        self.visiting.insert(slot.id);
        for &child in &slot.children {
            self.visit(child)?;
        }
        self.visiting.remove(slot.id);
        self.visited[index] = true;
        Ok(())
    }
}
