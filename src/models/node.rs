//! Project tree nodes and their construction from untrusted data.

use serde::{Deserialize, Serialize};

use super::validator;
use crate::error::{Error, Result};

/// Id given to the root of a freshly created project.
pub const ROOT_ID: &str = "root";

/// A single element of a project tree.
///
/// Children are owned exclusively by their parent and keep their insertion
/// order. Every way of building a node with children (constructors,
/// deserialization, [`MbirdNode::from_value`]) runs the acyclicity check on the
/// whole structure first, so a tree where an id recurs among its own
/// descendants can never be observed.
///
/// A node is *stale* until it has been regenerated; new nodes start stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct MbirdNode {
    id: String,
    is_stale: bool,
    children: Vec<MbirdNode>,
}

/// Untrusted node data as it arrives from disk or from a request body.
#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(default = "default_stale")]
    is_stale: bool,
    #[serde(default)]
    children: Vec<RawNode>,
}

fn default_stale() -> bool {
    true
}

impl RawNode {
    /// Builds the owned structure without checking it. Callers must validate
    /// before handing the result out.
    fn into_unchecked(self) -> MbirdNode {
        MbirdNode {
            id: self.id,
            is_stale: self.is_stale,
            children: self
                .children
                .into_iter()
                .map(RawNode::into_unchecked)
                .collect(),
        }
    }
}

impl TryFrom<RawNode> for MbirdNode {
    type Error = Error;

    fn try_from(raw: RawNode) -> Result<Self> {
        let node = raw.into_unchecked();
        validator::check_acyclic(&node)?;
        Ok(node)
    }
}

impl MbirdNode {
    /// A stale leaf node.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_stale: true,
            children: Vec::new(),
        }
    }

    /// A stale node owning `children`, rejected if the result contains a cycle.
    ///
    /// The check walks the whole new subtree, so building a large tree one
    /// level at a time costs quadratic time overall. Parse deep trees in one
    /// go with [`MbirdNode::from_value`] instead.
    pub fn with_children(id: impl Into<String>, children: Vec<MbirdNode>) -> Result<Self> {
        let node = Self {
            id: id.into(),
            is_stale: true,
            children,
        };
        validator::check_acyclic(&node)?;
        Ok(node)
    }

    /// Sets this node's own staleness flag. Children are unaffected.
    pub fn stale(mut self, is_stale: bool) -> Self {
        self.is_stale = is_stale;
        self
    }

    /// Parses and validates an untyped JSON value.
    ///
    /// `id` is required; `is_stale` defaults to `true` and `children` to empty.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawNode = serde_json::from_value(value).map_err(Error::Malformed)?;
        raw.try_into()
    }

    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawNode = serde_json::from_str(json).map_err(Error::Malformed)?;
        raw.try_into()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_stale(&self) -> bool {
        self.is_stale
    }

    pub fn children(&self) -> &[MbirdNode] {
        &self.children
    }

    /// Marks this node and every descendant as up to date.
    pub fn regenerate(&mut self) {
        self.is_stale = false;
        for child in &mut self.children {
            child.regenerate();
        }
    }

    /// Pre-order traversal over this node and all of its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    pub fn stale_count(&self) -> usize {
        self.walk().filter(|node| node.is_stale).count()
    }
}

/// Iterator returned by [`MbirdNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a MbirdNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a MbirdNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
