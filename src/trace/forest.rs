//! Trace forest reconstruction.
//!
//! `TraceMessage`s name their parent by id, and the protocol makes no
//! promise about arrival order — a child can show up before its parent.
//! [`TraceForest`] absorbs updates in any order: children whose parent has
//! not been seen yet are parked in a bounded orphan buffer and reattached
//! when the parent arrives. If the buffer overflows, the oldest orphan is
//! promoted to a root so a lost parent degrades the display instead of
//! growing memory without bound.

use std::collections::{HashMap, VecDeque};

use crate::config::BridgeConfig;
use crate::constants::DEFAULT_ORPHAN_CAPACITY;
use crate::messages::MessageBody;
use crate::trace::NodeAttr;

/// One reconstructed node of the trace forest.
#[derive(Debug, Clone)]
pub struct TraceNode {
    /// Identity of this node.
    pub trace_id: u64,
    /// Parent id as transmitted. Retained even after an orphan promotion,
    /// so the original linkage stays inspectable.
    pub parent_trace_id: Option<u64>,
    /// Latest visual descriptor for the node (last write wins).
    pub node_attr: Option<NodeAttr>,
    children: Vec<u64>,
}

impl TraceNode {
    /// Ids of the children attached so far, in arrival order.
    pub fn children(&self) -> &[u64] {
        &self.children
    }
}

/// Incremental assembler for the forest implied by trace messages.
#[derive(Debug)]
pub struct TraceForest {
    nodes: HashMap<u64, TraceNode>,
    roots: Vec<u64>,
    orphans: VecDeque<u64>,
    orphan_capacity: usize,
}

impl TraceForest {
    /// Forest with the default orphan buffer capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ORPHAN_CAPACITY)
    }

    /// Forest with an explicit orphan buffer capacity.
    pub fn with_capacity(orphan_capacity: usize) -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            orphans: VecDeque::new(),
            orphan_capacity,
        }
    }

    /// Forest configured from a [`BridgeConfig`].
    pub fn with_config(config: &BridgeConfig) -> Self {
        Self::with_capacity(config.orphan_capacity)
    }

    /// Absorb one trace update.
    ///
    /// A repeated `trace_id` updates the stored attribute (last write
    /// wins); linkage is never rewired — the protocol has no
    /// update-in-place semantics for structure.
    pub fn observe(
        &mut self,
        trace_id: u64,
        parent_trace_id: Option<u64>,
        node_attr: Option<NodeAttr>,
    ) {
        if let Some(existing) = self.nodes.get_mut(&trace_id) {
            if node_attr.is_some() {
                existing.node_attr = node_attr;
            }
            return;
        }

        let node = TraceNode {
            trace_id,
            parent_trace_id,
            node_attr,
            children: Vec::new(),
        };
        self.nodes.insert(trace_id, node);

        match parent_trace_id {
            None => self.roots.push(trace_id),
            Some(parent) if parent == trace_id => {
                // Self-referential linkage can never resolve.
                log::warn!("trace node {trace_id} names itself as parent; treating as root");
                self.roots.push(trace_id);
            }
            Some(parent) => {
                if self.nodes.contains_key(&parent) {
                    self.attach(parent, trace_id);
                } else {
                    self.orphans.push_back(trace_id);
                    self.enforce_orphan_capacity();
                }
            }
        }

        self.reattach_orphans_of(trace_id);
    }

    /// Absorb a message if it is a trace update.
    ///
    /// Returns true when the body was a `TraceMessage`; every other
    /// variant is ignored and returns false.
    pub fn apply(&mut self, body: &MessageBody) -> bool {
        if let MessageBody::TraceMessage {
            trace_id,
            parent_trace_id,
            node_attr,
        } = body
        {
            self.observe(*trace_id, *parent_trace_id, node_attr.clone());
            true
        } else {
            false
        }
    }

    /// Node lookup by id.
    pub fn get(&self, trace_id: u64) -> Option<&TraceNode> {
        self.nodes.get(&trace_id)
    }

    /// Root ids in the order they became roots.
    ///
    /// Includes orphans promoted by buffer overflow.
    pub fn roots(&self) -> &[u64] {
        &self.roots
    }

    /// Number of nodes absorbed so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of children currently waiting for their parent.
    pub fn orphan_count(&self) -> usize {
        self.orphans.len()
    }

    fn attach(&mut self, parent: u64, child: u64) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    /// Move buffered orphans whose parent just arrived under that parent.
    fn reattach_orphans_of(&mut self, parent: u64) {
        let mut remaining = VecDeque::with_capacity(self.orphans.len());
        while let Some(orphan) = self.orphans.pop_front() {
            let waiting_for = self.nodes.get(&orphan).and_then(|n| n.parent_trace_id);
            if waiting_for == Some(parent) {
                self.attach(parent, orphan);
            } else {
                remaining.push_back(orphan);
            }
        }
        self.orphans = remaining;
    }

    /// Promote the oldest orphans to roots until the buffer fits.
    fn enforce_orphan_capacity(&mut self) {
        while self.orphans.len() > self.orphan_capacity {
            if let Some(orphan) = self.orphans.pop_front() {
                log::warn!(
                    "orphan buffer full; rendering trace node {orphan} as a root"
                );
                self.roots.push(orphan);
            }
        }
    }
}

impl Default for TraceForest {
    fn default() -> Self {
        Self::new()
    }
}
