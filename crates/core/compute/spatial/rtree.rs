//! Hilbert R-tree over lat/lon bounding boxes.
//!
//! Entries are keyed by the Hilbert distance of their box's lower-left corner
//! and kept in key order across the leaves. Every node tracks the tight union
//! of its children's boxes and its largest Hilbert value (LHV), which steers
//! insertion: an entry descends into the first child whose LHV is at least the
//! entry's key, or the last child when no such child exists.
//!
//! Nodes and entries live in arenas addressed by stable indices, so the tree
//! holds no pointers and the payload type `T` is stored exactly once.
//!
//! # Example
//!
//! ```rust
//! use picket::compute::spatial::HilbertRTree;
//! use picket::config::IndexConfig;
//! use picket_types::{BoundingBox, Coordinate};
//!
//! let mut tree = HilbertRTree::new(IndexConfig::default())?;
//! let bbox = BoundingBox::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0))?;
//! tree.insert(bbox, "square");
//!
//! let query = BoundingBox::from_coordinate(Coordinate::new(0.5, 0.5));
//! assert_eq!(tree.search(&query), vec![&"square"]);
//! # Ok::<(), picket::PicketError>(())
//! ```

use crate::compute::spatial::hilbert::HilbertCurve;
use crate::config::IndexConfig;
use crate::error::Result;
use picket_types::BoundingBox;
use smallvec::SmallVec;

/// Index of a node in the node arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct NodeId(usize);

/// Index of an entry in the entry arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct EntryId(usize);

#[derive(Copy, Clone, Debug)]
enum Child {
    Node(NodeId),
    Entry(EntryId),
}

#[derive(Debug)]
struct Node {
    /// `None` only for the empty root.
    bbox: Option<BoundingBox>,
    lhv: u64,
    leaf: bool,
    children: Vec<Child>,
}

impl Node {
    fn leaf() -> Self {
        Self {
            bbox: None,
            lhv: 0,
            leaf: true,
            children: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct Entry<T> {
    bbox: BoundingBox,
    key: u64,
    value: T,
}

/// A height-balanced R-tree ordered by Hilbert keys.
#[derive(Debug)]
pub struct HilbertRTree<T> {
    config: IndexConfig,
    curve: HilbertCurve,
    root: NodeId,
    nodes: Vec<Node>,
    entries: Vec<Entry<T>>,
}

impl<T> Default for HilbertRTree<T> {
    fn default() -> Self {
        let config = IndexConfig::default();
        Self {
            config,
            curve: HilbertCurve::new(config.resolution),
            root: NodeId(0),
            nodes: vec![Node::leaf()],
            entries: Vec::new(),
        }
    }
}

impl<T> HilbertRTree<T> {
    /// Create an empty tree.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCapacity` or `InvalidResolution` when `config` fails
    /// [`IndexConfig::validate`].
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            curve: HilbertCurve::new(config.resolution),
            root: NodeId(0),
            nodes: vec![Node::leaf()],
            entries: Vec::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Number of entries stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of levels, counting the root. An empty tree has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = &self.nodes[self.root.0];
        while let Some(Child::Node(id)) = node.children.first() {
            node = &self.nodes[id.0];
            height += 1;
        }
        height
    }

    /// Insert `value` under `bbox`.
    pub fn insert(&mut self, bbox: BoundingBox, value: T) {
        let key = self.curve.key(bbox.lower_left());
        let id = EntryId(self.entries.len());
        self.entries.push(Entry { bbox, key, value });

        if let Some(sibling) = self.insert_into(self.root, id, key, bbox) {
            let old_root = self.root;
            let root = self.push_node(Node {
                bbox: None,
                lhv: 0,
                leaf: false,
                children: vec![Child::Node(old_root), Child::Node(sibling)],
            });
            self.refresh(root);
            self.root = root;
            log::trace!("Root split, tree height is now {}", self.height());
        }
    }

    /// Payloads of every entry whose box overlaps `query`. Touching counts as overlap.
    pub fn search(&self, query: &BoundingBox) -> Vec<&T> {
        let mut found = Vec::new();
        let mut stack: SmallVec<[NodeId; 32]> = SmallVec::new();
        stack.push(self.root);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if !node.bbox.is_some_and(|b| b.intersects(query)) {
                continue;
            }
            for child in &node.children {
                match *child {
                    Child::Node(n) => stack.push(n),
                    Child::Entry(e) => {
                        let entry = &self.entries[e.0];
                        if entry.bbox.intersects(query) {
                            found.push(&entry.value);
                        }
                    }
                }
            }
        }
        found
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn child_key(&self, child: Child) -> u64 {
        match child {
            Child::Node(n) => self.nodes[n.0].lhv,
            Child::Entry(e) => self.entries[e.0].key,
        }
    }

    fn child_bbox(&self, child: Child) -> Option<BoundingBox> {
        match child {
            Child::Node(n) => self.nodes[n.0].bbox,
            Child::Entry(e) => Some(self.entries[e.0].bbox),
        }
    }

    /// Recompute a node's box and LHV from its children.
    fn refresh(&mut self, id: NodeId) {
        let mut bbox: Option<BoundingBox> = None;
        let mut lhv = 0;
        for &child in &self.nodes[id.0].children {
            if let Some(b) = self.child_bbox(child) {
                bbox = Some(bbox.map_or(b, |acc| acc.union(&b)));
            }
            lhv = lhv.max(self.child_key(child));
        }
        let node = &mut self.nodes[id.0];
        node.bbox = bbox;
        node.lhv = lhv;
    }

    /// Insert below `id`, returning a new right sibling when `id` split.
    fn insert_into(
        &mut self,
        id: NodeId,
        entry: EntryId,
        key: u64,
        bbox: BoundingBox,
    ) -> Option<NodeId> {
        if self.nodes[id.0].leaf {
            let pos = self.nodes[id.0]
                .children
                .partition_point(|&c| self.child_key(c) <= key);
            self.nodes[id.0].children.insert(pos, Child::Entry(entry));
        } else {
            let children = &self.nodes[id.0].children;
            let idx = children
                .iter()
                .position(|&c| self.child_key(c) >= key)
                .unwrap_or(children.len() - 1);
            let Child::Node(child) = children[idx] else {
                unreachable!("internal nodes only hold nodes")
            };

            if let Some(sibling) = self.insert_into(child, entry, key, bbox) {
                self.nodes[id.0]
                    .children
                    .insert(idx + 1, Child::Node(sibling));
            }
        }

        let node = &mut self.nodes[id.0];
        node.bbox = Some(node.bbox.map_or(bbox, |b| b.union(&bbox)));
        node.lhv = node.lhv.max(key);

        if node.children.len() > self.config.max_children {
            Some(self.split(id))
        } else {
            None
        }
    }

    /// Split an overflowing node at the median of its key-ordered children.
    fn split(&mut self, id: NodeId) -> NodeId {
        let node = &mut self.nodes[id.0];
        let mid = node.children.len() / 2;
        let right_children = node.children.split_off(mid);
        let leaf = node.leaf;

        let sibling = self.push_node(Node {
            bbox: None,
            lhv: 0,
            leaf,
            children: right_children,
        });
        self.refresh(id);
        self.refresh(sibling);
        sibling
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        fn walk<T>(tree: &HilbertRTree<T>, id: NodeId, depth: usize, leaf_depth: &mut Option<usize>) {
            let node = &tree.nodes[id.0];
            assert!(node.children.len() <= tree.config.max_children);
            if id != tree.root {
                assert!(node.children.len() >= tree.config.min_children);
            }

            let mut expected: Option<BoundingBox> = None;
            let mut prev_key = 0;
            for &child in &node.children {
                let b = tree.child_bbox(child).unwrap();
                expected = Some(expected.map_or(b, |acc| acc.union(&b)));
                let k = tree.child_key(child);
                assert!(k >= prev_key, "children out of key order");
                prev_key = k;
                assert_eq!(matches!(child, Child::Entry(_)), node.leaf);
                if let Child::Node(n) = child {
                    walk(tree, n, depth + 1, leaf_depth);
                }
            }
            assert_eq!(node.bbox, expected);
            assert_eq!(node.lhv, prev_key);

            if node.leaf {
                match leaf_depth {
                    Some(d) => assert_eq!(*d, depth, "tree is not height balanced"),
                    None => *leaf_depth = Some(depth),
                }
            }
        }

        let mut leaf_depth = None;
        walk(self, self.root, 1, &mut leaf_depth);
        assert_eq!(leaf_depth.unwrap_or(1), self.height());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picket_types::Coordinate;
    use proptest::prelude::*;

    fn bbox(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> BoundingBox {
        BoundingBox::new(
            Coordinate::new(min_lat, min_lon),
            Coordinate::new(max_lat, max_lon),
        )
        .unwrap()
    }

    fn small_config() -> IndexConfig {
        IndexConfig::default()
            .with_min_children(2)
            .with_max_children(4)
    }

    fn sorted(mut v: Vec<&usize>) -> Vec<usize> {
        v.sort();
        v.into_iter().copied().collect()
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(HilbertRTree::<u32>::new(IndexConfig::default().with_min_children(0)).is_err());
        assert!(HilbertRTree::<u32>::new(IndexConfig::default().with_resolution(0)).is_err());
    }

    #[test]
    fn test_empty_tree() {
        let tree = HilbertRTree::<u32>::new(IndexConfig::default()).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 1);
        assert!(tree.search(&BoundingBox::world()).is_empty());
        tree.check_invariants();
    }

    #[test]
    fn test_insert_and_search() {
        let mut tree = HilbertRTree::new(IndexConfig::default()).unwrap();
        tree.insert(bbox(0.0, 0.0, 10.0, 10.0), "a");
        tree.insert(bbox(20.0, 20.0, 30.0, 30.0), "b");
        tree.insert(bbox(5.0, 5.0, 25.0, 25.0), "c");

        let mut hits = tree.search(&bbox(1.0, 1.0, 2.0, 2.0));
        hits.sort();
        assert_eq!(hits, vec![&"a"]);

        let mut hits = tree.search(&bbox(9.0, 9.0, 21.0, 21.0));
        hits.sort();
        assert_eq!(hits, vec![&"a", &"b", &"c"]);

        assert!(tree.search(&bbox(-50.0, -50.0, -40.0, -40.0)).is_empty());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_search_touching_edge() {
        let mut tree = HilbertRTree::new(IndexConfig::default()).unwrap();
        tree.insert(bbox(0.0, 0.0, 1.0, 1.0), 1usize);
        assert_eq!(tree.search(&bbox(1.0, 1.0, 2.0, 2.0)), vec![&1]);
    }

    #[test]
    fn test_splits_keep_tree_balanced() {
        let mut tree = HilbertRTree::new(small_config()).unwrap();
        for i in 0..500usize {
            let lat = (i % 25) as f64 * 3.0 - 60.0;
            let lon = (i / 25) as f64 * 7.0 - 120.0;
            tree.insert(bbox(lat, lon, lat + 1.0, lon + 1.0), i);
        }

        assert_eq!(tree.len(), 500);
        assert!(tree.height() > 3);
        tree.check_invariants();

        let all = sorted(tree.search(&BoundingBox::world()));
        assert_eq!(all, (0..500).collect::<Vec<_>>());
    }

    #[test]
    fn test_duplicate_boxes_are_all_returned() {
        let mut tree = HilbertRTree::new(small_config()).unwrap();
        let b = bbox(10.0, 10.0, 11.0, 11.0);
        for i in 0..20usize {
            tree.insert(b, i);
        }
        tree.check_invariants();
        assert_eq!(sorted(tree.search(&b)), (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_smallest_fanout_stays_within_capacity() {
        let config = IndexConfig::default()
            .with_min_children(1)
            .with_max_children(2);
        let mut tree = HilbertRTree::new(config).unwrap();
        for i in 0..64usize {
            let lat = (i % 8) as f64 * 10.0 - 40.0;
            let lon = (i / 8) as f64 * 20.0 - 80.0;
            tree.insert(bbox(lat, lon, lat + 1.0, lon + 1.0), i);
            tree.check_invariants();
        }
        assert_eq!(sorted(tree.search(&BoundingBox::world())), (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_child_capacity_is_rejected() {
        let config = IndexConfig::default()
            .with_min_children(1)
            .with_max_children(1);
        assert!(HilbertRTree::<usize>::new(config).is_err());
    }

    fn box_strategy() -> impl Strategy<Value = BoundingBox> {
        (-90.0f64..80.0, -180.0f64..170.0, 0.0f64..10.0, 0.0f64..10.0)
            .prop_map(|(lat, lon, h, w)| bbox(lat, lon, lat + h, lon + w))
    }

    proptest! {
        #[test]
        fn prop_search_matches_brute_force(
            boxes in prop::collection::vec(box_strategy(), 0..300),
            query in box_strategy(),
            min in 2usize..5,
        ) {
            let config = IndexConfig::default()
                .with_min_children(min)
                .with_max_children(2 * min + 1)
                .with_resolution(16);
            let mut tree = HilbertRTree::new(config).unwrap();
            for (i, b) in boxes.iter().enumerate() {
                tree.insert(*b, i);
            }
            tree.check_invariants();

            let expected: Vec<usize> = boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| b.intersects(&query))
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(sorted(tree.search(&query)), expected);
        }
    }
}
