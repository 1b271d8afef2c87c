//! Module containing **Bounding Volume Hierarchy** (BVH) structures
//!
//! These are used to accelerate ray-surface intersection tests by narrowing the search space,
//! by skipping surfaces that obviously can't be intersected.

use itertools::Itertools;
use std::cmp::Ordering;
use std::ops::Range;
use tracing::debug;

use crate::accel::AccelStruct;
use crate::core::types::Number;
use crate::shared::aabb::{Aabb, Bounded};
use crate::shared::intersect::Intersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use crate::shared::validate;
use crate::surface::{Surface, SurfaceInstance};

/// The number of surfaces under which we create leaf nodes, instead of
/// splitting the range further
const MAX_LEAF_SURFACES: usize = 10;

/// Ranges smaller than this build their subtrees sequentially; anything larger
/// recurses into the two (disjoint) halves on separate rayon threads
const PARALLEL_BUILD_THRESHOLD: usize = 4096;

/// A **Bounding Volume Hierarchy**: a binary tree of [Aabb]-bounded nodes over a shared
/// surface array, where each node owns a contiguous index range `[start, end)` of it.
///
/// Construction reorders the array in place (so that every node's range *is* contiguous),
/// then never mutates it again: queries take `&self` and the structure is safe to share
/// across threads once built.
#[derive(Clone, Debug)]
pub struct Bvh {
    /// The shared surface array. Reordered once during construction, read-only afterwards
    surfaces: Vec<SurfaceInstance>,
    /// Root of the node tree; [None] iff `surfaces` is empty
    root: Option<BvhNode>,
    stats: BvhStats,
}

/// The type for each node in the BVH tree
///
/// Strictly two children per internal node; a node with "one child" cannot be represented,
/// which keeps that invariant structural rather than a runtime check
#[derive(Clone, Debug)]
pub enum BvhNode {
    /// Stores a range into the shared surface array, scanned linearly on arrival
    Leaf { aabb: Aabb, surfaces: Range<usize> },
    /// The box is the union of the children's boxes; the range is the union of their ranges
    Internal {
        aabb: Aabb,
        surfaces: Range<usize>,
        children: Box<[BvhNode; 2]>,
    },
}

/// Enum for which axis we sort along when splitting a node
#[derive(Copy, Clone, Debug)]
enum SplitAxis {
    X,
    Y,
    Z,
}

// region Constructors

impl Bvh {
    /// Creates a new [Bvh] tree from the given surfaces
    ///
    /// Surfaces are taken by value: the tree and the array it indexes must live (and be
    /// reordered) together. Rebuilding means constructing a fresh [Bvh]
    pub fn new(surfaces: impl IntoIterator<Item = SurfaceInstance>) -> Self {
        let mut surfaces = surfaces.into_iter().collect::<Vec<SurfaceInstance>>();

        let root = if surfaces.is_empty() {
            None
        } else {
            Some(Self::generate_nodes(&mut surfaces, 0))
        };

        let stats = BvhStats::measure(surfaces.len(), root.as_ref());
        debug!(
            surfaces = stats.surfaces,
            nodes = stats.nodes,
            leaves = stats.leaves,
            max_depth = stats.max_depth,
            mean_child_volume_ratio = stats.mean_child_volume_ratio,
            "built bvh"
        );

        Self { surfaces, root, stats }
    }

    /// Recursively builds the node (sub)tree for `surfaces[offset..]`, the given sub-slice of
    /// the shared array, reordering it in place
    ///
    /// `offset` is the absolute index of the slice start, so that node ranges index the full
    /// array rather than the slice.
    ///
    /// # Panics
    /// The slice of `surfaces` passed in must be non-empty.
    fn generate_nodes(surfaces: &mut [SurfaceInstance], offset: usize) -> BvhNode {
        assert!(!surfaces.is_empty(), "internal invariant fail: node ranges cannot be empty");

        let aabb = Aabb::encompass_iter(surfaces.iter().map(Bounded::aabb));
        let range = offset..offset + surfaces.len();

        if surfaces.len() <= MAX_LEAF_SURFACES {
            return BvhNode::Leaf { aabb, surfaces: range };
        }

        // Split along whichever axis the node's box is widest. `position_max_by` resolves
        // exact ties towards the later axis, which keeps the choice deterministic
        let axis = {
            let size = aabb.size();
            match [size.x, size.y, size.z].into_iter().position_max_by(Number::total_cmp) {
                Some(0) => SplitAxis::X,
                Some(1) => SplitAxis::Y,
                Some(2) => SplitAxis::Z,
                _ => unreachable!("axis extent iterator cannot be empty"),
            }
        };
        Self::sort_along_axis(axis, surfaces);

        // Balanced split by count (not a spatial median, and no SAH)
        let mid = surfaces.len() / 2;
        let (left, right) = surfaces.split_at_mut(mid);

        // The partition is established before the children recurse, so the two halves are
        // disjoint and large ranges can safely build in parallel
        let (child_0, child_1) = if left.len() >= PARALLEL_BUILD_THRESHOLD {
            rayon::join(
                || Self::generate_nodes(left, offset),
                || Self::generate_nodes(right, offset + mid),
            )
        } else {
            (
                Self::generate_nodes(left, offset),
                Self::generate_nodes(right, offset + mid),
            )
        };

        BvhNode::Internal {
            aabb: Aabb::encompass(child_0.aabb(), child_1.aabb()),
            surfaces: range,
            children: Box::new([child_0, child_1]),
        }
    }

    /// Sorts the given slice of surfaces by their centre (average position) along the
    /// chosen `axis`, ascending.
    /// This sort is *unstable* (see [sort_unstable_by](https://doc.rust-lang.org/std/primitive.slice.html#method.sort_unstable_by))
    fn sort_along_axis(axis: SplitAxis, surfaces: &mut [SurfaceInstance]) {
        let sort_x = |a: &SurfaceInstance, b: &SurfaceInstance| -> Ordering {
            PartialOrd::partial_cmp(&a.centre().x, &b.centre().x)
                .expect("should be able to cmp surface x-centres: should not be nan")
        };
        let sort_y = |a: &SurfaceInstance, b: &SurfaceInstance| -> Ordering {
            PartialOrd::partial_cmp(&a.centre().y, &b.centre().y)
                .expect("should be able to cmp surface y-centres: should not be nan")
        };
        let sort_z = |a: &SurfaceInstance, b: &SurfaceInstance| -> Ordering {
            PartialOrd::partial_cmp(&a.centre().z, &b.centre().z)
                .expect("should be able to cmp surface z-centres: should not be nan")
        };

        match axis {
            SplitAxis::X => surfaces.sort_unstable_by(sort_x),
            SplitAxis::Y => surfaces.sort_unstable_by(sort_y),
            SplitAxis::Z => surfaces.sort_unstable_by(sort_z),
        }
    }
}

// endregion Constructors

// region Accessors

impl Bvh {
    /// The root of the node tree, if the structure holds any surfaces
    pub fn root(&self) -> Option<&BvhNode> { self.root.as_ref() }

    /// Diagnostics gathered when the tree was built
    pub fn stats(&self) -> BvhStats { self.stats }
}

impl BvhNode {
    pub fn aabb(&self) -> Aabb {
        match self {
            Self::Leaf { aabb, .. } | Self::Internal { aabb, .. } => *aabb,
        }
    }

    /// The half-open range of the shared surface array this node covers
    pub fn surface_range(&self) -> Range<usize> {
        match self {
            Self::Leaf { surfaces, .. } | Self::Internal { surfaces, .. } => surfaces.clone(),
        }
    }

    pub fn is_leaf(&self) -> bool { matches!(self, Self::Leaf { .. }) }

    pub fn children(&self) -> Option<&[BvhNode; 2]> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal { children, .. } => Some(children),
        }
    }
}

// endregion Accessors

// region AccelStruct Impl

impl Bvh {
    /// Finds the closest intersection among the surfaces under `node`
    ///
    /// Tries to bail early if the node's [Aabb] is missed; otherwise scans the range (leaf)
    /// or recurses into both children (internal). Every accepted hit shrinks `search`'s far
    /// bound down to its distance, so later surfaces and subtrees only report (and are only
    /// visited for) closer intersections, and `best` always ends up as the global closest
    /// hit, independent of visit order
    fn node_intersect(
        &self,
        node: &BvhNode,
        ray: &Ray,
        search: &mut Interval<Number>,
        best: &mut Option<Intersection>,
    ) {
        if !node.aabb().hit(ray, search) {
            return;
        }

        match node {
            BvhNode::Leaf { surfaces, .. } => {
                for index in surfaces.clone() {
                    let Some(mut hit) = self.surfaces[index].intersect(ray, search) else {
                        continue;
                    };
                    *search = search.with_some_end(hit.dist);
                    hit.surface = index;
                    *best = Some(hit);
                }
            }
            BvhNode::Internal { children, .. } => {
                self.node_intersect(&children[0], ray, search, best);
                self.node_intersect(&children[1], ray, search, best);
            }
        }
    }

    /// Checks whether *any* surface under `node` is intersected, bailing out at the first hit
    fn node_intersect_any(&self, node: &BvhNode, ray: &Ray, interval: &Interval<Number>) -> bool {
        if !node.aabb().hit(ray, interval) {
            return false;
        }

        match node {
            BvhNode::Leaf { surfaces, .. } => surfaces
                .clone()
                .any(|index| self.surfaces[index].intersect(ray, interval).is_some()),
            BvhNode::Internal { children, .. } => {
                self.node_intersect_any(&children[0], ray, interval)
                    || self.node_intersect_any(&children[1], ray, interval)
            }
        }
    }
}

impl AccelStruct for Bvh {
    fn intersect(&self, ray: &Ray, interval: &Interval<Number>) -> Option<Intersection> {
        validate::ray(ray);

        let root = self.root.as_ref()?;
        let mut search = *interval;
        let mut best = None;
        self.node_intersect(root, ray, &mut search, &mut best);

        if let Some(hit) = &best {
            validate::intersection(ray, hit, interval);
        }
        best
    }

    fn intersect_any(&self, ray: &Ray, interval: &Interval<Number>) -> bool {
        validate::ray(ray);

        match &self.root {
            Some(root) => self.node_intersect_any(root, ray, interval),
            None => false,
        }
    }

    fn surfaces(&self) -> &[SurfaceInstance] { &self.surfaces }
}

// endregion AccelStruct Impl

// region Stats

/// Diagnostics for a built [Bvh], mirroring what gets logged after construction
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct BvhStats {
    /// How many surfaces the tree was built over
    pub surfaces: usize,
    /// Total node count (leaves included)
    pub nodes: usize,
    pub leaves: usize,
    /// Length of the longest root-to-leaf path, in edges; a lone-leaf root has depth `0`
    pub max_depth: usize,
    /// Average, over the internal nodes, of the ratio between the children's summed volume
    /// and the parent's volume. A rough tree-quality metric: smaller means the children
    /// overlap less of the parent, so more of the tree gets pruned per query
    pub mean_child_volume_ratio: Number,
}

impl BvhStats {
    fn measure(surface_count: usize, root: Option<&BvhNode>) -> Self {
        let Some(root) = root else {
            return Self::default();
        };

        let (ratio_sum, ratio_count) = Self::child_volume_ratios(root);
        Self {
            surfaces: surface_count,
            nodes: Self::node_count(root),
            leaves: Self::leaf_count(root),
            max_depth: Self::max_depth(root),
            mean_child_volume_ratio: if ratio_count == 0 { 0. } else { ratio_sum / ratio_count as Number },
        }
    }

    fn node_count(node: &BvhNode) -> usize {
        match node.children() {
            None => 1,
            Some([c0, c1]) => 1 + Self::node_count(c0) + Self::node_count(c1),
        }
    }

    fn leaf_count(node: &BvhNode) -> usize {
        match node.children() {
            None => 1,
            Some([c0, c1]) => Self::leaf_count(c0) + Self::leaf_count(c1),
        }
    }

    fn max_depth(node: &BvhNode) -> usize {
        match node.children() {
            None => 0,
            Some([c0, c1]) => 1 + usize::max(Self::max_depth(c0), Self::max_depth(c1)),
        }
    }

    /// Sum and count of per-internal-node child/parent volume ratios.
    /// Nodes with zero volume are skipped, rather than dividing by zero
    fn child_volume_ratios(node: &BvhNode) -> (Number, usize) {
        let Some([c0, c1]) = node.children() else {
            return (0., 0);
        };

        let (s0, n0) = Self::child_volume_ratios(c0);
        let (s1, n1) = Self::child_volume_ratios(c1);

        let parent_volume = node.aabb().volume();
        if parent_volume > 0. {
            let ratio = (c0.aabb().volume() + c1.aabb().volume()) / parent_volume;
            (s0 + s1 + ratio, n0 + n1 + 1)
        } else {
            (s0 + s1, n0 + n1)
        }
    }
}

// endregion Stats
