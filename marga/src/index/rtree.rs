//! R-tree over feature bounding boxes.
//!
//! Uses `rstar` envelope queries: a feature is returned when its box
//! intersects the search window. The window is padded by a few ulps worth
//! of slack so the exact box test applied afterwards sees every feature the
//! linear scan would.

use rstar::{AABB, RTree, RTreeObject};

use crate::core::Bounds;

/// A bounding box tagged with its entry index for R-tree storage.
#[derive(Clone, Debug)]
struct IndexedBox {
    envelope: AABB<[f64; 2]>,
    index: usize,
}

impl RTreeObject for IndexedBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

#[inline]
fn aabb(b: &Bounds) -> AABB<[f64; 2]> {
    AABB::from_corners([b.min_lon, b.min_lat], [b.max_lon, b.max_lat])
}

/// Bulk-loaded R-tree of entry bounds.
#[derive(Clone)]
pub(crate) struct BoundsTree {
    tree: RTree<IndexedBox>,
}

impl BoundsTree {
    /// Build from entry bounds, where the slice position is the entry index.
    pub fn build(bounds: &[Bounds]) -> Self {
        let boxes: Vec<IndexedBox> = bounds
            .iter()
            .enumerate()
            .map(|(index, b)| IndexedBox {
                envelope: aabb(b),
                index,
            })
            .collect();

        Self {
            tree: RTree::bulk_load(boxes),
        }
    }

    /// Entries whose box intersects `window`, sorted ascending.
    pub fn query_into(&self, window: &Bounds, buffer: &mut Vec<usize>) {
        let pad = 1e-9
            * (1.0
                + window
                    .min_lon
                    .abs()
                    .max(window.max_lon.abs())
                    .max(window.min_lat.abs())
                    .max(window.max_lat.abs()));
        let padded = Bounds::new(
            window.min_lon - pad,
            window.min_lat - pad,
            window.max_lon + pad,
            window.max_lat + pad,
        );

        buffer.clear();
        buffer.extend(
            self.tree
                .locate_in_envelope_intersecting(&aabb(&padded))
                .map(|b| b.index),
        );
        buffer.sort_unstable();
    }

    /// Number of boxes in the tree
    pub fn len(&self) -> usize {
        self.tree.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_intersecting() {
        let tree = BoundsTree::build(&[
            Bounds::new(0.0, 0.0, 1.0, 1.0),
            Bounds::new(5.0, 5.0, 6.0, 6.0),
            Bounds::new(0.5, 0.5, 0.5, 0.5),
        ]);
        assert_eq!(tree.len(), 3);

        let mut out = Vec::new();
        tree.query_into(&Bounds::new(0.4, 0.4, 0.6, 0.6), &mut out);
        assert_eq!(out, vec![0, 2]);

        tree.query_into(&Bounds::new(10.0, 10.0, 11.0, 11.0), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_touching_boxes_intersect() {
        let tree = BoundsTree::build(&[Bounds::new(0.0, 0.0, 1.0, 1.0)]);
        let mut out = Vec::new();
        tree.query_into(&Bounds::new(1.0, 1.0, 2.0, 2.0), &mut out);
        assert_eq!(out, vec![0]);
    }
}
