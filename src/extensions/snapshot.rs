use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{AnnotationId, PhotoKind, Viewport};

use super::{MarkerGeometry, PhotoCluster, SegmentLabelGeometry, TitleSegmentGeometry};

/// Clusters of one photo category, in category order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoClusterLayer {
    pub name: String,
    pub kind: PhotoKind,
    pub clusters: Vec<PhotoCluster>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutStats {
    pub markers: usize,
    pub segment_labels: usize,
    pub labels_placed: usize,
    pub labels_suppressed: usize,
    pub clusters: usize,
}

/// Immutable geometry produced by one draw pass.
///
/// Painting and hit testing read the same snapshot; a new pass replaces it
/// wholesale instead of patching it, and `generation` tells passes apart.
/// Maps preserve the x-ascending layout order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub generation: u64,
    pub viewport: Option<Viewport>,
    pub markers: IndexMap<AnnotationId, MarkerGeometry>,
    pub segment_labels: IndexMap<AnnotationId, SegmentLabelGeometry>,
    pub photo_layers: Vec<PhotoClusterLayer>,
    pub titles: Vec<TitleSegmentGeometry>,
    pub stats: LayoutStats,
}

impl LayoutSnapshot {
    #[must_use]
    pub fn marker(&self, id: AnnotationId) -> Option<&MarkerGeometry> {
        self.markers.get(&id)
    }

    #[must_use]
    pub fn segment_label(&self, id: AnnotationId) -> Option<&SegmentLabelGeometry> {
        self.segment_labels.get(&id)
    }

    #[must_use]
    pub fn cluster(&self, category: usize, cluster: usize) -> Option<&PhotoCluster> {
        self.photo_layers.get(category)?.clusters.get(cluster)
    }

    #[must_use]
    pub fn title(&self, index: usize) -> Option<&TitleSegmentGeometry> {
        self.titles.iter().find(|title| title.index == index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
            && self.segment_labels.is_empty()
            && self.photo_layers.iter().all(|layer| layer.clusters.is_empty())
            && self.titles.is_empty()
    }
}
