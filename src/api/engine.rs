use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Annotation, PhotoCategory, SegmentAnnotation, TitleSegment, Viewport};
use crate::error::AnnotationResult;
use crate::extensions::{
    LabelStack, LayoutSnapshot, LayoutStats, PhotoClusterLayer, layout_markers,
    layout_segment_labels, layout_title_segments,
};
use crate::interaction::{HitTester, HoverState, TooltipController};

use super::{AnnotationConfig, LayerKind, LayerRegistry, RedrawCallback};

/// Everything one draw pass lays out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationLayers {
    pub markers: Vec<Annotation>,
    pub segments: Vec<SegmentAnnotation>,
    pub photo_categories: Vec<PhotoCategory>,
    pub titles: Vec<TitleSegment>,
}

impl AnnotationLayers {
    #[must_use]
    pub fn with_markers(mut self, markers: Vec<Annotation>) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub fn with_segments(mut self, segments: Vec<SegmentAnnotation>) -> Self {
        self.segments = segments;
        self
    }

    #[must_use]
    pub fn with_photo_categories(mut self, categories: Vec<PhotoCategory>) -> Self {
        self.photo_categories = categories;
        self
    }

    #[must_use]
    pub fn with_titles(mut self, titles: Vec<TitleSegment>) -> Self {
        self.titles = titles;
        self
    }
}

/// Main orchestration facade consumed by host applications.
///
/// `AnnotationEngine` owns the per-pass label stacks, the hit cache, hover
/// state, the tooltip controller and the last layout snapshot. Painting and
/// pointer handling must both read the snapshot produced by [`Self::layout`].
#[derive(Debug)]
pub struct AnnotationEngine {
    pub(super) config: AnnotationConfig,
    pub(super) marker_stack: LabelStack,
    pub(super) segment_stack: LabelStack,
    pub(super) hit_tester: HitTester,
    pub(super) hover: HoverState,
    pub(super) tooltip: TooltipController,
    pub(super) layers: LayerRegistry,
    pub(super) snapshot: LayoutSnapshot,
    pub(super) generation: u64,
}

impl AnnotationEngine {
    pub fn new(config: AnnotationConfig) -> AnnotationResult<Self> {
        Self::with_layer_registry(config, LayerRegistry::default())
    }

    /// Creates an engine whose layers report repaint requests to `redraw`.
    pub fn with_redraw_callback(
        config: AnnotationConfig,
        redraw: RedrawCallback,
    ) -> AnnotationResult<Self> {
        Self::with_layer_registry(config, LayerRegistry::with_default_layers(redraw))
    }

    pub fn with_layer_registry(
        config: AnnotationConfig,
        layers: LayerRegistry,
    ) -> AnnotationResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            marker_stack: LabelStack::new(config.stacked_label_capacity),
            segment_stack: LabelStack::new(config.stacked_label_capacity),
            hit_tester: HitTester::new(),
            hover: HoverState::default(),
            tooltip: TooltipController::new(config.tooltip_pin_location),
            layers,
            snapshot: LayoutSnapshot::default(),
            generation: 0,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> AnnotationConfig {
        self.config
    }

    /// Replaces the configuration and drops all derived geometry.
    pub fn set_config(&mut self, config: AnnotationConfig) -> AnnotationResult<()> {
        let config = config.validate()?;
        self.marker_stack.set_capacity(config.stacked_label_capacity);
        self.segment_stack.set_capacity(config.stacked_label_capacity);
        if config.tooltip_pin_location != self.config.tooltip_pin_location {
            self.tooltip.set_pin_location(config.tooltip_pin_location);
        }
        self.config = config;
        self.invalidate_geometry();
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> &LayoutSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerRegistry {
        &mut self.layers
    }

    /// Runs one draw pass and replaces the snapshot.
    ///
    /// Markers are laid out before segment labels, then photo clusters per
    /// category (category index is the badge row), then title bands. Hidden
    /// layers produce no geometry. A zero-sized viewport yields an empty
    /// snapshot.
    pub fn layout(
        &mut self,
        viewport: Viewport,
        input: &AnnotationLayers,
    ) -> AnnotationResult<&LayoutSnapshot> {
        let viewport = viewport.validate()?;
        self.marker_stack
            .reset(viewport.graph_top, viewport.graph_bottom);
        self.segment_stack
            .reset(viewport.graph_top, viewport.graph_bottom);

        let mut snapshot = LayoutSnapshot {
            generation: self.generation + 1,
            viewport: Some(viewport),
            ..LayoutSnapshot::default()
        };

        if !viewport.is_degenerate() {
            snapshot.markers = if self.layers.is_kind_visible(LayerKind::Markers) {
                layout_markers(
                    &input.markers,
                    viewport,
                    self.config.marker_layout_config(),
                    &mut self.marker_stack,
                )?
            } else {
                IndexMap::new()
            };

            snapshot.segment_labels = if self.layers.is_kind_visible(LayerKind::Segments) {
                layout_segment_labels(
                    &input.segments,
                    viewport,
                    self.config.segment_layout_config(),
                    &mut self.segment_stack,
                )?
            } else {
                IndexMap::new()
            };

            if self.layers.is_kind_visible(LayerKind::Photos) {
                let clusterer = self.config.clusterer();
                for (slot, category) in input.photo_categories.iter().enumerate() {
                    snapshot.photo_layers.push(PhotoClusterLayer {
                        name: category.name.clone(),
                        kind: category.kind,
                        clusters: clusterer.cluster_in_slot(category, slot, viewport)?,
                    });
                }
            }

            if self.layers.is_kind_visible(LayerKind::Titles) {
                snapshot.titles = layout_title_segments(&input.titles, viewport);
            }
        }

        let marker_stats = self.marker_stack.stats();
        let segment_stats = self.segment_stack.stats();
        snapshot.stats = LayoutStats {
            markers: snapshot.markers.len(),
            segment_labels: snapshot.segment_labels.len(),
            labels_placed: marker_stats.placed + segment_stats.placed,
            labels_suppressed: marker_stats.suppressed + segment_stats.suppressed,
            clusters: snapshot
                .photo_layers
                .iter()
                .map(|layer| layer.clusters.len())
                .sum(),
        };

        debug!(
            generation = snapshot.generation,
            markers = snapshot.stats.markers,
            segment_labels = snapshot.stats.segment_labels,
            labels_suppressed = snapshot.stats.labels_suppressed,
            clusters = snapshot.stats.clusters,
            "annotation layout pass"
        );

        self.generation = snapshot.generation;
        self.snapshot = snapshot;
        self.hit_tester.invalidate();
        Ok(&self.snapshot)
    }
}
