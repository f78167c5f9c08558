use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{AnnotationError, AnnotationResult};
use crate::interaction::HoverEntity;

/// Handle of a registered overlay layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Markers,
    Segments,
    Photos,
    Titles,
}

impl LayerKind {
    pub const ALL: [Self; 4] = [Self::Markers, Self::Segments, Self::Photos, Self::Titles];

    /// Layer painting `entity`.
    #[must_use]
    pub fn of_entity(entity: HoverEntity) -> Self {
        match entity {
            HoverEntity::Marker(_) => Self::Markers,
            HoverEntity::SegmentLabel(_) => Self::Segments,
            HoverEntity::Cluster { .. } => Self::Photos,
            HoverEntity::SegmentTitle(_) => Self::Titles,
        }
    }
}

/// Invoked with the layer that needs repainting. May be called from a
/// background thread (for example a thumbnail loader); it must only schedule
/// a redraw, never touch the engine.
pub type RedrawCallback = Arc<dyn Fn(LayerId) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayerEntry {
    kind: LayerKind,
    visible: bool,
}

/// Arena of overlay layers addressed by [`LayerId`].
#[derive(Clone)]
pub struct LayerRegistry {
    layers: Vec<LayerEntry>,
    redraw: RedrawCallback,
}

impl fmt::Debug for LayerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerRegistry")
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::with_default_layers(Arc::new(|_| {}))
    }
}

impl LayerRegistry {
    #[must_use]
    pub fn new(redraw: RedrawCallback) -> Self {
        Self {
            layers: Vec::new(),
            redraw,
        }
    }

    /// Registry holding one visible layer per [`LayerKind`].
    #[must_use]
    pub fn with_default_layers(redraw: RedrawCallback) -> Self {
        let mut registry = Self::new(redraw);
        for kind in LayerKind::ALL {
            registry.register(kind);
        }
        registry
    }

    pub fn register(&mut self, kind: LayerKind) -> LayerId {
        self.layers.push(LayerEntry {
            kind,
            visible: true,
        });
        LayerId(self.layers.len() - 1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    #[must_use]
    pub fn kind(&self, id: LayerId) -> Option<LayerKind> {
        self.layers.get(id.0).map(|entry| entry.kind)
    }

    /// First layer registered for `kind`.
    #[must_use]
    pub fn layer_for(&self, kind: LayerKind) -> Option<LayerId> {
        self.layers
            .iter()
            .position(|entry| entry.kind == kind)
            .map(LayerId)
    }

    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> AnnotationResult<()> {
        let entry = self
            .layers
            .get_mut(id.0)
            .ok_or_else(|| AnnotationError::InvalidData(format!("unknown layer id {}", id.0)))?;
        if entry.visible != visible {
            entry.visible = visible;
            (self.redraw)(id);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_visible(&self, id: LayerId) -> bool {
        self.layers.get(id.0).is_some_and(|entry| entry.visible)
    }

    /// `true` when at least one layer of `kind` is registered and visible.
    #[must_use]
    pub fn is_kind_visible(&self, kind: LayerKind) -> bool {
        self.layers
            .iter()
            .any(|entry| entry.kind == kind && entry.visible)
    }

    pub fn request_redraw(&self, id: LayerId) {
        trace!(layer = id.0, "layer redraw requested");
        (self.redraw)(id);
    }

    /// Requests a redraw of every layer painting `kind`.
    pub fn request_redraw_kind(&self, kind: LayerKind) {
        for (index, entry) in self.layers.iter().enumerate() {
            if entry.kind == kind {
                self.request_redraw(LayerId(index));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{LayerKind, LayerRegistry};

    #[test]
    fn visibility_change_requests_redraw_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut registry = LayerRegistry::with_default_layers(Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let photos = registry.layer_for(LayerKind::Photos).expect("photo layer");

        registry.set_visible(photos, false).expect("known layer");
        registry.set_visible(photos, false).expect("known layer");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!registry.is_kind_visible(LayerKind::Photos));
        assert!(registry.is_kind_visible(LayerKind::Markers));
    }
}
