use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DevicePoint;

use super::{HoverEntity, PinLocation, TooltipPlacement, TooltipPositioner, TooltipRequest};

/// Outcome of opening a tooltip: the one that had to close, if any, and the
/// one that is now shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TooltipTransition {
    pub closed: Option<HoverEntity>,
    pub opened: Option<HoverEntity>,
}

impl TooltipTransition {
    #[must_use]
    pub fn is_noop(self) -> bool {
        self.closed.is_none() && self.opened.is_none()
    }
}

/// Keeps at most one tooltip open and owns its persisted placement.
#[derive(Debug, Clone, Default)]
pub struct TooltipController {
    open: Option<HoverEntity>,
    placement: TooltipPlacement,
}

impl TooltipController {
    #[must_use]
    pub fn new(pin_location: PinLocation) -> Self {
        Self {
            open: None,
            placement: TooltipPlacement::new(pin_location),
        }
    }

    #[must_use]
    pub fn open_entity(&self) -> Option<HoverEntity> {
        self.open
    }

    #[must_use]
    pub fn placement(&self) -> &TooltipPlacement {
        &self.placement
    }

    /// Opens the tooltip for `entity`, closing any other open tooltip first.
    /// Reopening the entity that is already shown changes nothing.
    pub fn open_for(&mut self, entity: HoverEntity) -> TooltipTransition {
        if self.open == Some(entity) {
            return TooltipTransition::default();
        }
        let closed = self.open.replace(entity);
        debug!(?closed, opened = ?entity, "tooltip switched");
        TooltipTransition {
            closed,
            opened: Some(entity),
        }
    }

    pub fn close(&mut self) -> Option<HoverEntity> {
        let closed = self.open.take();
        if closed.is_some() {
            debug!(?closed, "tooltip closed");
        }
        closed
    }

    pub fn drag_by(&mut self, dx: i32, dy: i32) {
        self.placement.drag_by(dx, dy);
    }

    pub fn set_pin_location(&mut self, pin_location: PinLocation) {
        self.placement.set_pin_location(pin_location);
    }

    /// Screen position of the open tooltip, or `None` when nothing is open.
    pub fn position(&mut self, request: &TooltipRequest<'_>) -> Option<DevicePoint> {
        self.open?;
        Some(TooltipPositioner::position(request, &mut self.placement))
    }
}

#[cfg(test)]
mod tests {
    use super::TooltipController;
    use crate::core::AnnotationId;
    use crate::interaction::{HoverEntity, PinLocation};

    #[test]
    fn opening_second_tooltip_closes_first() {
        let mut controller = TooltipController::new(PinLocation::Disabled);
        let first = HoverEntity::Marker(AnnotationId(1));
        let second = HoverEntity::SegmentTitle(2);

        let opened = controller.open_for(first);
        assert_eq!(opened.closed, None);

        let switched = controller.open_for(second);
        assert_eq!(switched.closed, Some(first));
        assert_eq!(switched.opened, Some(second));
        assert!(controller.open_for(second).is_noop());
        assert_eq!(controller.close(), Some(second));
        assert_eq!(controller.open_entity(), None);
    }
}
