#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{
    CoordinateMapper, DevicePoint, DeviceRect, PhotoAnnotation, PhotoCategory, PhotoKind,
    Viewport,
};
use crate::error::{AnnotationError, AnnotationResult};

/// Group of photos sharing one grid bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoCluster {
    pub kind: PhotoKind,
    pub grid_start: i32,
    pub grid_end: i32,
    /// Indices into the category's photo list, ascending by device x.
    pub member_indices: Vec<usize>,
    /// Center of the members' bounding box; `None` when no member has a
    /// curve value.
    pub center_point: Option<DevicePoint>,
    /// Painted badge area, used for hit testing.
    pub bounds: DeviceRect,
}

impl PhotoCluster {
    #[must_use]
    pub fn len(&self) -> usize {
        self.member_indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.member_indices.is_empty()
    }
}

/// Zoom-adaptive grid bucketing of photo annotations.
///
/// Grid lines sit at multiples of the bucket width in virtual (unscrolled)
/// space, so panning moves clusters without changing their membership.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotoClusterer {
    pub base_width_px: i32,
    pub badge_height_px: i32,
}

impl Default for PhotoClusterer {
    fn default() -> Self {
        Self {
            base_width_px: 40,
            badge_height_px: 20,
        }
    }
}

impl PhotoClusterer {
    #[must_use]
    pub fn new(base_width_px: i32, badge_height_px: i32) -> Self {
        Self {
            base_width_px,
            badge_height_px,
        }
    }

    pub fn validate(self) -> AnnotationResult<Self> {
        if self.base_width_px <= 0 {
            return Err(AnnotationError::InvalidConfig(
                "cluster base width must be > 0".to_owned(),
            ));
        }
        if self.badge_height_px < 0 {
            return Err(AnnotationError::InvalidConfig(
                "cluster badge height must be >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Base width scaled by the zoom ratio, halved until it is at most twice
    /// the base width.
    #[must_use]
    pub fn bucket_width(self, viewport: Viewport) -> i32 {
        let base = f64::from(self.base_width_px.max(1));
        let mut width = base * viewport.zoom_ratio();
        while width > 2.0 * base {
            width /= 2.0;
        }
        (width.round() as i32).max(1)
    }

    pub fn cluster(
        self,
        category: &PhotoCategory,
        viewport: Viewport,
    ) -> AnnotationResult<Vec<PhotoCluster>> {
        self.cluster_in_slot(category, 0, viewport)
    }

    /// Clusters one category whose badges are painted in row `slot` below the
    /// plot top.
    pub fn cluster_in_slot(
        self,
        category: &PhotoCategory,
        slot: usize,
        viewport: Viewport,
    ) -> AnnotationResult<Vec<PhotoCluster>> {
        let bucket_width = self.bucket_width(viewport);
        self.cluster_with_bucket_width(category, slot, viewport, bucket_width)
    }

    pub fn cluster_with_bucket_width(
        self,
        category: &PhotoCategory,
        slot: usize,
        viewport: Viewport,
        bucket_width: i32,
    ) -> AnnotationResult<Vec<PhotoCluster>> {
        let bucket_width = i64::from(bucket_width.max(1));
        let mapper = CoordinateMapper::new(viewport);
        let mut projected = project_visible(&category.photos, mapper)?;
        projected.sort_by_key(|(index, x)| (*x, category.photos[*index].id));

        let scroll = i64::from(mapper.scroll_px());
        let badge_top = viewport
            .graph_top
            .saturating_add((slot as i32).saturating_mul(self.badge_height_px));

        let mut clusters: Vec<PhotoCluster> = Vec::new();
        let mut grid_line: Option<i64> = None;
        for (index, virtual_x) in projected {
            let virtual_x = i64::from(virtual_x);
            if grid_line.is_some_and(|line| virtual_x <= line) {
                if let Some(current) = clusters.last_mut() {
                    current.member_indices.push(index);
                }
                continue;
            }

            // first grid line at or right of x; lines sit at multiples of the
            // bucket width in virtual space
            let line = (virtual_x + bucket_width - 1).div_euclid(bucket_width) * bucket_width;
            grid_line = Some(line);

            let grid_end = (line - scroll) as i32;
            let grid_start = (line - bucket_width + 1 - scroll) as i32;
            clusters.push(PhotoCluster {
                kind: category.kind,
                grid_start,
                grid_end,
                member_indices: vec![index],
                center_point: None,
                bounds: DeviceRect::new(
                    grid_start,
                    badge_top,
                    bucket_width as i32,
                    self.badge_height_px,
                ),
            });
        }

        for cluster in &mut clusters {
            cluster.center_point = members_center(&category.photos, &cluster.member_indices, mapper);
        }
        Ok(clusters)
    }
}

fn project_visible(
    photos: &[PhotoAnnotation],
    mapper: CoordinateMapper,
) -> AnnotationResult<Vec<(usize, i32)>> {
    if let Some(photo) = photos.iter().find(|photo| !photo.x_value.is_finite()) {
        return Err(AnnotationError::InvalidData(format!(
            "photo {} x value must be finite",
            photo.id.0
        )));
    }

    #[cfg(feature = "parallel-projection")]
    {
        Ok(photos
            .par_iter()
            .enumerate()
            .filter(|(_, photo)| photo.visible)
            .map(|(index, photo)| (index, mapper.to_virtual_x(photo.x_value)))
            .collect())
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        Ok(photos
            .iter()
            .enumerate()
            .filter(|(_, photo)| photo.visible)
            .map(|(index, photo)| (index, mapper.to_virtual_x(photo.x_value)))
            .collect())
    }
}

fn members_center(
    photos: &[PhotoAnnotation],
    members: &[usize],
    mapper: CoordinateMapper,
) -> Option<DevicePoint> {
    let mut bounds: Option<(i32, i32, i32, i32)> = None;
    for &index in members {
        let photo = &photos[index];
        let Some(y_value) = photo.y_value.filter(|value| value.is_finite()) else {
            continue;
        };
        let point = mapper.to_device(photo.x_value, y_value);
        bounds = Some(match bounds {
            None => (point.x, point.y, point.x, point.y),
            Some((left, top, right, bottom)) => (
                left.min(point.x),
                top.min(point.y),
                right.max(point.x),
                bottom.max(point.y),
            ),
        });
    }
    bounds.map(|(left, top, right, bottom)| {
        DevicePoint::new(left + (right - left) / 2, top + (bottom - top) / 2)
    })
}

#[cfg(test)]
mod tests {
    use super::PhotoClusterer;
    use crate::core::Viewport;

    #[test]
    fn bucket_width_is_bounded_under_deep_zoom() {
        let clusterer = PhotoClusterer::new(40, 20);
        let unzoomed = Viewport::new(1.0, 1.0, 0, 100, 500);
        let zoomed = unzoomed.with_virtual_width(500 * 64);
        let slightly = unzoomed.with_virtual_width(750);

        assert_eq!(clusterer.bucket_width(unzoomed), 40);
        assert_eq!(clusterer.bucket_width(zoomed), 80);
        assert_eq!(clusterer.bucket_width(slightly), 60);
    }
}
