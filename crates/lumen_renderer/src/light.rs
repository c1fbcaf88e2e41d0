//! Area-proportional selection among emissive objects.

use crate::Object;
use std::sync::Arc;

/// Cumulative area table over the emissive objects of a scene.
///
/// Built once with the scene. Emitters keep their object-list order so
/// ties resolve to the earlier object.
#[derive(Debug, Clone, Default)]
pub struct LightTable {
    /// Indices into the scene object list
    emitters: Vec<usize>,
    cumulative_area: Vec<f32>,
    emit_area_sum: f32,
}

impl LightTable {
    pub fn new(objects: &[Arc<dyn Object>]) -> Self {
        let mut table = Self::default();

        for (i, object) in objects.iter().enumerate() {
            if !object.has_emit() {
                continue;
            }
            let area = object.area();
            if !(area > 0.0) {
                log::debug!("Ignoring emissive object {} with area {}", i, area);
                continue;
            }
            table.emit_area_sum += area;
            table.emitters.push(i);
            table.cumulative_area.push(table.emit_area_sum);
        }

        table
    }

    /// Total area of all emitters.
    pub fn emit_area_sum(&self) -> f32 {
        self.emit_area_sum
    }

    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    /// Map `u` in [0, 1) to an emitter.
    ///
    /// Returns the object index and the probability of having picked it.
    pub fn select(&self, u: f32) -> Option<(usize, f32)> {
        if self.emitters.is_empty() {
            return None;
        }

        let p = u * self.emit_area_sum;
        // First emitter whose cumulative area exceeds p
        let k = self
            .cumulative_area
            .partition_point(|&c| c <= p)
            .min(self.emitters.len() - 1);

        let previous = if k == 0 { 0.0 } else { self.cumulative_area[k - 1] };
        let probability = (self.cumulative_area[k] - previous) / self.emit_area_sum;

        Some((self.emitters[k], probability))
    }
}
