//! In-memory drawing model.

use super::{Ink, InkId, SketchModel};
use kurbo::{BezPath, Point};
use peniko::Color;
use std::collections::HashMap;

/// Minimum share of an ink's points inside an area for it to be found.
const SEARCH_OVERLAP_THRESHOLD: f64 = 0.5;

/// A highlight outline shown over the drawing.
#[derive(Debug, Clone)]
pub struct Outline {
    pub points: Vec<Point>,
    pub color: Color,
}

/// In-memory sketch for testing and headless use.
#[derive(Debug, Clone, Default)]
pub struct MemorySketch {
    /// All ink, keyed by ID.
    inks: HashMap<InkId, Ink>,
    /// Insertion order of ink (back to front).
    z_order: Vec<InkId>,
    /// Currently selected ink.
    selection: Vec<InkId>,
    /// Highlight layer.
    highlights: Vec<Outline>,
}

impl MemorySketch {
    /// Create an empty sketch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of inks.
    pub fn len(&self) -> usize {
        self.inks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inks.is_empty()
    }

    /// Get an ink by ID.
    pub fn ink(&self, id: InkId) -> Option<&Ink> {
        self.inks.get(&id)
    }

    /// Ink in insertion order.
    pub fn inks_ordered(&self) -> impl Iterator<Item = &Ink> {
        self.z_order.iter().filter_map(|id| self.inks.get(id))
    }

    /// Remove an ink, dropping it from the selection too.
    pub fn remove_ink(&mut self, id: InkId) -> Option<Ink> {
        self.z_order.retain(|&ink_id| ink_id != id);
        self.selection.retain(|&ink_id| ink_id != id);
        self.inks.remove(&id)
    }

    pub fn selection(&self) -> &[InkId] {
        &self.selection
    }

    pub fn highlights(&self) -> &[Outline] {
        &self.highlights
    }
}

impl SketchModel for MemorySketch {
    fn search(&self, area: &BezPath) -> Vec<InkId> {
        self.inks_ordered()
            .filter(|ink| ink.overlap(area) >= SEARCH_OVERLAP_THRESHOLD)
            .map(|ink| ink.id())
            .collect()
    }

    fn set_selection(&mut self, ids: &[InkId]) {
        self.selection = ids
            .iter()
            .copied()
            .filter(|id| self.inks.contains_key(id))
            .collect();
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn add_ink(&mut self, ink: Ink) {
        let id = ink.id();
        self.z_order.push(id);
        self.inks.insert(id, ink);
    }

    fn show_outline(&mut self, points: &[Point], color: Color) {
        self.highlights.push(Outline {
            points: points.to_vec(),
            color,
        });
    }

    fn clear_highlights(&mut self) {
        self.highlights.clear();
    }
}
