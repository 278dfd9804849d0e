// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-choice marker set state.
//!
//! Each choice owns a set of marker instances. The saved placement list
//! is the source of truth; instances are reconciled against it on every
//! redraw so that there is always exactly one home spare to drag while
//! the policy allows more placements.

use crate::io::codec;
use crate::models::marker::{MarkerInstance, Placement};
use crate::models::question::{ChoiceDef, DisplayPolicy};
use crate::util::geometry::{ImageSize, Point};

/// Result of reconciling the instance list against the required count.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub created: Vec<usize>,
    pub removed: Vec<usize>,
    pub kept: Vec<usize>,
}

/// Marker state for a single choice.
#[derive(Debug)]
pub struct MarkerSet {
    pub label: String,
    pub policy: DisplayPolicy,
    /// Saved placements, in field order. This is what gets encoded into
    /// the persisted `"x1,y1;x2,y2;..."` field.
    placements: Vec<Point>,
    pub instances: Vec<MarkerInstance>,
}

impl MarkerSet {
    /// Build the set for a choice, restoring any previously saved answer.
    ///
    /// An undecodable answer field is tolerated: it logs a warning and
    /// starts the choice empty.
    pub fn new(choice: &ChoiceDef) -> Self {
        let placements = match choice.answer.as_deref() {
            None | Some("") => Vec::new(),
            Some(field) => codec::decode(field).unwrap_or_else(|e| {
                log::warn!("discarding saved answer for {:?}: {}", choice.label, e);
                Vec::new()
            }),
        };
        Self {
            label: choice.label.clone(),
            policy: choice.max_markers,
            placements,
            instances: Vec::new(),
        }
    }

    /// Saved placements in field order.
    pub fn placements(&self) -> &[Point] {
        &self.placements
    }

    /// The persisted field form of the saved placements.
    pub fn field(&self) -> String {
        codec::encode(&self.placements)
    }

    /// The instance currently being dragged, if any.
    pub fn dragging_instance(&self) -> Option<&MarkerInstance> {
        self.instances.iter().find(|i| i.dragging)
    }

    pub fn instance(&self, index: usize) -> Option<&MarkerInstance> {
        self.instances.iter().find(|i| i.index == index)
    }

    pub fn instance_mut(&mut self, index: usize) -> Option<&mut MarkerInstance> {
        self.instances.iter_mut().find(|i| i.index == index)
    }

    /// Number of marker instances that should be displayed right now:
    /// the saved placements, the one mid-drag, and one home spare unless
    /// the policy ceiling has been reached.
    pub fn required_display_count(&self) -> usize {
        let count = self.placements.len() + usize::from(self.dragging_instance().is_some());
        match self.policy {
            DisplayPolicy::Unlimited => count + 1,
            DisplayPolicy::Limited(max) if count < max as usize => count + 1,
            DisplayPolicy::Limited(_) => count,
        }
    }

    /// Reconcile the instance list against [`required_display_count`]
    /// and reposition the surviving instances from the saved placements.
    ///
    /// Every existing instance starts as a removal candidate; each
    /// required slot either keeps the instance already at that index or
    /// creates a fresh one cloned from the home template. Whatever is
    /// still marked afterwards is torn down, unless it is mid-drag.
    ///
    /// [`required_display_count`]: MarkerSet::required_display_count
    pub fn reconcile(&mut self) -> Reconciliation {
        let required = self.required_display_count();
        let mut outcome = Reconciliation::default();

        for index in 0..required {
            if self.instance(index).is_some() {
                outcome.kept.push(index);
            } else {
                self.instances
                    .push(MarkerInstance::new(index, self.label.clone()));
                outcome.created.push(index);
            }
        }

        let removed = &mut outcome.removed;
        self.instances.retain(|inst| {
            if inst.index < required || inst.dragging {
                true
            } else {
                removed.push(inst.index);
                false
            }
        });
        self.instances.sort_by_key(|inst| inst.index);

        for inst in &mut self.instances {
            if inst.dragging {
                continue;
            }
            inst.placement = match self.placements.get(inst.index) {
                Some(p) => Placement::Placed(*p),
                None => Placement::Home,
            };
        }
        outcome
    }

    /// Rebuild the full placement list for this choice and return it in
    /// encoded field form.
    ///
    /// Scans all instances in index order, skipping the one mid-drag and
    /// any position off the image. If `just_dropped` names an instance
    /// that no scanned instance already represents (matched by label,
    /// not identity), its position is appended after the kept ones.
    pub fn save_placement(&self, just_dropped: Option<usize>, size: ImageSize) -> String {
        let dropped = just_dropped.and_then(|index| self.instance(index));
        let mut coords = Vec::new();
        let mut add_dropped = dropped.is_some();

        let mut ordered: Vec<&MarkerInstance> = self.instances.iter().collect();
        ordered.sort_by_key(|inst| inst.index);
        for inst in ordered {
            if inst.dragging {
                continue;
            }
            if let Some(p) = inst.position() {
                if size.contains(p) {
                    coords.push(p);
                }
            }
            if let Some(d) = dropped {
                if inst.label == d.label {
                    add_dropped = false;
                }
            }
        }

        if add_dropped {
            if let Some(p) = dropped.and_then(MarkerInstance::position) {
                if size.contains(p) {
                    coords.push(p);
                }
            }
        }

        codec::encode(&coords)
    }

    /// Replace the saved placements from an encoded field.
    pub fn apply_field(&mut self, field: &str) {
        self.placements = codec::decode(field).unwrap_or_else(|e| {
            log::warn!("discarding malformed placement field for {:?}: {}", self.label, e);
            Vec::new()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: ImageSize = ImageSize {
        width: 100,
        height: 100,
    };

    fn choice(label: &str, policy: DisplayPolicy, answer: Option<&str>) -> ChoiceDef {
        ChoiceDef {
            label: label.to_string(),
            max_markers: policy,
            answer: answer.map(str::to_string),
        }
    }

    #[test]
    fn test_unlimited_always_offers_a_spare() {
        let set = MarkerSet::new(&choice("pin", DisplayPolicy::Unlimited, None));
        assert_eq!(set.required_display_count(), 1);
    }

    #[test]
    fn test_no_spare_at_policy_ceiling() {
        let set = MarkerSet::new(&choice("pin", DisplayPolicy::Limited(2), Some("10,10;20,20")));
        assert_eq!(set.required_display_count(), 2);
    }

    #[test]
    fn test_spare_below_policy_ceiling() {
        let set = MarkerSet::new(&choice("pin", DisplayPolicy::Limited(2), Some("10,10")));
        assert_eq!(set.required_display_count(), 2);
    }

    #[test]
    fn test_malformed_answer_starts_empty() {
        let set = MarkerSet::new(&choice("pin", DisplayPolicy::Unlimited, Some("nonsense")));
        assert!(set.placements().is_empty());
    }

    #[test]
    fn test_reconcile_creates_placed_and_spare_instances() {
        let mut set = MarkerSet::new(&choice("pin", DisplayPolicy::Unlimited, Some("10,10;20,20")));
        let outcome = set.reconcile();
        assert_eq!(outcome.created, vec![0, 1, 2]);
        assert!(outcome.removed.is_empty());
        assert_eq!(set.instances[0].placement, Placement::Placed(Point::new(10, 10)));
        assert_eq!(set.instances[1].placement, Placement::Placed(Point::new(20, 20)));
        assert_eq!(set.instances[2].placement, Placement::Home);
    }

    #[test]
    fn test_reconcile_tears_down_surplus_instances() {
        let mut set = MarkerSet::new(&choice("pin", DisplayPolicy::Unlimited, Some("10,10")));
        set.reconcile();
        assert_eq!(set.instances.len(), 2);

        // The answer was cleared; only the home spare should survive.
        set.apply_field("");
        let outcome = set.reconcile();
        assert_eq!(outcome.kept, vec![0]);
        assert_eq!(outcome.removed, vec![1]);
        assert_eq!(set.instances.len(), 1);
        assert_eq!(set.instances[0].placement, Placement::Home);
    }

    #[test]
    fn test_reconcile_never_removes_mid_drag_instance() {
        let mut set = MarkerSet::new(&choice("pin", DisplayPolicy::Unlimited, Some("10,10")));
        set.reconcile();
        set.instance_mut(1).unwrap().dragging = true;

        set.apply_field("");
        let outcome = set.reconcile();
        assert!(!outcome.removed.contains(&1));
        assert!(set.instance(1).unwrap().dragging);
    }

    #[test]
    fn test_save_placement_scans_in_index_order() {
        let mut set = MarkerSet::new(&choice("pin", DisplayPolicy::Unlimited, Some("10,10;20,20")));
        set.reconcile();
        assert_eq!(set.save_placement(None, SIZE), "10,10;20,20");
    }

    #[test]
    fn test_save_placement_skips_mid_drag_instance() {
        let mut set = MarkerSet::new(&choice("pin", DisplayPolicy::Unlimited, Some("10,10;20,20")));
        set.reconcile();
        set.instance_mut(0).unwrap().dragging = true;
        assert_eq!(set.save_placement(None, SIZE), "20,20");
    }

    #[test]
    fn test_save_placement_appends_newly_dropped_position() {
        let mut set = MarkerSet::new(&choice("pin", DisplayPolicy::Unlimited, Some("10,10")));
        set.reconcile();
        // The spare was dragged onto the image and released.
        set.instance_mut(1).unwrap().placement = Placement::Placed(Point::new(55, 60));
        assert_eq!(set.save_placement(Some(1), SIZE), "10,10;55,60");
    }

    #[test]
    fn test_save_placement_discards_edge_touching_drop() {
        let mut set = MarkerSet::new(&choice("pin", DisplayPolicy::Unlimited, None));
        set.reconcile();
        set.instance_mut(0).unwrap().placement = Placement::Placed(Point::new(0, 50));
        assert_eq!(set.save_placement(Some(0), SIZE), "");
    }

    #[test]
    fn test_save_placement_skips_out_of_bounds_positions() {
        let mut set = MarkerSet::new(&choice("pin", DisplayPolicy::Unlimited, Some("10,10;300,40")));
        set.reconcile();
        assert_eq!(set.save_placement(None, SIZE), "10,10");
    }
}
