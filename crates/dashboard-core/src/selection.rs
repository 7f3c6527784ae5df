//! Per-dimension filter selections.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{DashboardError, Result};
use crate::models::{Dimension, Table};

/// Allowed values for each filter dimension.
///
/// A dimension with no entry is unrestricted: it stands for every value
/// observed in the table, which is the state the dashboard opens in. Whether
/// it also admits records with a missing value is decided per dimension by
/// [`Dimension::keeps_missing`]. A dimension with an entry matches records
/// whose value is in the set; an empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    allowed: BTreeMap<Dimension, BTreeSet<String>>,
}

impl FilterSelection {
    /// The default state: every dimension unrestricted.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Explicit selections holding every observed value of each filter
    /// dimension.
    pub fn all_observed(table: &Table) -> Self {
        let allowed = Dimension::FILTERABLE
            .into_iter()
            .map(|d| (d, table.distinct_values(d).into_iter().collect()))
            .collect();
        Self { allowed }
    }

    /// Allowed set for `dimension`, `None` when unrestricted.
    pub fn allowed(&self, dimension: Dimension) -> Option<&BTreeSet<String>> {
        self.allowed.get(&dimension)
    }

    /// Iterate the restricted dimensions and their allowed sets.
    pub fn restrictions(&self) -> impl Iterator<Item = (Dimension, &BTreeSet<String>)> {
        self.allowed.iter().map(|(d, set)| (*d, set))
    }

    /// Whether `value` passes the filter on `dimension`.
    pub fn is_selected(&self, dimension: Dimension, value: &str) -> bool {
        self.allowed
            .get(&dimension)
            .map_or(true, |set| set.contains(value))
    }

    /// Restrict `dimension` to exactly `values`.
    pub fn set<I, S>(&mut self, dimension: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed
            .insert(dimension, values.into_iter().map(Into::into).collect());
    }

    /// Remove any restriction on `dimension`.
    pub fn clear(&mut self, dimension: Dimension) {
        self.allowed.remove(&dimension);
    }

    /// Select every value of `dimension`, returning it to the default state.
    pub fn select_all(&mut self, dimension: Dimension) {
        self.clear(dimension);
    }

    /// Deselect every value of `dimension`, so nothing matches.
    pub fn select_none(&mut self, dimension: Dimension) {
        self.allowed.insert(dimension, BTreeSet::new());
    }

    /// Flip `value` in or out of the selection for `dimension`.
    ///
    /// An unrestricted dimension is first materialised as every value observed
    /// in `table`, so toggling from the default state deselects one value.
    /// When the toggle leaves every observed value selected the dimension
    /// returns to the default state, so switching a value off and on again
    /// restores the original view.
    pub fn toggle(&mut self, dimension: Dimension, value: &str, table: &Table) {
        let observed: BTreeSet<String> = table.distinct_values(dimension).into_iter().collect();
        let set = self
            .allowed
            .entry(dimension)
            .or_insert_with(|| observed.clone());
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        if *set == observed {
            self.allowed.remove(&dimension);
        }
    }

    /// Drop selected values that no longer occur in `table`.
    ///
    /// Returns how many values were removed. A set emptied this way stays
    /// empty, so the view shows no data rather than silently widening.
    pub fn retain_observed(&mut self, table: &Table) -> usize {
        let mut removed = 0;
        for (dimension, set) in self.allowed.iter_mut() {
            let observed: BTreeSet<String> =
                table.distinct_values(*dimension).into_iter().collect();
            let before = set.len();
            set.retain(|v| observed.contains(v));
            removed += before - set.len();
        }
        removed
    }

    /// `true` when any dimension has an empty allowed set.
    pub fn has_empty_dimension(&self) -> bool {
        self.allowed.values().any(BTreeSet::is_empty)
    }

    /// Reject values that do not occur in `table`.
    pub fn validate(&self, table: &Table) -> Result<()> {
        for (dimension, set) in &self.allowed {
            let observed: BTreeSet<String> = table.distinct_values(*dimension).into_iter().collect();
            if let Some(value) = set.iter().find(|v| !observed.contains(*v)) {
                return Err(DashboardError::UnknownFilterValue {
                    dimension: dimension.to_string(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
