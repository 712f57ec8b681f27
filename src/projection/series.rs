//! Lazy year-by-year projection series

use crate::currency::{display_amount, DenominationTable, RateLookup};
use super::config::MAX_TIMELINE_YEARS;
use super::points::ProjectionPoint;
use std::iter::FusedIterator;

/// Finite iterator over the points of one projection, years `0..=timeline`
///
/// Nothing is computed until iterated. The series can be replayed with
/// [`ProjectionSeries::restart`] and always yields the same values for the
/// same inputs. Timelines longer than [`MAX_TIMELINE_YEARS`] are cut short.
#[derive(Debug, Clone)]
pub struct ProjectionSeries<'a> {
    denominations: &'a DenominationTable,
    base_ref: f64,
    annual_growth: f64,
    baseline_growth: f64,
    lookup: RateLookup,
    timeline_years: u32,
    next_year: u32,
}

impl<'a> ProjectionSeries<'a> {
    pub(crate) fn new(
        denominations: &'a DenominationTable,
        base_ref: f64,
        timeline_years: u32,
        annual_rate_percent: f64,
        baseline_rate_percent: f64,
        lookup: RateLookup,
    ) -> Self {
        Self {
            denominations,
            base_ref,
            annual_growth: 1.0 + annual_rate_percent / 100.0,
            baseline_growth: 1.0 + baseline_rate_percent / 100.0,
            lookup,
            timeline_years: timeline_years.min(MAX_TIMELINE_YEARS),
            next_year: 0,
        }
    }

    /// A fresh copy positioned at year 0
    pub fn restart(&self) -> Self {
        Self {
            next_year: 0,
            ..self.clone()
        }
    }

    /// Number of points in the full series
    pub fn total_points(&self) -> usize {
        self.timeline_years as usize + 1
    }

    /// Point for an arbitrary year, independent of the iterator position
    pub fn point_at(&self, year_index: u32) -> ProjectionPoint {
        let exponent = i32::try_from(year_index).unwrap_or(i32::MAX);
        let projected_ref = self.base_ref * self.annual_growth.powi(exponent);
        let baseline_ref = self.base_ref * self.baseline_growth.powi(exponent);

        ProjectionPoint {
            year_index,
            projected_value: display_amount(projected_ref, self.lookup, self.denominations),
            baseline_value: display_amount(baseline_ref, self.lookup, self.denominations),
        }
    }
}

impl Iterator for ProjectionSeries<'_> {
    type Item = ProjectionPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_year > self.timeline_years {
            return None;
        }
        let point = self.point_at(self.next_year);
        self.next_year += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.timeline_years as usize + 1).saturating_sub(self.next_year as usize);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProjectionSeries<'_> {}

impl FusedIterator for ProjectionSeries<'_> {}
