//! Category series
//!
//! The output of an aggregation: one bar per category, largest first.

use serde::Serialize;

/// One bar of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryValue {
    pub label: String,
    pub value: f64,
}

/// Bars sorted descending by value; equal values are ordered by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorySeries {
    bars: Vec<CategoryValue>,
}

impl CategorySeries {
    /// Build a series from unordered (label, value) pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, f64)>) -> Self {
        let mut bars: Vec<CategoryValue> = pairs
            .into_iter()
            .map(|(label, value)| CategoryValue { label, value })
            .collect();
        bars.sort_by(|a, b| {
            b.value
                .total_cmp(&a.value)
                .then_with(|| a.label.cmp(&b.label))
        });
        Self { bars }
    }

    pub fn bars(&self) -> &[CategoryValue] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bars.iter().map(|b| b.label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|b| b.value)
    }

    /// Value range covering every bar and the zero baseline
    pub fn value_bounds(&self) -> (f64, f64) {
        self.values()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(&str, f64)]) -> CategorySeries {
        CategorySeries::from_pairs(pairs.iter().map(|(l, v)| (l.to_string(), *v)))
    }

    #[test]
    fn sorted_descending() {
        let s = series(&[("Pump", 2.0), ("Boiler", 9.5), ("Fan", 4.0)]);
        assert_eq!(s.labels().collect::<Vec<_>>(), vec!["Boiler", "Fan", "Pump"]);
        assert_eq!(s.values().collect::<Vec<_>>(), vec![9.5, 4.0, 2.0]);
    }

    #[test]
    fn ties_ordered_by_label() {
        let s = series(&[("Valve", 3.0), ("Chiller", 3.0), ("Motor", 7.0)]);
        assert_eq!(
            s.labels().collect::<Vec<_>>(),
            vec!["Motor", "Chiller", "Valve"]
        );
    }

    #[test]
    fn bounds_include_zero() {
        assert_eq!(series(&[("a", 3.0), ("b", 5.0)]).value_bounds(), (0.0, 5.0));
        assert_eq!(series(&[("a", -2.0), ("b", 1.0)]).value_bounds(), (-2.0, 1.0));
        assert_eq!(CategorySeries::default().value_bounds(), (0.0, 0.0));
    }

    #[test]
    fn empty_series() {
        let s = CategorySeries::from_pairs(Vec::new());
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }
}
