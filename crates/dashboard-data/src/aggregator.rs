//! Per-brand aggregation with cross-brand volatility normalisation.

use std::cmp::Ordering;
use std::collections::HashMap;

use dashboard_core::models::{BrandSummary, ValidRecord};
use dashboard_core::stats::{mean, min_max, normalize, population_std_dev};

// ── BrandAccumulator ──────────────────────────────────────────────────────────

/// Running per-brand sequences, filled in encounter order.
#[derive(Debug, Clone)]
struct BrandAccumulator {
    brand: String,
    /// Instrument of the first record seen for this brand.
    instrument: String,
    sell_through: Vec<f64>,
    units: Vec<f64>,
    pitch: Vec<f64>,
    revenue: f64,
}

impl BrandAccumulator {
    fn new(record: &ValidRecord) -> Self {
        Self {
            brand: record.brand.clone(),
            instrument: record.instrument.clone(),
            sell_through: Vec::new(),
            units: Vec::new(),
            pitch: Vec::new(),
            revenue: 0.0,
        }
    }

    fn add_record(&mut self, record: &ValidRecord) {
        self.sell_through.push(record.sell_through_pct);
        self.units.push(record.units_sold);
        self.pitch.push(record.pitch_hz);
        self.revenue += record.revenue();
    }

    fn events(&self) -> usize {
        self.units.len()
    }

    /// Unit-sales spread, present only for brands with more than one event.
    fn raw_volatility(&self) -> Option<f64> {
        (self.events() > 1).then(|| population_std_dev(&self.units))
    }

    fn finish(self, volatility: f64) -> BrandSummary {
        BrandSummary {
            avg_sell_through: mean(&self.sell_through),
            total_units_sold: self.units.iter().sum(),
            avg_units_sold: mean(&self.units),
            total_revenue: self.revenue,
            avg_pitch_hz: mean(&self.pitch),
            volatility,
            events: self.events(),
            instrument: self.instrument,
            brand: self.brand,
        }
    }
}

// ── BrandAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups validated records by brand.
pub struct BrandAggregator;

impl BrandAggregator {
    /// Group `records` by brand and summarise each group.
    ///
    /// Volatility is the brand's population standard deviation of units sold,
    /// min-max normalised over every brand with more than one event. Brands
    /// with a single event get 0. When no brand has more than one event the
    /// pool is empty and every brand gets 0.
    ///
    /// The result is sorted by descending average sell-through; ties keep the
    /// order in which brands first appear in `records`.
    pub fn aggregate(records: &[ValidRecord]) -> Vec<BrandSummary> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<BrandAccumulator> = Vec::new();

        for record in records {
            let slot = *index.entry(record.brand.as_str()).or_insert_with(|| {
                groups.push(BrandAccumulator::new(record));
                groups.len() - 1
            });
            groups[slot].add_record(record);
        }

        let pool: Vec<f64> = groups.iter().filter_map(|g| g.raw_volatility()).collect();
        let range = min_max(&pool);

        let mut summaries: Vec<BrandSummary> = groups
            .into_iter()
            .map(|group| {
                let volatility = match (group.raw_volatility(), range) {
                    (Some(sd), Some((lo, hi))) => normalize(sd, lo, hi),
                    _ => 0.0,
                };
                group.finish(volatility)
            })
            .collect();

        // `sort_by` is stable, which preserves encounter order among ties.
        summaries.sort_by(|a, b| {
            b.avg_sell_through
                .partial_cmp(&a.avg_sell_through)
                .unwrap_or(Ordering::Equal)
        });

        summaries
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
