//! Section transform registry
//!
//! Maps a normalised section name to the transform that handles it.
//! Section names are matched after [`normalize_key`], so `Breakdown of
//! Accounts` and `BREAKDOWN_OF_ACCOUNTS` share one entry. Anything not
//! registered falls back to [`Identity`] and passes through unchanged.

use std::collections::HashMap;
use std::sync::Arc;

/// Transform applied to the rows of one section.
///
/// Input and output are `\n`-terminated rows of `,`-delimited cells,
/// without the leading section-name cell.
pub trait SectionTransform: Send + Sync {
    fn apply(&self, rows: &str) -> anyhow::Result<String>;
}

impl<F> SectionTransform for F
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    fn apply(&self, rows: &str) -> anyhow::Result<String> {
        self(rows)
    }
}

/// Returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl SectionTransform for Identity {
    fn apply(&self, rows: &str) -> anyhow::Result<String> {
        Ok(rows.to_string())
    }
}

/// Report pages recognised out of the box. All are passthrough for now.
pub const REPORT_PAGES: &[&str] = &[
    "BREAKDOWN_OF_ACCOUNTS",
    "ACCOUNT_OVERVIEW",
    "HISTORICAL_PERFORMANCE",
    "HISTORICAL_PERFORMANCE_BENCHMARK_COMPARISON",
    "OPEN_POSITION_SUMMARY",
    "CONCENTRATION",
    "ESG",
    "ALLOCATION_BY_ASSET_CLASS",
    "ALLOCATION_BY_FINANCIAL_INSTRUMENT",
    "ALLOCATION_AND_PERFORMANCE_BY_REGION",
    "ALLOCATION_AND_PERFORMANCE_BY_SECTOR",
    "TIME_PERIOD_PERFORMANCE_STATISTICS",
    "TIME_PERIOD_BENCHMARK_COMPARISON",
    "CUMULATIVE_PERFORMANCE_STATISTICS",
    "CUMULATIVE_BENCHMARK_STATISTICS",
    "RISK_MEASURES",
    "RISK_MEASURES_BENCHMARK_COMPARISON",
    "PERFORMANCE_ATTRIBUTION_VS_BENCHMARK",
    "PERFORMANCE_BY_ASSET_CLASS",
    "PERFORMANCE_BY_FINANCIAL_INSTRUMENT",
    "PERFORMANCE_BY_SYMBOL",
    "PERFORMANCE_BY_LONG_AND_SHORT",
    "PERFORMANCE_BY_UNDERLYING",
    "FIXED_INCOME",
    "PROJECTED_INCOME",
    "TRADE_SUMMARY",
    "DEPOSITS_AND_WITHDRAWALS",
    "CORPORATE_ACTIONS",
    "DIVIDENDS",
    "INTEREST",
    "FEES",
];

/// Dispatch key for a raw section name: spaces become `_`, then uppercase.
pub fn normalize_key(name: &str) -> String {
    name.replace(' ', "_").to_uppercase()
}

/// Normalised section name → transform, with an identity fallback.
#[derive(Clone)]
pub struct DispatchRegistry {
    entries: HashMap<String, Arc<dyn SectionTransform>>,
    fallback: Arc<dyn SectionTransform>,
}

impl Default for DispatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DispatchRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        f.debug_struct("DispatchRegistry")
            .field("entries", &keys)
            .finish()
    }
}

impl DispatchRegistry {
    /// Empty registry: every section resolves to the fallback.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: Arc::new(Identity),
        }
    }

    /// Registry with every page in [`REPORT_PAGES`] registered.
    pub fn with_report_pages() -> Self {
        let mut registry = Self::new();
        for page in REPORT_PAGES {
            registry.register(page, Identity);
        }
        registry
    }

    /// Register `transform` under the normalised form of `name`,
    /// replacing any previous entry.
    pub fn register(&mut self, name: &str, transform: impl SectionTransform + 'static) {
        self.entries.insert(normalize_key(name), Arc::new(transform));
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_key(name))
    }

    /// Transform for `name`. Unknown names log a warning and get the fallback.
    pub fn resolve(&self, name: &str) -> &Arc<dyn SectionTransform> {
        let key = normalize_key(name);
        match self.entries.get(&key) {
            Some(transform) => transform,
            None => {
                log::warn!("no transform registered for {key}, passing through");
                &self.fallback
            }
        }
    }

    /// The transform handed out for unregistered names.
    pub fn fallback(&self) -> &Arc<dyn SectionTransform> {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
