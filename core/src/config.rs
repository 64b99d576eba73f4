//! Engine configuration.
//!
//! Loaded from the data/ directory in deployments; tests use
//! `StaffingConfig::default_test()`.

use crate::staffing::StaffingBucket;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffingConfig {
    /// Reject candidate assignments whose interval covers a Saturday or
    /// Sunday. Applies on every creation path.
    #[serde(default = "default_reject_weekends")]
    pub reject_weekend_assignments: bool,

    /// Project classification ("tipologia") label, uppercase, to the
    /// staffing bucket it reports under. Unknown labels fall back to
    /// `OtherBillable`.
    #[serde(default)]
    pub classification_buckets: HashMap<String, StaffingBucket>,
}

fn default_reject_weekends() -> bool {
    true
}

impl StaffingConfig {
    /// Load from the data/ directory.
    /// In tests, use StaffingConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/staffing/staffing_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: StaffingConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self::default()
    }

    /// Bucket for a project classification label. Matching is
    /// case-insensitive on the trimmed label.
    pub fn bucket_for(&self, classification: &str) -> StaffingBucket {
        let key = classification.trim().to_ascii_uppercase();
        self.classification_buckets
            .get(&key)
            .copied()
            .unwrap_or(StaffingBucket::OtherBillable)
    }
}

impl Default for StaffingConfig {
    fn default() -> Self {
        let mut buckets = HashMap::new();
        for (label, bucket) in [
            ("CLIENTE", StaffingBucket::BillableProject),
            ("PRODUCTO", StaffingBucket::InternalProduct),
            ("DISPONIBILIDAD", StaffingBucket::Availability),
            ("GESTION", StaffingBucket::Management),
            ("SOPORTE", StaffingBucket::Support),
        ] {
            buckets.insert(label.to_string(), bucket);
        }
        Self {
            reject_weekend_assignments: true,
            classification_buckets: buckets,
        }
    }
}
