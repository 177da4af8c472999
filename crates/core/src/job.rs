//! Job identifiers and parameter payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::AnalyticsError;

/// Parameter payload handed to a job: a JSON object, possibly empty.
pub type JobParams = Map<String, JsonValue>;

/// The closed set of analytics jobs this runner can execute.
///
/// Dispatch is an exhaustive match on this enum; unknown names are rejected
/// at parse time with a typed error, before any engine or store work.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobName {
    LowStock,
    TopSellers,
    InactiveProducts,
    TotalMovements,
    RecentAlerts,
    StockByCategory,
}

impl JobName {
    pub const ALL: [JobName; 6] = [
        JobName::LowStock,
        JobName::TopSellers,
        JobName::InactiveProducts,
        JobName::TotalMovements,
        JobName::RecentAlerts,
        JobName::StockByCategory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobName::LowStock => "low_stock",
            JobName::TopSellers => "top_sellers",
            JobName::InactiveProducts => "inactive_products",
            JobName::TotalMovements => "total_movements",
            JobName::RecentAlerts => "recent_alerts",
            JobName::StockByCategory => "stock_by_category",
        }
    }
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobName {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low_stock" => Ok(JobName::LowStock),
            "top_sellers" => Ok(JobName::TopSellers),
            "inactive_products" => Ok(JobName::InactiveProducts),
            "total_movements" => Ok(JobName::TotalMovements),
            "recent_alerts" => Ok(JobName::RecentAlerts),
            "stock_by_category" => Ok(JobName::StockByCategory),
            other => Err(AnalyticsError::unknown_job(other)),
        }
    }
}
