use serde::{Deserialize, Serialize};
use std::fmt;

pub const USGS_SUMMARY_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Time window covered by a USGS summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FeedPeriod {
    Hour,
    Day,
    #[default]
    Week,
    Month,
}

/// Minimum magnitude class of a USGS summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum FeedLevel {
    #[serde(rename = "significant")]
    #[cfg_attr(feature = "cli", value(name = "significant"))]
    Significant,
    #[serde(rename = "4.5")]
    #[cfg_attr(feature = "cli", value(name = "4.5"))]
    M4_5,
    #[serde(rename = "2.5")]
    #[cfg_attr(feature = "cli", value(name = "2.5"))]
    M2_5,
    #[serde(rename = "1.0")]
    #[cfg_attr(feature = "cli", value(name = "1.0"))]
    M1_0,
    #[default]
    #[serde(rename = "all")]
    #[cfg_attr(feature = "cli", value(name = "all"))]
    All,
}

impl FeedPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedPeriod::Hour => "hour",
            FeedPeriod::Day => "day",
            FeedPeriod::Week => "week",
            FeedPeriod::Month => "month",
        }
    }
}

impl FeedLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedLevel::Significant => "significant",
            FeedLevel::M4_5 => "4.5",
            FeedLevel::M2_5 => "2.5",
            FeedLevel::M1_0 => "1.0",
            FeedLevel::All => "all",
        }
    }
}

impl fmt::Display for FeedPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL of the USGS summary feed for a level and period, e.g.
/// `.../summary/all_week.geojson`.
pub fn summary_feed_url(level: FeedLevel, period: FeedPeriod) -> String {
    format!(
        "{}/{}_{}.geojson",
        USGS_SUMMARY_BASE,
        level.as_str(),
        period.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_feed_is_all_week() {
        assert_eq!(
            summary_feed_url(FeedLevel::default(), FeedPeriod::default()),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"
        );
    }

    #[test]
    fn test_summary_feed_url_variants() {
        assert!(summary_feed_url(FeedLevel::M4_5, FeedPeriod::Day).ends_with("/4.5_day.geojson"));
        assert!(summary_feed_url(FeedLevel::Significant, FeedPeriod::Month)
            .ends_with("/significant_month.geojson"));
    }

    #[test]
    fn test_level_names_in_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            level: FeedLevel,
            period: FeedPeriod,
        }

        let parsed: Wrapper = toml::from_str("level = \"2.5\"\nperiod = \"hour\"").unwrap();
        assert_eq!(parsed.level, FeedLevel::M2_5);
        assert_eq!(parsed.period, FeedPeriod::Hour);
    }
}
