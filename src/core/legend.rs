use crate::core::depth::DEPTH_BUCKETS;
use crate::domain::model::LegendEntry;

/// One entry per depth bucket, shallowest first. Closed buckets read
/// `"{lower}–{next_lower - 1} km"`, the open-ended last one `"{lower}+ km"`.
pub fn build_legend() -> Vec<LegendEntry> {
    DEPTH_BUCKETS
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let label = match DEPTH_BUCKETS.get(i + 1) {
                Some(next) => format!(
                    "{}\u{2013}{} km",
                    bucket.lower_bound_km,
                    next.lower_bound_km - 1.0
                ),
                None => format!("{}+ km", bucket.lower_bound_km),
            };
            LegendEntry {
                label,
                color: bucket.color,
            }
        })
        .collect()
}
