use crate::domain::model::{ColorCode, DepthBucket};

/// Depth buckets in ascending order of lower bound. Bucket `i` covers
/// `[lower_i, lower_{i+1})`; the first also takes everything shallower than
/// its lower bound and the last everything deeper.
///
/// Both marker colouring and the legend read this table.
pub const DEPTH_BUCKETS: [DepthBucket; 6] = [
    DepthBucket { lower_bound_km: -10.0, color: "#00ff00" },
    DepthBucket { lower_bound_km: 10.0, color: "#80ff00" },
    DepthBucket { lower_bound_km: 30.0, color: "#ffff00" },
    DepthBucket { lower_bound_km: 50.0, color: "#ffbf00" },
    DepthBucket { lower_bound_km: 70.0, color: "#ff8000" },
    DepthBucket { lower_bound_km: 90.0, color: "#ff0000" },
];

/// Index into [`DEPTH_BUCKETS`] of the bucket containing `depth_km`.
///
/// NaN lands in the last bucket; callers are expected to pass finite depths.
pub fn bucket_index(depth_km: f64) -> usize {
    DEPTH_BUCKETS
        .windows(2)
        .position(|pair| depth_km < pair[1].lower_bound_km)
        .unwrap_or(DEPTH_BUCKETS.len() - 1)
}

/// Fill colour for an earthquake at `depth_km` kilometres.
pub fn classify_depth(depth_km: f64) -> ColorCode {
    DEPTH_BUCKETS[bucket_index(depth_km)].color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_depth_boundaries() {
        assert_eq!(classify_depth(-10.0), "#00ff00");
        assert_eq!(classify_depth(9.99), "#00ff00");
        assert_eq!(classify_depth(10.0), "#80ff00");
        assert_eq!(classify_depth(29.999), "#80ff00");
        assert_eq!(classify_depth(30.0), "#ffff00");
        assert_eq!(classify_depth(50.0), "#ffbf00");
        assert_eq!(classify_depth(70.0), "#ff8000");
        assert_eq!(classify_depth(89.9), "#ff8000");
        assert_eq!(classify_depth(90.0), "#ff0000");
    }

    #[test]
    fn test_classify_depth_open_ends() {
        assert_eq!(classify_depth(-50.0), "#00ff00");
        assert_eq!(classify_depth(1000.0), "#ff0000");
        assert_eq!(classify_depth(f64::INFINITY), "#ff0000");
        assert_eq!(classify_depth(f64::NEG_INFINITY), "#00ff00");
    }

    #[test]
    fn test_bucket_table_is_strictly_ascending() {
        for pair in DEPTH_BUCKETS.windows(2) {
            assert!(pair[0].lower_bound_km < pair[1].lower_bound_km);
        }
    }

    #[test]
    fn test_classify_depth_is_monotonic() {
        let mut previous = bucket_index(-100.0);
        let mut depth = -100.0;
        while depth <= 200.0 {
            let index = bucket_index(depth);
            assert!(index >= previous, "bucket went backwards at {} km", depth);
            assert_eq!(classify_depth(depth), DEPTH_BUCKETS[index].color);
            previous = index;
            depth += 0.25;
        }
        assert_eq!(previous, DEPTH_BUCKETS.len() - 1);
    }

    #[test]
    fn test_every_depth_maps_to_a_table_colour() {
        let colors: Vec<_> = DEPTH_BUCKETS.iter().map(|b| b.color).collect();
        for depth in [-1e6, -10.5, 0.0, 15.0, 45.0, 65.0, 85.0, 700.0] {
            assert!(colors.contains(&classify_depth(depth)));
        }
    }
}
