use geo::{Bearing, Distance, Haversine, Point};

/// One nautical mile is exactly 1.852 km.
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;

/// The sixteen compass points, clockwise from north, 22.5° apart.
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Wraps a bearing in degrees into [0, 360).
pub fn normalize_bearing(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

pub fn nautical_miles(km: f64) -> f64 {
    km / KM_PER_NAUTICAL_MILE
}

/// Great-circle distance in meters and initial bearing in [0, 360) between
/// two (lat, lon) pairs.
pub fn distance_and_bearing(p1: (f64, f64), p2: (f64, f64)) -> (f64, f64) {
    let start = Point::new(p1.1, p1.0);
    let end = Point::new(p2.1, p2.0);
    let distance = Haversine.distance(start, end);
    let bearing = normalize_bearing(Haversine.bearing(start, end));
    (distance, bearing)
}

/// Great-circle length in meters of a path of (lat, lon) vertices.
pub fn path_length_meters(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|pair| {
            let start = Point::new(pair[0].1, pair[0].0);
            let end = Point::new(pair[1].1, pair[1].0);
            Haversine.distance(start, end)
        })
        .sum()
}

pub fn compass_label(degrees: f64) -> &'static str {
    let idx = (normalize_bearing(degrees) / 22.5).round() as usize % 16;
    COMPASS_POINTS[idx]
}

pub fn format_distance_nm(nm: f64) -> String {
    format!("{:.1} nm", nm)
}

pub fn format_bearing(degrees: f64) -> String {
    format!("Bearing: {:.0}° {}", degrees, compass_label(degrees))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearing_always_normalized() {
        for raw in [-720.5, -359.9, -180.0, -0.1, 0.0, 90.0, 359.9, 360.0, 720.0, 1234.5] {
            let b = normalize_bearing(raw);
            assert!((0.0..360.0).contains(&b), "raw {} normalized to {}", raw, b);
        }
    }

    #[test]
    fn compass_label_is_periodic() {
        for b in [-400.0, -90.0, 0.0, 11.2, 11.3, 45.0, 180.0, 202.4, 359.9] {
            assert_eq!(compass_label(b), compass_label(b + 360.0), "b = {}", b);
        }
    }

    #[test]
    fn sixteen_point_compass() {
        assert_eq!(compass_label(0.0), "N");
        assert_eq!(compass_label(22.5), "NNE");
        assert_eq!(compass_label(45.0), "NE");
        assert_eq!(compass_label(90.0), "E");
        assert_eq!(compass_label(135.0), "SE");
        assert_eq!(compass_label(180.0), "S");
        assert_eq!(compass_label(270.0), "W");
        assert_eq!(compass_label(348.8), "N");
        // Just below a sector boundary stays in the lower sector.
        assert_eq!(compass_label(11.2), "N");
    }

    #[test]
    fn nautical_mile_conversion_is_exact() {
        assert_eq!(nautical_miles(1.852), 1.0);
        assert_eq!(nautical_miles(0.0), 0.0);
        assert_eq!(nautical_miles(18.52), 18.52 / 1.852);
    }

    #[test]
    fn due_east_across_the_gulf() {
        let (_, bearing) = distance_and_bearing((36.85, 28.3), (36.85, 28.4));
        assert_eq!(bearing.round() as i64, 90);
        assert_eq!(compass_label(bearing), "E");
    }

    #[test]
    fn bodrum_to_marmaris_sanity() {
        // Bodrum (37.0344, 27.4295) to Marmaris (36.8510, 28.2740): roughly
        // 78 km east-south-east.
        let (meters, bearing) = distance_and_bearing((37.0344, 27.4295), (36.8510, 28.2740));
        let km = meters / 1000.0;
        assert!((70.0..86.0).contains(&km), "distance {} km", km);
        assert_eq!(compass_label(bearing), "ESE");
    }

    #[test]
    fn path_length_sums_segments() {
        let a = (36.85, 28.3);
        let b = (36.85, 28.4);
        let c = (36.95, 28.4);
        let (ab, _) = distance_and_bearing(a, b);
        let (bc, _) = distance_and_bearing(b, c);
        let total = path_length_meters(&[a, b, c]);
        assert!((total - (ab + bc)).abs() < 1e-6);
        assert_eq!(path_length_meters(&[a]), 0.0);
        assert_eq!(path_length_meters(&[]), 0.0);
    }
}
