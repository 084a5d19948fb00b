use geomarket_core::error::{MarketError, Result};
use geomarket_core::models::LatLng;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// Fold the errors into a single `InvalidGeometry`
    pub fn into_result(self) -> Result<()> {
        if self.is_valid {
            return Ok(());
        }
        let reason = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.location, e.reason))
            .collect::<Vec<_>>()
            .join("; ");
        Err(MarketError::InvalidGeometry { reason })
    }
}

/// Validate a circle AOI: finite in-range center and a positive radius
pub fn validate_circle(center: LatLng, radius_km: f64) -> ValidationResult {
    let mut result = ValidationResult::valid();
    check_position(&mut result, "Circle center".to_string(), center.lng, center.lat);

    if !radius_km.is_finite() || radius_km <= 0.0 {
        result.add_error(
            "Circle radius".to_string(),
            format!("Radius must be a positive number of kilometres, got {}", radius_km),
        );
    }
    result
}

/// Validate polygon vertices given as `[lng, lat]`
pub fn validate_polygon(vertices: &[[f64; 2]]) -> ValidationResult {
    let mut result = ValidationResult::valid();

    for (i, [lng, lat]) in vertices.iter().copied().enumerate() {
        check_position(&mut result, format!("Polygon[{}]", i), lng, lat);
    }

    let distinct = distinct_vertex_count(vertices);
    if distinct < 3 {
        result.add_error(
            "Polygon".to_string(),
            format!("Polygon must have at least 3 distinct vertices, found {}", distinct),
        );
    }
    result
}

fn check_position(result: &mut ValidationResult, location: String, lng: f64, lat: f64) {
    if !lng.is_finite() || !lat.is_finite() {
        result.add_error(location, "Coordinates must be finite".to_string());
        return;
    }
    if !(-90.0..=90.0).contains(&lat) {
        result.add_error(location.clone(), format!("Latitude {} is outside [-90, 90]", lat));
    }
    if !(-180.0..=180.0).contains(&lng) {
        result.add_error(location, format!("Longitude {} is outside [-180, 180]", lng));
    }
}

fn distinct_vertex_count(vertices: &[[f64; 2]]) -> usize {
    let mut seen: Vec<[f64; 2]> = Vec::with_capacity(vertices.len());
    for v in vertices {
        if !seen.contains(v) {
            seen.push(*v);
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_circle() {
        assert!(validate_circle(LatLng::new(-6.2, 106.8), 10.0).is_valid);
    }

    #[test]
    fn test_circle_rejects_zero_radius() {
        let result = validate_circle(LatLng::new(0.0, 0.0), 0.0);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].location, "Circle radius");
    }

    #[test]
    fn test_circle_rejects_out_of_range_center() {
        let result = validate_circle(LatLng::new(91.0, 200.0), 5.0);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_polygon_needs_three_distinct_vertices() {
        let closed_line = [[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        assert!(!validate_polygon(&closed_line).is_valid);

        let triangle = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]];
        assert!(validate_polygon(&triangle).is_valid);
    }

    #[test]
    fn test_polygon_rejects_nan() {
        let result = validate_polygon(&[[f64::NAN, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].location, "Polygon[0]");
    }

    #[test]
    fn test_into_result_joins_reasons() {
        let err = validate_circle(LatLng::new(0.0, 0.0), -1.0).into_result().unwrap_err();
        assert!(matches!(err, MarketError::InvalidGeometry { ref reason } if reason.contains("Circle radius")));
    }
}
