//! Mapping from normalized tablet coordinates to normalized output coordinates.
//!
//! Cropping works in the tablet's native orientation, so [`apply_active_area`]
//! must run before [`apply_rotation`]. Results are not clamped.

use crate::config::{ActiveArea, Rotation};

/// Stretches the configured sub-rectangle of the tablet over `[0, 1]`.
///
/// An axis on which the area does not fit inside the physical surface is
/// left as is.
pub fn apply_active_area(
    width_mm: f64,
    height_mm: f64,
    area: ActiveArea,
    x: f64,
    y: f64,
) -> (f64, f64) {
    if area.is_unset() || width_mm == 0.0 || height_mm == 0.0 {
        return (x, y);
    }

    let area_width = if area.width == 0.0 {
        width_mm - area.x
    } else {
        area.width
    };
    let area_height = if area.height == 0.0 {
        height_mm - area.y
    } else {
        area.height
    };

    let mut out = (x, y);
    if area.x + area_width <= width_mm {
        let offset = area.x / width_mm;
        out.0 = (x - offset) * width_mm / area_width;
    }
    if area.y + area_height <= height_mm {
        let offset = area.y / height_mm;
        out.1 = (y - offset) * height_mm / area_height;
    }
    out
}

pub fn apply_rotation(rotation: Rotation, x: f64, y: f64) -> (f64, f64) {
    match rotation {
        Rotation::None => (x, y),
        Rotation::Rotate90 => (1.0 - y, x),
        Rotation::Rotate180 => (1.0 - x, 1.0 - y),
        Rotation::Rotate270 => (y, 1.0 - x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < EPSILON && (actual.1 - expected.1).abs() < EPSILON,
            "expected {expected:?}, got {actual:?}"
        );
    }

    const SAMPLES: [(f64, f64); 5] = [(0.0, 0.0), (1.0, 0.0), (0.25, 0.75), (0.5, 0.5), (1.0, 1.0)];

    #[test]
    fn unset_area_is_identity() {
        for (x, y) in SAMPLES {
            assert_eq!(apply_active_area(152.0, 95.0, ActiveArea::default(), x, y), (x, y));
            assert_eq!(apply_active_area(0.0, 0.0, ActiveArea::default(), x, y), (x, y));
        }
    }

    #[test]
    fn unknown_physical_size_is_identity() {
        let area = ActiveArea::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(apply_active_area(0.0, 100.0, area, 0.3, 0.4), (0.3, 0.4));
        assert_eq!(apply_active_area(100.0, 0.0, area, 0.3, 0.4), (0.3, 0.4));
    }

    #[test]
    fn area_is_stretched_over_the_output() {
        let area = ActiveArea::new(10.0, 0.0, 80.0, 0.0);
        assert_close(apply_active_area(100.0, 60.0, area, 0.5, 0.3), (0.5, 0.3));
        assert_close(apply_active_area(100.0, 60.0, area, 0.1, 0.3), (0.0, 0.3));
        assert_close(apply_active_area(100.0, 60.0, area, 0.9, 0.3), (1.0, 0.3));
    }

    #[test]
    fn zero_size_extends_to_the_edge() {
        let area = ActiveArea::new(20.0, 30.0, 0.0, 0.0);
        // effective area is 80mm x 30mm
        assert_close(apply_active_area(100.0, 60.0, area, 0.2, 0.5), (0.0, 0.0));
        assert_close(apply_active_area(100.0, 60.0, area, 1.0, 1.0), (1.0, 1.0));
        assert_close(apply_active_area(100.0, 60.0, area, 0.6, 0.75), (0.5, 0.5));
    }

    #[test]
    fn points_outside_the_area_are_not_clamped() {
        let area = ActiveArea::new(10.0, 0.0, 80.0, 0.0);
        let (x, _) = apply_active_area(100.0, 60.0, area, 0.0, 0.0);
        assert!(x < 0.0);
        let (x, _) = apply_active_area(100.0, 60.0, area, 1.0, 0.0);
        assert!(x > 1.0);
    }

    #[test]
    fn overflowing_axis_is_left_alone() {
        let area = ActiveArea::new(50.0, 10.0, 80.0, 40.0);
        let (x, y) = apply_active_area(100.0, 60.0, area, 0.7, 0.5);
        assert_eq!(x, 0.7);
        assert_close((x, y), (0.7, (0.5 - 10.0 / 60.0) * 60.0 / 40.0));
    }

    #[test]
    fn rotations() {
        assert_eq!(apply_rotation(Rotation::None, 0.2, 0.7), (0.2, 0.7));
        assert_close(apply_rotation(Rotation::Rotate90, 0.2, 0.7), (0.3, 0.2));
        assert_close(apply_rotation(Rotation::Rotate180, 0.2, 0.7), (0.8, 0.3));
        assert_close(apply_rotation(Rotation::Rotate270, 0.2, 0.7), (0.7, 0.8));
    }

    #[test]
    fn rotations_map_corners_onto_corners() {
        let corners = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
        for rotation in [
            Rotation::None,
            Rotation::Rotate90,
            Rotation::Rotate180,
            Rotation::Rotate270,
        ] {
            let mut mapped: Vec<_> = corners
                .iter()
                .map(|&(x, y)| apply_rotation(rotation, x, y))
                .collect();
            mapped.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let mut expected = corners.to_vec();
            expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(mapped, expected, "{rotation:?}");
        }
    }

    #[test]
    fn rotation_cycles() {
        for (x, y) in SAMPLES {
            let mut p = (x, y);
            for _ in 0..4 {
                p = apply_rotation(Rotation::Rotate90, p.0, p.1);
            }
            assert_close(p, (x, y));

            let once = apply_rotation(Rotation::Rotate180, x, y);
            assert_close(apply_rotation(Rotation::Rotate180, once.0, once.1), (x, y));

            let quarter = apply_rotation(Rotation::Rotate90, x, y);
            assert_close(apply_rotation(Rotation::Rotate270, quarter.0, quarter.1), (x, y));
        }
    }
}
