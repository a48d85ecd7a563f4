use kurbo::{Point, Rect};

/// Vertices of a star polygon: `point_count * 2` points alternating between
/// the outer and inner radius, stepping `PI / point_count` per vertex.
/// Vertex 0 sits straight above the center.
pub fn star_points(cx: f64, cy: f64, outer_radius: f64, inner_radius: f64, point_count: u32) -> Vec<Point> {
    let n = point_count as f64;
    (0..point_count * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer_radius } else { inner_radius };
            let angle = std::f64::consts::PI / n * i as f64;
            Point::new(cx + r * angle.sin(), cy - r * angle.cos())
        })
        .collect()
}

/// Regular hexagon: the single-radius case, 6 vertices at `i * PI / 3`.
pub fn hexagon_points(cx: f64, cy: f64, radius: f64) -> Vec<Point> {
    (0..6)
        .map(|i| {
            let angle = std::f64::consts::PI / 3.0 * i as f64;
            Point::new(cx + radius * angle.sin(), cy - radius * angle.cos())
        })
        .collect()
}

/// Axis-aligned bounds of a vertex list. Callers guarantee a non-empty list.
pub fn points_bounds(points: &[Point]) -> Rect {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        if p.x < min_x { min_x = p.x; }
        if p.x > max_x { max_x = p.x; }
        if p.y < min_y { min_y = p.y; }
        if p.y > max_y { max_y = p.y; }
    }
    Rect::new(min_x, min_y, max_x, max_y)
}

/// Bounds of `rect` rotated by `degrees` about its own center.
pub fn rotated_bounds(rect: Rect, degrees: f64) -> Rect {
    let rad = degrees.to_radians();
    if rad == 0.0 {
        return rect;
    }
    let (sin_r, cos_r) = rad.sin_cos();
    let cx = rect.center().x;
    let cy = rect.center().y;
    let hw = rect.width() / 2.0;
    let hh = rect.height() / 2.0;

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (px, py) in [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)] {
        let wx = cx + px * cos_r - py * sin_r;
        let wy = cy + px * sin_r + py * cos_r;
        if wx < min_x { min_x = wx; }
        if wx > max_x { max_x = wx; }
        if wy < min_y { min_y = wy; }
        if wy > max_y { max_y = wy; }
    }
    Rect::new(min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn star_first_vertex_is_on_top() {
        let pts = star_points(0.0, 0.0, 50.0, 20.0, 5);
        assert_eq!(pts.len(), 10);
        assert!(close(pts[0].x, 0.0));
        assert!(close(pts[0].y, -50.0));
    }

    #[test]
    fn star_second_vertex_uses_inner_radius() {
        let pts = star_points(0.0, 0.0, 50.0, 20.0, 5);
        let angle = std::f64::consts::PI / 5.0;
        assert!(close(pts[1].x, 20.0 * angle.sin()));
        assert!(close(pts[1].y, -20.0 * angle.cos()));
    }

    #[test]
    fn hexagon_spans_the_full_vertical_diameter() {
        let b = points_bounds(&hexagon_points(0.0, 0.0, 50.0));
        assert!(close(b.min_y(), -50.0));
        assert!(close(b.max_y(), 50.0));
        // Horizontal extent is sin(60 deg) * r on either side.
        assert!(close(b.max_x(), 50.0 * (std::f64::consts::PI / 3.0).sin()));
    }

    #[test]
    fn rotating_a_square_by_45_degrees_grows_its_bounds() {
        let b = rotated_bounds(Rect::new(0.0, 0.0, 70.0, 70.0), 45.0);
        let diag = 70.0 * 2.0_f64.sqrt();
        assert!(close(b.width(), diag));
        assert!(close(b.height(), diag));
        assert!(close(b.center().x, 35.0));
        assert!(close(b.center().y, 35.0));
    }
}
