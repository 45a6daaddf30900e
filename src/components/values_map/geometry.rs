/// How far the string droops at its midpoint, as a fraction of its length.
pub const SAG_RATIO: f64 = 0.05;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn distance(self, other: Point) -> f64 {
		(other.x - self.x).hypot(other.y - self.y)
	}

	pub fn midpoint(self, other: Point) -> Point {
		Point {
			x: (self.x + other.x) / 2.0,
			y: (self.y + other.y) / 2.0,
		}
	}
}

/// An axis-aligned rectangle in some coordinate space (viewport or surface-local).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn bottom(&self) -> f64 {
		self.top + self.height
	}

	pub fn origin(&self) -> Point {
		Point {
			x: self.left,
			y: self.top,
		}
	}

	pub fn center(&self) -> Point {
		Point {
			x: self.left + self.width / 2.0,
			y: self.top + self.height / 2.0,
		}
	}

	/// The same rectangle expressed relative to `origin`.
	pub fn relative_to(&self, origin: Point) -> Rect {
		Rect {
			left: self.left - origin.x,
			top: self.top - origin.y,
			..*self
		}
	}

	/// Where a string toward `other` leaves this box: the bottom edge when
	/// `other` is strictly lower, the top edge otherwise.
	pub fn facing_anchor(&self, other: Point) -> Point {
		let center = self.center();
		let y = if other.y > center.y {
			self.bottom()
		} else {
			self.top
		};
		Point { x: center.x, y }
	}
}

/// A quadratic Bezier between two anchors with one sagging control point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Curve {
	pub start: Point,
	pub control: Point,
	pub end: Point,
}

impl Curve {
	/// Connect two boxes edge to edge, each end on the side facing the other.
	pub fn between(from: &Rect, to: &Rect) -> Self {
		let start = from.facing_anchor(to.center());
		let end = to.facing_anchor(from.center());
		Self::sagging(start, end)
	}

	pub fn sagging(start: Point, end: Point) -> Self {
		let mid = start.midpoint(end);
		let distance = start.distance(end);
		// Coincident anchors have no perpendicular; draw straight.
		if distance <= f64::EPSILON {
			return Self {
				start,
				control: mid,
				end,
			};
		}
		let sag = distance * SAG_RATIO;
		let (perp_x, perp_y) = (-(end.y - start.y) / distance, (end.x - start.x) / distance);
		Self {
			start,
			control: Point {
				x: mid.x + perp_x * sag,
				y: mid.y + perp_y * sag,
			},
			end,
		}
	}

	/// Point on the curve at t = 0.5.
	pub fn midpoint(&self) -> Point {
		Point {
			x: 0.25 * self.start.x + 0.5 * self.control.x + 0.25 * self.end.x,
			y: 0.25 * self.start.y + 0.5 * self.control.y + 0.25 * self.end.y,
		}
	}

	/// SVG `d` attribute.
	pub fn path_data(&self) -> String {
		format!(
			"M {} {} Q {} {} {} {}",
			self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rect(cx: f64, cy: f64) -> Rect {
		Rect {
			left: cx - 50.0,
			top: cy - 20.0,
			width: 100.0,
			height: 40.0,
		}
	}

	#[test]
	fn origin_leaves_from_bottom_when_target_is_below() {
		let (from, to) = (rect(400.0, 60.0), rect(400.0, 300.0));
		let curve = Curve::between(&from, &to);
		assert_eq!(curve.start, Point { x: 400.0, y: from.bottom() });
		assert_eq!(curve.end, Point { x: 400.0, y: to.top });
	}

	#[test]
	fn origin_leaves_from_top_when_target_is_above() {
		let (from, to) = (rect(200.0, 300.0), rect(500.0, 100.0));
		let curve = Curve::between(&from, &to);
		assert_eq!(curve.start, Point { x: 200.0, y: from.top });
		assert_eq!(curve.end, Point { x: 500.0, y: to.bottom() });
	}

	#[test]
	fn control_point_sags_perpendicular_to_the_line() {
		let curve = Curve::sagging(Point { x: 0.0, y: 0.0 }, Point { x: 200.0, y: 0.0 });
		assert_eq!(curve.control, Point { x: 100.0, y: 10.0 });
		assert_eq!(curve.midpoint(), Point { x: 100.0, y: 5.0 });
		assert_eq!(curve.path_data(), "M 0 0 Q 100 10 200 0");
	}

	#[test]
	fn coincident_anchors_draw_straight_without_nan() {
		let p = Point { x: 40.0, y: 40.0 };
		let curve = Curve::sagging(p, p);
		assert_eq!(curve.control, p);
		assert!(!curve.path_data().contains("NaN"));

		let same = rect(100.0, 100.0);
		let curve = Curve::between(&same, &same);
		for point in [curve.start, curve.control, curve.end] {
			assert!(point.x.is_finite() && point.y.is_finite());
		}
	}

	#[test]
	fn relative_to_shifts_only_the_origin() {
		let r = Rect {
			left: 150.0,
			top: 90.0,
			width: 10.0,
			height: 20.0,
		};
		let local = r.relative_to(Point { x: 100.0, y: 50.0 });
		assert_eq!(local.origin(), Point { x: 50.0, y: 40.0 });
		assert_eq!((local.width, local.height), (10.0, 20.0));
	}
}
