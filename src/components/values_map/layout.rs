use super::geometry::Point;

/// Viewports narrower than this stack nodes vertically with doubled row spacing.
pub const MOBILE_BREAKPOINT: f64 = 768.0;
pub const MIN_CANVAS_HEIGHT: f64 = 400.0;
pub const INITIAL_CANVAS_HEIGHT: f64 = 600.0;

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Everything needed to turn a grid coordinate into canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
	pub canvas_width: f64,
	pub canvas_height: f64,
	pub viewport_width: f64,
	pub zoom: f64,
}

impl LayoutParams {
	fn baseline(&self) -> f64 {
		self.viewport_width / 10.0
	}

	pub fn horizontal_spacing(&self) -> f64 {
		self.baseline() * self.zoom
	}

	pub fn vertical_spacing(&self) -> f64 {
		let spacing = self.baseline() * self.zoom;
		if self.viewport_width < MOBILE_BREAKPOINT {
			spacing * 2.0
		} else {
			spacing
		}
	}

	/// Pixel center of a node at `(grid_x, grid_y)`, with the grid origin on the
	/// canvas midpoint.
	pub fn position(&self, grid_x: f64, grid_y: f64) -> Point {
		Point {
			x: self.canvas_width / 2.0 + grid_x * self.horizontal_spacing(),
			y: self.canvas_height / 2.0 + grid_y * self.vertical_spacing(),
		}
	}
}

/// Recompute the canvas height so the lowest node fits.
///
/// Height feeds back into positions through the midpoint offset, so the
/// previous height is used as input and the result is taken after one pass.
/// Returns `None` when there is nothing to measure yet (unmounted container or
/// no nodes), in which case the caller keeps its prior height.
pub fn fit_canvas_height(grid_rows: &[f64], previous: LayoutParams) -> Option<f64> {
	if previous.canvas_width <= 0.0 || grid_rows.is_empty() {
		return None;
	}
	let max_y = grid_rows
		.iter()
		.map(|&row| previous.position(0.0, row).y)
		.fold(f64::NEG_INFINITY, f64::max);
	Some(max_y.max(MIN_CANVAS_HEIGHT))
}

pub fn clamp_zoom(zoom: f64) -> f64 {
	zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// Step the zoom by `delta`, rounded to one decimal so repeated steps don't drift.
pub fn step_zoom(zoom: f64, delta: f64) -> f64 {
	clamp_zoom(((zoom + delta) * 10.0).round() / 10.0)
}
