//! Pure description of what the connection layer draws for one pass.
//!
//! `build_scene` takes the declared connections, the node rectangles measured
//! in surface-local coordinates, and the current selection, and returns every
//! primitive to render. Rendering the result replaces the previous pass.

use std::collections::HashMap;

use super::geometry::{Curve, Point, Rect};
use super::selection::LineSelection;
use super::types::Connection;

pub const PIN_RADIUS: f64 = 6.0;
pub const HIT_STROKE_WIDTH: f64 = 30.0;
/// Callouts sit this far above the curve midpoint.
pub const CALLOUT_OFFSET: f64 = 18.0;

/// Stand-in for an empty callout row; an empty `tspan` collapses.
pub const BLANK_ROW: &str = "\u{a0}";

const DORMANT_RED: &str = "#B91C1C";
const BRIGHT_RED: &str = "#DC2626";

/// Visual weight of a line. Ordered so the strongest applicable flag wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Emphasis {
	Dormant,
	Related,
	Active,
}

impl Emphasis {
	pub fn stroke(self) -> &'static str {
		match self {
			Self::Dormant => DORMANT_RED,
			Self::Related | Self::Active => BRIGHT_RED,
		}
	}

	pub fn stroke_width(self) -> f64 {
		match self {
			Self::Dormant => 2.0,
			Self::Related => 3.0,
			Self::Active => 3.5,
		}
	}

	pub fn opacity(self) -> f64 {
		match self {
			Self::Dormant => 0.7,
			Self::Related => 0.9,
			Self::Active => 1.0,
		}
	}

	pub fn pin_fill(self) -> &'static str {
		self.stroke()
	}
}

/// Node rectangles keyed by element id, relative to the drawing surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Measurements {
	rects: HashMap<String, Rect>,
}

impl Measurements {
	pub fn insert(&mut self, id: impl Into<String>, rect: Rect) {
		self.rects.insert(id.into(), rect);
	}

	pub fn get(&self, id: &str) -> Option<&Rect> {
		self.rects.get(id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.rects.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.rects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rects.is_empty()
	}
}

#[derive(Clone, Copy, Debug)]
pub struct DiagramState<'a> {
	pub selected_activity: Option<&'a str>,
	pub lines: &'a LineSelection,
}

impl DiagramState<'_> {
	pub fn emphasis(&self, connection: &Connection, line_id: &str) -> Emphasis {
		let related = self
			.selected_activity
			.is_some_and(|activity| connection.touches(activity));
		let active = self.lines.is_selected(line_id) || self.lines.is_hovered(line_id);
		let mut emphasis = Emphasis::Dormant;
		if related {
			emphasis = emphasis.max(Emphasis::Related);
		}
		if active {
			emphasis = emphasis.max(Emphasis::Active);
		}
		emphasis
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorLine {
	pub id: String,
	pub curve: Curve,
	pub emphasis: Emphasis,
}

impl ConnectorLine {
	pub fn path_data(&self) -> String {
		self.curve.path_data()
	}

	pub fn pins(&self) -> [Point; 2] {
		[self.curve.start, self.curve.end]
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Callout {
	pub line_id: String,
	pub at: Point,
	pub lines: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub lines: Vec<ConnectorLine>,
	/// Drawn after every line so no callout is covered by another string.
	pub callouts: Vec<Callout>,
}

/// Split label text into rows. Blank rows keep their height.
fn callout_rows(text: &str) -> Vec<String> {
	text.lines()
		.map(|row| if row.trim().is_empty() { BLANK_ROW } else { row })
		.map(str::to_string)
		.collect()
}

pub fn build_scene(
	connections: &[Connection],
	measured: &Measurements,
	state: &DiagramState<'_>,
) -> Scene {
	let mut scene = Scene::default();
	for connection in connections {
		let (Some(from), Some(to)) = (measured.get(&connection.from), measured.get(&connection.to))
		else {
			continue;
		};
		let id = connection.line_id();
		let curve = Curve::between(from, to);

		if let Some(text) = connection.text.as_deref().filter(|t| !t.trim().is_empty()) {
			if state.lines.is_selected(&id) {
				let mid = curve.midpoint();
				scene.callouts.push(Callout {
					line_id: id.clone(),
					at: Point {
						x: mid.x,
						y: mid.y - CALLOUT_OFFSET,
					},
					lines: callout_rows(text),
				});
			}
		}

		scene.lines.push(ConnectorLine {
			emphasis: state.emphasis(connection, &id),
			id,
			curve,
		});
	}
	scene
}
