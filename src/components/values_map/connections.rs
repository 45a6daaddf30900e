use std::time::Duration;

use js_sys::Date;
use leptos::ev;
use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, MouseEvent, TouchEvent};

use super::geometry::{Point, Rect};
use super::layout::LayoutParams;
use super::readiness::{PollStep, ReadinessPoll};
use super::scene::{
	Callout, ConnectorLine, DiagramState, Emphasis, HIT_STROKE_WIDTH, Measurements, PIN_RADIUS,
	build_scene,
};
use super::selection::LineSelection;
use super::types::Connection;

const CALLOUT_WIDTH: f64 = 200.0;
const CALLOUT_LINE_HEIGHT: f64 = 11.0;
const CALLOUT_PADDING: f64 = 4.0;

fn rect_of(el: &Element) -> Rect {
	let r = el.get_bounding_client_rect();
	Rect {
		left: r.left(),
		top: r.top(),
		width: r.width(),
		height: r.height(),
	}
}

fn all_present(ids: &[String]) -> bool {
	let document = document();
	ids.iter().all(|id| document.get_element_by_id(id).is_some())
}

/// Snapshot every referenced node relative to the surface. Missing nodes are left out.
fn measure(surface: &Element, connections: &[Connection]) -> Measurements {
	let document = document();
	let origin = rect_of(surface).origin();
	let mut measured = Measurements::default();
	for id in connections
		.iter()
		.flat_map(|c| [c.from.as_str(), c.to.as_str()])
	{
		if measured.contains(id) {
			continue;
		}
		if let Some(el) = document.get_element_by_id(id) {
			measured.insert(id, rect_of(&el).relative_to(origin));
		}
	}
	measured
}

fn is_line_target(target: Option<EventTarget>) -> bool {
	target
		.and_then(|t| t.dyn_into::<Element>().ok())
		.and_then(|el| el.closest("[data-line-hit]").ok().flatten())
		.is_some()
}

/// A pointer landed on the surface; anything but a line clears selection and hover.
fn clear_unless_on_line(lines: RwSignal<LineSelection>, on_line: bool) {
	if on_line {
		return;
	}
	if lines.with_untracked(|l| l.selected().is_some() || l.hovered().is_some()) {
		lines.update(LineSelection::clear);
	}
}

/// Waits for the watched nodes to mount, then flips `ready`.
#[derive(Clone, Copy)]
struct Poller {
	watched: StoredValue<Vec<String>>,
	poll: StoredValue<ReadinessPoll>,
	pending: StoredValue<Option<TimeoutHandle>>,
	ready: RwSignal<bool>,
}

impl Poller {
	fn attempt(self) {
		let present = self.watched.with_value(|ids| all_present(ids));
		let Some(step) = self.poll.try_update_value(|poll| poll.step(present)) else {
			return;
		};
		match step {
			PollStep::Draw { delay } => self.schedule(delay, move || {
				if !self.poll.with_value(ReadinessPoll::has_drawn) {
					debug!("connection lines: nodes mounted, first draw");
				}
				self.poll.update_value(ReadinessPoll::mark_drawn);
				self.ready.set(true);
			}),
			PollStep::Retry { delay } => self.schedule(delay, move || self.attempt()),
			PollStep::GiveUp { attempts } => {
				warn!("connection lines: nodes still missing after {attempts} checks, not drawing");
			}
		}
	}

	fn schedule(self, delay: Duration, f: impl FnOnce() + 'static) {
		let pending = self.pending;
		let scheduled = set_timeout_with_handle(
			move || {
				pending.set_value(None);
				f();
			},
			delay,
		);
		match scheduled {
			Ok(handle) => pending.set_value(Some(handle)),
			Err(err) => warn!("connection lines: could not schedule timer: {err:?}"),
		}
	}

	fn cancel(self) {
		if let Some(Some(handle)) = self.pending.try_update_value(Option::take) {
			handle.clear();
		}
	}
}

/// Re-measures node rectangles on the next frame. Requests made while one is
/// pending replace it.
#[derive(Clone, Copy)]
struct Redraw {
	surface: NodeRef<leptos::html::Div>,
	connections: StoredValue<Vec<Connection>>,
	measured: RwSignal<Measurements>,
	pending: StoredValue<Option<AnimationFrameRequestHandle>>,
}

impl Redraw {
	fn request(self) {
		self.cancel();
		let requested = request_animation_frame_with_handle(move || {
			self.pending.set_value(None);
			self.run();
		});
		match requested {
			Ok(handle) => self.pending.set_value(Some(handle)),
			Err(err) => warn!("connection lines: could not request frame: {err:?}"),
		}
	}

	fn run(self) {
		let Some(surface) = self.surface.get_untracked() else {
			return;
		};
		let started = Date::now();
		let next = self.connections.with_value(|c| measure(&surface, c));
		if next.is_empty() {
			debug!("connection lines: no nodes on the page");
		} else {
			debug!(
				"connection lines: measured {} nodes in {:.1}ms",
				next.len(),
				Date::now() - started
			);
		}
		self.measured.set(next);
	}

	fn cancel(self) {
		if let Some(Some(handle)) = self.pending.try_update_value(Option::take) {
			handle.cancel();
		}
	}
}

fn pin_view(at: Point, emphasis: Emphasis) -> impl IntoView {
	view! {
		<circle
			class="connection-lines__pin"
			cx=at.x.to_string()
			cy=at.y.to_string()
			r=PIN_RADIUS.to_string()
			fill=emphasis.pin_fill()
			pointer-events="none"
		/>
	}
}

fn connector_view(
	line: &ConnectorLine,
	selection: RwSignal<LineSelection>,
) -> impl IntoView + use<> {
	let path = line.path_data();
	let [start, end] = line.pins();
	let emphasis = line.emphasis;
	let line_id = line.id.clone();
	let (click_id, enter_id, leave_id) = (line.id.clone(), line.id.clone(), line.id.clone());

	view! {
		<path
			class="connection-lines__hit"
			d=path.clone()
			data-line-id=line_id
			data-line-hit="true"
			fill="none"
			stroke="transparent"
			stroke-width=HIT_STROKE_WIDTH.to_string()
			pointer-events="stroke"
			on:click=move |_| selection.update(|s| s.toggle_selected(&click_id))
			on:mouseenter=move |_| selection.update(|s| s.hover(&enter_id))
			on:mouseleave=move |_| selection.update(|s| s.unhover(&leave_id))
		/>
		<path
			class="connection-lines__string"
			d=path
			fill="none"
			stroke=emphasis.stroke()
			stroke-width=emphasis.stroke_width().to_string()
			stroke-linecap="round"
			opacity=emphasis.opacity().to_string()
			pointer-events="none"
		/>
		{pin_view(start, emphasis)}
		{pin_view(end, emphasis)}
	}
}

fn callout_view(callout: &Callout) -> impl IntoView + use<> {
	let height = callout.lines.len() as f64 * CALLOUT_LINE_HEIGHT + CALLOUT_PADDING * 2.0;
	let (left, top) = (callout.at.x - CALLOUT_WIDTH / 2.0, callout.at.y - height / 2.0);
	let baseline = top + CALLOUT_PADDING + CALLOUT_LINE_HEIGHT * 0.8;
	let x = callout.at.x.to_string();
	let rows = callout
		.lines
		.iter()
		.enumerate()
		.map(|(i, text)| {
			let dy = if i == 0 { 0.0 } else { CALLOUT_LINE_HEIGHT };
			view! {
				<tspan x=x.clone() dy=dy.to_string()>
					{text.clone()}
				</tspan>
			}
		})
		.collect_view();

	view! {
		<g class="connection-lines__callout" data-line-id=callout.line_id.clone()>
			<rect
				x=left.to_string()
				y=top.to_string()
				width=CALLOUT_WIDTH.to_string()
				height=height.to_string()
				rx="2"
			/>
			<text x=x.clone() y=baseline.to_string() text-anchor="middle">
				{rows}
			</text>
		</g>
	}
}

/// SVG overlay drawing a sagging string between every pair of connected nodes.
///
/// Node rectangles are read from the page by element id, so the strings follow
/// wherever the boxes actually render. Clicking a string toggles its callout;
/// clicking anywhere else on the surface clears it.
#[component]
pub fn ConnectionLines(
	connections: Vec<Connection>,
	/// Node ids that must exist before the first draw.
	watched: Vec<String>,
	#[prop(into)] selected_activity: Signal<Option<String>>,
	#[prop(into)] layout: Signal<LayoutParams>,
	/// Bumped when node boxes finish a transition.
	#[prop(into)]
	settled: Signal<u32>,
) -> impl IntoView {
	let surface_ref = NodeRef::<leptos::html::Div>::new();
	let connections = StoredValue::new(connections);
	let measured = RwSignal::new(Measurements::default());
	let lines = RwSignal::new(LineSelection::default());
	let ready = RwSignal::new(false);

	let poller = Poller {
		watched: StoredValue::new(watched),
		poll: StoredValue::new(ReadinessPoll::default()),
		pending: StoredValue::new(None),
		ready,
	};
	let redraw = Redraw {
		surface: surface_ref,
		connections,
		measured,
		pending: StoredValue::new(None),
	};

	Effect::new(move |started: Option<bool>| {
		if started == Some(true) {
			return true;
		}
		if surface_ref.get().is_none() {
			return false;
		}
		poller.attempt();
		true
	});

	Effect::new(move |_| {
		selected_activity.track();
		layout.track();
		settled.track();
		if ready.get() {
			redraw.request();
		}
	});

	let resize = window_event_listener(ev::resize, move |_| {
		if ready.get_untracked() {
			redraw.request();
		}
	});
	on_cleanup(move || {
		resize.remove();
		poller.cancel();
		redraw.cancel();
	});

	let scene = Memo::new(move |_| {
		let selected = selected_activity.get();
		lines.with(|lines| {
			measured.with(|measured| {
				connections.with_value(|connections| {
					build_scene(connections, measured, &DiagramState {
						selected_activity: selected.as_deref(),
						lines,
					})
				})
			})
		})
	});

	let clear_if_outside =
		move |target: Option<EventTarget>| clear_unless_on_line(lines, is_line_target(target));

	view! {
		<div
			node_ref=surface_ref
			class="connection-lines"
			on:click=move |event: MouseEvent| clear_if_outside(event.target())
			on:touchstart=move |event: TouchEvent| clear_if_outside(event.target())
		>
			<svg class="connection-lines__surface" width="100%" height="100%">
				{move || {
					scene
						.with(|scene| {
							scene
								.lines
								.iter()
								.map(|line| connector_view(line, lines))
								.collect_view()
						})
				}}
				{move || {
					scene.with(|scene| scene.callouts.iter().map(callout_view).collect_view())
				}}
			</svg>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::values_map::geometry::Curve;
	use crate::components::values_map::scene::BLANK_ROW;

	fn line(id: &str, emphasis: Emphasis) -> ConnectorLine {
		ConnectorLine {
			id: id.into(),
			curve: Curve::sagging(Point { x: 0.0, y: 0.0 }, Point { x: 200.0, y: 0.0 }),
			emphasis,
		}
	}

	#[test]
	fn outside_pointer_clears_selection_and_hover() {
		Owner::new().with(|| {
			let lines = RwSignal::new(LineSelection::default());
			lines.update(|l| {
				l.toggle_selected("a-b");
				l.hover("c-d");
			});
			clear_unless_on_line(lines, false);
			assert_eq!(lines.get_untracked(), LineSelection::default());
		});
	}

	#[test]
	fn pointer_on_a_line_keeps_selection() {
		Owner::new().with(|| {
			let lines = RwSignal::new(LineSelection::default());
			lines.update(|l| l.toggle_selected("a-b"));
			clear_unless_on_line(lines, true);
			assert!(lines.get_untracked().is_selected("a-b"));
		});
	}

	#[test]
	fn connector_markup_carries_hit_region_and_emphasis() {
		let html = Owner::new().with(|| {
			let lines = RwSignal::new(LineSelection::default());
			connector_view(&line("a-b", Emphasis::Related), lines).to_html()
		});
		assert!(html.contains("data-line-id=\"a-b\""), "{html}");
		assert!(html.contains("data-line-hit"), "{html}");
		assert!(html.contains("stroke-width=\"30\""), "{html}");
		assert!(html.contains("stroke=\"#DC2626\""), "{html}");
		assert!(html.contains("d=\"M 0 0 Q 100 10 200 0\""), "{html}");
		assert_eq!(html.matches("<circle").count(), 2, "{html}");
	}

	#[test]
	fn callout_markup_has_one_row_per_line() {
		let callout = Callout {
			line_id: "a-b".into(),
			at: Point { x: 100.0, y: 50.0 },
			lines: vec!["first".into(), BLANK_ROW.into(), "third".into()],
		};
		let html = Owner::new().with(|| callout_view(&callout).to_html());
		assert_eq!(html.matches("<tspan").count(), 3, "{html}");
		assert!(html.contains("first"), "{html}");
		assert!(html.contains(BLANK_ROW), "{html}");
		assert!(html.contains("third"), "{html}");
	}
}
