use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, TransitionEvent};

use super::connections::ConnectionLines;
use super::layout::{INITIAL_CANVAS_HEIGHT, LayoutParams, fit_canvas_height};
use super::node_boxes::{ActivityBox, ValueBox};
use super::selection::{is_value_highlighted, toggle};
use super::types::MapConfig;
use super::zoom::ZoomControls;

/// Transitions on node boxes move their rectangles; anything else is noise.
fn is_node_transition(event: &TransitionEvent) -> bool {
	event.target()
		.and_then(|t| t.dyn_into::<Element>().ok())
		.is_some_and(|el| el.matches(".map-node").unwrap_or(false))
}

/// Toggle-select `id` as the map's one selected activity.
fn select_activity(selected: RwSignal<Option<String>>, id: &str) {
	selected.update(|current| *current = toggle(current.as_deref(), id));
}

/// The values map: value and activity boxes laid out on a grid, with strings
/// between related nodes.
///
/// Owns the selected activity. Value boxes derive their highlight from it and
/// the connection layer reads it for line emphasis.
#[component]
pub fn ValuesMap(config: MapConfig) -> impl IntoView {
	let watched = config.watched_ids();
	let grid_rows = StoredValue::new(config.grid_rows());
	let links = StoredValue::new(config.connections.clone());

	let container_ref = NodeRef::<leptos::html::Div>::new();
	let container_width = RwSignal::new(0.0);
	let viewport_width = RwSignal::new(0.0);
	let canvas_height = RwSignal::new(INITIAL_CANVAS_HEIGHT);
	let zoom = RwSignal::new(1.0);
	let selected_activity = RwSignal::new(None::<String>);
	let settled = RwSignal::new(0u32);

	let layout = Memo::new(move |_| LayoutParams {
		canvas_width: container_width.get(),
		canvas_height: canvas_height.get(),
		viewport_width: viewport_width.get(),
		zoom: zoom.get(),
	});

	let measure_container = move || {
		if let Some(container) = container_ref.get_untracked() {
			container_width.set(container.get_bounding_client_rect().width());
		}
		if let Some(width) = window().inner_width().ok().and_then(|w| w.as_f64()) {
			viewport_width.set(width);
		}
	};
	Effect::new(move |_| {
		if container_ref.get().is_some() {
			measure_container();
		}
	});
	let resize = window_event_listener(ev::resize, move |_| measure_container());
	on_cleanup(move || resize.remove());

	// Height is fitted from the previous height in a single pass; spacing does
	// not depend on height, so this settles without iterating.
	Effect::new(move |_| {
		let previous = LayoutParams {
			canvas_width: container_width.get(),
			canvas_height: canvas_height.get_untracked(),
			viewport_width: viewport_width.get(),
			zoom: zoom.get(),
		};
		if let Some(height) = grid_rows.with_value(|rows| fit_canvas_height(rows, previous)) {
			if height != previous.canvas_height {
				canvas_height.set(height);
			}
		}
	});

	let on_select = move |id: String| select_activity(selected_activity, &id);

	let value_boxes = config
		.values
		.into_iter()
		.map(|value| {
			let (grid_x, grid_y) = (value.x, value.y);
			let value_id = value.id.clone();
			let highlighted = Signal::derive(move || {
				let selected = selected_activity.get();
				links.with_value(|c| is_value_highlighted(c, selected.as_deref(), &value_id))
			});
			view! {
				<ValueBox
					id=value.id
					label=value.label
					definition=value.definition
					position=Signal::derive(move || layout.get().position(grid_x, grid_y))
					highlighted
				/>
			}
		})
		.collect_view();

	let activity_boxes = config
		.activities
		.into_iter()
		.map(|activity| {
			let (grid_x, grid_y) = (activity.x, activity.y);
			let activity_id = activity.id.clone();
			let selected = Signal::derive(move || {
				selected_activity.with(|s| s.as_deref() == Some(activity_id.as_str()))
			});
			view! {
				<ActivityBox
					id=activity.id
					label=activity.label
					location=activity.location
					duration=activity.duration
					description=activity.description
					position=Signal::derive(move || layout.get().position(grid_x, grid_y))
					selected
					on_select
				/>
			}
		})
		.collect_view();

	view! {
		<div class="values-map" style=move || format!("min-height: {}px;", canvas_height.get())>
			<div class="values-map__zoom">
				<ZoomControls zoom />
			</div>
			<div
				node_ref=container_ref
				class="values-map__canvas"
				style=move || format!("height: {}px;", canvas_height.get())
				on:transitionend=move |event: TransitionEvent| {
					if is_node_transition(&event) {
						settled.update(|n| *n = n.wrapping_add(1));
					}
				}
			>
				<ConnectionLines
					connections=config.connections
					watched
					selected_activity
					layout
					settled
				/>
				{value_boxes}
				{activity_boxes}
			</div>
		</div>
	}
}
