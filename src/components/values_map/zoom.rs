use leptos::prelude::*;

use super::layout::{ZOOM_MAX, ZOOM_MIN, ZOOM_STEP, step_zoom};

fn zoom_in(zoom: RwSignal<f64>) {
	zoom.update(|z| *z = step_zoom(*z, ZOOM_STEP));
}

fn zoom_out(zoom: RwSignal<f64>) {
	zoom.update(|z| *z = step_zoom(*z, -ZOOM_STEP));
}

#[component]
pub fn ZoomControls(zoom: RwSignal<f64>) -> impl IntoView {
	view! {
		<div class="zoom-controls">
			<button
				class="zoom-controls__button"
				title="Zoom in"
				disabled=move || { zoom.get() >= ZOOM_MAX }
				on:click=move |_| zoom_in(zoom)
			>
				"+"
			</button>
			<button
				class="zoom-controls__button"
				title="Zoom out"
				disabled=move || { zoom.get() <= ZOOM_MIN }
				on:click=move |_| zoom_out(zoom)
			>
				"−"
			</button>
		</div>
	}
}
