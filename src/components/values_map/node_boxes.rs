use leptos::prelude::*;

use super::geometry::Point;

/// Boxes are centered on their position; the stylesheet translates by -50%.
fn node_style(position: Point) -> String {
	format!("left: {}px; top: {}px;", position.x, position.y)
}

/// A value box. Clicking expands its definition; `highlighted` is driven by the
/// selected activity and combines with the local expanded state.
#[component]
pub fn ValueBox(
	id: String,
	label: String,
	definition: String,
	#[prop(into)] position: Signal<Point>,
	#[prop(into)] highlighted: Signal<bool>,
) -> impl IntoView {
	let (expanded, set_expanded) = signal(false);

	view! {
		<div
			id=id
			class="map-node value-node"
			class:expanded=move || expanded.get()
			class:highlighted=move || highlighted.get()
			style=move || node_style(position.get())
			on:click=move |_| set_expanded.update(|open| *open = !*open)
		>
			<h3 class="map-node__label">{label}</h3>
			{move || {
				expanded.get().then(|| view! { <p class="map-node__detail">{definition.clone()}</p> })
			}}
		</div>
	}
}

/// An activity box. Selection is owned by the canvas; clicking only reports the id.
#[component]
pub fn ActivityBox(
	id: String,
	label: String,
	location: String,
	duration: String,
	description: Option<String>,
	#[prop(into)] position: Signal<Point>,
	#[prop(into)] selected: Signal<bool>,
	#[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
	let click_id = id.clone();

	view! {
		<div
			id=id
			class="map-node activity-node"
			class:selected=move || selected.get()
			style=move || node_style(position.get())
			on:click=move |_| on_select.run(click_id.clone())
		>
			<p class="map-node__label">{label}</p>
			<p class="map-node__location">{location}</p>
			<p class="map-node__duration">{duration}</p>
			{move || {
				description
					.clone()
					.filter(|_| selected.get())
					.map(|text| view! { <p class="map-node__detail">{text}</p> })
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn render_activity(selected: bool) -> String {
		Owner::new().with(|| {
			let position = Point { x: 40.0, y: 60.0 };
			let on_select = Callback::new(|_: String| {});
			view! {
				<ActivityBox
					id="a1".to_string()
					label="Coordinator".to_string()
					location="Remote".to_string()
					duration="2025".to_string()
					description=Some("Ran the rollout".to_string())
					position
					selected
					on_select
				/>
			}
			.to_html()
		})
	}

	#[test]
	fn activity_description_only_while_selected() {
		let idle = render_activity(false);
		assert!(idle.contains("id=\"a1\""), "{idle}");
		assert!(idle.contains("left: 40px; top: 60px;"), "{idle}");
		assert!(!idle.contains("Ran the rollout"), "{idle}");

		let picked = render_activity(true);
		assert!(picked.contains("Ran the rollout"), "{picked}");
		assert!(picked.contains("selected"), "{picked}");
	}

	#[test]
	fn value_box_starts_collapsed_and_shows_highlight() {
		let html = Owner::new().with(|| {
			let position = Point::default();
			view! {
				<ValueBox
					id="v1".to_string()
					label="Care".to_string()
					definition="Look after people".to_string()
					position
					highlighted=true
				/>
			}
			.to_html()
		});
		assert!(html.contains("Care"), "{html}");
		assert!(html.contains("highlighted"), "{html}");
		assert!(!html.contains("Look after people"), "{html}");
		assert!(!html.contains("expanded"), "{html}");
	}
}
