use leptos::prelude::*;

use crate::components::values_map::{ValuesMap, config};

const INSTRUCTIONS: &[&str] = &[
	"Click activities to see details and highlight values.",
	"Click values to expand definitions.",
	"Tap connection lines to see relationships.",
];

/// Pinned paper title with an instructions tooltip, joined to the map below it.
#[component]
fn ValuesSection() -> impl IntoView {
	let (show_tips, set_show_tips) = signal(false);

	view! {
		<section class="values-section">
			<Show when=move || show_tips.get()>
				<div class="values-section__tips" role="tooltip">
					<p class="values-section__tips-title">"Instructions:"</p>
					<ul>
						{INSTRUCTIONS.iter().map(|tip| view! { <li>{*tip}</li> }).collect_view()}
					</ul>
				</div>
			</Show>
			<header class="paper paper--title">
				<span class="pushpin pushpin--small pushpin--blue"></span>
				<h2>"Values in Action"</h2>
				<button
					class="values-section__info"
					tabindex="0"
					on:mouseenter=move |_| set_show_tips.set(true)
					on:mouseleave=move |_| set_show_tips.set(false)
					on:focus=move |_| set_show_tips.set(true)
					on:blur=move |_| set_show_tips.set(false)
				>
					"i"
				</button>
			</header>
			<div class="paper paper--map">
				{config::load().map(|config| view! { <ValuesMap config /> })}
			</div>
		</section>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<main class="board">
				<ValuesSection />
			</main>
		</ErrorBoundary>
	}
}
