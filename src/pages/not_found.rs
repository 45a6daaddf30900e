use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<section class="not-found">
			<h1>"Nothing pinned here"</h1>
			<p>"This page fell off the board."</p>
			<a href="/">"Back to the board"</a>
		</section>
	}
}
