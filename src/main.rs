use leptos::prelude::*;
use pinboard_values_map::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(|| view! { <App /> })
}
