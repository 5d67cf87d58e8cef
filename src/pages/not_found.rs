use leptos::prelude::*;
use leptos_router::components::A;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<main class="page not-found">
			<h1>"Page not found"</h1>
			<p>"There is nothing at this address."</p>
			<A href="/">"Back to the navigator"</A>
		</main>
	}
}
