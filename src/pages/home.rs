use leptos::prelude::*;

use crate::components::navigator::ArchitectureNavigator;

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
			<main class="page">
				<header class="page-header">
					<h1>"Agentic Threat Navigator"</h1>
					<p class="subtitle">
						"Click a node to focus its neighborhood. Drag to pin, scroll to zoom, drag the background to pan."
					</p>
				</header>
				<ArchitectureNavigator />
			</main>
		</ErrorBoundary>
	}
}
