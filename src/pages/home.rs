use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::force_graph::ForceGraphCanvas;
use crate::config::GraphConfig;
use crate::data::load_graph;
use crate::error::LoadError;

/// Default Home Page: the artist/concert graph, fullscreen.
///
/// `?data=<url>` picks another dataset, `?limit=<n>` changes how many artists
/// are shown.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let config = query.with_untracked(|q| {
		GraphConfig::default().with_query(q.get_str("data"), q.get_str("limit"))
	});

	let (url, limit) = (config.dataset_url.clone(), config.max_records);
	let graph = LocalResource::new(move || load_graph(url.clone(), limit));

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

			<div class="fullscreen-graph">
				<Suspense fallback=|| view! { <p class="loading">"Loading artists…"</p> }>
					{move || {
						let config = config.clone();
						Suspend::new(async move {
							let graph = graph.await?;
							Ok::<_, LoadError>(
								view! {
									<ForceGraphCanvas
										graph=Signal::stored(graph)
										config=config
										fullscreen=true
									/>
								},
							)
						})
					}}
				</Suspense>
				<div class="graph-overlay">
					<h1>"Moers Festival Artists"</h1>
					<p class="subtitle">
						"Artists link to the concerts they played. Hover for details, drag to rearrange."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
