use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use log::warn;

use crate::api::{Backend, NodeAction};
use crate::components::force_graph::{ForceGraphCanvas, GraphView, ViewportCommand, ViewportOp};
use crate::components::legend::Legend;
use crate::components::notice::NoticeBanner;
use crate::components::recommendations::RecommendationList;
use crate::config::AppConfig;
use crate::query::{Dataset, SearchModel};
use crate::store::{RequestKind, SearchStore};

const SOURCE_URL: &str = "https://github.com/SunLongxu/GICS_demo";

fn node_action(store: RwSignal<SearchStore>, backend: Backend, action: NodeAction) -> Callback<String> {
	Callback::new(move |node_id: String| {
		let Some(id) = store.try_update(|s| s.begin_request(RequestKind::Node(action))) else {
			return;
		};
		let backend = backend.clone();
		spawn_local(async move {
			let result = backend.apply(action, &node_id).await;
			store.update(|s| {
				s.finish_request(id, result);
			});
		});
	})
}

fn recommendation_entries(store: RwSignal<SearchStore>, action: NodeAction) -> Memo<Vec<(String, String)>> {
	Memo::new(move |_| {
		store.with(|s| {
			let ids = match action {
				NodeAction::Insert => &s.dataset.recommend_insert,
				NodeAction::Delete => &s.dataset.recommend_delete,
			};
			ids.iter()
				.map(|id| (id.clone(), s.dataset.label_of(id).to_string()))
				.collect()
		})
	})
}

/// Community search: query controls, the result graph and the two
/// recommendation lists.
#[component]
pub fn SearchPage() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let backend = use_context::<Backend>().unwrap_or_else(|| Backend::from_config(&config.backend));

	let store = RwSignal::new(SearchStore::new(&config));
	let viewport = RwSignal::new(ViewportCommand::default());
	let graph_view = Memo::new(move |_| {
		store.with(|s| GraphView::project(&s.dataset.nodes, &s.dataset.edges, &s.moved))
	});

	// Fit after every wholesale replacement; the canvas fits once on mount by itself.
	let fit_epoch = Memo::new(move |_| store.with(|s| s.fit_epoch));
	Effect::new(move |prev: Option<u64>| {
		let epoch = fit_epoch.get();
		if prev.is_some_and(|p| p != epoch) {
			viewport.update(|c| *c = c.next(ViewportOp::Fit));
		}
		epoch
	});

	let search = {
		let backend = backend.clone();
		Callback::new(move |_: ()| {
			let Some((id, request)) = store.try_update(|s| s.begin_search().ok()).flatten() else {
				return;
			};
			let backend = backend.clone();
			spawn_local(async move {
				let result = backend.search(&request).await;
				store.update(|s| {
					s.finish_request(id, result);
				});
			});
		})
	};
	let on_insert = node_action(store, backend.clone(), NodeAction::Insert);
	let on_delete = node_action(store, backend, NodeAction::Delete);
	let on_node_moved = Callback::new(move |(id, pos): (String, (f64, f64))| {
		store.update(|s| s.record_move(&id, pos));
	});

	let loading = Signal::derive(move || store.with(|s| s.is_loading()));
	let loading_text = move || match store.with(|s| s.pending_kind()) {
		Some(RequestKind::Search) => "Searching…",
		Some(RequestKind::Node(_)) => "Updating…",
		None => "",
	};

	let examples = config
		.example_queries
		.iter()
		.map(|q| {
			let query = q.clone();
			view! {
				<button
					type="button"
					class="chip"
					on:click=move |_| {
						store.update(|s| s.query = query.clone());
						search.run(());
					}
				>
					{q.clone()}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="search-page">
			<header class="page-header">
				<h1>{config.title.clone()}</h1>
				<nav>
					<A href="/editor">"Graph editor"</A>
				</nav>
			</header>

			<form
				class="controls"
				on:submit=move |ev: SubmitEvent| {
					ev.prevent_default();
					search.run(());
				}
			>
				<label>
					"Dataset"
					<select
						prop:value=move || store.with(|s| s.dataset_choice.code())
						on:change=move |ev| {
							match event_target_value(&ev).parse::<Dataset>() {
								Ok(d) => store.update(|s| s.dataset_choice = d),
								Err(e) => warn!("{e}"),
							}
						}
					>
						{Dataset::ALL
							.into_iter()
							.map(|d| view! { <option value=d.code()>{d.display_name()}</option> })
							.collect_view()}
					</select>
				</label>
				<label>
					"Search Model"
					<select
						prop:value=move || store.with(|s| s.model.code())
						on:change=move |ev| {
							match event_target_value(&ev).parse::<SearchModel>() {
								Ok(m) => store.update(|s| s.model = m),
								Err(e) => warn!("{e}"),
							}
						}
					>
						{SearchModel::ALL
							.into_iter()
							.map(|m| view! { <option value=m.code()>{m.code()}</option> })
							.collect_view()}
					</select>
				</label>
				<label class="query">
					"Enter Query (names separated by commas)"
					<input
						type="text"
						prop:value=move || store.with(|s| s.query.clone())
						on:input=move |ev| store.update(|s| s.query = event_target_value(&ev))
					/>
				</label>
				<button type="submit" class="search-button">
					"Search"
				</button>
			</form>

			<div class="examples">
				<span>"Example Queries:"</span>
				{examples}
			</div>

			<NoticeBanner
				notice=Signal::derive(move || store.with(|s| s.notice.clone()))
				on_dismiss=Callback::new(move |_| store.update(|s| s.dismiss_notice()))
			/>

			<div class="workspace">
				<div class="graph-panel">
					<div class="graph-box">
						<div class="zoom-controls">
							<button
								title="Zoom in"
								on:click=move |_| viewport.update(|c| *c = c.next(ViewportOp::ZoomIn))
							>
								"+"
							</button>
							<button
								title="Zoom out"
								on:click=move |_| viewport.update(|c| *c = c.next(ViewportOp::ZoomOut))
							>
								"−"
							</button>
						</div>
						<Show when=move || loading.get()>
							<div class="loading">{loading_text}</div>
						</Show>
						<ForceGraphCanvas data=graph_view commands=viewport on_node_moved=on_node_moved />
					</div>
					<Legend />
				</div>
				<RecommendationList
					title="Recommended Insertions"
					action=NodeAction::Insert
					entries=recommendation_entries(store, NodeAction::Insert)
					busy=loading
					on_action=on_insert
				/>
				<RecommendationList
					title="Recommended Deletions"
					action=NodeAction::Delete
					entries=recommendation_entries(store, NodeAction::Delete)
					busy=loading
					on_action=on_delete
				/>
			</div>

			<footer class="page-footer">
				<div class="institutions">
					<span>"Hong Kong Baptist University"</span>
					<span>"Simon Fraser University"</span>
				</div>
				<a href=SOURCE_URL target="_blank" rel="noopener">
					"GitHub"
				</a>
				<p>"© 2024 Interactive Community Search System (GICS) · MIT License"</p>
			</footer>
		</div>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
	use leptos_router::components::Router;
	use wasm_bindgen::JsCast;
	use wasm_bindgen_test::*;
	use web_sys::HtmlElement;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	#[wasm_bindgen_test]
	fn renders_controls_and_footer() {
		let document = web_sys::window().unwrap().document().unwrap();
		let parent: HtmlElement = document.create_element("div").unwrap().unchecked_into();
		document.body().unwrap().append_child(&parent).unwrap();

		let _handle = leptos::mount::mount_to(parent.clone(), || {
			view! {
				<Router>
					<SearchPage />
				</Router>
			}
		});

		let selects = parent.query_selector_all(".controls select").unwrap();
		assert_eq!(selects.length(), 2);
		let options = parent.query_selector_all(".controls select option").unwrap();
		assert_eq!(options.length(), (Dataset::ALL.len() + SearchModel::ALL.len()) as u32);

		let link = parent.query_selector(".page-footer a").unwrap().unwrap();
		assert_eq!(link.get_attribute("href").as_deref(), Some(SOURCE_URL));
		let footer = parent.query_selector(".page-footer").unwrap().unwrap();
		let text = footer.text_content().unwrap_or_default();
		assert!(text.contains("Hong Kong Baptist University"));
		assert!(text.contains("Simon Fraser University"));
	}
}
