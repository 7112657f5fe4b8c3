use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::force_graph::{ForceGraphCanvas, GraphView, ViewportCommand, ViewportOp};
use crate::components::notice::NoticeBanner;
use crate::editor::EditorGraph;
use crate::error::GraphError;
use crate::store::Notice;

/// Runs `f` on the graph and shows its error, if any. Returns whether it succeeded.
fn edit(
	graph: RwSignal<EditorGraph>,
	notice: RwSignal<Option<Notice>>,
	f: impl FnOnce(&mut EditorGraph) -> Result<(), GraphError>,
) -> bool {
	let result = graph.try_update(f).unwrap_or(Ok(()));
	let ok = result.is_ok();
	notice.set(result.err().map(|e| Notice::error(e.to_string())));
	ok
}

/// Generic node/edge editor without any search.
#[component]
pub fn EditorPage() -> impl IntoView {
	let graph = RwSignal::new(EditorGraph::default());
	let new_label = RwSignal::new(String::new());
	let edge_source = RwSignal::new(String::new());
	let edge_target = RwSignal::new(String::new());
	let edge_label = RwSignal::new(String::new());
	let notice = RwSignal::new(None::<Notice>);
	let viewport = RwSignal::new(ViewportCommand::default());

	let graph_view =
		Memo::new(move |_| graph.with(|g| GraphView::project(&g.nodes, &g.edges, &g.moved)));

	let add_node = move |ev: SubmitEvent| {
		ev.prevent_default();
		let label = new_label.get_untracked();
		let now = js_sys::Date::now();
		if edit(graph, notice, |g| g.add_node(&label, now).map(|_| ())) {
			new_label.set(String::new());
		}
	};

	let add_edge = move |ev: SubmitEvent| {
		ev.prevent_default();
		let (source, target) = (edge_source.get_untracked(), edge_target.get_untracked());
		if source.is_empty() || target.is_empty() {
			notice.set(Some(Notice::error("Choose a source and a target node")));
			return;
		}
		let label = edge_label.get_untracked();
		if edit(graph, notice, |g| g.add_edge(&source, &target, &label).map(|_| ())) {
			edge_label.set(String::new());
		}
	};

	let on_node_moved = Callback::new(move |(id, pos): (String, (f64, f64))| {
		graph.update(|g| g.record_move(&id, pos));
	});

	let node_options = move || {
		graph.with(|g| {
			g.nodes
				.iter()
				.map(|n| {
					let (id, label) = (n.id.clone(), n.label.clone());
					view! { <option value=id>{label}</option> }
				})
				.collect_view()
		})
	};

	view! {
		<div class="editor-page">
			<header class="page-header">
				<h1>"Graph Editor"</h1>
				<nav>
					<A href="/">"Community search"</A>
				</nav>
			</header>

			<div class="toolbar">
				<form class="add-node" on:submit=add_node>
					<input
						type="text"
						placeholder="Node label"
						prop:value=move || new_label.get()
						on:input=move |ev| new_label.set(event_target_value(&ev))
					/>
					<button type="submit" disabled=move || new_label.with(|l| l.trim().is_empty())>
						"Add node"
					</button>
				</form>
				<form class="add-edge" on:submit=add_edge>
					<select
						prop:value=move || edge_source.get()
						on:change=move |ev| edge_source.set(event_target_value(&ev))
					>
						<option value="">"Source"</option>
						{node_options}
					</select>
					<select
						prop:value=move || edge_target.get()
						on:change=move |ev| edge_target.set(event_target_value(&ev))
					>
						<option value="">"Target"</option>
						{node_options}
					</select>
					<input
						type="text"
						placeholder="Edge label (optional)"
						prop:value=move || edge_label.get()
						on:input=move |ev| edge_label.set(event_target_value(&ev))
					/>
					<button type="submit">"Add edge"</button>
				</form>
				<button title="Zoom in" on:click=move |_| viewport.update(|c| *c = c.next(ViewportOp::ZoomIn))>
					"+"
				</button>
				<button title="Zoom out" on:click=move |_| viewport.update(|c| *c = c.next(ViewportOp::ZoomOut))>
					"−"
				</button>
			</div>

			<NoticeBanner notice=notice on_dismiss=Callback::new(move |_| notice.set(None)) />

			<div class="workspace">
				<div class="graph-box">
					<ForceGraphCanvas
						data=graph_view
						commands=viewport
						on_node_moved=on_node_moved
						arrows=true
					/>
				</div>
				<aside class="element-lists">
					<h2>"Nodes"</h2>
					<ul>
						<For
							each=move || graph.with(|g| g.nodes.clone())
							key=|n| n.id.clone()
							children=move |n| {
								let id = n.id.clone();
								view! {
									<li>
										<span class="label" title=n.id.clone()>{n.label}</span>
										<button
											class="action"
											title="Remove node"
											on:click=move |_| {
												edit(graph, notice, |g| g.remove_node(&id).map(|_| ()));
											}
										>
											"×"
										</button>
									</li>
								}
							}
						/>
					</ul>
					<h2>"Edges"</h2>
					<ul>
						<For
							each=move || {
								graph.with(|g| {
									g.edges.iter().map(|e| (e.id(), e.label.clone())).collect::<Vec<_>>()
								})
							}
							key=|entry| entry.clone()
							children=move |(id, label)| {
								let edge_id = id.clone();
								let text = match label {
									Some(label) => format!("{id} ({label})"),
									None => id,
								};
								view! {
									<li>
										<span class="label">{text}</span>
										<button
											class="action"
											title="Remove edge"
											on:click=move |_| {
												edit(graph, notice, |g| g.remove_edge(&edge_id).map(|_| ()));
											}
										>
											"×"
										</button>
									</li>
								}
							}
						/>
					</ul>
				</aside>
			</div>
		</div>
	}
}
