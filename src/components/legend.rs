use leptos::prelude::*;

use crate::model::{EdgeCategory, NodeCategory};

#[component]
fn LegendItem(color: &'static str, label: &'static str, edge: bool) -> impl IntoView {
	let shape = if edge { "swatch edge" } else { "swatch node" };
	view! {
		<li class="legend-item">
			<span class=shape style:background-color=color></span>
			<span class="legend-label">{label}</span>
		</li>
	}
}

/// Color key for every node and edge category.
#[component]
pub fn Legend() -> impl IntoView {
	let nodes = NodeCategory::ALL
		.into_iter()
		.map(|c| view! { <LegendItem color=c.color() label=c.legend_label() edge=false /> })
		.collect_view();
	let edges = EdgeCategory::ALL
		.into_iter()
		.map(|c| view! { <LegendItem color=c.color() label=c.legend_label() edge=true /> })
		.collect_view();

	view! {
		<ul class="legend">
			{nodes}
			{edges}
		</ul>
	}
}
