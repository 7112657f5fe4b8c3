use leptos::prelude::*;

use crate::api::NodeAction;

/// One scrollable list of recommended nodes, each row with an action button.
///
/// `entries` holds `(node id, label)` pairs; clicking a row's button hands
/// the node id to `on_action`.
#[component]
pub fn RecommendationList(
	title: &'static str,
	action: NodeAction,
	#[prop(into)] entries: Signal<Vec<(String, String)>>,
	#[prop(into)] busy: Signal<bool>,
	on_action: Callback<String>,
) -> impl IntoView {
	let (class, symbol, verb) = match action {
		NodeAction::Insert => ("recommendations insert", "+", "Insert"),
		NodeAction::Delete => ("recommendations delete", "−", "Delete"),
	};

	view! {
		<section class=class>
			<h2>{title}</h2>
			<Show
				when=move || entries.with(|e| !e.is_empty())
				fallback=|| view! { <p class="empty">"Nothing recommended"</p> }
			>
				<ul>
					<For
						each=move || entries.get()
						key=|entry| entry.clone()
						children=move |(id, label)| {
							let title = format!("{verb} {label}");
							let tooltip = label.clone();
							view! {
								<li>
									<span class="label" title=tooltip>{label}</span>
									<button
										class="action"
										title=title
										disabled=move || busy.get()
										on:click=move |_| on_action.run(id.clone())
									>
										{symbol}
									</button>
								</li>
							}
						}
					/>
				</ul>
			</Show>
		</section>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
	use wasm_bindgen::JsCast;
	use wasm_bindgen_test::*;
	use web_sys::HtmlElement;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	#[wasm_bindgen_test]
	fn rows_carry_label_and_tooltip() {
		let document = web_sys::window().unwrap().document().unwrap();
		let parent: HtmlElement = document.create_element("div").unwrap().unchecked_into();
		document.body().unwrap().append_child(&parent).unwrap();

		let _handle = leptos::mount::mount_to(parent.clone(), || {
			view! {
				<RecommendationList
					title="Recommended Insertions"
					action=NodeAction::Insert
					entries=Signal::stored(vec![("i1".to_string(), "Insert Node 1".to_string())])
					busy=Signal::stored(false)
					on_action=Callback::new(|_: String| {})
				/>
			}
		});

		let label = parent.query_selector(".label").unwrap().unwrap();
		assert_eq!(label.text_content().as_deref(), Some("Insert Node 1"));
		assert_eq!(label.get_attribute("title").as_deref(), Some("Insert Node 1"));
		let button = parent.query_selector(".action").unwrap().unwrap();
		assert_eq!(button.get_attribute("title").as_deref(), Some("Insert Insert Node 1"));
	}
}
