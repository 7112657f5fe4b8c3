//! Leptos client-side front end for interactive community search.
//!
//! Two pages share one force-directed canvas: the search page (`/`) shows a
//! community search result with insert/delete recommendations, and the
//! editor (`/editor`) edits a graph by hand.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod pages;
pub mod query;
pub mod store;

use crate::api::Backend;
use crate::config::AppConfig;
use crate::pages::editor::EditorPage;
use crate::pages::not_found::NotFound;
use crate::pages::search::SearchPage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Router for the search page and the editor; unknown paths get a 404.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::load();
	let backend = Backend::from_config(&config.backend);
	info!("Using {backend:?}");
	let title = config.title.clone();
	provide_context(config);
	provide_context(backend);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text=title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=SearchPage />
				<Route path=path!("/editor") view=EditorPage />
			</Routes>
		</Router>
	}
}
