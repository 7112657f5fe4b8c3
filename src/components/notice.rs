use leptos::prelude::*;

use crate::store::{Notice, NoticeLevel};

/// Dismissible message bar. Renders nothing while `notice` is `None`.
#[component]
pub fn NoticeBanner(
	#[prop(into)] notice: Signal<Option<Notice>>,
	on_dismiss: Callback<()>,
) -> impl IntoView {
	move || {
		notice.get().map(|n| {
			let class = match n.level {
				NoticeLevel::Info => "notice info",
				NoticeLevel::Error => "notice error",
			};
			view! {
				<div class=class role="alert">
					<span class="notice-message">{n.message}</span>
					<button class="dismiss" title="Dismiss" on:click=move |_| on_dismiss.run(())>
						"×"
					</button>
				</div>
			}
		})
	}
}
