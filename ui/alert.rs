use html::{component, html};

#[derive(Clone)]
pub enum Level {
	Success,
	Danger,
}

#[component]
pub fn Alert(level: Level, title: Option<String>) {
	let level_class = match level {
		Level::Success => "alert-level-success",
		Level::Danger => "alert-level-danger",
	};
	html! {
		<div class={format!("alert-wrapper {}", level_class)} role="alert">
			{title.map(|title| html! {
				<div class="alert-title">
					{title}
				</div>
			})}
			{children}
		</div>
	}
}
