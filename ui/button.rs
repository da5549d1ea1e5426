use html::{component, html};

#[derive(Clone)]
pub enum ButtonType {
	Submit,
	Button,
}

/// A button, or a link styled as one when `href` is set. Set `download` to the file name to download the target of `href`.
#[component]
pub fn Button(
	button_type: ButtonType,
	disabled: Option<bool>,
	download: Option<String>,
	href: Option<String>,
) {
	let button_type = match button_type {
		ButtonType::Submit => "submit",
		ButtonType::Button => "button",
	};
	if let Some(href) = href {
		html! {
			<a class="button" download={download} href={href}>
				{children}
			</a>
		}
	} else {
		html! {
			<button class="button" disabled={disabled} type={button_type}>
				{children}
			</button>
		}
	}
}
