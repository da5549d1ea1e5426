use html::{component, html};

mod field_label;
mod file_field;
mod select_field;
mod slider_field;

pub use self::field_label::*;
pub use self::file_field::*;
pub use self::select_field::*;
pub use self::slider_field::*;

#[component]
pub fn Form(action: Option<String>, enc_type: Option<String>, post: Option<bool>) {
	let method = if post.unwrap_or(false) { "post" } else { "get" };
	html! {
		<form
			action={action}
			class="form"
			enctype={enc_type}
			method={method}
		>
			{children}
		</form>
	}
}
