use html::{classes, component, html};

#[component]
pub fn Table() {
	html! {
		<div class="table-wrapper">
			<table class="table">
				{children}
			</table>
		</div>
	}
}

#[component]
pub fn TableHeader() {
	html! {
		<thead class="table-header">
			{children}
		</thead>
	}
}

#[component]
pub fn TableBody() {
	html! { <tbody>{children}</tbody> }
}

#[component]
pub fn TableRow() {
	html! {
		<tr>
			{children}
		</tr>
	}
}

#[derive(Clone)]
pub enum TextAlign {
	Left,
	Center,
	Right,
}

fn text_align_class(text_align: Option<TextAlign>) -> &'static str {
	match text_align {
		Some(TextAlign::Center) => "table-align-center",
		Some(TextAlign::Right) => "table-align-right",
		Some(TextAlign::Left) | None => "table-align-left",
	}
}

#[component]
pub fn TableHeaderCell(expand: Option<bool>, text_align: Option<TextAlign>) {
	let expand = expand.and_then(|expand| if expand { Some("table-expand") } else { None });
	let th_class = classes!("table-header-cell", text_align_class(text_align), expand);
	html! {
		<th class={th_class}>
			{children}
		</th>
	}
}

#[component]
pub fn TableCell(expand: Option<bool>, text_align: Option<TextAlign>) {
	let expand = expand.and_then(|expand| if expand { Some("table-expand") } else { None });
	let td_class = classes!("table-cell", text_align_class(text_align), expand);
	html! {
		<td class={td_class}>
			{children}
		</td>
	}
}
