use html::{classes, component, html, raw};

#[component]
fn Test() {
	html!(
		<div>{"Hello World"}</div>
	)
}

#[component]
fn Greeting(name: String, title: Option<String>) {
	html! {
		<section class="greeting">
			{title.map(|title| html! { <h2>{title}</h2> })}
			<p>{format!("Hello, {}", name)}</p>
			{children}
		</section>
	}
}

#[test]
fn test() {
	let html = html!(<Test />).render_to_string();
	assert_eq!(html, "<div>Hello World</div>");
}

#[test]
fn test_component_props_and_children() {
	let html = html! {
		<Greeting name={"Ada".to_owned()} title={None}>
			<span>{"child"}</span>
		</Greeting>
	}
	.render_to_string();
	assert_eq!(
		html,
		r#"<section class="greeting"><p>Hello, Ada</p><span>child</span></section>"#
	);
}

#[test]
fn test_escaping() {
	let value = "Bachelor's <b>".to_owned();
	let html = html! {
		<option value={value.clone()}>{value}</option>
	}
	.render_to_string();
	assert_eq!(
		html,
		"<option value=\"Bachelor&apos;s &lt;b&gt;\">Bachelor&apos;s &lt;b&gt;</option>"
	);
}

#[test]
fn test_raw() {
	let html = html! { <script>{raw!("a < b")}</script> }.render_to_string();
	assert_eq!(html, "<script>a < b</script>");
}

#[test]
fn test_attributes() {
	let disabled: Option<bool> = Some(false);
	let html = html! {
		<input
			aria-label="age"
			disabled={disabled}
			required={true}
			type="range"
			value={Some("30".to_owned())}
		/>
	}
	.render_to_string();
	assert_eq!(
		html,
		r#"<input aria-label="age" required type="range" value="30" />"#
	);
}

#[test]
fn test_html_for() {
	let html = html! { <label html_for="age">{"Age"}</label> }.render_to_string();
	assert_eq!(html, r#"<label for="age">Age</label>"#);
}

#[test]
fn test_classes() {
	let expand: Option<&str> = None;
	assert_eq!(classes!("table-cell", expand, "center"), "table-cell center");
	assert_eq!(classes!("table-cell", Some("expand")), "table-cell expand");
}
