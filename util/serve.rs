use backtrace::Backtrace;
use futures::FutureExt;
use std::{cell::RefCell, convert::Infallible, future::Future, panic::AssertUnwindSafe, sync::Arc};

/// Bind `host:port` and serve requests with `request_handler` until the server fails.
pub async fn serve<C, H, F>(
	host: std::net::IpAddr,
	port: u16,
	request_handler_context: C,
	request_handler: H,
) -> hyper::Result<()>
where
	C: Send + Sync + 'static,
	H: Fn(Arc<C>, http::Request<hyper::Body>) -> F + Send + Sync + 'static,
	F: Future<Output = http::Response<hyper::Body>> + Send,
{
	let addr = std::net::SocketAddr::new(host, port);
	let server = hyper::Server::try_bind(&addr)?;
	tracing::info!(%addr, "serving");
	serve_builder(server, request_handler_context, request_handler).await
}

/// Serve requests on an already bound listener. The listener is switched to non blocking mode.
pub async fn serve_listener<C, H, F>(
	listener: std::net::TcpListener,
	request_handler_context: C,
	request_handler: H,
) -> hyper::Result<()>
where
	C: Send + Sync + 'static,
	H: Fn(Arc<C>, http::Request<hyper::Body>) -> F + Send + Sync + 'static,
	F: Future<Output = http::Response<hyper::Body>> + Send,
{
	let server = hyper::Server::from_tcp(listener)?;
	serve_builder(server, request_handler_context, request_handler).await
}

// The panic message and backtrace of a panicking request handler are stored here by the panic hook so they can be written to the 500 response.
tokio::task_local! {
	static PANIC_MESSAGE_AND_BACKTRACE: RefCell<Option<(String, Backtrace)>>;
}

async fn serve_builder<C, H, F>(
	server: hyper::server::Builder<hyper::server::conn::AddrIncoming>,
	request_handler_context: C,
	request_handler: H,
) -> hyper::Result<()>
where
	C: Send + Sync + 'static,
	H: Fn(Arc<C>, http::Request<hyper::Body>) -> F + Send + Sync + 'static,
	F: Future<Output = http::Response<hyper::Body>> + Send,
{
	async fn service<C, H, F>(
		request_handler: Arc<H>,
		request_handler_context: Arc<C>,
		request: http::Request<hyper::Body>,
	) -> Result<http::Response<hyper::Body>, Infallible>
	where
		C: Send + Sync + 'static,
		H: Fn(Arc<C>, http::Request<hyper::Body>) -> F + Send + Sync + 'static,
		F: Future<Output = http::Response<hyper::Body>> + Send,
	{
		let method = request.method().clone();
		let path = request.uri().path().to_owned();
		let result = AssertUnwindSafe(request_handler(request_handler_context, request))
			.catch_unwind()
			.await;
		let response = result.unwrap_or_else(|_| {
			let body = PANIC_MESSAGE_AND_BACKTRACE
				.try_with(|panic_message_and_backtrace| {
					panic_message_and_backtrace
						.borrow()
						.as_ref()
						.map(|(message, backtrace)| format!("{}\n{:?}", message, backtrace))
				})
				.ok()
				.flatten()
				.unwrap_or_else(|| "internal server error".to_owned());
			tracing::error!(%method, %path, status = 500, "{}", body);
			let mut response = http::Response::new(hyper::Body::from(body));
			*response.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
			response
		});
		Ok(response)
	}
	// Install a panic hook that will record the panic message and backtrace if a panic occurs inside a request. Panics anywhere else go to the previous hook.
	let hook = Arc::new(std::panic::take_hook());
	let previous_hook = hook.clone();
	std::panic::set_hook(Box::new(move |panic_info| {
		let in_request = PANIC_MESSAGE_AND_BACKTRACE
			.try_with(|panic_message_and_backtrace| {
				let value = (panic_info.to_string(), Backtrace::new());
				panic_message_and_backtrace.borrow_mut().replace(value);
			})
			.is_ok();
		if !in_request {
			previous_hook(panic_info);
		}
	}));
	// Wrap the request handler and context with Arc to allow sharing a reference to it with each task.
	let request_handler = Arc::new(request_handler);
	let request_handler_context = Arc::new(request_handler_context);
	let service = hyper::service::make_service_fn(|_| {
		let request_handler = request_handler.clone();
		let request_handler_context = request_handler_context.clone();
		async move {
			Ok::<_, Infallible>(hyper::service::service_fn(move |request| {
				let request_handler = request_handler.clone();
				let request_handler_context = request_handler_context.clone();
				PANIC_MESSAGE_AND_BACKTRACE.scope(RefCell::new(None), async move {
					service(request_handler, request_handler_context, request).await
				})
			}))
		}
	});
	let result = server.serve(service).await;
	std::panic::set_hook(Box::new(move |panic_info| hook(panic_info)));
	result
}
