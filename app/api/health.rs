use crate::{common::error::status_response, Context};
use anyhow::Result;
use hyper::{Body, Request, Response, StatusCode};

pub async fn get(_context: &Context, _request: Request<Body>) -> Result<Response<Body>> {
	Ok(status_response(StatusCode::OK, "ok"))
}
