//! Request tracing middleware.
//!
//! Wraps every request in a [`TraceId::scope`], echoes the identifier in the
//! `trace-id` response header and emits one access log event per request.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware assigning a trace identifier and logging each request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use papersign::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let method = req.method().to_string();
        let path = req.path().to_owned();
        let started = Instant::now();
        let fut = self.service.call(req);
        Box::pin(async move {
            let result = TraceId::scope(trace_id, fut).await;
            let latency_ms = started.elapsed().as_millis();
            match result {
                Ok(mut res) => {
                    attach_header(&mut res, trace_id);
                    info!(
                        trace_id = %trace_id,
                        method = %method,
                        path = %path,
                        status = res.status().as_u16(),
                        latency_ms,
                        "request completed"
                    );
                    Ok(res)
                }
                Err(err) => {
                    warn!(
                        trace_id = %trace_id,
                        method = %method,
                        path = %path,
                        error = %err,
                        latency_ms,
                        "request failed"
                    );
                    Err(err)
                }
            }
        })
    }
}

fn attach_header<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            res.response_mut()
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => {
            error!(%error, trace_id = %trace_id, "failed to encode trace identifier header");
        }
    }
}
