use actix_web::{
  Error, HttpMessage,
  body::MessageBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header::{HeaderName, HeaderValue},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags every request with an id and echoes it back as `X-Request-ID`.
///
/// An incoming `X-Request-ID` that parses as a UUID is reused so a proxy can
/// correlate its own logs; anything else is replaced with a fresh v4 id.
#[derive(Debug, Clone, Default)]
pub struct RequestIdMiddleware;

impl RequestIdMiddleware {
  pub fn new() -> Self {
    Self
  }
}

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = RequestIdMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(RequestIdMiddlewareService {
      service: Rc::new(service),
    }))
  }
}

pub struct RequestIdMiddlewareService<S> {
  service: Rc<S>,
}

fn incoming_request_id(req: &ServiceRequest) -> Option<RequestId> {
  req
    .headers()
    .get(REQUEST_ID_HEADER)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| Uuid::parse_str(value).ok())
    .map(RequestId)
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      let request_id = incoming_request_id(&req).unwrap_or_default();
      req.extensions_mut().insert(request_id);
      tracing::debug!(
        "{} {} request_id={}",
        req.method(),
        req.path(),
        request_id
      );

      let mut res = service.call(req).await?;

      if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        res
          .headers_mut()
          .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
      }

      Ok(res)
    })
  }
}

/// Request id stored in the request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl Default for RequestId {
  fn default() -> Self {
    Self(Uuid::new_v4())
  }
}

impl std::fmt::Display for RequestId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Reads the request id set by `RequestIdMiddleware`
pub trait RequestIdExt {
  fn request_id(&self) -> Option<RequestId>;
}

impl RequestIdExt for actix_web::HttpRequest {
  fn request_id(&self) -> Option<RequestId> {
    self.extensions().get::<RequestId>().copied()
  }
}
