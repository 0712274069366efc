use std::{future::Future, pin::Pin, rc::Rc};

use actix_session::SessionExt;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use common::{
    error::AppError,
    session::{SessionUser, USER_ID_KEY},
};
use futures::future::{Ready, ok};

pub struct AuthMiddleware {}

impl AuthMiddleware {
    pub fn new() -> Self {
        AuthMiddleware {}
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let user_id = match req.get_session().get::<i64>(USER_ID_KEY) {
            Ok(user_id) => user_id,
            Err(e) => {
                log::warn!("Unreadable session state: {}", e);
                None
            }
        };
        let srv = Rc::clone(&self.service);

        Box::pin(async move {
            if let Some(user_id) = user_id {
                // handlers pick this up via web::ReqData<SessionUser>
                req.extensions_mut().insert(SessionUser { user_id });
                srv.call(req).await.map(|res| res.map_into_boxed_body())
            } else {
                let response = AppError::Unauthorized("Not logged in".to_string()).to_http_response();
                Ok(req.into_response(response))
            }
        })
    }
}
