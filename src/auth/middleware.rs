use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenCodec;
use crate::error::AppError;

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
///
/// A missing header and a header without the bearer scheme both come back as
/// `Unauthorized`; they are told apart from a bad token only in the debug
/// log, never in the response.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    match header {
        None => {
            log::debug!("no authorization header on request");
            Err(AppError::Unauthorized("Missing bearer token".into()))
        }
        Some(value) => value.strip_prefix("Bearer ").ok_or_else(|| {
            log::debug!("authorization header does not carry a bearer token");
            AppError::Unauthorized("Missing bearer token".into())
        }),
    }
}

/// Guards a scope with bearer-token authentication.
///
/// Requests to the login/registration endpoints pass through untouched;
/// every other request must present a token the codec accepts. Verified
/// claims are inserted into request extensions for the
/// [`AuthenticatedUser`](crate::auth::AuthenticatedUser) extractor.
pub struct AuthMiddleware {
    codec: TokenCodec,
}

impl AuthMiddleware {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            codec: self.codec.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    codec: TokenCodec,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Token issuance itself must stay reachable without a token.
        let path = req.path();
        if path.starts_with("/api/auth/login") || path.starts_with("/api/auth/register") {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        match bearer_token(header).and_then(|token| self.codec.verify(token)) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(app_err) => {
                log::debug!("rejecting request to {}: {}", req.path(), app_err);
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::Claims;
    use actix_web::{test, web, App, HttpRequest, HttpResponse, Responder};
    use chrono::Duration;
    use uuid::Uuid;

    // `use actix_web::test` above shadows the built-in `#[test]` attribute
    // in this module, so name the built-in one explicitly.
    #[::core::prelude::v1::test]
    fn test_bearer_token_extraction() {
        assert!(bearer_token(None).is_err());
        assert!(bearer_token(Some("Basic dXNlcjpwYXNz")).is_err());
        assert!(bearer_token(Some("bearer lowercase-scheme")).is_err());
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    async fn whoami(req: HttpRequest) -> impl Responder {
        match req.extensions().get::<Claims>() {
            Some(claims) => HttpResponse::Ok().json(claims),
            None => HttpResponse::Ok().body("no claims"),
        }
    }

    #[actix_rt::test]
    async fn test_middleware_rejects_missing_and_bad_tokens() {
        let codec = TokenCodec::new(b"middleware-secret", Duration::hours(1));
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(codec.clone()))
                .route("/protected", web::get().to(whoami)),
        )
        .await;

        // The service surfaces middleware rejections as errors; render them
        // to check the response the client would see.
        let req = test::TestRequest::get().uri("/protected").to_request();
        let err = test::try_call_service(&app, req)
            .await
            .expect_err("request without token must be rejected");
        assert_eq!(HttpResponse::from_error(err).status(), 401);

        let req = test::TestRequest::get()
            .uri("/protected")
            .append_header((header::AUTHORIZATION, "Bearer garbage"))
            .to_request();
        let err = test::try_call_service(&app, req)
            .await
            .expect_err("garbage token must be rejected");
        assert_eq!(HttpResponse::from_error(err).status(), 401);

        // Signed with a different secret.
        let foreign = TokenCodec::new(b"other-secret", Duration::hours(1))
            .issue(Uuid::new_v4(), "intruder@example.com")
            .unwrap();
        let req = test::TestRequest::get()
            .uri("/protected")
            .append_header((header::AUTHORIZATION, format!("Bearer {}", foreign)))
            .to_request();
        let err = test::try_call_service(&app, req)
            .await
            .expect_err("token signed with another secret must be rejected");
        assert_eq!(HttpResponse::from_error(err).status(), 401);
    }

    #[actix_rt::test]
    async fn test_middleware_inserts_claims_for_valid_token() {
        let codec = TokenCodec::new(b"middleware-secret", Duration::hours(1));
        let user_id = Uuid::new_v4();
        let token = codec.issue(user_id, "valid@example.com").unwrap();

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(codec))
                .route("/protected", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .append_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let claims: Claims = test::read_body_json(resp).await;
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "valid@example.com");
    }

    #[actix_rt::test]
    async fn test_middleware_skips_auth_endpoints() {
        let codec = TokenCodec::new(b"middleware-secret", Duration::hours(1));
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(codec))
                .route("/api/auth/login", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/auth/login").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }
}
