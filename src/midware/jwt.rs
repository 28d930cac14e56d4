use crate::constants::{AUTHORIZATION, EMPTY, IGNORE_ROUTES, MESSAGE_INVALID_TOKEN, ONE_WEEK};
use crate::models::ApiResponse;
use actix_service::forward_ready;
use actix_web::{
	body::EitherBody,
	dev::{Service, ServiceRequest, ServiceResponse, Transform},
	http::Method,
	Error as AxError, HttpRequest, HttpResponse,
};
use chrono::Utc;
use futures::future::{ok, LocalBoxFuture, Ready};
use jsonwebtoken::{
	decode, encode, errors::Error, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use log::{error, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
	pub iat: usize,
	pub exp: usize,
	pub sub: String,
}

#[derive(Serialize, Deserialize)]
pub struct ResponseBody {
	message: String,
	data: String,
}

impl ResponseBody {
	fn new(m: &str, d: &str) -> Self {
		Self { message: String::from(m), data: String::from(d) }
	}
}

pub struct JWT {
	secret: String,
}

impl JWT {
	pub fn new(s: &str) -> Self {
		Self { secret: s.to_string() }
	}

	pub fn create_jwt(&self, user_id: String) -> Result<String, Error> {
		let now = Utc::now().timestamp() as usize;
		let expiry = now + ONE_WEEK;
		let claims = Claims { iat: now, exp: expiry, sub: user_id };
		encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_ref()))
	}

	pub fn verify_jwt(&self, token: &str) -> Result<Claims, Error> {
		decode::<Claims>(
			token,
			&DecodingKey::from_secret(self.secret.as_ref()),
			&Validation::default(),
		)
		.map(|data| data.claims)
	}
}

fn unauthorized_response() -> HttpResponse {
	HttpResponse::Unauthorized().json(ApiResponse::<String> {
		status: "error".to_string(),
		data: None,
		error: Some(MESSAGE_INVALID_TOKEN.to_string()),
	})
}

// Resolves the calling user's id from the bearer token on the request.
pub async fn authenticate(req: &HttpRequest) -> Result<i32, HttpResponse> {
	let auth_header = req
		.headers()
		.get(AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.ok_or_else(unauthorized_response)?;

	let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| {
		error!("JWT_SECRET can not be found in .env file");
		HttpResponse::InternalServerError().json(ApiResponse::<String> {
			status: "error".to_string(),
			data: None,
			error: Some("Server configuration error".to_string()),
		})
	})?;

	let claims = decode::<Claims>(
		auth_header,
		&DecodingKey::from_secret(jwt_secret.as_bytes()),
		&Validation::new(Algorithm::HS256),
	)
	.map_err(|e| {
		error!("Token validation error: {:?}", e);
		unauthorized_response()
	})?;

	claims.claims.sub.parse::<i32>().map_err(|_| unauthorized_response())
}

pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
	S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = AxError>,
	S::Future: 'static,
	B: 'static,
{
	type Response = ServiceResponse<EitherBody<B>>;
	type Error = AxError;
	type InitError = ();
	type Transform = AuthenticationMiddleware<S>;
	type Future = Ready<Result<Self::Transform, Self::InitError>>;

	fn new_transform(&self, service: S) -> Self::Future {
		let jwt_secret =
			std::env::var("JWT_SECRET").expect("JWT_SECRET can not be found in .env file");
		let jwt = JWT::new(&jwt_secret);
		ok(AuthenticationMiddleware { jwt, service })
	}
}

pub struct AuthenticationMiddleware<S> {
	jwt: JWT,
	service: S,
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
	S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = AxError>,
	S::Future: 'static,
	B: 'static,
{
	type Response = ServiceResponse<EitherBody<B>>;
	type Error = AxError;
	type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

	forward_ready!(service);

	fn call(&self, req: ServiceRequest) -> Self::Future {
		info!("## Req: {}", req.path());
		let mut authenticate_pass: bool = false;

		if Method::OPTIONS == *req.method() {
			authenticate_pass = true;
		} else {
			for ignore_route in IGNORE_ROUTES.iter() {
				if req.path().starts_with(ignore_route) {
					authenticate_pass = true;
					break;
				}
			}
		}

		if !authenticate_pass {
			if let Some(authen_header) = req.headers().get(AUTHORIZATION) {
				if let Ok(authen_str) = authen_header.to_str() {
					if authen_str.starts_with("bearer") || authen_str.starts_with("Bearer") {
						let token = authen_str[6..authen_str.len()].trim();
						match self.jwt.verify_jwt(token) {
							Ok(_) => authenticate_pass = true,
							Err(e) => error!("Invalid token: {:?}", e),
						}
					}
				}
			}
		}

		if !authenticate_pass {
			let (request, _pl) = req.into_parts();
			let response = HttpResponse::Unauthorized()
				.json(ResponseBody::new(MESSAGE_INVALID_TOKEN, EMPTY))
				.map_into_right_body();

			return Box::pin(async { Ok(ServiceResponse::new(request, response)) });
		}

		let res = self.service.call(req);

		Box::pin(async move { res.await.map(ServiceResponse::map_into_left_body) })
	}
}
