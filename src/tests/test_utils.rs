use crate::db::DbPool;
use crate::midware::jwt::Claims;
use diesel::r2d2::ConnectionManager;
use diesel::PgConnection;
use jsonwebtoken::{encode, EncodingKey, Header};

pub const TEST_SECRET: &str = "test_secret";

pub fn ensure_test_env() {
	std::env::set_var("JWT_SECRET", TEST_SECRET);
}

pub fn generate_test_token(user_id: i32) -> String {
	let now = chrono::Utc::now().timestamp() as usize;
	let claims = Claims { iat: now, exp: now + 3600, sub: user_id.to_string() };
	encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET.as_ref())).unwrap()
}

// A pool that is never connected. The handlers only reach for a connection
// after authentication and validation pass, so the error-path tests run
// without a database.
pub fn lazy_pool() -> DbPool {
	let manager =
		ConnectionManager::<PgConnection>::new("postgres://localhost/zetahub_unreachable");
	diesel::r2d2::Pool::builder().max_size(1).build_unchecked(manager)
}
