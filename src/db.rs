use diesel::{
	prelude::*,
	r2d2::{self, ConnectionManager},
};
use dotenv::dotenv;
use std::env;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub fn get_db_pool() -> DbPool {
	dotenv().ok();
	let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
	let manager = ConnectionManager::<PgConnection>::new(database_url);
	r2d2::Pool::builder().build(manager).expect("Failed to create pool.")
}

pub async fn init(pool: &DbPool) -> Result<(), diesel::result::Error> {
	let mut conn = pool.get().expect("can not get the pool address");
	diesel::sql_query(
		"CREATE TABLE IF NOT EXISTS users (
			id SERIAL PRIMARY KEY,
			firstname VARCHAR(35) NOT NULL,
			lastname VARCHAR(35) NOT NULL,
			email VARCHAR(255) NOT NULL UNIQUE,
			password TEXT NOT NULL,
			avatar TEXT,
			street VARCHAR(255),
			city VARCHAR(100),
			state VARCHAR(100),
			country VARCHAR(100),
			zipcode VARCHAR(16),
			wallet NUMERIC NOT NULL DEFAULT 0,
			bonus NUMERIC NOT NULL DEFAULT 0,
			profits NUMERIC NOT NULL DEFAULT 0,
			withdrawals NUMERIC NOT NULL DEFAULT 0,
			permissions TEXT[] NOT NULL DEFAULT '{}',
			is_admin BOOLEAN NOT NULL DEFAULT FALSE,
			has_verified_email BOOLEAN NOT NULL DEFAULT FALSE,
			verification_code VARCHAR(32) NOT NULL,
			created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
		);",
	)
	.execute(&mut conn)?;
	diesel::sql_query(
		"CREATE TABLE IF NOT EXISTS deposits (
			id UUID PRIMARY KEY,
			reference UUID NOT NULL UNIQUE,
			user_id INTEGER NOT NULL REFERENCES users(id),
			amount NUMERIC NOT NULL,
			description TEXT,
			details TEXT NOT NULL,
			wallet_type VARCHAR(50) NOT NULL,
			wallet_address VARCHAR(128) NOT NULL,
			approved BOOLEAN NOT NULL DEFAULT FALSE,
			date_of_transfer TIMESTAMPTZ NOT NULL,
			created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
		);",
	)
	.execute(&mut conn)?;
	diesel::sql_query(
		"CREATE TABLE IF NOT EXISTS withdrawals (
			id UUID PRIMARY KEY,
			reference UUID NOT NULL UNIQUE,
			user_id INTEGER NOT NULL REFERENCES users(id),
			amount NUMERIC NOT NULL,
			details TEXT NOT NULL,
			wallet_type VARCHAR(50) NOT NULL,
			wallet_address VARCHAR(128) NOT NULL,
			pin VARCHAR(48),
			approved BOOLEAN NOT NULL DEFAULT FALSE,
			created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
		);",
	)
	.execute(&mut conn)?;
	diesel::sql_query(
		"CREATE TABLE IF NOT EXISTS auth_pins (
			id SERIAL PRIMARY KEY,
			pin VARCHAR(48) NOT NULL UNIQUE,
			user_id INTEGER NOT NULL REFERENCES users(id),
			withdrawal_id UUID NOT NULL UNIQUE REFERENCES withdrawals(id),
			has_been_used BOOLEAN NOT NULL DEFAULT FALSE,
			created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
		);",
	)
	.execute(&mut conn)?;
	diesel::sql_query(
		"CREATE TABLE IF NOT EXISTS notifications (
			id SERIAL PRIMARY KEY,
			listener_id INTEGER NOT NULL REFERENCES users(id),
			description TEXT NOT NULL,
			status VARCHAR(16) NOT NULL DEFAULT 'UNREAD',
			created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
		);",
	)
	.execute(&mut conn)?;

	Ok(())
}
