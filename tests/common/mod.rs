//! Fixtures shared by the mock-server integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use progressdb_client::{
	auth::{ThreadKey, UserId},
	config::ClientConfig,
};

pub const FRONTEND_KEY: &str = "pk-frontend";
pub const BACKEND_KEY: &str = "sk-backend";

pub fn frontend_config(server: &MockServer) -> ClientConfig {
	ClientConfig::frontend(server.base_url(), FRONTEND_KEY)
		.expect("Frontend configuration should build.")
}

pub fn backend_config(server: &MockServer) -> ClientConfig {
	ClientConfig::backend(server.base_url(), BACKEND_KEY)
		.expect("Backend configuration should build.")
}

pub fn user(value: &str) -> UserId {
	UserId::new(value).expect("User fixture should be valid.")
}

pub fn thread(value: &str) -> ThreadKey {
	ThreadKey::new(value).expect("Thread fixture should be valid.")
}
