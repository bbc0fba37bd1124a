//! Live tests against a real SQL Server. They are `#[ignore]`d by default;
//! point `ETL_TEST_MSSQL_*` at a disposable instance and run with
//! `cargo test -p engine-tests -- --ignored`.

#![allow(dead_code)]

use std::env;

pub mod utils;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 1433;
const DEFAULT_USER: &str = "sa";
const DEFAULT_PASSWORD: &str = "Passw0rd!";
const DEFAULT_DATABASE: &str = "etl";

/// Connection settings for the live server used by the tests.
#[derive(Debug, Clone)]
pub struct TestServer {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl TestServer {
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| env::var(name).unwrap_or_else(|_| default.to_string());
        TestServer {
            host: var("ETL_TEST_MSSQL_HOST", DEFAULT_HOST),
            port: env::var("ETL_TEST_MSSQL_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            username: var("ETL_TEST_MSSQL_USER", DEFAULT_USER),
            password: var("ETL_TEST_MSSQL_PASSWORD", DEFAULT_PASSWORD),
            database: var("ETL_TEST_MSSQL_DATABASE", DEFAULT_DATABASE),
        }
    }
}
