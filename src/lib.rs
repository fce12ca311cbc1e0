//! Development HTTP server for local database files with byte-range support,
//! plus the fixture seeder producing the sample database it serves.

pub mod config;
pub mod fixture;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
