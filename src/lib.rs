//! devserve - a static file server for local development.
//!
//! Serves a directory tree over HTTP/1.1, appends permissive CORS
//! headers to every response, and maps `.js`/`.mjs` files to
//! `application/javascript` so browsers accept them as ES modules.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
