//! Bus listings dashboard server.
//!
//! A web application that answers: "which buses run on this route, in my
//! price range, after this time, sorted the way I like?"

pub mod config;
pub mod db;
pub mod domain;
pub mod pipeline;
pub mod query;
pub mod web;
