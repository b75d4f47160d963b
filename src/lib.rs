//! Shared core for the civic311 Lambda handlers: entity model, DynamoDB
//! repository, identifier generation and HTTP response mapping. Each deployed
//! handler is a thin `[[bin]]` router on top of this crate.

pub mod entities;
pub mod error;
pub mod id;
pub mod repository;
pub mod response;
