//! Core types and trait definitions for the ticket tracker data model.
//!
//! This crate is free of database dependencies. It declares the entities,
//! their enumerated domains, the foreign-key policy and relationship graph,
//! and the [`store::TrackerStore`] trait that storage backends implement.

// Native `async fn` in traits; the trait spells out `Send` futures itself.
#![allow(async_fn_in_trait)]

pub mod comment;
pub mod error;
pub mod interaction;
pub mod project;
pub mod schema;
pub mod store;
pub mod ticket;
pub mod user;
pub mod view;

pub use error::{ConstraintError, ConstraintKind, Error, Result};
