//! Core types and services for the Roster employee console.
//!
//! This crate is deliberately free of database and terminal dependencies.
//! Persistence goes through the [`storage::SlotStorage`] trait; the concrete
//! backend is chosen by the caller.

pub mod clock;
pub mod employee;
pub mod error;
pub mod id;
pub mod query;
pub mod seed;
pub mod session;
pub mod storage;
pub mod store;
pub mod validation;

pub use error::{Error, Result};
