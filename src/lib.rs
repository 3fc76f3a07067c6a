//! Docgate - Rate-Limited Document Registration Client
//!
//! This crate implements a client for submitting documents to a remote
//! registration service under a strict submission cap: no more than a
//! configured number of requests within any trailing time window. Callers
//! that would exceed the cap are suspended until capacity frees up rather
//! than rejected.

pub mod client;
pub mod config;
pub mod error;
pub mod ratelimit;
