//! bribemap: client for a crowdsourced corruption-reporting site.
//!
//! The library is split the same way the binary uses it:
//! - [`api`]: typed REST client and the static map topology source
//! - [`aggregate`], [`format`], [`map`]: pure reshaping of API data
//! - [`table`], [`form`]: view state for the report grid and submission form
//! - [`pages`]: fetch-on-mount page models composed from the above
//! - [`cli`], [`web`]: terminal and embedded dashboard front ends

pub mod aggregate;
pub mod api;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod form;
pub mod format;
pub mod map;
pub mod pages;
pub mod states;
pub mod table;
pub mod web;
