//! Dissectors
//!
//! Each submodule is one dissector, implementing [`Layer`][`crate::layer::Layer`], together with
//! the registration functions that let inner layers attach themselves to it.

pub mod bluetooth;

pub mod ethernet;

pub mod homeplug_av;

include!(concat!(env!("OUT_DIR"), "/register_defaults.rs"));
