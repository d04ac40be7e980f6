//! Orbital Delivery - terminal lander game library
//!
//! This module exposes the flight model and campaign for testing and
//! external use.

pub mod build_info;
pub mod core;
pub mod delivery;
pub mod simulator;
