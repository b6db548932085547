//! Core Kernel - Foundational types for the parking claims system
//!
//! This crate provides the building blocks shared by the domain and
//! infrastructure crates:
//! - Typed identifiers for claims, users and parking lots
//! - The port error type and adapter health-check contract
//! - Common error values

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{ClaimId, UserId, ParkingLotId};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CoreError;
