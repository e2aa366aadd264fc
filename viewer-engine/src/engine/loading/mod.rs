//! Asset loading for the model viewer.
//!
//! A selection starts a two-stage chained load: the fixed environment
//! cubemaps first, the model's binary glTF second. The stages share one
//! `PendingLoad` slot, so a newer selection cancels whatever was still
//! in flight.

/// Model catalog manifest loading and lookup.
pub mod catalog;

/// Two-stage environment/model loader, spawn, and orbit recentring.
pub mod model_loader;
