//! Notification Prefs - per-notification-type delivery preferences
//!
//! This crate implements the notification preference matrix: which
//! notification types are enabled and which delivery methods receive them,
//! with tri-state "select all" aggregation and reset/save workflows that
//! keep unsaved edits and server state consistent.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
