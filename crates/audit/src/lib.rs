//! Sitepulse audit capture
//!
//! Drives one Lighthouse run against a URL:
//! - acquires a headless Chromium process scoped to the call
//! - invokes the Lighthouse CLI against the browser's debugging port
//! - extracts the charted metrics with per-field defaults
//! - optionally persists the raw report for later trend aggregation
//!
//! The browser process is released on every exit path; the session handle
//! kills it on drop.

pub mod browser;
pub mod engine;
pub mod persist;
pub mod runner;

pub use browser::{BrowserConfig, BrowserLauncher, BrowserSession, ChromeLauncher};
pub use engine::{AuditEngine, EngineConfig, EngineReport, LighthouseCli};
pub use runner::{AuditConfig, AuditRequest, AuditRunner};
