//! Startup binding of endpoint providers.
//!
//! Each provider is listed once as a `ProviderEntry` (name + constructor). At startup
//! every entry is loaded and asked for its router, which is merged onto the base
//! router. A constructor that errors or panics, a router that overlaps routes
//! already bound, or a provider without a router is recorded in the report and
//! skipped; the remaining providers still bind.

use crate::state::AppState;
use axum::Router;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Name of the always-mounted health unit; never taken from the provider list.
pub const HEALTH_UNIT: &str = "health";

pub trait RouteProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Routes this unit serves, or `None` when it has nothing to mount.
    fn router(&self, state: &AppState) -> Option<Router>;
}

pub type ProviderLoader = fn() -> Result<Box<dyn RouteProvider>, String>;

#[derive(Clone)]
pub struct ProviderEntry {
    pub name: String,
    pub load: ProviderLoader,
}

impl ProviderEntry {
    pub fn new(name: impl Into<String>, load: ProviderLoader) -> Self {
        ProviderEntry {
            name: name.into(),
            load,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiscoveryFailure {
    pub module: String,
    pub cause: String,
}

#[derive(Clone, Debug, Default)]
pub struct RegistrationReport {
    pub registered: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<DiscoveryFailure>,
}

impl RegistrationReport {
    fn fail(&mut self, module: &str, cause: String) {
        tracing::warn!(module = %module, cause = %cause, "failed to load provider");
        self.failed.push(DiscoveryFailure {
            module: module.to_string(),
            cause,
        });
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

/// Load every provider and merge it onto `base`. Runs once at startup.
pub fn register_all(base: Router, entries: &[ProviderEntry], state: &AppState) -> (Router, RegistrationReport) {
    let mut app = base;
    let mut report = RegistrationReport::default();

    for entry in entries {
        let name = entry.name.as_str();
        if name == HEALTH_UNIT {
            continue;
        }
        if report.registered.iter().any(|r| r == name) {
            tracing::warn!(module = %name, "duplicate provider name, skipped");
            report.skipped.push(name.to_string());
            continue;
        }

        let provider = match catch_unwind(entry.load) {
            Ok(Ok(p)) => p,
            Ok(Err(cause)) => {
                report.fail(name, cause);
                continue;
            }
            Err(payload) => {
                report.fail(name, panic_message(payload));
                continue;
            }
        };
        if provider.name() != name {
            tracing::warn!(module = %name, provider = %provider.name(), "provider name differs from its entry");
        }

        match catch_unwind(AssertUnwindSafe(|| provider.router(state))) {
            Ok(Some(router)) => match catch_unwind(AssertUnwindSafe(|| app.clone().merge(router))) {
                Ok(merged) => {
                    app = merged;
                    tracing::info!(module = %name, "registered provider");
                    report.registered.push(name.to_string());
                }
                Err(payload) => report.fail(name, format!("route conflict: {}", panic_message(payload))),
            },
            Ok(None) => {
                tracing::warn!(module = %name, "provider has no router, skipped");
                report.skipped.push(name.to_string());
            }
            Err(payload) => report.fail(name, panic_message(payload)),
        }
    }

    (app, report)
}
