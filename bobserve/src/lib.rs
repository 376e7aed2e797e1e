//! Observability hooks for proxy calls, tool execution, and authorization.
//!
//! ```rust
//! use bobserve::{MetricsObservabilityHooks, SafeProviderHooks, TracingObservabilityHooks};
//!
//! let _provider_hooks = SafeProviderHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeProviderHooks, SafeToolHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeProviderHooks, SafeToolHooks, TracingObservabilityHooks,
    };
}

#[cfg(test)]
mod tests;
