//! Capability probe for the work-stealing scheduler.

use thiserror::Error;

/// Why the enhanced event loop cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoopUnavailable {
    #[error("built without the multi-thread feature")]
    CompiledOut,

    #[error("host reports a single CPU")]
    SingleCpu,

    #[error("available parallelism unknown: {0}")]
    Unknown(String),
}

/// Reports whether the enhanced event loop is usable, without building it.
pub trait LoopProbe {
    fn probe(&self) -> Result<(), LoopUnavailable>;
}

/// Probe for the running host.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProbe;

impl LoopProbe for HostProbe {
    fn probe(&self) -> Result<(), LoopUnavailable> {
        if !cfg!(feature = "multi-thread") {
            return Err(LoopUnavailable::CompiledOut);
        }

        match std::thread::available_parallelism() {
            Ok(n) if n.get() > 1 => Ok(()),
            Ok(_) => Err(LoopUnavailable::SingleCpu),
            Err(e) => Err(LoopUnavailable::Unknown(e.to_string())),
        }
    }
}
