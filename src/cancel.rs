use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop request, checked by the engine between file operations.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Make SIGINT / SIGTERM set this flag instead of killing the process.
    pub fn install_ctrlc(&self) -> io::Result<()> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};
        signal_hook::flag::register(SIGINT, Arc::clone(&self.0))?;
        signal_hook::flag::register(SIGTERM, Arc::clone(&self.0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        assert!(!other.is_cancelled());
        flag.cancel();
        assert!(other.is_cancelled());
    }
}
