//! Process-wide shutdown hook registry.
//!
//! Bootstrapping an agent (tunnel, port forward, spawned process) leaves
//! behind state that should be torn down when the device is released or the
//! process exits. Hooks are registered in the order their resources are
//! acquired and run in that same order on `run_all`; a failing hook is
//! logged and does not stop the rest from running.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

type CleanupFn = Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>> + Send>;

struct Hook {
    name: String,
    cleanup: CleanupFn,
}

/// Ordered registry of cleanup actions. Cheap to clone: the hook list lives
/// behind an `Arc<Mutex<_>>` would be the naive choice, but hooks are
/// one-shot (`FnOnce`) so the registry itself is not `Clone` — share it by
/// reference instead.
#[derive(Default)]
pub struct ShutdownHooks {
    hooks: Mutex<Vec<Hook>>,
}

impl ShutdownHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named cleanup action, to run after everything registered
    /// before it.
    pub fn register<F, Fut>(&self, name: impl Into<String>, cleanup: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let name = name.into();
        self.hooks.lock().unwrap().push(Hook {
            name,
            cleanup: Box::new(move || Box::pin(cleanup())),
        });
    }

    pub fn len(&self) -> usize {
        self.hooks.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs every registered hook in registration order, logging (not
    /// propagating) individual failures, then clears the registry so a
    /// second call is a no-op.
    pub async fn run_all(&self) {
        let hooks = std::mem::take(&mut *self.hooks.lock().unwrap());
        for hook in hooks {
            let name = hook.name.clone();
            if let Err(err) = (hook.cleanup)().await {
                log::warn!("shutdown hook '{name}' failed: {err}");
            } else {
                log::debug!("shutdown hook '{name}' completed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn hooks_run_in_registration_order() {
        let hooks = ShutdownHooks::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for id in 0..3 {
            let order = order.clone();
            hooks.register(format!("hook-{id}"), move || async move {
                order.lock().unwrap().push(id);
                Ok(())
            });
        }
        hooks.run_all().await;
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
        assert!(hooks.is_empty());
    }

    #[tokio::test]
    async fn failing_hook_does_not_block_the_rest() {
        let hooks = ShutdownHooks::new();
        let ran = Arc::new(AtomicUsize::new(0));

        hooks.register("fails", || async { anyhow::bail!("boom") });
        let ran2 = ran.clone();
        hooks.register("succeeds", move || async move {
            ran2.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        hooks.run_all().await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn run_all_is_idempotent() {
        let hooks = ShutdownHooks::new();
        hooks.register("once", || async { Ok(()) });
        hooks.run_all().await;
        hooks.run_all().await;
        assert!(hooks.is_empty());
    }
}
