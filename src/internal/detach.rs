use std::thread;

use tokio::runtime::Handle;

use crate::Result;

/// Run `job` on another thread of execution without waiting for it.
///
/// Inside a tokio runtime the job goes to the runtime's blocking pool, since
/// listeners are synchronous and may block. Outside one, a named OS thread is
/// spawned. No handle is kept either way.
pub(crate) fn detach<F>(thread_name: &str, job: F) -> Result<()>
where
    F: FnOnce() + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            drop(handle.spawn_blocking(job));
        }
        Err(_) => {
            thread::Builder::new()
                .name(thread_name.to_owned())
                .spawn(job)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn test_detach_without_runtime_uses_named_thread() {
        let (tx, rx) = mpsc::channel();
        detach("detach-test", move || {
            let name = thread::current().name().map(str::to_owned);
            tx.send(name).unwrap();
        })
        .unwrap();
        assert_eq!(rx.recv().unwrap().as_deref(), Some("detach-test"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_detach_inside_runtime() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        detach("unused", move || {
            let _ = tx.send(Handle::try_current().is_ok());
        })
        .unwrap();
        // Blocking-pool threads carry the runtime context.
        assert!(rx.await.unwrap());
    }
}
