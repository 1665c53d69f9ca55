//! OS signal handling.
//!
//! SIGINT (Ctrl-C) and, on Unix, SIGTERM both request a graceful shutdown.

use std::future::Future;

use crate::lifecycle::shutdown::Shutdown;

/// Wait until the process is asked to terminate.
pub async fn wait_for_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res?,
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    Ok(())
}

/// Trigger `shutdown` once a termination signal arrives.
pub async fn shutdown_on_signal(shutdown: &Shutdown) -> std::io::Result<()> {
    shutdown_when(wait_for_signal(), shutdown).await
}

/// Trigger `shutdown` once `signal` resolves successfully.
///
/// A failed signal listener is returned without triggering.
pub async fn shutdown_when<F>(signal: F, shutdown: &Shutdown) -> std::io::Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    signal.await?;
    tracing::info!("Termination signal received, shutting down");
    shutdown.trigger();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_signal_triggers_shutdown() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        let (tx, signal) = oneshot::channel::<()>();

        let waiter = async {
            shutdown_when(async { signal.await.map_err(std::io::Error::other) }, &shutdown).await
        };
        let (res, _) = tokio::join!(waiter, async { tx.send(()).unwrap() });

        assert!(res.is_ok());
        let received = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(matches!(received, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn test_failed_listener_does_not_trigger() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        let res = shutdown_when(
            async { Err(std::io::Error::other("no signal handler")) },
            &shutdown,
        )
        .await;

        assert!(res.is_err());
        assert!(rx.try_recv().is_err());
    }
}
