//! Block number polling.

use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};

use crate::client::public::PublicClient;
use crate::observability::metrics;

impl PublicClient {
    /// Poll the block number every polling interval until shutdown.
    ///
    /// `on_block` is called once per observed increase. Blocks skipped between
    /// two polls are not replayed; only the latest is emitted. Poll failures
    /// are logged and the loop keeps going. Shutdown also interrupts a poll
    /// that is still in flight.
    pub async fn watch_block_number<F>(&self, mut shutdown: broadcast::Receiver<()>, mut on_block: F)
    where
        F: FnMut(u64),
    {
        let chain_id = self.chain().id;
        tracing::info!(
            chain_id,
            interval_ms = self.polling_interval().as_millis() as u64,
            "Block watcher starting"
        );

        let mut ticker = time::interval(self.polling_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_block: Option<u64> = None;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // A poll can sit in retries for a while; shutdown cuts it short
                    let polled = tokio::select! {
                        res = self.get_block_number() => res,
                        _ = shutdown.recv() => break,
                    };
                    match polled {
                        Ok(block) if last_block.map_or(true, |last| block > last) => {
                            tracing::debug!(chain_id, block, "New block");
                            metrics::record_block_number(chain_id, block);
                            last_block = Some(block);
                            on_block(block);
                        }
                        Ok(_) => {}
                        Err(e) => tracing::warn!(chain_id, error = %e, "Failed to poll block number"),
                    }
                }
                _ = shutdown.recv() => break,
            }
        }
        tracing::info!(chain_id, "Block watcher received shutdown signal, exiting loop");
    }
}
