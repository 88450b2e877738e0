//! Timer-driven updates
//!
//! Turns every live-feed tick into a dispatcher interval run and broadcasts
//! the recomputed outputs to all connections.

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use super::hub::ConnectionHub;
use super::messages::ServerMessage;
use crate::dispatch::Dispatcher;
use crate::layout::ids::LIVE_INTERVAL;
use crate::live::LiveFeed;

/// Spawn the push task. It runs until the feed is dropped or the handle is
/// aborted.
pub fn spawn_live_push(
    feed: &LiveFeed,
    dispatcher: Arc<Dispatcher>,
    hub: Arc<ConnectionHub>,
) -> tokio::task::JoinHandle<()> {
    let mut ticks = feed.subscribe();

    tokio::spawn(async move {
        loop {
            let tick = match ticks.recv().await {
                Ok(tick) => tick,
                Err(RecvError::Lagged(skipped)) => {
                    // the next tick carries the latest snapshot anyway
                    tracing::debug!(skipped, "Live push lagged behind feed");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            if hub.connection_count().await == 0 {
                continue;
            }

            let response = dispatcher.on_interval(LIVE_INTERVAL).await;
            let message = ServerMessage::Update {
                interval: LIVE_INTERVAL.to_string(),
                seq: tick.seq,
                outputs: response.outputs,
            };
            hub.broadcast(&message).await;
        }

        tracing::info!("Live push stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::BindingRegistry;
    use crate::dataset::Dataset;
    use crate::live::FeedConfig;
    use crate::websocket::HubConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_tick_is_pushed_to_connections() {
        let feed = LiveFeed::new(FeedConfig::default());
        let dispatcher = Arc::new(Dispatcher::new(
            BindingRegistry::standard(),
            Arc::new(Dataset::embedded().unwrap()),
            feed.buffer().clone(),
            true,
        ));
        let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        hub.register(tx).await.unwrap();

        let handle = spawn_live_push(&feed, dispatcher, Arc::clone(&hub));
        let mut rng = StdRng::seed_from_u64(9);
        feed.tick_with(&mut rng).await;

        let message = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("no update pushed")
            .unwrap();
        match message {
            ServerMessage::Update { seq, outputs, .. } => {
                assert_eq!(seq, 1);
                assert_eq!(outputs.len(), 1);
                assert_eq!(outputs[0].prop.to_string(), "live-graph.figure");
                assert_eq!(outputs[0].value["data"][0]["y"].as_array().unwrap().len(), 1);
            }
            other => panic!("Expected Update, got {:?}", other),
        }

        handle.abort();
    }
}
