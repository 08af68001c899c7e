use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::error;
use tokio::sync::mpsc::UnboundedSender;

use crate::input::{RawInputCollector, RawUiEvent};

/// Spawn a blocking thread that polls the terminal and forwards raw events onto a channel.
pub fn spawn_input_thread(
    tx: UnboundedSender<RawUiEvent>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut collector = RawInputCollector::new();
        while !shutdown.load(Ordering::SeqCst) {
            match collector.poll_event(Some(poll_interval)) {
                Ok(Some(event)) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    // No input this tick; continue polling.
                    continue;
                }
                Err(err) => {
                    error!("input thread error: {err}");
                    break;
                }
            }
        }
    })
}
