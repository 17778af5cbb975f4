use crate::config;
use crate::events::AppEvent;
use crate::sys::server;
use async_channel::Sender;
use std::thread;

/// Runs the control socket and the config watcher on their own tokio runtime,
/// off the GTK main thread.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("whirl-services".into())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Background services unavailable, no tokio runtime: {}", e);
                    return;
                }
            };

            rt.block_on(async move {
                tokio::join!(
                    server::run_server(tx.clone()),
                    config::run_async_watcher(tx),
                );
            });
        });

    if let Err(e) = spawned {
        log::error!("Failed to spawn background services thread: {}", e);
    }
}
