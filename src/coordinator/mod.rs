pub mod debouncer;
pub mod scanner;
pub mod view_mode;

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use log::{debug, info};
use tokio::time::sleep;

use crate::price::scryfall_client::CatalogSource;
use crate::utilities::config::Config;
use crate::utilities::constants::{DEBOUNCE_MS, STARTUP_DELAY_MS};

use debouncer::{Action, Debouncer};
use scanner::Scanner;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub startup_delay: Duration,
    pub debounce_window: Duration,
}

impl Timing {
    pub fn from_config(config: &Config) -> Self {
        Timing {
            startup_delay: config.startup_delay(),
            debounce_window: config.debounce_window(),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            startup_delay: Duration::from_millis(STARTUP_DELAY_MS),
            debounce_window: Duration::from_millis(DEBOUNCE_MS),
        }
    }
}

/// Waits for the page to settle, scans once, then re-scans after every
/// burst of page mutations.
pub struct MutationCoordinator<S> {
    scanner: Arc<Scanner<S>>,
    timing: Timing,
}

impl<S: CatalogSource + 'static> MutationCoordinator<S> {
    pub fn new(scanner: Arc<Scanner<S>>, timing: Timing) -> Self {
        MutationCoordinator { scanner, timing }
    }

    /// Runs until the page stops reporting mutations. Callers usually bound
    /// it with a timeout.
    pub async fn run(&self) {
        sleep(self.timing.startup_delay).await;
        info!("Running initial scan");
        self.scanner.scan().await;

        let mut mutations = self.scanner.page().lock().await.observe();
        let debouncer = Debouncer::new(self.timing.debounce_window, self.rescan_action());

        while let Some(mutation) = mutations.recv().await {
            debug!("Page changed: {:?}", mutation);
            debouncer.on_change();
        }

        info!("Page observer disconnected");
        debouncer.flush().await;
    }

    fn rescan_action(&self) -> Action {
        let scanner = Arc::clone(&self.scanner);
        Arc::new(move || {
            let scanner = Arc::clone(&scanner);
            async move {
                scanner.scan().await;
            }
            .boxed()
        })
    }
}
