//! Drives one mounted checkout: load it, feed it commands, re-render the page.

use std::io::Write;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info};

use crate::checkout::{Checkout, LoadError};
use crate::model::Command;
use crate::render::{self, ProductRow};
use crate::source::ProductSource;

/// Tears a session down from outside, e.g. on Ctrl-C while a load is pending.
#[derive(Debug, Clone)]
pub struct Unmounter(Arc<watch::Sender<bool>>);

impl Unmounter {
    pub fn unmount(&self) {
        self.0.send_replace(true);
    }
}

/// A checkout bound to the output its pages are written to.
pub struct Session<W> {
    checkout: Checkout,
    out: W,
    unmounted: Arc<watch::Sender<bool>>,
}

impl<W: Write> Session<W> {
    pub fn new(checkout: Checkout, out: W) -> Self {
        let (unmounted, _) = watch::channel(false);
        Self {
            checkout,
            out,
            unmounted: Arc::new(unmounted),
        }
    }

    pub fn unmounter(&self) -> Unmounter {
        Unmounter(self.unmounted.clone())
    }

    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Load the products from `source`, rendering the loading page while the
    /// fetch is in flight and the result once it lands.
    ///
    /// The fetch runs as its own task. Unmounting while it is pending aborts
    /// the task and drops whatever it would have returned.
    pub async fn mount<S>(&mut self, source: Arc<S>) -> std::io::Result<()>
    where
        S: ProductSource + ?Sized + 'static,
    {
        let mut unmounted = self.unmounted.subscribe();
        if *unmounted.borrow() {
            self.checkout.unmount();
        }
        if !self.checkout.begin_load() {
            return Ok(());
        }
        self.render()?;

        let fetch = tokio::spawn(async move { source.fetch_products().await });
        let abort = fetch.abort_handle();

        tokio::select! {
            joined = fetch => match joined {
                Ok(result) => self.checkout.finish_load(result),
                Err(e) => self.checkout.finish_load(Err(LoadError::Aborted(e.to_string()))),
            },
            _ = unmounted.wait_for(|gone| *gone) => {
                abort.abort();
                self.checkout.unmount();
                debug!("checkout unmounted during load");
                return Ok(());
            }
        }
        self.render()
    }

    /// Handle commands until the stream ends or the session is unmounted,
    /// re-rendering after each one that changed the order.
    pub async fn run(
        &mut self,
        mut commands: impl Stream<Item = Command> + Unpin,
    ) -> std::io::Result<()> {
        let mut unmounted = self.unmounted.subscribe();
        loop {
            tokio::select! {
                command = commands.next() => match command {
                    Some(command) => {
                        if self.click(command) {
                            self.render()?;
                        }
                    }
                    None => return Ok(()),
                },
                _ = unmounted.wait_for(|gone| *gone) => {
                    self.checkout.unmount();
                    return Ok(());
                }
            }
        }
    }

    /// Route a command through its row's control, as a click would.
    /// Returns whether the order changed.
    pub fn click(&mut self, command: Command) -> bool {
        let pressed = self
            .checkout
            .get_product(command.product_id)
            .and_then(|record| ProductRow::new(record).press(command.action));

        match pressed {
            Some(command) => self.checkout.apply(command).is_ok(),
            None => {
                info!(
                    product = %command.product_id,
                    action = %command.action,
                    "control unavailable"
                );
                false
            }
        }
    }

    /// Unmount the checkout and hand back the output.
    pub fn unmount(mut self) -> W {
        self.unmounted.send_replace(true);
        self.checkout.unmount();
        self.out
    }

    fn render(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "{}", render::page(&self.checkout))?;
        self.out.flush()
    }
}
