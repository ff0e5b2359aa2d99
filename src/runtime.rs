//! The page event loop.
//!
//! A single task owns the [`Page`] and feeds it events from three places:
//! the host's event channel, the slider's auto-advance interval, and pending
//! fade timers. Handlers run one at a time in arrival order, so no state is
//! ever shared or locked.
//!
//! [`Effect::ScheduleFade`] is consumed here by arming a timer; every other
//! effect is forwarded to the host. A fade timer whose ticket has gone stale
//! still fires, and the slider ignores it.

use crate::page::{Effect, Page, PageEvent};
use crate::slider::FadeTicket;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

type FadeTimer = Pin<Box<dyn Future<Output = FadeTicket> + Send>>;

fn fade_timer(ticket: FadeTicket, after: Duration) -> FadeTimer {
    Box::pin(async move {
        time::sleep(after).await;
        ticket
    })
}

/// Run the page until the event channel closes, then hand the page back.
///
/// Effects are dropped once the host stops listening; the loop keeps running
/// until its own input ends.
pub async fn run(
    mut page: Page,
    mut events: mpsc::UnboundedReceiver<PageEvent>,
    effects: mpsc::UnboundedSender<Effect>,
) -> Page {
    let period = page.slider_interval();
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let auto_advance = page.slider().len() > 1;
    let mut fades: FuturesUnordered<FadeTimer> = FuturesUnordered::new();

    tracing::debug!(?period, auto_advance, "page loop started");

    loop {
        let event = tokio::select! {
            biased;

            received = events.recv() => match received {
                Some(event) => event,
                None => break,
            },

            Some(ticket) = fades.next(), if !fades.is_empty() => PageEvent::FadeElapsed(ticket),

            _ = ticker.tick(), if auto_advance => PageEvent::SliderTick,
        };

        for effect in page.handle(event) {
            match effect {
                Effect::ScheduleFade { ticket, after } => fades.push(fade_timer(ticket, after)),
                other => {
                    if effects.send(other).is_err() {
                        tracing::debug!("effect receiver closed");
                    }
                }
            }
        }
    }

    tracing::debug!("page loop finished");
    page
}
