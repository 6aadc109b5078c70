pub mod api;
pub mod fanout;
pub mod options;
pub mod reduce;
pub mod schema;

pub use api::{DayQuery, HttpClient, Provider, QueryLimits};
pub use options::Options;
pub use schema::providers::{resolve, REGISTRY};
pub use schema::{DateWindow, Fare};

use std::sync::Arc;
use tracing::debug;

/// The run's date window: from `options.start`, or today.
pub fn window(options: &Options) -> DateWindow {
    match options.start {
        Some(start) => DateWindow::new(start, options.days),
        None => DateWindow::from_today(options.days),
    }
}

/// Search `sources` over the run's window and reduce the merged fares into the report.
///
/// Returns `None` when no fare survives; every failure below that is absorbed on the way.
pub async fn collect<F>(
    options: &Options,
    sources: Vec<Arc<dyn Provider>>,
    on_complete: F,
) -> Option<Vec<Fare>>
where
    F: FnMut(&str, usize),
{
    let window = Arc::new(window(options));
    debug!(
        "searching {} providers from {} over {} days",
        sources.len(),
        options.origin,
        window.len()
    );

    let fares = fanout::providers(
        sources,
        &options.origin,
        window,
        &options.currency,
        on_complete,
    )
    .await;
    debug!("{} fares collected", fares.len());

    reduce::report(fares, options.max_per_day)
}

/// [`collect`] over the providers named in `options`.
pub async fn run<F>(options: &Options, on_complete: F) -> Option<Vec<Fare>>
where
    F: FnMut(&str, usize),
{
    collect(options, resolve(options), on_complete).await
}
