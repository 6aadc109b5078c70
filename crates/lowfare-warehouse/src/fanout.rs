use crate::api::{DayQuery, HttpClient, Provider, QueryLimits};
use crate::schema::{DateWindow, Fare};
use futures::stream::{self, FuturesUnordered, StreamExt};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Run one query per day of `window`, at most `limits.concurrency` at a time, and collect the
/// fares in completion order.
///
/// A day that fails or times out contributes nothing; its siblings carry on.
pub async fn days<Q>(
    query: &Q,
    client: &HttpClient,
    origin: &str,
    window: &DateWindow,
    currency: &str,
    limits: QueryLimits,
) -> Vec<Fare>
where
    Q: DayQuery + ?Sized,
{
    stream::iter(window.iter())
        .map(move |day| async move {
            let outcome = tokio::time::timeout(
                limits.timeout,
                query.search_day(client, origin, day, currency),
            )
            .await;
            (day, outcome)
        })
        .buffer_unordered(limits.concurrency.max(1))
        .fold(Vec::new(), move |mut fares, (day, outcome)| async move {
            match outcome {
                Ok(Ok(found)) => {
                    trace!("{origin} {day}: {} fares", found.len());
                    fares.extend(found);
                }
                Ok(Err(e)) => debug!("{origin} {day}: query failed | {e}"),
                Err(_) => debug!("{origin} {day}: query timed out"),
            }
            fares
        })
        .await
}

/// Search every provider concurrently and merge their fares as each completes.
///
/// A provider that errors, or whose task panics, contributes nothing. `on_complete` is called
/// once per provider, with its name and the number of fares it contributed.
pub async fn providers<F>(
    sources: Vec<Arc<dyn Provider>>,
    origin: &str,
    window: Arc<DateWindow>,
    currency: &str,
    mut on_complete: F,
) -> Vec<Fare>
where
    F: FnMut(&str, usize),
{
    let mut tasks: FuturesUnordered<_> = sources
        .into_iter()
        .map(|source| {
            let name = source.name();
            let origin = origin.to_string();
            let currency = currency.to_string();
            let window = window.clone();
            let handle =
                tokio::spawn(async move { source.search(&origin, &window, &currency).await });
            async move { (name, handle.await) }
        })
        .collect();

    // single collection point; appends are serialized through this loop
    let mut fares = Vec::new();
    while let Some((name, outcome)) = tasks.next().await {
        let found = match outcome {
            Ok(Ok(found)) => found,
            Ok(Err(e)) => {
                warn!("provider {name} failed: {e}");
                Vec::new()
            }
            Err(e) => {
                warn!("provider {name} failed: {e}");
                Vec::new()
            }
        };
        debug!("provider {name} returned {} fares", found.len());
        on_complete(name, found.len());
        fares.extend(found);
    }

    fares
}
