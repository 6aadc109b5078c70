pub mod amadeus;
pub mod kiwi;
pub mod ryanair;
pub mod wizz;

use crate::api::Provider;
use crate::options::Options;
use lazy_static::lazy_static;
use std::collections::BTreeMap as Map;
use std::sync::Arc;
use tracing::debug;

pub use amadeus::Amadeus;
pub use kiwi::Kiwi;
pub use ryanair::Ryanair;
pub use wizz::Wizz;

/// Builds a provider from the run's options.
pub type Constructor = fn(&Options) -> Arc<dyn Provider>;

lazy_static! {
    /// Known providers, keyed by identifier.
    ///
    /// New providers are added here; the fan-out never changes.
    pub static ref REGISTRY: Map<&'static str, Constructor> = Map::from([
        (Amadeus::NAME, build_amadeus as Constructor),
        (Kiwi::NAME, build_kiwi as Constructor),
        (Ryanair::NAME, build_ryanair as Constructor),
        (Wizz::NAME, build_wizz as Constructor),
    ]);
}

fn build_amadeus(options: &Options) -> Arc<dyn Provider> {
    Arc::new(Amadeus::from_options(options))
}

fn build_kiwi(options: &Options) -> Arc<dyn Provider> {
    Arc::new(Kiwi::from_options(options))
}

fn build_ryanair(options: &Options) -> Arc<dyn Provider> {
    Arc::new(Ryanair::from_options(options))
}

fn build_wizz(options: &Options) -> Arc<dyn Provider> {
    Arc::new(Wizz::from_options(options))
}

/// Build the providers named in `options`, in order.
///
/// Unknown identifiers are skipped, as are repeats of one already resolved.
pub fn resolve(options: &Options) -> Vec<Arc<dyn Provider>> {
    let mut seen = Vec::new();
    options
        .providers
        .iter()
        .filter_map(|id| {
            let Some(constructor) = REGISTRY.get(id.as_str()) else {
                debug!("unknown provider {id:?}; skipping");
                return None;
            };
            if seen.contains(id) {
                return None;
            }
            seen.push(id.clone());
            Some(constructor(options))
        })
        .collect()
}
