use crate::schema::Fare;
use chrono::NaiveDate;
use tracing::debug;

/// Validate, group by (date, destination), keep the `max_per_day` cheapest of each group, and
/// order the survivors by (date, price).
///
/// Sorts are stable, so equal prices keep their incoming order. Reducing an already reduced
/// list returns it unchanged.
pub fn reduce(fares: Vec<Fare>, max_per_day: usize) -> Vec<Fare> {
    let max_per_day = max_per_day.max(1);
    let total = fares.len();

    let mut valid: Vec<Fare> = fares.into_iter().filter(Fare::is_valid).collect();
    debug!("{} of {total} fares passed validation", valid.len());

    valid.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.destination.cmp(&b.destination))
            .then_with(|| a.amount().total_cmp(&b.amount()))
    });

    let mut kept = Vec::with_capacity(valid.len());
    let mut group: Option<(Option<NaiveDate>, String)> = None;
    let mut taken = 0;
    for fare in valid {
        let same = group
            .as_ref()
            .is_some_and(|(date, dest)| *date == fare.date && *dest == fare.destination);
        if !same {
            group = Some((fare.date, fare.destination.clone()));
            taken = 0;
        }
        if taken < max_per_day {
            taken += 1;
            kept.push(fare);
        }
    }

    kept.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.amount().total_cmp(&b.amount()))
    });
    kept
}

/// The final report, or `None` when nothing survives reduction.
pub fn report(fares: Vec<Fare>, max_per_day: usize) -> Option<Vec<Fare>> {
    let rows = reduce(fares, max_per_day);
    if rows.is_empty() {
        None
    } else {
        Some(rows)
    }
}
