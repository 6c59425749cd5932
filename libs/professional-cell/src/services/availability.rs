// libs/professional-cell/src/services/availability.rs
use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Professional, SlotTime};

/// Resolve the open slots of a professional for a requested date.
///
/// `today` is supplied by the caller rather than read from a clock so the
/// function stays pure. `taken` is the set of slots already held by active
/// (non-cancelled) appointments for this professional on `date`.
///
/// A past date, a weekday with no template entry, or a date with no instance
/// under that weekday all resolve to an empty list, not an error. Output is
/// ascending by time of day with no duplicates.
pub fn resolve(
    professional: &Professional,
    date: NaiveDate,
    today: NaiveDate,
    taken: &BTreeSet<SlotTime>,
) -> Vec<SlotTime> {
    if date < today {
        debug!(
            "Availability requested for past date {} (today {})",
            date, today
        );
        return Vec::new();
    }

    let Some(template) = professional.template_slots(date) else {
        return Vec::new();
    };

    template
        .iter()
        .filter(|slot| !taken.contains(slot))
        .copied()
        .collect()
}
