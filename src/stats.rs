use crate::model::Roster;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Summary of the scores, or `None` if the roster is empty.
#[allow(clippy::cast_precision_loss)]
pub fn statistics(roster: &Roster) -> Option<Statistics> {
    let mut scores = roster.iter().map(|s| s.score());
    let first = scores.next()?;
    let (count, sum, min, max) = scores.fold((1, first, first, first), |(n, sum, min, max), s| {
        (n + 1, sum + s, min.min(s), max.max(s))
    });
    Some(Statistics {
        count,
        mean: sum / count as f64,
        min,
        max,
    })
}
