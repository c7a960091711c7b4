use crate::model::Roster;
use std::collections::HashMap;
use tracing::warn;

/// Warn about every identifier shared by several students, and return them
/// in order of first appearance.
pub fn check_duplicate_ids(roster: &Roster) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();
    for s in roster.iter() {
        let n = seen.entry(s.id()).or_default();
        *n += 1;
        if *n == 2 {
            duplicates.push(s.id().to_owned());
        }
    }
    for id in &duplicates {
        warn!("WARNING: identifier {} is used by {} students", id, seen[id.as_str()]);
    }
    duplicates
}

/// Warn about every student whose score lies outside of `[0, 100]`.
pub fn check_score_range(roster: &Roster) -> Vec<String> {
    roster
        .iter()
        .filter(|s| !(0.0..=100.0).contains(&s.score()))
        .map(|s| {
            warn!("WARNING: student {} has an out of range score", s);
            s.id().to_owned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilesConfig;
    use crate::model::Student;

    fn roster(students: &[(&str, f64)]) -> Roster {
        Roster::with_students(
            FilesConfig::default(),
            students
                .iter()
                .map(|&(id, score)| Student::new(id, "A", "B", score))
                .collect(),
        )
    }

    #[test]
    fn test_duplicate_ids() {
        let r = roster(&[("1", 1.0), ("2", 2.0), ("1", 3.0), ("3", 4.0), ("2", 5.0), ("1", 6.0)]);
        assert_eq!(check_duplicate_ids(&r), vec!["1", "2"]);
        assert!(check_duplicate_ids(&roster(&[("1", 1.0), ("2", 2.0)])).is_empty());
    }

    #[test]
    fn test_score_range() {
        let r = roster(&[("1", -0.5), ("2", 0.0), ("3", 100.0), ("4", 100.5)]);
        assert_eq!(check_score_range(&r), vec!["1", "4"]);
    }
}
