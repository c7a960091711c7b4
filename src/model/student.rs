use crate::error::Error;
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Debug)]
pub struct Student {
    id: String,
    first_name: String,
    last_name: String,
    score: f64,
}

impl Student {
    pub fn new(id: &str, first_name: &str, last_name: &str, score: f64) -> Self {
        Self {
            id: id.to_owned(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            score,
        }
    }

    /// Build a student from its textual fields. The score must be a finite
    /// number, surrounding whitespace is ignored.
    pub fn parse(id: &str, first_name: &str, last_name: &str, score: &str) -> Result<Self, Error> {
        let invalid = || Error::Parse {
            line: 0,
            value: score.to_owned(),
        };
        let value = score.trim().parse::<f64>().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(Self::new(id, first_name, last_name, value))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    /// Natural order: last name, first name, id, then score.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        self.last_name
            .cmp(&other.last_name)
            .then_with(|| self.first_name.cmp(&other.first_name))
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.score.total_cmp(&other.score))
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.natural_cmp(other) == Ordering::Equal
    }
}

impl Eq for Student {}

impl PartialOrd for Student {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Student {
    fn cmp(&self, other: &Self) -> Ordering {
        self.natural_cmp(other)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.id, self.first_name, self.last_name, self.score
        )
    }
}
