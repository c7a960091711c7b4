use super::Student;
use crate::config::FilesConfig;
use crate::error::Error;
use crate::loaders;
use std::fmt;
use tracing::{error, info, instrument, warn};

const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 100.0;

/// An ordered collection of students bound to a source and a destination file.
#[derive(Debug)]
pub struct Roster {
    files: FilesConfig,
    students: Vec<Student>,
}

#[allow(dead_code)]
impl Roster {
    pub fn new(files: FilesConfig) -> Self {
        Self::with_students(files, Vec::new())
    }

    pub fn with_students(files: FilesConfig, students: Vec<Student>) -> Self {
        Self { files, students }
    }

    pub fn files(&self) -> &FilesConfig {
        &self.files
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn push(&mut self, student: Student) {
        self.students.push(student);
    }

    /// Replace the content of the roster with the students found in the
    /// source file, and return how many were loaded.
    ///
    /// On failure the roster is left empty: nothing is kept from a file
    /// containing a malformed record.
    pub fn load(&mut self) -> Result<usize, Error> {
        self.students.clear();
        let path = &self.files.source;
        match loaders::load_students(path) {
            Ok(students) => {
                self.students = students;
                info!(path = %path.display(), count = self.students.len(), "students loaded");
                Ok(self.students.len())
            }
            Err(e) => {
                if e.is_data_error() {
                    error!(path = %path.display(), error = %e, "malformed student file, nothing loaded");
                } else {
                    error!(path = %path.display(), error = %e, "cannot read student file");
                }
                Err(e)
            }
        }
    }

    /// Write every student to the destination file, in the current order.
    pub fn save(&self) -> Result<(), Error> {
        let path = &self.files.destination;
        loaders::save_students(path, &self.students)
            .inspect(|_| info!(path = %path.display(), count = self.students.len(), "students saved"))
            .inspect_err(|e| error!(path = %path.display(), error = %e, "cannot write student file"))
    }

    /// Add `delta` to every score, unless one of them would leave the
    /// `[0, 100]` range, in which case no score is modified.
    #[instrument(skip(self), fields(students = self.students.len()))]
    pub fn bonify_scores(&mut self, delta: i32) -> Result<(), Error> {
        let delta = f64::from(delta);
        if let Some(student) = self
            .students
            .iter()
            .find(|s| !(MIN_SCORE..=MAX_SCORE).contains(&(s.score() + delta)))
        {
            warn!(student = %student, "bonus rejected");
            return Err(Error::ScoreOutOfRange {
                id: student.id().to_owned(),
                score: student.score() + delta,
            });
        }
        for student in &mut self.students {
            student.set_score(student.score() + delta);
        }
        info!("bonus applied");
        Ok(())
    }

    pub fn sort(&mut self) {
        self.students.sort_by(Student::natural_cmp);
    }

    /// One line per student, each terminated by a newline.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for student in &self.students {
            writeln!(f, "{student}")?;
        }
        Ok(())
    }
}
