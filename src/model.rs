mod roster;
mod student;

pub use roster::Roster;
pub use student::Student;
