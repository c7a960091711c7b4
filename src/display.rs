use crate::model::Roster;
use crate::stats::Statistics;

pub fn display_roster(roster: &Roster) {
    if roster.is_empty() {
        println!("No students.");
    } else {
        print!("{}", roster.render());
    }
}

pub fn display_stats(stats: Option<Statistics>) {
    match stats {
        Some(s) => {
            println!("Students: {}", s.count);
            println!("Scores: mean {:.2}, min {}, max {}", s.mean, s.min, s.max);
        }
        None => println!("Students: 0"),
    }
}
