//models.rs
use chrono::{Local, NaiveDate};

pub const DEFAULT_TITLE: &str = "Workout Schedule";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    pub sets: String,
    pub rest_minutes: String,
    pub video_url: String,
}

impl Exercise {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn field_mut(&mut self, field: ExerciseField) -> &mut String {
        match field {
            ExerciseField::Name => &mut self.name,
            ExerciseField::Sets => &mut self.sets,
            ExerciseField::RestMinutes => &mut self.rest_minutes,
            ExerciseField::VideoUrl => &mut self.video_url,
        }
    }

    /// Cell values in table column order.
    pub fn cells(&self) -> [&str; 4] {
        [&self.name, &self.sets, &self.rest_minutes, &self.video_url]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExerciseField {
    Name,
    Sets,
    RestMinutes,
    VideoUrl,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Day {
    pub name: String,
    pub exercises: Vec<Exercise>,
}

impl Day {
    /// A day labelled by its 1-based position, holding a single blank row.
    pub fn numbered(position: usize) -> Self {
        Day {
            name: format!("Day {}", position),
            exercises: vec![Exercise::blank()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub title: String,
    pub start_date: NaiveDate,
    pub days: Vec<Day>,
}

impl Schedule {
    pub fn new(start_date: NaiveDate) -> Self {
        Schedule {
            title: String::new(),
            start_date,
            days: vec![Day::numbered(1)],
        }
    }

    pub fn starting_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }
}
