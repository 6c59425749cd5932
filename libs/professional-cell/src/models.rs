// libs/professional-cell/src/models.rs
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// How a session is held. A professional accepts a subset of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionMode {
    Online,
    InPerson,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Online => write!(f, "online"),
            SessionMode::InPerson => write!(f, "in-person"),
        }
    }
}

/// Weekday key of the availability template, serialized as the lowercase
/// weekday name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl DayOfWeek {
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

/// A time of day at which a professional can see one student. Serialized as
/// `HH:MM`; full `HH:MM:SS` strings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(SlotTime)
    }

    pub fn as_time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for SlotTime {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .map(SlotTime)
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Weekly template expanded per concrete date: weekday name -> calendar date
/// -> ordered set of open slots. A date with no entry has zero open slots.
pub type WeeklyAvailability = HashMap<DayOfWeek, BTreeMap<NaiveDate, BTreeSet<SlotTime>>>;

/// A volunteer psychologist profile. Owned by the external profile service;
/// this core only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: Uuid,
    pub display_name: String,
    pub specialties: Vec<String>,
    pub modes: Vec<SessionMode>,
    #[serde(default)]
    pub availability: WeeklyAvailability,
}

impl Professional {
    pub fn accepts_mode(&self, mode: SessionMode) -> bool {
        self.modes.contains(&mode)
    }

    /// Open slots for a concrete date before subtracting booked ones.
    pub fn template_slots(&self, date: NaiveDate) -> Option<&BTreeSet<SlotTime>> {
        self.availability
            .get(&DayOfWeek::of(date))
            .and_then(|dates| dates.get(&date))
    }
}
