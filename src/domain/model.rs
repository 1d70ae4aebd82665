use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FAMILIES_COUNT: u64 = 95;
pub const FOUNDING_YEAR: i32 = 2019;
pub const DEFAULT_SATISFACTION_RATE: u32 = 98;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// The singleton counter row. Field names follow the persisted JSON/table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub families_count: u64,
    pub last_updated: DateTime<Utc>,
    #[serde(default = "default_founding_year")]
    pub founding_year: i32,
}

fn default_founding_year() -> i32 {
    FOUNDING_YEAR
}

impl StatsRecord {
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self {
            families_count: DEFAULT_FAMILIES_COUNT,
            last_updated: now,
            founding_year: FOUNDING_YEAR,
        }
    }

    /// In-memory record served when no backend answers.
    pub fn fallback() -> Self {
        Self::initial(Utc::now())
    }

    /// Copy with the counter bumped by one and `last_updated` moved past the previous value.
    pub fn incremented(&self, now: DateTime<Utc>) -> Self {
        Self {
            families_count: self.families_count + 1,
            last_updated: later_of(now, self.last_updated),
            founding_year: self.founding_year,
        }
    }
}

/// `now`, or one microsecond past `previous` when the clock has not advanced.
fn later_of(now: DateTime<Utc>, previous: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: u64,
    pub name: String,
    pub relation: String,
    pub rating: u8,
    pub text: String,
    pub service: String,
    pub date: DateTime<Utc>,
}

/// A submitted testimonial before the store assigns `id` and `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTestimonial {
    pub name: String,
    pub relation: String,
    pub rating: u8,
    pub text: String,
    pub service: String,
}

impl NewTestimonial {
    pub fn into_testimonial(self, id: u64, date: DateTime<Utc>) -> Testimonial {
        Testimonial {
            id,
            name: self.name,
            relation: self.relation,
            rating: self.rating,
            text: self.text,
            service: self.service,
            date,
        }
    }
}

/// Example content written on first access so an empty site still has something to show.
pub fn seed_testimonials() -> Vec<(NewTestimonial, DateTime<Utc>)> {
    let date = Utc
        .with_ymd_and_hms(2025, 5, 10, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    vec![(
        NewTestimonial {
            name: "Marie Johnson".to_string(),
            relation: "Daughter of Mrs. Johnson (85 years old)".to_string(),
            rating: 5,
            text: "Fidelity Quality Care has transformed my mother's life. Their caregivers are \
                   not only professional but also very caring. My mother feels safe and happy \
                   at home."
                .to_string(),
            service: "Comprehensive home care".to_string(),
        },
        date,
    )]
}

/// One tile of the statistics banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatItem {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub number: String,
    pub label: String,
}

impl StatItem {
    pub fn new(number: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: None,
            number: number.into(),
            label: label.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Values the presentation layer refreshes on every poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub families_count: u64,
    pub satisfaction_rate: u32,
    pub years_of_experience: String,
}
