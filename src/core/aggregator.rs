//! Derived statistics. Everything here is recomputed from store snapshots on each call.

use crate::core::counter::CounterStore;
use crate::core::testimonials::TestimonialStore;
use crate::domain::model::{
    StatItem, StatsRecord, StatsSnapshot, Testimonial, DEFAULT_SATISFACTION_RATE,
};
use crate::domain::ports::{StatsBackend, TestimonialBackend};
use chrono::{Datelike, Local};

pub const SATISFACTION_LABEL: &str = "Satisfaction rate";
pub const FAMILIES_LABEL: &str = "Families helped";
pub const SUPPORT_LABEL: &str = "Support available";
pub const EXPERIENCE_LABEL: &str = "Years of experience";
pub const SUPPORT_HOURS: &str = "24/7";
pub const EXPERIENCE_ID: &str = "experience";

/// Average rating as a percentage of five stars, rounded half up. 98 when there are none.
pub fn satisfaction_rate(testimonials: &[Testimonial]) -> u32 {
    if testimonials.is_empty() {
        return DEFAULT_SATISFACTION_RATE;
    }

    let count = testimonials.len() as u64;
    let total: u64 = testimonials.iter().map(|t| u64::from(t.rating)).sum();
    // round(100 * total / (5 * count)) == floor((40 * total + count) / (2 * count))
    ((40 * total + count) / (2 * count)) as u32
}

pub fn years_of_experience_in(stats: &StatsRecord, current_year: i32) -> i32 {
    current_year - stats.founding_year
}

pub fn years_of_experience(stats: &StatsRecord) -> i32 {
    years_of_experience_in(stats, Local::now().year())
}

pub fn formatted_years_of_experience(stats: &StatsRecord) -> String {
    format!("{}+", years_of_experience(stats))
}

/// Banner tiles in display order: satisfaction, families, support hours, experience.
pub fn display_stats(stats: &StatsRecord, testimonials: &[Testimonial]) -> Vec<StatItem> {
    vec![
        StatItem::new(format!("{}%", satisfaction_rate(testimonials)), SATISFACTION_LABEL),
        StatItem::new(format!("{}+", stats.families_count), FAMILIES_LABEL),
        StatItem::new(SUPPORT_HOURS, SUPPORT_LABEL),
        StatItem::new(formatted_years_of_experience(stats), EXPERIENCE_LABEL)
            .with_id(EXPERIENCE_ID),
    ]
}

pub fn snapshot_of(stats: &StatsRecord, testimonials: &[Testimonial]) -> StatsSnapshot {
    StatsSnapshot {
        families_count: stats.families_count,
        satisfaction_rate: satisfaction_rate(testimonials),
        years_of_experience: formatted_years_of_experience(stats),
    }
}

/// Reads both stores and builds the banner.
pub async fn load_display_stats<S, T>(
    counter: &CounterStore<S>,
    testimonials: &TestimonialStore<T>,
) -> Vec<StatItem>
where
    S: StatsBackend,
    T: TestimonialBackend,
{
    let stats = counter.get_stats().await;
    let entries = testimonials.list_testimonials().await;
    display_stats(&stats, &entries)
}

pub async fn snapshot<S, T>(
    counter: &CounterStore<S>,
    testimonials: &TestimonialStore<T>,
) -> StatsSnapshot
where
    S: StatsBackend,
    T: TestimonialBackend,
{
    let stats = counter.get_stats().await;
    let entries = testimonials.list_testimonials().await;
    snapshot_of(&stats, &entries)
}
