use crate::config::cli::{Command, TestimonialCommand};
use crate::config::toml_config::TomlConfig;
use crate::core::aggregator;
use crate::core::confirmation::{confirm_request, ConfirmationRequest};
use crate::core::counter::CounterStore;
use crate::core::poller::StatsPoller;
use crate::core::testimonials::TestimonialStore;
use crate::domain::model::{NewTestimonial, StatItem, StatsRecord, Testimonial};
use crate::domain::ports::{StatsBackend, TestimonialBackend};
use crate::utils::error::Result;
use std::time::Duration;

/// Runs one command against the stores and returns the text to print.
pub async fn execute<S, T>(
    command: Command,
    counter: &CounterStore<S>,
    testimonials: &TestimonialStore<T>,
    settings: &TomlConfig,
) -> Result<String>
where
    S: StatsBackend,
    T: TestimonialBackend,
{
    match command {
        Command::Stats => Ok(format_stats(&counter.get_stats().await)),
        Command::Display { json } => {
            let items = aggregator::load_display_stats(counter, testimonials).await;
            if json {
                Ok(serde_json::to_string_pretty(&items)?)
            } else {
                Ok(format_display(&items))
            }
        }
        Command::Increment => {
            let stats = counter.increment_families_count().await;
            Ok(format!("Families helped: {}", stats.families_count))
        }
        Command::Reset => {
            let stats = counter.reset_stats().await;
            Ok(format!("Stats reset. {}", format_stats(&stats)))
        }
        Command::Confirm { name, email } => {
            let outcome = confirm_request(counter, ConfirmationRequest { name, email }).await;
            Ok(outcome.message())
        }
        Command::Testimonials { action } => match action {
            TestimonialCommand::List { json } => {
                let entries = testimonials.list_testimonials().await;
                if json {
                    Ok(serde_json::to_string_pretty(&entries)?)
                } else {
                    Ok(format_testimonials(&entries))
                }
            }
            TestimonialCommand::Add {
                name,
                relation,
                rating,
                text,
                service,
            } => {
                let stored = testimonials
                    .add_testimonial(NewTestimonial {
                        name,
                        relation,
                        rating,
                        text,
                        service,
                    })
                    .await?;
                Ok(format!(
                    "Thank you! Testimonial #{} has been published.",
                    stored.id
                ))
            }
        },
        Command::Init => {
            let stats = counter.get_stats().await;
            let seeded = testimonials.initialize().await?;
            Ok(format!(
                "Store ready: {} families, {} example testimonials added",
                stats.families_count, seeded
            ))
        }
        Command::Watch { interval, count } => {
            let interval = interval
                .map(Duration::from_secs)
                .unwrap_or_else(|| settings.poll_interval());
            let mut poller = StatsPoller::new(interval);
            if let Some(count) = count {
                poller = poller.with_max_polls(count);
            }

            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!("Cannot listen for Ctrl-C: {}", e);
                    std::future::pending::<()>().await;
                }
            };
            let polls = poller
                .run(counter, testimonials, shutdown, |snapshot| {
                    println!(
                        "{}% satisfaction | {}+ families | {} years",
                        snapshot.satisfaction_rate,
                        snapshot.families_count,
                        snapshot.years_of_experience
                    );
                })
                .await;
            Ok(format!("Stopped after {} polls", polls))
        }
    }
}

fn format_stats(stats: &StatsRecord) -> String {
    format!(
        "Families helped: {}\nFounding year: {}\nLast updated: {}",
        stats.families_count,
        stats.founding_year,
        stats.last_updated.to_rfc3339()
    )
}

fn format_display(items: &[StatItem]) -> String {
    items
        .iter()
        .map(|item| format!("{:>6}  {}", item.number, item.label))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_testimonials(entries: &[Testimonial]) -> String {
    if entries.is_empty() {
        return "No testimonials yet.".to_string();
    }

    entries
        .iter()
        .map(|t| {
            format!(
                "#{} {} {} ({}) - {} [{}]\n  \"{}\"",
                t.id,
                "*".repeat(usize::from(t.rating)),
                t.name,
                t.relation,
                t.service,
                t.date.format("%Y-%m-%d"),
                t.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::local::{LocalStatsBackend, LocalTestimonialBackend};
    use crate::adapters::storage::MemoryStorage;

    type LocalStores = (
        CounterStore<LocalStatsBackend<MemoryStorage>>,
        TestimonialStore<LocalTestimonialBackend<MemoryStorage>>,
    );

    fn stores() -> LocalStores {
        let storage = MemoryStorage::new();
        (
            CounterStore::new(LocalStatsBackend::new(storage.clone())),
            TestimonialStore::new(LocalTestimonialBackend::new(storage)),
        )
    }

    #[tokio::test]
    async fn test_increment_then_display() {
        let (counter, testimonials) = stores();
        let settings = TomlConfig::default();

        let out = execute(Command::Increment, &counter, &testimonials, &settings)
            .await
            .unwrap();
        assert_eq!(out, "Families helped: 96");

        let out = execute(
            Command::Display { json: false },
            &counter,
            &testimonials,
            &settings,
        )
        .await
        .unwrap();
        assert!(out.contains("98%  Satisfaction rate"));
        assert!(out.contains("96+  Families helped"));
        assert!(out.contains("24/7  Support available"));
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_rating() {
        let (counter, testimonials) = stores();
        let command = Command::Testimonials {
            action: TestimonialCommand::Add {
                name: "Ann".to_string(),
                relation: String::new(),
                rating: 0,
                text: "Great".to_string(),
                service: String::new(),
            },
        };

        let result = execute(command, &counter, &testimonials, &TomlConfig::default()).await;

        assert!(result.is_err());
    }

    #[test]
    fn test_format_testimonials_shows_stars() {
        let entry = Testimonial {
            id: 3,
            name: "Ann".to_string(),
            relation: "Daughter".to_string(),
            rating: 4,
            text: "Kind staff".to_string(),
            service: "Home care".to_string(),
            date: chrono::Utc::now(),
        };

        let out = format_testimonials(&[entry]);

        assert!(out.starts_with("#3 **** Ann (Daughter) - Home care"));
        assert!(out.ends_with("\"Kind staff\""));
    }
}
