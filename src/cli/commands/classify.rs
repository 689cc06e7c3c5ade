//! Classify command implementation for DMI processor CLI
//!
//! Reads every input file, classifies its records, groups the resulting
//! entities and prints them as JSON or as a colored summary.

use super::shared::{RunSummary, load_configuration, setup_logging};
use crate::app::services::classifier::{
    ClassificationResult, ClassificationStats, ObservationClassifier,
};
use crate::app::services::grouping::{EntityCollection, Grouped};
use crate::app::services::hydration::EntityRef;
use crate::cli::args::{ClassifyArgs, GroupBy, OutputFormat};
use crate::cli::input::{discover_inputs, read_json};
use crate::constants::{OBSERVED_KEY, VALUE_KEY};
use crate::{Error, Result};
use colored::*;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Classify command runner
pub async fn run_classify(args: ClassifyArgs) -> Result<RunSummary> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;
    debug!("Classify arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;
    let strict = config.strict;
    let classifier = ObservationClassifier::from_config(config)?;

    let files = discover_inputs(&args.input)
        .map_err(|e| Error::configuration(format!("{:#}", e)))?;
    info!("Classifying {} input files", files.len());

    let mut summary = RunSummary::default();
    let mut combined = ClassificationResult::default();

    for path in &files {
        let value = match read_json(path).await {
            Ok(value) => value,
            Err(e) if strict => return Err(Error::malformed_record(format!("{:#}", e))),
            Err(e) => {
                warn!("Skipping {}: {:#}", path.display(), e);
                summary.files_failed += 1;
                continue;
            }
        };

        let result = classifier.classify_json(value)?;
        debug!("{}: {}", path.display(), result.stats.summary());

        summary.files_processed += 1;
        combined.merge(result);
    }

    summary.stats = combined.stats;
    let mut entities: EntityCollection<EntityRef> =
        EntityCollection::default().with_station_key(classifier.config().station_key.clone());
    for entity in combined.entities {
        entities.push(entity);
    }

    summary.processing_time = start_time.elapsed();

    match args.format {
        OutputFormat::Json => print_json(&entities, args.group_by)?,
        OutputFormat::Summary => print_summary(&entities, args.group_by, &summary),
    }

    Ok(summary)
}

/// Serialize the grouped entities to stdout
fn print_json(entities: &EntityCollection<EntityRef>, group_by: GroupBy) -> Result<()> {
    let rendered = match group_by {
        GroupBy::None => serde_json::to_string_pretty(entities),
        GroupBy::Type => serde_json::to_string_pretty(&entities.group_by_type()),
        GroupBy::Station => serde_json::to_string_pretty(&entities.group_by_station()),
        GroupBy::StationType => {
            serde_json::to_string_pretty(&entities.group_by_station_and_type())
        }
        GroupBy::Latest => serde_json::to_string_pretty(&entities.latest_by_type()),
    }
    .map_err(|e| Error::json("Failed to serialize entities".to_string(), e))?;

    println!("{}", rendered);
    Ok(())
}

fn print_summary(entities: &EntityCollection<EntityRef>, group_by: GroupBy, summary: &RunSummary) {
    println!("\n{}", "Classification Summary".bright_green().bold());
    println!(
        "  Files: {} read, {} failed",
        summary.files_processed.to_string().bright_white().bold(),
        failed_count(summary.files_failed)
    );
    print_stats(&summary.stats);

    match group_by {
        GroupBy::None => {}
        GroupBy::Type => print_buckets("By type", &entities.group_by_type()),
        GroupBy::Station => print_buckets("By station", &entities.group_by_station()),
        GroupBy::StationType => {
            println!("\n{}", "By station and type".bright_green().bold());
            for (station, grouped) in entities.group_by_station_and_type() {
                println!("  {}", station_label(&station).bright_cyan());
                print_grouped_lines(&grouped, "    ");
            }
        }
        GroupBy::Latest => {
            println!("\n{}", "Latest by type".bright_green().bold());
            for (type_tag, entity) in entities.latest_by_type() {
                let observed = entity
                    .field_value(OBSERVED_KEY)
                    .map(|value| value.to_string())
                    .unwrap_or_default();
                let value = entity
                    .field_value(VALUE_KEY)
                    .map(|value| value.to_string())
                    .unwrap_or_default();
                println!(
                    "  {} {} {}",
                    type_tag.bright_cyan(),
                    value.bright_white().bold(),
                    format!("({})", observed).bright_black()
                );
            }
        }
    }

    println!(
        "\n  Completed in {:.2}s",
        summary.processing_time.as_secs_f64()
    );
}

fn print_stats(stats: &ClassificationStats) {
    println!(
        "  Records: {} total, {} classified, {} unclassified, {} malformed",
        stats.total_records.to_string().bright_white().bold(),
        stats.classified.to_string().bright_white().bold(),
        failed_count(stats.unclassified),
        failed_count(stats.malformed)
    );
    println!("  Fields skipped: {}", failed_count(stats.fields_skipped));

    if !stats.unknown_discriminators.is_empty() {
        println!("  Unknown parameter ids:");
        for (discriminator, count) in &stats.unknown_discriminators {
            println!("    {} {}", discriminator.bright_yellow(), format!("x{}", count).bright_black());
        }
    }
}

fn print_buckets(title: &str, grouped: &Grouped<EntityRef>) {
    println!("\n{}", title.bright_green().bold());
    print_grouped_lines(grouped, "  ");
}

fn print_grouped_lines(grouped: &Grouped<EntityRef>, indent: &str) {
    match grouped {
        Grouped::Flat(entities) => {
            println!("{}{} entities (single group)", indent, entities.len());
        }
        Grouped::Keyed(buckets) => {
            for (key, members) in buckets {
                println!(
                    "{}{} {}",
                    indent,
                    station_label(key).bright_cyan(),
                    members.len().to_string().bright_white().bold()
                );
            }
        }
    }
}

fn station_label(key: &str) -> String {
    if key.is_empty() {
        "(no station)".to_string()
    } else {
        key.to_string()
    }
}

fn failed_count(count: usize) -> ColoredString {
    if count == 0 {
        count.to_string().bright_white().bold()
    } else {
        count.to_string().bright_red().bold()
    }
}
