//! Colorful console output for GroupForge runs.
//!
//! Provides a custom `tracing` layer that formats run events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Run lifecycle (start, model scale, solve end, batches)
//! - **WARN**: No solution, engine deadline reached
//!
//! Set `RUST_LOG` to override the default `groupforge_solver=info` filter.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "groupforge_solver=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the GroupForge banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(GroupConsoleLayer)
            .try_init();
    });
}

fn elapsed_secs() -> f64 {
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64()
}

fn print_banner() {
    let banner = r#"
  ____                       _____
 / ___|_ __ ___  _   _ _ __ |  ___|__  _ __ __ _  ___
| |  _| '__/ _ \| | | | '_ \| |_ / _ \| '__/ _` |/ _ \
| |_| | | | (_) | |_| | |_) |  _| (_) | | | (_| |  __/
 \____|_|  \___/ \__,_| .__/|_|  \___/|_|  \__, |\___|
                      |_|                  |___/
"#;

    let version_line = format!(
        "                 v{} - Repeat-Aware Group Assignment\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats run events with colors.
pub struct GroupConsoleLayer;

impl<S: Subscriber> Layer<S> for GroupConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with("groupforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    session: Option<String>,
    engine: Option<String>,
    status: Option<String>,
    participants: Option<u64>,
    groups: Option<u64>,
    history_pairs: Option<u64>,
    variables: Option<u64>,
    constraints: Option<u64>,
    squared_repeat_cost: Option<i64>,
    level_one_groups: Option<u64>,
    elapsed_ms: Option<u64>,
    objective: Option<f64>,
    limit_secs: Option<f64>,
    jobs: Option<u64>,
    solved: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "session" => self.session = Some(s),
            "engine" => self.engine = Some(s),
            "status" => self.status = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "participants" => self.participants = Some(value),
            "groups" => self.groups = Some(value),
            "history_pairs" => self.history_pairs = Some(value),
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "level_one_groups" => self.level_one_groups = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            "jobs" => self.jobs = Some(value),
            "solved" => self.solved = Some(value),
            "squared_repeat_cost" => self.squared_repeat_cost = Some(value as i64),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "squared_repeat_cost" => self.squared_repeat_cost = Some(value),
            _ => self.record_u64(field, value.max(0) as u64),
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            "limit_secs" => self.limit_secs = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "session" => self.session = Some(value.to_string()),
            "engine" => self.engine = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "run_start" => format_run_start(v),
        "model_built" => format_model_built(v),
        "solve_end" => format_solve_end(v),
        "no_solution" => format_no_solution(v),
        "deadline_reached" => format_deadline(v),
        "batch_end" => format_batch_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_run_start(v: &EventVisitor) -> String {
    format!(
        "{} {} Session {} │ {} participants │ {} groups │ {} history pairs │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.session.as_deref().unwrap_or("-").white().bold(),
        count(v.participants).bright_yellow(),
        count(v.groups).bright_yellow(),
        count(v.history_pairs).bright_yellow(),
        v.engine.as_deref().unwrap_or("engine").bright_black()
    )
}

fn format_model_built(v: &EventVisitor) -> String {
    format!(
        "{} {} Model │ {} variables │ {} constraints",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.variables).bright_magenta(),
        count(v.constraints).bright_magenta()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("UNKNOWN");
    let objective = v
        .objective
        .map(format_objective)
        .unwrap_or_else(|| "N/A".to_string());

    let mut output = format!(
        "{} {} Solved │ {} │ objective {} │ repeat cost {} │ {} level-1 groups",
        format_elapsed(),
        "■".bright_cyan().bold(),
        status.bright_green().bold(),
        objective,
        v.squared_repeat_cost.unwrap_or(0).to_formatted_string(&Locale::en).yellow(),
        count(v.level_one_groups).bright_green()
    );
    if let Some(ms) = v.elapsed_ms {
        output.push_str(&format!(" │ {}", format_duration_ms(ms).yellow()));
    }
    output
}

fn format_no_solution(v: &EventVisitor) -> String {
    format!(
        "{} {} No solution │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.status.as_deref().unwrap_or("UNKNOWN").bright_red().bold()
    )
}

fn format_deadline(v: &EventVisitor) -> String {
    format!(
        "{} {} Deadline reached after {}s",
        format_elapsed(),
        "⏱".yellow(),
        format!("{:.1}", v.limit_secs.unwrap_or(0.0)).bright_yellow()
    )
}

fn format_batch_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Batch │ {} of {} sessions solved",
        format_elapsed(),
        "◀".bright_blue(),
        count(v.solved).bright_green(),
        count(v.jobs).white()
    )
}

fn format_objective(value: f64) -> String {
    let text = format!("{}", value);
    if value < 0.0 {
        text.bright_green().to_string()
    } else if value > 0.0 {
        text.yellow().to_string()
    } else {
        text.white().to_string()
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("phase_start".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor).is_empty());
    }

    #[test]
    fn test_solve_end_mentions_costs() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            status: Some("OPTIMAL".to_string()),
            objective: Some(-2.0),
            squared_repeat_cost: Some(1200),
            level_one_groups: Some(3),
            ..EventVisitor::default()
        };
        let output = format_event(&visitor);
        assert!(output.contains("OPTIMAL"));
        assert!(output.contains("1,200"));
        assert!(output.contains("level-1 groups"));
    }
}
