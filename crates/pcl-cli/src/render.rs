use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};

use pcl_score::CalibrationReport;
use pcl_types::{Outcome, Prediction, Verdict};

const APP_WIDTH: usize = 40;

pub fn print_rule() {
    println!("{}", "_".repeat(APP_WIDTH));
}

fn padding(key: &str, value: &str) -> String {
    " ".repeat(APP_WIDTH.saturating_sub(key.len() + value.len()).max(1))
}

pub fn print_pair(key: &str, value: &str) {
    println!("{}{}{}", key.bold(), padding(key, value), value.bold());
}

fn print_pair_colored(key: &str, value: ColoredString, plain: &str) {
    println!("{}{}{}", key.bold(), padding(key, plain), value);
}

fn verdict_colored(verdict: Verdict) -> ColoredString {
    match verdict {
        Verdict::True => "true".green().bold(),
        Verdict::False => "false".red().bold(),
    }
}

/// Full record card, original tool style: a rule, then aligned key/value
/// pairs, with the optional fields only when present.
pub fn print_prediction(p: &Prediction, now: DateTime<Utc>) {
    print_rule();
    print_pair("id", &p.id.short_id());
    print_pair("status", &p.status(now).to_string());
    print_pair("statement", &p.statement);
    if let Some(term_at) = p.term_at {
        print_pair("term", &term_at.format("%Y-%m-%d %H:%M").to_string());
    }
    print_pair("confidence", &p.confidence.to_string());
    if let Outcome::Resolved { verdict, at } = p.outcome {
        print_pair_colored("outcome", verdict_colored(verdict), &verdict.to_string());
        print_pair("resolved", &at.format("%Y-%m-%d %H:%M").to_string());
    }
    if !p.proof.is_empty() {
        print_pair("proof", &p.proof);
    }
    if !p.tags.is_empty() {
        let tags: Vec<&str> = p.tags.iter().map(String::as_str).collect();
        print_pair("tags", &tags.join(", "));
    }
}

/// One-line listing format.
pub fn print_prediction_line(p: &Prediction, now: DateTime<Utc>) {
    let outcome = match p.outcome {
        Outcome::Resolved { verdict, .. } => verdict_colored(verdict),
        Outcome::Unresolved => p.status(now).to_string().normal(),
    };
    let term = match p.term_at {
        Some(term_at) => format!(
            "{} ({} days)",
            term_at.format("%Y-%m-%d"),
            p.days_to_term(now).unwrap_or(0)
        ),
        None => "no term".to_string(),
    };
    let tags: Vec<&str> = p.tags.iter().map(String::as_str).collect();
    println!(
        "[{}] {:>4} -> {}\t{}\t{}",
        p.id.short_id().yellow(),
        p.confidence.to_string(),
        outcome,
        term,
        tags.join(", ").cyan()
    );
}

/// Brier score plus the reliability breakdown, occupied buckets only.
pub fn print_report(report: &CalibrationReport) {
    let Some(brier) = report.brier else {
        return;
    };
    print_pair("brier_score", &format!("{brier:.2}"));

    let occupied: Vec<_> = report.buckets.iter().filter(|b| b.count > 0).collect();
    if occupied.len() > 1 {
        println!("{}", "reliability".bold());
        for bucket in occupied {
            println!(
                "  {:>3.0}%-{:>3.0}%  n={:<3} said {:>5.1}%  got {:>5.1}%",
                bucket.lower * 100.0,
                bucket.upper * 100.0,
                bucket.count,
                bucket.mean_confidence.unwrap_or(0.0) * 100.0,
                bucket.observed_frequency.unwrap_or(0.0) * 100.0,
            );
        }
    }
}

/// The red nag line about unsolved predictions past their term.
pub fn pending_reminder(pending: &[&Prediction]) -> String {
    let ids: Vec<String> = pending.iter().map(|p| p.id.short_id()).collect();
    format!(
        "You have {} prediction{} waiting to be solved ({})",
        pending.len(),
        if pending.len() == 1 { "" } else { "s" },
        ids.join(", ")
    )
}
