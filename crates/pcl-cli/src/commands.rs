use std::env;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;

use pcl_ledger::{FieldEdit, Filter, OutcomeFilter};
use pcl_score::score;
use pcl_store::{JsonFileStore, LedgerSession};
use pcl_types::{Confidence, Prediction, PredictionDraft, Status, Verdict};

use crate::cli::{
    AddArgs, Cli, Command, DeleteArgs, EditArgs, ListArgs, ShowArgs, SolveArgs, StatsArgs,
};
use crate::config::{self, CliConfig};
use crate::render;

type Session = LedgerSession<JsonFileStore>;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = config::load()?;
    let path = choose_ledger_path(
        cli.file,
        env::var("PCL_LEDGER").ok(),
        &config,
        env::var("HOME").ok(),
    )?;
    let mut session = LedgerSession::open(JsonFileStore::new(path), config.term_policy)?;
    let now = Utc::now();

    match cli.command.unwrap_or(Command::Summary) {
        Command::Add(args) => cmd_add(&mut session, args, now),
        Command::Show(args) => cmd_show(&session, args, now),
        Command::List(args) => cmd_list(&session, args, now),
        Command::Edit(args) => cmd_edit(&mut session, args, now),
        Command::Solve(args) => cmd_solve(&mut session, args, now),
        Command::Delete(args) => cmd_delete(&mut session, args),
        Command::Stats(args) => cmd_stats(&session, args, now),
        Command::Summary => cmd_summary(&session, now),
        Command::Next => cmd_next(&session, now),
    }
}

/// Ledger location, in precedence order: `--file`, `PCL_LEDGER`, the
/// config file, then the default under the home directory.
fn choose_ledger_path(
    flag: Option<PathBuf>,
    env_ledger: Option<String>,
    config: &CliConfig,
    home: Option<String>,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(path) = env_ledger.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = &config.ledger_path {
        return Ok(path.clone());
    }
    let home = home
        .filter(|h| !h.is_empty())
        .context("no ledger location: pass --file, or set PCL_LEDGER or HOME")?;
    Ok(PathBuf::from(home).join(".local/share/pcl/ledger.json"))
}

fn cmd_add(session: &mut Session, args: AddArgs, now: DateTime<Utc>) -> anyhow::Result<()> {
    let confidence: Confidence = args.confidence.parse()?;
    let mut draft = PredictionDraft::new(args.statement, confidence);
    if let Some(term) = &args.term {
        draft = draft.with_term(parse_when(term)?);
    }
    for tag in &args.tags {
        draft = draft.with_tag(tag);
    }
    if let Some(proof) = args.proof {
        draft = draft.with_proof(proof);
    }

    let record = session.ledger_mut().add(draft, now)?.clone();
    session.commit()?;
    render::print_prediction(&record, now);
    Ok(())
}

fn cmd_show(session: &Session, args: ShowArgs, now: DateTime<Utc>) -> anyhow::Result<()> {
    for raw in &args.ids {
        let id = session.ledger().resolve_id(raw)?;
        render::print_prediction(session.ledger().get(&id)?, now);
    }
    Ok(())
}

fn cmd_list(session: &Session, args: ListArgs, now: DateTime<Utc>) -> anyhow::Result<()> {
    let mut filter = Filter::any().with_outcome(args.outcome.parse::<OutcomeFilter>()?);
    for tag in &args.tags {
        filter = filter.with_tag(tag);
    }
    if let Some(bound) = &args.created_after {
        filter = filter.created_after(parse_when(bound)?);
    }
    if let Some(bound) = &args.created_before {
        filter = filter.created_before(parse_when(bound)?);
    }
    if let Some(bound) = &args.term_before {
        filter = filter.term_before(parse_when(bound)?);
    }

    // Display order: nearest term first, untermed records last.
    let mut selected: Vec<&Prediction> = session.ledger().list(&filter).collect();
    selected.sort_by_key(|p| (p.term_at.is_none(), p.term_at, p.created_at));
    for prediction in selected {
        render::print_prediction_line(prediction, now);
    }
    Ok(())
}

fn cmd_edit(session: &mut Session, args: EditArgs, now: DateTime<Utc>) -> anyhow::Result<()> {
    let edits = args
        .fields
        .iter()
        .map(|assignment| FieldEdit::parse(assignment))
        .collect::<Result<Vec<_>, _>>()?;

    let id = session.ledger().resolve_id(&args.id)?;
    let record = session.ledger_mut().edit(&id, &edits)?.clone();
    session.commit()?;
    render::print_prediction(&record, now);
    Ok(())
}

fn cmd_solve(session: &mut Session, args: SolveArgs, now: DateTime<Utc>) -> anyhow::Result<()> {
    let verdict: Verdict = args.outcome.parse()?;
    let id = session.ledger().resolve_id(&args.id)?;

    if args.force {
        session.ledger_mut().solve_overriding_term(&id, verdict, now)?;
    } else {
        session.ledger_mut().solve(&id, verdict, now)?;
    }
    if let Some(proof) = args.proof {
        session.ledger_mut().edit(&id, &[FieldEdit::Proof(proof)])?;
    }

    session.commit()?;
    render::print_prediction(session.ledger().get(&id)?, now);
    Ok(())
}

fn cmd_delete(session: &mut Session, args: DeleteArgs) -> anyhow::Result<()> {
    let id = session.ledger().resolve_id(&args.id)?;
    let removed = session.ledger_mut().delete(&id)?;
    session.commit()?;
    println!(
        "{} Deleted prediction {}",
        "✓".green().bold(),
        removed.id.short_id().yellow()
    );
    Ok(())
}

fn cmd_stats(session: &Session, args: StatsArgs, now: DateTime<Utc>) -> anyhow::Result<()> {
    let mut filter = Filter::any();
    for tag in &args.tags {
        filter = filter.with_tag(tag);
    }
    let selected: Vec<&Prediction> = session.ledger().list(&filter).collect();

    let by_status = |status: Status| -> Vec<&Prediction> {
        selected
            .iter()
            .copied()
            .filter(|p| p.status(now) == status)
            .collect()
    };
    let resolved = by_status(Status::Resolved);
    let future = by_status(Status::Future);
    let pending = by_status(Status::Pending);

    render::print_pair("solved", &resolved.len().to_string());
    render::print_pair("future", &future.len().to_string());
    render::print_pair("pending", &pending.len().to_string());

    if let Some(next) = earliest_future(&selected, now) {
        let term_at = next.term_at.unwrap_or(now);
        render::print_pair(
            "next",
            &format!("'{}' on {}", next.id.short_id(), term_at.format("%Y-%m-%d")),
        );
    }

    let report = score(resolved.iter().copied())?;
    render::print_report(&report);

    if !pending.is_empty() {
        println!("{}", render::pending_reminder(&pending).red());
    }
    Ok(())
}

fn cmd_summary(session: &Session, now: DateTime<Utc>) -> anyhow::Result<()> {
    let any_filter = Filter::any();
    let all: Vec<&Prediction> = session.ledger().list(&any_filter).collect();
    let pending: Vec<&Prediction> = all
        .iter()
        .copied()
        .filter(|p| p.status(now) == Status::Pending)
        .collect();

    print!("pcl : ");
    if !pending.is_empty() {
        println!("{}", render::pending_reminder(&pending).red());
        return Ok(());
    }
    if let Some(next) = earliest_future(&all, now) {
        let days = next.days_to_term(now).unwrap_or(0);
        println!("{}", format!("Next prediction in {days} days").green());
        return Ok(());
    }

    let resolved_filter = Filter::resolved();
    let resolved: Vec<&Prediction> = session.ledger().list(&resolved_filter).collect();
    let report = score(resolved)?;
    match report.brier {
        Some(brier) => println!("brier_score {brier:.2}"),
        None => println!("No predictions yet."),
    }
    Ok(())
}

fn cmd_next(session: &Session, now: DateTime<Utc>) -> anyhow::Result<()> {
    let any_filter = Filter::any();
    let all: Vec<&Prediction> = session.ledger().list(&any_filter).collect();
    match earliest_future(&all, now) {
        Some(next) => render::print_prediction(next, now),
        None => println!("No upcoming predictions."),
    }
    Ok(())
}

/// The unresolved prediction whose term is nearest in the future.
fn earliest_future<'a>(
    predictions: &[&'a Prediction],
    now: DateTime<Utc>,
) -> Option<&'a Prediction> {
    predictions
        .iter()
        .copied()
        .filter(|p| p.status(now) == Status::Future)
        .min_by_key(|p| p.term_at)
}

/// Accept RFC 3339 timestamps or bare dates (midnight UTC).
fn parse_when(text: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .context("date has no midnight; this cannot happen")?;
        return Ok(midnight.and_utc());
    }
    anyhow::bail!("cannot parse '{raw}' as a time (expected RFC 3339 or YYYY-MM-DD)")
}
