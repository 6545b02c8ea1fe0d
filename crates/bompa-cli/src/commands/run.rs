use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use bompa_core::{GameSession, SessionEvent, SessionEventKind, SessionOutcome};

use crate::script::{self, ScriptedIntent};

/// Machine-readable result of a run.
#[derive(Serialize)]
struct RunSummary<'a> {
    outcome: SessionOutcome,
    ticks: u64,
    elapsed: f64,
    remaining_power: f64,
    power_percentage: f64,
    waypoint: usize,
    phase: String,
    aggression: f64,
    events_evicted: usize,
    events: &'a [SessionEvent],
}

pub fn run(
    config: Option<&Path>,
    script: Option<&Path>,
    dt: f64,
    max_seconds: f64,
    verbose: bool,
    json: bool,
) -> Result<(), String> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(format!("--dt must be a positive number of seconds, got {dt}"));
    }
    if !max_seconds.is_finite() || max_seconds <= 0.0 {
        return Err(format!(
            "--max-seconds must be a positive number of seconds, got {max_seconds}"
        ));
    }

    let config = super::load_config(config)?;
    let intents = match script {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read script {}: {e}", path.display()))?;
            script::parse(&source)?
        }
        None => Vec::new(),
    };

    let mut session = GameSession::new(config).map_err(|e| e.to_string())?;
    play(&mut session, intents, dt, max_seconds);

    if json {
        print_json(&session)
    } else {
        print_summary(&session, verbose);
        Ok(())
    }
}

/// Tick until the night ends, queueing each scripted intent once its time comes.
fn play(session: &mut GameSession, intents: Vec<ScriptedIntent>, dt: f64, max_seconds: f64) {
    let mut pending = intents.into_iter().peekable();
    while !session.outcome().is_final() {
        if session.elapsed() >= max_seconds {
            tracing::debug!(elapsed = session.elapsed(), "time limit reached");
            session.end_shift();
            break;
        }
        while let Some(next) = pending.next_if(|s| s.at <= session.elapsed()) {
            tracing::debug!(line = next.line, intent = %next.intent, "queueing scripted intent");
            session.push_intent(next.intent);
        }
        session.tick(dt);
    }
}

fn print_json(session: &GameSession) -> Result<(), String> {
    let summary = RunSummary {
        outcome: session.outcome(),
        ticks: session.current_tick(),
        elapsed: session.elapsed(),
        remaining_power: session.remaining_power(),
        power_percentage: session.power_percentage(),
        waypoint: session.antagonist().waypoint_index(),
        phase: session.antagonist_phase().to_string(),
        aggression: session.aggression(),
        events_evicted: session.events().evicted(),
        events: session.events().events(),
    };
    let text = serde_json::to_string_pretty(&summary)
        .map_err(|e| format!("failed to serialize summary: {e}"))?;
    println!("{text}");
    Ok(())
}

fn print_summary(session: &GameSession, verbose: bool) {
    let outcome = session.outcome();
    let label = match outcome {
        SessionOutcome::PlayerSurvived => outcome.to_string().green().bold(),
        SessionOutcome::PowerDepleted => outcome.to_string().yellow().bold(),
        SessionOutcome::CaughtByAntagonist => outcome.to_string().red().bold(),
        SessionOutcome::InProgress => outcome.to_string().normal(),
    };
    match session.events().final_event() {
        Some(event) => println!(
            "  {} {label} {}",
            "Night over:".bold(),
            format!("({} at {:.1}s)", event.description, event.elapsed).dimmed()
        ),
        None => println!("  {} {label}", "Night over:".bold()),
    }
    println!(
        "  {}",
        format!(
            "({} ticks, {:.1}s, {} events)",
            session.current_tick(),
            session.elapsed(),
            session.events().len()
        )
        .dimmed()
    );
    println!();

    if verbose {
        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in session.events().events() {
            let stamp = format!("[{:>7.2}s]", event.elapsed).dimmed();
            println!("  {stamp} {}", colorize_event(&event.kind, &event.description));
        }
        if session.events().is_empty() {
            println!("  {}", "(no events)".dimmed());
        }
        println!();
    } else {
        let notable: Vec<_> = session
            .events()
            .events()
            .iter()
            .filter(|e| e.kind.is_terminal() || matches!(e.kind, SessionEventKind::ArrivedAtDoor { .. }))
            .collect();
        if !notable.is_empty() {
            println!("  {}", "Notable Events".bold().underline());
            for event in notable {
                let stamp = format!("[{:>7.2}s]", event.elapsed).dimmed();
                println!("  {stamp} {}", colorize_event(&event.kind, &event.description));
            }
            println!();
        }
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Power", "Bompa", "Waypoint", "Aggression", "Doors"]);

    let doors = bompa_core::DoorSide::ALL
        .iter()
        .map(|side| {
            let state = if session.door_state(*side).is_closed {
                "closed"
            } else {
                "open"
            };
            format!("{side} {state}")
        })
        .collect::<Vec<_>>()
        .join(", ");
    table.add_row(vec![
        power_gauge(session.power_percentage()),
        session.antagonist_phase().to_string(),
        session.antagonist().waypoint_index().to_string(),
        format!("{:.2}", session.aggression()),
        doors,
    ]);

    println!("{table}");
}

fn colorize_event(kind: &SessionEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SessionEventKind::Jumpscare { .. } => description.red().bold(),
        SessionEventKind::PowerDepleted => description.yellow().bold(),
        SessionEventKind::ShiftEnded => description.green().bold(),
        SessionEventKind::ArrivedAtDoor { .. } | SessionEventKind::DoorChecked { .. } => {
            description.red()
        }
        SessionEventKind::DoorToggled { .. } | SessionEventKind::LightChanged { .. } => {
            description.cyan()
        }
        SessionEventKind::CameraToggled { .. } | SessionEventKind::FeedSwitched { .. } => {
            description.blue()
        }
        SessionEventKind::AntagonistDeparted { .. } | SessionEventKind::AntagonistArrived { .. } => {
            description.normal()
        }
    }
}

/// `POWER:  42% ||||||||` with the bar shaded from red when empty to green when full.
fn power_gauge(fraction: f64) -> String {
    const WIDTH: usize = 20;
    let fraction = fraction.clamp(0.0, 1.0);
    let filled = (fraction * WIDTH as f64).round() as usize;
    let red = (255.0 * (1.0 - fraction)).round() as u8;
    let green = (255.0 * fraction).round() as u8;
    format!(
        "POWER: {:>3}% {}{}",
        (fraction * 100.0).round() as u32,
        "|".repeat(filled).truecolor(red, green, 0),
        " ".repeat(WIDTH - filled)
    )
}
