// Draft board entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Create the session
// 4. Run the line-oriented driver loop until the user quits
//
// Everything here is presentation glue: reading commands, printing lists,
// and composing the countdown with the session. No list or draft logic
// lives in this file.

use std::io::Write as _;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use draft_board::config;
use draft_board::countdown::{Countdown, CountdownOutcome};
use draft_board::draft::history::DraftRecord;
use draft_board::draft::roster::{EntryId, RosterError};
use draft_board::protocol::RosterSnapshot;
use draft_board::session::DraftSession;

/// Which roster a pending edit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Teams,
    Participants,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Draft board starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: up to {} teams, countdown {}s",
        config.roster.team_capacity, config.draft.countdown_secs
    );

    // 3. Create the session
    let mut session = DraftSession::new(config);

    // 4. Run the driver loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Draft board. Type `help` for commands.");

    let mut pending_edit: Option<(ListKind, EntryId)> = None;
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();

        // A pending edit consumes the next line as the replacement name
        // (blank cancels), the way an in-place edit box would.
        if let Some((kind, id)) = pending_edit.take() {
            finish_edit(&mut session, kind, id, &line);
            continue;
        }

        let mut words = line.split_whitespace();
        match words.next() {
            Some("team") => {
                let name = rest_of(&line, "team");
                report(session.add_team(&name).map(|_| ()));
            }
            Some("part") => {
                let name = rest_of(&line, "part");
                report(session.add_participant(&name).map(|_| ()));
            }
            Some("edit") => {
                pending_edit = start_edit(&mut session, words.next(), words.next());
            }
            Some("del") => {
                delete(&mut session, words.next(), words.next());
            }
            Some("list") => render(&session),
            Some("start") => run_draft(&mut session, &mut lines).await?,
            Some("history") => render_history(&session),
            Some("json") => render_history_json(&session)?,
            Some("reset") => {
                session.reset();
                println!("Session reset.");
            }
            Some("help") => print_help(),
            Some("quit") | Some("exit") => break,
            Some(other) => println!("Unknown command `{other}`. Type `help`."),
            None => {}
        }
    }

    info!("Draft board shut down cleanly");
    Ok(())
}

/// Count down, then draft, unless the user cancels first.
async fn run_draft(
    session: &mut DraftSession,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<()> {
    if !session.is_ready_for_draft() {
        let rules = &session.config().roster;
        println!(
            "Not ready: add at least {} teams and {} participants first.",
            rules.min_teams, rules.min_participants
        );
        return Ok(());
    }

    let secs = session.config().draft.countdown_secs;
    println!("Assigning participants. Type `cancel` to abort.");
    let mut countdown = Countdown::start(secs);

    loop {
        tokio::select! {
            tick = countdown.tick() => {
                match tick {
                    Some(remaining) if remaining > 0 => println!("  {remaining}..."),
                    Some(_) => {}
                    None => break,
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(input) if input.trim() == "cancel" => countdown.cancel(),
                    Some(_) => {}
                    // EOF during the countdown counts as walking away.
                    None => countdown.cancel(),
                }
            }
        }
    }

    match countdown.outcome().await {
        CountdownOutcome::Elapsed => {
            let mut rng = rand::rng();
            match session.start_draft(&mut rng) {
                Ok(record) => render_record(record),
                Err(e) => println!("Draft failed: {e}"),
            }
        }
        CountdownOutcome::Cancelled => println!("Draft cancelled."),
    }
    Ok(())
}

fn start_edit(
    session: &mut DraftSession,
    kind: Option<&str>,
    position: Option<&str>,
) -> Option<(ListKind, EntryId)> {
    let (kind, roster) = match kind {
        Some("team") => (ListKind::Teams, session.teams()),
        Some("part") => (ListKind::Participants, session.participants()),
        _ => {
            println!("Usage: edit team <n> | edit part <n>");
            return None;
        }
    };
    let Some(entry) = position
        .and_then(|p| p.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| roster.entries().get(i))
    else {
        println!("No entry at that position.");
        return None;
    };
    let id = entry.id;
    println!("Editing `{}`. Type the new name, or a blank line to cancel.", entry.name);

    let begun = match kind {
        ListKind::Teams => session.begin_team_edit(id),
        ListKind::Participants => session.begin_participant_edit(id),
    };
    match begun {
        Ok(()) => Some((kind, id)),
        Err(e) => {
            println!("Error: {e}");
            None
        }
    }
}

fn finish_edit(session: &mut DraftSession, kind: ListKind, id: EntryId, input: &str) {
    if input.is_empty() {
        match kind {
            ListKind::Teams => session.cancel_team_edit(),
            ListKind::Participants => session.cancel_participant_edit(),
        }
        println!("Edit cancelled.");
        return;
    }
    let result = match kind {
        ListKind::Teams => session.commit_team_edit(id, input),
        ListKind::Participants => session.commit_participant_edit(id, input),
    };
    report(result);
}

fn delete(session: &mut DraftSession, kind: Option<&str>, position: Option<&str>) {
    let (kind, roster) = match kind {
        Some("team") => (ListKind::Teams, session.teams()),
        Some("part") => (ListKind::Participants, session.participants()),
        _ => {
            println!("Usage: del team <n> | del part <n>");
            return;
        }
    };
    let Some(id) = position
        .and_then(|p| p.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| roster.entries().get(i))
        .map(|e| e.id)
    else {
        println!("No entry at that position.");
        return;
    };
    let result = match kind {
        ListKind::Teams => session.remove_team(id),
        ListKind::Participants => session.remove_participant(id),
    };
    report(result);
}

fn report(result: Result<(), RosterError>) {
    match result {
        Ok(()) => println!("Ok."),
        Err(e) => println!("Error: {e}"),
    }
}

fn rest_of(line: &str, command: &str) -> String {
    line[command.len()..].trim().to_string()
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    std::io::stdout().flush().context("failed to flush stdout")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(session: &DraftSession) {
    let snapshot = session.snapshot();
    render_roster("Teams", &snapshot.teams);
    render_roster("Participants", &snapshot.participants);
    if snapshot.ready_for_draft {
        println!("Ready to draft: type `start`.");
    }
}

fn render_roster(title: &str, snapshot: &RosterSnapshot) {
    match snapshot.capacity {
        Some(max) => println!("{} ({}/{}):", title, snapshot.entries.len(), max),
        None => println!("{} ({}):", title, snapshot.entries.len()),
    }
    for (i, entry) in snapshot.entries.iter().enumerate() {
        let marker = if entry.editing { " [editing]" } else { "" };
        println!("  {}. {}{}", i + 1, entry.name, marker);
    }
    if let Some(error) = &snapshot.error {
        println!("  ! {error}");
    }
}

fn render_record(record: &DraftRecord) {
    println!("Draft #{} results:", record.number);
    for team in &record.assignment.teams {
        println!("  {}:", team.team);
        for pick in &team.picks {
            println!("    - {pick}");
        }
    }
}

fn render_history(session: &DraftSession) {
    if session.history().is_empty() {
        println!("No drafts yet.");
        return;
    }
    for record in session.history().all() {
        render_record(record);
    }
}

fn render_history_json(session: &DraftSession) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(session.history().all())
        .context("failed to serialize draft history")?;
    println!("{json}");
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  team <name>        add a team");
    println!("  part <name>        add a participant");
    println!("  edit team <n>      rename the n-th team (blank line cancels)");
    println!("  edit part <n>      rename the n-th participant");
    println!("  del team <n>       delete the n-th team");
    println!("  del part <n>       delete the n-th participant");
    println!("  list               show both lists");
    println!("  start              run the draft after the countdown");
    println!("  history            show all archived drafts");
    println!("  json               dump the archive as JSON");
    println!("  reset              clear everything and start over");
    println!("  quit               exit");
}

/// Initialize tracing to log to a file (not the terminal, which is the UI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("draftboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("draft_board=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
