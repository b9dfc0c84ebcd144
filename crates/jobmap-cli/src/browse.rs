//! Line-oriented interactive session.
//!
//! Each stdin line is one user action. Geocode completions are applied as
//! they arrive, between lines, so typing never waits on the network.

use anyhow::{anyhow, bail};
use jobmap_core::{ExperienceLevel, JobType};
use jobmap_session::{Session, ViewEvent};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

const HELP: &str = "\
commands:
  k <text>     set keyword
  l <text>     set location
  t <type|->   set or clear job type
  x <level|->  set or clear experience level
  enter        search (focus first match, or geocode the location)
  click <n>    open listing number n
  close        close the detail pane
  show         print the current view
  help         this text
  quit         leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BrowseCommand {
    Keyword(String),
    Location(String),
    JobType(Option<JobType>),
    Experience(Option<ExperienceLevel>),
    Enter,
    /// 1-based position in the printed listing.
    Click(usize),
    Close,
    Show,
    Help,
    Quit,
}

/// Parses one input line. Text arguments may be empty to clear a field.
pub(crate) fn parse_browse_command(line: &str) -> anyhow::Result<BrowseCommand> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb {
        "k" | "keyword" => BrowseCommand::Keyword(rest.to_string()),
        "l" | "location" => BrowseCommand::Location(rest.to_string()),
        "t" | "type" => BrowseCommand::JobType(optional(rest)?),
        "x" | "experience" => BrowseCommand::Experience(optional(rest)?),
        "enter" | "search" => BrowseCommand::Enter,
        "click" => {
            let n: usize = rest
                .parse()
                .map_err(|_| anyhow!("usage: click <n>, got {rest:?}"))?;
            if n == 0 {
                bail!("listing numbers start at 1");
            }
            BrowseCommand::Click(n)
        }
        "close" => BrowseCommand::Close,
        "show" => BrowseCommand::Show,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "q" | "exit" => BrowseCommand::Quit,
        other => bail!("unknown command {other:?}; type `help`"),
    };
    Ok(command)
}

/// `-` or nothing clears the filter.
fn optional<T>(arg: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if arg.is_empty() || arg == "-" {
        return Ok(None);
    }
    Ok(Some(arg.parse()?))
}

/// Maps a parsed command to a controller event. `Click` needs the listing
/// to translate its position; positions past the end yield `None`.
fn to_event(command: BrowseCommand, filtered: &[usize]) -> Option<ViewEvent> {
    match command {
        BrowseCommand::Keyword(text) => Some(ViewEvent::KeywordChanged(text)),
        BrowseCommand::Location(text) => Some(ViewEvent::LocationChanged(text)),
        BrowseCommand::JobType(t) => Some(ViewEvent::JobTypeChanged(t)),
        BrowseCommand::Experience(x) => Some(ViewEvent::ExperienceChanged(x)),
        BrowseCommand::Enter => Some(ViewEvent::EnterPressed),
        BrowseCommand::Click(n) => n
            .checked_sub(1)
            .and_then(|pos| filtered.get(pos))
            .map(|&i| ViewEvent::JobClicked(i)),
        BrowseCommand::Close => Some(ViewEvent::DetailClosed),
        BrowseCommand::Show | BrowseCommand::Help | BrowseCommand::Quit => None,
    }
}

pub(crate) async fn run(mut session: Session) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render::print_view(&session.snapshot());
    println!("type `help` for commands");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                let command = match parse_browse_command(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                match command {
                    BrowseCommand::Quit => break,
                    BrowseCommand::Help => println!("{HELP}"),
                    BrowseCommand::Show => render::print_view(&session.snapshot()),
                    other => {
                        let Some(event) = to_event(other, session.controller().filtered()) else {
                            println!("no such listing");
                            continue;
                        };
                        let submitted = event == ViewEvent::EnterPressed;
                        session.dispatch(event);
                        if submitted && session.controller().has_pending_fallback() {
                            println!("no matches; looking up location...");
                        }
                        render::print_view(&session.snapshot());
                    }
                }
            }
            applied = session.next_completion(), if session.in_flight() > 0 => {
                if applied {
                    render::print_view(&session.snapshot());
                }
            }
        }
    }

    session.shutdown().await;
    Ok(())
}

#[cfg(test)]
#[path = "browse_test.rs"]
mod tests;
