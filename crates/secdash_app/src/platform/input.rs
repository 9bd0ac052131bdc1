use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use secdash_core::{
    Effect, IngestMode, Msg, Tab, HISTORY_LIMIT, RECENT_FILINGS_DAYS, RECENT_FILINGS_LIMIT,
};

use super::effects::EffectRunner;
use super::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Core(Msg),
    Reload,
    Health,
    Lookup(String),
    Help,
    Quit,
}

/// Parses one console line into a command.
pub fn parse_line(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(Command::Core(Msg::NoOp));
    };
    match word {
        "refresh" => {
            let mode = match parts.next() {
                None | Some("latest") => IngestMode::Latest,
                Some("today") => IngestMode::Today,
                Some(other) => return Err(format!("unknown refresh mode '{other}'")),
            };
            let symbols = parts
                .flat_map(|token| token.split(','))
                .map(str::to_string)
                .collect();
            Ok(Command::Core(Msg::RefreshRequested { mode, symbols }))
        }
        "tab" => {
            let tab = match parts.next() {
                Some("overview") => Tab::Overview,
                Some("progress") => Tab::Progress,
                Some("filings") => Tab::RecentFilings,
                Some("history") => Tab::History,
                Some(other) => return Err(format!("unknown tab '{other}'")),
                None => return Err("usage: tab overview|progress|filings|history".to_string()),
            };
            Ok(Command::Core(Msg::TabSelected { tab }))
        }
        "filter" => match parts.next() {
            Some(form) => Ok(Command::Core(Msg::FilterToggled {
                form: form.to_ascii_uppercase(),
            })),
            None => Err("usage: filter <form-type>".to_string()),
        },
        "page" => match parts.next().map(str::parse::<usize>) {
            Some(Ok(page)) => Ok(Command::Core(Msg::PageSelected { page })),
            _ => Err("usage: page <number>".to_string()),
        },
        "reload" => Ok(Command::Reload),
        "health" => Ok(Command::Health),
        "stats" => match parts.next() {
            Some(symbol) => Ok(Command::Lookup(symbol.to_string())),
            None => Err("usage: stats <symbol>".to_string()),
        },
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

/// Reads console lines until EOF or `quit`, translating them into messages
/// and direct effect submissions.
pub fn spawn_reader(msg_tx: mpsc::Sender<Msg>, runner: EffectRunner, quit: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Ok(Command::Core(msg)) => {
                    if msg_tx.send(msg).is_err() {
                        return;
                    }
                }
                Ok(Command::Reload) => runner.run(vec![
                    Effect::LoadRecentFilings {
                        days: RECENT_FILINGS_DAYS,
                        limit: RECENT_FILINGS_LIMIT,
                    },
                    Effect::LoadHistory { limit: HISTORY_LIMIT },
                ]),
                Ok(Command::Health) => runner.run(vec![Effect::CheckHealth]),
                Ok(Command::Lookup(symbol)) => runner.lookup(symbol),
                Ok(Command::Help) => render::print_help(),
                Ok(Command::Quit) => break,
                Err(message) => println!("? {message}"),
            }
        }
        quit.store(true, Ordering::SeqCst);
        // Wake the dispatch loop so it notices the quit flag.
        let _ = msg_tx.send(Msg::NoOp);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_defaults_to_latest_with_no_symbols() {
        assert_eq!(
            parse_line("refresh"),
            Ok(Command::Core(Msg::RefreshRequested {
                mode: IngestMode::Latest,
                symbols: Vec::new(),
            }))
        );
    }

    #[test]
    fn refresh_splits_symbols_on_commas_and_spaces() {
        assert_eq!(
            parse_line("refresh today aapl,nvda msft"),
            Ok(Command::Core(Msg::RefreshRequested {
                mode: IngestMode::Today,
                symbols: vec!["aapl".to_string(), "nvda".to_string(), "msft".to_string()],
            }))
        );
    }

    #[test]
    fn refresh_rejects_unknown_modes() {
        assert!(parse_line("refresh yesterday").is_err());
    }

    #[test]
    fn tab_names_map_to_tabs() {
        assert_eq!(
            parse_line("tab filings"),
            Ok(Command::Core(Msg::TabSelected {
                tab: Tab::RecentFilings,
            }))
        );
        assert!(parse_line("tab nowhere").is_err());
        assert!(parse_line("tab").is_err());
    }

    #[test]
    fn filter_uppercases_the_form_code() {
        assert_eq!(
            parse_line("filter 10-k"),
            Ok(Command::Core(Msg::FilterToggled {
                form: "10-K".to_string(),
            }))
        );
    }

    #[test]
    fn page_requires_a_number() {
        assert_eq!(
            parse_line("page 3"),
            Ok(Command::Core(Msg::PageSelected { page: 3 }))
        );
        assert!(parse_line("page three").is_err());
        assert!(parse_line("page").is_err());
    }

    #[test]
    fn blank_lines_are_noops_and_unknown_words_are_errors() {
        assert_eq!(parse_line("   "), Ok(Command::Core(Msg::NoOp)));
        assert!(parse_line("frobnicate").is_err());
    }

    #[test]
    fn quit_and_exit_both_stop_the_reader() {
        assert_eq!(parse_line("quit"), Ok(Command::Quit));
        assert_eq!(parse_line("exit"), Ok(Command::Quit));
    }
}
