//! Host implementation for running from a terminal or a media-center hook.
//!
//! Notifications go to stderr. The view refresh runs a user-supplied
//! command, e.g. `kodi-send --action=Container.Refresh`.

use std::process::Command;

use super::{Notifier, Severity, UiRefresher};

/// Writes notifications to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str, severity: Severity) {
        eprintln!("[{}] {}: {}", severity.label(), title, message);
    }
}

/// Runs a command to make the host reload its current view.
pub struct CommandRefresher {
    command: Option<String>,
}

impl CommandRefresher {
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
        }
    }
}

impl UiRefresher for CommandRefresher {
    fn refresh_view(&self) {
        let Some(ref command) = self.command else {
            log::info!("No refresh command configured, skipping view refresh");
            return;
        };

        let Some((program, args)) = split_command(command) else {
            log::warn!("Unbalanced quotes in view refresh command, not running it");
            return;
        };

        match Command::new(&program).args(&args).status() {
            Ok(status) if status.success() => log::info!("View refresh command completed"),
            Ok(status) => log::warn!("View refresh command exited with {}", status),
            Err(e) => log::warn!("Failed to run view refresh command '{}': {}", program, e),
        }
    }
}

/// Split a command line into program and arguments.
///
/// Words are separated by whitespace. Single quotes keep text literally;
/// double quotes group words and honor `\"` and `\\`. No variable or glob
/// expansion is done. Returns `None` for an empty line or an unclosed quote.
fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '\'' => break,
                        c => word.push(c),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '"' => break,
                        '\\' => match chars.next()? {
                            c @ ('"' | '\\') => word.push(c),
                            c => {
                                word.push('\\');
                                word.push(c);
                            }
                        },
                        c => word.push(c),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                word.push(c);
            }
        }
    }
    if in_word {
        words.push(word);
    }

    let mut words = words.into_iter();
    let program = words.next()?;
    Some((program, words.collect()))
}
