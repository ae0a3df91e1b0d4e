use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, ProgressMode};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    /// Draw spinners on stderr.
    pub progress: bool,
    /// Print the fixed progress lines on stdout.
    pub announce: bool,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let is_tty = std::io::stderr().is_terminal();

    let progress = match flags.progress {
        ProgressMode::On => !flags.quiet,
        ProgressMode::Off => false,
        ProgressMode::Auto => is_tty && !flags.quiet,
    };

    let _ = UI_PREFS.set(UiPrefs {
        progress,
        announce: !flags.quiet,
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        progress: false,
        announce: false,
    })
}

/// Print one progress line to stdout unless output is suppressed.
pub fn announce(line: &str) {
    if prefs().announce {
        println!("{line}");
    }
}
