//! SSID parameter acquisition from flags or interactive prompts

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};
use tracing::debug;

use crate::{
    config::SsidSettings,
    core::{
        error::{ConfigureError, ConfigureResult},
        types::SsidParams,
    },
};

/// Source of interactive answers
pub trait Prompter {
    /// Ask for a value that is echoed while typed
    fn read_line(&mut self, label: &str) -> ConfigureResult<String>;

    /// Ask for a value that is not echoed
    fn read_secret(&mut self, label: &str) -> ConfigureResult<String>;
}

/// Produce a complete parameter record
///
/// Flags are used as-is when every required one is present and interactive
/// mode is off. Otherwise every field is asked for in turn.
pub fn acquire<P: Prompter>(settings: &SsidSettings, prompter: &mut P) -> ConfigureResult<SsidParams> {
    if !settings.interactive {
        if let Some(params) = settings.complete_params() {
            return Ok(params);
        }
        debug!("Required flags missing, switching to interactive mode");
    }

    prompt_all(prompter)
}

fn prompt_all<P: Prompter>(prompter: &mut P) -> ConfigureResult<SsidParams> {
    let host = prompter.read_line("Controller host: ")?;
    let username = prompter.read_line("Username: ")?;
    let password = prompter.read_secret("Password: ")?;
    let ssid = prompter.read_line("SSID name: ")?;

    let vlan_answer = prompter.read_line("VLAN ID: ")?;
    let vlan = vlan_answer
        .trim()
        .parse::<i64>()
        .map_err(|_| ConfigureError::InvalidInput {
            field: "vlan",
            value: vlan_answer.clone(),
        })?;

    let wlan_profile = prompter.read_line("WLAN profile: ")?;
    let hidden = parse_yes(&prompter.read_line("Hide SSID? (y/N): ")?);

    Ok(SsidParams {
        host,
        username,
        password,
        ssid,
        vlan,
        wlan_profile,
        hidden,
    })
}

/// An answer means yes only if it starts with `y`, in either case
fn parse_yes(answer: &str) -> bool {
    answer.starts_with(['y', 'Y'])
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// What a key press does to the line being entered in raw mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Submit,
    Cancel,
    Insert(char),
    Erase,
    Ignore,
}

/// Map a key press to its edit, given whether the line is still empty
///
/// Ctrl-C always cancels. Ctrl-D cancels only on an empty line. Tab is kept
/// as a literal character so pasted values survive verbatim.
fn key_action(code: KeyCode, modifiers: KeyModifiers, empty: bool) -> KeyAction {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Char('c') if ctrl => KeyAction::Cancel,
        KeyCode::Char('d') if ctrl && empty => KeyAction::Cancel,
        KeyCode::Char(c) => KeyAction::Insert(c),
        KeyCode::Tab => KeyAction::Insert('\t'),
        KeyCode::Backspace => KeyAction::Erase,
        _ => KeyAction::Ignore,
    }
}

/// Restores cooked mode when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Prompter reading from the controlling terminal
///
/// On a TTY input is read key by key in raw mode so secrets are never
/// echoed and Ctrl-C cancels cleanly. Piped input is read line by line.
#[derive(Debug)]
pub struct TerminalPrompter {
    tty: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            tty: io::stdin().is_terminal(),
        }
    }

    fn read_piped(&self, label: &str) -> ConfigureResult<String> {
        let mut out = io::stdout();
        write!(out, "{}", label)?;
        out.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(ConfigureError::Cancelled);
        }
        Ok(strip_line_ending(line))
    }

    fn read_raw(&self, label: &str, echo: bool) -> ConfigureResult<String> {
        let mut out = io::stdout();
        write!(out, "{}", label)?;
        out.flush()?;

        let _raw = RawModeGuard::enable()?;
        let mut value = String::new();

        loop {
            let Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) = event::read()?
            else {
                continue;
            };
            if kind == KeyEventKind::Release {
                continue;
            }

            match key_action(code, modifiers, value.is_empty()) {
                KeyAction::Submit => break,
                KeyAction::Cancel => {
                    write!(out, "\r\n")?;
                    return Err(ConfigureError::Cancelled);
                }
                KeyAction::Insert(c) => {
                    value.push(c);
                    if echo {
                        write!(out, "{}", c)?;
                        out.flush()?;
                    }
                }
                KeyAction::Erase => {
                    if value.pop().is_some() && echo {
                        write!(out, "\x08 \x08")?;
                        out.flush()?;
                    }
                }
                KeyAction::Ignore => {}
            }
        }

        write!(out, "\r\n")?;
        out.flush()?;
        Ok(value)
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, label: &str) -> ConfigureResult<String> {
        if self.tty {
            self.read_raw(label, true)
        } else {
            self.read_piped(label)
        }
    }

    fn read_secret(&mut self, label: &str) -> ConfigureResult<String> {
        if self.tty {
            self.read_raw(label, false)
        } else {
            self.read_piped(label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SsidArgs, SsidSettings};
    use clap::Parser;
    use std::collections::VecDeque;

    /// Replays canned answers and records which labels were asked as secrets
    #[derive(Default)]
    struct ScriptedPrompter {
        answers: VecDeque<String>,
        asked: Vec<(String, bool)>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                asked: Vec::new(),
            }
        }

        fn next(&mut self, label: &str, secret: bool) -> ConfigureResult<String> {
            self.asked.push((label.to_string(), secret));
            self.answers.pop_front().ok_or(ConfigureError::Cancelled)
        }
    }

    impl Prompter for ScriptedPrompter {
        fn read_line(&mut self, label: &str) -> ConfigureResult<String> {
            self.next(label, false)
        }

        fn read_secret(&mut self, label: &str) -> ConfigureResult<String> {
            self.next(label, true)
        }
    }

    fn settings(args: &[&str]) -> SsidSettings {
        let argv = std::iter::once("ssid-config").chain(args.iter().copied());
        SsidSettings::try_from(SsidArgs::parse_from(argv)).unwrap()
    }

    const FULL_FLAGS: &[&str] = &[
        "--host",
        "10.0.0.1",
        "--username",
        "admin",
        "--password",
        "secret",
        "--ssid",
        "Guest",
        "--vlan",
        "42",
        "--wlan-profile",
        "guest-vap",
    ];

    #[test]
    fn test_complete_flags_skip_prompts() {
        let mut prompter = ScriptedPrompter::new(&[]);
        let params = acquire(&settings(FULL_FLAGS), &mut prompter).unwrap();

        assert!(prompter.asked.is_empty());
        assert_eq!(params.host, "10.0.0.1");
        assert_eq!(params.vlan, 42);
        assert!(!params.hidden);
    }

    #[test]
    fn test_missing_flag_prompts_for_everything() {
        let mut prompter = ScriptedPrompter::new(&[
            "ctrl.lab", "ops", "pw", "Lab", "7", "lab-vap", "n",
        ]);
        let params = acquire(&settings(&FULL_FLAGS[..10]), &mut prompter).unwrap();

        assert_eq!(prompter.asked.len(), 7);
        assert_eq!(params.host, "ctrl.lab");
        assert_eq!(params.wlan_profile, "lab-vap");
    }

    #[test]
    fn test_interactive_flag_forces_prompts() {
        let mut args = FULL_FLAGS.to_vec();
        args.push("--interactive");

        let mut prompter = ScriptedPrompter::new(&[
            "ctrl.lab", "ops", "pw", "Lab", "7", "lab-vap", "y",
        ]);
        let params = acquire(&settings(&args), &mut prompter).unwrap();

        assert_eq!(params.host, "ctrl.lab");
        assert!(params.hidden);
    }

    #[test]
    fn test_only_password_is_masked() {
        let mut prompter = ScriptedPrompter::new(&["h", "u", "p", "s", "1", "w", ""]);
        prompt_all(&mut prompter).unwrap();

        let secrets: Vec<&str> = prompter
            .asked
            .iter()
            .filter(|(_, secret)| *secret)
            .map(|(label, _)| label.as_str())
            .collect();
        assert_eq!(secrets, ["Password: "]);
    }

    #[test]
    fn test_answers_kept_verbatim() {
        let mut prompter = ScriptedPrompter::new(&[
            " Ctrl.Lab ",
            "Admin ",
            " P a s s ",
            "  Guest Net  ",
            " 12 ",
            "VAP-Guest ",
            "no",
        ]);
        let params = prompt_all(&mut prompter).unwrap();

        assert_eq!(params.host, " Ctrl.Lab ");
        assert_eq!(params.username, "Admin ");
        assert_eq!(params.password, " P a s s ");
        assert_eq!(params.ssid, "  Guest Net  ");
        assert_eq!(params.vlan, 12);
        assert_eq!(params.wlan_profile, "VAP-Guest ");
    }

    #[test]
    fn test_invalid_vlan_is_rejected() {
        let mut prompter = ScriptedPrompter::new(&["h", "u", "p", "s", "ten", "w", "n"]);
        let err = prompt_all(&mut prompter).unwrap_err();

        assert!(matches!(
            err,
            ConfigureError::InvalidInput { field: "vlan", ref value } if value == "ten"
        ));
    }

    #[test]
    fn test_hidden_answer_parsing() {
        assert!(parse_yes("y"));
        assert!(parse_yes("Y"));
        assert!(parse_yes("yes"));
        assert!(parse_yes("YEP"));
        assert!(!parse_yes("n"));
        assert!(!parse_yes(""));
        assert!(!parse_yes(" y"));
        assert!(!parse_yes("okay"));
    }

    #[test]
    fn test_tab_is_inserted_literally() {
        assert_eq!(
            key_action(KeyCode::Tab, KeyModifiers::NONE, false),
            KeyAction::Insert('\t')
        );
        assert_eq!(
            key_action(KeyCode::Tab, KeyModifiers::NONE, true),
            KeyAction::Insert('\t')
        );
    }

    #[test]
    fn test_key_actions() {
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        assert_eq!(key_action(KeyCode::Enter, none, true), KeyAction::Submit);
        assert_eq!(key_action(KeyCode::Char('c'), ctrl, false), KeyAction::Cancel);
        assert_eq!(key_action(KeyCode::Char('d'), ctrl, true), KeyAction::Cancel);
        assert_eq!(key_action(KeyCode::Char('d'), ctrl, false), KeyAction::Insert('d'));
        assert_eq!(key_action(KeyCode::Char('G'), none, true), KeyAction::Insert('G'));
        assert_eq!(key_action(KeyCode::Backspace, none, false), KeyAction::Erase);
        assert_eq!(key_action(KeyCode::Left, none, false), KeyAction::Ignore);
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("abc\n".into()), "abc");
        assert_eq!(strip_line_ending("abc\r\n".into()), "abc");
        assert_eq!(strip_line_ending(" abc ".into()), " abc ");
    }
}
