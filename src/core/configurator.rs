//! SSID configuration driver
//!
//! Logs in to the controller and replays a fixed command script, waiting for
//! the prompt marker after every line. Commands already sent stay applied when
//! a later step fails.

use std::time::Duration;

use regex::bytes::Regex;
use tracing::{Instrument, debug, info, info_span};

use crate::{
    config::SsidSettings,
    core::{
        error::{ConfigureResult, SessionError},
        types::SsidParams,
    },
    session::{PromptSession, RemoteSession},
};

/// Default command prompt marker
pub const DEFAULT_PROMPT: &str = r"[>#]\s*$";

const PASSWORD_PROMPT: &str = r"(?i)password:\s*$";
const LOGIN_PROMPT: &str = r"(?i)(user\s?name|login):\s*$";
const ACCESS_DENIED: &str =
    r"(?i)(access denied|authentication failed|login incorrect|bad password)";

/// Build the ordered configuration script for `params`
pub fn command_sequence(params: &SsidParams) -> Vec<String> {
    let mut commands = vec![
        "configure terminal".to_string(),
        format!("wlan ssid-profile {}", params.ssid),
        format!("essid {}", params.ssid),
    ];

    if params.hidden {
        commands.push("hide-ssid".to_string());
    }

    commands.extend([
        format!("vlan {}", params.vlan),
        format!("wlan-profile {}", params.wlan_profile),
        "exit".to_string(),
        "exit".to_string(),
        "write memory".to_string(),
    ]);

    commands
}

/// Drives one remote session through login and the configuration script
pub struct SsidConfigurator<'a, S: RemoteSession> {
    session: &'a mut S,
    prompt: Regex,
    password: Regex,
    login: Regex,
    denied: Regex,
    timeout: Duration,
}

impl<'a, S: RemoteSession> SsidConfigurator<'a, S> {
    /// Create a driver that waits up to `timeout` for each prompt
    pub fn new(session: &'a mut S, prompt: Regex, timeout: Duration) -> ConfigureResult<Self> {
        Ok(Self {
            session,
            prompt,
            password: Regex::new(PASSWORD_PROMPT)?,
            login: Regex::new(LOGIN_PROMPT)?,
            denied: Regex::new(ACCESS_DENIED)?,
            timeout,
        })
    }

    /// Authenticate against the password prompt shown after connecting
    ///
    /// A username prompt, if the remote shows one first, is answered with
    /// `params.username`.
    pub async fn login(&mut self, params: &SsidParams) -> ConfigureResult<()> {
        let first = self
            .session
            .expect(&[&self.login, &self.password], self.timeout)
            .await?;

        if first == 0 {
            debug!("Username prompt received");
            self.session.send_line(&params.username).await?;
            self.session.expect(&[&self.password], self.timeout).await?;
        }

        debug!("Password prompt received");
        self.session.send_line(&params.password).await?;

        let outcome = self
            .session
            .expect(&[&self.prompt, &self.password, &self.denied], self.timeout)
            .await?;
        if outcome != 0 {
            return Err(SessionError::AuthFailure(params.host.clone()).into());
        }

        info!("Logged in to {} as {}", params.host, params.username);
        Ok(())
    }

    /// Send one command and wait for the prompt marker
    async fn send_command(&mut self, command: &str) -> ConfigureResult<()> {
        debug!("Sending: {}", command);
        self.session.send_line(command).await?;
        self.session.expect(&[&self.prompt], self.timeout).await?;
        Ok(())
    }

    /// Log in and apply the full SSID configuration script
    pub async fn apply(&mut self, params: &SsidParams) -> ConfigureResult<()> {
        self.login(params).await?;

        for command in command_sequence(params) {
            self.send_command(&command).await?;
        }

        info!(
            "SSID {} configured on {} (vlan {}, profile {})",
            params.ssid, params.host, params.vlan, params.wlan_profile
        );
        Ok(())
    }
}

/// Connect to the controller named in `params` and apply the configuration
pub async fn provision(settings: &SsidSettings, params: &SsidParams) -> ConfigureResult<()> {
    let mut session =
        PromptSession::connect(&params.host, settings.port, settings.timeout).await?;
    let span = info_span!("session", id = %session.id(), host = %params.host);

    async {
        info!("Connected to {}:{}", params.host, settings.port);
        SsidConfigurator::new(&mut session, settings.prompt.clone(), settings.timeout)?
            .apply(params)
            .await
    }
    .instrument(span)
    .await
}
