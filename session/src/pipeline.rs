//! The asynchronous pipeline driving the view state.

use tokio::sync::mpsc;

use jw3t_keyring::AccountProvider;
use jw3t_token::{TokenSigner, TokenVerifier};

use crate::event::{Command, Event};
use crate::state::{Stage, ViewState};

/// Drives the token workbench: applies events to the view state and runs
/// the asynchronous work transitions request.
///
/// Requires a tokio runtime; sign and verify work is spawned, and its
/// completions are fed back as generation-tagged events.
pub struct Workbench {
    state: ViewState,
    verifier: TokenVerifier,
    events: mpsc::UnboundedSender<Event>,
    completions: mpsc::UnboundedReceiver<Event>,
}

impl Workbench {
    /// Workbench with default verification options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_verifier(TokenVerifier::new())
    }

    /// Workbench with a custom verifier.
    #[must_use]
    pub fn with_verifier(verifier: TokenVerifier) -> Self {
        let (events, completions) = mpsc::unbounded_channel();
        Self {
            state: ViewState::new(),
            verifier,
            events,
            completions,
        }
    }

    /// Current view state.
    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Load accounts from `provider` and select the first one, if any.
    ///
    /// An empty account list leaves the selection unset; initialization
    /// failure is fatal to this path and recorded on the state.
    pub async fn load_accounts(&mut self, provider: &AccountProvider) {
        match provider.load_accounts().await {
            Ok(accounts) => self.dispatch(Event::AccountsLoaded(accounts)),
            Err(err) => self.dispatch(Event::InitFailed(err.to_string())),
        }
    }

    /// The user edited the header text.
    pub fn edit_header(&mut self, text: impl Into<String>) {
        self.dispatch(Event::HeaderEdited(text.into()));
    }

    /// The user edited the payload text.
    pub fn edit_payload(&mut self, text: impl Into<String>) {
        self.dispatch(Event::PayloadEdited(text.into()));
    }

    /// The user picked an account by index.
    pub fn select_account(&mut self, index: usize) {
        self.dispatch(Event::AccountSelected(index));
    }

    /// Apply an event and start whatever follow-up work it requests.
    pub fn dispatch(&mut self, event: Event) {
        if let Some(command) = self.state.apply(event) {
            self.run(command);
        }
    }

    /// Wait until no sign/verify work is in flight for the current input.
    pub async fn settle(&mut self) {
        while matches!(self.state.stage(), Stage::Signing | Stage::Verifying) {
            let Some(event) = self.completions.recv().await else {
                break;
            };
            self.dispatch(event);
        }
    }

    fn run(&self, command: Command) {
        let events = self.events.clone();
        match command {
            Command::Sign {
                generation,
                content,
                identity,
            } => {
                tokio::spawn(async move {
                    let result = TokenSigner::new(&identity)
                        .sign(&content)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = events.send(Event::SignFinished { generation, result });
                });
            }
            Command::Verify { generation, token } => {
                let verifier = self.verifier.clone();
                tokio::spawn(async move {
                    let result = verifier
                        .verify(token.as_str())
                        .await
                        .map_err(|e| e.to_string());
                    let _ = events.send(Event::VerifyFinished { generation, result });
                });
            }
        }
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}
