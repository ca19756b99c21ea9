//! View state and its pure transitions.

use tracing::{debug, warn};

use jw3t_keyring::SigningIdentity;
use jw3t_token::{to_pretty_json, EncodedToken, TokenContent, TokenHeader, TokenPayload};

use crate::event::{Command, Event};

/// Subject address shown before any account is discovered.
pub const PLACEHOLDER_ADDRESS: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";

/// Pipeline stage the workbench is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Accounts not loaded yet, or account loading failed fatally.
    Init,
    /// Accounts loaded; waiting for a selection or for valid content.
    Ready,
    /// Header and/or payload text does not parse.
    ContentInvalid,
    /// A signing attempt is in flight.
    Signing,
    /// The latest signing attempt failed.
    SignError,
    /// A verification attempt is in flight.
    Verifying,
    /// The latest verification attempt failed.
    VerifyError,
    /// The displayed token verified against the displayed content.
    Valid,
}

/// The complete state behind the page: text fields, accounts, selection,
/// token and per-stage errors.
///
/// All transitions happen in [`ViewState::apply`], which is synchronous and
/// side-effect free apart from logging; asynchronous work is requested via
/// the returned [`Command`].
#[derive(Debug, Clone)]
pub struct ViewState {
    stage: Stage,
    accounts: Vec<SigningIdentity>,
    selected: Option<usize>,
    header_text: String,
    payload_text: String,
    token: Option<EncodedToken>,
    is_valid: bool,
    init_error: Option<String>,
    header_error: Option<String>,
    payload_error: Option<String>,
    sign_error: Option<String>,
    verify_error: Option<String>,
    generation: u64,
}

impl ViewState {
    /// Fresh state with the default editable content.
    #[must_use]
    pub fn new() -> Self {
        let content = TokenContent::with_defaults(PLACEHOLDER_ADDRESS);
        let header_text =
            to_pretty_json(&content.header).unwrap_or_else(|_| String::from("{}"));
        let payload_text =
            to_pretty_json(&content.payload).unwrap_or_else(|_| String::from("{}"));
        Self {
            stage: Stage::Init,
            accounts: Vec::new(),
            selected: None,
            header_text,
            payload_text,
            token: None,
            is_valid: false,
            init_error: None,
            header_error: None,
            payload_error: None,
            sign_error: None,
            verify_error: None,
            generation: 0,
        }
    }

    /// Current pipeline stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Discovered accounts, in selection order.
    #[must_use]
    pub fn accounts(&self) -> &[SigningIdentity] {
        &self.accounts
    }

    /// The selected account, if any.
    #[must_use]
    pub fn selected_account(&self) -> Option<&SigningIdentity> {
        self.selected.and_then(|index| self.accounts.get(index))
    }

    /// Editable header text.
    #[must_use]
    pub fn header_text(&self) -> &str {
        &self.header_text
    }

    /// Editable payload text.
    #[must_use]
    pub fn payload_text(&self) -> &str {
        &self.payload_text
    }

    /// The current encoded token, when one corresponds to current content.
    #[must_use]
    pub fn token(&self) -> Option<&EncodedToken> {
        self.token.as_ref()
    }

    /// Whether the displayed token verified.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Fatal account-loading error, if initialization failed.
    #[must_use]
    pub fn init_error(&self) -> Option<&str> {
        self.init_error.as_deref()
    }

    /// Header parse error for the current text, if any.
    #[must_use]
    pub fn header_error(&self) -> Option<&str> {
        self.header_error.as_deref()
    }

    /// Payload parse error for the current text, if any.
    #[must_use]
    pub fn payload_error(&self) -> Option<&str> {
        self.payload_error.as_deref()
    }

    /// Error from the latest signing attempt, if it failed.
    #[must_use]
    pub fn sign_error(&self) -> Option<&str> {
        self.sign_error.as_deref()
    }

    /// Error from the latest verification attempt, if it failed.
    #[must_use]
    pub fn verify_error(&self) -> Option<&str> {
        self.verify_error.as_deref()
    }

    /// Generation of the latest recompute. In-flight completions tagged
    /// with anything older are discarded on arrival.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply one event, returning the follow-up work to start, if any.
    pub fn apply(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::AccountsLoaded(accounts) => {
                self.accounts = accounts;
                self.init_error = None;
                self.stage = Stage::Ready;
                self.selected = if self.accounts.is_empty() { None } else { Some(0) };
                let address = self
                    .selected_account()
                    .map(|identity| identity.address().to_string());
                if let Some(address) = address {
                    self.rewrite_subject(&address);
                }
                self.recompute()
            }
            Event::InitFailed(message) => {
                self.stage = Stage::Init;
                self.init_error = Some(message);
                None
            }
            Event::AccountSelected(index) => {
                if index >= self.accounts.len() {
                    return None;
                }
                self.selected = Some(index);
                let address = self.accounts[index].address().to_string();
                self.rewrite_subject(&address);
                self.recompute()
            }
            Event::HeaderEdited(text) => {
                self.header_text = text;
                self.recompute()
            }
            Event::PayloadEdited(text) => {
                self.payload_text = text;
                self.recompute()
            }
            Event::SignFinished { generation, result } => {
                if generation != self.generation {
                    warn!(
                        generation,
                        current = self.generation,
                        "discarding stale signing result"
                    );
                    return None;
                }
                match result {
                    Ok(token) => {
                        self.token = Some(token.clone());
                        self.stage = Stage::Verifying;
                        Some(Command::Verify { generation, token })
                    }
                    Err(message) => {
                        self.token = None;
                        self.sign_error = Some(message);
                        self.stage = Stage::SignError;
                        None
                    }
                }
            }
            Event::VerifyFinished { generation, result } => {
                if generation != self.generation {
                    warn!(
                        generation,
                        current = self.generation,
                        "discarding stale verification result"
                    );
                    return None;
                }
                match result {
                    Ok(content) => {
                        self.is_valid = true;
                        self.stage = Stage::Valid;
                        debug!(subject = %content.payload.add, "token verified");
                        None
                    }
                    Err(message) => {
                        self.is_valid = false;
                        self.verify_error = Some(message);
                        self.stage = Stage::VerifyError;
                        None
                    }
                }
            }
        }
    }

    /// Re-run the parse/sign pipeline for the current (identity, header,
    /// payload) tuple.
    ///
    /// Bumps the generation so results of older in-flight attempts are
    /// discarded on arrival, and withholds the previous token so the
    /// display never shows a token that does not correspond to current
    /// content.
    fn recompute(&mut self) -> Option<Command> {
        self.generation += 1;
        self.token = None;
        self.is_valid = false;
        self.header_error = None;
        self.payload_error = None;
        self.sign_error = None;
        self.verify_error = None;

        let header = match TokenHeader::from_json_str(&self.header_text) {
            Ok(header) => Some(header),
            Err(err) => {
                self.header_error = Some(err.to_string());
                None
            }
        };
        let payload = match TokenPayload::from_json_str(&self.payload_text) {
            Ok(payload) => Some(payload),
            Err(err) => {
                self.payload_error = Some(err.to_string());
                None
            }
        };
        let (Some(header), Some(payload)) = (header, payload) else {
            self.stage = Stage::ContentInvalid;
            return None;
        };
        let Some(identity) = self.selected_account().cloned() else {
            self.stage = Stage::Ready;
            return None;
        };

        self.stage = Stage::Signing;
        Some(Command::Sign {
            generation: self.generation,
            content: TokenContent::new(header, payload),
            identity,
        })
    }

    /// Point the payload's `add` claim at `address`, preserving the user's
    /// other edits. Leaves the text untouched when it does not parse.
    fn rewrite_subject(&mut self, address: &str) {
        let Ok(mut value) = serde_json::from_str::<serde_json::Value>(&self.payload_text) else {
            debug!("payload text does not parse, leaving subject address unchanged");
            return;
        };
        let Some(object) = value.as_object_mut() else {
            return;
        };
        object.insert(
            "add".to_string(),
            serde_json::Value::String(address.to_string()),
        );
        if let Ok(text) = to_pretty_json(&value) {
            self.payload_text = text;
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jw3t_keyring::{Algorithm, KeyPair, SigningIdentity};

    fn identity() -> SigningIdentity {
        SigningIdentity::from_pair(None, KeyPair::generate(Algorithm::Sr25519).unwrap())
    }

    fn loaded_state(identity: &SigningIdentity) -> (ViewState, Command) {
        let mut state = ViewState::new();
        let command = state
            .apply(Event::AccountsLoaded(vec![identity.clone()]))
            .expect("valid default content should trigger signing");
        (state, command)
    }

    #[test]
    fn initial_state_has_default_content() {
        let state = ViewState::new();
        assert_eq!(state.stage(), Stage::Init);
        assert!(state.header_text().contains("\"alg\": \"sr25519\""));
        assert!(state.payload_text().contains(PLACEHOLDER_ADDRESS));
        assert!(state.token().is_none());
    }

    #[test]
    fn zero_accounts_is_ready_with_no_errors() {
        let mut state = ViewState::new();
        let command = state.apply(Event::AccountsLoaded(Vec::new()));
        assert!(command.is_none(), "no signing without a selection");
        assert_eq!(state.stage(), Stage::Ready);
        assert!(state.selected_account().is_none());
        assert!(state.header_error().is_none());
        assert!(state.payload_error().is_none());
        assert!(state.sign_error().is_none());
        assert!(state.verify_error().is_none());
    }

    #[test]
    fn loading_accounts_selects_the_first_and_rewrites_the_subject() {
        let identity = identity();
        let (state, command) = loaded_state(&identity);
        assert_eq!(state.stage(), Stage::Signing);
        assert_eq!(
            state.selected_account().map(SigningIdentity::address),
            Some(identity.address())
        );
        assert!(state.payload_text().contains(identity.address()));
        assert!(matches!(command, Command::Sign { generation: 1, .. }));
    }

    #[test]
    fn init_failure_is_fatal_to_the_path() {
        let mut state = ViewState::new();
        let command = state.apply(Event::InitFailed("entropy unavailable".to_string()));
        assert!(command.is_none());
        assert_eq!(state.stage(), Stage::Init);
        assert_eq!(state.init_error(), Some("entropy unavailable"));
    }

    #[test]
    fn invalid_header_blocks_signing_with_one_error() {
        let identity = identity();
        let (mut state, _) = loaded_state(&identity);

        let command = state.apply(Event::HeaderEdited("{".to_string()));
        assert!(command.is_none());
        assert_eq!(state.stage(), Stage::ContentInvalid);
        assert!(state.header_error().is_some());
        assert!(state.payload_error().is_none());
        assert!(state.token().is_none());
    }

    #[test]
    fn invalid_payload_blocks_signing_with_one_error() {
        let identity = identity();
        let (mut state, _) = loaded_state(&identity);

        let command = state.apply(Event::PayloadEdited("not json".to_string()));
        assert!(command.is_none());
        assert_eq!(state.stage(), Stage::ContentInvalid);
        assert!(state.payload_error().is_some());
        assert!(state.header_error().is_none());
    }

    #[test]
    fn both_fields_invalid_reports_both_errors() {
        let identity = identity();
        let (mut state, _) = loaded_state(&identity);

        state.apply(Event::HeaderEdited("{".to_string()));
        let command = state.apply(Event::PayloadEdited("}".to_string()));
        assert!(command.is_none());
        assert!(state.header_error().is_some());
        assert!(state.payload_error().is_some());
    }

    #[test]
    fn successful_sign_triggers_verification() {
        let identity = identity();
        let (mut state, _) = loaded_state(&identity);
        let generation = state.generation();

        let token = EncodedToken::from("content.signature".to_string());
        let command = state.apply(Event::SignFinished {
            generation,
            result: Ok(token.clone()),
        });
        assert_eq!(state.stage(), Stage::Verifying);
        assert_eq!(state.token(), Some(&token));
        assert!(matches!(command, Some(Command::Verify { .. })));
    }

    #[test]
    fn sign_failure_clears_the_token() {
        let identity = identity();
        let (mut state, _) = loaded_state(&identity);
        let generation = state.generation();

        let command = state.apply(Event::SignFinished {
            generation,
            result: Err("capability refused".to_string()),
        });
        assert!(command.is_none());
        assert_eq!(state.stage(), Stage::SignError);
        assert!(state.token().is_none());
        assert_eq!(state.sign_error(), Some("capability refused"));
    }

    #[test]
    fn verification_outcome_settles_the_state() {
        let identity = identity();
        let (mut state, _) = loaded_state(&identity);
        let generation = state.generation();

        let token = EncodedToken::from("content.signature".to_string());
        state.apply(Event::SignFinished {
            generation,
            result: Ok(token),
        });
        state.apply(Event::VerifyFinished {
            generation,
            result: Err("signature mismatch".to_string()),
        });
        assert_eq!(state.stage(), Stage::VerifyError);
        assert!(!state.is_valid());
        assert_eq!(state.verify_error(), Some("signature mismatch"));
    }

    #[test]
    fn stale_sign_result_is_discarded() {
        let identity = identity();
        let (mut state, _) = loaded_state(&identity);
        let stale = state.generation();

        // A newer edit bumps the generation while the first sign is in flight.
        let command = state.apply(Event::HeaderEdited(state.header_text().to_string()));
        assert!(matches!(command, Some(Command::Sign { .. })));
        let current = state.generation();
        assert!(current > stale);

        let leftover = state.apply(Event::SignFinished {
            generation: stale,
            result: Ok(EncodedToken::from("old.token".to_string())),
        });
        assert!(leftover.is_none());
        assert!(state.token().is_none(), "stale token must not be displayed");
        assert_eq!(state.stage(), Stage::Signing);

        // The current generation's result still lands.
        let fresh = EncodedToken::from("new.token".to_string());
        state.apply(Event::SignFinished {
            generation: current,
            result: Ok(fresh.clone()),
        });
        assert_eq!(state.token(), Some(&fresh));
    }

    #[test]
    fn stale_verify_result_is_discarded() {
        let identity = identity();
        let (mut state, _) = loaded_state(&identity);
        let generation = state.generation();

        state.apply(Event::SignFinished {
            generation,
            result: Ok(EncodedToken::from("content.signature".to_string())),
        });
        state.apply(Event::PayloadEdited(state.payload_text().to_string()));

        // The verification of the superseded token completes late.
        state.apply(Event::VerifyFinished {
            generation,
            result: Ok(TokenContent::with_defaults(identity.address())),
        });
        assert!(!state.is_valid());
        assert_eq!(state.stage(), Stage::Signing);
    }

    #[test]
    fn selecting_an_account_restarts_the_cycle() {
        let first = identity();
        let second = identity();
        let mut state = ViewState::new();
        state.apply(Event::AccountsLoaded(vec![first, second.clone()]));

        let command = state.apply(Event::AccountSelected(1));
        assert!(state.payload_text().contains(second.address()));
        assert!(matches!(
            command,
            Some(Command::Sign { identity, .. }) if identity.address() == second.address()
        ));
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let identity = identity();
        let (mut state, _) = loaded_state(&identity);
        let generation = state.generation();

        let command = state.apply(Event::AccountSelected(7));
        assert!(command.is_none());
        assert_eq!(state.generation(), generation);
    }

    #[test]
    fn subject_rewrite_leaves_unparseable_payload_alone() {
        let identity = identity();
        let mut state = ViewState::new();
        state.apply(Event::PayloadEdited("not json".to_string()));
        state.apply(Event::AccountsLoaded(vec![identity]));
        assert_eq!(state.payload_text(), "not json");
        assert_eq!(state.stage(), Stage::ContentInvalid);
    }
}
