//! Workbench events and the commands transitions request.

use jw3t_keyring::SigningIdentity;
use jw3t_token::{EncodedToken, TokenContent};

/// Everything that can change the view state.
#[derive(Debug, Clone)]
pub enum Event {
    /// Account loading finished.
    AccountsLoaded(Vec<SigningIdentity>),
    /// Account loading failed fatally (signing subsystem unavailable).
    InitFailed(String),
    /// The user picked an account by index.
    AccountSelected(usize),
    /// The user edited the header text.
    HeaderEdited(String),
    /// The user edited the payload text.
    PayloadEdited(String),
    /// A signing task finished.
    SignFinished {
        /// Generation the task was started under.
        generation: u64,
        /// The encoded token, or the signing error message.
        result: Result<EncodedToken, String>,
    },
    /// A verification task finished.
    VerifyFinished {
        /// Generation the task was started under.
        generation: u64,
        /// The verified content, or the verification error message.
        result: Result<TokenContent, String>,
    },
}

/// Asynchronous work a transition asks the driver to start.
#[derive(Debug, Clone)]
pub enum Command {
    /// Sign `content` with `identity`, reporting back under `generation`.
    Sign {
        /// Generation to tag the completion with.
        generation: u64,
        /// Content to sign.
        content: TokenContent,
        /// Account doing the signing.
        identity: SigningIdentity,
    },
    /// Verify `token`, reporting back under `generation`.
    Verify {
        /// Generation to tag the completion with.
        generation: u64,
        /// Token to verify.
        token: EncodedToken,
    },
}
