// src/services/did_wizard.rs
//! Connect, create, view: the flow a user walks through to obtain a DID.
//!
//! The wizard owns no document logic. It only sequences calls to the wallet
//! connector and the document builder and remembers where the user is.

use serde::Serialize;
use thiserror::Error;

use crate::error::ValidationError;
use crate::models::did::DidDocument;
use crate::services::document_builder::{DocumentBuilder, DocumentOptions};
use crate::utils::clock::Clock;
use crate::wallet::connector::WalletAccount;

/// Where the user is in the flow.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Connect,
    Create,
    View,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("cannot {action} while on the {step:?} step")]
    InvalidTransition { step: Step, action: &'static str },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Wizard state for a single user.
#[derive(Debug, Clone)]
pub struct DidWizard {
    step: Step,
    account: Option<WalletAccount>,
    document: Option<DidDocument>,
}

impl Default for DidWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl DidWizard {
    pub fn new() -> Self {
        Self {
            step: Step::Connect,
            account: None,
            document: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn account(&self) -> Option<&WalletAccount> {
        self.account.as_ref()
    }

    pub fn document(&self) -> Option<&DidDocument> {
        self.document.as_ref()
    }

    /// Records the connected account and moves to `Create`.
    pub fn connect(&mut self, account: WalletAccount) -> Result<(), WizardError> {
        self.require_step(Step::Connect, "connect a wallet")?;
        self.account = Some(account);
        self.step = Step::Create;
        Ok(())
    }

    /// Builds a document for the connected account.
    ///
    /// On success the wizard moves to `View`. On failure it stays on `Create`
    /// and the error is returned for the caller to surface.
    pub fn create<C: Clock>(
        &mut self,
        builder: &DocumentBuilder<C>,
        options: &DocumentOptions,
    ) -> Result<&DidDocument, WizardError> {
        self.require_step(Step::Create, "create a document")?;
        let controller = self
            .account
            .as_ref()
            .map(|a| a.address.as_str())
            .unwrap_or_default();

        let document = builder.build(controller, options)?;
        self.step = Step::View;
        Ok(&*self.document.insert(document))
    }

    /// Discards the document and returns to `Create` with the same account.
    pub fn start_over(&mut self) -> Result<(), WizardError> {
        self.require_step(Step::View, "start over")?;
        self.document = None;
        self.step = Step::Create;
        Ok(())
    }

    /// Forgets the account and any document. Valid from every step.
    pub fn disconnect(&mut self) {
        if let Some(account) = self.account.take() {
            log::info!("Wallet disconnected: {}", account.short_address());
        }
        self.document = None;
        self.step = Step::Connect;
    }

    fn require_step(&self, step: Step, action: &'static str) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                step: self.step,
                action,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::clock::FixedClock;
    use crate::wallet::connector::WalletConnector;
    use chrono::{TimeZone, Utc};

    fn builder() -> DocumentBuilder<FixedClock> {
        DocumentBuilder::with_clock(FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()))
    }

    fn account() -> WalletAccount {
        WalletConnector::connect("0x52908400098527886e0f7030069857d2e4169ee7").unwrap()
    }

    #[test]
    fn test_happy_path() {
        let mut wizard = DidWizard::new();
        assert_eq!(wizard.step(), Step::Connect);

        wizard.connect(account()).unwrap();
        assert_eq!(wizard.step(), Step::Create);

        let id = wizard
            .create(&builder(), &DocumentOptions::default())
            .unwrap()
            .id
            .clone();
        assert_eq!(id, "did:eth:0x52908400098527886e0f7030069857d2e4169ee7");
        assert_eq!(wizard.step(), Step::View);
        assert!(wizard.document().is_some());
    }

    #[test]
    fn test_failed_build_stays_on_create() {
        let mut wizard = DidWizard::new();
        wizard.connect(account()).unwrap();

        let options = DocumentOptions::default().with_service_endpoint("not-a-url");
        let err = wizard.create(&builder(), &options).unwrap_err();
        assert!(matches!(err, WizardError::Validation(_)));
        assert_eq!(wizard.step(), Step::Create);
        assert!(wizard.document().is_none());

        wizard.create(&builder(), &DocumentOptions::default()).unwrap();
        assert_eq!(wizard.step(), Step::View);
    }

    #[test]
    fn test_out_of_order_transitions() {
        let mut wizard = DidWizard::new();
        assert_eq!(
            wizard.create(&builder(), &DocumentOptions::default()).unwrap_err(),
            WizardError::InvalidTransition {
                step: Step::Connect,
                action: "create a document",
            }
        );
        assert!(wizard.start_over().is_err());

        wizard.connect(account()).unwrap();
        assert!(wizard.connect(account()).is_err());
    }

    #[test]
    fn test_start_over_and_disconnect() {
        let mut wizard = DidWizard::new();
        wizard.connect(account()).unwrap();
        wizard.create(&builder(), &DocumentOptions::default()).unwrap();

        wizard.start_over().unwrap();
        assert_eq!(wizard.step(), Step::Create);
        assert!(wizard.document().is_none());
        assert!(wizard.account().is_some());

        wizard.disconnect();
        assert_eq!(wizard.step(), Step::Connect);
        assert!(wizard.account().is_none());
    }
}
