//! Five-step listing creation/edit wizard.
//!
//! Steps advance only when their required fields are filled. Leaving the
//! price step flushes the draft to the server; media stay local until the
//! final submission attaches them.
mod msg;
mod state;
mod update;

pub use msg::{DraftField, WizardEffect, WizardMsg};
pub use state::{
    missing_fields, InFlight, RequiredField, WizardMode, WizardOutcome, WizardState, WizardStep,
    WizardViewModel,
};
pub use update::update;
