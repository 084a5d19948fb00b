//! geomarket Wizard - Order draft, step derivation and the search/submit workflow
//!
//! The draft is only ever changed through [`store::reduce`]; the wizard step
//! is derived from it on every read.

pub mod draft;
pub mod review;
pub mod search;
pub mod selection;
pub mod step;
pub mod store;
pub mod submit;

pub use draft::{ConfigurationPatch, OrderDraft, SchedulePatch, SearchParamsPatch};
pub use search::{SearchAttempt, SearchKind, SearchSession, SearchStatus};
pub use selection::SceneSelection;
pub use step::WizardStep;
pub use store::{reduce, OrderAction, OrderStore};
pub use submit::{build_order_request, OrderSubmission, SubmissionStatus};
