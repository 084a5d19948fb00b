//! Order submission.

use geomarket_core::error::{MarketError, Result};
use geomarket_core::models::{OrderRequest, OrderResponse};
use geomarket_core::ports::OrderDesk;
use tracing::{debug, info, warn};

use crate::draft::OrderDraft;
use crate::step::WizardStep;

/// Build the submission body for a draft that has reached review.
///
/// "Any available" orders carry no product type or tier.
pub fn build_order_request(draft: &OrderDraft) -> Result<OrderRequest> {
    let step = draft.step();
    if step < WizardStep::Review {
        return Err(MarketError::OrderIncomplete { step: step.number() });
    }
    let family = draft.family().ok_or(MarketError::SelectionMissing { what: "product family" })?;

    let (product_type_id, tier_id) = if draft.any_available() {
        (None, None)
    } else {
        (draft.product_type().map(|t| t.id.clone()), draft.tier().map(|t| t.id.clone()))
    };

    Ok(OrderRequest {
        family_id: family.id.clone(),
        product_type_id,
        tier_id,
        configuration: draft.configuration().clone(),
        schedule: draft.schedule().clone(),
        selected_scene_ids: draft.selected_scenes().ids(),
    })
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Failed { reason: String },
    Submitted { order_id: String },
}

/// Sends a draft to an [`OrderDesk`] as a single request.
///
/// The draft is only borrowed; a failed submission leaves it untouched and
/// the request can be resent with [`OrderSubmission::retry`].
pub struct OrderSubmission<D: OrderDesk> {
    desk: D,
    status: SubmissionStatus,
    last_request: Option<OrderRequest>,
}

impl<D: OrderDesk> OrderSubmission<D> {
    pub fn new(desk: D) -> Self {
        Self { desk, status: SubmissionStatus::Idle, last_request: None }
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub async fn submit(&mut self, draft: &OrderDraft) -> Result<OrderResponse> {
        let request = build_order_request(draft)?;
        self.send(request).await
    }

    /// Resend the last request after a failure
    pub async fn retry(&mut self) -> Result<OrderResponse> {
        if !matches!(self.status, SubmissionStatus::Failed { .. }) {
            return Err(MarketError::NothingToRetry);
        }
        let request = self.last_request.clone().ok_or(MarketError::NothingToRetry)?;
        self.send(request).await
    }

    async fn send(&mut self, request: OrderRequest) -> Result<OrderResponse> {
        self.status = SubmissionStatus::Submitting;
        self.last_request = Some(request.clone());
        debug!(scenes = request.selected_scene_ids.len(), family = %request.family_id, "Submitting order");

        match self.desk.create_order(&request).await {
            Ok(response) => {
                info!(order_id = %response.order_id, status = %response.status, "Order submitted");
                self.status = SubmissionStatus::Submitted { order_id: response.order_id.clone() };
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, "Order submission failed");
                self.status = SubmissionStatus::Failed { reason: e.to_string() };
                Err(e)
            }
        }
    }
}
