use std::cell::Cell;

use shared::{ClientTransport, CoachRequest, CoachResponse};

use crate::{
    config::CoachFlowConfig,
    controller::{FlowState, InFlight, Outcome},
    dom::CoachElements,
    endpoints::send_with_fallback,
};

/// Same submit cycle as the symptom flow, rendering a single plan text block.
pub struct CoachController<T> {
    elements: CoachElements,
    transport: T,
    config: CoachFlowConfig,
    state: Cell<FlowState>,
}

impl<T> CoachController<T>
where
    T: ClientTransport,
{
    pub fn new(elements: CoachElements, transport: T, config: CoachFlowConfig) -> Self {
        Self {
            elements,
            transport,
            config,
            state: Cell::new(FlowState::Idle),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state.get()
    }

    pub async fn activate(&self) -> Outcome {
        let raw = self.elements.goals.value();
        self.submit(&raw).await
    }

    pub async fn submit(&self, raw: &str) -> Outcome {
        if self.state.get() == FlowState::Submitting {
            return Outcome::Busy;
        }

        let goals = match raw.trim() {
            "" => self.config.default_goals.as_str(),
            goals => goals,
        };

        let _in_flight = InFlight::begin(
            self.elements.trigger.as_ref(),
            &self.state,
            &self.config.busy_label,
        );
        self.elements.output.set_text("");

        let resp = send_with_fallback::<_, _, CoachResponse, _>(
            &self.transport,
            &self.config.endpoints,
            |_| CoachRequest {
                goals: goals.to_owned(),
            },
        )
        .await;

        let message = match resp {
            Ok(resp) => match resp.plan() {
                Some(plan) => {
                    self.elements.output.set_text(plan);
                    tracing::info!(chars = plan.len(), "rendered coaching plan");
                    return Outcome::Rendered;
                }
                None => {
                    tracing::warn!("coach endpoint reported no plan");
                    self.config.not_ok_message.clone()
                }
            },
            Err(err) => {
                tracing::error!(error = %err, "coaching plan request failed");
                self.config.error_message.clone()
            }
        };

        self.elements.output.set_text(&message);
        Outcome::Failed { message }
    }
}
