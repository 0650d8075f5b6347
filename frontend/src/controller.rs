use std::cell::Cell;

use shared::{AssistantResponse, ClientError, ClientTransport, SymptomRequest, BADGE_FOREGROUND};

use crate::{
    config::SymptomFlowConfig,
    dom::{SymptomElements, Trigger},
    endpoints::send_with_fallback,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to send; the input was blank.
    EmptyInput,
    /// A submission from this controller is still in flight.
    Busy,
    Rendered,
    Failed { message: String },
}

/// Holds the trigger disabled for the lifetime of one submission and puts it
/// back when dropped, whichever way the submission ends.
pub(crate) struct InFlight<'a> {
    trigger: &'a dyn Trigger,
    state: &'a Cell<FlowState>,
    idle_label: String,
}

impl<'a> InFlight<'a> {
    pub(crate) fn begin(trigger: &'a dyn Trigger, state: &'a Cell<FlowState>, busy_label: &str) -> Self {
        let idle_label = trigger.label();

        state.set(FlowState::Submitting);
        trigger.set_disabled(true);
        trigger.set_label(busy_label);

        Self {
            trigger,
            state,
            idle_label,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.trigger.set_disabled(false);
        self.trigger.set_label(&self.idle_label);
        self.state.set(FlowState::Idle);
    }
}

pub struct SymptomController<T> {
    elements: SymptomElements,
    transport: T,
    config: SymptomFlowConfig,
    state: Cell<FlowState>,
}

impl<T> SymptomController<T>
where
    T: ClientTransport,
{
    pub fn new(elements: SymptomElements, transport: T, config: SymptomFlowConfig) -> Self {
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

    /// Submit whatever is currently in the bound textarea.
    pub async fn activate(&self) -> Outcome {
        let raw = self.elements.input.value();
        self.submit(&raw).await
    }

    pub async fn submit(&self, raw: &str) -> Outcome {
        if self.state.get() == FlowState::Submitting {
            tracing::debug!("symptom submission already in flight");
            return Outcome::Busy;
        }

        let symptoms = raw.trim();
        if symptoms.is_empty() {
            self.elements.input.focus();
            return Outcome::EmptyInput;
        }

        let query = self
            .elements
            .query
            .as_ref()
            .map(|input| input.value().trim().to_owned())
            .unwrap_or_default();

        let _in_flight = InFlight::begin(
            self.elements.trigger.as_ref(),
            &self.state,
            &self.config.busy_label,
        );
        self.elements.result.hide();

        tracing::debug!(chars = symptoms.len(), "submitting symptoms");

        let resp = send_with_fallback(&self.transport, &self.config.endpoints, |endpoint| {
            SymptomRequest {
                symptoms: symptoms.to_owned(),
                query: endpoint.with_query.then(|| query.clone()),
            }
        })
        .await;

        match resp {
            Ok(resp) => {
                self.render(&resp);
                Outcome::Rendered
            }
            Err(err) => self.fail(&err),
        }
    }

    fn render(&self, resp: &AssistantResponse) {
        let el = &self.elements;

        el.result.clear_error();
        el.result.show();

        el.advice.clear();
        el.lifestyle.clear();
        for item in resp.advice() {
            el.advice.push(item);
        }
        for item in resp.lifestyle() {
            el.lifestyle.push(item);
        }

        let urgency = resp.urgency();
        let badge_text = if self.config.uppercase_badge {
            urgency.as_str().to_ascii_uppercase()
        } else {
            urgency.as_str().to_owned()
        };
        el.badge.set_text(&badge_text);
        el.badge
            .set_colors(urgency.badge_background(), BADGE_FOREGROUND);

        el.specialty
            .set_text(resp.specialty_or(&self.config.specialty_fallback));
        el.disclaimer
            .set_text(resp.disclaimer_or(&self.config.disclaimer_fallback));

        if let Some(block) = &el.doctor_search {
            match resp.doctor_search_link() {
                Some(href) => block.show(href),
                None => block.hide(),
            }
        }

        tracing::info!(
            urgency = urgency.as_str(),
            advice = resp.advice().len(),
            lifestyle = resp.lifestyle().len(),
            "rendered guidance"
        );
    }

    fn fail(&self, err: &ClientError<T::Error>) -> Outcome {
        tracing::error!(error = %err, "symptom submission failed");

        let message = match &self.config.failure_message {
            Some(message) => message.clone(),
            None => format!("Error: {}", err.user_message()),
        };

        let display = self.config.failure_display;
        if display.alerts() {
            self.elements.notifier.alert(&message);
        }
        if display.inline() {
            self.elements.result.show_error(&message);
            self.elements.result.show();
        }

        Outcome::Failed { message }
    }
}
