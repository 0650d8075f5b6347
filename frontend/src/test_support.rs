use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use async_trait::async_trait;
use shared::{ClientTransport, RawResponse};
use thiserror::Error;

use crate::dom::{
    Badge, CoachElements, DoctorSearch, ItemList, Notifier, Panel, SymptomElements, TextInput,
    TextSlot, Trigger,
};

#[derive(Debug, Error)]
#[error("network unreachable")]
pub struct Unreachable;

pub enum Reply {
    Response(RawResponse),
    Unreachable,
    /// Never resolves; used to hold a submission in flight.
    Never,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Reply::Response(RawResponse::new(200, body))
    }

    pub fn status(status: u16, body: &str) -> Self {
        Reply::Response(RawResponse::new(status, body))
    }
}

#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<(String, serde_json::Value)>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            requests: RefCell::default(),
        }
    }

    pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.borrow().clone()
    }

    pub fn routes(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|(route, _)| route.clone())
            .collect()
    }
}

#[async_trait(?Send)]
impl ClientTransport for ScriptedTransport {
    type Error = Unreachable;

    async fn post(&self, route: &str, body: serde_json::Value) -> Result<RawResponse, Unreachable> {
        self.requests.borrow_mut().push((route.to_owned(), body));

        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Response(resp)) => Ok(resp),
            Some(Reply::Unreachable) => Err(Unreachable),
            Some(Reply::Never) => futures::future::pending().await,
            None => panic!("no scripted reply left for {route}"),
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeTrigger {
    pub disabled: Rc<Cell<bool>>,
    pub label: Rc<RefCell<String>>,
    pub events: Rc<RefCell<Vec<String>>>,
}

impl FakeTrigger {
    pub fn labelled(label: &str) -> Self {
        let trigger = Self::default();
        *trigger.label.borrow_mut() = label.to_owned();
        trigger
    }
}

impl Trigger for FakeTrigger {
    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
        self.events
            .borrow_mut()
            .push(if disabled { "disable" } else { "enable" }.to_owned());
    }

    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.to_owned();
        self.events.borrow_mut().push(format!("label:{label}"));
    }
}

#[derive(Clone, Default)]
pub struct FakeInput {
    pub value: Rc<RefCell<String>>,
    pub focused: Rc<Cell<u32>>,
}

impl FakeInput {
    pub fn set(&self, value: &str) {
        *self.value.borrow_mut() = value.to_owned();
    }
}

impl TextInput for FakeInput {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn focus(&self) {
        self.focused.set(self.focused.get() + 1);
    }
}

#[derive(Clone, Default)]
pub struct FakePanel {
    pub visible: Rc<Cell<bool>>,
    pub error: Rc<RefCell<Option<String>>>,
}

impl Panel for FakePanel {
    fn show(&self) {
        self.visible.set(true);
    }

    fn hide(&self) {
        self.visible.set(false);
    }

    fn show_error(&self, message: &str) {
        *self.error.borrow_mut() = Some(message.to_owned());
    }

    fn clear_error(&self) {
        *self.error.borrow_mut() = None;
    }
}

#[derive(Clone, Default)]
pub struct FakeBadge {
    pub text: Rc<RefCell<String>>,
    pub background: Rc<RefCell<String>>,
    pub foreground: Rc<RefCell<String>>,
}

impl Badge for FakeBadge {
    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_owned();
    }

    fn set_colors(&self, background: &str, foreground: &str) {
        *self.background.borrow_mut() = background.to_owned();
        *self.foreground.borrow_mut() = foreground.to_owned();
    }
}

#[derive(Clone, Default)]
pub struct FakeText(pub Rc<RefCell<String>>);

impl FakeText {
    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }
}

impl TextSlot for FakeText {
    fn set_text(&self, text: &str) {
        *self.0.borrow_mut() = text.to_owned();
    }
}

#[derive(Clone, Default)]
pub struct FakeList(pub Rc<RefCell<Vec<String>>>);

impl FakeList {
    pub fn items(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl ItemList for FakeList {
    fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, item: &str) {
        self.0.borrow_mut().push(item.to_owned());
    }
}

#[derive(Clone, Default)]
pub struct FakeDoctorSearch(pub Rc<RefCell<Option<String>>>);

impl DoctorSearch for FakeDoctorSearch {
    fn show(&self, href: &str) {
        *self.0.borrow_mut() = Some(href.to_owned());
    }

    fn hide(&self) {
        *self.0.borrow_mut() = None;
    }
}

#[derive(Clone, Default)]
pub struct FakeNotifier(pub Rc<RefCell<Vec<String>>>);

impl FakeNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl Notifier for FakeNotifier {
    fn alert(&self, message: &str) {
        self.0.borrow_mut().push(message.to_owned());
    }
}

/// Handles onto every fake a page would carry, kept for inspection after the
/// boxed copies are handed to a controller.
#[derive(Clone, Default)]
pub struct FakePage {
    pub trigger: FakeTrigger,
    pub input: FakeInput,
    pub query: FakeInput,
    pub result: FakePanel,
    pub badge: FakeBadge,
    pub specialty: FakeText,
    pub advice: FakeList,
    pub lifestyle: FakeList,
    pub disclaimer: FakeText,
    pub doctor_search: FakeDoctorSearch,
    pub notifier: FakeNotifier,
    pub coach_trigger: FakeTrigger,
    pub goals: FakeInput,
    pub coach_output: FakeText,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            trigger: FakeTrigger::labelled("Get AI Guidance"),
            coach_trigger: FakeTrigger::labelled("Generate plan"),
            ..Self::default()
        }
    }

    pub fn symptom_elements(&self) -> SymptomElements {
        SymptomElements {
            trigger: Box::new(self.trigger.clone()),
            input: Box::new(self.input.clone()),
            query: Some(Box::new(self.query.clone())),
            result: Box::new(self.result.clone()),
            badge: Box::new(self.badge.clone()),
            specialty: Box::new(self.specialty.clone()),
            advice: Box::new(self.advice.clone()),
            lifestyle: Box::new(self.lifestyle.clone()),
            disclaimer: Box::new(self.disclaimer.clone()),
            doctor_search: Some(Box::new(self.doctor_search.clone())),
            notifier: Box::new(self.notifier.clone()),
        }
    }

    pub fn coach_elements(&self) -> CoachElements {
        CoachElements {
            trigger: Box::new(self.coach_trigger.clone()),
            goals: Box::new(self.goals.clone()),
            output: Box::new(self.coach_output.clone()),
        }
    }
}
