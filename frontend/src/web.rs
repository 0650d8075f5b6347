use std::{cell::RefCell, future::Future, rc::Rc};

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlButtonElement, HtmlElement,
    HtmlInputElement, HtmlTextAreaElement, Window,
};

use crate::{
    binding::{self, ElementLookup},
    coach::CoachController,
    config::{CoachElementIds, PageConfig, SymptomElementIds, CONFIG_ELEMENT_ID},
    controller::{Outcome, SymptomController},
    dom::{
        Badge, CoachElements, DoctorSearch, ItemList, Notifier, Panel, SymptomElements, TextInput,
        TextSlot, Trigger,
    },
    rpc::Client,
};

const HIDDEN_CLASS: &str = "hide";

fn log_failure(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::warn!(?err, "{what} failed");
    }
}

impl Trigger for HtmlButtonElement {
    fn set_disabled(&self, disabled: bool) {
        HtmlButtonElement::set_disabled(self, disabled);
    }

    fn label(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn set_label(&self, label: &str) {
        self.set_text_content(Some(label));
    }
}

impl TextInput for HtmlTextAreaElement {
    fn value(&self) -> String {
        HtmlTextAreaElement::value(self)
    }

    fn focus(&self) {
        log_failure("focus", HtmlElement::focus(self));
    }
}

impl TextInput for HtmlInputElement {
    fn value(&self) -> String {
        HtmlInputElement::value(self)
    }

    fn focus(&self) {
        log_failure("focus", HtmlElement::focus(self));
    }
}

impl Badge for HtmlElement {
    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_colors(&self, background: &str, foreground: &str) {
        let style = self.style();
        log_failure("badge background", style.set_property("background", background));
        log_failure("badge color", style.set_property("color", foreground));
    }
}

impl TextSlot for HtmlElement {
    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}

/// Result panel toggled through the page's `hide` class. Inline errors go in
/// their own child node so the rendered fields underneath survive.
pub struct WebPanel {
    element: Element,
    document: Document,
    error: RefCell<Option<Element>>,
}

impl WebPanel {
    pub fn new(element: Element, document: Document) -> Self {
        Self {
            element,
            document,
            error: RefCell::new(None),
        }
    }
}

impl Panel for WebPanel {
    fn show(&self) {
        log_failure("show panel", self.element.class_list().remove_1(HIDDEN_CLASS));
    }

    fn hide(&self) {
        log_failure("hide panel", self.element.class_list().add_1(HIDDEN_CLASS));
    }

    fn show_error(&self, message: &str) {
        self.clear_error();

        let node = match self.document.create_element("div") {
            Ok(node) => node,
            Err(err) => {
                tracing::warn!(?err, "could not create error node");
                return;
            }
        };
        node.set_class_name("guidance-error");
        log_failure(
            "error style",
            node.set_attribute("style", "color: red; padding: 20px;"),
        );
        node.set_text_content(Some(message));

        match self.element.prepend_with_node_1(&node) {
            Ok(()) => *self.error.borrow_mut() = Some(node),
            Err(err) => tracing::warn!(?err, "could not attach error node"),
        }
    }

    fn clear_error(&self) {
        if let Some(node) = self.error.borrow_mut().take() {
            node.remove();
        }
    }
}

pub struct WebList {
    element: Element,
    document: Document,
}

impl ItemList for WebList {
    fn clear(&self) {
        self.element.set_inner_html("");
    }

    fn push(&self, item: &str) {
        let li = match self.document.create_element("li") {
            Ok(li) => li,
            Err(err) => {
                tracing::warn!(?err, "could not create list item");
                return;
            }
        };
        li.set_text_content(Some(item));
        if let Err(err) = self.element.append_child(&li) {
            tracing::warn!(?err, "could not append list item");
        }
    }
}

pub struct WebDoctorSearch {
    block: Element,
    link: HtmlAnchorElement,
}

impl DoctorSearch for WebDoctorSearch {
    fn show(&self, href: &str) {
        self.link.set_href(href);
        log_failure("show doctor search", self.block.class_list().remove_1(HIDDEN_CLASS));
    }

    fn hide(&self) {
        log_failure("hide doctor search", self.block.class_list().add_1(HIDDEN_CLASS));
    }
}

pub struct WindowAlert(Window);

impl Notifier for WindowAlert {
    fn alert(&self, message: &str) {
        log_failure("alert", self.0.alert_with_message(message));
    }
}

impl ElementLookup for Document {
    fn has_element(&self, id: &str) -> bool {
        self.get_element_by_id(id).is_some()
    }
}

fn by_id<E: JsCast>(document: &Document, id: &str) -> Option<E> {
    document.get_element_by_id(id)?.dyn_into::<E>().ok()
}

fn required<E: JsCast>(document: &Document, flow: &str, id: &str) -> Option<E> {
    let element = by_id(document, id);
    if element.is_none() {
        tracing::warn!(flow, id, "element has the wrong kind, flow disabled");
    }
    element
}

fn text_input(document: &Document, id: &str) -> Option<Box<dyn TextInput>> {
    let element = document.get_element_by_id(id)?;
    match element.dyn_into::<HtmlTextAreaElement>() {
        Ok(area) => Some(Box::new(area)),
        Err(element) => element
            .dyn_into::<HtmlInputElement>()
            .ok()
            .map(|input| Box::new(input) as Box<dyn TextInput>),
    }
}

pub fn bind_symptom(
    window: &Window,
    document: &Document,
    ids: &SymptomElementIds,
) -> Option<(HtmlButtonElement, SymptomElements)> {
    const FLOW: &str = "symptom";

    if !binding::symptom_flow_enabled(document, ids) {
        return None;
    }

    let trigger: HtmlButtonElement = required(document, FLOW, &ids.trigger)?;
    let input: HtmlTextAreaElement = required(document, FLOW, &ids.input)?;
    let result: Element = required(document, FLOW, &ids.result)?;
    let badge: HtmlElement = required(document, FLOW, &ids.badge)?;
    let specialty: HtmlElement = required(document, FLOW, &ids.specialty)?;
    let advice: Element = required(document, FLOW, &ids.advice)?;
    let lifestyle: Element = required(document, FLOW, &ids.lifestyle)?;
    let disclaimer: HtmlElement = required(document, FLOW, &ids.disclaimer)?;

    let doctor_search = if binding::doctor_search_present(document, ids) {
        match (
            by_id::<Element>(document, &ids.doctor_search),
            by_id::<HtmlAnchorElement>(document, &ids.doctor_link),
        ) {
            (Some(block), Some(link)) => {
                Some(Box::new(WebDoctorSearch { block, link }) as Box<dyn DoctorSearch>)
            }
            _ => None,
        }
    } else {
        None
    };

    let elements = SymptomElements {
        trigger: Box::new(trigger.clone()),
        input: Box::new(input),
        query: text_input(document, &ids.query),
        result: Box::new(WebPanel::new(result, document.clone())),
        badge: Box::new(badge),
        specialty: Box::new(specialty),
        advice: Box::new(WebList {
            element: advice,
            document: document.clone(),
        }),
        lifestyle: Box::new(WebList {
            element: lifestyle,
            document: document.clone(),
        }),
        disclaimer: Box::new(disclaimer),
        doctor_search,
        notifier: Box::new(WindowAlert(window.clone())),
    };

    Some((trigger, elements))
}

pub fn bind_coach(
    document: &Document,
    ids: &CoachElementIds,
) -> Option<(HtmlButtonElement, CoachElements)> {
    if !binding::coach_flow_enabled(document, ids) {
        return None;
    }

    let trigger: HtmlButtonElement = by_id(document, &ids.trigger)?;
    let goals = text_input(document, &ids.goals)?;
    let output: HtmlElement = by_id(document, &ids.output)?;

    let elements = CoachElements {
        trigger: Box::new(trigger.clone()),
        goals,
        output: Box::new(output),
    };

    Some((trigger, elements))
}

fn on_click<F, Fut>(button: &HtmlButtonElement, handler: F) -> Result<(), JsValue>
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Outcome> + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        let activation = handler();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = activation.await;
            tracing::debug!(?outcome, "activation finished");
        });
    });

    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();

    Ok(())
}

pub fn page_config(document: &Document) -> PageConfig {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return PageConfig::default();
    };

    let raw = element.text_content().unwrap_or_default();
    match PageConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "invalid page config, using defaults");
            PageConfig::default()
        }
    }
}

fn bind_page(window: &Window, document: &Document) -> Result<(), JsValue> {
    let config = page_config(document);
    let client = Rc::new(Client);

    if let Some((button, elements)) = bind_symptom(window, document, &config.symptom.ids) {
        let controller = Rc::new(SymptomController::new(
            elements,
            Rc::clone(&client),
            config.symptom,
        ));
        on_click(&button, move || {
            let controller = Rc::clone(&controller);
            async move { controller.activate().await }
        })?;
        tracing::info!("symptom flow bound");
    }

    if let Some((button, elements)) = bind_coach(document, &config.coach.ids) {
        let controller = Rc::new(CoachController::new(elements, client, config.coach));
        on_click(&button, move || {
            let controller = Rc::clone(&controller);
            async move { controller.activate().await }
        })?;
        tracing::info!("coach flow bound");
    }

    Ok(())
}

/// Bind both flows once the document has been parsed.
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    if document.ready_state() != "loading" {
        return bind_page(&window, &document);
    }

    let listener_document = document.clone();
    let on_ready = Closure::once(move || {
        if let Err(err) = bind_page(&window, &listener_document) {
            tracing::error!(?err, "could not bind page");
        }
    });
    document.add_event_listener_with_callback(
        "DOMContentLoaded",
        on_ready.as_ref().unchecked_ref(),
    )?;
    on_ready.forget();

    Ok(())
}
