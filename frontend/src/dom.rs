//! Element seams the controllers render through.
//!
//! The browser implementations live in `web`; tests use in-memory fakes.

pub trait Trigger {
    fn set_disabled(&self, disabled: bool);
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
}

pub trait TextInput {
    fn value(&self) -> String;
    fn focus(&self);
}

pub trait Panel {
    fn show(&self);
    fn hide(&self);
    /// Replace any previous inline error in the panel with `message`.
    fn show_error(&self, message: &str);
    fn clear_error(&self);
}

pub trait Badge {
    fn set_text(&self, text: &str);
    fn set_colors(&self, background: &str, foreground: &str);
}

pub trait TextSlot {
    fn set_text(&self, text: &str);
}

pub trait ItemList {
    fn clear(&self);
    fn push(&self, item: &str);
}

pub trait DoctorSearch {
    fn show(&self, href: &str);
    fn hide(&self);
}

pub trait Notifier {
    /// Blocking user-facing notification.
    fn alert(&self, message: &str);
}

/// Everything the symptom flow renders into. The doctor-search block is the
/// only optional part; pages without it simply never show a link.
pub struct SymptomElements {
    pub trigger: Box<dyn Trigger>,
    pub input: Box<dyn TextInput>,
    pub query: Option<Box<dyn TextInput>>,
    pub result: Box<dyn Panel>,
    pub badge: Box<dyn Badge>,
    pub specialty: Box<dyn TextSlot>,
    pub advice: Box<dyn ItemList>,
    pub lifestyle: Box<dyn ItemList>,
    pub disclaimer: Box<dyn TextSlot>,
    pub doctor_search: Option<Box<dyn DoctorSearch>>,
    pub notifier: Box<dyn Notifier>,
}

pub struct CoachElements {
    pub trigger: Box<dyn Trigger>,
    pub goals: Box<dyn TextInput>,
    pub output: Box<dyn TextSlot>,
}
