pub mod binding;
pub mod coach;
pub mod config;
pub mod controller;
pub mod dom;
pub mod endpoints;

#[cfg(target_arch = "wasm32")]
pub mod rpc;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod test_support;

pub use coach::CoachController;
pub use config::{ConfigError, PageConfig};
pub use controller::{FlowState, Outcome, SymptomController};
