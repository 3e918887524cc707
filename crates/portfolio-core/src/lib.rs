pub mod ai;
pub mod config;
pub mod context;
pub mod employees;
pub mod state;
pub mod store;
pub mod widget;

// Re-export main types for convenience
pub use async_trait::async_trait;
pub use ai::{CompletionClient, CompletionError, CompletionService, CompletionSettings};
pub use config::Config;
pub use context::{build_context, Role, RoleEntry};
pub use employees::{Employee, EmployeeStore, NewEmployee, ResourceError};
pub use state::{Message, Sender, WidgetState};
pub use store::MessageStore;
pub use widget::{Persona, PendingSend, WidgetController, WidgetPhase};
