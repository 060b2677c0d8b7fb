//! Reusable UI components
pub mod activity_indicator;
pub mod authentication_page;
pub mod input;
pub mod load_error;
pub mod session_settings;
pub mod settings_container;
pub mod toaster;

pub use activity_indicator::ActivityIndicator;
pub use authentication_page::AuthenticationPage;
pub use input::NumberInput;
pub use load_error::LoadError;
pub use session_settings::SessionSettings;
pub use settings_container::SettingsContainer;
pub use toaster::Toaster;
