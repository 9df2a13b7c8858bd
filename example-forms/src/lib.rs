pub mod conference_application;
pub mod profile;

// Re-export conference_application items
pub use conference_application::{CONFERENCE_APPLICATION_JSON, conference_application};

// Re-export profile items
pub use profile::profile;
