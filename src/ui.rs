//! Page-level UI: event wiring for the services form.

pub mod events;
