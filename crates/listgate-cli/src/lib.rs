//! # listgate-cli — Command Handlers
//!
//! Handler modules for the `listgate` binary. The validation core never
//! touches the process lifecycle; these handlers load inputs, run the
//! pipeline, and hand a [`listgate_core::ValidationReport`] back to `main`,
//! which owns printing and the exit code.

pub mod check;
