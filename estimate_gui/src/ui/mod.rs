//! UI module for the estimator window
//!
//! # Panel Structure
//! - `toolbar` - Header, New/Open/Save, layout picker, settings dropdown
//! - `intake_form` - Project description form with the submit button
//! - `report_view` - Report screen: loading, error and ready states
//! - `sections` - Drawing of individual report sections
//! - `status_bar` - Bottom status messages

pub mod toolbar;
pub mod intake_form;
pub mod report_view;
pub mod sections;
pub mod status_bar;
