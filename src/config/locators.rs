//! Element locators for every stage of the publish pipeline.
//!
//! Defaults target the creator studio upload dialog. They are parameters: a different
//! site only needs a different `LocatorSet`.

use serde::{Deserialize, Serialize};

use crate::core::surface::Locator;

/// Locators used by the stage controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorSet {
    /// One entry per item in the queue.
    pub item_row: Locator,
    /// Edit affordance inside an item row.
    pub edit_button: Locator,
    /// Draft dialog opened by the edit affordance (searched document-wide).
    pub draft_dialog: Locator,
    /// Audience radio options inside the draft dialog, "for kids" first.
    pub kids_option: Locator,
    /// Stepper control that opens the visibility step.
    pub visibility_stepper: Locator,
    /// Root of the visibility step. `None` keeps searching the draft dialog.
    pub visibility_surface: Option<Locator>,
    /// Visibility radio group.
    pub visibility_group: Locator,
    /// Options inside the visibility radio group.
    pub visibility_option: Locator,
    /// Expander revealing the schedule controls.
    pub schedule_expander: Locator,
    /// Control opening the date picker.
    pub date_trigger: Locator,
    /// Floating date text input (searched document-wide).
    pub date_input: Locator,
    /// Control opening the time picker.
    pub time_trigger: Locator,
    /// Time text input.
    pub time_input: Locator,
    /// Control confirming the schedule.
    pub schedule_done: Locator,
    /// Top-level save control.
    pub save_button: Locator,
    /// Element whose appearance anywhere signals the save completed.
    pub saved_signal: Locator,
    /// Confirmation surface shown after saving (searched document-wide).
    pub confirmation_dialog: Locator,
    /// Dismissal control inside the confirmation surface.
    pub confirmation_close: Locator,
}

impl Default for LocatorSet {
    fn default() -> Self {
        Self {
            item_row: "ytcp-video-row".into(),
            edit_button: ".edit-draft-button".into(),
            draft_dialog: ".style-scope.ytcp-uploads-dialog".into(),
            kids_option: "tp-yt-paper-radio-button".into(),
            visibility_stepper: "#step-badge-3".into(),
            visibility_surface: None,
            visibility_group: "tp-yt-paper-radio-group".into(),
            visibility_option: "tp-yt-paper-radio-button".into(),
            schedule_expander: "#second-container-expand-button".into(),
            date_trigger: "#datepicker-trigger".into(),
            date_input: "tp-yt-iron-input input[autofocus]".into(),
            time_trigger: "#time-of-day-container".into(),
            time_input: "tp-yt-paper-input input".into(),
            schedule_done: "#done-button".into(),
            save_button: "#done-button".into(),
            saved_signal: "ytcp-video-thumbnail-with-info".into(),
            confirmation_dialog:
                "ytcp-dialog.ytcp-video-share-dialog > tp-yt-paper-dialog:nth-child(1)".into(),
            confirmation_close: "tp-yt-iron-icon".into(),
        }
    }
}
