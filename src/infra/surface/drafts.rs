//! Scripted draft queue for the in-memory surface.
//!
//! Lays out, per draft, the elements the standard pipeline walks: a row with an edit
//! affordance, a draft dialog that opens with latency, audience and visibility radio
//! options, schedule controls, a floating date input, a save button, a document-wide
//! save signal and a confirmation dialog. Faults remove or break one piece so a draft
//! fails (or degrades) at a known stage.

use std::time::Duration;

use crate::config::LocatorSet;
use crate::core::surface::ElementHandle;
use crate::infra::surface::memory::InMemorySurface;

/// Scripted breakage for one draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftFault {
    /// Everything works.
    #[default]
    None,
    /// The row has no edit affordance.
    MissingEditButton,
    /// The dialog has no visibility stepper.
    MissingVisibilityStepper,
    /// The visibility stepper opens but its radio group never renders.
    MissingVisibilityGroup,
    /// The date picker never shows its input.
    MissingDateInput,
    /// The time picker never shows its input.
    MissingTimeInput,
    /// The dialog is torn down when the schedule section is expanded.
    DialogClosesOnExpand,
    /// Saving never produces the save signal.
    NoSaveSignal,
}

/// Handles to the elements of one scripted draft.
#[derive(Debug, Clone)]
pub struct DraftHandles {
    /// Queue row.
    pub row: ElementHandle,
    /// Draft dialog.
    pub dialog: ElementHandle,
    /// Audience options: for kids, not for kids.
    pub kids_options: [ElementHandle; 2],
    /// Visibility options: private, unlisted, public.
    pub visibility_options: [ElementHandle; 3],
    /// Floating date input.
    pub date_input: ElementHandle,
    /// Time input.
    pub time_input: ElementHandle,
    /// Top-level save control.
    pub save_button: ElementHandle,
    /// Confirmation dismissal control.
    pub confirmation_close: ElementHandle,
}

/// Builds drafts onto an [`InMemorySurface`] using a [`LocatorSet`].
pub struct DraftQueue<'a> {
    surface: &'a InMemorySurface,
    locators: &'a LocatorSet,
    latency: Duration,
    dialogs: Vec<ElementHandle>,
}

impl<'a> DraftQueue<'a> {
    /// Queue writer with 100 ms of reveal latency.
    #[must_use]
    pub const fn new(surface: &'a InMemorySurface, locators: &'a LocatorSet) -> Self {
        Self {
            surface,
            locators,
            latency: Duration::from_millis(100),
            dialogs: Vec::new(),
        }
    }

    /// Delay between an activation and the surface it opens.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Change the latency for drafts added from now on.
    pub fn set_latency(&mut self, latency: Duration) {
        self.latency = latency;
    }

    /// Append `count` healthy drafts.
    pub fn add_drafts(&mut self, count: usize) -> Vec<DraftHandles> {
        (0..count).map(|_| self.add_draft(DraftFault::None)).collect()
    }

    /// Append one draft with the given fault.
    pub fn add_draft(&mut self, fault: DraftFault) -> DraftHandles {
        let s = self.surface;
        let l = self.locators;
        let latency = self.latency;

        let row = s.add_element(l.item_row.clone(), None);
        let dialog = s.add_hidden(l.draft_dialog.clone(), None);
        if fault != DraftFault::MissingEditButton {
            let edit = s.add_element(l.edit_button.clone(), Some(row));
            s.reveal_on_activate(edit, dialog, latency);
            // Opening a draft replaces whatever dialog an earlier draft left behind.
            for stale in &self.dialogs {
                s.remove_on_activate(edit, *stale);
            }
        }
        self.dialogs.push(dialog);

        let kids_options = [
            s.add_element(l.kids_option.clone(), Some(dialog)),
            s.add_element(l.kids_option.clone(), Some(dialog)),
        ];

        let group = s.add_hidden(l.visibility_group.clone(), Some(dialog));
        if fault != DraftFault::MissingVisibilityStepper {
            let stepper = s.add_element(l.visibility_stepper.clone(), Some(dialog));
            if fault != DraftFault::MissingVisibilityGroup {
                s.reveal_on_activate(stepper, group, latency);
            }
        }
        let visibility_options = [
            s.add_element(l.visibility_option.clone(), Some(group)),
            s.add_element(l.visibility_option.clone(), Some(group)),
            s.add_element(l.visibility_option.clone(), Some(group)),
        ];

        let expander = s.add_element(l.schedule_expander.clone(), Some(dialog));
        let panel = s.add_hidden("schedule-panel", Some(dialog));
        s.reveal_on_activate(expander, panel, latency);
        if fault == DraftFault::DialogClosesOnExpand {
            s.remove_on_activate(expander, dialog);
        }

        let date_trigger = s.add_element(l.date_trigger.clone(), Some(panel));
        let date_input = s.add_hidden(l.date_input.clone(), Some(dialog));
        if fault != DraftFault::MissingDateInput {
            s.reveal_on_activate(date_trigger, date_input, latency);
        }

        let time_trigger = s.add_element(l.time_trigger.clone(), Some(panel));
        let time_input = s.add_hidden(l.time_input.clone(), Some(panel));
        if fault != DraftFault::MissingTimeInput {
            s.reveal_on_activate(time_trigger, time_input, Duration::ZERO);
        }

        // Inserted before the save button so it wins lookups while the panel is open.
        let schedule_done = s.add_element(l.schedule_done.clone(), Some(panel));
        s.remove_on_activate(schedule_done, panel);

        let save_button = s.add_element(l.save_button.clone(), Some(dialog));
        let saved_signal = s.add_hidden(l.saved_signal.clone(), None);
        let confirmation = s.add_hidden(l.confirmation_dialog.clone(), None);
        let confirmation_close = s.add_element(l.confirmation_close.clone(), Some(confirmation));
        if fault != DraftFault::NoSaveSignal {
            s.reveal_on_activate(save_button, saved_signal, latency);
            s.reveal_on_activate(save_button, confirmation, latency);
        }
        for closed in [dialog, saved_signal, confirmation] {
            s.remove_on_activate(confirmation_close, closed);
        }

        DraftHandles {
            row,
            dialog,
            kids_options,
            visibility_options,
            date_input,
            time_input,
            save_button,
            confirmation_close,
        }
    }
}
