//! Per-item stage controller.
//!
//! An item walks a fixed, forward-only sequence of stages. Each stage waits for the
//! element it needs through the [`Waiter`], actuates it, and optionally narrows the
//! search scope to the surface it just opened. The first hard error ends the item's
//! run; the state reached so far is kept for diagnostics. There are no retries and no
//! backward transitions.
//!
//! The topology itself is data: a [`Pipeline`] is an ordered list of
//! [`StageDescriptor`]s, so alternate stage orders can be driven without touching the
//! orchestrator.

use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;
use tracing::debug;

use crate::config::{BatchConfig, TimingConfig};
use crate::core::diagnostics::Diagnostics;
use crate::core::schedule::ScheduleSlot;
use crate::core::surface::{Actuation, ElementHandle, InteractiveSurface, Key, Locator, Scope};
use crate::core::wait::{poll_attempts, Waiter};
use crate::core::PublishError;
use crate::util::serde::ItemIndex;

/// States an item passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StageState {
    /// Item enumerated, nothing actuated yet.
    Located,
    /// Draft dialog open; scope is the dialog.
    DraftOpen,
    /// Audience choice made.
    KidsFlagSet,
    /// Visibility step open.
    VisibilityOpen,
    /// Visibility level chosen.
    VisibilitySet,
    /// Schedule controls expanded.
    ScheduleExpanded,
    /// Date entered (or left unset after a soft failure).
    DateSet,
    /// Time entered.
    TimeSet,
    /// Schedule confirmed.
    ScheduleSaved,
    /// Item saved and the save signal observed.
    SaveCommitted,
    /// Confirmation dismissed. Terminal success.
    Confirmed,
}

/// Actions the controller knows how to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StageStep {
    /// Actuate the item's edit affordance and enter the draft dialog.
    OpenItem,
    /// Choose the audience option.
    SetKidsFlag,
    /// Open the visibility step.
    OpenVisibility,
    /// Choose the visibility level.
    SetVisibility,
    /// Expand the schedule section.
    ExpandSchedule,
    /// Enter the slot's date.
    SetDate,
    /// Enter the slot's time.
    SetTime,
    /// Confirm the schedule.
    SaveSchedule,
    /// Save the item and wait for the save signal.
    CommitSave,
    /// Dismiss the confirmation surface.
    Confirm,
}

impl StageStep {
    /// State entered when this step succeeds.
    #[must_use]
    pub const fn enters(self) -> StageState {
        match self {
            Self::OpenItem => StageState::DraftOpen,
            Self::SetKidsFlag => StageState::KidsFlagSet,
            Self::OpenVisibility => StageState::VisibilityOpen,
            Self::SetVisibility => StageState::VisibilitySet,
            Self::ExpandSchedule => StageState::ScheduleExpanded,
            Self::SetDate => StageState::DateSet,
            Self::SetTime => StageState::TimeSet,
            Self::SaveSchedule => StageState::ScheduleSaved,
            Self::CommitSave => StageState::SaveCommitted,
            Self::Confirm => StageState::Confirmed,
        }
    }
}

/// One stage of a pipeline: what to do, and how long to let the surface settle after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDescriptor {
    /// Step to perform.
    pub step: StageStep,
    /// Stabilization delay after the step succeeds.
    pub settle: Duration,
}

impl StageDescriptor {
    /// Descriptor with no settle delay.
    #[must_use]
    pub const fn new(step: StageStep) -> Self {
        Self {
            step,
            settle: Duration::ZERO,
        }
    }

    /// Set the settle delay.
    #[must_use]
    pub const fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

/// Ordered stage topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<StageDescriptor>,
}

impl Pipeline {
    /// Validate and wrap a custom topology.
    ///
    /// # Errors
    ///
    /// `PublishError::InvalidPipeline` when the list is empty, does not start with
    /// `OpenItem`, or would move backwards or repeat a state.
    pub fn new(stages: Vec<StageDescriptor>) -> Result<Self, PublishError> {
        let Some(first) = stages.first() else {
            return Err(PublishError::InvalidPipeline("no stages".into()));
        };
        if first.step != StageStep::OpenItem {
            return Err(PublishError::InvalidPipeline(format!(
                "first stage must be OpenItem, got {:?}",
                first.step
            )));
        }
        for pair in stages.windows(2) {
            if pair[1].step.enters() <= pair[0].step.enters() {
                return Err(PublishError::InvalidPipeline(format!(
                    "{:?} cannot follow {:?}",
                    pair[1].step, pair[0].step
                )));
            }
        }
        Ok(Self { stages })
    }

    /// Draft → audience → visibility → schedule → save → confirm.
    #[must_use]
    pub fn standard(timing: &TimingConfig) -> Self {
        let settle = &timing.settle;
        let ms = Duration::from_millis;
        Self {
            stages: vec![
                StageDescriptor::new(StageStep::OpenItem),
                StageDescriptor::new(StageStep::SetKidsFlag),
                StageDescriptor::new(StageStep::OpenVisibility)
                    .with_settle(ms(settle.after_visibility_stepper_ms)),
                StageDescriptor::new(StageStep::SetVisibility),
                StageDescriptor::new(StageStep::ExpandSchedule)
                    .with_settle(ms(settle.after_schedule_expand_ms)),
                StageDescriptor::new(StageStep::SetDate)
                    .with_settle(ms(settle.after_date_commit_ms)),
                StageDescriptor::new(StageStep::SetTime)
                    .with_settle(ms(settle.after_time_commit_ms)),
                StageDescriptor::new(StageStep::SaveSchedule)
                    .with_settle(ms(settle.after_schedule_save_ms)),
                StageDescriptor::new(StageStep::CommitSave),
                StageDescriptor::new(StageStep::Confirm).with_settle(ms(settle.after_confirm_ms)),
            ],
        }
    }

    /// Stages in execution order.
    #[must_use]
    pub fn stages(&self) -> &[StageDescriptor] {
        &self.stages
    }

    /// State reached when every stage succeeds.
    #[must_use]
    pub fn terminal_state(&self) -> StageState {
        self.stages
            .last()
            .map_or(StageState::Located, |stage| stage.step.enters())
    }
}

/// Mutable per-item state threaded through the stages.
#[derive(Debug, Clone)]
pub struct StageContext {
    /// Item position in the queue.
    pub index: ItemIndex,
    /// Item handle on the surface.
    pub item: ElementHandle,
    /// Where the next stage searches.
    pub scope: Scope,
    /// Last state reached.
    pub state: StageState,
    /// Slot being applied.
    pub slot: ScheduleSlot,
    /// Steps that degraded instead of failing.
    pub degraded: Vec<StageStep>,
}

impl StageContext {
    /// Context for an item that has only been located.
    #[must_use]
    pub const fn new(index: ItemIndex, item: ElementHandle, slot: ScheduleSlot) -> Self {
        Self {
            index,
            item,
            scope: Scope::Within(item),
            state: StageState::Located,
            slot,
            degraded: Vec::new(),
        }
    }
}

/// Terminal result of one item's run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Every stage completed.
    Success {
        /// Steps that logged a soft failure and continued.
        degraded: Vec<StageStep>,
    },
    /// A stage failed.
    Failure {
        /// Error raised by the failing step.
        reason: PublishError,
        /// Last state reached before the failure.
        state: StageState,
        /// Step that failed.
        step: StageStep,
    },
}

impl Outcome {
    /// Whether the item completed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Drives single items through a [`Pipeline`].
pub struct StageController<'a, S: ?Sized> {
    waiter: Waiter<'a, S>,
    config: &'a BatchConfig,
    pipeline: &'a Pipeline,
    diagnostics: &'a Diagnostics,
}

impl<'a, S> StageController<'a, S>
where
    S: InteractiveSurface + ?Sized,
{
    /// Controller over `surface` using the polling policy from `config.timing`.
    pub fn new(
        surface: &'a S,
        config: &'a BatchConfig,
        pipeline: &'a Pipeline,
        diagnostics: &'a Diagnostics,
    ) -> Self {
        Self {
            waiter: Waiter::new(
                surface,
                config.timing.poll_interval(),
                config.timing.default_timeout(),
            ),
            config,
            pipeline,
            diagnostics,
        }
    }

    /// Run every stage for one item with its slot.
    pub async fn drive(
        &self,
        index: ItemIndex,
        item: ElementHandle,
        slot: ScheduleSlot,
    ) -> Outcome {
        let mut ctx = StageContext::new(index, item, slot);
        for stage in self.pipeline.stages() {
            debug!(item = index, state = ?ctx.state, step = ?stage.step, "running step");
            if let Err(reason) = self.run_step(stage.step, &mut ctx).await {
                self.diagnostics.error(
                    index,
                    ctx.state,
                    format!("{:?} failed: {reason}", stage.step),
                );
                return Outcome::Failure {
                    reason,
                    state: ctx.state,
                    step: stage.step,
                };
            }
            ctx.state = stage.step.enters();
            if !stage.settle.is_zero() {
                sleep(stage.settle).await;
            }
        }
        Outcome::Success {
            degraded: ctx.degraded,
        }
    }

    async fn run_step(&self, step: StageStep, ctx: &mut StageContext) -> Result<(), PublishError> {
        match step {
            StageStep::OpenItem => self.open_item(ctx).await,
            StageStep::SetKidsFlag => self.set_kids_flag(ctx).await,
            StageStep::OpenVisibility => self.open_visibility(ctx).await,
            StageStep::SetVisibility => self.set_visibility(ctx).await,
            StageStep::ExpandSchedule => {
                self.activate_in_scope(&self.locators().schedule_expander, ctx).await
            }
            StageStep::SetDate => self.set_date(ctx).await,
            StageStep::SetTime => self.set_time(ctx).await,
            StageStep::SaveSchedule => {
                self.activate_in_scope(&self.locators().schedule_done, ctx).await
            }
            StageStep::CommitSave => self.commit_save(ctx).await,
            StageStep::Confirm => self.confirm(ctx).await,
        }
    }

    fn locators(&self) -> &'a crate::config::LocatorSet {
        &self.config.locators
    }

    fn surface(&self) -> &'a S {
        self.waiter.surface()
    }

    async fn activate(&self, element: ElementHandle) -> Result<(), PublishError> {
        self.surface().actuate(element, Actuation::Activate).await
    }

    async fn activate_in_scope(
        &self,
        target: &Locator,
        ctx: &StageContext,
    ) -> Result<(), PublishError> {
        let element = self.waiter.await_ready(target, ctx.scope, None).await?;
        self.activate(element).await
    }

    /// Clear, type, commit with Enter, then dismiss focus.
    async fn enter_text(&self, input: ElementHandle, text: &str) -> Result<(), PublishError> {
        let surface = self.surface();
        surface
            .actuate(input, Actuation::ReplaceText(text.to_owned()))
            .await?;
        surface.actuate(input, Actuation::Press(Key::Enter)).await?;
        surface.actuate(input, Actuation::Blur).await
    }

    async fn open_item(&self, ctx: &mut StageContext) -> Result<(), PublishError> {
        let locators = self.locators();
        let edit = self
            .waiter
            .await_ready(
                &locators.edit_button,
                Scope::Within(ctx.item),
                Some(self.config.timing.item_affordance_timeout()),
            )
            .await?;
        self.activate(edit).await?;
        let dialog = self
            .waiter
            .await_ready(&locators.draft_dialog, Scope::Document, None)
            .await?;
        ctx.scope = Scope::Within(dialog);
        Ok(())
    }

    async fn set_kids_flag(&self, ctx: &StageContext) -> Result<(), PublishError> {
        let position = usize::from(!self.config.made_for_kids);
        let option = self
            .waiter
            .await_nth(&self.locators().kids_option, ctx.scope, position, None)
            .await?;
        self.activate(option).await
    }

    async fn open_visibility(&self, ctx: &mut StageContext) -> Result<(), PublishError> {
        let locators = self.locators();
        self.activate_in_scope(&locators.visibility_stepper, ctx).await?;
        if let Some(panel) = &locators.visibility_surface {
            let root = self.waiter.await_ready(panel, ctx.scope, None).await?;
            ctx.scope = Scope::Within(root);
        }
        Ok(())
    }

    async fn set_visibility(&self, ctx: &StageContext) -> Result<(), PublishError> {
        let locators = self.locators();
        let visibility = self.config.visibility;
        let group = self
            .waiter
            .await_ready(&locators.visibility_group, ctx.scope, None)
            .await?;
        let option = self
            .waiter
            .await_nth(
                &locators.visibility_option,
                Scope::Within(group),
                visibility.ordinal(),
                None,
            )
            .await?;
        self.activate(option).await?;
        debug!(item = ctx.index, %visibility, "visibility set");
        Ok(())
    }

    async fn set_date(&self, ctx: &mut StageContext) -> Result<(), PublishError> {
        let locators = self.locators();
        let timing = &self.config.timing;
        self.activate_in_scope(&locators.date_trigger, ctx).await?;
        sleep(Duration::from_millis(timing.settle.after_date_trigger_ms)).await;

        // The picker's input floats outside the dialog, so search the whole surface.
        let surface = self.surface();
        let date_input = &locators.date_input;
        let input = poll_attempts(timing.date_input_attempts, timing.date_input_interval(), || {
            surface.locate(date_input, Scope::Document)
        })
        .await?;

        let Some(input) = input else {
            self.diagnostics
                .warn(ctx.index, ctx.state, "date input not found in picker; date left unset");
            ctx.degraded.push(StageStep::SetDate);
            return Ok(());
        };

        let text = ctx.slot.date_text();
        self.enter_text(input, &text).await?;
        debug!(item = ctx.index, date = %text, "date set");
        Ok(())
    }

    async fn set_time(&self, ctx: &StageContext) -> Result<(), PublishError> {
        let locators = self.locators();
        self.activate_in_scope(&locators.time_trigger, ctx).await?;
        sleep(Duration::from_millis(self.config.timing.settle.after_time_trigger_ms)).await;

        let input = self
            .surface()
            .locate(&locators.time_input, ctx.scope)
            .await?
            .ok_or_else(|| PublishError::not_found(locators.time_input.as_str(), Duration::ZERO))?;

        let text = ctx.slot.time_text();
        self.enter_text(input, &text).await?;
        debug!(item = ctx.index, time = %text, "time set");
        Ok(())
    }

    async fn commit_save(&self, ctx: &StageContext) -> Result<(), PublishError> {
        let locators = self.locators();
        self.activate_in_scope(&locators.save_button, ctx).await?;
        self.waiter
            .await_ready(&locators.saved_signal, Scope::Document, None)
            .await?;
        Ok(())
    }

    async fn confirm(&self, ctx: &mut StageContext) -> Result<(), PublishError> {
        let locators = self.locators();
        let dialog = self
            .waiter
            .await_ready(&locators.confirmation_dialog, Scope::Document, None)
            .await?;
        ctx.scope = Scope::Within(dialog);
        self.activate_in_scope(&locators.confirmation_close, ctx).await
    }
}
