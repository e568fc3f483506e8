//! Thread-local context tracking for crash reports.
//!
//! Records which wizard step and which operation were running so a panic
//! report can say where the estimator was when it failed. Guards restore
//! the previous context on drop.

use crate::wizard::WizardStep;
use std::cell::RefCell;

thread_local! {
    static CURRENT_CONTEXT: RefCell<SessionContext> = const { RefCell::new(SessionContext::new()) };
}

/// Snapshot of what the estimator was doing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    /// Wizard step being processed
    pub step: Option<WizardStep>,
    /// Operation name, e.g. `save_project`
    pub operation: Option<&'static str>,
    /// Project the operation works on
    pub project_id: Option<String>,
}

impl SessionContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: None,
            operation: None,
            project_id: None,
        }
    }
}

/// RAII guard restoring the previous context on drop.
pub struct ContextGuard {
    previous: SessionContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

fn update(apply: impl FnOnce(&mut SessionContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        apply(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}

/// Set the wizard step being processed.
#[must_use]
pub fn set_step(step: WizardStep) -> ContextGuard {
    update(|ctx| ctx.step = Some(step))
}

/// Set the operation being run.
#[must_use]
pub fn set_operation(operation: &'static str) -> ContextGuard {
    update(|ctx| ctx.operation = Some(operation))
}

/// Set the project being worked on.
#[must_use]
pub fn set_project(id: impl Into<String>) -> ContextGuard {
    let id = id.into();
    update(|ctx| ctx.project_id = Some(id))
}

/// Called by the panic hook.
#[must_use]
pub fn get_current_context() -> SessionContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = SessionContext::new();
    });
}
