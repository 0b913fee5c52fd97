//! Session state machine.

/// Represents the traversal state of a USSD session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Session has been created but no request has been handled yet.
    #[default]
    New,
    /// A request is being handled; the tree is being walked.
    Traversing,
    /// Traversal is suspended until the subscriber replies.
    AwaitingInput,
    /// A terminal tag fired; the session accepts no further requests.
    Terminated,
}

impl SessionState {
    /// Check if transition to target state is valid.
    ///
    /// Valid transitions:
    /// - New -> Traversing
    /// - Traversing -> AwaitingInput
    /// - Traversing -> Terminated
    /// - AwaitingInput -> Traversing
    pub fn can_transition_to(&self, target: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (*self, target),
            (New, Traversing)
                | (Traversing, AwaitingInput)
                | (Traversing, Terminated)
                | (AwaitingInput, Traversing)
        )
    }

    /// Attempt to transition to a new state.
    ///
    /// Returns `Ok(())` if the transition is valid, or an error otherwise.
    pub fn transition_to(&mut self, target: SessionState) -> crate::Result<()> {
        if self.can_transition_to(target) {
            *self = target;
            Ok(())
        } else {
            Err(crate::error::UssdError::InvalidStateTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// Check if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Terminated)
    }

    /// Check if the session can accept an inbound request.
    pub fn can_accept_request(&self) -> bool {
        !self.is_terminal()
    }
}
