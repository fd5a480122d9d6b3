//=========================================================================
// Lifecycle State Machine
//=========================================================================
//
// Tracks the shell's coarse lifecycle and checks each reported
// transition against the host grammar:
//
// ```text
//   Create ( Start ( Resume Pause )* Stop )* Destroy
//
//   (none) ─Create─► Created ─Start─► Started ─Resume─► Resumed
//                       │               ▲  │               │
//                       │            Start Stop          Pause
//                       │               │  ▼               ▼
//                       └──Destroy──► Stopped ◄──Stop── Paused ─Resume─┐
//                                       │                  ▲           │
//                                    Destroy               └───────────┘
//                                       ▼
//                                   Destroyed
// ```
//
// The machine never corrects the host. An out-of-grammar transition is
// logged and then taken anyway, because the host is the authority on
// its own lifecycle.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== LifecycleEvent ======================================================

/// A lifecycle transition reported by the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
}

impl LifecycleEvent {
    /// Decodes a host lifecycle code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Create),
            2 => Some(Self::Destroy),
            3 => Some(Self::Start),
            4 => Some(Self::Stop),
            5 => Some(Self::Resume),
            6 => Some(Self::Pause),
            _ => None,
        }
    }

    /// State the shell is in after this transition.
    pub fn target_state(self) -> LifecycleState {
        match self {
            Self::Create => LifecycleState::Created,
            Self::Start => LifecycleState::Started,
            Self::Resume => LifecycleState::Resumed,
            Self::Pause => LifecycleState::Paused,
            Self::Stop => LifecycleState::Stopped,
            Self::Destroy => LifecycleState::Destroyed,
        }
    }
}

//=== LifecycleState ======================================================

/// Coarse lifecycle state of the bound shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    Destroyed,
}

//=== LifecycleMachine ====================================================

/// Current lifecycle state plus grammar checking.
pub(crate) struct LifecycleMachine {
    state: Option<LifecycleState>,
}

impl LifecycleMachine {
    pub(crate) fn new() -> Self {
        Self { state: None }
    }

    /// Current state, `None` before the first Create.
    pub(crate) fn state(&self) -> Option<LifecycleState> {
        self.state
    }

    /// Records a transition and returns the new state.
    pub(crate) fn transition(&mut self, event: LifecycleEvent) -> LifecycleState {
        if !Self::is_legal(self.state, event) {
            warn!(
                target: "bridge::lifecycle",
                "Transition {:?} from {:?} is outside the host grammar",
                event,
                self.state
            );
        }

        let next = event.target_state();
        info!(target: "bridge::lifecycle", "{:?} -> {:?}", self.state, next);
        self.state = Some(next);
        next
    }

    /// Whether `event` is a legal successor of `from`.
    pub(crate) fn is_legal(from: Option<LifecycleState>, event: LifecycleEvent) -> bool {
        use LifecycleEvent as E;
        use LifecycleState as S;

        matches!(
            (from, event),
            (None | Some(S::Destroyed), E::Create)
                | (Some(S::Created | S::Stopped), E::Start)
                | (Some(S::Started | S::Paused), E::Resume)
                | (Some(S::Resumed), E::Pause)
                | (Some(S::Started | S::Paused), E::Stop)
                | (Some(S::Created | S::Stopped), E::Destroy)
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Code Decoding Tests
    //=====================================================================

    #[test]
    fn lifecycle_codes_decode() {
        assert_eq!(LifecycleEvent::from_code(1), Some(LifecycleEvent::Create));
        assert_eq!(LifecycleEvent::from_code(2), Some(LifecycleEvent::Destroy));
        assert_eq!(LifecycleEvent::from_code(3), Some(LifecycleEvent::Start));
        assert_eq!(LifecycleEvent::from_code(4), Some(LifecycleEvent::Stop));
        assert_eq!(LifecycleEvent::from_code(5), Some(LifecycleEvent::Resume));
        assert_eq!(LifecycleEvent::from_code(6), Some(LifecycleEvent::Pause));
        assert_eq!(LifecycleEvent::from_code(0), None);
        assert_eq!(LifecycleEvent::from_code(7), None);
    }

    //=====================================================================
    // Grammar Tests
    //=====================================================================

    #[test]
    fn full_cycle_is_legal() {
        let mut state = None;
        for event in [
            LifecycleEvent::Create,
            LifecycleEvent::Start,
            LifecycleEvent::Resume,
            LifecycleEvent::Pause,
            LifecycleEvent::Resume,
            LifecycleEvent::Pause,
            LifecycleEvent::Stop,
            LifecycleEvent::Start,
            LifecycleEvent::Stop,
            LifecycleEvent::Destroy,
        ] {
            assert!(LifecycleMachine::is_legal(state, event), "{:?} after {:?}", event, state);
            state = Some(event.target_state());
        }
    }

    #[test]
    fn create_then_destroy_is_legal() {
        assert!(LifecycleMachine::is_legal(Some(LifecycleState::Created), LifecycleEvent::Destroy));
    }

    #[test]
    fn recreate_after_destroy_is_legal() {
        assert!(LifecycleMachine::is_legal(Some(LifecycleState::Destroyed), LifecycleEvent::Create));
    }

    #[test]
    fn skipping_steps_is_illegal() {
        assert!(!LifecycleMachine::is_legal(None, LifecycleEvent::Resume));
        assert!(!LifecycleMachine::is_legal(Some(LifecycleState::Created), LifecycleEvent::Resume));
        assert!(!LifecycleMachine::is_legal(Some(LifecycleState::Resumed), LifecycleEvent::Stop));
        assert!(!LifecycleMachine::is_legal(Some(LifecycleState::Resumed), LifecycleEvent::Destroy));
        assert!(!LifecycleMachine::is_legal(Some(LifecycleState::Started), LifecycleEvent::Create));
    }

    //=====================================================================
    // Machine Tests
    //=====================================================================

    #[test]
    fn machine_starts_without_state() {
        assert_eq!(LifecycleMachine::new().state(), None);
    }

    #[test]
    fn machine_follows_transitions() {
        let mut machine = LifecycleMachine::new();
        assert_eq!(machine.transition(LifecycleEvent::Create), LifecycleState::Created);
        assert_eq!(machine.transition(LifecycleEvent::Start), LifecycleState::Started);
        assert_eq!(machine.state(), Some(LifecycleState::Started));
    }

    #[test]
    fn machine_takes_illegal_transition_anyway() {
        let mut machine = LifecycleMachine::new();
        machine.transition(LifecycleEvent::Create);
        assert_eq!(machine.transition(LifecycleEvent::Pause), LifecycleState::Paused);
        assert_eq!(machine.state(), Some(LifecycleState::Paused));
    }
}
