//! Dispatch phase machine.
//!
//! Tracks which part of a scheduling cycle the car is in and rejects
//! transitions that would nest cycles in an unexpected way. The scheduler
//! drives it; tests and front ends read the current phase and history.
//!
//! # Phases
//!
//! - `Idle`: no batch in progress
//! - `ServingHallCalls`: travelling to the nearest pending hall-call floor
//! - `ArrivedAtHallCall`: door opened at a hall-call floor
//! - `AwaitingDecision`: the arrival observer is being consulted
//! - `BoardingRedirect`: a passenger boarded; hall calls are deferred
//! - `ServingDestinations`: serving destination calls in SCAN order
//!
//! # Valid Transitions
//!
//! - Idle → ServingHallCalls | ServingDestinations
//! - ServingHallCalls → ArrivedAtHallCall | Idle
//! - ArrivedAtHallCall → AwaitingDecision | ServingHallCalls
//! - AwaitingDecision → ServingHallCalls | BoardingRedirect
//! - BoardingRedirect → ServingDestinations
//! - ServingDestinations → ServingHallCalls | Idle
//!
//! A destination cycle entered through `BoardingRedirect` must return to
//! `ServingHallCalls` so the deferred hall calls get served; one started
//! directly from `Idle` returns to `Idle`.
//!
//! # Examples
//!
//! ```
//! use elevator_car::{DispatchMachine, DispatchPhase};
//!
//! let mut machine = DispatchMachine::new();
//! machine.transition_to(DispatchPhase::ServingHallCalls).unwrap();
//! machine.transition_to(DispatchPhase::ArrivedAtHallCall).unwrap();
//! machine.transition_to(DispatchPhase::AwaitingDecision).unwrap();
//! machine.transition_to(DispatchPhase::BoardingRedirect).unwrap();
//! machine.transition_to(DispatchPhase::ServingDestinations).unwrap();
//!
//! assert!(machine.is_redirected());
//! assert_eq!(machine.finish_destinations().unwrap().to, DispatchPhase::ServingHallCalls);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

use elevator_core::{Error, Result, constants::MAX_PHASE_HISTORY};
use serde::{Deserialize, Serialize};

/// Phase of the dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPhase {
    Idle,
    ServingHallCalls,
    ArrivedAtHallCall,
    AwaitingDecision,
    BoardingRedirect,
    ServingDestinations,
}

impl fmt::Display for DispatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase_str = match self {
            DispatchPhase::Idle => "Idle",
            DispatchPhase::ServingHallCalls => "ServingHallCalls",
            DispatchPhase::ArrivedAtHallCall => "ArrivedAtHallCall",
            DispatchPhase::AwaitingDecision => "AwaitingDecision",
            DispatchPhase::BoardingRedirect => "BoardingRedirect",
            DispatchPhase::ServingDestinations => "ServingDestinations",
        };
        write!(f, "{}", phase_str)
    }
}

impl DispatchPhase {
    /// Check if transition to target phase is valid from this phase.
    ///
    /// ```
    /// use elevator_car::DispatchPhase;
    ///
    /// assert!(DispatchPhase::Idle.can_transition_to(&DispatchPhase::ServingHallCalls));
    /// assert!(!DispatchPhase::Idle.can_transition_to(&DispatchPhase::BoardingRedirect));
    /// ```
    pub fn can_transition_to(&self, target: &DispatchPhase) -> bool {
        matches!(
            (self, target),
            (
                DispatchPhase::Idle,
                DispatchPhase::ServingHallCalls | DispatchPhase::ServingDestinations
            ) | (
                DispatchPhase::ServingHallCalls,
                DispatchPhase::ArrivedAtHallCall | DispatchPhase::Idle
            ) | (
                DispatchPhase::ArrivedAtHallCall,
                DispatchPhase::AwaitingDecision | DispatchPhase::ServingHallCalls
            ) | (
                DispatchPhase::AwaitingDecision,
                DispatchPhase::ServingHallCalls | DispatchPhase::BoardingRedirect
            ) | (
                DispatchPhase::BoardingRedirect,
                DispatchPhase::ServingDestinations
            ) | (
                DispatchPhase::ServingDestinations,
                DispatchPhase::ServingHallCalls | DispatchPhase::Idle
            )
        )
    }
}

/// A single phase transition with timestamp.
///
/// The timestamp is not serialized; `Instant` is process-specific.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: DispatchPhase,
    pub to: DispatchPhase,

    #[serde(skip, default = "Instant::now")]
    pub timestamp: Instant,
}

impl PhaseTransition {
    pub fn new(from: DispatchPhase, to: DispatchPhase) -> Self {
        Self {
            from,
            to,
            timestamp: Instant::now(),
        }
    }
}

/// Validated dispatch phase tracking with bounded history.
///
/// Not thread-safe; it lives inside the scheduler, which has a single
/// mutator.
#[derive(Debug)]
pub struct DispatchMachine {
    current_phase: DispatchPhase,
    history: VecDeque<PhaseTransition>,

    /// Set while a destination cycle runs on behalf of a boarding passenger.
    redirected: bool,
}

impl DispatchMachine {
    pub fn new() -> Self {
        Self {
            current_phase: DispatchPhase::Idle,
            history: VecDeque::with_capacity(MAX_PHASE_HISTORY),
            redirected: false,
        }
    }

    pub fn current_phase(&self) -> DispatchPhase {
        self.current_phase
    }

    /// Recent transitions, oldest first.
    pub fn history(&self) -> &VecDeque<PhaseTransition> {
        &self.history
    }

    /// Sequence of phases entered, oldest first.
    pub fn visited_phases(&self) -> Vec<DispatchPhase> {
        self.history.iter().map(|t| t.to).collect()
    }

    /// Whether the running destination cycle was started by a boarding.
    pub fn is_redirected(&self) -> bool {
        self.redirected
    }

    /// Transition to a new phase, validating the transition.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPhaseTransition` if the transition is not
    /// allowed from the current phase.
    pub fn transition_to(&mut self, new_phase: DispatchPhase) -> Result<PhaseTransition> {
        if !self.current_phase.can_transition_to(&new_phase) {
            return Err(Error::InvalidPhaseTransition {
                from: self.current_phase.to_string(),
                to: new_phase.to_string(),
            });
        }

        match (self.current_phase, new_phase) {
            (DispatchPhase::BoardingRedirect, DispatchPhase::ServingDestinations) => {
                self.redirected = true;
            }
            (DispatchPhase::ServingDestinations, DispatchPhase::ServingHallCalls)
                if !self.redirected =>
            {
                return Err(Error::InvalidPhaseTransition {
                    from: self.current_phase.to_string(),
                    to: new_phase.to_string(),
                });
            }
            (DispatchPhase::ServingDestinations, DispatchPhase::Idle) if self.redirected => {
                return Err(Error::InvalidPhaseTransition {
                    from: self.current_phase.to_string(),
                    to: new_phase.to_string(),
                });
            }
            (DispatchPhase::ServingDestinations, _) => self.redirected = false,
            _ => {}
        }

        let transition = PhaseTransition::new(self.current_phase, new_phase);
        self.perform_phase_change(new_phase, transition.clone());
        tracing::debug!(from = %transition.from, to = %transition.to, "Dispatch phase changed");

        Ok(transition)
    }

    /// Leave `ServingDestinations` for wherever the cycle came from.
    ///
    /// # Errors
    ///
    /// Returns an error if the machine is not serving destinations.
    pub fn finish_destinations(&mut self) -> Result<PhaseTransition> {
        let next = if self.redirected {
            DispatchPhase::ServingHallCalls
        } else {
            DispatchPhase::Idle
        };
        self.transition_to(next)
    }

    /// Force the machine back to `Idle`, used after an aborted batch.
    pub fn reset(&mut self) -> PhaseTransition {
        let transition = PhaseTransition::new(self.current_phase, DispatchPhase::Idle);
        self.redirected = false;
        self.perform_phase_change(DispatchPhase::Idle, transition.clone());
        transition
    }

    fn perform_phase_change(&mut self, new_phase: DispatchPhase, transition: PhaseTransition) {
        self.current_phase = new_phase;

        self.history.push_back(transition);
        if self.history.len() > MAX_PHASE_HISTORY {
            self.history.pop_front();
        }
    }
}

impl Default for DispatchMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_awaiting_decision() -> DispatchMachine {
        let mut machine = DispatchMachine::new();
        machine.transition_to(DispatchPhase::ServingHallCalls).unwrap();
        machine.transition_to(DispatchPhase::ArrivedAtHallCall).unwrap();
        machine.transition_to(DispatchPhase::AwaitingDecision).unwrap();
        machine
    }

    #[test]
    fn test_new_machine_starts_idle() {
        let machine = DispatchMachine::new();
        assert_eq!(machine.current_phase(), DispatchPhase::Idle);
        assert!(machine.history().is_empty());
        assert!(!machine.is_redirected());
    }

    #[test]
    fn test_hall_cycle_without_boarding() {
        let mut machine = machine_awaiting_decision();
        machine.transition_to(DispatchPhase::ServingHallCalls).unwrap();
        machine.transition_to(DispatchPhase::Idle).unwrap();

        assert_eq!(
            machine.visited_phases(),
            vec![
                DispatchPhase::ServingHallCalls,
                DispatchPhase::ArrivedAtHallCall,
                DispatchPhase::AwaitingDecision,
                DispatchPhase::ServingHallCalls,
                DispatchPhase::Idle,
            ]
        );
    }

    #[test]
    fn test_boarding_redirect_returns_to_hall_calls() {
        let mut machine = machine_awaiting_decision();
        machine.transition_to(DispatchPhase::BoardingRedirect).unwrap();
        machine.transition_to(DispatchPhase::ServingDestinations).unwrap();
        assert!(machine.is_redirected());

        let transition = machine.finish_destinations().unwrap();
        assert_eq!(transition.from, DispatchPhase::ServingDestinations);
        assert_eq!(transition.to, DispatchPhase::ServingHallCalls);
        assert!(!machine.is_redirected());
    }

    #[test]
    fn test_redirected_cycle_cannot_go_idle() {
        let mut machine = machine_awaiting_decision();
        machine.transition_to(DispatchPhase::BoardingRedirect).unwrap();
        machine.transition_to(DispatchPhase::ServingDestinations).unwrap();

        let result = machine.transition_to(DispatchPhase::Idle);
        assert!(matches!(result, Err(Error::InvalidPhaseTransition { .. })));
        assert_eq!(machine.current_phase(), DispatchPhase::ServingDestinations);
    }

    #[test]
    fn test_direct_destination_cycle_returns_to_idle() {
        let mut machine = DispatchMachine::new();
        machine.transition_to(DispatchPhase::ServingDestinations).unwrap();
        assert!(!machine.is_redirected());

        assert!(machine.transition_to(DispatchPhase::ServingHallCalls).is_err());
        assert_eq!(machine.finish_destinations().unwrap().to, DispatchPhase::Idle);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut machine = DispatchMachine::new();
        assert!(machine.transition_to(DispatchPhase::AwaitingDecision).is_err());
        assert!(machine.transition_to(DispatchPhase::BoardingRedirect).is_err());
        assert!(machine.transition_to(DispatchPhase::Idle).is_err());
        assert!(machine.history().is_empty());
    }

    #[test]
    fn test_error_message_names_phases() {
        let mut machine = DispatchMachine::new();
        let err = machine
            .transition_to(DispatchPhase::BoardingRedirect)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid phase transition from Idle to BoardingRedirect"
        );
    }

    #[test]
    fn test_reset_from_any_phase() {
        let mut machine = machine_awaiting_decision();
        machine.transition_to(DispatchPhase::BoardingRedirect).unwrap();
        machine.transition_to(DispatchPhase::ServingDestinations).unwrap();

        let transition = machine.reset();
        assert_eq!(transition.from, DispatchPhase::ServingDestinations);
        assert_eq!(machine.current_phase(), DispatchPhase::Idle);
        assert!(!machine.is_redirected());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut machine = DispatchMachine::new();
        for _ in 0..MAX_PHASE_HISTORY {
            machine.transition_to(DispatchPhase::ServingDestinations).unwrap();
            machine.transition_to(DispatchPhase::Idle).unwrap();
        }
        assert_eq!(machine.history().len(), MAX_PHASE_HISTORY);
        assert_eq!(machine.history().back().unwrap().to, DispatchPhase::Idle);
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&DispatchPhase::BoardingRedirect).unwrap();
        assert_eq!(json, "\"boarding_redirect\"");
    }
}
