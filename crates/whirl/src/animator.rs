use crate::choice::Choice;
use crate::physics::{Physics, SpeedSource};
use crate::segment;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelError {
    #[error("Invalid configuration: the wheel has no options")]
    InvalidConfiguration,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelState {
    /// Pointer angle in degrees. Accumulates across spins and is only reduced when mapped.
    pub angle: f64,
    pub speed: f64,
    pub deceleration: f64,
}

/// Identifies one spin. Tickets from earlier spins are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpinTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub index: usize,
    pub choice: Choice,
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    Advanced { angle: f64 },
    Resolved(Resolution),
    /// The ticket is from an older spin, or its spin already resolved.
    Stale,
}

impl StepResult {
    pub fn should_reschedule(&self) -> bool {
        matches!(self, Self::Advanced { .. })
    }
}

pub struct Animator<S> {
    choices: Vec<Choice>,
    physics: Physics,
    source: S,
    state: WheelState,
    generation: u64,
    initial_speed: f64,
    steps: u32,
    resolved: bool,
}

impl<S: SpeedSource> Animator<S> {
    /// Physics values that would stall the wheel are replaced with the defaults.
    pub fn new(choices: Vec<Choice>, physics: Physics, source: S) -> Result<Self, WheelError> {
        if choices.is_empty() {
            return Err(WheelError::InvalidConfiguration);
        }

        Ok(Self {
            choices,
            physics: physics.sanitized(),
            source,
            state: WheelState::default(),
            generation: 0,
            initial_speed: 0.0,
            steps: 0,
            // nothing to resolve before the first spin
            resolved: true,
        })
    }

    /// Starts a new spin from the current angle, superseding any spin still in flight.
    pub fn spin(&mut self) -> Result<SpinTicket, WheelError> {
        if self.choices.is_empty() {
            return Err(WheelError::InvalidConfiguration);
        }

        if !self.resolved {
            log::debug!("Spin {} superseded before resolving", self.generation);
        }

        let speed = self
            .source
            .initial_speed(self.physics.speed_min, self.physics.speed_max);

        self.generation += 1;
        self.initial_speed = speed.max(0.0);
        self.steps = 0;
        self.resolved = false;
        self.state.speed = self.initial_speed;
        self.state.deceleration = self.physics.deceleration;

        log::debug!(
            "Spin {} from {:.1}° at {:.2}°/step",
            self.generation,
            self.state.angle,
            self.state.speed
        );

        Ok(SpinTicket {
            generation: self.generation,
        })
    }

    pub fn step(&mut self, ticket: SpinTicket) -> StepResult {
        if !self.is_current(ticket) {
            return StepResult::Stale;
        }

        self.state.angle += self.state.speed;
        self.steps += 1;
        // recomputed from the step count so float error doesn't add a step
        self.state.speed = if self.state.speed > 0.0 {
            self.initial_speed - f64::from(self.steps) * self.state.deceleration
        } else {
            -self.state.deceleration
        };

        if self.state.speed > 0.0 {
            return StepResult::Advanced {
                angle: self.state.angle,
            };
        }

        self.state.speed = 0.0;
        self.resolve()
    }

    /// Zeroes the speed and runs one final step.
    pub fn force_stop(&mut self, ticket: SpinTicket) -> StepResult {
        if !self.is_current(ticket) {
            return StepResult::Stale;
        }

        log::debug!("Forcing spin {} to stop", self.generation);
        self.state.speed = 0.0;
        self.step(ticket)
    }

    fn is_current(&self, ticket: SpinTicket) -> bool {
        let current = ticket.generation == self.generation && !self.resolved;
        if !current {
            log::debug!(
                "Ignoring stale tick for spin {} (current {}, resolved {})",
                ticket.generation,
                self.generation,
                self.resolved
            );
        }
        current
    }

    fn resolve(&mut self) -> StepResult {
        let index = match segment::index(self.state.angle, self.choices.len()) {
            Ok(i) => i,
            Err(e) => {
                log::error!("Cannot resolve spin {}: {}", self.generation, e);
                self.resolved = true;
                return StepResult::Stale;
            }
        };

        self.resolved = true;
        let choice = self.choices[index].clone();
        log::info!(
            "Spin {} stopped at {:.1}° after {} steps: {}",
            self.generation,
            segment::normalize(self.state.angle),
            self.steps,
            choice.name
        );

        StepResult::Resolved(Resolution {
            index,
            choice,
            angle: self.state.angle,
        })
    }
}

impl<S> Animator<S> {
    pub fn angle(&self) -> f64 {
        self.state.angle
    }

    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn is_spinning(&self) -> bool {
        !self.resolved
    }

    /// Ticket of the most recent spin, resolved or not. `None` before the first spin.
    pub fn latest_ticket(&self) -> Option<SpinTicket> {
        (self.generation > 0).then_some(SpinTicket {
            generation: self.generation,
        })
    }
}
