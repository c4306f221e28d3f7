//! Glue between the animator and whatever timer and display host it.

use crate::animator::{Animator, SpinTicket, StepResult};
use crate::choice::Choice;
use crate::physics::SpeedSource;

/// What the host draws. `show_result` is called once per spin.
///
/// Both calls carry the spin's ticket. A host that queues them before drawing must drop any
/// whose ticket is no longer [`Animator::latest_ticket`], since a new spin may have started
/// while they waited.
pub trait Surface {
    fn draw_pointer(&mut self, ticket: SpinTicket, angle: f64);
    fn show_result(&mut self, ticket: SpinTicket, choice: &Choice);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Reschedule,
    Done,
}

pub fn tick<S, H>(animator: &mut Animator<S>, ticket: SpinTicket, surface: &mut H) -> Tick
where
    S: SpeedSource,
    H: Surface + ?Sized,
{
    route(animator.step(ticket), ticket, surface)
}

pub fn force_stop<S, H>(animator: &mut Animator<S>, ticket: SpinTicket, surface: &mut H) -> Tick
where
    S: SpeedSource,
    H: Surface + ?Sized,
{
    route(animator.force_stop(ticket), ticket, surface)
}

fn route<H: Surface + ?Sized>(result: StepResult, ticket: SpinTicket, surface: &mut H) -> Tick {
    match result {
        StepResult::Advanced { angle } => {
            surface.draw_pointer(ticket, angle);
            Tick::Reschedule
        }
        StepResult::Resolved(resolution) => {
            surface.draw_pointer(ticket, resolution.angle);
            surface.show_result(ticket, &resolution.choice);
            Tick::Done
        }
        StepResult::Stale => Tick::Done,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::tests::{FixedSpeed, animator};
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Recorder {
        pointer: Vec<f64>,
        results: Vec<String>,
    }

    impl Surface for Recorder {
        fn draw_pointer(&mut self, _ticket: SpinTicket, angle: f64) {
            self.pointer.push(angle);
        }

        fn show_result(&mut self, _ticket: SpinTicket, choice: &Choice) {
            self.results.push(choice.name.to_string());
        }
    }

    /// Host messages, delivered in order some time after they are sent.
    #[derive(Debug)]
    enum Msg {
        Start,
        Pointer(SpinTicket, f64),
        Resolved(SpinTicket, String),
    }

    #[derive(Default)]
    struct Mailbox {
        queue: VecDeque<Msg>,
        pointer: Option<f64>,
        shown: Vec<String>,
    }

    impl Surface for Mailbox {
        fn draw_pointer(&mut self, ticket: SpinTicket, angle: f64) {
            self.queue.push_back(Msg::Pointer(ticket, angle));
        }

        fn show_result(&mut self, ticket: SpinTicket, choice: &Choice) {
            self.queue
                .push_back(Msg::Resolved(ticket, choice.name.to_string()));
        }
    }

    impl Mailbox {
        /// Handles queued messages the way the window does, returning tickets of spins started.
        fn drain(&mut self, animator: &mut Animator<FixedSpeed>) -> Vec<SpinTicket> {
            let mut started = Vec::new();
            while let Some(msg) = self.queue.pop_front() {
                match msg {
                    Msg::Start => {
                        self.shown.clear();
                        started.push(animator.spin().unwrap());
                    }
                    Msg::Pointer(ticket, angle) => {
                        if animator.latest_ticket() == Some(ticket) {
                            self.pointer = Some(angle);
                        }
                    }
                    Msg::Resolved(ticket, name) => {
                        if animator.latest_ticket() == Some(ticket) {
                            self.shown.push(name);
                        }
                    }
                }
            }
            started
        }
    }

    #[derive(Debug, Clone, Copy)]
    enum Timer {
        Step(SpinTicket),
        ForceStop(SpinTicket),
    }

    /// A single-threaded event loop with a virtual clock.
    #[derive(Default)]
    struct Loop {
        now: u64,
        queue: VecDeque<(u64, Timer)>,
    }

    impl Loop {
        fn schedule(&mut self, delay: u64, timer: Timer) {
            let due = self.now + delay;
            let pos = self
                .queue
                .iter()
                .position(|(t, _)| *t > due)
                .unwrap_or(self.queue.len());
            self.queue.insert(pos, (due, timer));
        }

        fn start(&mut self, animator: &mut Animator<FixedSpeed>, stop_after: u64) {
            let ticket = animator.spin().unwrap();
            self.schedule(20, Timer::Step(ticket));
            self.schedule(stop_after, Timer::ForceStop(ticket));
        }

        fn run_until(
            &mut self,
            until: u64,
            animator: &mut Animator<FixedSpeed>,
            surface: &mut Recorder,
        ) {
            while let Some(&(due, timer)) = self.queue.front() {
                if due > until {
                    break;
                }
                self.queue.pop_front();
                self.now = due;
                match timer {
                    Timer::Step(ticket) => {
                        if tick(animator, ticket, surface) == Tick::Reschedule {
                            self.schedule(20, Timer::Step(ticket));
                        }
                    }
                    Timer::ForceStop(ticket) => {
                        force_stop(animator, ticket, surface);
                    }
                }
            }
            self.now = self.now.max(until);
        }
    }

    #[test]
    fn test_pointer_redrawn_every_step_and_at_resolution() {
        let mut animator = animator(&[1.0], 0.25);
        let mut surface = Recorder::default();
        let mut event_loop = Loop::default();

        event_loop.start(&mut animator, 100_000);
        event_loop.run_until(u64::MAX, &mut animator, &mut surface);

        assert_eq!(surface.pointer, vec![1.0, 1.75, 2.25, 2.5]);
        assert_eq!(surface.results, vec!["A"]);
    }

    #[test]
    fn test_forced_stop_wins_the_race_once() {
        // 40 natural steps would take 800ms; the hard bound fires at 100ms
        let mut animator = animator(&[20.0], 0.5);
        let mut surface = Recorder::default();
        let mut event_loop = Loop::default();

        event_loop.start(&mut animator, 100);
        event_loop.run_until(u64::MAX, &mut animator, &mut surface);

        assert_eq!(surface.results.len(), 1);
        assert_eq!(animator.speed(), 0.0);
        // four steps advance; the stop was queued ahead of the step also due at 100ms
        assert_eq!(surface.pointer.len(), 5);
        assert_eq!(surface.pointer[3], surface.pointer[4]);
        assert_eq!(animator.angle(), 20.0 + 19.5 + 19.0 + 18.5);
    }

    #[test]
    fn test_late_forced_stop_is_ignored() {
        let mut animator = animator(&[1.0], 0.5);
        let mut surface = Recorder::default();
        let mut event_loop = Loop::default();

        event_loop.start(&mut animator, 1_000);
        event_loop.run_until(u64::MAX, &mut animator, &mut surface);

        assert_eq!(surface.results, vec!["A"]);
        assert_eq!(surface.pointer.len(), 2);
    }

    #[test]
    fn test_back_to_back_spins_resolve_once() {
        let mut animator = animator(&[20.0, 9.5], 0.5);
        let mut surface = Recorder::default();
        let mut event_loop = Loop::default();

        event_loop.start(&mut animator, 100_000);
        event_loop.run_until(50, &mut animator, &mut surface);
        let first_angle = animator.angle();
        assert_eq!(first_angle, 39.5);

        event_loop.start(&mut animator, 100_000);
        event_loop.run_until(u64::MAX, &mut animator, &mut surface);

        // the second spin adds 95 degrees to wherever the first was cut off
        assert_eq!(surface.results, vec!["B"]);
        assert_eq!(animator.angle(), first_angle + 95.0);
        assert!(event_loop.queue.is_empty());
    }

    #[test]
    fn test_result_queued_behind_start_is_dropped() {
        let mut animator = animator(&[1.0, 9.5], 0.5);
        let mut host = Mailbox::default();

        let first = animator.spin().unwrap();
        assert_eq!(tick(&mut animator, first, &mut host), Tick::Reschedule);
        host.drain(&mut animator);
        assert_eq!(host.pointer, Some(1.0));

        // Start is pressed, and the first spin's last step fires before the queue drains
        host.queue.push_back(Msg::Start);
        assert_eq!(tick(&mut animator, first, &mut host), Tick::Done);
        let started = host.drain(&mut animator);
        assert_eq!(started.len(), 1);
        assert!(host.shown.is_empty(), "stale result shown: {:?}", host.shown);
        assert_eq!(host.pointer, Some(1.0));

        let second = started[0];
        while tick(&mut animator, second, &mut host) == Tick::Reschedule {}
        host.drain(&mut animator);

        assert_eq!(host.shown, vec!["B"]);
        assert_eq!(host.pointer, Some(1.5 + 95.0));
    }
}
