//! Fixed-interval tick driver.
//!
//! The [`Simulation`] is moved onto a single worker thread that owns it
//! outright. Control-panel commands arrive over a channel and are applied
//! between ticks; after every tick the worker publishes a [`Snapshot`] for the
//! render adapter. The snapshot channel holds a single frame: while the render
//! side has not picked it up, newer frames are dropped. Stopping (or dropping)
//! the driver joins the worker, so no tick can fire after teardown.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender, TryRecvError, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::{
    error::LabError,
    render::Snapshot,
    simulation::{Command, Simulation},
};

enum Message {
    Command(Command),
    Shutdown,
}

/// Handle to a running tick worker.
#[derive(Debug)]
pub struct Driver {
    tx: Sender<Message>,
    worker: Option<JoinHandle<Simulation>>,
}

impl Driver {
    /// Tick interval matching [`Simulation::TIME_STEP`].
    pub fn default_interval() -> Duration {
        Duration::from_secs_f32(Simulation::TIME_STEP)
    }

    /// Most commands applied before a tick that is already due.
    pub const MAX_COMMANDS_PER_TICK: usize = 64;

    /// Starts ticking `sim` every `interval`. The receiver yields at most one
    /// pending snapshot; ticks that find it unread drop their frame.
    pub fn spawn(sim: Simulation, interval: Duration) -> (Self, Receiver<Snapshot>) {
        let (tx, rx) = mpsc::channel();
        let (frames_tx, frames_rx) = mpsc::sync_channel(1);

        let worker = thread::spawn(move || run(sim, interval, rx, frames_tx));

        info!("tick driver started at {:?} per tick", interval);
        (
            Self {
                tx,
                worker: Some(worker),
            },
            frames_rx,
        )
    }

    /// Queues a command for the worker. Fails once the worker has exited.
    pub fn send(&self, command: Command) -> Result<(), LabError> {
        self.tx
            .send(Message::Command(command))
            .map_err(|_| LabError::DriverStopped)
    }

    pub fn apply_impulse(&self) -> Result<(), LabError> {
        self.send(Command::ApplyImpulse)
    }

    pub fn reset(&self) -> Result<(), LabError> {
        self.send(Command::Reset)
    }

    /// Stops the worker and hands back the simulation in its final state.
    pub fn stop(mut self) -> Option<Simulation> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<Simulation> {
        let worker = self.worker.take()?;
        // The worker may already be gone if the render side hung up.
        let _ = self.tx.send(Message::Shutdown);
        let sim = worker.join().ok();
        info!("tick driver stopped");
        sim
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(
    mut sim: Simulation,
    interval: Duration,
    rx: Receiver<Message>,
    frames: SyncSender<Snapshot>,
) -> Simulation {
    let mut next = Instant::now() + interval;

    loop {
        let wait = next.saturating_duration_since(Instant::now());
        match rx.recv_timeout(wait) {
            Ok(Message::Command(command)) => {
                sim.apply(command);
                if Instant::now() < next {
                    continue;
                }
            }
            Ok(Message::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        // The tick is due: take what is already queued, then step.
        for _ in 0..Driver::MAX_COMMANDS_PER_TICK {
            match rx.try_recv() {
                Ok(Message::Command(command)) => sim.apply(command),
                Ok(Message::Shutdown) | Err(TryRecvError::Disconnected) => return sim,
                Err(TryRecvError::Empty) => break,
            }
        }

        sim.step();
        match frames.try_send(sim.snapshot()) {
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => {
                debug!("snapshot receiver dropped, stopping");
                break;
            }
        }

        next += interval;
        // Re-anchor instead of replaying missed ticks.
        let now = Instant::now();
        if next < now {
            next = now + interval;
        }
    }

    sim
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Param;

    const FAST: Duration = Duration::from_millis(1);
    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn inactive_frames_do_not_move() {
        let (driver, frames) = Driver::spawn(Simulation::new(), FAST);
        let first = frames.recv_timeout(WAIT).unwrap();
        let later = frames.iter().nth(5).unwrap();
        assert!(!first.active);
        assert_eq!(first.pos, later.pos);
        driver.stop();
    }

    #[test]
    fn commands_apply_between_ticks() {
        let (driver, frames) = Driver::spawn(Simulation::new(), FAST);
        driver.send(Command::Configure(Param::Gravity, 0.0)).unwrap();
        driver.apply_impulse().unwrap();

        let moving = frames.iter().find(|s| s.active).unwrap();
        assert!(moving.vel.y < 0.0);

        let sim = driver.stop().unwrap();
        assert!(sim.active);
        assert_eq!(sim.params.gravity, 0.0);
    }

    #[test]
    fn no_frames_after_stop() {
        let (driver, frames) = Driver::spawn(Simulation::new(), FAST);
        frames.recv_timeout(WAIT).unwrap();
        driver.stop();

        // Drain what was already queued; the channel then reports disconnection.
        while frames.try_recv().is_ok() {}
        assert!(matches!(
            frames.recv_timeout(Duration::from_millis(20)),
            Err(RecvTimeoutError::Disconnected)
        ));
    }

    #[test]
    fn unread_frames_do_not_pile_up() {
        let (driver, frames) = Driver::spawn(Simulation::new(), FAST);
        thread::sleep(Duration::from_millis(100));
        driver.stop();
        assert!(frames.try_iter().count() <= 1);
    }

    #[test]
    fn command_flood_does_not_starve_ticks() {
        let (driver, frames) = Driver::spawn(Simulation::new(), Duration::from_millis(5));
        let end = Instant::now() + Duration::from_millis(200);
        let mut ticks = 0;

        thread::scope(|s| {
            s.spawn(|| {
                while Instant::now() < end {
                    for _ in 0..100 {
                        let _ = driver.send(Command::Configure(Param::Gravity, 9.8));
                    }
                    thread::sleep(Duration::from_micros(50));
                }
            });
            while Instant::now() < end {
                if frames.recv_timeout(Duration::from_millis(50)).is_ok() {
                    ticks += 1;
                }
            }
        });

        assert!(ticks >= 5, "only {} ticks ran during the flood", ticks);
        driver.stop();
    }

    #[test]
    fn dropping_the_receiver_stops_the_worker() {
        let (driver, frames) = Driver::spawn(Simulation::new(), FAST);
        drop(frames);
        // The worker exits on its next tick; the driver then refuses commands.
        let deadline = Instant::now() + WAIT;
        while driver.reset().is_ok() {
            assert!(Instant::now() < deadline, "worker never stopped");
            thread::sleep(FAST);
        }
        assert_eq!(driver.reset(), Err(LabError::DriverStopped));
    }
}
