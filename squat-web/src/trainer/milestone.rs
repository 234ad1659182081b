//! Milestone emitter
//!
//! Fires a celebration every N completed reps and owns the countdown that
//! keeps the milestone message on screen. There is no queue: a milestone
//! that fires while another is still displayed overwrites its countdown and
//! message.

use tracing::info;

/// Fired on the frame a milestone is reached
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MilestoneEvent {
    /// Rep count that triggered the milestone
    pub count: u32,
    /// Frames the message stays on screen
    pub display_frames: u32,
}

impl MilestoneEvent {
    pub fn message(&self) -> String {
        format!("🎉 {} REPS DONE! GREAT JOB!", self.count)
    }
}

#[derive(Debug)]
pub struct MilestoneEmitter {
    interval: u32,
    display_frames: u32,
    /// Frames left for the current message
    countdown: u32,
    last: Option<MilestoneEvent>,
}

impl MilestoneEmitter {
    pub fn new(interval: u32, display_frames: u32) -> Self {
        Self {
            interval,
            display_frames,
            countdown: 0,
            last: None,
        }
    }

    /// Called with the new count after every completed rep
    pub fn on_rep(&mut self, count: u32) -> Option<MilestoneEvent> {
        if count == 0 || self.interval == 0 || count % self.interval != 0 {
            return None;
        }

        let event = MilestoneEvent {
            count,
            display_frames: self.display_frames,
        };
        info!(count, "milestone reached");

        self.countdown = self.display_frames;
        self.last = Some(event);
        Some(event)
    }

    /// Once per frame, whatever the phase
    pub fn tick(&mut self) {
        self.countdown = self.countdown.saturating_sub(1);
    }

    pub fn is_active(&self) -> bool {
        self.countdown > 0
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// The milestone currently on screen, if any
    pub fn active(&self) -> Option<&MilestoneEvent> {
        if self.is_active() {
            self.last.as_ref()
        } else {
            None
        }
    }
}

impl Default for MilestoneEmitter {
    fn default() -> Self {
        Self::new(15, 60)
    }
}
