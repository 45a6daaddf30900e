use std::time::Duration;

pub const MAX_RETRIES: u32 = 5;
pub const RETRY_DELAY: Duration = Duration::from_millis(100);
/// Extra wait before the very first draw so entrance transitions can finish.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollStep {
	/// Every watched node is mounted; draw after `delay`.
	Draw { delay: Duration },
	/// Not yet; check again after `delay`.
	Retry { delay: Duration },
	/// Retries exhausted. Nothing is drawn for this mount.
	GiveUp { attempts: u32 },
}

/// Bounded wait for the diagram's nodes to exist in the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadinessPoll {
	retries: u32,
	drawn: bool,
}

impl ReadinessPoll {
	pub fn step(&mut self, all_present: bool) -> PollStep {
		if all_present {
			let delay = if self.drawn {
				Duration::ZERO
			} else {
				SETTLE_DELAY
			};
			PollStep::Draw { delay }
		} else if self.retries < MAX_RETRIES {
			self.retries += 1;
			PollStep::Retry { delay: RETRY_DELAY }
		} else {
			PollStep::GiveUp {
				attempts: self.retries + 1,
			}
		}
	}

	/// Record that a draw happened; later polls skip the settle delay.
	pub fn mark_drawn(&mut self) {
		self.drawn = true;
		self.retries = 0;
	}

	pub fn has_drawn(&self) -> bool {
		self.drawn
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_draw_waits_for_settle() {
		let mut poll = ReadinessPoll::default();
		assert_eq!(poll.step(true), PollStep::Draw { delay: SETTLE_DELAY });
		poll.mark_drawn();
		assert!(poll.has_drawn());
		assert_eq!(poll.step(true), PollStep::Draw {
			delay: Duration::ZERO
		});
	}

	#[test]
	fn retries_are_bounded() {
		let mut poll = ReadinessPoll::default();
		for _ in 0..MAX_RETRIES {
			assert_eq!(poll.step(false), PollStep::Retry { delay: RETRY_DELAY });
		}
		assert_eq!(poll.step(false), PollStep::GiveUp {
			attempts: MAX_RETRIES + 1
		});
		assert_eq!(poll.step(false), PollStep::GiveUp {
			attempts: MAX_RETRIES + 1
		});
	}

	#[test]
	fn late_nodes_still_draw_within_budget() {
		let mut poll = ReadinessPoll::default();
		assert_eq!(poll.step(false), PollStep::Retry { delay: RETRY_DELAY });
		assert_eq!(poll.step(false), PollStep::Retry { delay: RETRY_DELAY });
		assert_eq!(poll.step(true), PollStep::Draw { delay: SETTLE_DELAY });
	}
}
