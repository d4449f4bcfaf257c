//! FIFO lockout gate guarding access to the shared upstream rate limit.
//!
//! A [`LockoutGate`] hands out at most one [`LockoutPermit`] at a time. Callers that cannot be
//! admitted immediately are queued by arrival order and released one by one: the holder's
//! release step wakes exactly the next waiter in line, never a broadcast.
//!
//! Any party may call [`LockoutGate::lockout_for`] to block *new* admissions for a while.
//! Lockouts stack independently; the gate stays locked until the last of them expires.
//! A lockout never revokes a permit that was already granted.
//!
//! Lockouts live in an arena of deadlines keyed by id. An entry leaves the arena exactly once,
//! when the first gate operation observes that its deadline has passed. Waiters sleep until
//! the latest deadline and re-check on wake, so a lockout imposed while they sleep still
//! applies to them.
//!
//! Dropping an `acquire` future before it resolves removes only that caller's queue entry.
//! When the dropped caller was first in line and nobody holds the gate, the next waiter is
//! woken so the queue never stalls.

// crates.io
use tokio::{
	sync::Notify,
	time::{self, Instant},
};
// self
use crate::_prelude::*;

type Ticket = u64;
type LockoutId = u64;

// Keeps `Instant` arithmetic in range for absurdly long lockouts.
const MAX_LOCKOUT: StdDuration = StdDuration::from_secs(60 * 60 * 24 * 365);

/// Shared admission gate with timed lockouts and FIFO fairness.
///
/// The gate is exclusive: at most one permit is outstanding, so at most one request guarded
/// by it is in flight at any time. Multi-page operations built on top of it, such as
/// paginated rankings, therefore run their pages one after another.
///
/// Cloning is cheap; every clone refers to the same gate.
#[derive(Clone, Default)]
pub struct LockoutGate(Arc<Mutex<GateState>>);
impl LockoutGate {
	/// Creates an unlocked gate with no waiters.
	pub fn new() -> Self {
		Self::default()
	}

	/// Blocks new admissions for `duration`.
	///
	/// The lockout is registered before this call returns. Overlapping lockouts are kept
	/// separately and never merged, so the gate reopens only once the latest one expires.
	/// A zero duration expires immediately.
	pub fn lockout_for(&self, duration: StdDuration) {
		let now = Instant::now();
		let deadline = now + duration.min(MAX_LOCKOUT);
		let mut state = self.0.lock();

		state.prune(now);
		state.insert_lockout(deadline);
	}

	/// Waits for admission and returns the permit that represents it.
	///
	/// Resolves without suspending when the gate is unlocked, idle, and nobody is queued.
	/// Otherwise the caller joins the back of the queue and is admitted once every active
	/// lockout has expired, it is first in line, and no other permit is outstanding.
	pub async fn acquire(&self) -> LockoutPermit {
		let (ticket, notify) = {
			let mut state = self.0.lock();

			if state.admits_immediately(Instant::now()) {
				state.held = true;

				return LockoutPermit::new(self.clone());
			}

			state.enqueue()
		};
		let mut waiter = QueuedWaiter { gate: self, ticket, armed: true };

		loop {
			let step = {
				let mut state = self.0.lock();

				if let Some(deadline) = state.locked_until(Instant::now()) {
					WaitStep::Sleep(deadline)
				} else if !state.held && state.is_front(ticket) {
					state.waiters.remove(&ticket);
					state.held = true;

					WaitStep::Granted
				} else {
					WaitStep::Park
				}
			};

			match step {
				WaitStep::Sleep(deadline) => time::sleep_until(deadline).await,
				WaitStep::Park => notify.notified().await,
				WaitStep::Granted => {
					waiter.disarm();

					return LockoutPermit::new(self.clone());
				},
			}
		}
	}

	/// Returns a permit only if it can be granted without waiting.
	pub fn try_acquire(&self) -> Option<LockoutPermit> {
		let mut state = self.0.lock();

		if state.admits_immediately(Instant::now()) {
			state.held = true;

			Some(LockoutPermit::new(self.clone()))
		} else {
			None
		}
	}

	/// Runs `fut` while holding a permit, releasing it once the future completes.
	pub async fn scoped<F>(&self, fut: F) -> F::Output
	where
		F: Future,
	{
		let _permit = self.acquire().await;

		fut.await
	}

	/// Returns `true` while at least one lockout is active.
	pub fn is_locked(&self) -> bool {
		self.locked_until().is_some()
	}

	/// Returns the instant the latest active lockout expires, if any.
	pub fn locked_until(&self) -> Option<Instant> {
		self.0.lock().locked_until(Instant::now())
	}

	/// Number of lockouts that have not expired yet.
	pub fn active_lockouts(&self) -> usize {
		let mut state = self.0.lock();

		state.prune(Instant::now());

		state.lockouts.len()
	}

	/// Number of callers queued for admission.
	pub fn waiting(&self) -> usize {
		self.0.lock().waiters.len()
	}

	/// Returns `true` while a permit is outstanding.
	pub fn is_held(&self) -> bool {
		self.0.lock().held
	}
}
impl Debug for LockoutGate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut state = self.0.lock();

		state.prune(Instant::now());

		f.debug_struct("LockoutGate")
			.field("lockouts", &state.lockouts.len())
			.field("waiters", &state.waiters.len())
			.field("held", &state.held)
			.finish()
	}
}

/// Proof of admission through a [`LockoutGate`].
///
/// Dropping the permit releases the gate and wakes the next queued caller, if any.
#[must_use = "the gate is released as soon as the permit is dropped"]
pub struct LockoutPermit {
	gate: LockoutGate,
}
impl LockoutPermit {
	fn new(gate: LockoutGate) -> Self {
		Self { gate }
	}

	/// Gate this permit was issued by.
	pub fn gate(&self) -> &LockoutGate {
		&self.gate
	}
}
impl Debug for LockoutPermit {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("LockoutPermit(..)")
	}
}
impl Drop for LockoutPermit {
	fn drop(&mut self) {
		let mut state = self.gate.0.lock();

		state.held = false;
		state.notify_front();
	}
}

#[derive(Debug, Default)]
struct GateState {
	lockouts: HashMap<LockoutId, Instant>,
	next_lockout: LockoutId,
	waiters: BTreeMap<Ticket, Arc<Notify>>,
	next_ticket: Ticket,
	held: bool,
}
impl GateState {
	fn prune(&mut self, now: Instant) {
		self.lockouts.retain(|_, deadline| *deadline > now);
	}

	fn insert_lockout(&mut self, deadline: Instant) {
		let id = self.next_lockout;

		self.next_lockout += 1;
		self.lockouts.insert(id, deadline);
	}

	fn locked_until(&mut self, now: Instant) -> Option<Instant> {
		self.prune(now);

		self.lockouts.values().max().copied()
	}

	fn admits_immediately(&mut self, now: Instant) -> bool {
		self.prune(now);

		self.lockouts.is_empty() && self.waiters.is_empty() && !self.held
	}

	fn enqueue(&mut self) -> (Ticket, Arc<Notify>) {
		let ticket = self.next_ticket;
		let notify = Arc::new(Notify::new());

		self.next_ticket += 1;
		self.waiters.insert(ticket, notify.clone());

		(ticket, notify)
	}

	fn is_front(&self, ticket: Ticket) -> bool {
		self.waiters.keys().next() == Some(&ticket)
	}

	fn notify_front(&self) {
		if let Some(notify) = self.waiters.values().next() {
			notify.notify_one();
		}
	}
}

enum WaitStep {
	Sleep(Instant),
	Park,
	Granted,
}

/// Queue entry owned by a pending `acquire` call; removes itself if the call is dropped.
struct QueuedWaiter<'a> {
	gate: &'a LockoutGate,
	ticket: Ticket,
	armed: bool,
}
impl QueuedWaiter<'_> {
	fn disarm(&mut self) {
		self.armed = false;
	}
}
impl Drop for QueuedWaiter<'_> {
	fn drop(&mut self) {
		if !self.armed {
			return;
		}

		let mut state = self.gate.0.lock();
		let was_front = state.is_front(self.ticket);

		state.waiters.remove(&self.ticket);

		if was_front && !state.held {
			state.notify_front();
		}
	}
}
