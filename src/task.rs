//! # Task Slots
//!
//! Defines the task model for TickOS. A task is a periodic job: a
//! zero-argument callback plus the bookkeeping the scheduler needs to run
//! it every `interval_ticks` ticks.
//!
//! ## Callbacks
//!
//! Two kinds of callback are accepted, both invoked with no arguments:
//! - **Plain functions** (`fn()`): allocation-free and `'static`, the
//!   natural fit for the global, interrupt-driven kernel instance.
//! - **Stateful tasks** (`&mut dyn Task`): anything implementing [`Task`],
//!   including closures, borrowed for the scheduler's lifetime.

// ---------------------------------------------------------------------------
// Task capability
// ---------------------------------------------------------------------------

/// A unit of periodic work.
///
/// Implemented for every `FnMut()`, so closures can be registered directly.
/// `run` must return; a task that never returns stalls every later tick.
pub trait Task {
    /// Execute one period's worth of work.
    fn run(&mut self);
}

impl<F: FnMut()> Task for F {
    #[inline]
    fn run(&mut self) {
        self()
    }
}

/// The callable bound to a slot at registration.
pub enum Callback<'a> {
    /// A plain function pointer.
    Fn(fn()),
    /// A borrowed stateful task.
    Task(&'a mut (dyn Task + Send)),
}

impl Callback<'_> {
    /// Invoke the callback once, synchronously.
    #[inline]
    pub fn invoke(&mut self) {
        match self {
            Callback::Fn(f) => f(),
            Callback::Task(task) => task.run(),
        }
    }
}

impl From<fn()> for Callback<'_> {
    fn from(f: fn()) -> Self {
        Callback::Fn(f)
    }
}

impl<'a, T: Task + Send + 'a> From<&'a mut T> for Callback<'a> {
    fn from(task: &'a mut T) -> Self {
        Callback::Task(task)
    }
}

// ---------------------------------------------------------------------------
// Task identifier
// ---------------------------------------------------------------------------

/// Stable identifier of a registered task: its slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskId(pub(crate) usize);

impl TaskId {
    /// Slot index in the scheduler's table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Task slot
// ---------------------------------------------------------------------------

/// One position in the scheduler's fixed task table.
///
/// A slot is either free (`active == false`, no callback) or holds a live
/// task whose `counter` stays in `1..=interval_ticks` between updates.
pub(crate) struct TaskSlot<'a> {
    /// Ticks between executions. Never zero for an active slot.
    pub(crate) interval_ticks: u32,
    /// Ticks left until the next execution.
    pub(crate) counter: u32,
    pub(crate) callback: Option<Callback<'a>>,
    pub(crate) active: bool,
    /// Lower value runs first within a tick.
    pub(crate) priority: u8,
    /// Completed executions, wrapping.
    pub(crate) run_count: u32,
}

impl<'a> TaskSlot<'a> {
    /// An unallocated slot. Used to initialize the table.
    pub(crate) const EMPTY: Self = Self {
        interval_ticks: 0,
        counter: 0,
        callback: None,
        active: false,
        priority: 0,
        run_count: 0,
    };

    /// Bind a task to this slot. The first execution happens after one
    /// full interval.
    pub(crate) fn assign(&mut self, interval_ticks: u32, callback: Callback<'a>, priority: u8) {
        self.interval_ticks = interval_ticks;
        self.counter = interval_ticks;
        self.callback = Some(callback);
        self.priority = priority;
        self.run_count = 0;
        self.active = true;
    }

    /// Count down one tick. Returns `true` when the task is due.
    #[inline]
    pub(crate) fn tick(&mut self) -> bool {
        self.counter = self.counter.saturating_sub(1);
        self.counter == 0
    }

    /// Run the callback and rearm the countdown.
    pub(crate) fn dispatch(&mut self) {
        if let Some(callback) = self.callback.as_mut() {
            callback.invoke();
        }
        self.counter = self.interval_ticks;
        self.run_count = self.run_count.wrapping_add(1);
    }

    /// Snapshot of the slot's public state.
    pub(crate) fn info(&self, id: TaskId) -> TaskInfo {
        TaskInfo {
            id,
            interval_ticks: self.interval_ticks,
            ticks_until_run: self.counter,
            priority: self.priority,
            run_count: self.run_count,
        }
    }
}

/// Read-only view of a registered task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskInfo {
    pub id: TaskId,
    pub interval_ticks: u32,
    pub ticks_until_run: u32,
    pub priority: u8,
    pub run_count: u32,
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
