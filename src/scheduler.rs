//! # Scheduler
//!
//! Core scheduling logic for TickOS. A fixed table of task slots is driven
//! by a single periodic tick; each task runs at its own frequency, derived
//! by integer division of the tick rate.
//!
//! ## Scheduling Algorithm
//!
//! At each tick (`update()`):
//! 1. **Readiness pass**: decrement every active slot's counter; slots that
//!    reach zero are collected into a bounded ready list (table order)
//! 2. **Ordering**: stable insertion sort of the ready list by ascending
//!    priority, so equal priorities keep table order
//! 3. **Dispatch**: run each ready callback to completion, then rearm its
//!    counter to `interval_ticks`
//!
//! ## Timing
//!
//! A task registered at `frequency_hz` gets
//! `interval_ticks = max(1, tick_frequency_hz / frequency_hz)` and first
//! runs after exactly one interval. Remainders are dropped; there is no
//! drift compensation.

use crate::config::MAX_TASKS;
use crate::error::{Result, SchedulerError};
use crate::task::{Callback, TaskId, TaskInfo, TaskSlot};
use crate::{log_debug, log_info, log_trace, log_warn};

// ---------------------------------------------------------------------------
// Scheduler struct
// ---------------------------------------------------------------------------

/// The scheduler state: tick rate plus a fixed-capacity task table.
///
/// ## Design Notes
///
/// - All slots are stored inline (no heap); `N` defaults to [`MAX_TASKS`]
/// - A slot's index is the task's identifier and never changes
/// - Every mutation takes `&mut self`; the global instance in `kernel.rs`
///   wraps one of these in a critical-section mutex
pub struct Scheduler<'a, const N: usize = MAX_TASKS> {
    /// Rate at which `update()` is called, in Hz.
    tick_frequency_hz: u32,

    /// Fixed-size task table.
    slots: [TaskSlot<'a>; N],

    /// Number of `update()` calls since the last `init()`.
    tick_count: u64,
}

impl<'a, const N: usize> Scheduler<'a, N> {
    /// Create an empty scheduler ticking at `tick_frequency_hz`.
    pub const fn new(tick_frequency_hz: u32) -> Self {
        Self {
            tick_frequency_hz,
            slots: [TaskSlot::EMPTY; N],
            tick_count: 0,
        }
    }

    /// Reset to an empty table ticking at `tick_frequency_hz`.
    ///
    /// Discards every prior registration. The rate is not validated: with
    /// a zero rate every later registration is rejected.
    pub fn init(&mut self, tick_frequency_hz: u32) {
        self.tick_frequency_hz = tick_frequency_hz;
        for slot in self.slots.iter_mut() {
            *slot = TaskSlot::EMPTY;
        }
        self.tick_count = 0;
        log_info!("scheduler init: tick={}Hz capacity={}", tick_frequency_hz, N);
    }

    /// Register a periodic task.
    ///
    /// The task runs every `max(1, tick_frequency_hz / frequency_hz)` ticks,
    /// the first time after one full interval. Lower `priority` runs first
    /// when several tasks are due on the same tick.
    ///
    /// # Errors
    /// - [`SchedulerError::InvalidFrequency`] if `frequency_hz` is zero or
    ///   above the tick frequency
    /// - [`SchedulerError::MissingCallback`] if `callback` is `None`
    /// - [`SchedulerError::CapacityExhausted`] if every slot is taken
    ///
    /// The table is left untouched on error.
    pub fn add_task(
        &mut self,
        frequency_hz: u32,
        callback: Option<Callback<'a>>,
        priority: u8,
    ) -> Result<TaskId> {
        if frequency_hz == 0 || frequency_hz > self.tick_frequency_hz {
            return Err(rejected(SchedulerError::InvalidFrequency, frequency_hz));
        }
        let callback = match callback {
            Some(callback) => callback,
            None => return Err(rejected(SchedulerError::MissingCallback, frequency_hz)),
        };

        let index = self
            .slots
            .iter()
            .position(|slot| !slot.active)
            .ok_or_else(|| rejected(SchedulerError::CapacityExhausted, frequency_hz))?;

        let interval_ticks = (self.tick_frequency_hz / frequency_hz).max(1);
        self.slots[index].assign(interval_ticks, callback, priority);

        log_debug!(
            "task {} added: {}Hz every {} ticks, priority {}",
            index,
            frequency_hz,
            interval_ticks,
            priority
        );
        Ok(TaskId(index))
    }

    /// Advance one tick and dispatch every task that became due.
    ///
    /// Must be called at `tick_frequency_hz` from a single call site.
    /// Callbacks run synchronously in ascending priority order (stable by
    /// slot index). Returns the number of tasks dispatched.
    pub fn update(&mut self) -> usize {
        self.tick_count = self.tick_count.wrapping_add(1);

        // --- Readiness pass ---
        let mut ready = [0usize; N];
        let mut ready_count = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.active && slot.tick() {
                ready[ready_count] = index;
                ready_count += 1;
            }
        }

        // --- Ordering ---
        let ready = &mut ready[..ready_count];
        sort_by_priority(ready, &self.slots);

        // --- Dispatch ---
        for &index in ready.iter() {
            log_trace!("tick {}: dispatch task {}", self.tick_count, index);
            self.slots[index].dispatch();
        }

        ready_count
    }

    /// Tick rate recorded at initialization.
    #[inline]
    pub fn tick_frequency_hz(&self) -> u32 {
        self.tick_frequency_hz
    }

    /// Number of `update()` calls since the last `init()`.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Maximum number of tasks.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Snapshot of a registered task, or `None` for a free slot.
    pub fn task(&self, id: TaskId) -> Option<TaskInfo> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.active)
            .map(|slot| slot.info(id))
    }

    /// Snapshots of every registered task in slot order.
    pub fn tasks(&self) -> impl Iterator<Item = TaskInfo> + use<'_, 'a, N> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(index, slot)| slot.info(TaskId(index)))
    }
}

/// Log a rejected registration and hand the error back.
fn rejected(error: SchedulerError, frequency_hz: u32) -> SchedulerError {
    log_warn!("task rejected ({}Hz): {}", frequency_hz, error);
    error
}

// ---------------------------------------------------------------------------
// Ready-list ordering
// ---------------------------------------------------------------------------

/// Stable insertion sort of slot indices by ascending priority.
///
/// Only strictly greater priorities are shifted, so tied slots keep their
/// table order. `core` has no allocation-free stable sort.
fn sort_by_priority(ready: &mut [usize], slots: &[TaskSlot<'_>]) {
    for i in 1..ready.len() {
        let current = ready[i];
        let priority = slots[current].priority;
        let mut j = i;
        while j > 0 && slots[ready[j - 1]].priority > priority {
            ready[j] = ready[j - 1];
            j -= 1;
        }
        ready[j] = current;
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::vec::Vec;

    fn noop() {}

    /// Run `update()` `n` times, returning how many tasks were dispatched.
    fn run<const N: usize>(scheduler: &mut Scheduler<'_, N>, n: usize) -> usize {
        (0..n).map(|_| scheduler.update()).sum()
    }

    #[test]
    fn test_new_scheduler_is_empty() {
        let scheduler: Scheduler = Scheduler::new(1000);
        assert_eq!(scheduler.tick_frequency_hz(), 1000);
        assert_eq!(scheduler.capacity(), MAX_TASKS);
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.tick_count(), 0);
    }

    #[test]
    fn test_ten_hz_on_one_khz_tick() {
        let hits = AtomicU32::new(0);
        let mut task = || {
            hits.fetch_add(1, Ordering::Relaxed);
        };
        let mut scheduler: Scheduler = Scheduler::new(1000);
        let id = scheduler
            .add_task(10, Some(Callback::from(&mut task)), 5)
            .unwrap();
        assert_eq!(scheduler.task(id).unwrap().interval_ticks, 100);

        run(&mut scheduler, 99);
        assert_eq!(hits.load(Ordering::Relaxed), 0);

        scheduler.update();
        assert_eq!(hits.load(Ordering::Relaxed), 1);

        run(&mut scheduler, 99);
        assert_eq!(hits.load(Ordering::Relaxed), 1);

        scheduler.update();
        assert_eq!(hits.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_frequency_above_tick_rate_rejected() {
        let hits = AtomicU32::new(0);
        let mut task = || {
            hits.fetch_add(1, Ordering::Relaxed);
        };
        let mut scheduler: Scheduler = Scheduler::new(100);

        let result = scheduler.add_task(200, Some(Callback::from(&mut task)), 0);
        assert_eq!(result, Err(SchedulerError::InvalidFrequency));

        run(&mut scheduler, 1000);
        assert_eq!(hits.load(Ordering::Relaxed), 0);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let mut scheduler: Scheduler = Scheduler::new(100);
        assert_eq!(
            scheduler.add_task(0, Some(Callback::Fn(noop)), 0),
            Err(SchedulerError::InvalidFrequency)
        );
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_missing_callback_rejected() {
        let mut scheduler: Scheduler = Scheduler::new(100);
        assert_eq!(
            scheduler.add_task(10, None, 0),
            Err(SchedulerError::MissingCallback)
        );
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_capacity_exhausted() {
        let mut scheduler: Scheduler = Scheduler::new(1000);
        for expected in 0..MAX_TASKS {
            let id = scheduler.add_task(1, Some(Callback::Fn(noop)), 0).unwrap();
            assert_eq!(id.index(), expected);
        }
        assert!(scheduler.is_full());
        let before: Vec<TaskInfo> = scheduler.tasks().collect();

        assert_eq!(
            scheduler.add_task(1000, Some(Callback::Fn(noop)), 0),
            Err(SchedulerError::CapacityExhausted)
        );
        // Frequency is validated first, but a full table still rejects
        assert!(scheduler.add_task(0, None, 0).is_err());
        assert!(scheduler.add_task(1, None, 255).is_err());

        assert_eq!(scheduler.len(), MAX_TASKS);
        let after: Vec<TaskInfo> = scheduler.tasks().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_custom_capacity() {
        let mut scheduler: Scheduler<'_, 2> = Scheduler::new(10);
        assert!(scheduler.add_task(1, Some(Callback::Fn(noop)), 0).is_ok());
        assert!(scheduler.add_task(1, Some(Callback::Fn(noop)), 0).is_ok());
        assert_eq!(
            scheduler.add_task(1, Some(Callback::Fn(noop)), 0),
            Err(SchedulerError::CapacityExhausted)
        );
    }

    #[test]
    fn test_interval_floors_to_one_tick() {
        let mut scheduler: Scheduler = Scheduler::new(100);
        // 100 / 60 floors to 1; 100 / 100 is exactly 1
        let a = scheduler.add_task(60, Some(Callback::Fn(noop)), 0).unwrap();
        let b = scheduler.add_task(100, Some(Callback::Fn(noop)), 0).unwrap();
        let c = scheduler.add_task(30, Some(Callback::Fn(noop)), 0).unwrap();

        assert_eq!(scheduler.task(a).unwrap().interval_ticks, 1);
        assert_eq!(scheduler.task(b).unwrap().interval_ticks, 1);
        assert_eq!(scheduler.task(c).unwrap().interval_ticks, 3);

        assert_eq!(run(&mut scheduler, 3), 3 + 3 + 1);
    }

    #[test]
    fn test_every_tick_task_runs_each_update() {
        let hits = AtomicU32::new(0);
        let mut task = || {
            hits.fetch_add(1, Ordering::Relaxed);
        };
        let mut scheduler: Scheduler = Scheduler::new(50);
        scheduler
            .add_task(50, Some(Callback::from(&mut task)), 0)
            .unwrap();

        for tick in 1..=20 {
            assert_eq!(scheduler.update(), 1);
            assert_eq!(hits.load(Ordering::Relaxed), tick);
        }
    }

    #[test]
    fn test_priority_order_within_tick() {
        let order = Mutex::new(Vec::new());
        let mut a = || order.lock().unwrap().push('A');
        let mut b = || order.lock().unwrap().push('B');

        let mut scheduler: Scheduler = Scheduler::new(100);
        scheduler.add_task(10, Some(Callback::from(&mut a)), 1).unwrap();
        scheduler.add_task(10, Some(Callback::from(&mut b)), 0).unwrap();

        assert_eq!(run(&mut scheduler, 10), 2);
        assert_eq!(*order.lock().unwrap(), ['B', 'A']);
    }

    #[test]
    fn test_equal_priority_keeps_registration_order() {
        let order = Mutex::new(Vec::new());
        let mut a = || order.lock().unwrap().push('A');
        let mut b = || order.lock().unwrap().push('B');
        let mut c = || order.lock().unwrap().push('C');
        let mut d = || order.lock().unwrap().push('D');

        let mut scheduler: Scheduler = Scheduler::new(100);
        scheduler.add_task(10, Some(Callback::from(&mut a)), 2).unwrap();
        scheduler.add_task(10, Some(Callback::from(&mut b)), 1).unwrap();
        scheduler.add_task(10, Some(Callback::from(&mut c)), 2).unwrap();
        scheduler.add_task(10, Some(Callback::from(&mut d)), 1).unwrap();

        run(&mut scheduler, 10);
        assert_eq!(*order.lock().unwrap(), ['B', 'D', 'A', 'C']);
    }

    #[test]
    fn test_only_due_tasks_dispatched() {
        let order = Mutex::new(Vec::new());
        let mut fast = || order.lock().unwrap().push('F');
        let mut slow = || order.lock().unwrap().push('S');

        let mut scheduler: Scheduler = Scheduler::new(100);
        scheduler.add_task(50, Some(Callback::from(&mut fast)), 9).unwrap();
        scheduler.add_task(25, Some(Callback::from(&mut slow)), 0).unwrap();

        let dispatched: Vec<usize> = (0..4).map(|_| scheduler.update()).collect();
        assert_eq!(dispatched, [0, 1, 0, 2]);
        assert_eq!(*order.lock().unwrap(), ['F', 'S', 'F']);
    }

    #[test]
    fn test_counter_rearmed_after_dispatch() {
        let mut scheduler: Scheduler = Scheduler::new(100);
        let id = scheduler.add_task(20, Some(Callback::Fn(noop)), 0).unwrap();

        run(&mut scheduler, 4);
        assert_eq!(scheduler.task(id).unwrap().ticks_until_run, 1);

        scheduler.update();
        let info = scheduler.task(id).unwrap();
        assert_eq!(info.ticks_until_run, 5);
        assert_eq!(info.run_count, 1);
    }

    #[test]
    fn test_phase_follows_registration_time() {
        let order = Mutex::new(Vec::new());
        let mut early = || order.lock().unwrap().push('E');
        let mut late = || order.lock().unwrap().push('L');

        let mut scheduler: Scheduler = Scheduler::new(100);
        scheduler.add_task(25, Some(Callback::from(&mut early)), 0).unwrap();
        run(&mut scheduler, 2);
        scheduler.add_task(25, Some(Callback::from(&mut late)), 0).unwrap();

        // early fires on ticks 4, 8; late on ticks 6, 10
        let fired: Vec<usize> = (0..8).map(|_| scheduler.update()).collect();
        assert_eq!(fired, [0, 1, 0, 1, 0, 1, 0, 1]);
        assert_eq!(*order.lock().unwrap(), ['E', 'L', 'E', 'L']);
    }

    #[test]
    fn test_init_discards_registrations() {
        let mut scheduler: Scheduler = Scheduler::new(100);
        scheduler.add_task(10, Some(Callback::Fn(noop)), 0).unwrap();
        run(&mut scheduler, 3);

        scheduler.init(500);
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.tick_frequency_hz(), 500);
        assert_eq!(scheduler.tick_count(), 0);
        assert_eq!(run(&mut scheduler, 100), 0);

        let id = scheduler.add_task(500, Some(Callback::Fn(noop)), 0).unwrap();
        assert_eq!(id.index(), 0);
    }

    #[test]
    fn test_zero_tick_rate_rejects_everything() {
        let mut scheduler: Scheduler = Scheduler::new(0);
        assert_eq!(
            scheduler.add_task(1, Some(Callback::Fn(noop)), 0),
            Err(SchedulerError::InvalidFrequency)
        );
    }

    #[test]
    fn test_deterministic_trace() {
        fn trace() -> Vec<(u64, char)> {
            let log = Mutex::new(Vec::new());
            let tick = AtomicU32::new(0);
            let mut a = || log.lock().unwrap().push((tick.load(Ordering::Relaxed) as u64, 'A'));
            let mut b = || log.lock().unwrap().push((tick.load(Ordering::Relaxed) as u64, 'B'));
            let mut c = || log.lock().unwrap().push((tick.load(Ordering::Relaxed) as u64, 'C'));

            let mut scheduler: Scheduler = Scheduler::new(1000);
            scheduler.add_task(7, Some(Callback::from(&mut a)), 3).unwrap();
            scheduler.add_task(333, Some(Callback::from(&mut b)), 1).unwrap();
            scheduler.add_task(50, Some(Callback::from(&mut c)), 3).unwrap();
            for t in 1..=2000 {
                tick.store(t, Ordering::Relaxed);
                scheduler.update();
            }
            drop(scheduler);
            log.into_inner().unwrap()
        }

        let first = trace();
        assert!(!first.is_empty());
        assert_eq!(first, trace());
    }

    #[test]
    fn test_tasks_iterator_lists_active_slots() {
        let mut scheduler: Scheduler = Scheduler::new(100);
        scheduler.add_task(10, Some(Callback::Fn(noop)), 4).unwrap();
        scheduler.add_task(50, Some(Callback::Fn(noop)), 2).unwrap();

        let priorities: Vec<u8> = scheduler.tasks().map(|info| info.priority).collect();
        assert_eq!(priorities, [4, 2]);
        assert!(scheduler.task(TaskId(5)).is_none());
        assert!(scheduler.task(TaskId(MAX_TASKS + 3)).is_none());
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let mut scheduler: Scheduler<'_, 6> = Scheduler::new(10);
        for priority in [3u8, 1, 3, 0, 1, 3] {
            scheduler
                .add_task(10, Some(Callback::Fn(noop)), priority)
                .unwrap();
        }
        let mut ready = [0, 1, 2, 3, 4, 5];
        sort_by_priority(&mut ready, &scheduler.slots);
        assert_eq!(ready, [3, 1, 4, 0, 2, 5]);
    }
}
