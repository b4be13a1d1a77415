//! # TickOS: tick-driven cooperative scheduler
//!
//! A fixed-capacity, tick-driven cooperative task scheduler for ARM
//! Cortex-M4 microcontrollers (and any other target that can call a
//! function periodically).
//!
//! ## Overview
//!
//! One periodic hardware tick drives every task. Each task asks for its
//! own frequency; the scheduler turns that into a whole number of ticks
//! and runs the task's callback every time the countdown expires:
//!
//! - **No heap**: the task table and the per-tick ready list are fixed-size arrays
//! - **No threads, no preemption**: callbacks run to completion, one after another
//! - **Deterministic order**: due tasks run by ascending priority, ties by slot
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    Application Tasks                    │
//! ├────────────────────────────────────────────────────────┤
//! │                 Kernel API (kernel.rs)                  │
//! │        init() · add_task() · update() · with()         │
//! ├──────────────────────────┬─────────────────────────────┤
//! │  Scheduler               │  Sync Primitives            │
//! │  scheduler.rs            │  sync.rs                    │
//! │  ─ add_task()            │  ─ critical_section         │
//! │  ─ update()              │                             │
//! ├──────────────────────────┴─────────────────────────────┤
//! │              Task Model (task.rs)                       │
//! │        TaskSlot · Callback · Task · TaskId              │
//! ├────────────────────────────────────────────────────────┤
//! │            Arch Port (arch/cortex_m4.rs)                │
//! │              SysTick configuration · handler            │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Timing Model
//!
//! | Tick rate | Task rate | Interval | First run |
//! |-----------|-----------|----------|-----------|
//! | 1000 Hz   | 10 Hz     | 100 ticks | tick 100 |
//! | 1000 Hz   | 3 Hz      | 333 ticks | tick 333 |
//! | 100 Hz    | 60 Hz     | 1 tick    | tick 1   |
//! | 100 Hz    | 200 Hz    | rejected  | never    |
//!
//! ## Usage
//!
//! ```
//! use tickos::{Callback, Scheduler};
//!
//! fn blink() {}
//!
//! let mut scheduler: Scheduler = Scheduler::new(1000);
//! let led = scheduler.add_task(2, Some(Callback::Fn(blink)), 0).unwrap();
//!
//! for _ in 0..500 {
//!     scheduler.update();
//! }
//! assert_eq!(scheduler.task(led).unwrap().run_count, 1);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod logging;
pub mod config;
pub mod error;
pub mod task;
pub mod scheduler;
pub mod arch;
pub mod kernel;
pub mod sync;

pub use error::{Result, SchedulerError};
pub use scheduler::Scheduler;
pub use task::{Callback, Task, TaskId, TaskInfo};
