//! Single-threaded reactive primitives.
//!
//! `lightdark-signal` provides the small set of building blocks the `lightdark`
//! toggle is assembled from:
//!
//! - [`Notifier`]: a list of listeners that can be notified with a value
//! - [`Subscription`]: an RAII handle that removes a listener when dropped
//! - [`Signal`]: an observable value that notifies subscribers when it changes
//! - [`Scheduler`] and [`Debounced`]: an explicit microtask queue, and a task
//!   that coalesces any number of triggers within one turn into a single run
//!
//! Everything here is `!Send`. The model is a single host execution sequence:
//! mutations happen synchronously, reactions are queued as microtasks, and the
//! host decides when a turn ends by calling [`Scheduler::run_until_idle`].
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use lightdark_signal::{Scheduler, Signal};
//!
//! let scheduler = Scheduler::new();
//! let runs = Rc::new(Cell::new(0));
//!
//! let counter = runs.clone();
//! let reaction = scheduler.debounce(move || counter.set(counter.get() + 1));
//!
//! let value = Signal::new("light");
//! let trigger = reaction.clone();
//! let _sub = value.subscribe(move |_| {
//!     trigger.trigger();
//! });
//!
//! value.set("dark");
//! value.set("light");
//! value.set("dark");
//! assert_eq!(runs.get(), 0);
//!
//! scheduler.run_until_idle();
//! assert_eq!(runs.get(), 1);
//! ```

mod notifier;
mod scheduler;
mod signal;

pub use notifier::{Notifier, Subscription};
pub use scheduler::{Debounced, Scheduler};
pub use signal::Signal;
