//! Reporting seam between the storage core and whoever wants to hear about it.
//!
//! The core never logs on its own. It hands a [`StorageEvent`] to its
//! [`StorageObserver`] for each operation, carrying the amounts before and
//! after so a wrapping layer can produce its own traces.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Get,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => f.write_str("add"),
            Operation::Get => f.write_str("get"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageEvent<'a, C> {
    Created {
        container_capacity: f32,
        storage_capacity: f32,
    },
    Added {
        category: &'a C,
        stored: f32,
        excess: f32,
        before: f32,
        after: f32,
    },
    AddRejected {
        category: &'a C,
        containers: usize,
    },
    Dispensed {
        category: &'a C,
        dispensed: f32,
        remaining: f32,
    },
    EmptyDispense {
        category: &'a C,
    },
    ContainerRemoved {
        category: &'a C,
    },
    RemovalRefused {
        category: &'a C,
        amount: f32,
    },
    AmountQueried {
        category: &'a C,
        amount: f32,
    },
    SpaceQueried {
        category: &'a C,
        space: f32,
    },
    InvalidAmount {
        operation: Operation,
        amount: f32,
    },
}

impl<C: fmt::Display> fmt::Display for StorageEvent<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageEvent::Created {
                container_capacity,
                storage_capacity,
            } => write!(
                f,
                "Storage opened: {container_capacity} per container, {storage_capacity} total."
            ),
            StorageEvent::Added {
                category,
                stored,
                excess,
                ..
            } => {
                if *excess > 0.0 {
                    write!(f, "Stored {stored} of {category}; {excess} turned away.")
                } else {
                    write!(f, "Stored {stored} of {category}.")
                }
            }
            StorageEvent::AddRejected {
                category,
                containers,
            } => write!(
                f,
                "No room to open a container for {category} ({containers} in use)."
            ),
            StorageEvent::Dispensed {
                category,
                dispensed,
                remaining,
            } => write!(f, "Dispensed {dispensed} of {category}, {remaining} left."),
            StorageEvent::EmptyDispense { category } => {
                write!(f, "Container for {category} is empty.")
            }
            StorageEvent::ContainerRemoved { category } => {
                write!(f, "Removed empty container for {category}.")
            }
            StorageEvent::RemovalRefused { category, amount } => write!(
                f,
                "Container for {category} still holds {amount}; not removed."
            ),
            StorageEvent::AmountQueried { category, amount } => {
                write!(f, "{category} holds {amount}.")
            }
            StorageEvent::SpaceQueried { category, space } => {
                write!(f, "{category} has room for {space}.")
            }
            StorageEvent::InvalidAmount { operation, amount } => {
                write!(f, "Rejected {operation} of invalid amount {amount}.")
            }
        }
    }
}

pub trait StorageObserver<C> {
    fn notify(&self, event: &StorageEvent<'_, C>);
}

impl<C> StorageObserver<C> for () {
    fn notify(&self, _event: &StorageEvent<'_, C>) {}
}

impl<C, A, B> StorageObserver<C> for (A, B)
where
    A: StorageObserver<C>,
    B: StorageObserver<C>,
{
    fn notify(&self, event: &StorageEvent<'_, C>) {
        self.0.notify(event);
        self.1.notify(event);
    }
}

/// Forwards every event to `tracing`.
///
/// Mutations go out at info, refusals that leave state intact at warn,
/// rejected input at error, reads at debug.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<C: fmt::Display> StorageObserver<C> for TracingObserver {
    fn notify(&self, event: &StorageEvent<'_, C>) {
        match event {
            StorageEvent::Created {
                container_capacity,
                storage_capacity,
            } => tracing::info!(container_capacity, storage_capacity, "storage created"),
            StorageEvent::Added {
                category,
                stored,
                excess,
                before,
                after,
            } => tracing::info!(%category, stored, excess, before, after, "cereal added"),
            StorageEvent::AddRejected {
                category,
                containers,
            } => tracing::error!(%category, containers, "no room for a new container"),
            StorageEvent::Dispensed {
                category,
                dispensed,
                remaining,
            } => tracing::info!(%category, dispensed, remaining, "cereal dispensed"),
            StorageEvent::EmptyDispense { category } => {
                tracing::warn!(%category, "dispense requested from empty container")
            }
            StorageEvent::ContainerRemoved { category } => {
                tracing::info!(%category, "empty container removed")
            }
            StorageEvent::RemovalRefused { category, amount } => {
                tracing::warn!(%category, amount, "refused to remove non-empty container")
            }
            StorageEvent::AmountQueried { category, amount } => {
                tracing::debug!(%category, amount, "amount queried")
            }
            StorageEvent::SpaceQueried { category, space } => {
                tracing::debug!(%category, space, "space queried")
            }
            StorageEvent::InvalidAmount { operation, amount } => {
                tracing::error!(%operation, amount, "invalid amount rejected")
            }
        }
    }
}

/// Bounded log of recent events, shared between the storage and a display.
///
/// Clones share the same buffer. Queries are not recorded.
#[derive(Debug, Clone)]
pub struct Journal {
    entries: Rc<RefCell<VecDeque<String>>>,
    limit: usize,
}

impl Journal {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Rc::new(RefCell::new(VecDeque::with_capacity(limit))),
            limit,
        }
    }

    pub fn push<S: Into<String>>(&self, message: S) {
        if self.limit == 0 {
            return;
        }
        let mut entries = self.entries.borrow_mut();
        if entries.len() >= self.limit {
            entries.pop_front();
        }
        entries.push_back(message.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<C: fmt::Display> StorageObserver<C> for Journal {
    fn notify(&self, event: &StorageEvent<'_, C>) {
        match event {
            StorageEvent::AmountQueried { .. } | StorageEvent::SpaceQueried { .. } => {}
            _ => self.push(event.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journal_drops_oldest_past_limit() {
        let journal = Journal::new(2);
        journal.push("first");
        journal.push("second");
        journal.push("third");

        assert_eq!(journal.entries(), vec!["second", "third"]);
    }

    #[test]
    fn journal_clones_share_entries() {
        let journal = Journal::new(4);
        let handle = journal.clone();
        handle.push("shared");

        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn journal_skips_queries() {
        let journal = Journal::new(4);
        let category = "RICE";
        journal.notify(&StorageEvent::AmountQueried {
            category: &category,
            amount: 1.0,
        });
        assert!(journal.is_empty());

        journal.notify(&StorageEvent::Added {
            category: &category,
            stored: 10.0,
            excess: 5.0,
            before: 0.0,
            after: 10.0,
        });
        assert_eq!(journal.entries(), vec!["Stored 10 of RICE; 5 turned away."]);
    }
}
