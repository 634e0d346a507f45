//! Capacity-bounded cereal storage.
//!
//! A [`Storage`] holds at most one container per category. Each container
//! holds up to `container_capacity`, and the number of open containers is
//! bounded so that `containers * container_capacity <= storage_capacity`.

pub mod cereal;
pub mod observer;

use indexmap::IndexMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

use observer::{Operation, StorageEvent, StorageObserver, TracingObserver};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no room for a new container ({containers} already open)")]
    CapacityExceeded { containers: usize },
}

/// Anything usable as a storage key.
pub trait Category: Eq + Hash + fmt::Display {}

impl<T: Eq + Hash + fmt::Display> Category for T {}

#[derive(Debug)]
pub struct Storage<C, O = TracingObserver> {
    container_capacity: f32,
    storage_capacity: f32,
    contents: IndexMap<C, f32>,
    observer: O,
}

impl<C: Category> Storage<C, TracingObserver> {
    pub fn new(container_capacity: f32, storage_capacity: f32) -> Result<Self, StorageError> {
        Self::with_observer(container_capacity, storage_capacity, TracingObserver)
    }
}

impl<C: Category, O: StorageObserver<C>> Storage<C, O> {
    pub fn with_observer(
        container_capacity: f32,
        storage_capacity: f32,
        observer: O,
    ) -> Result<Self, StorageError> {
        // Written as negated comparisons so NaN is rejected as well.
        if !(container_capacity >= 0.0) {
            tracing::error!(container_capacity, "negative container capacity");
            return Err(StorageError::InvalidArgument(format!(
                "container capacity must not be negative, got {container_capacity}"
            )));
        }
        if !(storage_capacity >= container_capacity) {
            tracing::error!(
                container_capacity,
                storage_capacity,
                "storage capacity below container capacity"
            );
            return Err(StorageError::InvalidArgument(format!(
                "storage capacity {storage_capacity} is less than container capacity {container_capacity}"
            )));
        }

        observer.notify(&StorageEvent::Created {
            container_capacity,
            storage_capacity,
        });
        Ok(Self {
            container_capacity,
            storage_capacity,
            contents: IndexMap::new(),
            observer,
        })
    }

    /// Stores up to `amount` of `category` and returns what did not fit.
    ///
    /// A category holding nothing needs a free slot first, whether or not its
    /// emptied container is still listed. Without one this fails with
    /// [`StorageError::CapacityExceeded`].
    pub fn add_cereal(&mut self, category: C, amount: f32) -> Result<f32, StorageError> {
        self.check_amount(Operation::Add, amount)?;

        let before = self.amount_of(&category);
        if before == 0.0 && !self.has_slot_for(&category) {
            let containers = self.contents.len();
            self.observer.notify(&StorageEvent::AddRejected {
                category: &category,
                containers,
            });
            return Err(StorageError::CapacityExceeded { containers });
        }

        let stored = amount.min(self.container_capacity - before);
        let after = before + stored;
        let excess = amount - stored;

        self.observer.notify(&StorageEvent::Added {
            category: &category,
            stored,
            excess,
            before,
            after,
        });
        self.contents.insert(category, after);
        Ok(excess)
    }

    /// Takes up to `amount` of `category` and returns how much was handed out.
    pub fn get_cereal(&mut self, category: &C, amount: f32) -> Result<f32, StorageError> {
        self.check_amount(Operation::Get, amount)?;

        match self.contents.get_mut(category) {
            Some(current) if *current > 0.0 => {
                let dispensed = amount.min(*current);
                *current -= dispensed;
                let remaining = *current;
                self.observer.notify(&StorageEvent::Dispensed {
                    category,
                    dispensed,
                    remaining,
                });
                Ok(dispensed)
            }
            _ => {
                self.observer
                    .notify(&StorageEvent::EmptyDispense { category });
                Ok(0.0)
            }
        }
    }

    /// Closes the container for `category` if it is empty.
    ///
    /// Returns `true` when nothing is left behind, including when no
    /// container was open.
    pub fn remove_container(&mut self, category: &C) -> bool {
        let amount = self.contents.get(category).copied().unwrap_or(0.0);
        if amount == 0.0 {
            self.contents.shift_remove(category);
            self.observer
                .notify(&StorageEvent::ContainerRemoved { category });
            true
        } else {
            self.observer
                .notify(&StorageEvent::RemovalRefused { category, amount });
            false
        }
    }

    pub fn get_amount(&self, category: &C) -> f32 {
        let amount = self.amount_of(category);
        self.observer
            .notify(&StorageEvent::AmountQueried { category, amount });
        amount
    }

    /// Room left for `category`: what its container can still take, or a
    /// full container's worth if one could be opened now, otherwise zero.
    pub fn get_space(&self, category: &C) -> f32 {
        let current = self.amount_of(category);
        let space = if current > 0.0 {
            self.container_capacity - current
        } else if self.has_slot_for(category) {
            self.container_capacity
        } else {
            0.0
        };
        self.observer
            .notify(&StorageEvent::SpaceQueried { category, space });
        space
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Whether an empty `category` may start filling. A listed but emptied
    /// container keeps its slot unless every slot is taken; an unlisted one
    /// needs room for a whole new container.
    fn has_slot_for(&self, category: &C) -> bool {
        if self.contents.contains_key(category) {
            self.used_capacity() < self.storage_capacity
        } else {
            self.can_open_container()
        }
    }

    fn check_amount(&self, operation: Operation, amount: f32) -> Result<(), StorageError> {
        if amount >= 0.0 {
            return Ok(());
        }
        self.observer
            .notify(&StorageEvent::InvalidAmount { operation, amount });
        Err(StorageError::InvalidArgument(format!(
            "amount to {operation} must not be negative, got {amount}"
        )))
    }
}

impl<C: Category, O> Storage<C, O> {
    pub fn container_capacity(&self) -> f32 {
        self.container_capacity
    }

    pub fn storage_capacity(&self) -> f32 {
        self.storage_capacity
    }

    /// Number of open containers.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn contains(&self, category: &C) -> bool {
        self.contents.contains_key(category)
    }

    /// How many containers fit, or `None` when containers take no room.
    pub fn max_containers(&self) -> Option<usize> {
        if self.container_capacity.is_infinite() {
            Some(1)
        } else if self.container_capacity > 0.0 {
            Some((self.storage_capacity / self.container_capacity).floor() as usize)
        } else if self.storage_capacity > 0.0 {
            None
        } else {
            Some(0)
        }
    }

    /// Whether one more container fits without the open containers'
    /// combined capacity exceeding the storage capacity.
    pub fn can_open_container(&self) -> bool {
        let used = self.used_capacity();
        used < self.storage_capacity && used + self.container_capacity <= self.storage_capacity
    }

    /// Capacity claimed by the listed containers.
    fn used_capacity(&self) -> f32 {
        // 0 * inf is NaN, so an empty storage claims nothing outright.
        if self.contents.is_empty() {
            0.0
        } else {
            self.contents.len() as f32 * self.container_capacity
        }
    }

    /// Amount held for `category` without notifying the observer.
    pub fn amount_of(&self, category: &C) -> f32 {
        self.contents.get(category).copied().unwrap_or(0.0)
    }

    /// Open containers in the order they were first filled.
    pub fn iter(&self) -> impl Iterator<Item = (&C, f32)> + '_ {
        self.contents.iter().map(|(category, amount)| (category, *amount))
    }
}

impl<C: Category, O> fmt::Display for Storage<C, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (category, amount)) in self.contents.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{category}: {amount}")?;
        }
        Ok(())
    }
}
