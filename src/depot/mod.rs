pub mod shipments;

use cereal_storage::config::StorageConfig;
use cereal_storage::storage::observer::{Journal, TracingObserver};
use cereal_storage::{Cereal, Storage, StorageError};
use rand::rngs::ThreadRng;
use rand::thread_rng;
use shipments::Traffic;
use std::time::Duration;

const MAX_MESSAGES: usize = 12;

pub type DepotStorage = Storage<Cereal, (TracingObserver, Journal)>;

/// An interactive session around one storage.
///
/// Every storage event lands both in the tracing log and in the journal shown
/// on screen. Rejected requests surface there, so the action methods only
/// report what actually moved.
pub struct Depot {
    storage: DepotStorage,
    journal: Journal,
    traffic_timer: Duration,
    traffic_interval: Duration,
    max_shipment: f32,
    auto_traffic: bool,
    rng: ThreadRng,
}

impl Depot {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let journal = Journal::new(MAX_MESSAGES);
        let storage = Storage::with_observer(
            config.container_capacity,
            config.storage_capacity,
            (TracingObserver, journal.clone()),
        )?;
        Ok(Self {
            storage,
            journal,
            traffic_timer: Duration::default(),
            traffic_interval: config.shipment_interval(),
            max_shipment: config.max_shipment,
            auto_traffic: false,
            rng: thread_rng(),
        })
    }

    pub fn storage(&self) -> &DepotStorage {
        &self.storage
    }

    pub fn update(&mut self, delta: Duration) {
        if !self.auto_traffic {
            return;
        }
        self.traffic_timer += delta;
        while self.traffic_timer >= self.traffic_interval {
            self.traffic_timer -= self.traffic_interval;
            let traffic = shipments::generate_traffic(self.max_shipment, &mut self.rng);
            self.handle_traffic(traffic);
        }
    }

    pub fn handle_traffic(&mut self, traffic: Traffic) {
        match traffic {
            Traffic::Shipment { cereal, amount } => {
                self.add_message(format!("Shipment of {amount} {cereal} at the dock."));
                self.add(cereal, amount);
            }
            Traffic::Order { cereal, amount } => {
                self.add_message(format!("Order for {amount} {cereal}."));
                if let Some(dispensed) = self.take(cereal, amount) {
                    if dispensed < amount {
                        self.add_message(format!(
                            "Order short by {} {cereal}.",
                            amount - dispensed
                        ));
                    }
                }
            }
        }
    }

    /// Returns the excess that did not fit, or `None` if nothing was stored.
    pub fn add(&mut self, cereal: Cereal, amount: f32) -> Option<f32> {
        self.storage.add_cereal(cereal, amount).ok()
    }

    pub fn take(&mut self, cereal: Cereal, amount: f32) -> Option<f32> {
        self.storage.get_cereal(&cereal, amount).ok()
    }

    pub fn remove(&mut self, cereal: Cereal) -> bool {
        self.storage.remove_container(&cereal)
    }

    pub fn toggle_auto_traffic(&mut self) {
        self.auto_traffic = !self.auto_traffic;
        self.traffic_timer = Duration::default();
        if self.auto_traffic {
            self.add_message("Dock opened: shipments and orders will arrive.");
        } else {
            self.add_message("Dock closed.");
        }
    }

    pub fn auto_traffic(&self) -> bool {
        self.auto_traffic
    }

    pub fn traffic_progress(&self) -> f64 {
        (self.traffic_timer.as_secs_f64() / self.traffic_interval.as_secs_f64()).min(1.0)
    }

    pub fn messages(&self) -> Vec<String> {
        self.journal.entries()
    }

    pub fn add_message<S: Into<String>>(&mut self, message: S) {
        self.journal.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depot() -> Depot {
        Depot::new(&StorageConfig::default()).expect("default config is valid")
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = StorageConfig {
            container_capacity: 10.0,
            storage_capacity: 5.0,
            ..StorageConfig::default()
        };
        assert!(Depot::new(&config).is_err());
    }

    #[test]
    fn shipment_excess_is_journaled() {
        let mut depot = depot();
        depot.handle_traffic(Traffic::Shipment {
            cereal: Cereal::Rice,
            amount: 12.0,
        });

        assert_eq!(depot.storage().amount_of(&Cereal::Rice), 10.0);
        let messages = depot.messages();
        assert_eq!(
            messages.last().map(String::as_str),
            Some("Stored 10 of RICE; 2 turned away.")
        );
    }

    #[test]
    fn short_order_is_reported() {
        let mut depot = depot();
        depot.add(Cereal::Millet, 3.0);
        depot.handle_traffic(Traffic::Order {
            cereal: Cereal::Millet,
            amount: 5.0,
        });

        assert_eq!(depot.storage().amount_of(&Cereal::Millet), 0.0);
        assert_eq!(
            depot.messages().last().map(String::as_str),
            Some("Order short by 2 MILLET.")
        );
    }

    #[test]
    fn full_depot_refuses_new_cereal() {
        let mut depot = depot();
        assert_eq!(depot.add(Cereal::Rice, 10.0), Some(0.0));
        assert_eq!(depot.add(Cereal::Peas, 1.0), Some(0.0));
        assert_eq!(depot.add(Cereal::Bulgur, 1.0), None);
        assert!(!depot.remove(Cereal::Peas));
    }

    #[test]
    fn closed_dock_ignores_time() {
        let mut depot = depot();
        depot.update(Duration::from_secs(60));
        assert!(depot.storage().is_empty());
        assert_eq!(depot.traffic_progress(), 0.0);
    }

    #[test]
    fn open_dock_handles_traffic_each_interval() {
        let mut depot = depot();
        depot.toggle_auto_traffic();
        let before = depot.messages().len();
        depot.update(Duration::from_secs(5));

        assert!(depot.messages().len() > before);
        assert_eq!(depot.traffic_progress(), 0.0);
    }
}
