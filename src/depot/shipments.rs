use cereal_storage::Cereal;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Traffic {
    Shipment { cereal: Cereal, amount: f32 },
    Order { cereal: Cereal, amount: f32 },
}

pub fn random_cereal(rng: &mut impl Rng) -> Cereal {
    Cereal::ALL[rng.gen_range(0..Cereal::ALL.len())]
}

/// Whole units between 1 and `max_amount`, or `max_amount` itself when it is
/// below one unit.
pub fn random_amount(max_amount: f32, rng: &mut impl Rng) -> f32 {
    if max_amount >= 1.0 {
        rng.gen_range(1..=max_amount.floor() as u32) as f32
    } else {
        max_amount.max(0.0)
    }
}

pub fn generate_shipment(max_amount: f32, rng: &mut impl Rng) -> Traffic {
    Traffic::Shipment {
        cereal: random_cereal(rng),
        amount: random_amount(max_amount, rng),
    }
}

pub fn generate_order(max_amount: f32, rng: &mut impl Rng) -> Traffic {
    Traffic::Order {
        cereal: random_cereal(rng),
        amount: random_amount(max_amount, rng),
    }
}

/// Shipments come in slightly more often than orders go out.
pub fn generate_traffic(max_amount: f32, rng: &mut impl Rng) -> Traffic {
    if rng.gen_bool(0.6) {
        generate_shipment(max_amount, rng)
    } else {
        generate_order(max_amount, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn amounts_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let amount = random_amount(15.0, &mut rng);
            assert!((1.0..=15.0).contains(&amount));
            assert_eq!(amount.fract(), 0.0);
        }
    }

    #[test]
    fn fractional_cap_is_used_directly() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_amount(0.5, &mut rng), 0.5);
        assert_eq!(random_amount(-3.0, &mut rng), 0.0);
    }
}
