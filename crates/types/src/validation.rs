//! Validation helpers shared between the layout/DTO boundary and the engine.
//!
//! These centralize the coordinate and tier-overlap checks an auditorium
//! layout must satisfy, so neither the API layer nor the reservation
//! service has to re-derive them.

use std::collections::HashSet;

use crate::api::auditoriums::{LayoutDto, TierDto};

/// Validates that every coordinate referenced by a layout (disabled seats,
/// wheelchair spots, tier seats) is within `max_rows x max_columns`, and
/// that no `(row, col)` pair appears in more than one tier.
pub fn validate_layout(layout: &LayoutDto, max_rows: i32, max_columns: i32) -> Result<(), String> {
    let in_bounds = |row: i32, col: i32| row >= 0 && row < max_rows && col >= 0 && col < max_columns;

    for &(row, col) in &layout.disabled_seats {
        if !in_bounds(row, col) {
            return Err(format!("disabled seat ({row},{col}) is out of bounds"));
        }
    }
    for &(row, col) in &layout.wheelchair_spots {
        if !in_bounds(row, col) {
            return Err(format!("wheelchair spot ({row},{col}) is out of bounds"));
        }
    }

    let mut seen: HashSet<(i32, i32)> = HashSet::new();
    for tier in &layout.tiers {
        if tier.price_surcharge.is_sign_negative() {
            return Err(format!("tier '{}' has a negative surcharge", tier.tier_name));
        }
        for &(row, col) in &tier.seats {
            if !in_bounds(row, col) {
                return Err(format!(
                    "tier '{}' seat ({row},{col}) is out of bounds",
                    tier.tier_name
                ));
            }
            if !seen.insert((row, col)) {
                return Err(format!(
                    "seat ({row},{col}) appears in more than one pricing tier"
                ));
            }
        }
    }

    Ok(())
}

/// Builds the `(row, col) -> surcharge` lookup used by the pricing step of
/// the reservation service. O(n) in the number of tiered seats; rebuilt per
/// reservation (its cost is dominated by the storage
/// round-trip that loaded the layout in the first place).
pub fn surcharge_map(tiers: &[TierDto]) -> std::collections::HashMap<(i32, i32), rust_decimal::Decimal> {
    let mut map = std::collections::HashMap::new();
    for tier in tiers {
        for &coord in &tier.seats {
            map.insert(coord, tier.price_surcharge);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn layout(tiers: Vec<TierDto>) -> LayoutDto {
        LayoutDto {
            disabled_seats: vec![],
            wheelchair_spots: vec![],
            tiers,
        }
    }

    #[test]
    fn rejects_out_of_bounds_tier_seat() {
        let l = layout(vec![TierDto {
            tier_name: "vip".into(),
            price_surcharge: Decimal::new(500, 2),
            seats: vec![(20, 20)],
        }]);
        assert!(validate_layout(&l, 10, 10).is_err());
    }

    #[test]
    fn rejects_overlapping_tiers() {
        let l = layout(vec![
            TierDto {
                tier_name: "vip".into(),
                price_surcharge: Decimal::new(500, 2),
                seats: vec![(1, 1)],
            },
            TierDto {
                tier_name: "premium".into(),
                price_surcharge: Decimal::new(200, 2),
                seats: vec![(1, 1)],
            },
        ]);
        assert!(validate_layout(&l, 10, 10).is_err());
    }

    #[test]
    fn accepts_disjoint_tiers() {
        let l = layout(vec![
            TierDto {
                tier_name: "vip".into(),
                price_surcharge: Decimal::new(500, 2),
                seats: vec![(1, 1)],
            },
            TierDto {
                tier_name: "premium".into(),
                price_surcharge: Decimal::new(200, 2),
                seats: vec![(2, 2)],
            },
        ]);
        assert!(validate_layout(&l, 10, 10).is_ok());
    }

    #[test]
    fn rejects_negative_surcharge() {
        let l = layout(vec![TierDto {
            tier_name: "vip".into(),
            price_surcharge: Decimal::new(-100, 2),
            seats: vec![(1, 1)],
        }]);
        assert!(validate_layout(&l, 10, 10).is_err());
    }
}
