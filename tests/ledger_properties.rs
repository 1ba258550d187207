//! Property tests for stock/sale consistency across arbitrary ledger operations.

#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]

use chrono::{NaiveDate, TimeZone, Utc};
use pharmacy_desk::{
    core::{Catalog, Ledger, StockPolicy},
    models::{Medicine, SaleItem},
};
use proptest::prelude::*;

const IDS: [&str; 3] = ["m1", "m2", "m3"];

#[derive(Debug, Clone)]
enum Op {
    /// Sell `quantity` of `IDS[index]`; index 3 is not catalogued
    Sell { index: usize, quantity: u32 },
    /// Set the quantity of the n-th live sale (modulo the sale count)
    Edit { nth: usize, quantity: u32 },
    /// Delete the n-th live sale (modulo the sale count)
    Delete { nth: usize },
    /// Delete an id that was never issued
    DeleteMissing,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..4usize, 1..20u32).prop_map(|(index, quantity)| Op::Sell { index, quantity }),
        2 => (any::<usize>(), 1..30u32).prop_map(|(nth, quantity)| Op::Edit { nth, quantity }),
        2 => any::<usize>().prop_map(|nth| Op::Delete { nth }),
        1 => Just(Op::DeleteMissing),
    ]
}

fn catalog(stocks: &[i64; 3]) -> Catalog {
    Catalog::from_medicines(
        IDS.iter()
            .zip(stocks)
            .zip([32.0, 155.0, 12.5])
            .map(|((id, &stock), mrp)| Medicine {
                id: (*id).to_string(),
                name: format!("Medicine {id}"),
                category: "General".to_string(),
                manufacturer: "Test Labs".to_string(),
                batch_number: format!("B-{id}"),
                expiry_date: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
                purchase_price: mrp / 2.0,
                mrp,
                stock,
                threshold: 10,
            })
            .collect(),
    )
}

fn apply(ledger: &mut Ledger, catalog: &mut Catalog, op: &Op) {
    let now = Utc.with_ymd_and_hms(2025, 1, 6, 10, 0, 0).unwrap();
    match *op {
        Op::Sell { index, quantity } => {
            let id = IDS.get(index).copied().unwrap_or("m-missing");
            // strict rejections are expected; they must leave no trace
            let _ = ledger.record_sale(catalog, &[SaleItem::at_mrp(id, quantity)], now);
        }
        Op::Edit { nth, quantity } => {
            if ledger.is_empty() {
                return;
            }
            let id = ledger.sales()[nth % ledger.len()].id.clone();
            let _ = ledger.edit_sale_quantity(catalog, &id, quantity);
        }
        Op::Delete { nth } => {
            if ledger.is_empty() {
                return;
            }
            let id = ledger.sales()[nth % ledger.len()].id.clone();
            assert!(ledger.delete_sale(catalog, &id).is_some());
            assert!(ledger.delete_sale(catalog, &id).is_none());
        }
        Op::DeleteMissing => {
            assert!(ledger.delete_sale(catalog, "sale-missing").is_none());
        }
    }
}

fn sold(ledger: &Ledger, id: &str) -> i64 {
    ledger
        .sales()
        .iter()
        .filter(|s| s.medicine_id == id)
        .map(|s| i64::from(s.quantity))
        .sum()
}

proptest! {
    #[test]
    fn stock_plus_sold_is_invariant(
        stocks in prop::array::uniform3(0..200i64),
        ops in prop::collection::vec(op(), 0..60),
    ) {
        let mut catalog = catalog(&stocks);
        let mut ledger = Ledger::default();

        for op in &ops {
            apply(&mut ledger, &mut catalog, op);
            for (id, initial) in IDS.iter().zip(stocks) {
                prop_assert_eq!(catalog.get(id).unwrap().stock + sold(&ledger, id), initial);
            }
        }

        for sale in ledger.sales() {
            prop_assert!(sale.quantity > 0);
            prop_assert_eq!(sale.total_amount, f64::from(sale.quantity) * sale.unit_price);
            prop_assert!(IDS.contains(&sale.medicine_id.as_str()));
        }
    }

    #[test]
    fn strict_policy_never_oversells(
        stocks in prop::array::uniform3(0..50i64),
        ops in prop::collection::vec(op(), 0..60),
    ) {
        let mut catalog = catalog(&stocks);
        let mut ledger = Ledger::from_sales(Vec::new(), StockPolicy::Strict);

        for op in &ops {
            apply(&mut ledger, &mut catalog, op);
            for (id, initial) in IDS.iter().zip(stocks) {
                let stock = catalog.get(id).unwrap().stock;
                prop_assert!(stock >= 0);
                prop_assert_eq!(stock + sold(&ledger, id), initial);
            }
        }
    }

    #[test]
    fn delete_restores_the_catalog(
        stocks in prop::array::uniform3(20..200i64),
        index in 0..3usize,
        quantity in 1..20u32,
    ) {
        let mut catalog = catalog(&stocks);
        let before = catalog.clone();
        let mut ledger = Ledger::default();
        let now = Utc.with_ymd_and_hms(2025, 1, 6, 10, 0, 0).unwrap();

        let outcome = ledger
            .record_sale(&mut catalog, &[SaleItem::at_mrp(IDS[index], quantity)], now)
            .unwrap();
        ledger.delete_sale(&mut catalog, &outcome.recorded[0].id);

        prop_assert_eq!(catalog, before);
        prop_assert!(ledger.is_empty());
    }
}
