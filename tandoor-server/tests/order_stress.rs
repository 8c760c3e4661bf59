//! Concurrent order creation stress test
//!
//! Hammers OrderManager::create from many threads and checks that every
//! order lands with a distinct receipt number. The store's unique
//! order-number index is what makes collisions retry instead of clobber.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use shared::models::{OrderCreate, OrderItemInput, OrderType, PlanType, Restaurant};
use shared::util::now_millis;
use tandoor_server::{AppState, Config};

const ORDER_COUNT: usize = 1000;
const WORKERS: usize = 16;

fn seeded_state(dir: &tempfile::TempDir) -> AppState {
    let config = Config {
        host: "127.0.0.1".into(),
        http_port: 0,
        data_dir: dir.path().join("data").to_string_lossy().into_owned(),
        timezone: chrono_tz::Asia::Kolkata,
        log_level: "info".into(),
        log_dir: None,
    };
    let state = AppState::initialize(&config).unwrap();

    let now = now_millis();
    state
        .storage
        .insert_restaurant(&Restaurant {
            id: "r1".into(),
            name: "Tandoor Palace".into(),
            slug: "tandoor-palace".into(),
            description: None,
            address: None,
            phone: None,
            email: None,
            logo_url: None,
            primary_color: "#FF6B35".into(),
            secondary_color: "#C62828".into(),
            accent_color: "#FFB300".into(),
            table_count: 15,
            service_charge: "10.00".into(),
            tax_rate: "5.00".into(),
            order_modes: vec![OrderType::DineIn, OrderType::Takeaway],
            is_active: true,
            trial_start: now,
            subscription_end: None,
            plan_type: PlanType::Trial,
            monthly_rate: "4999.00".into(),
            created_at: now,
            updated_at: now,
        })
        .unwrap();
    state
}

fn takeaway_order(i: usize) -> OrderCreate {
    OrderCreate {
        tenant_id: "r1".into(),
        order_type: OrderType::Takeaway,
        table_number: None,
        items: vec![OrderItemInput {
            item_id: format!("m{}", i % 7),
            name: "Masala Dosa".into(),
            price: "120.00".into(),
            quantity: 1 + (i % 3) as i32,
        }],
        customer_name: None,
        customer_phone: None,
        notes: None,
    }
}

#[test]
fn concurrent_creates_allocate_unique_order_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let state = seeded_state(&dir);

    let next = Arc::new(AtomicUsize::new(0));
    let start = Instant::now();

    let mut handles = Vec::with_capacity(WORKERS);
    for _ in 0..WORKERS {
        let orders = state.orders.clone();
        let next = next.clone();
        handles.push(std::thread::spawn(move || {
            let mut numbers = Vec::new();
            loop {
                let i = next.fetch_add(1, Ordering::Relaxed);
                if i >= ORDER_COUNT {
                    break;
                }
                let order = orders
                    .create(takeaway_order(i))
                    .unwrap_or_else(|e| panic!("order {} failed: {}", i, e));
                numbers.push(order.order_number);
            }
            numbers
        }));
    }

    let mut all = Vec::with_capacity(ORDER_COUNT);
    for handle in handles {
        all.extend(handle.join().unwrap());
    }

    println!(
        "created {} orders in {:.2?} ({:.0} orders/s)",
        all.len(),
        start.elapsed(),
        all.len() as f64 / start.elapsed().as_secs_f64()
    );

    assert_eq!(all.len(), ORDER_COUNT);
    let unique: HashSet<&str> = all.iter().map(String::as_str).collect();
    assert_eq!(unique.len(), ORDER_COUNT, "duplicate order numbers issued");

    // Every order is durably stored and every receipt number resolves.
    let stored = state.orders.list("r1", None).unwrap();
    assert_eq!(stored.len(), ORDER_COUNT);
    let sample = &all[ORDER_COUNT / 2];
    assert_eq!(
        state.orders.get_by_number(sample).unwrap().order_number,
        *sample
    );
}
