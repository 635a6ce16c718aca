//! Cart store behaviour across persistence and mutation sequences.

use souq_cache::{Cache, FileStore, KeyValueStore, MemoryStore};
use souq_commerce::cart::{CartStore, ItemSelector, LineKey, DEFAULT_CART_KEY, MAX_QUANTITY_PER_ITEM};
use souq_commerce::catalog::{Product, ProductOption};
use souq_commerce::{Currency, Money, OptionId, ProductId};

fn syp(amount: i64) -> Money {
    Money::from_major(amount, Currency::SYP)
}

fn catalog() -> Vec<Product> {
    vec![
        Product::simple(1u64, "Tea", syp(300)).with_old_price(syp(350)),
        Product::simple(2u64, "Coffee", syp(500)),
        Product::variable(
            3u64,
            "Soap",
            vec![
                ProductOption::new(31u64, "Small", syp(120)),
                ProductOption::new(32u64, "Large", syp(400)),
            ],
        ),
    ]
}

/// Deterministic mutation script covering adds, removals and updates.
fn run_script<S: KeyValueStore>(cart: &mut CartStore<S>) {
    let products = catalog();
    let options = [None, Some(OptionId::new(31)), Some(OptionId::new(32))];

    for step in 0..60_i64 {
        let product = &products[(step % 3) as usize];
        let option = if product.has_options() {
            options[(step % 3) as usize]
        } else {
            None
        };
        match step % 7 {
            0 | 1 | 2 => cart.add_to_cart(product, step % 4 + 1, option),
            3 => cart.add_to_cart(product, -(step % 3), option),
            4 => cart.update_quantity(LineKey::new(product.id, option), step % 5 - 1),
            5 if step % 2 == 0 => cart.remove_from_cart(LineKey::new(product.id, option)),
            5 => cart.remove_from_cart(product.id),
            _ => cart.update_quantity(ItemSelector::Product(product.id), step % 6),
        }
    }
}

fn assert_invariants<S: KeyValueStore>(cart: &CartStore<S>) {
    let mut keys: Vec<LineKey> = cart.items().iter().map(|i| i.key()).collect();
    let len = keys.len();
    keys.sort_by_key(|k| (k.product_id, k.option_id));
    keys.dedup();
    assert_eq!(keys.len(), len, "duplicate line identity");

    for item in cart.items() {
        assert!((1..=MAX_QUANTITY_PER_ITEM).contains(&item.quantity));
    }

    let expected = cart
        .items()
        .iter()
        .map(|i| i.unit_price.amount_minor * i.quantity)
        .sum::<i64>();
    assert_eq!(cart.cart_total(), Money::new(expected, Currency::SYP));
    assert_eq!(
        cart.cart_items_count(),
        cart.items().iter().map(|i| i.quantity).sum::<i64>()
    );
}

#[test]
fn merge_invariant_holds_after_every_step() {
    let mut cart = CartStore::open(Cache::new(MemoryStore::new()), Currency::SYP);
    let products = catalog();

    for round in 1..=5 {
        cart.add_to_cart(&products[0], round, None);
        assert_invariants(&cart);
    }
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.cart_items_count(), 15);

    run_script(&mut cart);
    assert_invariants(&cart);
}

#[test]
fn option_lines_partition_by_identity() {
    let mut cart = CartStore::open(Cache::new(MemoryStore::new()), Currency::SYP);
    let soap = &catalog()[2];

    cart.add_to_cart(soap, 1, None);
    cart.add_to_cart(soap, 2, Some(OptionId::new(31)));
    cart.add_to_cart(soap, 3, Some(OptionId::new(32)));

    assert_eq!(cart.items().len(), 3);
    assert_eq!(cart.cart_item(ProductId::new(3), None).unwrap().unit_price, syp(120));
    assert_eq!(
        cart.cart_item(ProductId::new(3), Some(OptionId::new(32)))
            .unwrap()
            .unit_price,
        syp(400)
    );

    cart.update_quantity(LineKey::new(3u64, Some(OptionId::new(31))), 0);
    assert!(!cart.is_in_cart(ProductId::new(3), Some(OptionId::new(31))));
    assert!(cart.is_in_cart(ProductId::new(3), Some(OptionId::new(32))));
}

#[test]
fn quantity_floor_removes_lines() {
    let mut cart = CartStore::open(Cache::new(MemoryStore::new()), Currency::SYP);
    let tea = &catalog()[0];

    cart.add_to_cart(tea, 0, None);
    cart.add_to_cart(tea, -4, None);
    assert!(cart.is_empty());

    cart.add_to_cart(tea, 3, None);
    cart.add_to_cart(tea, -3, None);
    assert!(cart.is_empty());

    cart.add_to_cart(tea, 2, None);
    cart.update_quantity(ProductId::new(1), -1);
    assert!(cart.is_empty());
}

#[test]
fn quantities_are_capped() {
    let mut cart = CartStore::open(Cache::new(MemoryStore::new()), Currency::SYP);
    let tea = &catalog()[0];

    cart.add_to_cart(tea, MAX_QUANTITY_PER_ITEM, None);
    cart.add_to_cart(tea, 50, None);
    assert_eq!(cart.cart_items_count(), MAX_QUANTITY_PER_ITEM);

    cart.update_quantity(ProductId::new(1), i64::MAX);
    assert_eq!(cart.cart_items_count(), MAX_QUANTITY_PER_ITEM);
}

#[test]
fn persistence_roundtrip_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    let before = {
        let mut cart = CartStore::open(Cache::new(FileStore::open(dir.path()).unwrap()), Currency::SYP);
        run_script(&mut cart);
        cart.add_to_cart(&catalog()[0], 2, None);
        cart.cart().clone()
    };

    let reopened = CartStore::open(Cache::new(FileStore::open(dir.path()).unwrap()), Currency::SYP);
    assert_eq!(reopened.cart(), &before);
    assert_invariants(&reopened);
}

#[test]
fn corrupt_persisted_state_loads_empty() {
    let store = MemoryStore::new();
    let samples: [&[u8]; 5] = [b"{", b"null", b"{\"id\": 1}", b"[{\"name\": 1}]", &[0xff, 0xfe]];
    for garbage in samples {
        store.set(DEFAULT_CART_KEY, garbage).unwrap();
        let cart = CartStore::open(Cache::new(&store), Currency::SYP);
        assert!(cart.is_empty());
    }
}

#[test]
fn custom_key_isolates_carts() {
    let store = MemoryStore::new();
    let mut guest = CartStore::open_at(Cache::new(&store), "cart:guest", Currency::SYP);
    guest.add_to_cart(&catalog()[1], 1, None);

    let other = CartStore::open_at(Cache::new(&store), "cart:other", Currency::SYP);
    assert!(other.is_empty());
    assert_eq!(store.keys().unwrap(), vec!["cart:guest".to_string()]);
}

#[test]
fn pricing_matches_total() {
    let mut cart = CartStore::open(Cache::new(MemoryStore::new()), Currency::SYP);
    let products = catalog();
    cart.add_to_cart(&products[0], 2, None);
    cart.add_to_cart(&products[1], 1, None);

    let pricing = cart.pricing().unwrap();
    assert_eq!(pricing.subtotal, cart.cart_total());
    assert_eq!(pricing.grand_total, syp(1_100));
    assert_eq!(pricing.savings, syp(100));
}
