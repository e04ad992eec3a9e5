//! Persistence round-trips: snapshots written by one store instance must
//! hydrate an identical fresh instance.

use std::sync::Arc;

use rust_decimal::Decimal;

use ute_shop_client::catalog::Catalog;
use ute_shop_client::storage::{KvStore, keys};
use ute_shop_client::store::{CartStore, CompareList, Wishlist};
use ute_shop_core::ProductId;

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::bundled())
}

#[test]
fn cart_round_trips_ids_quantities_and_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kv = KvStore::open(dir.path());

    {
        let mut cart = CartStore::new(kv.clone(), catalog());
        cart.add_quiet(&ProductId::from(3), Some(2));
        cart.add_quiet(&ProductId::from(1), None);
        cart.update_quantity(&ProductId::from(1), 4);
    }

    let rehydrated = CartStore::new(kv, catalog());
    let ids: Vec<&ProductId> = rehydrated.items().iter().map(|i| &i.product.id).collect();
    assert_eq!(ids, vec![&ProductId::from(3), &ProductId::from(1)]);
    assert_eq!(rehydrated.items()[0].quantity, 2);
    assert_eq!(rehydrated.items()[1].quantity, 4);
}

#[test]
fn cart_subtotal_survives_rehydration() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kv = KvStore::open(dir.path());

    let subtotal_before = {
        let mut cart = CartStore::new(kv.clone(), catalog());
        cart.add_quiet(&ProductId::from(1), Some(3));
        cart.add_quiet(&ProductId::from(2), Some(1));
        cart.subtotal()
    };

    let rehydrated = CartStore::new(kv, catalog());
    assert_eq!(rehydrated.subtotal(), subtotal_before);
    assert!(subtotal_before > Decimal::ZERO);
}

#[test]
fn wishlist_and_compare_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kv = KvStore::open(dir.path());

    {
        let mut wishlist = Wishlist::new(kv.clone());
        wishlist.toggle(&ProductId::from(5));
        wishlist.toggle(&ProductId::from(8));

        let mut compare = CompareList::new(kv.clone());
        compare.add(&ProductId::from(2));
    }

    let wishlist = Wishlist::new(kv.clone());
    assert!(wishlist.contains(&ProductId::from(5)));
    assert!(wishlist.contains(&ProductId::from(8)));
    assert_eq!(wishlist.ids().len(), 2);

    let compare = CompareList::new(kv);
    assert_eq!(compare.ids(), &[ProductId::from(2)]);
}

#[test]
fn numeric_snapshot_ids_hydrate_canonically() {
    // A snapshot written by an older frontend may carry numeric ids; they
    // must compare equal to string ids after hydration.
    let dir = tempfile::tempdir().expect("tempdir");
    let kv = KvStore::open(dir.path());
    kv.write(keys::WISHLIST, &serde_json::json!([5, "8"]));

    let wishlist = Wishlist::new(kv);
    assert!(wishlist.contains(&ProductId::from("5")));
    assert!(wishlist.contains(&ProductId::from(8)));
}

#[test]
fn corrupt_snapshot_hydrates_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kv = KvStore::open(dir.path());
    std::fs::write(dir.path().join("cart.json"), b"\xff\xfe not json").expect("write");

    let cart = CartStore::new(kv, catalog());
    assert!(cart.is_empty());
}

#[test]
fn mutations_after_corruption_repair_the_snapshot() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kv = KvStore::open(dir.path());
    std::fs::write(dir.path().join("wishlist.json"), b"[1,").expect("write");

    {
        let mut wishlist = Wishlist::new(kv.clone());
        assert!(wishlist.ids().is_empty());
        wishlist.toggle(&ProductId::from(9));
    }

    let rehydrated = Wishlist::new(kv);
    assert_eq!(rehydrated.ids(), &[ProductId::from(9)]);
}
