//! Integration tests for the credit limit ledger.
//!
//! - Conditional debit leaves the row untouched when it would overdraw
//! - Concurrent debits never over-commit a single (customer, tenor) pair
//! - The amount column can never be driven negative, even by a direct update

use assert_matches::assert_matches;
use futures::future::join_all;
use kredit_db::models::customer::CreateCustomer;
use kredit_db::models::customer_limit::{CreateCustomerLimit, UpdateCustomerLimit};
use kredit_db::repositories::{CustomerLimitRepo, CustomerRepo};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_customer(pool: &PgPool, email: &str, phone: &str) -> i64 {
    let customer = CustomerRepo::create(
        pool,
        &CreateCustomer {
            uuid: Uuid::new_v4(),
            email: email.to_string(),
            phone: phone.to_string(),
            password_hash: "hash".to_string(),
        },
    )
    .await
    .expect("customer insert should succeed");
    customer.id
}

async fn seed_limit(pool: &PgPool, customer_id: i64, tenor: i32, amount: Decimal) {
    CustomerLimitRepo::create(
        pool,
        &CreateCustomerLimit {
            customer_id,
            tenor,
            limit_amount: amount,
        },
    )
    .await
    .expect("limit insert should succeed");
}

async fn available(pool: &PgPool, customer_id: i64, tenor: i32) -> Decimal {
    CustomerLimitRepo::find_for_tenor(pool, customer_id, tenor)
        .await
        .unwrap()
        .expect("limit row should exist")
        .limit_amount
}

// ---------------------------------------------------------------------------
// Conditional debit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn reserve_within_limit_debits_row(pool: PgPool) {
    let customer_id = seed_customer(&pool, "a@example.com", "081200000001").await;
    seed_limit(&pool, customer_id, 1, dec!(100000.00)).await;

    let row = CustomerLimitRepo::reserve(&pool, customer_id, 1, dec!(60000))
        .await
        .unwrap()
        .expect("reservation should fit");
    assert_eq!(row.limit_amount, dec!(40000.00));
    assert_eq!(available(&pool, customer_id, 1).await, dec!(40000.00));
}

#[sqlx::test(migrations = "./migrations")]
async fn reserve_over_limit_writes_nothing(pool: PgPool) {
    let customer_id = seed_customer(&pool, "b@example.com", "081200000002").await;
    seed_limit(&pool, customer_id, 1, dec!(40000.00)).await;

    let row = CustomerLimitRepo::reserve(&pool, customer_id, 1, dec!(50000))
        .await
        .unwrap();
    assert!(row.is_none());
    assert_eq!(available(&pool, customer_id, 1).await, dec!(40000.00));
}

#[sqlx::test(migrations = "./migrations")]
async fn reserve_exact_limit_reaches_zero(pool: PgPool) {
    let customer_id = seed_customer(&pool, "c@example.com", "081200000003").await;
    seed_limit(&pool, customer_id, 3, dec!(500000.00)).await;

    CustomerLimitRepo::reserve(&pool, customer_id, 3, dec!(500000.00))
        .await
        .unwrap()
        .expect("exact reservation should fit");
    assert_eq!(available(&pool, customer_id, 3).await, Decimal::ZERO);

    let again = CustomerLimitRepo::reserve(&pool, customer_id, 3, dec!(0.01))
        .await
        .unwrap();
    assert!(again.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn reserve_unknown_tenor_returns_none(pool: PgPool) {
    let customer_id = seed_customer(&pool, "d@example.com", "081200000004").await;
    seed_limit(&pool, customer_id, 1, dec!(100000.00)).await;

    let row = CustomerLimitRepo::reserve(&pool, customer_id, 12, dec!(1))
        .await
        .unwrap();
    assert!(row.is_none());
    assert!(CustomerLimitRepo::find_for_tenor(&pool, customer_id, 12)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn reserve_only_touches_its_own_tenor(pool: PgPool) {
    let customer_id = seed_customer(&pool, "e@example.com", "081200000005").await;
    seed_limit(&pool, customer_id, 1, dec!(100000.00)).await;
    seed_limit(&pool, customer_id, 2, dec!(200000.00)).await;

    CustomerLimitRepo::reserve(&pool, customer_id, 2, dec!(150000))
        .await
        .unwrap()
        .expect("reservation should fit");
    assert_eq!(available(&pool, customer_id, 1).await, dec!(100000.00));
    assert_eq!(available(&pool, customer_id, 2).await, dec!(50000.00));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn concurrent_reservations_never_over_commit(pool: PgPool) {
    let customer_id = seed_customer(&pool, "f@example.com", "081200000006").await;
    seed_limit(&pool, customer_id, 1, dec!(100000.00)).await;

    let attempts = (0..10).map(|_| {
        let pool = pool.clone();
        async move { CustomerLimitRepo::reserve(&pool, customer_id, 1, dec!(30000)).await }
    });
    let results = join_all(attempts).await;

    let successes = results
        .into_iter()
        .map(|r| r.expect("reserve query should not error"))
        .filter(Option::is_some)
        .count();
    assert_eq!(successes, 3);
    assert_eq!(available(&pool, customer_id, 1).await, dec!(10000.00));
}

#[sqlx::test(migrations = "./migrations")]
async fn concurrent_reservations_in_transactions_never_over_commit(pool: PgPool) {
    let customer_id = seed_customer(&pool, "g@example.com", "081200000007").await;
    seed_limit(&pool, customer_id, 6, dec!(700000.00)).await;

    let attempts = (0..8).map(|_| {
        let pool = pool.clone();
        async move {
            let mut tx = pool.begin().await?;
            let row = CustomerLimitRepo::reserve(&mut *tx, customer_id, 6, dec!(200000)).await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(row.is_some())
        }
    });
    let results = join_all(attempts).await;

    let successes = results
        .into_iter()
        .map(|r| r.expect("transaction should not error"))
        .filter(|ok| *ok)
        .count();
    assert_eq!(successes, 3);
    assert_eq!(available(&pool, customer_id, 6).await, dec!(100000.00));
}

#[sqlx::test(migrations = "./migrations")]
async fn rolled_back_reservation_restores_limit(pool: PgPool) {
    let customer_id = seed_customer(&pool, "h@example.com", "081200000008").await;
    seed_limit(&pool, customer_id, 1, dec!(100000.00)).await;

    let mut tx = pool.begin().await.unwrap();
    CustomerLimitRepo::reserve(&mut *tx, customer_id, 1, dec!(25000))
        .await
        .unwrap()
        .expect("reservation should fit");
    tx.rollback().await.unwrap();

    assert_eq!(available(&pool, customer_id, 1).await, dec!(100000.00));
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn negative_amount_rejected_by_check_constraint(pool: PgPool) {
    let customer_id = seed_customer(&pool, "i@example.com", "081200000009").await;
    seed_limit(&pool, customer_id, 1, dec!(100.00)).await;
    let row = CustomerLimitRepo::find_for_tenor(&pool, customer_id, 1)
        .await
        .unwrap()
        .unwrap();

    let result = CustomerLimitRepo::update(
        &pool,
        row.id,
        customer_id,
        &UpdateCustomerLimit {
            tenor: None,
            limit_amount: Some(dec!(-1)),
        },
    )
    .await;
    assert_matches!(result, Err(sqlx::Error::Database(ref e)) if e.code().as_deref() == Some("23514"));
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_tenor_rejected(pool: PgPool) {
    let customer_id = seed_customer(&pool, "j@example.com", "081200000010").await;
    seed_limit(&pool, customer_id, 1, dec!(100.00)).await;

    let result = CustomerLimitRepo::create(
        &pool,
        &CreateCustomerLimit {
            customer_id,
            tenor: 1,
            limit_amount: dec!(5.00),
        },
    )
    .await;
    assert_matches!(
        result,
        Err(sqlx::Error::Database(ref e))
            if e.constraint() == Some("uq_customer_limits_customer_tenor")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_by_tenor_and_counts(pool: PgPool) {
    let customer_id = seed_customer(&pool, "k@example.com", "081200000011").await;
    for (tenor, amount) in [(1, dec!(100000.00)), (2, dec!(200000.00)), (3, dec!(500000.00))] {
        seed_limit(&pool, customer_id, tenor, amount).await;
    }

    let all = CustomerLimitRepo::list_for_customer(&pool, customer_id, None, 20, 0)
        .await
        .unwrap();
    assert_eq!(all.iter().map(|l| l.tenor).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(
        CustomerLimitRepo::count_for_customer(&pool, customer_id, None).await.unwrap(),
        3
    );

    let only_two = CustomerLimitRepo::list_for_customer(&pool, customer_id, Some(2), 20, 0)
        .await
        .unwrap();
    assert_eq!(only_two.len(), 1);
    assert_eq!(only_two[0].limit_amount, dec!(200000.00));
    assert_eq!(
        CustomerLimitRepo::count_for_customer(&pool, customer_id, Some(2)).await.unwrap(),
        1
    );
}
