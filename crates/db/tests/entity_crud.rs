//! Integration tests for customer, session, and transaction persistence.
//!
//! - Unique constraints on customer identity columns
//! - Cascade delete from customers
//! - Session revocation
//! - Transaction/asset linking and owner scoping

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use kredit_db::models::asset::CreateAsset;
use kredit_db::models::customer::{CreateCustomer, CustomerFilter, UpdateCustomer};
use kredit_db::models::customer_profile::ProfileFields;
use kredit_db::models::customer_token::CreateCustomerToken;
use kredit_db::models::transaction::{CreateTransaction, UpdateTransaction};
use kredit_db::repositories::{
    AssetRepo, CustomerProfileRepo, CustomerRepo, CustomerTokenRepo, TransactionRepo,
};
use rust_decimal_macros::dec;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_customer(email: &str, phone: &str) -> CreateCustomer {
    CreateCustomer {
        uuid: Uuid::new_v4(),
        email: email.to_string(),
        phone: phone.to_string(),
        password_hash: "hash".to_string(),
    }
}

fn new_token(customer_id: i64, tag: &str) -> CreateCustomerToken {
    let now = Utc::now();
    CreateCustomerToken {
        customer_id,
        access_token_hash: format!("access-{tag}"),
        refresh_token_hash: format!("refresh-{tag}"),
        user_agent: Some("test-agent".to_string()),
        ip_address: Some("127.0.0.1".to_string()),
        access_token_expired_at: now + Duration::minutes(15),
        refresh_token_expired_at: now + Duration::days(7),
    }
}

fn new_transaction(customer_id: i64) -> CreateTransaction {
    CreateTransaction {
        uuid: Uuid::new_v4(),
        customer_id,
        contract_number: "CN-001".to_string(),
        otr_amount: dec!(52000),
        admin_fee: dec!(2500),
        installment_amount: dec!(50000),
        installment_period: 1,
        interest_amount: dec!(1000),
        sales_channel: "web".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn customer_create_and_lookup(pool: PgPool) {
    let input = new_customer("alice@example.com", "081234567890");
    let created = CustomerRepo::create(&pool, &input).await.unwrap();
    assert_eq!(created.uuid, input.uuid);
    assert!(created.last_login_at.is_none());

    let by_email = CustomerRepo::find_by_email(&pool, "alice@example.com").await.unwrap();
    assert_eq!(by_email.map(|c| c.id), Some(created.id));
    let by_phone = CustomerRepo::find_by_phone(&pool, "081234567890").await.unwrap();
    assert_eq!(by_phone.map(|c| c.id), Some(created.id));
    let by_uuid = CustomerRepo::find_by_uuid(&pool, input.uuid).await.unwrap();
    assert_eq!(by_uuid.map(|c| c.id), Some(created.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn customer_duplicate_email_and_phone_rejected(pool: PgPool) {
    CustomerRepo::create(&pool, &new_customer("dup@example.com", "081111111111"))
        .await
        .unwrap();

    let dup_email =
        CustomerRepo::create(&pool, &new_customer("dup@example.com", "082222222222")).await;
    assert_matches!(
        dup_email,
        Err(sqlx::Error::Database(ref e)) if e.constraint() == Some("uq_customers_email")
    );

    let dup_phone =
        CustomerRepo::create(&pool, &new_customer("other@example.com", "081111111111")).await;
    assert_matches!(
        dup_phone,
        Err(sqlx::Error::Database(ref e)) if e.constraint() == Some("uq_customers_phone")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn customer_update_list_and_record_login(pool: PgPool) {
    let a = CustomerRepo::create(&pool, &new_customer("a@example.com", "081200000001"))
        .await
        .unwrap();
    CustomerRepo::create(&pool, &new_customer("b@example.com", "081200000002"))
        .await
        .unwrap();

    let updated = CustomerRepo::update(
        &pool,
        a.uuid,
        &UpdateCustomer {
            email: Some("a2@example.com".to_string()),
            phone: None,
        },
    )
    .await
    .unwrap()
    .expect("customer should exist");
    assert_eq!(updated.email, "a2@example.com");
    assert_eq!(updated.phone, "081200000001");

    let filter = CustomerFilter {
        email: Some("a2@example.com".to_string()),
        phone: None,
    };
    let found = CustomerRepo::list(&pool, &filter, 20, 0).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(CustomerRepo::count(&pool, &CustomerFilter::default()).await.unwrap(), 2);

    CustomerRepo::record_login(&pool, a.id).await.unwrap();
    let reloaded = CustomerRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert!(reloaded.last_login_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn customer_row_lock_blocks_second_transaction(pool: PgPool) {
    let customer = CustomerRepo::create(&pool, &new_customer("l@example.com", "081200000009"))
        .await
        .unwrap();
    assert!(!CustomerRepo::lock_for_update(&pool, customer.id + 1000).await.unwrap());

    let mut holder = pool.begin().await.unwrap();
    assert!(CustomerRepo::lock_for_update(&mut *holder, customer.id).await.unwrap());

    let mut waiter = pool.begin().await.unwrap();
    sqlx::query("SET LOCAL lock_timeout = '100ms'")
        .execute(&mut *waiter)
        .await
        .unwrap();
    let err = CustomerRepo::lock_for_update(&mut *waiter, customer.id)
        .await
        .unwrap_err();
    assert_matches!(&err, sqlx::Error::Database(db) if db.code().as_deref() == Some("55P03"));
    waiter.rollback().await.unwrap();

    holder.commit().await.unwrap();
    let mut next = pool.begin().await.unwrap();
    assert!(CustomerRepo::lock_for_update(&mut *next, customer.id).await.unwrap());
    next.commit().await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn customer_delete_cascades(pool: PgPool) {
    let customer = CustomerRepo::create(&pool, &new_customer("c@example.com", "081200000003"))
        .await
        .unwrap();
    CustomerTokenRepo::create(&pool, &new_token(customer.id, "c"))
        .await
        .unwrap();
    CustomerProfileRepo::create(&pool, customer.id, &ProfileFields::default())
        .await
        .unwrap();

    assert!(CustomerRepo::delete(&pool, customer.uuid).await.unwrap());
    assert!(!CustomerRepo::delete(&pool, customer.uuid).await.unwrap());
    assert_eq!(
        CustomerTokenRepo::count_for_customer(&pool, customer.id).await.unwrap(),
        0
    );
    assert!(CustomerProfileRepo::find_by_customer(&pool, customer.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn profile_is_unique_per_customer_and_patchable(pool: PgPool) {
    let customer = CustomerRepo::create(&pool, &new_customer("p@example.com", "081200000004"))
        .await
        .unwrap();
    let fields = ProfileFields {
        full_name: Some("Budi Santoso".to_string()),
        salary: Some(dec!(7500000)),
        ..Default::default()
    };
    CustomerProfileRepo::create(&pool, customer.id, &fields)
        .await
        .unwrap();

    let second = CustomerProfileRepo::create(&pool, customer.id, &fields).await;
    assert_matches!(
        second,
        Err(sqlx::Error::Database(ref e)) if e.constraint() == Some("uq_customer_profiles_customer")
    );

    let patched = CustomerProfileRepo::update(
        &pool,
        customer.id,
        &ProfileFields {
            nik: Some("3171234567890001".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("profile should exist");
    assert_eq!(patched.full_name.as_deref(), Some("Budi Santoso"));
    assert_eq!(patched.nik.as_deref(), Some("3171234567890001"));
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn tokens_lookup_and_revoke(pool: PgPool) {
    let customer = CustomerRepo::create(&pool, &new_customer("t@example.com", "081200000005"))
        .await
        .unwrap();
    let first = CustomerTokenRepo::create(&pool, &new_token(customer.id, "one"))
        .await
        .unwrap();
    CustomerTokenRepo::create(&pool, &new_token(customer.id, "two"))
        .await
        .unwrap();

    let by_access = CustomerTokenRepo::find_by_access_token_hash(&pool, "access-one")
        .await
        .unwrap();
    assert_eq!(by_access.map(|t| t.id), Some(first.id));
    let by_refresh = CustomerTokenRepo::find_by_refresh_token_hash(&pool, "refresh-one")
        .await
        .unwrap();
    assert_eq!(by_refresh.map(|t| t.id), Some(first.id));

    assert!(CustomerTokenRepo::delete(&pool, first.id, customer.id).await.unwrap());
    let removed = CustomerTokenRepo::delete_all_for_customer(&pool, customer.id)
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(
        CustomerTokenRepo::count_for_customer(&pool, customer.id).await.unwrap(),
        0
    );
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn transaction_links_asset_and_is_owner_scoped(pool: PgPool) {
    let owner = CustomerRepo::create(&pool, &new_customer("o@example.com", "081200000006"))
        .await
        .unwrap();
    let stranger = CustomerRepo::create(&pool, &new_customer("s@example.com", "081200000007"))
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let created = TransactionRepo::create(&mut *tx, &new_transaction(owner.id))
        .await
        .unwrap();
    assert!(created.asset_id.is_none());
    let asset = AssetRepo::create(
        &mut *tx,
        &CreateAsset {
            name: "Phone".to_string(),
            asset_type: "electronics".to_string(),
            description: None,
            price: dec!(50000),
        },
    )
    .await
    .unwrap();
    let linked = TransactionRepo::link_asset(&mut *tx, created.id, asset.id)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    assert_eq!(linked.asset_id, Some(asset.id));

    assert!(TransactionRepo::find_for_customer(&pool, created.uuid, stranger.id)
        .await
        .unwrap()
        .is_none());
    let page = TransactionRepo::list_for_customer(&pool, owner.id, 20, 0)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);

    let found = AssetRepo::find_by_ids(&pool, &[asset.id]).await.unwrap();
    assert_eq!(found.len(), 1);

    let edited = TransactionRepo::update(
        &pool,
        created.uuid,
        owner.id,
        &UpdateTransaction {
            contract_number: Some("CN-002".to_string()),
            sales_channel: None,
        },
    )
    .await
    .unwrap()
    .expect("transaction should exist");
    assert_eq!(edited.contract_number, "CN-002");
    assert_eq!(edited.installment_amount, dec!(50000));

    assert!(!TransactionRepo::delete(&pool, created.uuid, stranger.id).await.unwrap());
    assert!(TransactionRepo::delete(&pool, created.uuid, owner.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_asset_nulls_transaction_link(pool: PgPool) {
    let owner = CustomerRepo::create(&pool, &new_customer("n@example.com", "081200000008"))
        .await
        .unwrap();
    let created = TransactionRepo::create(&pool, &new_transaction(owner.id))
        .await
        .unwrap();
    let asset = AssetRepo::create(
        &pool,
        &CreateAsset {
            name: "Laptop".to_string(),
            asset_type: "electronics".to_string(),
            description: Some("14 inch".to_string()),
            price: dec!(75000),
        },
    )
    .await
    .unwrap();
    TransactionRepo::link_asset(&pool, created.id, asset.id)
        .await
        .unwrap();

    sqlx::query("DELETE FROM assets WHERE id = $1")
        .bind(asset.id)
        .execute(&pool)
        .await
        .unwrap();

    let reloaded = TransactionRepo::find_by_uuid(&pool, created.uuid)
        .await
        .unwrap()
        .unwrap();
    assert!(reloaded.asset_id.is_none());
}
