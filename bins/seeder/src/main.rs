//! Database seeder for fylr development and testing.
//!
//! Seeds a demo user with a business profile, a partly filled Schedule C
//! and a handful of categorized ledger entries.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Duration, Utc};
use fylr_core::auth::hash_password;
use fylr_core::forms::{FormData, FormType};
use fylr_core::ledger::{Categorization, LedgerEntry};
use fylr_core::profile::{BusinessProfile, EntityType};
use fylr_db::{LedgerEntryRepository, TaxFormRepository, UserRepository};
use fylr_shared::types::UserId;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde_json::json;

const DEMO_EMAIL: &str = "demo@fylr.dev";
const DEMO_PASSWORD: &str = "demo-password";

/// (description, amount in cents, category, deductible, confidence in thousandths, days ago)
const SAMPLE_EXPENSES: &[(&str, i64, &str, bool, i64, i64)] = &[
    ("Figma annual plan", 14_400, "software", true, 950, 40),
    ("Flight to client workshop", 38_900, "travel", true, 900, 32),
    ("Lunch with prospective client", 6_250, "meals", true, 820, 25),
    ("Printer paper and toner", 8_730, "office_supplies", true, 880, 18),
    ("Coworking day pass", 2_500, "office_supplies", true, 610, 9),
    ("Groceries", 11_420, "personal", false, 770, 4),
    ("Misc card charge", 1_999, "uncategorized", false, 0, 1),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = fylr_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding demo user...");
    let Some(user_id) = seed_demo_user(&db).await? else {
        println!("  Demo user already exists, skipping...");
        println!("Seeding complete!");
        return Ok(());
    };

    println!("Seeding Schedule C...");
    seed_schedule_c(&db, user_id).await?;

    println!("Seeding ledger entries...");
    seed_ledger(&db, user_id).await?;

    println!("Seeding complete!");
    println!("  Login: {DEMO_EMAIL} / {DEMO_PASSWORD}");
    Ok(())
}

/// Creates the demo user, returning `None` if it already exists.
async fn seed_demo_user(db: &DatabaseConnection) -> anyhow::Result<Option<UserId>> {
    let users = UserRepository::new(db);
    if users.email_exists(DEMO_EMAIL).await? {
        return Ok(None);
    }

    let hash = hash_password(DEMO_PASSWORD)?;
    let user = users.create(DEMO_EMAIL, &hash).await?;

    let profile = BusinessProfile {
        entity_type: Some(EntityType::SoleProprietor),
        state: Some("CA".to_string()),
        industry: Some("Design consulting".to_string()),
        annual_revenue: Some(Decimal::from(84_000)),
        employee_count: Some(0),
        has_home_office: true,
        ..BusinessProfile::default()
    }
    .validated()?;
    users.update_profile(user.id, &profile).await?;

    println!("  Created {DEMO_EMAIL}");
    Ok(Some(UserId::from_uuid(user.id)))
}

async fn seed_schedule_c(db: &DatabaseConnection, user_id: UserId) -> anyhow::Result<()> {
    let forms = TaxFormRepository::new(db);
    let record = forms
        .get_or_create(user_id.into_inner(), FormType::ScheduleC)
        .await?;

    let mut data: FormData = record.data;
    for (key, value) in [
        ("business_info.business_name", json!("Demo Design Studio")),
        ("business_info.business_code", json!("541430")),
        ("business_info.accounting_method", json!("cash")),
        ("income.gross_receipts", json!("84000.00")),
        ("expenses.office_expenses", json!("1180.00")),
        ("expenses.travel", json!("389.00")),
        ("home_office.use_home_office", json!(true)),
    ] {
        data.insert(key, value);
    }

    let updated = forms.update_data(record.model.id, &data).await?;
    println!(
        "  Schedule C at {}% complete",
        updated.completion_percentage
    );
    Ok(())
}

async fn seed_ledger(db: &DatabaseConnection, user_id: UserId) -> anyhow::Result<()> {
    let ledger = LedgerEntryRepository::new(db);
    let now = Utc::now();

    for &(description, cents, category, deductible, confidence, days_ago) in SAMPLE_EXPENSES {
        let categorization = Categorization::validated(
            category,
            deductible,
            Decimal::new(confidence, 3),
            "Seeded example",
        )?;
        let entry = LedgerEntry::record(
            user_id,
            Decimal::new(cents, 2),
            description,
            &categorization,
            now - Duration::days(days_ago),
        );
        ledger
            .create(&entry, Some(&categorization.reasoning))
            .await?;
    }

    println!("  Created {} entries", SAMPLE_EXPENSES.len());
    Ok(())
}
