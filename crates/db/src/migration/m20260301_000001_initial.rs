//! Initial database migration.
//!
//! Creates the subscription tier enum, the users, tax forms and ledger
//! entries tables, and the `updated_at` trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(FUNCTIONS_SQL).await?;

        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(TAX_FORMS_SQL).await?;
        db.execute_unprepared(LEDGER_ENTRIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE subscription_tier AS ENUM ('trial', 'basic', 'pro');
";

const FUNCTIONS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;
";

const USERS_SQL: &str = r#"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    business_profile JSONB NOT NULL DEFAULT '{"version": 1}'::jsonb,
    subscription_tier subscription_tier NOT NULL DEFAULT 'trial',
    stripe_customer_id VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_stripe_customer ON users(stripe_customer_id)
    WHERE stripe_customer_id IS NOT NULL;

CREATE TRIGGER trg_users_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
"#;

const TAX_FORMS_SQL: &str = r"
CREATE TABLE tax_forms (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    form_type VARCHAR(32) NOT NULL,
    template_version INTEGER NOT NULL DEFAULT 1,
    form_data JSONB NOT NULL DEFAULT '{}'::jsonb,
    completion_percentage NUMERIC(5, 2) NOT NULL DEFAULT 0
        CHECK (completion_percentage BETWEEN 0 AND 100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_tax_forms_user_form_type UNIQUE (user_id, form_type)
);

CREATE TRIGGER trg_tax_forms_updated_at
    BEFORE UPDATE ON tax_forms
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const LEDGER_ENTRIES_SQL: &str = r"
CREATE TABLE ledger_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    amount NUMERIC(15, 2) NOT NULL CHECK (amount > 0),
    description TEXT NOT NULL CHECK (length(trim(description)) > 0),
    category VARCHAR(64) NOT NULL DEFAULT 'uncategorized',
    tax_deductible BOOLEAN NOT NULL DEFAULT false,
    confidence NUMERIC(4, 3) NOT NULL DEFAULT 0
        CHECK (confidence BETWEEN 0 AND 1),
    reasoning TEXT,
    transaction_date TIMESTAMPTZ NOT NULL DEFAULT now(),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_ledger_entries_user_date
    ON ledger_entries(user_id, transaction_date DESC, created_at DESC);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS ledger_entries CASCADE;
DROP TABLE IF EXISTS tax_forms CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP FUNCTION IF EXISTS set_updated_at();

DROP TYPE IF EXISTS subscription_tier CASCADE;
";
