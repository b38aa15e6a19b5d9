//! Static registry of form templates.

use std::sync::LazyLock;

use super::template::{Field, FormTemplate, FormType, Section};

static TEMPLATES: LazyLock<Vec<FormTemplate>> =
    LazyLock::new(|| vec![schedule_c(), schedule_se(), form_1099_nec()]);

/// Returns the template registered for a form type.
#[must_use]
pub fn template_for(form_type: FormType) -> &'static FormTemplate {
    TEMPLATES
        .iter()
        .find(|t| t.form_type == form_type)
        .unwrap_or_else(|| unreachable!("every FormType has a registered template"))
}

/// Returns every registered template.
#[must_use]
pub fn all_templates() -> &'static [FormTemplate] {
    &TEMPLATES
}

fn schedule_c() -> FormTemplate {
    FormTemplate {
        form_type: FormType::ScheduleC,
        version: 1,
        title: "Schedule C - Profit or Loss From Business".into(),
        sections: vec![
            Section::new(
                "business_info",
                "Business Information",
                vec![
                    Field::text("business_name", "Principal business or profession"),
                    Field::text("business_code", "Business code"),
                    Field::text("ein", "Employer ID number (EIN)"),
                    Field::text("business_address", "Business address"),
                    Field::select(
                        "accounting_method",
                        "Accounting method",
                        &["cash", "accrual", "other"],
                    ),
                ],
            ),
            Section::new(
                "income",
                "Income",
                vec![
                    Field::currency("gross_receipts", "Gross receipts or sales"),
                    Field::currency("returns_allowances", "Returns and allowances"),
                    Field::currency("other_income", "Other income"),
                ],
            ),
            Section::new(
                "expenses",
                "Expenses",
                vec![
                    Field::currency("advertising", "Advertising"),
                    Field::currency("car_expenses", "Car and truck expenses"),
                    Field::currency("commissions", "Commissions and fees"),
                    Field::currency("contract_labor", "Contract labor"),
                    Field::currency("depreciation", "Depreciation and section 179"),
                    Field::currency("insurance", "Insurance (other than health)"),
                    Field::currency("legal_professional", "Legal and professional services"),
                    Field::currency("office_expenses", "Office expense"),
                    Field::currency("rent_lease_other", "Rent or lease (other business property)"),
                    Field::currency("repairs_maintenance", "Repairs and maintenance"),
                    Field::currency("supplies", "Supplies"),
                    Field::currency("taxes_licenses", "Taxes and licenses"),
                    Field::currency("travel", "Travel"),
                    Field::currency("meals", "Deductible meals"),
                    Field::currency("utilities", "Utilities"),
                    Field::currency("wages", "Wages"),
                ],
            ),
            Section::new(
                "home_office",
                "Home Office Information",
                vec![
                    Field::checkbox("use_home_office", "Home used for business"),
                    Field::number("home_office_area", "Business-use area (sq ft)"),
                    Field::number("total_home_area", "Total home area (sq ft)"),
                ],
            ),
            Section::new(
                "vehicle",
                "Vehicle Information",
                vec![
                    Field::checkbox("use_vehicle", "Vehicle used for business"),
                    Field::number("business_miles", "Business miles"),
                    Field::number("commuting_miles", "Commuting miles"),
                    Field::select(
                        "vehicle_method",
                        "Deduction method",
                        &["standard_mileage", "actual_expenses"],
                    ),
                ],
            ),
        ],
    }
}

fn schedule_se() -> FormTemplate {
    FormTemplate {
        form_type: FormType::ScheduleSe,
        version: 1,
        title: "Schedule SE - Self-Employment Tax".into(),
        sections: vec![
            Section::new(
                "taxpayer_info",
                "Taxpayer Information",
                vec![
                    Field::text("name", "Name of person with self-employment income"),
                    Field::text("ssn", "Social security number"),
                ],
            ),
            Section::new(
                "income_info",
                "Self-Employment Income",
                vec![
                    Field::currency("schedule_c_income", "Net profit from Schedule C"),
                    Field::currency("farm_income", "Net farm profit"),
                    Field::currency("partnership_income", "Partnership income"),
                    Field::currency("other_income", "Other self-employment income"),
                ],
            ),
        ],
    }
}

fn form_1099_nec() -> FormTemplate {
    FormTemplate {
        form_type: FormType::Form1099Nec,
        version: 1,
        title: "Form 1099-NEC - Nonemployee Compensation".into(),
        sections: vec![
            Section::new(
                "payer_info",
                "Payer Information",
                vec![
                    Field::text("payer_name", "Payer's name"),
                    Field::text("payer_tin", "Payer's TIN"),
                    Field::text("payer_address", "Payer's address"),
                    Field::text("payer_phone", "Payer's telephone number"),
                ],
            ),
            Section::new(
                "recipient_info",
                "Recipient Information",
                vec![
                    Field::text("recipient_name", "Recipient's name"),
                    Field::text("recipient_tin", "Recipient's TIN"),
                    Field::text("recipient_address", "Recipient's address"),
                ],
            ),
            Section::new(
                "payment_info",
                "Payment Information",
                vec![
                    Field::currency("nonemployee_compensation", "Nonemployee compensation"),
                    Field::currency("federal_income_tax_withheld", "Federal income tax withheld"),
                    Field::currency("state_tax_withheld", "State tax withheld"),
                    Field::text("state_code", "State"),
                ],
            ),
        ],
    }
}
