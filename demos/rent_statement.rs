//! Rent statement example

use bigdecimal::BigDecimal;
use rent_ledger_core::utils::{parse_date, MemoryStorage};
use rent_ledger_core::{LeaseBuilder, LedgerConfig, Notice, Payment, RentBook, TenancyStorage};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rent_ledger_core=debug")),
        )
        .init();

    println!("Rent Ledger Core - Rent Statement Example\n");

    let storage = MemoryStorage::new();
    let mut book = RentBook::new(storage).with_config(LedgerConfig::default());

    // 1. A prorated lease starting mid-month with a one-off discount
    let lease = LeaseBuilder::new("unit-302".to_string(), parse_date("2024-03-15")?, BigDecimal::from(300000))
        .prorated()
        .contract_end(parse_date("2024-10-20")?)
        .build()?;
    book.save_lease(&lease).await?;
    book.set_rent_override(
        "unit-302",
        parse_date("2024-06-01")?,
        BigDecimal::from(250000),
        Some("boiler repair discount".to_string()),
    )
    .await?;

    // 2. Payments, recorded out of order
    for (d, amount) in [
        (parse_date("2024-05-02")?, 300000),
        (parse_date("2024-03-20")?, 100000),
        (parse_date("2024-04-01")?, 300000),
        (parse_date("2024-03-28")?, 64516),
        (parse_date("2024-06-05")?, 250000),
        (parse_date("2024-08-09")?, 150000),
    ] {
        book.record_payment(Payment::new("unit-302".to_string(), d, BigDecimal::from(amount)))
            .await?;
    }

    // 3. Statement through the as-of date
    let as_of = parse_date("2024-10-05")?;
    let rows = book.tenant_ledger("unit-302", as_of).await?;

    println!(
        "{:<8} {:>14} {:>11} {:>12} {:>14}  note",
        "month", "rent", "paid on", "paid", "balance"
    );
    for row in &rows {
        println!(
            "{:<8} {:>14} {:>11} {:>12} {:>14}  {}",
            row.month_key.to_string(),
            row.rent_due.round(0).to_string(),
            row.payment_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            row.payment_total.round(0).to_string(),
            row.balance.round(0).to_string(),
            row.note.as_deref().unwrap_or("")
        );
    }

    let summary = book.tenant_summary("unit-302", as_of).await?;
    println!(
        "\n{} months, rent {}, paid {}, outstanding {}",
        summary.months,
        summary.total_rent_due.round(0),
        summary.total_paid.round(0),
        summary.outstanding.round(0)
    );

    // 4. Notices
    for notice in book.tenant_notices("unit-302", as_of).await? {
        match notice {
            Notice::ContractExpiring {
                end_date, days_left, ..
            } => println!("  ! contract ends {end_date} ({days_left} days)"),
            Notice::PaymentDue {
                month, outstanding, ..
            } => println!("  ! no payment for {month}, outstanding {}", outstanding.round(0)),
        }
    }

    println!("\nLeases on file: {}", book.storage().list_leases().await?.len());

    Ok(())
}
