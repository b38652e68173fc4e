use std::sync::Arc;

use adeudo::core::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn main() {
    // ── 1. Field validation: each constructor reports the first failing rule ──
    println!("=== Field Validation ===");
    let attempts: Vec<(&str, Result<(), SepaError>)> = vec![
        (
            "presenter office 0000",
            Presenter::new("ES00-COMPANY123-12345678X", "Mi Empresa S.L.", "0000").map(|_| ()),
        ),
        (
            "short Spanish IBAN",
            Debtor::new("Cliente", "ES180182000000000000000", "BSCHESMMXXX").map(|_| ()),
        ),
        (
            "bad IBAN checksum",
            Debtor::new("Cliente", "ES1801820000000000000000", "BSCHESMMXXX").map(|_| ()),
        ),
        (
            "bad BIC",
            Debtor::new("Cliente", "ES7620770024003102575766", "BSCH").map(|_| ()),
        ),
        (
            "debtor name with @",
            Debtor::new("cliente@example.com", "ES7620770024003102575766", "BSCHESMMXXX")
                .map(|_| ()),
        ),
    ];
    for (label, result) in attempts {
        match result {
            Ok(()) => println!("  {label}: ok"),
            Err(SepaError::Validation(e)) => println!("  {label}: [{}] {}", e.field, e.message),
            Err(e) => println!("  {label}: {e}"),
        }
    }

    // ── 2. Payment rules ──────────────────────────────────────────────
    println!("\n=== Payment Validation ===");
    let debtor = Arc::new(
        Debtor::new("Cliente Ejemplo", "ES7620770024003102575766", "BSCHESMMXXX").unwrap(),
    );
    let result = Payment::new(
        Arc::clone(&debtor),
        "MANDATE-1",
        NaiveDate::from_ymd_opt(2009, 10, 30).unwrap(),
        SequenceType::Recurring,
        "E2E-1",
        dec!(10),
        "",
    );
    if let Err(e) = result {
        println!("  Old mandate: {}", e.message());
    }
    let result = Payment::new(
        debtor,
        "MANDATE-1",
        NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        SequenceType::Recurring,
        "E2E-1",
        dec!(0),
        "",
    );
    if let Err(e) = result {
        println!("  Zero amount: {}", e.message());
    }

    // ── 3. Sequence type codes ────────────────────────────────────────
    println!("\n=== Sequence Types ===");
    for code in ["RCUR", "FRST", "XXXX"] {
        match code.parse::<SequenceType>() {
            Ok(seq) => println!("  {code}: {seq:?}"),
            Err(e) => println!("  {code}: {}", e.message),
        }
    }

    // ── 4. Builder errors: nothing is generated ───────────────────────
    println!("\n=== Builder Errors ===");
    match DirectDebitBuilder::new().generate_xml() {
        Ok(_) => println!("  unexpected XML"),
        Err(e) => println!("  Empty builder: {e}"),
    }

    // ── 5. Lenient options for synthetic test accounts ────────────────
    println!("\n=== Lenient Options ===");
    let opts = ValidationOptions::lenient();
    match Debtor::with_options("Cliente", "ES1801820000000000000000", "BSCHESMMXXX", &opts) {
        Ok(d) => println!("  Accepted synthetic IBAN {}", d.iban()),
        Err(e) => println!("  Rejected: {e}"),
    }
}
