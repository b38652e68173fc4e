use std::sync::Arc;

use adeudo::core::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn main() {
    // Monthly remittance for two customers of a Spanish company
    let presenter = Presenter::new("ES00-COMPANY123-12345678X", "Mi Empresa S.L.", "0182").unwrap();
    let creditor = Creditor::new(
        "ES00-COMPANY123-12345678X",
        NaiveDate::from_ymd_opt(2030, 1, 10).unwrap(),
        "Mi Empresa S.L.",
        "ES91 2100 0418 4502 0005 1332",
        "BBVAESMMXXX",
        "ES50000B01958115",
    )
    .unwrap();

    let ana = Arc::new(
        Debtor::new("Ana García López", "ES7620770024003102575766", "BSCHESMMXXX").unwrap(),
    );
    let pedro = Arc::new(
        Debtor::new("Pedro Martínez", "ES6000491500051234567892", "BSCHESMMXXX").unwrap(),
    );

    let builder = DirectDebitBuilder::new()
        .presenter(presenter)
        .creditor(creditor)
        .add_payment(
            Payment::new(
                Arc::clone(&ana),
                "MANDATE-ANA-001",
                NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
                SequenceType::Recurring,
                "INV-2030-001",
                dec!(49.90),
                "Cuota enero 2030",
            )
            .unwrap(),
        )
        .add_payment(
            Payment::new(
                Arc::clone(&pedro),
                "MANDATE-PEDRO-001",
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                SequenceType::First,
                "INV-2030-002",
                dec!(120),
                "Alta servicio",
            )
            .unwrap(),
        )
        .add_payment(
            Payment::new(
                ana,
                "MANDATE-ANA-001",
                NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
                SequenceType::Recurring,
                "INV-2030-003",
                dec!(15.25),
                "Consumo adicional",
            )
            .unwrap(),
        );

    println!("Message:      {}", builder.message_id());
    println!("Transactions: {}", builder.number_of_transactions());
    println!("Control sum:  {} EUR", builder.control_sum());

    let xml = builder.generate_xml().unwrap();
    println!("\n{xml}");
}
