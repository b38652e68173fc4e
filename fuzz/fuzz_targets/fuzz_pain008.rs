#![no_main]

use std::sync::Arc;

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

use adeudo::core::*;

fuzz_target!(|input: (String, String, Vec<u32>)| {
    let (name, concept, cents) = input;
    let (Some(mandate_date), Some(collection_date)) = (
        NaiveDate::from_ymd_opt(2023, 1, 15),
        NaiveDate::from_ymd_opt(2030, 1, 10),
    ) else {
        return;
    };
    let Ok(debtor) = Debtor::new(name, "ES7620770024003102575766", "BSCHESMMXXX") else {
        return;
    };
    let debtor = Arc::new(debtor);

    let Ok(presenter) = Presenter::new("ES00-FUZZ", "Fuzz S.L.", "0182") else {
        return;
    };
    let Ok(creditor) = Creditor::new(
        "ES00-FUZZ",
        collection_date,
        "Fuzz S.L.",
        "ES9121000418450200051332",
        "BBVAESMMXXX",
        "ES50000B01958115",
    ) else {
        return;
    };

    let mut builder = DirectDebitBuilder::new().presenter(presenter).creditor(creditor);
    let mut added = 0usize;
    for (n, c) in cents.iter().take(64).enumerate() {
        let payment = Payment::new(
            Arc::clone(&debtor),
            format!("M-{n}"),
            mandate_date,
            SequenceType::Recurring,
            format!("E-{n}"),
            Decimal::new(i64::from(*c), 2),
            concept.as_str(),
        );
        if let Ok(p) = payment {
            builder = builder.add_payment(p);
            added += 1;
        }
    }

    match builder.generate_xml() {
        Ok(xml) => assert_eq!(xml.matches("<DrctDbtTxInf>").count(), added),
        Err(_) => assert_eq!(added, 0),
    }
});
