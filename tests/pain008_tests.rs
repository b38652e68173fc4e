#![cfg(feature = "pain008")]

use std::sync::Arc;

use adeudo::core::*;
use adeudo::pain008;
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn presenter() -> Presenter {
    Presenter::new("ES00-COMPANY123-12345678X", "Mi Empresa S.L.", "0182").unwrap()
}

fn creditor() -> Creditor {
    Creditor::new(
        "ES00-COMPANY123-12345678X",
        date(2030, 1, 10),
        "Mi Empresa S.L.",
        "ES9121000418450200051332",
        "BBVAESMMXXX",
        "ES50000B01958115",
    )
    .unwrap()
}

fn debtor() -> Arc<Debtor> {
    Arc::new(Debtor::new("Cliente Ejemplo", "ES7620770024003102575766", "BSCHESMMXXX").unwrap())
}

fn payment(n: u32, amount: Decimal) -> Payment {
    Payment::new(
        debtor(),
        format!("MANDATE-{n}"),
        date(2023, 1, 15),
        SequenceType::Recurring,
        format!("INV-2023-00{n}"),
        amount,
        format!("Factura {n}"),
    )
    .unwrap()
}

fn builder() -> DirectDebitBuilder {
    DirectDebitBuilder::new()
        .presenter(presenter())
        .creditor(creditor())
}

/// Text between the first `<tag>` and its closing tag.
fn element_text<'a>(xml: &'a str, tag: &str) -> &'a str {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = xml.find(&open).unwrap() + open.len();
    let end = xml[start..].find(&close).unwrap() + start;
    &xml[start..end]
}

// --- Scenarios ---

#[test]
fn single_payment() {
    let xml = builder()
        .add_payment(payment(1, dec!(150.50)))
        .generate_xml()
        .unwrap();

    assert!(xml.contains("<NbOfTxs>1</NbOfTxs>"));
    assert!(xml.contains("<CtrlSum>150.50</CtrlSum>"));
    assert!(xml.contains("CstmrDrctDbtInitn"));
    assert!(xml.contains("Mi Empresa S.L."));
    assert!(xml.contains("pain.008.001.02"));
}

#[test]
fn two_payments_control_sum() {
    let xml = builder()
        .add_payment(payment(1, dec!(150.50)))
        .add_payment(payment(2, dec!(200.00)))
        .generate_xml()
        .unwrap();

    assert!(xml.contains("<NbOfTxs>2</NbOfTxs>"));
    assert!(xml.contains("<CtrlSum>350.50</CtrlSum>"));
}

#[test]
fn five_payments() {
    let mut b = builder();
    for i in 1..=5 {
        b = b.add_payment(payment(i, Decimal::from(100 * i)));
    }
    let xml = b.generate_xml().unwrap();

    assert!(xml.contains("<NbOfTxs>5</NbOfTxs>"));
    assert!(xml.contains("<CtrlSum>1500.00</CtrlSum>"));
    assert_eq!(xml.matches("<DrctDbtTxInf>").count(), 5);
    assert_eq!(xml.matches("</DrctDbtTxInf>").count(), 5);
}

#[test]
fn short_spanish_iban_never_reaches_xml() {
    let err = Debtor::new("Cliente Ejemplo", "ES180182000000000000000", "BSCHESMMXXX").unwrap_err();
    assert_eq!(err.message(), "Spanish IBAN must be 24 characters long");
}

#[test]
fn office_code_boundaries() {
    assert!(Presenter::new("ES00-COMPANY123-12345678X", "Mi Empresa S.L.", "0000").is_err());
    assert!(Presenter::new("ES00-COMPANY123-12345678X", "Mi Empresa S.L.", "0182").is_ok());
}

// --- Structure ---

#[test]
fn transactions_follow_insertion_order() {
    let xml = builder()
        .add_payment(payment(3, dec!(3)))
        .add_payment(payment(1, dec!(1)))
        .add_payment(payment(2, dec!(2)))
        .generate_xml()
        .unwrap();

    let p3 = xml.find("<EndToEndId>INV-2023-003</EndToEndId>").unwrap();
    let p1 = xml.find("<EndToEndId>INV-2023-001</EndToEndId>").unwrap();
    let p2 = xml.find("<EndToEndId>INV-2023-002</EndToEndId>").unwrap();
    assert!(p3 < p1 && p1 < p2);
}

#[test]
fn group_header_precedes_payment_information() {
    let xml = builder()
        .add_payment(payment(1, dec!(10)))
        .generate_xml()
        .unwrap();

    let order = [
        "<GrpHdr>",
        "<MsgId>",
        "<CreDtTm>",
        "<NbOfTxs>",
        "<CtrlSum>",
        "<InitgPty>",
        "</GrpHdr>",
        "<PmtInf>",
        "<PmtInfId>",
        "<PmtMtd>DD</PmtMtd>",
        "<PmtTpInf>",
        "<Cd>SEPA</Cd>",
        "<Cd>CORE</Cd>",
        "<SeqTp>RCUR</SeqTp>",
        "<ReqdColltnDt>2030-01-10</ReqdColltnDt>",
        "<Cdtr>",
        "<CdtrAcct>",
        "<CdtrAgt>",
        "<CdtrSchmeId>",
        "<DrctDbtTxInf>",
        "<PmtId>",
        "<InstdAmt Ccy=\"EUR\">10.00</InstdAmt>",
        "<MndtId>MANDATE-1</MndtId>",
        "<DtOfSgntr>2023-01-15</DtOfSgntr>",
        "<Id>NOTPROVIDED</Id>",
        "<Dbtr>",
        "<DbtrAcct>",
        "<Ustrd>Factura 1</Ustrd>",
        "</PmtInf>",
    ];
    let mut last = 0;
    for needle in order {
        let pos = xml[last..]
            .find(needle)
            .unwrap_or_else(|| panic!("{needle} missing or out of order"))
            + last;
        last = pos;
    }
}

#[test]
fn document_root_and_namespaces() {
    let xml = builder()
        .add_payment(payment(1, dec!(10)))
        .generate_xml()
        .unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Document "));
    assert!(xml.contains("xmlns=\"urn:iso:std:iso:20022:tech:xsd:pain.008.001.02\""));
    assert!(xml.contains("xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\""));
    assert!(xml.contains(
        "xsi:schemaLocation=\"urn:iso:std:iso:20022:tech:xsd:pain.008.001.02 pain.008.001.02.xsd\""
    ));
    assert!(xml.ends_with("</Document>"));
}

#[test]
fn header_uses_builder_identity() {
    let ts = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 5).unwrap();
    let xml = DirectDebitBuilder::with_identity("SEPA-TEST-0001", ts)
        .unwrap()
        .presenter(presenter())
        .creditor(creditor())
        .payment_info_id("REMESA-2024-06")
        .add_payment(payment(1, dec!(10)))
        .generate_xml()
        .unwrap();

    assert_eq!(element_text(&xml, "MsgId"), "SEPA-TEST-0001");
    assert_eq!(element_text(&xml, "CreDtTm"), "2024-06-15T10:30:05Z");
    assert_eq!(element_text(&xml, "PmtInfId"), "REMESA-2024-06");
}

#[test]
fn generated_identity_shapes() {
    let b = builder().add_payment(payment(1, dec!(10)));
    let msg_id = b.message_id().to_string();
    let created = b.creation_date_time();
    let xml = b.generate_xml().unwrap();

    assert_eq!(element_text(&xml, "MsgId"), msg_id);
    assert!(msg_id.starts_with("SEPA-"));
    assert_eq!(
        element_text(&xml, "CreDtTm"),
        created.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    );
    assert!(element_text(&xml, "PmtInfId").starts_with("PMT-"));
}

#[test]
fn party_data_lands_in_the_right_blocks() {
    let xml = builder()
        .add_payment(payment(1, dec!(10)))
        .generate_xml()
        .unwrap();

    assert!(xml.contains("<IBAN>ES9121000418450200051332</IBAN>"));
    assert!(xml.contains("<BIC>BBVAESMMXXX</BIC>"));
    assert!(xml.contains("<Id>ES50000B01958115</Id>"));
    assert!(xml.contains("<Nm>Cliente Ejemplo</Nm>"));
    assert!(xml.contains("<IBAN>ES7620770024003102575766</IBAN>"));
    // The debtor BIC is not part of the transaction block.
    assert!(!xml.contains("BSCHESMMXXX"));
}

#[test]
fn serializer_is_pure() {
    let msg = builder()
        .add_payment(payment(1, dec!(10)))
        .add_payment(payment(2, dec!(20.5)))
        .build()
        .unwrap();
    let a = pain008::to_pain008_xml(&msg).unwrap();
    let b = pain008::to_pain008_xml(&msg).unwrap();
    assert_eq!(a, b);
    assert!(a.contains("<InstdAmt Ccy=\"EUR\">20.50</InstdAmt>"));
}

// --- Aggregate failures ---

#[test]
fn generate_xml_requires_presenter() {
    let err = DirectDebitBuilder::new()
        .creditor(creditor())
        .add_payment(payment(1, dec!(10)))
        .generate_xml()
        .unwrap_err();
    assert_eq!(err.message(), "Presenter data is required");
}

#[test]
fn generate_xml_requires_creditor() {
    let err = DirectDebitBuilder::new()
        .presenter(presenter())
        .add_payment(payment(1, dec!(10)))
        .generate_xml()
        .unwrap_err();
    assert_eq!(err.message(), "Creditor data is required");
}

#[test]
fn generate_xml_requires_payments() {
    let err = builder().generate_xml().unwrap_err();
    assert_eq!(err.message(), "At least one payment is required");
}
