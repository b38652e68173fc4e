use tracing::debug;

use super::xml_utils::{XmlResult, XmlWriter, format_amount, format_date, format_date_time};
use super::{PAIN008_NAMESPACE, PAIN008_SCHEMA_LOCATION, XSI_NAMESPACE, codes};
use crate::core::*;

/// Generate a `pain.008.001.02` Customer Direct Debit Initiation document.
///
/// All payments go into a single `PmtInf` block, one `DrctDbtTxInf` per
/// payment in the order they were added to the builder.
pub fn to_pain008_xml(message: &DirectDebit) -> XmlResult {
    let mut w = XmlWriter::new()?;

    w.start_element_with_attrs(
        "Document",
        &[
            ("xmlns", PAIN008_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", PAIN008_SCHEMA_LOCATION),
        ],
    )?;
    w.start_element("CstmrDrctDbtInitn")?;

    write_group_header(&mut w, message)?;
    write_payment_information(&mut w, message)?;

    w.end_element("CstmrDrctDbtInitn")?;
    w.end_element("Document")?;

    let xml = w.into_string()?;
    debug!(
        message_id = message.message_id(),
        bytes = xml.len(),
        "pain.008 document generated"
    );
    Ok(xml)
}

fn write_group_header(w: &mut XmlWriter, message: &DirectDebit) -> Result<(), SepaError> {
    let presenter = message.presenter();

    w.start_element("GrpHdr")?;
    w.text_element("MsgId", message.message_id())?;
    w.text_element("CreDtTm", &format_date_time(message.creation_date_time()))?;
    w.text_element("NbOfTxs", &message.number_of_transactions().to_string())?;
    w.text_element("CtrlSum", &format_amount(message.control_sum()))?;

    // Initiating party: the presenter
    w.start_element("InitgPty")?;
    w.text_element("Nm", presenter.name())?;
    w.nested_text_element(&["Id", "OrgId", "Othr", "Id"], presenter.identifier())?;
    w.end_element("InitgPty")?;

    w.end_element("GrpHdr")?;
    Ok(())
}

fn write_payment_information(w: &mut XmlWriter, message: &DirectDebit) -> Result<(), SepaError> {
    let creditor = message.creditor();

    w.start_element("PmtInf")?;
    w.text_element("PmtInfId", message.payment_info_id())?;
    w.text_element("PmtMtd", codes::PAYMENT_METHOD)?;

    w.start_element("PmtTpInf")?;
    w.nested_text_element(&["SvcLvl", "Cd"], codes::SERVICE_LEVEL)?;
    w.nested_text_element(&["LclInstrm", "Cd"], codes::LOCAL_INSTRUMENT)?;
    w.text_element("SeqTp", codes::SEQUENCE_TYPE)?;
    w.end_element("PmtTpInf")?;

    w.text_element("ReqdColltnDt", &format_date(creditor.collection_date()))?;

    w.nested_text_element(&["Cdtr", "Nm"], creditor.name())?;
    w.nested_text_element(&["CdtrAcct", "Id", "IBAN"], creditor.iban())?;
    w.nested_text_element(&["CdtrAgt", "FinInstnId", "BIC"], creditor.bic())?;
    w.nested_text_element(
        &["CdtrSchmeId", "Id", "PrvtId", "Othr", "Id"],
        creditor.scheme_id(),
    )?;

    for payment in message.payments() {
        write_transaction(w, payment)?;
    }

    w.end_element("PmtInf")?;
    Ok(())
}

fn write_transaction(w: &mut XmlWriter, payment: &Payment) -> Result<(), SepaError> {
    let debtor = payment.debtor();

    w.start_element("DrctDbtTxInf")?;
    w.nested_text_element(&["PmtId", "EndToEndId"], payment.end_to_end_id())?;
    w.amount_element("InstdAmt", payment.amount(), codes::CURRENCY)?;

    w.start_element("DrctDbtTx")?;
    w.start_element("MndtRltdInf")?;
    w.text_element("MndtId", payment.mandate_id())?;
    w.text_element("DtOfSgntr", &format_date(payment.mandate_date()))?;
    w.end_element("MndtRltdInf")?;
    w.end_element("DrctDbtTx")?;

    w.nested_text_element(
        &["DbtrAgt", "FinInstnId", "Othr", "Id"],
        codes::NOT_PROVIDED,
    )?;
    w.nested_text_element(&["Dbtr", "Nm"], debtor.name())?;
    w.nested_text_element(&["DbtrAcct", "Id", "IBAN"], debtor.iban())?;
    w.nested_text_element(&["RmtInf", "Ustrd"], payment.concept())?;

    w.end_element("DrctDbtTxInf")?;
    Ok(())
}
