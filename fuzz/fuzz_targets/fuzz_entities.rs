#![no_main]

use libfuzzer_sys::fuzz_target;

use adeudo::core::*;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut fields = s.split('|');
    let name = fields.next().unwrap_or_default();
    let iban = fields.next().unwrap_or_default();
    let bic = fields.next().unwrap_or_default();
    let office = fields.next().unwrap_or_default();

    // Errors are fine, panics are bugs.
    let _ = is_valid_iban_checksum(iban);
    let _ = Presenter::new(name, name, office);
    if let Ok(debtor) = Debtor::new(name, iban, bic) {
        assert!(!debtor.iban().contains(' '));
        assert_eq!(debtor.bic(), debtor.bic().to_uppercase());
    }
    let _ = s.parse::<SequenceType>();
});
