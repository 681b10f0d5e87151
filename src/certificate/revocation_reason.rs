use std::fmt;

/// CRL entry revocation reasons (RFC 5280 section 5.3.1). Code 7 is unused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevocationReason {
    Unspecified,
    KeyCompromise,
    CaCompromise,
    AffiliationChanged,
    Superseded,
    CessationOfOperation,
    CertificateHold,
    RemoveFromCrl,
    PrivilegeWithdrawn,
    AaCompromise,
}

use RevocationReason::*;

const REASONS: [(RevocationReason, i64, &'static str); 10] = [
    (Unspecified, 0, "Unspecified"),
    (KeyCompromise, 1, "Key_Compromise"),
    (CaCompromise, 2, "CA_Compromise"),
    (AffiliationChanged, 3, "Affiliation_Changed"),
    (Superseded, 4, "Superseded"),
    (CessationOfOperation, 5, "Cessation_of_Operation"),
    (CertificateHold, 6, "Certificate_Hold"),
    (RemoveFromCrl, 8, "Remove_from_CRL"),
    (PrivilegeWithdrawn, 9, "Privilege_Withdrawn"),
    (AaCompromise, 10, "AA_Compromise"),
];

impl RevocationReason {
    pub const ALL: [RevocationReason; 10] = [
        Unspecified,
        KeyCompromise,
        CaCompromise,
        AffiliationChanged,
        Superseded,
        CessationOfOperation,
        CertificateHold,
        RemoveFromCrl,
        PrivilegeWithdrawn,
        AaCompromise,
    ];

    pub fn from_code(code: i64) -> Option<RevocationReason> {
        REASONS.iter().find(|(_, c, _)| *c == code).map(|(reason, _, _)| *reason)
    }

    pub fn from_label(label: &str) -> Option<RevocationReason> {
        REASONS.iter()
            .find(|(_, _, l)| l.eq_ignore_ascii_case(label))
            .map(|(reason, _, _)| *reason)
    }

    pub fn code(self) -> i64 {
        self.entry().1
    }

    pub fn label(self) -> &'static str {
        self.entry().2
    }

    fn entry(self) -> &'static (RevocationReason, i64, &'static str) {
        // every variant has exactly one row, at its declaration index
        &REASONS[self as usize]
    }
}

impl fmt::Display for RevocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
