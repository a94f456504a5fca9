//! Status code classification.

use derive_more::Display;

/// The class of an HTTP status code, by century.
///
/// Codes outside `100..=599` land in [`StatusClass::Unclassified`]; the
/// pipeline treats those as unsuccessful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StatusClass {
    /// 1xx
    #[display("informational")]
    Informational,
    /// 2xx
    #[display("success")]
    Success,
    /// 3xx
    #[display("redirection")]
    Redirection,
    /// 4xx
    #[display("client error")]
    ClientError,
    /// 5xx
    #[display("server error")]
    ServerError,
    /// Anything else.
    #[display("unclassified")]
    Unclassified,
}

impl StatusClass {
    /// Classify a status code.
    #[must_use]
    pub const fn of(code: u16) -> Self {
        match code {
            100..=199 => Self::Informational,
            200..=299 => Self::Success,
            300..=399 => Self::Redirection,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Unclassified,
        }
    }

    /// `true` only for [`StatusClass::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<u16> for StatusClass {
    fn from(code: u16) -> Self {
        Self::of(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries() {
        assert_eq!(StatusClass::of(100), StatusClass::Informational);
        assert_eq!(StatusClass::of(199), StatusClass::Informational);
        assert_eq!(StatusClass::of(200), StatusClass::Success);
        assert_eq!(StatusClass::of(204), StatusClass::Success);
        assert_eq!(StatusClass::of(299), StatusClass::Success);
        assert_eq!(StatusClass::of(300), StatusClass::Redirection);
        assert_eq!(StatusClass::of(399), StatusClass::Redirection);
        assert_eq!(StatusClass::of(400), StatusClass::ClientError);
        assert_eq!(StatusClass::of(403), StatusClass::ClientError);
        assert_eq!(StatusClass::of(499), StatusClass::ClientError);
        assert_eq!(StatusClass::of(500), StatusClass::ServerError);
        assert_eq!(StatusClass::of(599), StatusClass::ServerError);
    }

    #[test]
    fn classify_out_of_range() {
        assert_eq!(StatusClass::of(0), StatusClass::Unclassified);
        assert_eq!(StatusClass::of(99), StatusClass::Unclassified);
        assert_eq!(StatusClass::of(600), StatusClass::Unclassified);
        assert_eq!(StatusClass::of(u16::MAX), StatusClass::Unclassified);
    }

    #[test]
    fn every_code_in_range_has_its_century() {
        let expected = [
            StatusClass::Informational,
            StatusClass::Success,
            StatusClass::Redirection,
            StatusClass::ClientError,
            StatusClass::ServerError,
        ];
        for code in 100..=599_u16 {
            let century = usize::from(code / 100 - 1);
            assert_eq!(Some(&StatusClass::of(code)), expected.get(century), "{code}");
        }
    }

    #[test]
    fn only_success_is_success() {
        assert!(StatusClass::Success.is_success());
        assert!(!StatusClass::Redirection.is_success());
        assert!(!StatusClass::Unclassified.is_success());
    }
}
