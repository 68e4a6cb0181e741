use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scraped bill: the three slip tallies plus identifying fields.
///
/// Field order here is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessSlipRecord {
    /// Document type code plus the bill number padded to four digits (e.g. "HB0042")
    pub bill_number: String,
    /// Reserved; the witness-slip page does not carry the bill title
    pub title: String,
    /// Raw bill number within the scraped range
    pub doc_num: u32,
    /// Proponent slip count
    pub proponents: u32,
    /// Opponent slip count
    pub opponents: u32,
    /// No-position slip count
    pub no_position: u32,
    /// Always proponents + opponents + no_position
    pub total_slips: u32,
    /// The exact URL the tallies were fetched from
    pub witness_slip_url: String,
}

impl WitnessSlipRecord {
    /// Assemble a record from extracted counts.
    ///
    /// `total_slips` is derived here and nowhere else. A fallback
    /// extraction produces the same zero counts as a bill nobody filed
    /// slips for; the record does not distinguish the two.
    pub fn assemble(bill_number: String, doc_num: u32, counts: SlipCounts, url: String) -> Self {
        let (proponents, opponents, no_position) = counts.tallies();
        Self {
            bill_number,
            title: String::new(),
            doc_num,
            proponents,
            opponents,
            no_position,
            total_slips: proponents + opponents + no_position,
            witness_slip_url: url,
        }
    }
}

/// Extraction result for the three slip counters on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlipCounts {
    /// All three counter cells were present and parsed
    Complete {
        proponents: u32,
        opponents: u32,
        no_position: u32,
    },
    /// Fewer than three counter cells were present; counts default to zero
    Fallback,
}

impl SlipCounts {
    /// The (proponents, opponents, no_position) triple; zeros for `Fallback`.
    pub fn tallies(&self) -> (u32, u32, u32) {
        match *self {
            SlipCounts::Complete {
                proponents,
                opponents,
                no_position,
            } => (proponents, opponents, no_position),
            SlipCounts::Fallback => (0, 0, 0),
        }
    }
}

/// Per-bill scrape result.
///
/// One bill failing never aborts the range. The driver yields a
/// `Skipped` outcome and moves on; callers keep the `Scraped` ones.
#[derive(Debug, Clone)]
pub enum BillOutcome {
    /// The fetch succeeded and a record was assembled
    Scraped(WitnessSlipRecord),
    /// No record for this bill; `reason` says why
    Skipped {
        bill_number: String,
        doc_num: u32,
        reason: SkipReason,
    },
}

impl BillOutcome {
    /// The record, if this outcome produced one.
    pub fn into_record(self) -> Option<WitnessSlipRecord> {
        match self {
            BillOutcome::Scraped(record) => Some(record),
            BillOutcome::Skipped { .. } => None,
        }
    }
}

/// Why a bill produced no record.
#[derive(Debug, Clone)]
pub enum SkipReason {
    /// Response arrived with a non-success status code
    HttpStatus(u16),
    /// The request failed in transit (timeout, connection error, bad URL)
    Transport(String),
    /// A counter cell held text that could not be parsed as a count
    Counter(String),
}

impl From<Error> for SkipReason {
    fn from(err: Error) -> Self {
        match err {
            Error::Counter(message) => SkipReason::Counter(message),
            other => SkipReason::Transport(other.to_string()),
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::HttpStatus(code) => write!(f, "HTTP status {}", code),
            SkipReason::Transport(message) => write!(f, "transport error: {}", message),
            SkipReason::Counter(message) => write!(f, "counter parse error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_record() -> WitnessSlipRecord {
        WitnessSlipRecord::assemble(
            "HB0042".to_string(),
            42,
            SlipCounts::Complete {
                proponents: 5,
                opponents: 2,
                no_position: 1,
            },
            "https://www.ilga.gov/legislation/witnessslip.asp?DocNum=42&DocTypeID=HB&LegID=&GAID=17&SessionID=112&GA=103&SpecSess=".to_string(),
        )
    }

    #[test]
    fn test_assemble_derives_total() {
        let record = sample_record();
        assert_eq!(record.total_slips, 8);
        assert_eq!(
            record.total_slips,
            record.proponents + record.opponents + record.no_position
        );
    }

    #[test]
    fn test_assemble_leaves_title_empty() {
        assert_eq!(sample_record().title, "");
    }

    #[test]
    fn test_fallback_counts_are_zero() {
        let record = WitnessSlipRecord::assemble(
            "HB0007".to_string(),
            7,
            SlipCounts::Fallback,
            "https://example.test/slip?DocNum=7".to_string(),
        );
        assert_eq!(record.proponents, 0);
        assert_eq!(record.opponents, 0);
        assert_eq!(record.no_position, 0);
        assert_eq!(record.total_slips, 0);
    }

    #[test]
    fn test_counter_error_classifies_as_counter_skip() {
        let reason = SkipReason::from(Error::Counter("expected a count".to_string()));
        assert!(matches!(reason, SkipReason::Counter(_)));
    }

    #[test]
    fn test_other_errors_classify_as_transport_skip() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let reason = SkipReason::from(Error::Io(io));
        match reason {
            SkipReason::Transport(message) => assert!(message.contains("timed out")),
            other => panic!("expected a transport skip, got {:?}", other),
        }
    }

    #[test]
    fn test_record_shape() {
        insta::assert_json_snapshot!(sample_record(), @r###"
        {
          "bill_number": "HB0042",
          "title": "",
          "doc_num": 42,
          "proponents": 5,
          "opponents": 2,
          "no_position": 1,
          "total_slips": 8,
          "witness_slip_url": "https://www.ilga.gov/legislation/witnessslip.asp?DocNum=42&DocTypeID=HB&LegID=&GAID=17&SessionID=112&GA=103&SpecSess="
        }
        "###);
    }
}
