//! End-to-end pipeline tests over the scripted mock fetcher.

use slipbot::client::mock::MockFetcher;
use slipbot::prelude::*;
use slipbot::writer;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn slip_page(proponents: u32, opponents: u32, no_position: u32) -> String {
    format!(
        r#"
        <html><body><table>
          <tr>
            <td class="tabcontrol">Proponents: {}</td>
            <td class="tabcontrol">Opponents: {}</td>
            <td class="tabcontrol">No Position: {}</td>
          </tr>
        </table></body></html>
        "#,
        proponents, opponents, no_position
    )
}

fn scrape_config(start: u32, end: u32, output: &Path) -> ScrapeConfig {
    ScrapeConfigBuilder::new("103", "17", "112")
        .bill_range(start, end)
        .output(output)
        .request_delay(Duration::ZERO)
        .build()
        .unwrap()
}

fn temp_output(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("slipbot-{}-{}.csv", name, std::process::id()))
}

#[tokio::test]
async fn test_mixed_range_writes_only_scraped_bills() {
    // Five bills: 1 and 5 succeed, 2 has no slip page, 3 drops the
    // connection, 4 serves a page without counter cells.
    let fetcher = MockFetcher::new();
    fetcher.respond_with_page(1, slip_page(5, 2, 1));
    fetcher.respond_with_status(2, 404);
    fetcher.fail_with_transport(3, "connection timed out");
    fetcher.respond_with_page(4, "<html><body>Bill withdrawn</body></html>");
    fetcher.respond_with_page(5, slip_page(0, 10, 3));

    let path = temp_output("mixed-range");
    let config = scrape_config(1, 5, &path);
    let processor = SlipProcessor::with_fetcher(config.clone(), fetcher);

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    let mut outcomes = processor.scrape();
    while let Some(outcome) = outcomes.next().await {
        match outcome {
            BillOutcome::Scraped(record) => records.push(record),
            BillOutcome::Skipped { doc_num, .. } => skipped.push(doc_num),
        }
    }

    assert_eq!(skipped, vec![2, 3]);
    assert_eq!(
        records.iter().map(|r| r.doc_num).collect::<Vec<_>>(),
        vec![1, 4, 5]
    );

    let written = writer::write_records(&config.output, &records).unwrap();
    assert_eq!(written, 3);

    let mut reader = csv::Reader::from_path(&config.output).unwrap();
    let read_back: Vec<WitnessSlipRecord> = reader
        .deserialize()
        .collect::<std::result::Result<_, _>>()
        .unwrap();
    fs::remove_file(&config.output).unwrap();

    assert_eq!(read_back, records);
    assert_eq!(read_back[0].total_slips, 8);
    // The fallback page yields a record with zero counts, same as a bill
    // nobody slipped on.
    assert_eq!(read_back[1].doc_num, 4);
    assert_eq!(read_back[1].total_slips, 0);
    assert_eq!(read_back[2].total_slips, 13);
}

#[tokio::test]
async fn test_every_bill_in_range_is_requested_once() {
    let fetcher = MockFetcher::new().with_default_body(slip_page(1, 1, 1));
    let path = temp_output("all-requested");
    let processor = SlipProcessor::with_fetcher(scrape_config(10, 14, &path), fetcher);

    let records = processor.collect_records().await;
    assert_eq!(records.len(), 5);

    for (record, doc_num) in records.iter().zip(10u32..=14) {
        assert_eq!(record.doc_num, doc_num);
        assert_eq!(record.bill_number, format!("HB{:04}", doc_num));
        assert!(record
            .witness_slip_url
            .contains(&format!("DocNum={}&", doc_num)));
    }
}

#[tokio::test]
async fn test_empty_range_writes_no_file() {
    let fetcher = MockFetcher::new().with_default_body(slip_page(1, 1, 1));
    let path = temp_output("empty-range");
    let config = scrape_config(10, 9, &path);
    let processor = SlipProcessor::with_fetcher(config.clone(), fetcher);

    let records = processor.collect_records().await;
    assert!(records.is_empty());

    let written = writer::write_records(&config.output, &records).unwrap();
    assert_eq!(written, 0);
    assert!(!config.output.exists());
}
