use super::csv::parse;
use super::labels::{resolve, resolve_with_source, LabelCounts, LabelSource};

fn numbered_rows(count: usize) -> String {
    let mut text = String::from("node_id,node_latency,downtime_percent\n");
    for i in 0..count {
        text.push_str(&format!("{},{},{}\n", i, 20 + i, i % 7));
    }
    text
}

fn labelled_rows(total: usize, malicious: usize, column: &str) -> String {
    let mut text = format!("node_id,coin_age,{}\n", column);
    for i in 0..total {
        let label = if i < malicious { "1" } else { "0" };
        text.push_str(&format!("{},{},{}\n", i, i * 3, label));
    }
    text
}

#[test]
fn test_parse_skips_blank_lines_and_crlf() {
    let text = "a,b,c\r\n1,2,3\r\n\r\n   \n4,5,6\n";
    let parsed = parse(text);

    assert_eq!(parsed.headers, vec!["a", "b", "c"]);
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed.rows[1].get("c"), Some("6"));
}

#[test]
fn test_parse_tolerates_ragged_rows() {
    let text = "a,b,c\n1,2\n4,5,6,7\n";
    let parsed = parse(text);

    assert_eq!(parsed.len(), 2);
    // Short row: trailing cell missing
    assert_eq!(parsed.rows[0].get("b"), Some("2"));
    assert_eq!(parsed.rows[0].get("c"), None);
    // Long row: extra cell dropped
    assert_eq!(parsed.rows[1].len(), 3);
}

#[test]
fn test_parse_empty_text() {
    let parsed = parse("");
    assert!(parsed.headers.is_empty());
    assert!(parsed.is_empty());

    let header_only = parse("a,b\n\n");
    assert_eq!(header_only.headers.len(), 2);
    assert!(header_only.is_empty());
}

#[test]
fn test_numeric_cells() {
    let parsed = parse("node_latency,coin_age\n120.5,abc\n");
    assert_eq!(parsed.rows[0].get_f64("node_latency"), Some(120.5));
    assert_eq!(parsed.rows[0].get_f64("coin_age"), None);
    assert_eq!(parsed.rows[0].get_f64("missing"), None);
}

#[test]
fn test_known_dataset_ignores_contents() {
    let parsed = parse(&numbered_rows(3));
    let counts = resolve("dataset_balanced_100_100.csv", &parsed.rows, &parsed.headers);
    assert_eq!(counts, LabelCounts::new(100, 100));
}

#[test]
fn test_known_dataset_requires_exact_name() {
    let parsed = parse(&numbered_rows(40));
    let (_, source) =
        resolve_with_source("my_dataset_balanced_100_100.csv", &parsed.rows, &parsed.headers);
    assert_eq!(source, LabelSource::SizeTier { percent: 25 });
}

#[test]
fn test_label_column_counts_ones() {
    let parsed = parse(&labelled_rows(60, 12, "label"));
    let counts = resolve("upload.csv", &parsed.rows, &parsed.headers);
    assert_eq!(counts, LabelCounts::new(48, 12));
}

#[test]
fn test_node_label_column_takes_priority() {
    let mut text = String::from("Node Label,class\n");
    for i in 0..10 {
        // Node Label marks 3 rows, class marks all of them
        text.push_str(if i < 3 { "1,1\n" } else { "0,1\n" });
    }
    let parsed = parse(&text);

    let (counts, source) = resolve_with_source("upload.csv", &parsed.rows, &parsed.headers);
    assert_eq!(counts, LabelCounts::new(7, 3));
    assert_eq!(source, LabelSource::LabelColumn("Node Label".to_string()));
}

#[test]
fn test_label_values_other_than_one_are_benign() {
    let text = "class\n1\n1.0\ntrue\n 1 \n0\n";
    let parsed = parse(text);
    let counts = resolve("upload.csv", &parsed.rows, &parsed.headers);
    assert_eq!(counts, LabelCounts::new(3, 2));
}

#[test]
fn test_size_tiers() {
    let cases = [
        (40, 10),  // <= 50 rows: 25%
        (50, 12),
        (51, 17),  // <= 200 rows: 35%
        (200, 70),
        (201, 80), // above: 40%
        (1000, 400),
    ];

    for (total, expected_malicious) in cases {
        let parsed = parse(&numbered_rows(total));
        let counts = resolve("upload.csv", &parsed.rows, &parsed.headers);
        assert_eq!(counts.malicious, expected_malicious, "total = {}", total);
        assert_eq!(counts.total(), total);
    }
}

#[test]
fn test_zero_rows_yields_zero_counts() {
    let parsed = parse("a,b\n");
    let counts = resolve("empty.csv", &parsed.rows, &parsed.headers);
    assert_eq!(counts, LabelCounts::default());
}
