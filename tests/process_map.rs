//! End-to-end test: sample extract in, five CSV row streams out.

use csv::ReaderBuilder;
use osmelt::{process_map, CsvSink, MeltError};
use std::path::Path;
use tempfile::tempdir;

const OSM_SAMPLE: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<osm version="0.6" generator="test">
  <node id="1" lat="37.7749" lon="-122.4194" user="alice" uid="7" version="2" changeset="11" timestamp="2017-01-01T00:00:00Z" />
  <node id="2" lat="37.7750" lon="-122.4195" user="alice" uid="7" version="1" changeset="11" timestamp="2017-01-01T00:00:00Z" />
  <node id="3" lat="37.7751" lon="-122.4196" user="bob" uid="8" version="3" changeset="12" timestamp="2017-01-02T00:00:00Z">
    <tag k="amenity" v="cafe" />
    <tag k="addr:street" v="123 Valencia St" />
    <tag k="addr:postcode" v="94113" />
    <tag k="contact:phone" v="1-800-FLOWERS" />
    <tag k="bad=key" v="dropped" />
    <tag k="phone" v="fire" />
  </node>
  <way id="10" user="bob" uid="8" version="1" changeset="12" timestamp="2017-01-02T00:00:00Z">
    <nd ref="1" />
    <nd ref="2" />
    <nd ref="3" />
    <tag k="highway" v="residential" />
    <tag k="name" v="mission street" />
  </way>
  <relation id="100" user="carol" uid="9" version="1" changeset="13" timestamp="2017-01-03T00:00:00Z">
    <member type="way" ref="10" role="outer" />
    <tag k="type" v="multipolygon" />
  </relation>
</osm>
"#;

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|row| row.unwrap().iter().map(|field| field.to_string()).collect())
        .collect()
}

#[test]
fn process_map_writes_all_five_streams() {
    let dir = tempdir().unwrap();
    let osm_path = dir.path().join("sample.osm");
    let out_dir = dir.path().join("out");
    std::fs::write(&osm_path, OSM_SAMPLE).unwrap();

    let mut sink = CsvSink::create(&out_dir).unwrap();
    let stats = process_map(&osm_path, &mut sink, true).unwrap();
    assert_eq!(stats.nodes, 3);
    assert_eq!(stats.ways, 1);

    let nodes = read_rows(&out_dir.join(CsvSink::NODES_FILE));
    assert_eq!(
        nodes[0],
        vec!["id", "lat", "lon", "user", "uid", "version", "changeset", "timestamp"]
    );
    assert_eq!(nodes.len(), 4);
    assert_eq!(nodes[1][0], "1");
    assert_eq!(nodes[3][3], "bob");

    let ways = read_rows(&out_dir.join(CsvSink::WAYS_FILE));
    assert_eq!(
        ways[0],
        vec!["id", "user", "uid", "version", "changeset", "timestamp"]
    );
    assert_eq!(ways.len(), 2);
    assert_eq!(ways[1][0], "10");
}

#[test]
fn node_tags_are_filtered_classified_and_cleaned() {
    let dir = tempdir().unwrap();
    let osm_path = dir.path().join("sample.osm");
    let out_dir = dir.path().join("out");
    std::fs::write(&osm_path, OSM_SAMPLE).unwrap();

    let mut sink = CsvSink::create(&out_dir).unwrap();
    process_map(&osm_path, &mut sink, false).unwrap();

    let rows = read_rows(&out_dir.join(CsvSink::NODE_TAGS_FILE));
    assert_eq!(rows[0], vec!["id", "key", "value", "type"]);

    // The forbidden-character key and the deny-listed pair are gone.
    let keys: Vec<&str> = rows[1..].iter().map(|row| row[1].as_str()).collect();
    assert_eq!(keys, vec!["amenity", "street", "postcode", "phone"]);

    let street = rows.iter().find(|row| row[1] == "street").unwrap();
    assert_eq!(street[2], "Valencia Street");
    assert_eq!(street[3], "addr");

    let postcode = rows.iter().find(|row| row[1] == "postcode").unwrap();
    assert_eq!(postcode[2], "94133");

    let phone = rows.iter().find(|row| row[1] == "phone").unwrap();
    assert_eq!(phone[2], "(800) 356-9377");
    assert_eq!(phone[3], "contact");

    // All tag rows reference their owning node.
    assert!(rows[1..].iter().all(|row| row[0] == "3"));
}

#[test]
fn way_memberships_preserve_document_order() {
    let dir = tempdir().unwrap();
    let osm_path = dir.path().join("sample.osm");
    let out_dir = dir.path().join("out");
    std::fs::write(&osm_path, OSM_SAMPLE).unwrap();

    let mut sink = CsvSink::create(&out_dir).unwrap();
    process_map(&osm_path, &mut sink, false).unwrap();

    let rows = read_rows(&out_dir.join(CsvSink::WAY_NODES_FILE));
    assert_eq!(rows[0], vec!["id", "node_id", "position"]);
    assert_eq!(rows[1], vec!["10", "1", "0"]);
    assert_eq!(rows[2], vec!["10", "2", "1"]);
    assert_eq!(rows[3], vec!["10", "3", "2"]);

    // "name" is not a recognized cleaning key; its value passes through.
    let way_tags = read_rows(&out_dir.join(CsvSink::WAY_TAGS_FILE));
    let name = way_tags.iter().find(|row| row[1] == "name").unwrap();
    assert_eq!(name[2], "mission street");
}

#[test]
fn relations_are_not_persisted() {
    let dir = tempdir().unwrap();
    let osm_path = dir.path().join("sample.osm");
    let out_dir = dir.path().join("out");
    std::fs::write(&osm_path, OSM_SAMPLE).unwrap();

    let mut sink = CsvSink::create(&out_dir).unwrap();
    process_map(&osm_path, &mut sink, false).unwrap();

    for file in [
        CsvSink::NODES_FILE,
        CsvSink::WAYS_FILE,
        CsvSink::NODE_TAGS_FILE,
        CsvSink::WAY_TAGS_FILE,
    ] {
        let rows = read_rows(&out_dir.join(file));
        assert!(
            rows[1..].iter().all(|row| row[0] != "100"),
            "relation leaked into {file}"
        );
    }
}

#[test]
fn validation_failure_aborts_the_run() {
    let bad = r#"<osm>
  <node id="1" lat="37.7" lon="-122.4" user="alice" uid="7" version="1" changeset="11" timestamp="2017-01-01T00:00:00Z" />
  <node id="2" lat="not-a-float" lon="-122.5" user="alice" uid="7" version="1" changeset="11" timestamp="2017-01-01T00:00:00Z" />
</osm>
"#;
    let dir = tempdir().unwrap();
    let osm_path = dir.path().join("bad.osm");
    let out_dir = dir.path().join("out");
    std::fs::write(&osm_path, bad).unwrap();

    let mut sink = CsvSink::create(&out_dir).unwrap();
    let err = process_map(&osm_path, &mut sink, true).unwrap_err();
    assert!(matches!(err, MeltError::Validation { kind: "node", .. }));
    // The aborted run never flushed; dropping the sink does.
    drop(sink);

    // The first (valid) node made it out before the abort.
    let rows = read_rows(&out_dir.join(CsvSink::NODES_FILE));
    assert_eq!(rows.len(), 2);
}
