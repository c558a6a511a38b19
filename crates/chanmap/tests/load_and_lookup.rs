use chanmap::{
    core::{error::ErrorClass, map::MapState},
    prelude::*,
};
use proptest::prelude::*;
use std::{collections::BTreeSet, fmt::Write as _, io::Write as _, path::Path};
use tempfile::NamedTempFile;

// ---- helpers -----------------------------------------------------------

fn write_map(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp map file");
    file.write_all(text.as_bytes()).expect("write temp map file");
    file.flush().expect("flush temp map file");

    file
}

fn tool_config(path: &Path) -> ToolConfig {
    ToolConfig::new(path)
}

const WIB_ETH: &str = "\
# WIBEth readout map
4
crate slot stream chan
I I I I
1 1 1 1
1 2 3 4
";

const PDS: &str = "\
# photon detector map
7
offlchan crate slot link stream detname gain
I I I I I S F
0 1 1 1 1 0 0
# crate 1
100  1 0 0 0 PDS_A 1.5
101  1 0 0 1 PDS_A 1.5
102  1 0 1 0 PDS_B 2.0
# crate 2
200  2 3 0 0 PDS_C 0.25
";

// ---- readout map -------------------------------------------------------

#[test]
fn wib_eth_map_hits_and_misses() {
    let file = write_map(WIB_ETH);
    let map = tool_config(file.path()).build().expect("load map");

    let hit = map
        .lookup_by_detector_elements(
            &DetectorElements::new()
                .with("crate", 1)
                .with("slot", 2)
                .with("stream", 3)
                .with("chan", 4),
        )
        .expect("lookup");
    assert!(hit.is_valid());
    assert_eq!(hit.int("crate"), Some(1));
    assert_eq!(hit.int("slot"), Some(2));
    assert_eq!(hit.int("stream"), Some(3));
    assert_eq!(hit.int("chan"), Some(4));
    assert_eq!(hit.reverse_key(), None);

    let miss = map
        .lookup_by_detector_elements(
            &DetectorElements::new()
                .with("crate", 9)
                .with("slot", 2)
                .with("stream", 3)
                .with("chan", 4),
        )
        .expect("lookup");
    assert!(!miss.is_valid());
}

// ---- tool --------------------------------------------------------------

#[test]
fn tool_serves_both_lookups() {
    let file = write_map(PDS);
    let tool = tool_config(file.path()).build_tool().expect("build tool");

    let by_channel = tool.chan_info_from_channel(102);
    assert!(by_channel.is_valid());
    assert_eq!(by_channel.text("detname"), Some("PDS_B"));
    assert_eq!(by_channel.float("gain"), Some(2.0));

    let elements: DetectorElements = [("crate", 1), ("slot", 0), ("link", 1), ("stream", 0)]
        .into_iter()
        .collect();
    let by_key = tool
        .chan_info_from_detector_elements(&elements)
        .expect("lookup");
    assert_eq!(by_key, by_channel);
}

#[test]
fn tool_config_decodes_with_flattened_load_options() {
    let config: ToolConfig = serde_json::from_str(
        r#"{ "file_name": "maps/pds.txt", "duplicate_keys": "reject" }"#,
    )
    .expect("decode tool config");

    assert_eq!(config.file_name, Path::new("maps/pds.txt"));
    assert_eq!(config.load.duplicate_keys, DuplicateKeyPolicy::Reject);
    assert_eq!(config.load.reverse_key_column, "offlchan");
}

#[test]
fn missing_file_surfaces_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = tool_config(&dir.path().join("absent.txt"))
        .build()
        .unwrap_err();

    assert_eq!(err.class, ErrorClass::Io);
    assert!(err.to_string().starts_with("io: cannot open map file"));
}

#[test]
fn rejected_duplicates_surface_a_conflict() {
    let file = write_map(&format!("{PDS}300  2 3 0 0 PDS_D 0.5\n"));

    let mut config = tool_config(file.path());
    let map = config.build().expect("last write wins by default");
    assert_eq!(map.len(), 5);
    assert_eq!(map.lookup_by_channel(200).reverse_key(), Some(200));
    assert_eq!(
        map.lookup_by_detector_elements(
            &[("crate", 2), ("slot", 3), ("link", 0), ("stream", 0)]
                .into_iter()
                .collect()
        )
        .expect("lookup")
        .reverse_key(),
        Some(300)
    );

    config.load = config.load.with_duplicate_keys(DuplicateKeyPolicy::Reject);
    let err = config.build().unwrap_err();
    assert_eq!(err.class, ErrorClass::Conflict);
}

#[test]
fn over_keyed_file_is_a_cardinality_error() {
    let file = write_map("5\na b c d e\nI I I I I\n1 1 1 1 1\n1 2 3 4 5\n");

    let err = tool_config(file.path()).build().unwrap_err();

    assert_eq!(err.class, ErrorClass::Cardinality);
}

#[test]
fn lookup_errors_convert_to_public_errors() {
    let map = ChannelMap::from_reader(WIB_ETH.as_bytes(), LoadConfig::default()).expect("load");
    assert_eq!(map.state(), MapState::Loaded);

    let err: Error = map
        .lookup_by_detector_elements(&DetectorElements::new().with("femb", 1))
        .unwrap_err()
        .into();

    assert_eq!(err.class, ErrorClass::Lookup);
    assert_eq!(err.to_string(), "lookup: unknown map key name 'femb'");
}

// ---- round trip --------------------------------------------------------

// (crate, slot, chan, gain) with unique key pairs; offlchan is the row index.
fn arb_rows() -> impl Strategy<Value = Vec<(i64, i64, i64, f64)>> {
    prop::collection::btree_set((-50i64..50, 0i64..8), 1..40).prop_flat_map(|keys| {
        let keys: Vec<_> = keys.into_iter().collect();
        let n = keys.len();
        (
            Just(keys),
            prop::collection::vec(-1000i64..1000, n),
            prop::collection::vec(-4.0f64..4.0, n),
        )
            .prop_map(|(keys, chans, gains)| {
                keys.into_iter()
                    .zip(chans)
                    .zip(gains)
                    .map(|(((crate_no, slot), chan), gain)| (crate_no, slot, chan, gain))
                    .collect()
            })
    })
}

fn render(rows: &[(i64, i64, i64, f64)]) -> String {
    let mut text = String::from("5\nofflchan crate slot chan gain\nI I I I F\n0 1 1 0 0\n");
    for (offlchan, (crate_no, slot, chan, gain)) in rows.iter().enumerate() {
        writeln!(text, "{offlchan} {crate_no} {slot} {chan} {gain:?}").expect("write row");
    }

    text
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_row_round_trips_through_both_indexes(rows in arb_rows()) {
        let map = ChannelMap::from_reader(render(&rows).as_bytes(), LoadConfig::default())
            .expect("generated map loads");
        prop_assert_eq!(map.len(), rows.len());

        let mut seen = BTreeSet::new();
        for (offlchan, &(crate_no, slot, chan, gain)) in rows.iter().enumerate() {
            let offlchan = i64::try_from(offlchan).expect("small row count");
            let elements = DetectorElements::new().with("crate", crate_no).with("slot", slot);

            let by_key = map.lookup_by_detector_elements(&elements).expect("lookup");
            prop_assert!(by_key.is_valid());
            prop_assert_eq!(by_key.reverse_key(), Some(offlchan));
            prop_assert_eq!(by_key.int("chan"), Some(chan));
            prop_assert_eq!(by_key.float("gain"), Some(gain));

            prop_assert_eq!(&map.lookup_by_channel(offlchan), &by_key);
            seen.insert(offlchan);
        }

        let absent = i64::try_from(rows.len()).expect("small row count");
        prop_assert!(!seen.contains(&absent));
        prop_assert!(!map.lookup_by_channel(absent).is_valid());
    }
}
