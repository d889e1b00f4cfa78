use std::path::Path;

use super::*;
use crate::table::{RowId, SourceTable};

fn table(csv: &str) -> SourceTable {
    SourceTable::parse(Path::new("form.csv"), csv).unwrap()
}

#[test]
fn test_compatibility_code() {
    assert_eq!(compatibility_code("Playable with minor bugs"), "playable");
    assert_eq!(compatibility_code("Playable with minor issues"), "playable");
    assert_eq!(compatibility_code(""), "");
    assert_eq!(compatibility_code("BROKEN"), "broken");
    assert_eq!(compatibility_code("  Runs\twell"), "runs");
    assert_eq!(compatibility_code("   "), "");
}

#[test]
fn test_normalize_date_iso_and_us() {
    assert_eq!(normalize_date("2024-10-03"), "2024-10-03");
    assert_eq!(normalize_date("10/3/2024"), "2024-10-03");
    assert_eq!(normalize_date("10/03/24"), "2024-10-03");
    assert_eq!(normalize_date("2024/10/03"), "2024-10-03");
}

#[test]
fn test_normalize_date_with_time() {
    assert_eq!(normalize_date("10/3/2024 14:22:01"), "2024-10-03");
    assert_eq!(normalize_date("10/3/2024 2:22 PM"), "2024-10-03");
    assert_eq!(normalize_date("2024-10-03 00:00:00"), "2024-10-03");
    assert_eq!(normalize_date("2024-10-03T08:15:00Z"), "2024-10-03");
    assert_eq!(normalize_date("2024-10-03T08:15:00.250"), "2024-10-03");
}

#[test]
fn test_normalize_date_month_names() {
    assert_eq!(normalize_date("3 October 2024"), "2024-10-03");
    assert_eq!(normalize_date("Oct 3, 2024"), "2024-10-03");
    assert_eq!(normalize_date("October 3, 2024"), "2024-10-03");
}

#[test]
fn test_normalize_date_unparseable_is_empty() {
    assert_eq!(normalize_date(""), "");
    assert_eq!(normalize_date("last tuesday"), "");
    assert_eq!(normalize_date("2024-13-45"), "");
    assert_eq!(normalize_date("n/a"), "");
}

#[test]
fn test_normalize_full_row() {
    let t = table(
        "\
Email,Name,Name of Game,Categories,Publisher,Compatibility,Device Configuration eg Snapdragon X Elite - 32 GB,Date tested1,OS Version,Driver ID,Compatibility Details,Auto Super Resolution Compatibility,Auto Super Res FPS boost,Your name/gamertag,Processed
a@b.c,Ann,Halo Infinite,\"Action, Shooter\",Xbox Game Studios,Playable with minor issues,Surface Laptop 7,10/3/2024,24H2,31.0.1,Some stutter,Yes,20,annplays,
",
    );
    let report = normalize(&t.row(RowId(0)));
    assert_eq!(report.email, "a@b.c");
    assert_eq!(report.game_name, "Halo Infinite");
    assert_eq!(report.categories, "Action, Shooter");
    assert_eq!(report.compatibility, "playable");
    assert_eq!(report.device_configuration, "Surface Laptop 7");
    assert_eq!(report.date_tested, "2024-10-03");
    assert_eq!(report.os_version, "24H2");
    assert_eq!(report.driver_id, "31.0.1");
    assert_eq!(report.compatibility_details, "Some stutter");
    assert_eq!(report.auto_super_resolution_compatibility, "Yes");
    assert_eq!(report.auto_super_res_fps_boost, "20");
    assert_eq!(report.reporter, "annplays");
}

#[test]
fn test_empty_cells_become_empty_strings() {
    let t = table(
        "\
Email,Name,Name of Game,Categories,Publisher,Compatibility,Date tested1,Processed
,,Halo,,,,,
",
    );
    let report = normalize(&t.row(RowId(0)));
    assert_eq!(
        report,
        NormalizedReport {
            game_name: "Halo".into(),
            ..NormalizedReport::default()
        }
    );
}

#[test]
fn test_short_row_is_padded() {
    let t = table("Email,Name of Game,Compatibility Details\nx@y.z\n");
    let report = normalize(&t.row(RowId(0)));
    assert_eq!(report.email, "x@y.z");
    assert_eq!(report.game_name, "");
    assert_eq!(report.compatibility_details, "");
}
