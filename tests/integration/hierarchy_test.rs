//! Building charts and rows from parsed filenames

use wvm::charts::{build_charts, build_rows, OverlayError};
use wvm::{Item, Metadata, Tagged};

use crate::helpers::{parsed, paths};

fn no_overlay(_: &[Item]) -> Result<Item, OverlayError> {
    panic!("overlay should not be called")
}

#[test]
fn rows_by_slide_and_region_flatten_in_golden_order() {
    let items = vec![
        parsed("path/a", "slide-1 sample-1 L1 FFa.tif"),
        parsed("path/b", "slide-2 sample-1 L2 FFa.tif"),
        parsed("path/c", "slide-1 sample-1 L3 FFa.tif"),
        parsed("path/d", "slide-2 sample-1 L1 FFb.tif"),
        parsed("path/e", "slide-1 sample-1 L2 FFb.tif"),
        parsed("path/f", "slide-2 sample-1 L3 FFb.tif"),
        parsed("path/g", "slide-1 sample-1 L1 FFc.tif"),
        parsed("path/h", "slide-2 sample-1 L2 FFc.tif"),
        parsed("path/i", "slide-1 sample-1 L3 FFc.tif"),
    ];
    let no_sort: &[&str] = &[];
    let rows = build_rows(items, &["slide", "region"], no_sort, no_sort, &no_overlay).unwrap();

    assert_eq!(rows.len(), 6);
    assert_eq!(
        rows[0].metadata(),
        &Metadata::from([("slide", "slide-1"), ("region", "L1")])
    );
    let flat: Vec<&Item> = rows.iter().flat_map(|row| row.leaves()).collect();
    assert_eq!(
        paths(flat),
        ["path/a", "path/g", "path/e", "path/c", "path/i", "path/d", "path/b", "path/h", "path/f"]
    );
}

#[test]
fn charts_by_sample_and_slide() {
    let mut items = Vec::new();
    for (suffix, slide, sample) in [
        (1, "slide-1", "sample-1"),
        (2, "slide-2", "sample-1"),
        (3, "slide-1", "sample-2"),
        (4, "slide-2", "sample-2"),
    ] {
        for (letter, region, stain) in [
            ("a", "L1", "FFa"),
            ("b", "L2", "FFa"),
            ("c", "L3", "FFa"),
            ("d", "L1", "FFb"),
            ("e", "L2", "FFb"),
            ("f", "L3", "FFb"),
            ("g", "L1", "FFc"),
            ("h", "L2", "FFc"),
            ("i", "L3", "FFc"),
        ] {
            items.push(parsed(
                &format!("path/{}-{}", letter, suffix),
                &format!("{} {} {} {}.tif", slide, sample, region, stain),
            ));
        }
    }
    assert_eq!(items.len(), 36);

    let no_overlay_values: &[&str] = &[];
    let charts = build_charts(
        items,
        &["sample", "slide"],
        &["region"],
        &["stain"],
        no_overlay_values,
        &no_overlay,
    )
    .unwrap();

    assert_eq!(charts.len(), 4);
    for (chart, suffix, sample, slide) in [
        (&charts[0], 1, "sample-1", "slide-1"),
        (&charts[1], 2, "sample-1", "slide-2"),
        (&charts[2], 3, "sample-2", "slide-1"),
        (&charts[3], 4, "sample-2", "slide-2"),
    ] {
        assert_eq!(
            chart.metadata(),
            &Metadata::from([("sample", sample), ("slide", slide)])
        );
        assert_eq!(chart.rows().len(), 3);
        let rows: Vec<Vec<String>> = chart.rows().iter().map(|r| paths(r.items())).collect();
        let expect = |letters: [&str; 3]| -> Vec<String> {
            letters
                .iter()
                .map(|l| format!("path/{}-{}", l, suffix))
                .collect()
        };
        assert_eq!(rows[0], expect(["a", "d", "g"]));
        assert_eq!(rows[1], expect(["b", "e", "h"]));
        assert_eq!(rows[2], expect(["c", "f", "i"]));
        assert_eq!(chart.rows()[2].metadata(), &Metadata::from([("region", "L3")]));
    }
}

#[test]
fn empty_input_builds_nothing() {
    let charts = build_charts(
        Vec::new(),
        &["sample"],
        &["region"],
        &["stain"],
        &[],
        &no_overlay,
    )
    .unwrap();
    assert!(charts.is_empty());
}

#[test]
fn no_chart_keys_gives_one_chart_per_item() {
    let items = vec![
        parsed("path/a", "slide-1 sample-1 L1 FFa.tif"),
        parsed("path/b", "slide-1 sample-1 L1 FFb.tif"),
    ];
    let none: &[&str] = &[];
    let charts = build_charts(items, none, &["region"], &["stain"], none, &no_overlay).unwrap();
    assert_eq!(charts.len(), 2);
    assert!(charts.iter().all(|c| c.metadata().is_empty()));
    assert_eq!(paths(charts[1].leaves()), ["path/b"]);
}
