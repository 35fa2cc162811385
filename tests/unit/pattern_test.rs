//! Format compilation and filename matching

use proptest::prelude::*;
use wvm::pattern::{validate, Element};
use wvm::{MatchError, Metadata, Pattern, PatternError};

const FORMAT: &str = "$(slide) $(sample) $(region) $(stain).tif";

#[test]
fn parses_microscopy_filename() {
    let pattern = Pattern::compile(FORMAT).unwrap();
    let meta = pattern.match_str("slide-1 sample-1 L1 FFa.tif").unwrap();
    assert_eq!(
        meta,
        Metadata::from([
            ("slide", "slide-1"),
            ("sample", "sample-1"),
            ("region", "L1"),
            ("stain", "FFa"),
        ])
    );
    assert_eq!(meta.len(), 4);
}

#[test]
fn verbose_form() {
    let pattern = Pattern::compile("$(slide)-$(stain).tif").unwrap();
    insta::assert_snapshot!(
        pattern.verbose(),
        @"<var slide><char -><var stain><char .><char t><char i><char f>"
    );
}

#[test]
fn display_prints_format() {
    let pattern = Pattern::compile(FORMAT).unwrap();
    assert_eq!(pattern.to_string(), FORMAT);
    assert_eq!(pattern.variables().collect::<Vec<_>>(), ["slide", "sample", "region", "stain"]);
}

#[test]
fn trailing_input_and_empty_capture_are_distinct() {
    let pattern = Pattern::compile("$(a).$(b)x").unwrap();

    let trailing = pattern.match_str("1.2xyz").unwrap_err();
    assert!(matches!(trailing, MatchError::TrailingInput { position: 4, .. }));

    let empty = pattern.match_str(".2x").unwrap_err();
    assert_eq!(
        empty,
        MatchError::EmptyVariable {
            name: "a".to_string(),
            position: 0
        }
    );
    assert_ne!(trailing.position(), empty.position());
}

#[test]
fn validate_rejects_only_adjacent_variables() {
    let var = |n: &str| Element::Variable(n.to_string());
    let lit = Element::Literal;

    assert!(validate(&[]).is_ok());
    assert!(validate(&[var("a")]).is_ok());
    assert!(validate(&[lit(b'x'), lit(b'y')]).is_ok());
    assert!(validate(&[var("a"), lit(b'-'), var("b")]).is_ok());
    assert!(validate(&[lit(b'-'), var("a"), lit(b'-')]).is_ok());
    assert_eq!(
        validate(&[lit(b'-'), var("a"), var("b")]),
        Err(PatternError::AdjacentVariables {
            first: "a".to_string(),
            second: "b".to_string(),
            position: 1,
        })
    );
}

#[test]
fn compile_errors_carry_positions() {
    assert_eq!(Pattern::compile(""), Err(PatternError::Empty));
    assert_eq!(
        Pattern::compile("a $(b"),
        Err(PatternError::UnterminatedVariable { position: 2 })
    );
    assert_eq!(
        Pattern::compile("a$()"),
        Err(PatternError::EmptyName { position: 1 })
    );
    assert!(matches!(
        Pattern::compile("$(a)$(b)"),
        Err(PatternError::AdjacentVariables { position: 0, .. })
    ));
}

#[test]
fn from_str_matches_compile() {
    let parsed: Pattern = FORMAT.parse().unwrap();
    assert_eq!(parsed, Pattern::compile(FORMAT).unwrap());
}

fn element() -> impl Strategy<Value = Element> {
    prop_oneof![
        prop::sample::select(b"abz019 -_.".to_vec()).prop_map(Element::Literal),
        "[a-z]{1,6}".prop_map(Element::Variable),
    ]
}

fn elements() -> impl Strategy<Value = Vec<Element>> {
    prop::collection::vec(element(), 1..12).prop_map(|mut elements| {
        elements.dedup_by(|b, a| a.is_variable() && b.is_variable());
        elements
    })
}

proptest! {
    #[test]
    fn printed_pattern_recompiles_to_same_elements(elements in elements()) {
        let pattern = Pattern::new(elements).unwrap();
        let printed = pattern.to_string();
        let recompiled = Pattern::compile(&printed).unwrap();
        prop_assert_eq!(recompiled.elements(), pattern.elements());
    }

    #[test]
    fn compiled_strings_print_back_verbatim(format in "[a-c $()._]{1,24}") {
        if let Ok(pattern) = Pattern::compile(&format) {
            prop_assert_eq!(pattern.to_string(), format);
        }
    }

    #[test]
    fn matching_values_without_terminators_round_trips(
        slide in "[a-z0-9-]{1,8}",
        stain in "[A-Za-z]{1,8}",
    ) {
        let pattern = Pattern::compile("$(slide) $(stain).tif").unwrap();
        let meta = pattern.match_str(&format!("{} {}.tif", slide, stain)).unwrap();
        prop_assert_eq!(meta.value("slide"), slide.as_str());
        prop_assert_eq!(meta.value("stain"), stain.as_str());
    }
}
