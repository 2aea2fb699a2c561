use super::*;

#[test]
fn scale_rejects_non_positive_values() {
    assert!(Scale::new(0.0).is_err());
    assert!(Scale::new(-1.0).is_err());
    assert!(Scale::new(f64::NAN).is_err());
    assert!(Scale::new(f64::INFINITY).is_err());
    assert!(Scale::new(0.5).is_ok());
}

#[test]
fn scale_rejects_values_that_round_to_zero_dpi() {
    assert!(Scale::new(0.001).is_err());
    assert!("0.001".parse::<Scale>().is_err());
    assert_eq!(Scale::new(0.006).unwrap().dpi(), 1);
}

#[test]
fn dpi_is_base_times_scale() {
    assert_eq!(Scale::new(1.0).unwrap().dpi(), 96);
    assert_eq!(Scale::new(2.0).unwrap().dpi(), 192);
    assert_eq!(Scale::new(3.0).unwrap().dpi(), 288);
    assert_eq!(Scale::new(1.5).unwrap().dpi(), 144);
}

#[test]
fn suffix_is_empty_only_for_unit_scale() {
    assert_eq!(Scale::new(1.0).unwrap().suffix(), "");
    assert_eq!(Scale::new(2.0).unwrap().suffix(), "@2x");
    assert_eq!(Scale::new(1.5).unwrap().suffix(), "@1.5x");
}

#[test]
fn parses_from_cli_text() {
    assert_eq!("2".parse::<Scale>().unwrap(), Scale::new(2.0).unwrap());
    assert_eq!(" 0.5 ".parse::<Scale>().unwrap().get(), 0.5);
    assert!("abc".parse::<Scale>().is_err());
    assert!("0".parse::<Scale>().is_err());
}

#[test]
fn defaults_are_one_and_two() {
    let d = Scale::defaults();
    assert_eq!(d.len(), 2);
    assert_eq!(d[0].get(), 1.0);
    assert_eq!(d[1].get(), 2.0);
}
