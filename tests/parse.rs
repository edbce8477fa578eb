use polynum::poly::*;
use polynum::Error;

#[test]
fn parse_basic() {
    let x: PolyNum64 = "(~1.2~,2.5~-0.3~)*(~1~0~)**(-2)".parse().unwrap();
    assert_eq!(x.exponent(), -2);
    assert_eq!(x.mantissa()[0], 1.2);
    assert_eq!(x.mantissa()[1], 2.5);
    assert_eq!(x.mantissa()[2], -0.3);
}

#[test]
fn parse_single_digit() {
    let x: PolyNum64 = "(~1.2~)".parse().unwrap();
    assert_eq!(x.exponent(), 0);
    assert_eq!(x.mantissa()[0], 1.2);
    assert!(x.mantissa()[1..].iter().all(|d| *d == 0.0));
}

#[test]
fn parse_tolerates_whitespace() {
    let x: PolyNum64 = "( ~ 1.2 ~ , 2.5 ~ -0.3 ~ )".parse().unwrap();
    assert_eq!(x.exponent(), 0);
    assert_eq!(x.mantissa()[1], 2.5);
}

#[test]
fn parse_zero_head_shifts_down() {
    let x: PolyNum64 = "(~0~,2.5~-0.3~)".parse().unwrap();
    assert_eq!(x.exponent(), -1);
    assert_eq!(x.mantissa()[0], 2.5);
    assert_eq!(x.mantissa()[1], -0.3);
    let y: PolyNum64 = "(~,2.5~-0.3~)".parse().unwrap();
    assert_eq!(x, y);
}

#[test]
fn parse_wide_head_shifts_up() {
    let x: PolyNum64 = "(~-1.1~2.2~,-3.3~)".parse().unwrap();
    assert_eq!(x.exponent(), 1);
    assert_eq!(x.to_string(), "(~-1.1~,2.2~-3.3~)*(~1~0~)**(1)");
}

#[test]
fn parse_bare_head() {
    // every digit left of the comma position raises the exponent
    let x: PolyNum64 = "(~1~2~)".parse().unwrap();
    assert_eq!(x.exponent(), 1);
    assert_eq!(x.mantissa()[0], 1.0);
    assert_eq!(x.mantissa()[1], 2.0);
}

#[test]
fn display_round_trip() {
    let x = PolyNum64::from_mantissa(vec![1.1, 2.0, 3.0], -2);
    let s = x.to_string();
    assert_eq!(s, "(~1.1~,2~3~)*(~1~0~)**(-2)");
    let y: PolyNum64 = s.parse().unwrap();
    assert_eq!(x, y);
}

#[test]
fn display_zero_and_cut() {
    assert_eq!(PolyNum64::new().to_string(), "(~0~)");
    let digits: Vec<f64> = (1..=10).map(|i| i as f64).collect();
    let x = PolyNum64::from_mantissa(digits, 0);
    assert_eq!(x.format_cut(4), "(~1~,2~3~4~...~)");
}

#[test]
fn named_constants() {
    let p: PolyNum64 = "const:(~2~,-4~4~-4~4~...~)".parse().unwrap();
    assert_eq!(p, PolyNum64::trapezoid_kernel());
    let m = p.mantissa();
    assert_eq!(m[0], 2.0);
    assert_eq!(m[1], -4.0);
    assert_eq!(m[2], 4.0);
    assert_eq!(m[63], -4.0);

    let s: PolyNum64 = "const:(~1~,2~2~2~2~...~)".parse().unwrap();
    assert_eq!(s, PolyNum64::unit_step_kernel());
    assert_eq!(s.mantissa()[0], 1.0);
    assert_eq!(s.mantissa()[63], 2.0);
}

#[test]
fn constant_with_exponent_suffix() {
    let p: PolyNum64 = "const:(~2~,-4~4~-4~4~...~)*(~1~0~)**(-1)".parse().unwrap();
    assert_eq!(p.exponent(), -1);
    assert_eq!(p.mantissa()[0], 2.0);
}

#[test]
fn parse_errors() {
    assert!(matches!(
        "(~1~)**(2)**(3)".parse::<PolyNum64>(),
        Err(Error::Parse { .. })
    ));
    assert!(matches!(
        "(~1~)*(~1~0~)**(x)".parse::<PolyNum64>(),
        Err(Error::Parse { .. })
    ));
    assert!(matches!(
        "const:(~9~)".parse::<PolyNum64>(),
        Err(Error::Parse { .. })
    ));
    assert!(matches!("(~a~b~)".parse::<PolyNum64>(), Err(Error::Parse { .. })));
}
