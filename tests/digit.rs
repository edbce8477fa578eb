use polynum::poly::*;
use polynum::{Digit, Error, MP_PREC};
use rug::Float;

#[test]
fn f64_backend() {
    assert_eq!(<f64 as Digit>::zero(), 0.0);
    assert_eq!(<f64 as Digit>::from_i64(-3), -3.0);
    assert_eq!(Digit::erfc(&0.0), 1.0);
    assert_eq!(Digit::to_i64(&7.0), Some(7));
    assert!(matches!(
        <f64 as Digit>::from_literal("abc"),
        Err(Error::Parse { .. })
    ));
    assert_eq!(<f64 as Digit>::from_literal("-2.5").unwrap(), -2.5);
}

#[test]
fn f64_is_close() {
    let eps = f64::EPSILON;
    assert!(1.0f64.is_close(&1.0, &0.0, &0.0).unwrap());
    assert!(1.0f64.is_close(&(1.0 + eps), &0.0, &(2.0 * eps)).unwrap());
    assert!(!1.0f64.is_close(&1.1, &1e-3, &1e-3).unwrap());
    // relative tolerance scales with the larger magnitude
    assert!(1000.0f64.is_close(&1000.1, &1e-3, &0.0).unwrap());
}

#[test]
fn f64_chop() {
    let tol = <f64 as Digit>::chop_tol();
    assert_eq!(1e-20f64.chop(&tol), 0.0);
    assert_eq!(0.5f64.chop(&tol), 0.5);
}

#[test]
fn mp_backend() {
    let one = <Float as Digit>::one();
    assert_eq!(one.prec(), MP_PREC);

    let x = <Float as Digit>::from_i64(2);
    let r = Digit::sqrt(&x);
    let back = r.clone() * r;
    let tol = <Float as Digit>::default_tol();
    assert!(back.is_close(&x, &tol, &tol).unwrap());

    // 128-bit epsilon is far below double precision
    assert!(<Float as Digit>::epsilon() < Float::with_val(MP_PREC, 1e-30));
    assert_eq!(Digit::to_i64(&<Float as Digit>::from_i64(42)), Some(42));
}

#[test]
fn big_polynum_round_trip() {
    let d = |v: f64| Float::with_val(MP_PREC, v);
    let x = BigPolyNum::from_mantissa(vec![d(1.0), d(0.25)], -1);
    let y = x.recip().unwrap();
    assert_eq!(y.exponent(), 1);
    let id = x.clone() * y;
    assert_eq!(id.exponent(), 0);
    let tol = d(1e-30);
    assert!(id
        .is_close(&BigPolyNum::from_scalar(d(1.0)), &tol, &tol)
        .unwrap());
}
