use polynum::poly::*;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn convolution() {
    let y = series_mul(&[1.0, 2.0, 3.0], &[9.0, 5.0, 1.0], 3);
    assert_eq!(y, vec![9.0, 23.0, 38.0]);
}

#[test]
fn convolution_matches_direct_sum() {
    let n = 16;
    let x: Vec<f64> = (0..n).map(|i| ((i * 7 + 3) % 11) as f64 - 5.0).collect();
    let h: Vec<f64> = (0..n).map(|i| ((i * 5 + 1) % 13) as f64 - 6.0).collect();
    let y = series_mul(&x, &h, n);
    for k in 0..n {
        let mut direct = 0.0;
        for j in 0..=k {
            direct += x[k - j] * h[j];
        }
        assert!(close(y[k], direct, 1e-12), "coefficient {k}: {} vs {direct}", y[k]);
    }
}

#[test]
fn inversion_digits() {
    let x = [0.5, 7.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let y = series_inv(&x, 8).unwrap();
    let expect = [
        2.0, -28.0, 392.0, -5488.0, 76832.0, -1075648.0, 15059072.0, -210827008.0,
    ];
    // every value is dyadic, the Newton rounds stay exact
    for (a, b) in y.iter().zip(expect.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn inversion_round_trip() {
    let n = 8;
    let x = [0.5, 7.0];
    let y = series_inv(&x, n).unwrap();
    let id = series_mul(&x, &y, n);
    assert_eq!(id[0], 1.0);
    for d in &id[1..] {
        assert!(close(*d, 0.0, 1e-9));
    }
}

#[test]
fn inversion_rejects_zero_lead() {
    assert!(series_inv(&[0.0, 1.0], 4).is_err());
    assert!(series_inv::<f64>(&[], 4).is_err());
}

#[test]
fn sqrt_of_perfect_square() {
    let y = series_sqrt(&[4.0, 4.0, 1.0], 8).unwrap();
    let expect = [2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    for (a, b) in y.iter().zip(expect.iter()) {
        assert!(close(*a, *b, 1e-12));
    }
}

#[test]
fn sqrt_squares_back() {
    let x = [1.0, 0.4, -0.3, 0.2];
    let n = 16;
    let r = series_sqrt(&x, n).unwrap();
    let sq = series_mul(&r, &r, n);
    for k in 0..n {
        let want = if k < x.len() { x[k] } else { 0.0 };
        assert!(close(sq[k], want, 1e-9), "coefficient {k}: {} vs {want}", sq[k]);
    }
}

#[test]
fn sqrt_rejects_nonpositive_lead() {
    assert!(series_sqrt(&[0.0, 1.0], 4).is_err());
    assert!(series_sqrt(&[-4.0, 1.0], 4).is_err());
}

#[test]
fn pow_minus_one_matches_inversion() {
    let x = [2.0, 1.0, -0.5, 0.25];
    let n = 12;
    let inv = series_inv(&x, n).unwrap();
    let p = series_pow(&x, &-1.0, n);
    for (a, b) in inv.iter().zip(p.iter()) {
        assert!(close(*a, *b, 1e-9));
    }
}

#[test]
fn pow_two_matches_convolution() {
    let x = [2.0, 1.0, -0.5, 0.25];
    let n = 12;
    let sq = series_mul(&x, &x, n);
    let p = series_pow(&x, &2.0, n);
    for (a, b) in sq.iter().zip(p.iter()) {
        assert!(close(*a, *b, 1e-9));
    }
}

#[test]
fn pow_half_matches_sqrt() {
    let x = [2.0, 1.0, -0.5, 0.25];
    let n = 12;
    let r = series_sqrt(&x, n).unwrap();
    let p = series_pow(&x, &0.5, n);
    for (a, b) in r.iter().zip(p.iter()) {
        assert!(close(*a, *b, 1e-9));
    }
}

#[test]
fn exp_of_linear_series_gives_factorials() {
    let n = 10;
    let mut x = vec![0.0; n];
    x[1] = 1.0;
    let e = series_exp(&x, n);
    assert_eq!(e[0], 1.0);
    let mut fact = 1.0;
    for k in 1..n {
        fact *= k as f64;
        assert!(close(e[k], 1.0 / fact, 1e-12), "coefficient {k}: {}", e[k]);
    }
}

#[test]
fn ln_undoes_exp() {
    let x = [0.5, 0.3, -0.2, 0.1];
    let n = 16;
    let e = series_exp(&x, n);
    let l = series_ln(&e, n).unwrap();
    for k in 0..n {
        let want = if k < x.len() { x[k] } else { 0.0 };
        assert!(close(l[k], want, 1e-9), "coefficient {k}: {} vs {want}", l[k]);
    }
}

#[test]
fn ln_rejects_nonpositive_lead() {
    assert!(series_ln(&[0.0, 1.0], 4).is_err());
    assert!(series_ln(&[-1.0, 1.0], 4).is_err());
}

#[test]
fn horner_evaluation() {
    let p = [3.0, 0.0, 1.0, 2.0];
    assert!(close(series_eval(&p, &5.0), 3.056, 1e-12));
}
