#![feature(test)]
extern crate test;

use binstr::BigFloat;

fn finite_cases() -> Vec<BigFloat> {
    [
        123.0f64,
        -0.0,
        53346.6547e34,
        -2432.0,
        1.0,
        -475765.35342,
        -673873458673.0,
        0.0,
        -232.65473443e236,
        673873458673.0,
        1e17,
        f64::MAX,
        5e-324,
    ]
    .iter()
    .map(|f| BigFloat::from_f64(*f))
    .collect()
}

#[bench]
fn encode_finite(b: &mut test::Bencher) {
    let cases = finite_cases();

    b.iter(|| {
        for case in &cases {
            test::black_box(binstr::encode(case).unwrap());
        }
    });
}

#[bench]
fn decode_finite(b: &mut test::Bencher) {
    let cases = finite_cases()
        .iter()
        .map(|case| binstr::encode(case).unwrap())
        .collect::<Vec<_>>();

    b.iter(|| {
        for case in &cases {
            test::black_box(binstr::decode(case).unwrap());
        }
    });
}

#[bench]
fn f64_roundtrip(b: &mut test::Bencher) {
    let cases = finite_cases();

    b.iter(|| {
        for case in &cases {
            test::black_box(test::black_box(case).to_f64());
        }
    });
}
