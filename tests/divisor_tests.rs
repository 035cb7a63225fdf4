use divisor_witness::{G1Divisor, G1Point};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn points(seed: u64, n: usize) -> Vec<G1Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| G1Point::random_point_with(&mut rng)).collect()
}

#[test]
fn test_divisor_algebra() {
    let ps = points(30, 3);
    let d = G1Divisor::new([(ps[0].clone(), 1), (ps[1].clone(), 2), (ps[2].clone(), 3)]);

    assert_eq!(d.degree(), 6);
    assert_eq!(&d + &G1Divisor::empty(), d);
    assert_eq!(&d + &(-&d), G1Divisor::empty());
    assert_eq!(&d - &(-&d), &d + &d);
    assert_eq!((&d + &d).degree(), 2 * d.degree());
}

#[test]
fn test_principality_criterion() {
    let ps = points(31, 2);
    let sum = ps[0].add(&ps[1]);

    let principal = G1Divisor::new([
        (ps[0].clone(), 1),
        (ps[1].clone(), 1),
        (sum.negate(), 1),
        (G1Point::identity(), -3),
    ]);
    assert!(principal.is_principal());

    // degree 0, but P + Q + (P + Q) != O
    let unbalanced = G1Divisor::new([
        (ps[0].clone(), 1),
        (ps[1].clone(), 1),
        (sum, 1),
        (G1Point::identity(), -3),
    ]);
    assert_eq!(unbalanced.degree(), 0);
    assert!(!unbalanced.is_principal());
}
