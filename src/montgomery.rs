use crate::bigint::BigInt;
use std::cmp::Ordering;

/// Montgomery context for a fixed odd modulus.
///
/// Field elements stay in the plain domain; the context converts on the fly,
/// so a plain product costs two Montgomery products (`a * R^2 * R^-1` then
/// `(a*R) * b * R^-1`).
#[derive(Debug, Clone)]
pub struct MontgomeryCtx<const N: usize> {
    pub modulus: BigInt<N>,
    n0: u64,       // n0 = -m^{-1} mod 2^64
    r2: BigInt<N>, // R^2 mod m, where R = 2^(64N)
}

impl<const N: usize> MontgomeryCtx<N> {
    /// Create a Montgomery context.
    ///
    /// Returns `None` if the modulus is even, or if its top two bits are used
    /// (the single-word carry in `mont_mul` needs m < R/4).
    pub fn new(modulus: BigInt<N>) -> Option<Self> {
        if (modulus.limbs()[0] & 1) == 0 {
            return None; // must be odd for inverse mod 2^64
        }
        if modulus.bit_length() > BigInt::<N>::BITS - 2 {
            return None;
        }

        let n0 = mont_n0(modulus.limbs()[0]);
        let r2 = compute_r2::<N>(&modulus);

        Some(Self { modulus, n0, r2 })
    }

    /// Convert x (caller promises x < modulus) into Montgomery domain: x*R mod m
    #[inline]
    pub fn to_mont(&self, x: &BigInt<N>) -> BigInt<N> {
        self.mont_mul(x, &self.r2)
    }

    /// Convert x (Montgomery) back to normal: x*R^{-1} mod m
    #[inline]
    pub fn from_mont(&self, x: &BigInt<N>) -> BigInt<N> {
        self.mont_mul(x, &BigInt::<N>::one())
    }

    /// Core Montgomery multiplication (CIOS): returns (a*b*R^{-1}) mod m.
    ///
    /// Requires a, b in [0, m).
    pub fn mont_mul(&self, a: &BigInt<N>, b: &BigInt<N>) -> BigInt<N> {
        let a = a.limbs();
        let m = self.modulus.limbs();
        let mut t = [0u64; N];
        let mut t_hi = 0u64;

        for &bi in b.limbs().iter() {
            // t += a * b[i]
            let mut carry = 0u128;
            for j in 0..N {
                let uv = (t[j] as u128) + (a[j] as u128) * (bi as u128) + carry;
                t[j] = uv as u64;
                carry = uv >> 64;
            }
            let uv = (t_hi as u128) + carry;
            t_hi = uv as u64;
            let t_top = (uv >> 64) as u64;

            // t = (t + mi * m) / 2^64
            let mi = t[0].wrapping_mul(self.n0);
            let uv = (t[0] as u128) + (mi as u128) * (m[0] as u128);
            let mut carry = uv >> 64;
            for j in 1..N {
                let uv = (t[j] as u128) + (mi as u128) * (m[j] as u128) + carry;
                t[j - 1] = uv as u64;
                carry = uv >> 64;
            }
            let uv = (t_hi as u128) + carry;
            t[N - 1] = uv as u64;
            t_hi = t_top + (uv >> 64) as u64;
        }

        // t < 2m: subtract once if needed.
        let out = BigInt::<N>::from_limbs(t);
        if t_hi != 0 || out.compare(&self.modulus) != Ordering::Less {
            out.sub_with_borrow(&self.modulus).0
        } else {
            out
        }
    }

    /// Plain-domain modular product of a, b < modulus.
    #[inline]
    pub fn mul(&self, a: &BigInt<N>, b: &BigInt<N>) -> BigInt<N> {
        self.mont_mul(&self.to_mont(a), b)
    }

    /// Plain-domain modular exponentiation, square-and-multiply from the most
    /// significant bit of the exponent.
    pub fn pow(&self, base: &BigInt<N>, exp: &BigInt<N>) -> BigInt<N> {
        let one = self.to_mont(&BigInt::<N>::one());
        let base_m = self.to_mont(base);

        let mut acc = one;
        for i in (0..exp.bit_length()).rev() {
            acc = self.mont_mul(&acc, &acc);
            if exp.get_bit(i) {
                acc = self.mont_mul(&acc, &base_m);
            }
        }

        self.from_mont(&acc)
    }
}

/// Compute n0 = -m^{-1} mod 2^64 (requires m odd).
fn mont_n0(m0: u64) -> u64 {
    debug_assert!(m0 & 1 == 1);
    inv_mod_2_64_odd(m0).wrapping_neg()
}

/// Inverse of odd a modulo 2^64 using Newton iteration.
fn inv_mod_2_64_odd(a: u64) -> u64 {
    debug_assert!(a & 1 == 1);
    // x <- x(2 - ax) mod 2^64
    let mut x = 1u64;
    for _ in 0..6 {
        x = x.wrapping_mul(2u64.wrapping_sub(a.wrapping_mul(x)));
    }
    x
}

/// Compute R^2 mod m by repeated doubling from 1:
/// After 2*64N doublings: 1 * 2^(128N) mod m == R^2 mod m.
fn compute_r2<const N: usize>(m: &BigInt<N>) -> BigInt<N> {
    let mut r = BigInt::<N>::one().modulo(m);
    for _ in 0..(2 * 64 * N) {
        r = r.mod_add(&r, m);
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    type B = BigInt<4>;

    fn bn254_modulus() -> B {
        B::from_hex("30644E72E131A029B85045B68181585D97816A916871CA8D3C208C16D87CFD47").unwrap()
    }

    /// Schoolbook reference: shift-and-add with a modular reduction per step.
    fn reference_mul(a: &B, b: &B, m: &B) -> B {
        let mut acc = B::zero();
        for i in (0..a.bit_length()).rev() {
            acc = acc.mod_add(&acc, m);
            if a.get_bit(i) {
                acc = acc.mod_add(b, m);
            }
        }
        acc
    }

    #[test]
    fn n0_is_negated_inverse() {
        let m0 = bn254_modulus().limbs()[0];
        assert_eq!(mont_n0(m0), 0x87d20782e4866389);
        assert_eq!(m0.wrapping_mul(mont_n0(m0)), u64::MAX);
    }

    #[test]
    fn r2_matches_precomputed_value() {
        let ctx = MontgomeryCtx::new(bn254_modulus()).unwrap();
        let expected =
            B::from_hex("06D89F71CAB8351F47AB1EFF0A417FF6B5E71911D44501FBF32CFC5B538AFA89").unwrap();
        assert_eq!(ctx.r2, expected);
    }

    #[test]
    fn montgomery_matches_schoolbook() {
        let m = bn254_modulus();
        let ctx = MontgomeryCtx::new(m).unwrap();

        let a = B::from_hex("1234567890ABCDEF1234567890ABCDEF1234567890ABCDEF1234567890ABCDEF").unwrap();
        let b = B::from_hex("2FEDCBA0987654321FEDCBA0987654321FEDCBA0987654321FEDCBA098765432").unwrap();

        assert_eq!(ctx.mul(&a, &b), reference_mul(&a, &b, &m));
        assert_eq!(ctx.from_mont(&ctx.to_mont(&a)), a);
    }

    #[test]
    fn small_modulus() {
        let ctx = MontgomeryCtx::new(B::from_u64(97)).unwrap();
        assert_eq!(ctx.mul(&B::from_u64(50), &B::from_u64(60)), B::from_u64(3000 % 97));
        // Fermat: 5^96 = 1 (mod 97)
        assert!(ctx.pow(&B::from_u64(5), &B::from_u64(96)).is_one());
        assert!(ctx.pow(&B::from_u64(5), &B::zero()).is_one());
    }

    #[test]
    fn unsupported_moduli_rejected() {
        assert!(MontgomeryCtx::new(B::from_u64(96)).is_none());
        // top bit set: no headroom for the carry word
        let wide = B::from_limbs([1, 0, 0, 0x8000_0000_0000_0000]);
        assert!(MontgomeryCtx::new(wide).is_none());
        // 2^254 + 1 uses the second-highest bit
        let tight = B::from_limbs([1, 0, 0, 0x4000_0000_0000_0000]);
        assert!(MontgomeryCtx::new(tight).is_none());
    }
}
