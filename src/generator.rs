//! Builds the monic RS generator polynomial `g(X) = prod_{i=0}^{ecc_len-1} (X - a^i)`.

use crate::poly::Field;

/// Generator state bound to a field and an ECC length: the monic
/// generator polynomial and the roots it was built from.
pub(crate) struct Generator<F: Field> {
    /// Coefficients of `g`, highest-degree-first, length `ecc_len + 1`.
    pub(crate) g: Vec<F::Elem>,
    /// `roots[i] = a^i` for `i` in `0..ecc_len`.
    pub(crate) roots: Vec<F::Elem>,
}

impl<F: Field> Generator<F> {
    /// Builds the generator for roots `a^0, a^1, ..., a^(ecc_len-1)`.
    pub(crate) fn new(f: &F, roots: Vec<F::Elem>) -> Self {
        // Double-buffered incremental multiply by (X - root).
        let mut cur = vec![F::ONE];
        let mut next = Vec::new();

        for &root in &roots {
            // (X - root) has coefficients [1, -root].
            let neg_root = f.sub(F::ZERO, root);

            next.clear();
            next.resize(cur.len() + 1, F::ZERO);
            for (i, &c) in cur.iter().enumerate() {
                next[i] = f.add(next[i], c);
                next[i + 1] = f.add(next[i + 1], f.mul(c, neg_root));
            }
            std::mem::swap(&mut cur, &mut next);
        }

        debug_assert_eq!(cur[0], F::ONE);
        Self { g: cur, roots }
    }

    /// Generator with its leading `1` coefficient dropped, i.e. `g_tail`
    /// as used by [`crate::poly::poly_mod_x_n`].
    pub(crate) fn tail(&self) -> &[F::Elem] {
        &self.g[1..]
    }
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field256::Field256;

    #[test]
    fn generator_has_every_root() {
        let f = Field256::new(2, 0x11d).unwrap();
        let ecc_len = 8;
        let roots: Vec<u8> = (0..ecc_len).map(|i| f.pow(2, i)).collect();
        let gen = Generator::new(&f, roots.clone());

        assert_eq!(gen.g.len(), ecc_len + 1);
        assert_eq!(gen.g[0], 1);
        for &root in &roots {
            assert_eq!(crate::poly::eval(&f, &gen.g, root), 0);
        }
    }
}
