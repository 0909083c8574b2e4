use anchor_lang::solana_program::keccak;

use crate::constants::SHUFFLE_ROUNDS;

/// Format-preserving permutation over `[0, domain)` built from a generalised
/// Feistel network on the next perfect square, with cycle walking to stay
/// inside the domain. Distinct inputs map to distinct outputs, which is what
/// lets the draw pick N distinct balls without rejection sampling.
pub fn shuffle(x: u64, domain: u64, seed: &[u8; 32], rounds: u32) -> u64 {
    debug_assert!(domain > 0 && x < domain);
    if domain == 1 {
        return 0;
    }

    let h = ceil_sqrt(domain);
    let mut x = x;
    loop {
        let mut left = x / h;
        let mut right = x % h;
        for i in 0..rounds {
            let f = round_fn(right, i, seed, domain) % h;
            let next_right = (left + f) % h;
            left = right;
            right = next_right;
        }
        x = left * h + right;
        // Cycle-walk until the permuted value lands back inside the domain.
        if x < domain {
            return x;
        }
    }
}

/// Round function `H(R || i || S || M)` reduced by the caller modulo the
/// half-domain. Must stay in lockstep with any off-chain prefill tooling.
fn round_fn(right: u64, i: u32, seed: &[u8; 32], domain: u64) -> u64 {
    let hash = keccak::hashv(&[
        &right.to_be_bytes(),
        &(i as u64).to_be_bytes(),
        seed,
        &domain.to_be_bytes(),
    ]);

    let mut word = [0u8; 8];
    word.copy_from_slice(&hash.0[..8]);
    u64::from_be_bytes(word)
}

/// Smallest `h` with `h * h >= n`.
fn ceil_sqrt(n: u64) -> u64 {
    let mut h = (n as f64).sqrt() as u64;
    while h * h < n {
        h += 1;
    }
    while h > 1 && (h - 1) * (h - 1) >= n {
        h -= 1;
    }
    h
}

/// Draws `num_picks` distinct balls in `[1, max_ball_value]` from a single
/// uniform seed, sorted ascending so the bitset identifier is canonical.
pub fn draw_balls(seed: &[u8; 32], num_picks: u8, max_ball_value: u8) -> Vec<u8> {
    let domain = max_ball_value as u64;
    let mut balls: Vec<u8> = (0..num_picks as u64)
        .map(|i| 1 + shuffle(i, domain, seed, SHUFFLE_ROUNDS) as u8)
        .collect();
    balls.sort_unstable();
    balls
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn seed(tag: u8) -> [u8; 32] {
        let mut s = [0u8; 32];
        s[0] = tag;
        s[31] = tag.wrapping_mul(37);
        s
    }

    #[test]
    fn shuffle_is_a_permutation() {
        for domain in [1u64, 2, 5, 64, 69, 97, 255] {
            let s = seed(domain as u8);
            let outputs: BTreeSet<u64> = (0..domain).map(|x| shuffle(x, domain, &s, 4)).collect();
            assert_eq!(outputs.len(), domain as usize);
            assert!(outputs.iter().all(|&y| y < domain));
        }
    }

    #[test]
    fn shuffle_is_deterministic() {
        let s = seed(9);
        for x in 0..69 {
            assert_eq!(shuffle(x, 69, &s, 4), shuffle(x, 69, &s, 4));
        }
    }

    #[test]
    fn draw_is_deterministic_distinct_and_ascending() {
        for (n, m) in [(1u8, 1u8), (1, 69), (5, 69), (7, 7), (3, 255)] {
            let s = seed(n ^ m);
            let balls = draw_balls(&s, n, m);
            assert_eq!(balls, draw_balls(&s, n, m));
            assert_eq!(balls.len(), n as usize);
            assert!(balls.windows(2).all(|w| w[0] < w[1]));
            assert!(balls.iter().all(|&b| b >= 1 && b <= m));
        }
    }

    #[test]
    fn full_domain_draw_uses_every_ball() {
        let balls = draw_balls(&seed(3), 7, 7);
        assert_eq!(balls, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn ceil_sqrt_bounds() {
        for n in 1u64..300 {
            let h = ceil_sqrt(n);
            assert!(h * h >= n);
            assert!(h == 1 || (h - 1) * (h - 1) < n);
        }
    }
}
