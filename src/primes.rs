// 素数探索デモ用の生成関数と述語
// パイプライン本体からは不透明なコールバックとして扱われる

use crate::core::{PipelineError, PipelineResult};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// 乱数の上限のデフォルト値
pub const DEFAULT_MAX_NUMBER: u64 = 500_000_000;

/// n-1から2まで順に割って素数判定する
///
/// 計算量はO(n)。パイプライン全体のコストはほぼこの関数で決まる。
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor = n - 1;
    while divisor > 1 {
        if n % divisor == 0 {
            return false;
        }
        divisor -= 1;
    }
    true
}

/// `[0, max)` の一様乱数を返す生成関数を作成
///
/// `seed` を指定すると再現可能な列になる
pub fn random_number_producer(
    max: u64,
    seed: Option<u64>,
) -> PipelineResult<impl FnMut() -> u64 + Send + 'static> {
    if max == 0 {
        return Err(PipelineError::validation("max", "上限は1以上である必要があります"));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    Ok(move || rng.random_range(0..max))
}

/// 与えられた値の列を無限に繰り返す生成関数を作成
pub fn cycling_producer<T>(values: Vec<T>) -> PipelineResult<impl FnMut() -> T + Send + 'static>
where
    T: Clone + Send + 'static,
{
    if values.is_empty() {
        return Err(PipelineError::validation("values", "値の列が空です"));
    }

    let mut index = 0;
    Ok(move || {
        let value = values[index].clone();
        index = (index + 1) % values.len();
        value
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime_small_numbers() {
        let primes: Vec<u64> = (0..30).filter(|n| is_prime(*n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_is_prime_rejects_zero_and_one() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
    }

    #[test]
    fn test_is_prime_larger_values() {
        assert!(is_prime(7919));
        assert!(!is_prime(7917));
    }

    #[test]
    fn test_random_producer_respects_bound() {
        let mut producer = random_number_producer(10, Some(42)).unwrap();
        for _ in 0..1000 {
            assert!(producer() < 10);
        }
    }

    #[test]
    fn test_random_producer_is_reproducible_with_seed() {
        let mut first = random_number_producer(1_000_000, Some(7)).unwrap();
        let mut second = random_number_producer(1_000_000, Some(7)).unwrap();

        let a: Vec<u64> = (0..20).map(|_| first()).collect();
        let b: Vec<u64> = (0..20).map(|_| second()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_producer_rejects_zero_max() {
        assert!(random_number_producer(0, None).is_err());
    }

    #[test]
    fn test_cycling_producer_repeats() {
        let mut producer = cycling_producer(vec![4, 6, 8]).unwrap();
        let values: Vec<i32> = (0..7).map(|_| producer()).collect();
        assert_eq!(values, vec![4, 6, 8, 4, 6, 8, 4]);

        assert!(cycling_producer(Vec::<u8>::new()).is_err());
    }
}
