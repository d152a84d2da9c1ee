pub mod find_primes;

pub use find_primes::*;
