use rand::{rngs::StdRng, SeedableRng};
use rand::RngCore;

use crate::test_engine::{
    error::Result,
    models::{Bank, GeneratedTest, TestRequest},
    sampler::{ProblemSelector, RejectionSampler},
};

/// Generate a test ID from the request's RNG stream.
fn make_test_id(rng: &mut impl RngCore) -> String {
    format!("T-{:08X}", rng.next_u32())
}

/// Single entry point: seed the RNG, then run the rejection sampler.
pub fn generate_test(bank: &Bank, request: TestRequest) -> Result<GeneratedTest> {
    let sampler = RejectionSampler::new(request.constraints, request.attempt_limit);
    generate_with(bank, &sampler, request.rng_seed)
}

/// Like [`generate_test`] but with a caller-chosen selection strategy.
pub fn generate_with(
    bank: &Bank,
    selector: &dyn ProblemSelector,
    rng_seed: Option<u64>,
) -> Result<GeneratedTest> {
    let mut rng: StdRng = match rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };

    let test_id = make_test_id(&mut rng);
    let selection = selector.select(bank, &mut rng)?;

    Ok(GeneratedTest {
        test_id,
        problems: selection.problems,
        attempts: selection.attempts,
    })
}
