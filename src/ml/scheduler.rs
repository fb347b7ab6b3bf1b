// ============================================================
// Layer 5 — Warmup Learning-Rate Schedule
// ============================================================
// The inverse-square-root schedule from "Attention Is All You
// Need" §5.3: the rate grows linearly for `warmup_steps`
// optimizer updates, peaks, then decays proportionally to the
// inverse square root of the step number.
//
//   rate(step) = d_model^-0.5 * min(step^-0.5, step * warmup^-1.5)
//
// Burn's Optimizer::step takes the learning rate as an argument
// on every call, so the schedule is a plain step counter the
// trainer consults before each update — no optimizer wrapping.
//
// Note on step 0: the reference formula divides by zero there
// (0^-0.5 = +inf). The counter is incremented BEFORE the rate is
// computed, so every rate actually applied uses step >= 1;
// rate_at(0) keeps the degenerate infinity rather than papering
// over it with a guard that would change observed behaviour.
//
// Reference: Vaswani et al. (2017), §5.3 "Optimizer"

/// Warmup-then-decay learning-rate schedule, stepped once per
/// optimizer update.
#[derive(Debug, Clone)]
pub struct WarmupSchedule {
    /// Model embedding dimension — the `dim` term of the formula
    d_model: usize,
    /// Number of updates spent ramping up
    warmup_steps: usize,
    /// Updates performed so far (starts at 0)
    current_step: usize,
    /// Rate computed by the most recent `next()` call
    rate: f64,
}

impl WarmupSchedule {
    pub fn new(d_model: usize, warmup_steps: usize) -> Self {
        Self { d_model, warmup_steps, current_step: 0, rate: 0.0 }
    }

    /// The rate the formula assigns to a given step.
    /// rate_at(0) is infinite — see the module note.
    pub fn rate_at(&self, step: usize) -> f64 {
        let step = step as f64;
        let warmup = self.warmup_steps as f64;
        (self.d_model as f64).powf(-0.5) * (step.powf(-0.5)).min(step * warmup.powf(-1.5))
    }

    /// Advance one optimizer update and return the rate to apply.
    pub fn next(&mut self) -> f64 {
        self.current_step += 1;
        self.rate = self.rate_at(self.current_step);
        self.rate
    }

    /// Rate applied on the most recent update (0.0 before the first)
    pub fn last_rate(&self) -> f64 {
        self.rate
    }

    /// Number of optimizer updates performed so far
    pub fn current_step(&self) -> usize {
        self.current_step
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_are_finite_and_non_negative_from_step_one() {
        let s = WarmupSchedule::new(512, 4000);
        for step in 1..20_000 {
            let rate = s.rate_at(step);
            assert!(rate.is_finite(), "rate at step {step} not finite");
            assert!(rate >= 0.0, "rate at step {step} negative");
        }
    }

    #[test]
    fn test_ramps_up_through_warmup() {
        let s = WarmupSchedule::new(512, 4000);
        let mut prev = 0.0;
        for step in 1..=4000 {
            let rate = s.rate_at(step);
            assert!(rate >= prev, "rate decreased at step {step} during warmup");
            prev = rate;
        }
    }

    #[test]
    fn test_decays_after_warmup() {
        let s = WarmupSchedule::new(512, 4000);
        let mut prev = s.rate_at(4000);
        for step in 4001..=20_000 {
            let rate = s.rate_at(step);
            assert!(rate <= prev, "rate increased at step {step} after warmup");
            prev = rate;
        }
    }

    #[test]
    fn test_peak_is_at_warmup_step() {
        // Both formula branches meet at step == warmup_steps
        let s = WarmupSchedule::new(512, 4000);
        let at_warmup = s.rate_at(4000);
        assert!(s.rate_at(3999) <= at_warmup);
        assert!(s.rate_at(4001) <= at_warmup);
    }

    #[test]
    fn test_step_zero_is_degenerate() {
        // Inherited from the reference formula: 0^-0.5 = +inf.
        // next() never applies it because it increments first.
        let mut s = WarmupSchedule::new(512, 4000);
        assert!(!s.rate_at(0).is_finite());

        let first_applied = s.next();
        assert_eq!(s.current_step(), 1);
        assert!(first_applied.is_finite());
        assert_eq!(first_applied, s.last_rate());
    }

    #[test]
    fn test_next_walks_the_formula() {
        let mut s = WarmupSchedule::new(256, 100);
        for step in 1..=300 {
            let applied = s.next();
            assert_eq!(applied, s.rate_at(step));
        }
        assert_eq!(s.current_step(), 300);
    }
}
