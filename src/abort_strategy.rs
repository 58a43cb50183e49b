/// Enum with possible abort strategies.
/// These strategies specify when a running iteration (with the k-means calculation) is aborted.
/// A calculation that is stopped by its strategy before reaching `max_iter` counts as converged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AbortStrategy {
	/// This strategy aborts the calculation as soon as an assignment step did not move a single sample
	/// into another cluster. This is the classic Lloyd stopping rule, and the default.
	NoReassignment,
	/// This strategy aborts the calculation directly after an iteration produced no improvement where `improvement > threshold`
	/// for the first time.
	/// ## Fields:
	/// - **threshold**: Threshold, used to detect an improvement (`improvement > threshold`)
	NoImprovement { threshold: f64 },
	/// This strategy aborts the calculation, when there have not been any improvements after **x** iterations,
	/// where `improvement > threshold`.
	/// ## Fields:
	/// - **x**: The amount of consecutive without improvement, after which the calculation is aborted
	/// - **threshold**: Threshold, used to detect an improvement (`improvement > threshold`)
	/// - **abort_on_negative**: Specifies whether the strategy instantly aborts when a negative improvement occured (**true**), or if
	/// negative improvements are handled as "no improvements" (**false**).
	NoImprovementForXIterations { x: usize, threshold: f64, abort_on_negative: bool }
}
impl Default for AbortStrategy {
	fn default() -> Self { AbortStrategy::NoReassignment }
}
impl AbortStrategy {
	pub(crate) fn create_logic(&self) -> Box<dyn AbortStrategyLogic> {
		match *self {
			AbortStrategy::NoReassignment => Box::new(NoReassignmentLogic),
			AbortStrategy::NoImprovementForXIterations{x,threshold,abort_on_negative} => Box::new(NoImprovementForXIterationsLogic {
				x, threshold, abort_on_negative,
				prev_error: f64::INFINITY,
				no_improvement_counter: 0
			}),
			AbortStrategy::NoImprovement{threshold} => Box::new(NoImprovementLogic {
				threshold,
				prev_error: f64::INFINITY
			})
		}
	}
}

pub(crate) trait AbortStrategyLogic {
	/// Function that has to be called once an iteration of the calculation ended, a new error was calculated.
	/// ## Arguments
	/// - **error**: The new error (distsum), after an iteration
	/// - **reassigned**: Amount of samples that changed their cluster in this iteration
	/// ## Returns
	/// - **true** if the calculation should continue
	/// - **false** if the calculation should abort
	fn next(&mut self, error: f64, reassigned: usize) -> bool;
}


pub(crate) struct NoReassignmentLogic;
impl AbortStrategyLogic for NoReassignmentLogic {
	fn next(&mut self, _error: f64, reassigned: usize) -> bool {
		reassigned > 0
	}
}


pub(crate) struct NoImprovementLogic {
	threshold: f64,
	prev_error: f64
}
impl AbortStrategyLogic for NoImprovementLogic {
	fn next(&mut self, error: f64, _reassigned: usize) -> bool {
		let improvement = self.prev_error - error;
		self.prev_error = error;
		improvement > self.threshold
	}
}


pub(crate) struct NoImprovementForXIterationsLogic {
	x: usize,
	threshold: f64,
	abort_on_negative: bool,
	prev_error: f64,
	no_improvement_counter: usize
}
impl AbortStrategyLogic for NoImprovementForXIterationsLogic {
	fn next(&mut self, error: f64, _reassigned: usize) -> bool {
		let improvement = self.prev_error - error;
		self.prev_error = error;
		if self.abort_on_negative && improvement < 0.0 { // Negative improvement, and instant abort is requested
			return false;
		}
		if improvement > self.threshold { // positive improvement: reset no-improv-counter
			self.no_improvement_counter = 0;
		} else { // Still no improvement, count 1 up
			self.no_improvement_counter += 1;
		}
		self.no_improvement_counter < self.x
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn no_reassignment() {
		let mut abort_strategy = AbortStrategy::NoReassignment.create_logic();
		assert_eq!(abort_strategy.next(3000.0, 150), true);
		assert_eq!(abort_strategy.next(2000.0, 3), true);
		// distsum is irrelevant for this strategy
		assert_eq!(abort_strategy.next(2000.0, 1), true);
		assert_eq!(abort_strategy.next(1999.0, 0), false);
	}

	#[test]
	fn default_is_no_reassignment() {
		assert_eq!(AbortStrategy::default(), AbortStrategy::NoReassignment);
	}

	#[test]
	fn no_improvement() {
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: 0.0005 }.create_logic();
			assert_eq!(abort_strategy.next(3000.0, 10), true);
			assert_eq!(abort_strategy.next(3000.0, 10), false);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: 0.0005 }.create_logic();
			assert_eq!(abort_strategy.next(3000.0, 10), true);
			assert_eq!(abort_strategy.next(2999.99959, 10), false);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: 0.0005 }.create_logic();
			assert_eq!(abort_strategy.next(3000.0, 10), true);
			assert_eq!(abort_strategy.next(2999.99935, 10), true);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: 0.0005 }.create_logic();
			assert_eq!(abort_strategy.next(3000.0, 10), true);
			assert_eq!(abort_strategy.next(2000.0, 10), true);
			assert_eq!(abort_strategy.next(1999.99, 10), true);
			assert_eq!(abort_strategy.next(1999.99999999, 10), false);
		}
	}

	#[test]
	fn no_improvement_for_x_iterations() {
		{
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 1, threshold: 0.0005, abort_on_negative: false}.create_logic();
			assert_eq!(abort_strategy.next(3000.0, 10), true);
			assert_eq!(abort_strategy.next(3000.0, 10), false);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 1, threshold: 0.0005, abort_on_negative: false}.create_logic();
			assert_eq!(abort_strategy.next(3000.0, 10), true);
			assert_eq!(abort_strategy.next(2999.99935, 10), true);
		}
		// ABORT_ON_NEGATIVE (with negative improvements)
		{
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 2, threshold: 0.0005, abort_on_negative: true}.create_logic();
			assert_eq!(abort_strategy.next(3000.0, 10), true);
			assert_eq!(abort_strategy.next(3001.0, 10), false);
		}
		{ // Should abort on negative improvement, even ifs absolute value < threshold
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 2, threshold: 0.0005, abort_on_negative: true}.create_logic();
			assert_eq!(abort_strategy.next(3000.0, 10), true);
			assert_eq!(abort_strategy.next(3000.0004, 10), false);
		}
		// X != 1
		{
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 2, threshold: 0.0005, abort_on_negative: false}.create_logic();
			assert_eq!(abort_strategy.next(3000.0, 10), true);
			assert_eq!(abort_strategy.next(2000.0, 10), true);
			assert_eq!(abort_strategy.next(2000.0, 10), true);
			assert_eq!(abort_strategy.next(1999.0, 10), true);
			assert_eq!(abort_strategy.next(1999.0, 10), true);
			assert_eq!(abort_strategy.next(1999.0, 10), false);
		}
		{ // Negative improvement before no_improvement_counter == 2
			let mut abort_strategy = AbortStrategy::NoImprovementForXIterations {
				x: 2, threshold: 0.0005, abort_on_negative: true}.create_logic();
			assert_eq!(abort_strategy.next(3000.0, 10), true);
			assert_eq!(abort_strategy.next(2000.0, 10), true);
			assert_eq!(abort_strategy.next(2000.0, 10), true);
			assert_eq!(abort_strategy.next(1999.0, 10), true);
			assert_eq!(abort_strategy.next(2999.0, 10), false);
		}
	}
}
