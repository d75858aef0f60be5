use crate::Primitive;

/// Enum with possible abort strategies.
/// These strategies specify when a running iteration (with the k-means calculation) is aborted.
/// Independent of the chosen strategy, a calculation never runs more than its `max_iter` rounds.
#[derive(Clone, Copy, Debug)]
pub enum AbortStrategy<T: Primitive> {
	/// This strategy aborts the calculation once no centroid moved by more than **epsilon** within one round.
	/// ## Fields:
	/// - **epsilon**: Largest centroid shift (Euclidean distance between old and new centroid) that still counts as converged
	Converged { epsilon: T },
	/// This strategy aborts the calculation directly after an iteration produced no improvement where `improvement > threshold`
	/// for the first time.
	/// ## Fields:
	/// - **threshold**: Threshold, used to detect an improvement of the distance sum (`improvement > threshold`)
	NoImprovement { threshold: T },
	/// This strategy aborts the calculation, when there have not been any improvements after **x** iterations,
	/// where `improvement > threshold`.
	/// ## Fields:
	/// - **x**: The amount of consecutive without improvement, after which the calculation is aborted
	/// - **threshold**: Threshold, used to detect an improvement (`improvement > threshold`)
	/// - **abort_on_negative**: Specifies whether the strategy instantly aborts when a negative improvement occured (**true**), or if
	/// negative improvements are handled as "no improvements" (**false**).
	NoImprovementForXIterations { x: usize, threshold: T, abort_on_negative: bool }
}
impl<T: Primitive> Default for AbortStrategy<T> {
	fn default() -> Self {
		AbortStrategy::Converged { epsilon: T::from(crate::EPSILON).unwrap_or_else(T::epsilon) }
	}
}
impl<T: Primitive> AbortStrategy<T> {
	pub(crate) fn create_logic(&self) -> Box<dyn AbortStrategyLogic<T>> {
		match *self {
			AbortStrategy::Converged{epsilon} => Box::new(ConvergedLogic { epsilon }),
			AbortStrategy::NoImprovementForXIterations{x,threshold,abort_on_negative} => Box::new(NoImprovementForXIterationsLogic {
				x, threshold, abort_on_negative,
				prev_error: T::infinity(),
				no_improvement_counter: 0
			}),
			AbortStrategy::NoImprovement{threshold} => Box::new(NoImprovementLogic {
				threshold,
				prev_error: T::infinity()
			})
		}
	}
}

pub(crate) trait AbortStrategyLogic<T: Primitive> {
	/// Function that has to be called once an iteration of the calculation ended.
	/// ## Arguments
	/// - **shift**: Largest distance any centroid moved during the iteration
	/// - **error**: The new error (distsum), after the iteration
	/// ## Returns
	/// - **true** if the calculation should continue
	/// - **false** if the calculation should abort
	fn next(&mut self, shift: T, error: T) -> bool;
}


pub(crate) struct ConvergedLogic<T: Primitive> {
	epsilon: T
}
impl<T: Primitive> AbortStrategyLogic<T> for ConvergedLogic<T> {
	fn next(&mut self, shift: T, _error: T) -> bool {
		shift > self.epsilon
	}
}


pub(crate) struct NoImprovementLogic<T: Primitive> {
	threshold: T,
	prev_error: T
}
impl<T: Primitive> AbortStrategyLogic<T> for NoImprovementLogic<T> {
	fn next(&mut self, _shift: T, error: T) -> bool {
		let improvement = self.prev_error - error;
		self.prev_error = error;
		improvement > self.threshold
	}
}


pub(crate) struct NoImprovementForXIterationsLogic<T: Primitive> {
	x: usize,
	threshold: T,
	abort_on_negative: bool,
	prev_error: T,
	no_improvement_counter: usize
}
impl<T: Primitive> AbortStrategyLogic<T> for NoImprovementForXIterationsLogic<T> {
	fn next(&mut self, _shift: T, error: T) -> bool {
		let improvement = self.prev_error - error;
		self.prev_error = error;
		if self.abort_on_negative && improvement < T::zero() { // Negative improvement, and instant abort is requested
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
