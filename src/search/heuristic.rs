use glam::Vec3;

/// The estimate used by [`PathSearch`](crate::PathSearch) for the remaining distance to the goal.
///
/// Only the estimate changes with the Heuristic: the cost of moving between two Nodes is always
/// their [Euclidean distance](euclidean_distance).
///
/// ```
/// use waypoint_nav::{Heuristic, Vec3};
///
/// let a = Vec3::new(0.0, 0.0, 0.0);
/// let b = Vec3::new(3.0, 4.0, 0.0);
///
/// assert_eq!(Heuristic::Euclidean.cost(a, b), 5.0);
/// assert_eq!(Heuristic::Manhattan.cost(a, b), 7.0);
/// assert_eq!(Heuristic::default(), Heuristic::Euclidean);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Straight-line distance. Never overestimates, so it is the safe default.
    #[default]
    Euclidean,
    /// Sum of the distances along each axis (L1 norm).
    ///
    /// Overestimates diagonal moves, which makes searches faster but the result may be longer
    /// than the shortest Path.
    Manhattan,
}

impl Heuristic {
    /// Estimates the cost of getting from `from` to `to`
    pub fn cost(self, from: Vec3, to: Vec3) -> f32 {
        match self {
            Heuristic::Euclidean => euclidean_distance(from, to),
            Heuristic::Manhattan => manhattan_distance(from, to),
        }
    }
}

/// Straight-line distance between two points
pub fn euclidean_distance(from: Vec3, to: Vec3) -> f32 {
    from.distance(to)
}

/// `|dx| + |dy| + |dz|`
pub fn manhattan_distance(from: Vec3, to: Vec3) -> f32 {
    let d = (to - from).abs();
    d.x + d.y + d.z
}
