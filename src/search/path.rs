/// The Type used for the Cost of a [`Path`]
pub type Cost = f32;

/// A Path found by [`PathSearch`](crate::PathSearch)
///
/// Stores the sequence of Nodes in `path` and the total distance of walking along them in `cost`.
/// The Path is stored **backwards**: the first element is the goal, the last one is the start.
/// Use [`reversed`](Path::reversed) to get the walking order.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<P> {
    /// the Nodes, from goal to start
    pub path: Vec<P>,
    /// the total Cost of the Path
    pub cost: Cost,
}

impl<P> Path<P> {
    /// creates a new Path with the given sequence of Nodes and total Cost
    /// ## Examples
    /// Basic usage:
    /// ```
    /// # use waypoint_nav::Path;
    /// let path = Path::new(vec!['c', 'b', 'a'], 4.5);
    ///
    /// assert_eq!(path.path, vec!['c', 'b', 'a']);
    /// assert_eq!(path.cost, 4.5);
    /// ```
    pub fn new(path: Vec<P>, cost: Cost) -> Path<P> {
        Path { path, cost }
    }

    /// The Node the Path ends at
    pub fn goal(&self) -> Option<&P> {
        self.path.first()
    }

    /// The Node the Path starts at
    pub fn start(&self) -> Option<&P> {
        self.path.last()
    }

    /// Returns a copy of the Path in walking order, from start to goal.
    /// ## Examples
    /// Basic usage:
    /// ```
    /// # use waypoint_nav::Path;
    /// let path = Path::new(vec!['c', 'b', 'a'], 4.5);
    /// let walk = path.reversed();
    ///
    /// assert_eq!(walk.path, vec!['a', 'b', 'c']);
    /// assert_eq!(walk.cost, 4.5);
    /// ```
    pub fn reversed(&self) -> Path<P>
    where
        P: Clone,
    {
        let mut path = self.path.clone();
        path.reverse();
        Path::new(path, self.cost)
    }
}

use std::ops::{Deref, Index};

impl<P> Index<usize> for Path<P> {
    type Output = P;
    fn index(&self, index: usize) -> &P {
        &self.path[index]
    }
}

impl<P> Deref for Path<P> {
    type Target = [P];
    fn deref(&self) -> &[P] {
        &self.path
    }
}

use std::fmt;
impl<P: fmt::Display> fmt::Display for Path<P> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Path[Cost = {}]: ", self.cost)?;
        if self.path.is_empty() {
            write!(fmt, "<empty>")
        } else {
            write!(fmt, "{}", self.path[0])?;
            for p in self.path.iter().skip(1) {
                write!(fmt, " <- {}", p)?;
            }
            Ok(())
        }
    }
}
