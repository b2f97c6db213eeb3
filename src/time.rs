use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub};

macro_rules! time_unit {
    ($name: ident) => {
        #[derive(
            Debug,
            Default,
            Copy,
            Clone,
            PartialEq,
            derive_more::Add,
            derive_more::AddAssign,
            derive_more::Display,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(f64);

        impl $name {
            pub const ZERO: $name = Self::new(0.0);

            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            pub const fn into_f64(self) -> f64 {
                self.0
            }
        }

        // Simulated instants and intervals are finite and non-negative, so a
        // total order over the raw bits is safe.
        impl Eq for $name {}

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }
    };
}

time_unit!(Time);
time_unit!(Delta);

impl Time {
    pub const fn into_delta(self) -> Delta {
        Delta::new(self.0)
    }
}

impl Add<Delta> for Time {
    type Output = Time;

    fn add(self, rhs: Delta) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub<Time> for Time {
    type Output = Delta;

    fn sub(self, rhs: Time) -> Self::Output {
        Delta::new(self.0 - rhs.0)
    }
}

impl AddAssign<Delta> for Time {
    fn add_assign(&mut self, rhs: Delta) {
        *self = Self(self.0 + rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_order() {
        let t1 = Time::new(1.5);
        let t2 = Time::new(2.0);
        assert!(t1 < t2);
        assert_eq!(t2 - t1, Delta::new(0.5));
    }

    #[test]
    fn advance() {
        let mut t = Time::ZERO;
        t += Delta::new(3.25);
        t += Delta::new(0.75);
        assert_eq!(t, Time::new(4.0));
    }
}
