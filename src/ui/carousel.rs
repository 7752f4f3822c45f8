//! Testimonial carousel

/// Drag gestures weaker than this do nothing. `site.js` compares it
/// against `|offset| * velocity` when a drag on the testimonial ends.
pub const SWIPE_CONFIDENCE_THRESHOLD: f64 = 10_000.0;

/// Index-based carousel over `len` slides with wraparound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
    /// Last pagination step: positive forward, negative back, 0 on first load
    direction: i64,
}

impl Carousel {
    /// Carousel showing `index`, normalised into range
    pub fn at(len: usize, index: i64) -> Self {
        let mut carousel = Self {
            len,
            index: 0,
            direction: 0,
        };
        carousel.index = carousel.wrap(index);
        carousel
    }

    /// Keeps the direction of the step that led here
    pub fn with_direction(mut self, direction: i64) -> Self {
        self.direction = direction;
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> i64 {
        self.direction
    }

    /// Direction a jump to `target` records: `target - current`
    pub fn jump_direction(&self, target: usize) -> i64 {
        target as i64 - self.index as i64
    }

    /// Side the current slide enters from
    pub fn enters_from(&self) -> &'static str {
        match self.direction.signum() {
            1 => "right",
            -1 => "left",
            _ => "none",
        }
    }

    fn wrap(&self, index: i64) -> usize {
        if self.len == 0 {
            return 0;
        }
        index.rem_euclid(self.len as i64) as usize
    }

    /// Index the "next" control leads to
    pub fn next_index(&self) -> usize {
        self.wrap(self.index as i64 + 1)
    }

    /// Index the "previous" control leads to
    pub fn prev_index(&self) -> usize {
        self.wrap(self.index as i64 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_next_from_last_wraps_to_first() {
        let c = Carousel::at(4, 3);
        assert_eq!(c.next_index(), 0);
        assert_eq!(c.prev_index(), 2);
    }

    #[test]
    fn test_prev_from_first_wraps_to_last() {
        let c = Carousel::at(4, 0);
        assert_eq!(c.prev_index(), 3);
        assert_eq!(c.next_index(), 1);
    }

    #[test]
    fn test_normalisation() {
        assert_eq!(Carousel::at(4, -1).index(), 3);
        assert_eq!(Carousel::at(4, 9).index(), 1);
        assert_eq!(Carousel::at(0, 5).index(), 0);
        assert!(Carousel::at(0, 0).is_empty());
    }

    #[test]
    fn test_direction_follows_the_step() {
        let c = Carousel::at(4, 1);
        assert_eq!(c.direction(), 0);
        assert_eq!(c.enters_from(), "none");
        assert_eq!(c.jump_direction(3), 2);
        assert_eq!(c.jump_direction(0), -1);

        let forward = Carousel::at(4, c.next_index() as i64).with_direction(1);
        assert_eq!(forward.enters_from(), "right");
        let jumped_back = Carousel::at(4, 0).with_direction(c.jump_direction(0));
        assert_eq!(jumped_back.direction(), -1);
        assert_eq!(jumped_back.enters_from(), "left");
    }

    proptest! {
        #[test]
        fn property_index_stays_in_range(len in 1usize..20, start in -50i64..50) {
            let c = Carousel::at(len, start);
            prop_assert!(c.index() < len);
            prop_assert!(c.next_index() < len);
            prop_assert!(c.prev_index() < len);
        }

        #[test]
        fn property_full_cycle_returns_home(len in 1usize..20, start in 0usize..20) {
            let home = Carousel::at(len, start as i64);
            let mut c = home;
            for _ in 0..len {
                c = Carousel::at(len, c.next_index() as i64);
            }
            prop_assert_eq!(c.index(), home.index());
        }

        #[test]
        fn property_prev_undoes_next(len in 1usize..20, start in -50i64..50) {
            let c = Carousel::at(len, start);
            let forward = Carousel::at(len, c.next_index() as i64);
            prop_assert_eq!(forward.prev_index(), c.index());
        }
    }
}
