use cgmath::Vector2;
use tracing::debug;

use crate::error::TeleportError;

/// Which controller a reader is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// A continuous 2D input source, one per hand.
///
/// Readers must be enabled before their values are meaningful and
/// disabled when the controller shuts down; `read` is polled once per
/// tick and yields whatever the device reports, nominally within the
/// unit disc.
pub trait InputReader {
    fn enable(&mut self) -> Result<(), TeleportError>;
    fn disable(&mut self);
    fn read(&self) -> Vector2<f32>;
}

/// Combines the two hand readers into the per-tick movement vector.
pub struct InputAggregator {
    left: Box<dyn InputReader>,
    right: Box<dyn InputReader>,
}

impl InputAggregator {
    pub fn new(left: Box<dyn InputReader>, right: Box<dyn InputReader>) -> Self {
        InputAggregator { left, right }
    }

    /// Acquire both readers. If the right hand fails after the left
    /// succeeded, the left is released again so a failed initialization
    /// never leaves a reader dangling.
    pub fn enable(&mut self) -> Result<(), TeleportError> {
        self.left.enable()?;
        if let Err(err) = self.right.enable() {
            self.left.disable();
            return Err(err);
        }
        debug!("hand input readers enabled");
        Ok(())
    }

    pub fn disable(&mut self) {
        self.left.disable();
        self.right.disable();
        debug!("hand input readers disabled");
    }

    /// Unclamped vector sum of both hands. Pushing both sticks at once
    /// yields a magnitude above either alone; only the direction is
    /// consumed downstream, so this is a deliberate pass-through.
    pub fn read_combined(&self) -> Vector2<f32> {
        self.left.read() + self.right.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec2;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FixedReader {
        value: Vector2<f32>,
        enabled: Rc<Cell<bool>>,
        fail_enable: bool,
    }

    impl InputReader for FixedReader {
        fn enable(&mut self) -> Result<(), TeleportError> {
            if self.fail_enable {
                return Err(TeleportError::InputSource {
                    hand: Handedness::Right,
                    message: "binding missing".to_string(),
                });
            }
            self.enabled.set(true);
            Ok(())
        }

        fn disable(&mut self) {
            self.enabled.set(false);
        }

        fn read(&self) -> Vector2<f32> {
            self.value
        }
    }

    fn reader(value: Vector2<f32>, enabled: &Rc<Cell<bool>>) -> Box<FixedReader> {
        Box::new(FixedReader {
            value,
            enabled: enabled.clone(),
            fail_enable: false,
        })
    }

    #[test]
    fn test_combined_input_is_unclamped_sum() {
        let left_flag = Rc::new(Cell::new(false));
        let right_flag = Rc::new(Cell::new(false));
        let aggregator = InputAggregator::new(
            reader(vec2(0.0, 1.0), &left_flag),
            reader(vec2(0.0, 1.0), &right_flag),
        );

        // Both sticks fully forward: magnitude 2, not clamped to 1.
        assert_eq!(aggregator.read_combined(), vec2(0.0, 2.0));
    }

    #[test]
    fn test_enable_failure_releases_acquired_reader() {
        let left_flag = Rc::new(Cell::new(false));
        let right_flag = Rc::new(Cell::new(false));
        let mut failing = reader(vec2(0.0, 0.0), &right_flag);
        failing.fail_enable = true;

        let mut aggregator =
            InputAggregator::new(reader(vec2(0.0, 0.0), &left_flag), failing);

        assert!(aggregator.enable().is_err());
        assert!(!left_flag.get());
        assert!(!right_flag.get());
    }

    #[test]
    fn test_disable_releases_both_readers() {
        let left_flag = Rc::new(Cell::new(false));
        let right_flag = Rc::new(Cell::new(false));
        let mut aggregator = InputAggregator::new(
            reader(vec2(0.0, 0.0), &left_flag),
            reader(vec2(0.0, 0.0), &right_flag),
        );

        aggregator.enable().unwrap();
        assert!(left_flag.get() && right_flag.get());

        aggregator.disable();
        assert!(!left_flag.get() && !right_flag.get());
    }
}
