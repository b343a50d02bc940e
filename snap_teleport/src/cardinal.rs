use cgmath::{InnerSpace, Vector2, vec2};

/// The four axis-aligned horizontal move directions, plus `None` for
/// input with no clear direction (the zero vector).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinal {
    North,
    South,
    East,
    West,
    None,
}

/// Classify a thumbstick vector to its nearest cardinal.
///
/// The winner is the axis with the largest dot product against the
/// input; since all candidates are unit vectors the input does not need
/// to be normalized first. Every non-zero input maps to exactly one of
/// the four directions.
pub fn nearest_cardinal(input: Vector2<f32>) -> Cardinal {
    if input == vec2(0.0, 0.0) {
        return Cardinal::None;
    }

    // Candidate axes in tie-break priority order. An input lying exactly
    // on a 45 degree bisector resolves to the earliest axis here.
    let axes = [
        (Cardinal::North, vec2(0.0, 1.0)),
        (Cardinal::South, vec2(0.0, -1.0)),
        (Cardinal::East, vec2(1.0, 0.0)),
        (Cardinal::West, vec2(-1.0, 0.0)),
    ];

    let mut best = Cardinal::None;
    let mut best_score = f32::NEG_INFINITY;
    for (cardinal, axis) in axes {
        let score = input.dot(axis);
        if score > best_score {
            best = cardinal;
            best_score = score;
        }
    }
    best
}
